use schoolboard::server::{
    composition::Composition, config::Config, error::AppError, logging, startup,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    logging::init(config.environment);

    let db = startup::connect_to_database(&config).await?;

    tracing::info!("Starting server in {} mode", config.environment);

    let mut app = Composition::application(db)
        .compile()?
        .listen(config.bind_address())
        .await?;

    startup::shutdown_signal().await;
    tracing::info!("Shutting down");

    app.shutdown().await
}
