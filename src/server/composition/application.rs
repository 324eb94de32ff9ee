use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

use crate::server::{
    composition::{container::Container, token::Token},
    error::AppError,
};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// A compiled composition: resolved container plus the fully wired router.
pub struct Application {
    container: Arc<Container>,
    router: Router,
}

impl Application {
    pub(crate) fn new(container: Arc<Container>, router: Router) -> Self {
        Self { container, router }
    }

    pub fn container(&self) -> &Arc<Container> {
        &self.container
    }

    pub fn get<T: ?Sized + Send + Sync + 'static>(&self, token: &Token<T>) -> Option<Arc<T>> {
        self.container.get(token)
    }

    /// Binds `addr` and serves the application on a background task.
    ///
    /// Port `0` picks a free ephemeral port; read it back with
    /// [`RunningApplication::local_addr`].
    ///
    /// # Returns
    /// - `Ok(RunningApplication)` - Listener bound and server task spawned
    /// - `Err(AppError::IoErr)` - Failed to bind the address
    pub async fn listen(self, addr: SocketAddr) -> Result<RunningApplication, AppError> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let router = self.router;
        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        tracing::info!("Listening on {}", local_addr);

        Ok(RunningApplication {
            local_addr,
            container: self.container,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }
}

/// Handle to an application serving HTTP on a background task.
pub struct RunningApplication {
    local_addr: SocketAddr,
    container: Arc<Container>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<std::io::Result<()>>>,
}

impl RunningApplication {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn container(&self) -> &Arc<Container> {
        &self.container
    }

    pub fn get<T: ?Sized + Send + Sync + 'static>(&self, token: &Token<T>) -> Option<Arc<T>> {
        self.container.get(token)
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Stops accepting connections and waits for in-flight requests to finish.
    ///
    /// Calling this again after the server stopped is a no-op. If the server does
    /// not stop within the shutdown timeout its task is aborted.
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        let Some(mut handle) = self.handle.take() else {
            return Ok(());
        };

        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }

        match tokio::time::timeout(SHUTDOWN_TIMEOUT, &mut handle).await {
            Ok(Ok(result)) => {
                tracing::info!("Server on {} stopped", self.local_addr);
                result.map_err(AppError::from)
            }
            Ok(Err(e)) => Err(AppError::InternalError(format!(
                "Server task failed: {}",
                e
            ))),
            Err(_) => {
                handle.abort();
                Err(AppError::InternalError(format!(
                    "Server on {} did not stop within {:?}",
                    self.local_addr, SHUTDOWN_TIMEOUT
                )))
            }
        }
    }
}
