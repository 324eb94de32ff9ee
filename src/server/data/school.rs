use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryOrder,
};

use crate::server::model::school::{CreateSchoolParam, UpdateSchoolParam};

pub struct SchoolRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SchoolRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new school
    ///
    /// # Arguments
    /// - `param`: Validated school data
    ///
    /// # Returns
    /// - `Ok(Model)`: The created school with its generated id and timestamps
    /// - `Err(DbErr)`: Database error
    pub async fn create(&self, param: CreateSchoolParam) -> Result<entity::school::Model, DbErr> {
        let now = Utc::now();

        entity::school::ActiveModel {
            name: ActiveValue::Set(param.name),
            address: ActiveValue::Set(param.address),
            phone: ActiveValue::Set(param.phone),
            email: ActiveValue::Set(param.email),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::school::Model>, DbErr> {
        entity::prelude::School::find_by_id(id).one(self.db).await
    }

    /// Gets every school ordered by id
    pub async fn get_all(&self) -> Result<Vec<entity::school::Model>, DbErr> {
        entity::prelude::School::find()
            .order_by_asc(entity::school::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::School::find_by_id(id)
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Applies a partial update to a school
    ///
    /// Fields left as `None` in `param` keep their stored value; `updated_at` is
    /// always refreshed.
    ///
    /// # Returns
    /// - `Ok(Some(Model))`: The updated school
    /// - `Ok(None)`: No school with this id
    /// - `Err(DbErr)`: Database error
    pub async fn update(
        &self,
        id: i32,
        param: UpdateSchoolParam,
    ) -> Result<Option<entity::school::Model>, DbErr> {
        let Some(school) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active_model: entity::school::ActiveModel = school.into();

        if let Some(name) = param.name {
            active_model.name = ActiveValue::Set(name);
        }
        if let Some(address) = param.address {
            active_model.address = ActiveValue::Set(address);
        }
        if let Some(phone) = param.phone {
            active_model.phone = ActiveValue::Set(phone);
        }
        if let Some(email) = param.email {
            active_model.email = ActiveValue::Set(email);
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        active_model.update(self.db).await.map(Some)
    }

    /// Deletes a school by id
    ///
    /// Teachers assigned to the school keep existing with their `school_id` cleared.
    ///
    /// # Returns
    /// - `Ok(true)`: The school was deleted
    /// - `Ok(false)`: No school with this id
    /// - `Err(DbErr)`: Database error
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::School::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
