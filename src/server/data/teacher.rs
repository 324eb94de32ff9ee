use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::teacher::{CreateTeacherParam, UpdateTeacherParam};

pub struct TeacherRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TeacherRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new teacher
    ///
    /// # Arguments
    /// - `param`: Validated teacher data; `school_id` must reference an existing school
    ///
    /// # Returns
    /// - `Ok(Model)`: The created teacher
    /// - `Err(DbErr)`: Database error, including unique and foreign key violations
    pub async fn create(
        &self,
        param: CreateTeacherParam,
    ) -> Result<entity::teacher::Model, DbErr> {
        let now = Utc::now();

        entity::teacher::ActiveModel {
            first_name: ActiveValue::Set(param.first_name),
            last_name: ActiveValue::Set(param.last_name),
            email: ActiveValue::Set(param.email),
            phone: ActiveValue::Set(param.phone),
            subject: ActiveValue::Set(param.subject),
            school_id: ActiveValue::Set(param.school_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::teacher::Model>, DbErr> {
        entity::prelude::Teacher::find_by_id(id).one(self.db).await
    }

    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<entity::teacher::Model>, DbErr> {
        entity::prelude::Teacher::find()
            .filter(entity::teacher::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    /// Gets teachers ordered by id, optionally only those of one school
    ///
    /// # Arguments
    /// - `school_id`: When `Some`, only teachers assigned to this school
    pub async fn get_all(
        &self,
        school_id: Option<i32>,
    ) -> Result<Vec<entity::teacher::Model>, DbErr> {
        let mut query = entity::prelude::Teacher::find();
        if let Some(school_id) = school_id {
            query = query.filter(entity::teacher::Column::SchoolId.eq(school_id));
        }

        query
            .order_by_asc(entity::teacher::Column::Id)
            .all(self.db)
            .await
    }

    /// Applies a partial update to a teacher
    ///
    /// # Returns
    /// - `Ok(Some(Model))`: The updated teacher
    /// - `Ok(None)`: No teacher with this id
    /// - `Err(DbErr)`: Database error
    pub async fn update(
        &self,
        id: i32,
        param: UpdateTeacherParam,
    ) -> Result<Option<entity::teacher::Model>, DbErr> {
        let Some(teacher) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active_model: entity::teacher::ActiveModel = teacher.into();

        if let Some(first_name) = param.first_name {
            active_model.first_name = ActiveValue::Set(first_name);
        }
        if let Some(last_name) = param.last_name {
            active_model.last_name = ActiveValue::Set(last_name);
        }
        if let Some(email) = param.email {
            active_model.email = ActiveValue::Set(email);
        }
        if let Some(phone) = param.phone {
            active_model.phone = ActiveValue::Set(phone);
        }
        if let Some(subject) = param.subject {
            active_model.subject = ActiveValue::Set(subject);
        }
        if let Some(school_id) = param.school_id {
            active_model.school_id = ActiveValue::Set(school_id);
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        active_model.update(self.db).await.map(Some)
    }

    /// Deletes a teacher by id
    ///
    /// # Returns
    /// - `Ok(true)`: The teacher was deleted
    /// - `Ok(false)`: No teacher with this id
    /// - `Err(DbErr)`: Database error
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Teacher::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
