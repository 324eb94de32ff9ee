//! Domain model and parameters for school operations.

use chrono::{DateTime, Utc};

use crate::{
    model::school::{CreateSchoolDto, SchoolDto, UpdateSchoolDto},
    server::{
        error::AppError,
        model::{optional_email, optional_non_blank, require_email, require_non_blank},
    },
};

/// A school as seen by services and controllers.
#[derive(Debug, Clone, PartialEq)]
pub struct School {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl School {
    /// Converts an entity model into the domain model.
    ///
    /// # Arguments
    /// - `entity` - The school row returned by the repository
    ///
    /// # Returns
    /// - `School` - The converted domain model
    pub fn from_entity(entity: entity::school::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            address: entity.address,
            phone: entity.phone,
            email: entity.email,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> SchoolDto {
        SchoolDto {
            id: self.id,
            name: self.name,
            address: self.address,
            phone: self.phone,
            email: self.email,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Validated input for creating a school.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateSchoolParam {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl CreateSchoolParam {
    /// Validates a create request.
    ///
    /// # Returns
    /// - `Ok(CreateSchoolParam)` - All fields present, trimmed, email well formed
    /// - `Err(AppError::BadRequest)` - A field is blank or the email is malformed
    pub fn from_dto(dto: CreateSchoolDto) -> Result<Self, AppError> {
        Ok(Self {
            name: require_non_blank("name", dto.name)?,
            address: require_non_blank("address", dto.address)?,
            phone: require_non_blank("phone", dto.phone)?,
            email: require_email("email", dto.email)?,
        })
    }
}

/// Partial update for a school. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSchoolParam {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl UpdateSchoolParam {
    pub fn from_dto(dto: UpdateSchoolDto) -> Result<Self, AppError> {
        Ok(Self {
            name: optional_non_blank("name", dto.name)?,
            address: optional_non_blank("address", dto.address)?,
            phone: optional_non_blank("phone", dto.phone)?,
            email: optional_email("email", dto.email)?,
        })
    }
}
