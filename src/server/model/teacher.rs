//! Domain model and parameters for teacher operations.

use chrono::{DateTime, Utc};

use crate::{
    model::teacher::{CreateTeacherDto, TeacherDto, UpdateTeacherDto},
    server::{
        error::AppError,
        model::{optional_email, optional_non_blank, require_email, require_non_blank},
    },
};

/// A teacher as seen by services and controllers.
#[derive(Debug, Clone, PartialEq)]
pub struct Teacher {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub school_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Teacher {
    pub fn from_entity(entity: entity::teacher::Model) -> Self {
        Self {
            id: entity.id,
            first_name: entity.first_name,
            last_name: entity.last_name,
            email: entity.email,
            phone: entity.phone,
            subject: entity.subject,
            school_id: entity.school_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> TeacherDto {
        TeacherDto {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            subject: self.subject,
            school_id: self.school_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Validated input for creating a teacher.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTeacherParam {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub school_id: Option<i32>,
}

impl CreateTeacherParam {
    /// Validates a create request.
    ///
    /// Only the shape of the input is checked here; whether `school_id` refers to
    /// an existing school and whether the email is free are checked by the service.
    pub fn from_dto(dto: CreateTeacherDto) -> Result<Self, AppError> {
        Ok(Self {
            first_name: require_non_blank("firstName", dto.first_name)?,
            last_name: require_non_blank("lastName", dto.last_name)?,
            email: require_email("email", dto.email)?,
            phone: require_non_blank("phone", dto.phone)?,
            subject: require_non_blank("subject", dto.subject)?,
            school_id: dto.school_id,
        })
    }
}

/// Partial update for a teacher.
///
/// `school_id` is `None` to keep the assignment, `Some(None)` to unassign and
/// `Some(Some(id))` to move the teacher.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTeacherParam {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub school_id: Option<Option<i32>>,
}

impl UpdateTeacherParam {
    pub fn from_dto(dto: UpdateTeacherDto) -> Result<Self, AppError> {
        Ok(Self {
            first_name: optional_non_blank("firstName", dto.first_name)?,
            last_name: optional_non_blank("lastName", dto.last_name)?,
            email: optional_email("email", dto.email)?,
            phone: optional_non_blank("phone", dto.phone)?,
            subject: optional_non_blank("subject", dto.subject)?,
            school_id: dto.school_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_param_rejects_malformed_email() {
        let dto = CreateTeacherDto {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada.example".into(),
            phone: "555-0101".into(),
            subject: "Mathematics".into(),
            school_id: None,
        };

        assert!(matches!(
            CreateTeacherParam::from_dto(dto),
            Err(AppError::BadRequest(msg)) if msg.contains("email")
        ));
    }

    #[test]
    fn update_dto_distinguishes_null_from_absent_school() {
        let absent: UpdateTeacherDto = serde_json::from_str(r#"{"subject":"Physics"}"#).unwrap();
        let null: UpdateTeacherDto = serde_json::from_str(r#"{"schoolId":null}"#).unwrap();
        let set: UpdateTeacherDto = serde_json::from_str(r#"{"schoolId":4}"#).unwrap();

        assert_eq!(UpdateTeacherParam::from_dto(absent).unwrap().school_id, None);
        assert_eq!(UpdateTeacherParam::from_dto(null).unwrap().school_id, Some(None));
        assert_eq!(UpdateTeacherParam::from_dto(set).unwrap().school_id, Some(Some(4)));
    }
}
