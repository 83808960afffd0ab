use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{QueryFilter, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::DomainError;

/// A registered student. The class assignment is nullable; deleting a
/// class detaches its students instead of deleting them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-assigned unique student code (e.g. "STU01001").
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Date,
    pub gender: String,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub parent_email: Option<String>,
    pub address: Option<String>,
    pub class_id: Option<i64>,
    pub enrollment_date: Date,
    pub status: StudentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StudentStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
    #[sea_orm(string_value = "transferred")]
    Transferred,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::school_class::Entity",
        from = "Column::ClassId",
        to = "super::school_class::Column::Id"
    )]
    Class,
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    AttendanceRecords,
}

impl Related<super::school_class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Field bundle for registering a student.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub parent_email: Option<String>,
    pub address: Option<String>,
    pub class_id: Option<i64>,
    pub enrollment_date: NaiveDate,
    pub status: StudentStatus,
}

impl Model {
    /// Registers a new student.
    ///
    /// The student code must be unique and the class, when given, must exist.
    pub async fn create(db: &DatabaseConnection, new: NewStudent) -> Result<Model, DomainError> {
        if Entity::find()
            .filter(Column::StudentId.eq(new.student_id.as_str()))
            .one(db)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "Student ID {} is already registered",
                new.student_id
            )));
        }

        if let Some(class_id) = new.class_id {
            if super::school_class::Entity::find_by_id(class_id)
                .one(db)
                .await?
                .is_none()
            {
                return Err(DomainError::NotFound(format!(
                    "Class ID {class_id} not found"
                )));
            }
        }

        let now = Utc::now();
        let student = ActiveModel {
            student_id: Set(new.student_id),
            first_name: Set(new.first_name),
            last_name: Set(new.last_name),
            date_of_birth: Set(new.date_of_birth),
            gender: Set(new.gender),
            parent_name: Set(new.parent_name),
            parent_phone: Set(new.parent_phone),
            parent_email: Set(new.parent_email),
            address: Set(new.address),
            class_id: Set(new.class_id),
            enrollment_date: Set(new.enrollment_date),
            status: Set(new.status),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(student.insert(db).await?)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
