use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{PaginatorTrait, QueryFilter, Set};
use serde::Serialize;

use crate::error::DomainError;
use crate::models::user::{self, Role};

/// A school class with one owning teacher. Deleting a class cascades to
/// its attendance records and detaches (but does not delete) its students.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique class name (e.g. "Grade 5A").
    pub name: String,
    pub description: Option<String>,
    pub teacher_id: i64,
    pub capacity: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TeacherId",
        to = "super::user::Column::Id"
    )]
    Teacher,
    #[sea_orm(has_many = "super::student::Entity")]
    Students,
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    AttendanceRecords,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Creates a class owned by the given teacher.
    ///
    /// The teacher must exist and carry the teacher role; the class name
    /// must be unique.
    pub async fn create(
        db: &DatabaseConnection,
        name: &str,
        description: Option<&str>,
        teacher_id: i64,
        capacity: i32,
        is_active: bool,
    ) -> Result<Model, DomainError> {
        let teacher = user::Entity::find_by_id(teacher_id)
            .one(db)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Teacher ID {teacher_id} not found")))?;
        if teacher.role != Role::Teacher {
            return Err(DomainError::Validation(
                "Selected user is not a teacher".into(),
            ));
        }

        if Entity::find()
            .filter(Column::Name.eq(name))
            .one(db)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "A class named {name} already exists"
            )));
        }

        let now = Utc::now();
        let class = ActiveModel {
            name: Set(name.to_owned()),
            description: Set(description.map(|s| s.to_owned())),
            teacher_id: Set(teacher_id),
            capacity: Set(capacity),
            is_active: Set(is_active),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(class.insert(db).await?)
    }

    /// Number of students currently assigned to this class.
    pub async fn student_count(&self, db: &DatabaseConnection) -> Result<u64, DbErr> {
        super::student::Entity::find()
            .filter(super::student::Column::ClassId.eq(self.id))
            .count(db)
            .await
    }
}
