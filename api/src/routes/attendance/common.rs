use db::models::{attendance_record, school_class, student, user};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Serialize, Default)]
pub struct AttendanceRecordResponse {
    pub id: i64,
    pub student_id: i64,
    pub student_code: Option<String>,
    pub student_name: Option<String>,
    pub class_id: i64,
    pub class_name: Option<String>,
    pub attendance_date: String,
    pub status: String,
    pub notes: Option<String>,
    pub marked_by: i64,
    pub marked_by_name: Option<String>,
    pub marked_at_time: Option<String>,
}

/// Name lookups batched per response page, so rendering a page costs
/// three queries regardless of its size.
pub struct NameLookup {
    students: HashMap<i64, (String, String)>,
    classes: HashMap<i64, String>,
    users: HashMap<i64, String>,
}

impl NameLookup {
    pub async fn for_records(
        db: &DatabaseConnection,
        records: &[attendance_record::Model],
    ) -> Result<Self, DbErr> {
        let student_ids: Vec<i64> = records.iter().map(|r| r.student_id).collect();
        let class_ids: Vec<i64> = records.iter().map(|r| r.class_id).collect();
        let user_ids: Vec<i64> = records.iter().map(|r| r.marked_by).collect();

        let students = student::Entity::find()
            .filter(student::Column::Id.is_in(student_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|s| {
                let full_name = s.full_name();
                (s.id, (s.student_id, full_name))
            })
            .collect();

        let classes = school_class::Entity::find()
            .filter(school_class::Column::Id.is_in(class_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let users = user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();

        Ok(Self {
            students,
            classes,
            users,
        })
    }

    pub fn render(&self, record: attendance_record::Model) -> AttendanceRecordResponse {
        let (student_code, student_name) = match self.students.get(&record.student_id) {
            Some((code, name)) => (Some(code.clone()), Some(name.clone())),
            None => (None, None),
        };
        AttendanceRecordResponse {
            id: record.id,
            student_id: record.student_id,
            student_code,
            student_name,
            class_id: record.class_id,
            class_name: self.classes.get(&record.class_id).cloned(),
            attendance_date: record.attendance_date.to_string(),
            status: record.status.to_string(),
            notes: record.notes,
            marked_by: record.marked_by,
            marked_by_name: self.users.get(&record.marked_by).cloned(),
            marked_at_time: record.marked_at_time.map(|t| t.format("%H:%M").to_string()),
        }
    }
}
