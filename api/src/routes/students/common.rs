use db::models::student;
use serde::Serialize;

#[derive(Debug, Serialize, Default)]
pub struct StudentResponse {
    pub id: i64,
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub parent_email: Option<String>,
    pub address: Option<String>,
    pub class_id: Option<i64>,
    pub enrollment_date: String,
    pub status: String,
}

impl From<student::Model> for StudentResponse {
    fn from(s: student::Model) -> Self {
        let full_name = s.full_name();
        Self {
            id: s.id,
            student_id: s.student_id,
            first_name: s.first_name,
            last_name: s.last_name,
            full_name,
            date_of_birth: s.date_of_birth.to_string(),
            gender: s.gender,
            parent_name: s.parent_name,
            parent_phone: s.parent_phone,
            parent_email: s.parent_email,
            address: s.address,
            class_id: s.class_id,
            enrollment_date: s.enrollment_date.to_string(),
            status: s.status.to_string(),
        }
    }
}

pub const GENDERS: &[&str] = &["male", "female", "other"];
