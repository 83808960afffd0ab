use db::models::school_class;
use serde::Serialize;

#[derive(Debug, Serialize, Default)]
pub struct ClassResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub teacher_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_name: Option<String>,
    pub capacity: i32,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_count: Option<u64>,
}

impl ClassResponse {
    pub fn from_model(class: school_class::Model) -> Self {
        Self {
            id: class.id,
            name: class.name,
            description: class.description,
            teacher_id: class.teacher_id,
            teacher_name: None,
            capacity: class.capacity,
            is_active: class.is_active,
            student_count: None,
        }
    }

    pub fn with_teacher(mut self, teacher_name: Option<String>) -> Self {
        self.teacher_name = teacher_name;
        self
    }

    pub fn with_student_count(mut self, count: u64) -> Self {
        self.student_count = Some(count);
        self
    }
}
