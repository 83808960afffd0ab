pub mod attendance_record;
pub mod school_class;
pub mod student;
pub mod user;

pub use attendance_record::Entity as AttendanceRecord;
pub use school_class::Entity as SchoolClass;
pub use student::Entity as Student;
pub use user::Entity as User;
