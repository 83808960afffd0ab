pub mod attendance_record;
pub mod school_class;
pub mod student;
pub mod user;
