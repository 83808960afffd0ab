mod attendance_test;
mod auth_test;
mod dashboard_test;
mod health_test;
mod students_test;
mod users_test;
