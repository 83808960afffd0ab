use crate::seed::{Seeder, run_seeder};
use crate::seeds::{
    attendance_record::AttendanceRecordSeeder, school_class::SchoolClassSeeder,
    student::StudentSeeder, user::UserSeeder,
};

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let db = db::connect().await;

    for (seeder, name) in [
        (Box::new(UserSeeder) as Box<dyn Seeder + Send + Sync>, "User"),
        (Box::new(SchoolClassSeeder), "SchoolClass"),
        (Box::new(StudentSeeder), "Student"),
        (Box::new(AttendanceRecordSeeder), "AttendanceRecord"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }
}
