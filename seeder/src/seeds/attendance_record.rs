use crate::seed::Seeder;
use chrono::{Datelike, Duration, Utc, Weekday};
use db::error::DomainError;
use db::models::attendance_record::{AttendanceStatus, BatchEntry, Model as AttendanceRecord};
use db::models::{school_class, student};
use rand::Rng;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::future::Future;
use std::pin::Pin;

pub struct AttendanceRecordSeeder;

// Roughly 80% present, with the occasional late or excused entry.
fn roll_status(roll: u8) -> AttendanceStatus {
    match roll {
        0..=15 => AttendanceStatus::Present,
        16..=17 => AttendanceStatus::Absent,
        18 => AttendanceStatus::Late,
        _ => AttendanceStatus::Excused,
    }
}

impl Seeder for AttendanceRecordSeeder {
    fn seed<'a>(
        &'a self,
        db: &'a DatabaseConnection,
    ) -> Pin<Box<dyn Future<Output = Result<(), DomainError>> + Send + 'a>> {
        Box::pin(async move {
            let classes = school_class::Entity::find().all(db).await?;
            let today = Utc::now().date_naive();

            for class in &classes {
                let students = student::Entity::find()
                    .filter(student::Column::ClassId.eq(class.id))
                    .all(db)
                    .await?;
                if students.is_empty() {
                    continue;
                }

                for day_offset in 1..=30 {
                    let day = today - Duration::days(day_offset);
                    if matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
                        continue;
                    }

                    let entries: Vec<BatchEntry> = {
                        let mut rng = rand::thread_rng();
                        students
                            .iter()
                            .map(|s| BatchEntry {
                                student_id: s.id,
                                status: roll_status(rng.gen_range(0..20)),
                                notes: None,
                            })
                            .collect()
                    };

                    AttendanceRecord::record_batch(
                        db,
                        class.id,
                        day,
                        &entries,
                        class.teacher_id,
                        Utc::now(),
                    )
                    .await?;
                }
            }

            Ok(())
        })
    }
}
