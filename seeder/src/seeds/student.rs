use crate::seed::Seeder;
use chrono::NaiveDate;
use db::error::DomainError;
use db::models::school_class;
use db::models::student::{Model as Student, NewStudent, StudentStatus};
use fake::Fake;
use fake::faker::address::en::StreetName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use rand::Rng;
use sea_orm::{DatabaseConnection, EntityTrait};
use std::future::Future;
use std::pin::Pin;

pub struct StudentSeeder;

struct StudentDraft {
    first_name: String,
    last_name: String,
    gender: &'static str,
    birth_year: i32,
    parent_name: String,
    parent_phone: String,
    parent_email: String,
    street: String,
    enrollment_month: u32,
}

fn draft_students(count: usize) -> Vec<StudentDraft> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| StudentDraft {
            first_name: FirstName().fake(),
            last_name: LastName().fake(),
            gender: if rng.gen_bool(0.5) { "female" } else { "male" },
            birth_year: rng.gen_range(2012..=2019),
            parent_name: Name().fake(),
            parent_phone: PhoneNumber().fake(),
            parent_email: SafeEmail().fake(),
            street: StreetName().fake(),
            enrollment_month: rng.gen_range(1..=8),
        })
        .collect()
}

impl Seeder for StudentSeeder {
    fn seed<'a>(
        &'a self,
        db: &'a DatabaseConnection,
    ) -> Pin<Box<dyn Future<Output = Result<(), DomainError>> + Send + 'a>> {
        Box::pin(async move {
            let classes = school_class::Entity::find().all(db).await?;
            assert!(!classes.is_empty(), "run the class seeder first");

            for class in &classes {
                let count = {
                    let mut rng = rand::thread_rng();
                    rng.gen_range(20..=class.capacity.max(20) as usize)
                };
                for (i, draft) in draft_students(count).into_iter().enumerate() {
                    Student::create(
                        db,
                        NewStudent {
                            student_id: format!("STU{:05}", class.id * 1000 + i as i64 + 1),
                            first_name: draft.first_name,
                            last_name: draft.last_name,
                            date_of_birth: NaiveDate::from_ymd_opt(draft.birth_year, 6, 15)
                                .unwrap(),
                            gender: draft.gender.to_owned(),
                            parent_name: Some(draft.parent_name),
                            parent_phone: Some(draft.parent_phone),
                            parent_email: Some(draft.parent_email),
                            address: Some(draft.street),
                            class_id: Some(class.id),
                            enrollment_date: NaiveDate::from_ymd_opt(
                                2023,
                                draft.enrollment_month,
                                1,
                            )
                            .unwrap(),
                            status: StudentStatus::Active,
                        },
                    )
                    .await?;
                }
            }

            Ok(())
        })
    }
}
