use crate::seed::Seeder;
use db::error::DomainError;
use db::models::school_class::Model as SchoolClass;
use db::models::user::{self, Role};
use rand::Rng;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::future::Future;
use std::pin::Pin;

const CLASSES: &[(&str, &str)] = &[
    ("Grade 1A", "Elementary Mathematics and Reading"),
    ("Grade 2B", "Elementary Science and Arts"),
    ("Grade 3A", "Intermediate Mathematics"),
    ("Grade 4B", "Intermediate Science"),
    ("Grade 5A", "Advanced Elementary Studies"),
];

pub struct SchoolClassSeeder;

impl Seeder for SchoolClassSeeder {
    fn seed<'a>(
        &'a self,
        db: &'a DatabaseConnection,
    ) -> Pin<Box<dyn Future<Output = Result<(), DomainError>> + Send + 'a>> {
        Box::pin(async move {
            let teachers = user::Entity::find()
                .filter(user::Column::Role.eq(Role::Teacher))
                .all(db)
                .await?;
            assert!(!teachers.is_empty(), "run the user seeder first");

            // rand's thread rng is not Send, so roll the dice up front
            let picks: Vec<(usize, i32)> = {
                let mut rng = rand::thread_rng();
                CLASSES
                    .iter()
                    .map(|_| (rng.gen_range(0..teachers.len()), rng.gen_range(25..=35)))
                    .collect()
            };

            for ((name, description), (teacher_idx, capacity)) in CLASSES.iter().zip(picks) {
                SchoolClass::create(
                    db,
                    name,
                    Some(description),
                    teachers[teacher_idx].id,
                    capacity,
                    true,
                )
                .await?;
            }

            Ok(())
        })
    }
}
