use crate::seed::Seeder;
use db::error::DomainError;
use db::models::user::{Model as User, Role};
use fake::Fake;
use fake::faker::name::en::Name;
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::pin::Pin;

pub struct UserSeeder;

impl Seeder for UserSeeder {
    fn seed<'a>(
        &'a self,
        db: &'a DatabaseConnection,
    ) -> Pin<Box<dyn Future<Output = Result<(), DomainError>> + Send + 'a>> {
        Box::pin(async move {
            User::create(
                db,
                "School Administrator",
                "admin@school.test",
                "password",
                Role::Administrator,
            )
            .await?;

            for i in 1..=5 {
                let name: String = Name().fake();
                User::create(
                    db,
                    &name,
                    &format!("teacher{i}@school.test"),
                    "password",
                    Role::Teacher,
                )
                .await?;
            }

            Ok(())
        })
    }
}
