use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryFilter, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::DomainError;

/// Represents a user in the `users` table. Users are either school
/// administrators or teachers; teachers own zero or more classes.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    /// Unique email address, also the login identifier.
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    #[sea_orm(string_value = "administrator")]
    Administrator,
    #[sea_orm(string_value = "teacher")]
    Teacher,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::school_class::Entity")]
    Classes,
}

impl Related<super::school_class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Creates a user with a freshly hashed password.
    ///
    /// Fails with `Conflict` when the email is already registered.
    pub async fn create(
        db: &DatabaseConnection,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Model, DomainError> {
        if Entity::find()
            .filter(Column::Email.eq(email))
            .one(db)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "A user with email {email} already exists"
            )));
        }

        let now = Utc::now();
        let user = ActiveModel {
            name: Set(name.to_owned()),
            email: Set(email.to_owned()),
            password_hash: Set(Self::hash_password(password)?),
            role: Set(role),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(user.insert(db).await?)
    }

    pub async fn find_by_email(
        db: &DatabaseConnection,
        email: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find().filter(Column::Email.eq(email)).one(db).await
    }

    /// Verifies a plaintext password against the stored Argon2 hash.
    pub fn verify_password(&self, password: &str) -> bool {
        PasswordHash::new(&self.password_hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    fn hash_password(password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {e}")))
    }
}
