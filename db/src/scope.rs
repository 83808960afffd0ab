//! Role-scoped visibility predicate.
//!
//! Every class-linked read or write goes through `AccessScope` at
//! query-construction time, so scoping cannot be forgotten per endpoint:
//! administrators are unrestricted, teachers only ever see classes they
//! own and attendance taken in those classes.

use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect,
};

use crate::models::user::Role;
use crate::models::{attendance_record, school_class};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessScope {
    Admin,
    Teacher(i64),
}

impl AccessScope {
    pub fn new(role: Role, user_id: i64) -> Self {
        match role {
            Role::Administrator => AccessScope::Admin,
            Role::Teacher => AccessScope::Teacher(user_id),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, AccessScope::Admin)
    }

    /// Condition restricting a `classes` query to visible classes.
    pub fn classes_condition(&self) -> Condition {
        match self {
            AccessScope::Admin => Condition::all(),
            AccessScope::Teacher(user_id) => {
                Condition::all().add(school_class::Column::TeacherId.eq(*user_id))
            }
        }
    }

    /// IDs of classes visible to the caller; `None` means unrestricted.
    pub async fn visible_class_ids(
        &self,
        db: &DatabaseConnection,
    ) -> Result<Option<Vec<i64>>, DbErr> {
        match self {
            AccessScope::Admin => Ok(None),
            AccessScope::Teacher(user_id) => school_class::Entity::find()
                .select_only()
                .column(school_class::Column::Id)
                .filter(school_class::Column::TeacherId.eq(*user_id))
                .into_tuple::<i64>()
                .all(db)
                .await
                .map(Some),
        }
    }

    /// Condition restricting an `attendance_records` query to records
    /// taken in visible classes. A teacher without classes gets a
    /// never-matching condition, i.e. an empty result.
    pub async fn attendance_condition(&self, db: &DatabaseConnection) -> Result<Condition, DbErr> {
        match self.visible_class_ids(db).await? {
            None => Ok(Condition::all()),
            Some(ids) => Ok(Condition::all().add(attendance_record::Column::ClassId.is_in(ids))),
        }
    }

    /// Whether the caller may act on the given class. Checked before any
    /// class-scoped write executes.
    pub async fn can_access_class(
        &self,
        db: &DatabaseConnection,
        class_id: i64,
    ) -> Result<bool, DbErr> {
        match self {
            AccessScope::Admin => Ok(true),
            AccessScope::Teacher(user_id) => {
                let owned = school_class::Entity::find()
                    .filter(school_class::Column::Id.eq(class_id))
                    .filter(school_class::Column::TeacherId.eq(*user_id))
                    .count(db)
                    .await?;
                Ok(owned > 0)
            }
        }
    }
}
