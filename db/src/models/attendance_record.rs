use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{PaginatorTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::DomainError;

/// Maximum length of the free-text note on a record.
pub const MAX_NOTES_LEN: usize = 500;

/// A single attendance entry for one student on one calendar day.
///
/// At most one record exists per (student, attendance_date); the class on
/// the record is the class context in which attendance was taken and is
/// deliberately never re-derived from the student's current assignment.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "attendance_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub class_id: i64,
    /// User who recorded or last overwrote this entry.
    pub marked_by: i64,
    pub attendance_date: Date,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
    /// Wall-clock time of the last write, minute granularity. Informational only.
    pub marked_at_time: Option<Time>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AttendanceStatus {
    #[sea_orm(string_value = "present")]
    Present,
    #[sea_orm(string_value = "absent")]
    Absent,
    #[sea_orm(string_value = "late")]
    Late,
    #[sea_orm(string_value = "excused")]
    Excused,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::school_class::Entity",
        from = "Column::ClassId",
        to = "super::school_class::Column::Id"
    )]
    Class,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::MarkedBy",
        to = "super::user::Column::Id"
    )]
    MarkedBy,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::school_class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// One (student, status, note) tuple inside a batch submission.
#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryAction {
    Created,
    Updated,
}

/// Per-entry result of a batch submission. A failed entry carries an error
/// message and never aborts its siblings.
#[derive(Debug, Clone, Serialize)]
pub struct EntryOutcome {
    pub student_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<EntryAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EntryOutcome {
    fn applied(student_id: i64, record_id: i64, action: EntryAction) -> Self {
        Self {
            student_id,
            record_id: Some(record_id),
            action: Some(action),
            error: None,
        }
    }

    fn failed(student_id: i64, error: impl Into<String>) -> Self {
        Self {
            student_id,
            record_id: None,
            action: None,
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Derived attendance aggregate. Computed on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttendanceStats {
    pub total: u64,
    pub present: u64,
    pub absent: u64,
    pub percentage: f64,
}

impl AttendanceStats {
    pub fn from_counts(total: u64, present: u64) -> Self {
        let percentage = if total > 0 {
            round_one_decimal(present as f64 / total as f64 * 100.0)
        } else {
            0.0
        };
        Self {
            total,
            present,
            absent: total - present,
            percentage,
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Truncates a wall-clock timestamp to minute granularity.
fn minute_of(now: DateTime<Utc>) -> NaiveTime {
    let t = now.time();
    NaiveTime::from_hms_opt(t.hour(), t.minute(), 0).unwrap_or(t)
}

impl Model {
    /// Records attendance for a batch of students in one class on one date.
    ///
    /// Each entry is upserted independently, keyed on the
    /// (student_id, attendance_date) unique index: a new record is created
    /// with the batch's class, while an existing record only has its
    /// status, notes and attribution overwritten. The store's
    /// `ON CONFLICT` arm closes the window between lookup and write under
    /// concurrent submissions.
    ///
    /// Returns one outcome per entry; a failing entry (e.g. unknown
    /// student) is reported in place and does not abort the rest.
    pub async fn record_batch(
        db: &DatabaseConnection,
        class_id: i64,
        date: NaiveDate,
        entries: &[BatchEntry],
        marked_by: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<EntryOutcome>, DomainError> {
        if entries.is_empty() {
            return Err(DomainError::Validation(
                "Attendance data is required".into(),
            ));
        }
        for entry in entries {
            validate_notes(entry.notes.as_deref())?;
        }

        if super::school_class::Entity::find_by_id(class_id)
            .one(db)
            .await?
            .is_none()
        {
            return Err(DomainError::NotFound(format!(
                "Class ID {class_id} not found"
            )));
        }

        let mut outcomes = Vec::with_capacity(entries.len());
        for entry in entries {
            outcomes.push(Self::upsert_entry(db, class_id, date, entry, marked_by, now).await);
        }
        Ok(outcomes)
    }

    async fn upsert_entry(
        db: &DatabaseConnection,
        class_id: i64,
        date: NaiveDate,
        entry: &BatchEntry,
        marked_by: i64,
        now: DateTime<Utc>,
    ) -> EntryOutcome {
        match super::student::Entity::find_by_id(entry.student_id).one(db).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                tracing::debug!(
                    "Skipping attendance entry for unknown student {}",
                    entry.student_id
                );
                return EntryOutcome::failed(
                    entry.student_id,
                    format!("Student ID {} not found", entry.student_id),
                );
            }
            Err(e) => return EntryOutcome::failed(entry.student_id, e.to_string()),
        }

        // Existence check is for reporting created-vs-updated only; the
        // write itself is race-safe through the conflict clause below.
        let existed = match Entity::find()
            .filter(Column::StudentId.eq(entry.student_id))
            .filter(Column::AttendanceDate.eq(date))
            .one(db)
            .await
        {
            Ok(found) => found.is_some(),
            Err(e) => return EntryOutcome::failed(entry.student_id, e.to_string()),
        };

        let active = ActiveModel {
            student_id: Set(entry.student_id),
            class_id: Set(class_id),
            marked_by: Set(marked_by),
            attendance_date: Set(date),
            status: Set(entry.status),
            notes: Set(entry.notes.clone()),
            marked_at_time: Set(Some(minute_of(now))),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        // The update arm leaves student_id, class_id and attendance_date
        // untouched: an existing record keeps the class it was taken in.
        let insert = Entity::insert(active).on_conflict(
            OnConflict::columns([Column::StudentId, Column::AttendanceDate])
                .update_columns([
                    Column::Status,
                    Column::Notes,
                    Column::MarkedBy,
                    Column::MarkedAtTime,
                    Column::UpdatedAt,
                ])
                .to_owned(),
        );

        if let Err(e) = insert.exec(db).await {
            tracing::warn!(
                "Attendance upsert failed for student {}: {}",
                entry.student_id,
                e
            );
            return EntryOutcome::failed(entry.student_id, e.to_string());
        }

        match Entity::find()
            .filter(Column::StudentId.eq(entry.student_id))
            .filter(Column::AttendanceDate.eq(date))
            .one(db)
            .await
        {
            Ok(Some(record)) => EntryOutcome::applied(
                entry.student_id,
                record.id,
                if existed {
                    EntryAction::Updated
                } else {
                    EntryAction::Created
                },
            ),
            Ok(None) => EntryOutcome::failed(
                entry.student_id,
                "Record not found after write".to_string(),
            ),
            Err(e) => EntryOutcome::failed(entry.student_id, e.to_string()),
        }
    }

    /// Edits the status/notes of one record, restamping attribution.
    ///
    /// Identity fields (student, class, date) are immutable through this path.
    pub async fn edit(
        db: &DatabaseConnection,
        record_id: i64,
        status: AttendanceStatus,
        notes: Option<String>,
        marked_by: i64,
        now: DateTime<Utc>,
    ) -> Result<Model, DomainError> {
        validate_notes(notes.as_deref())?;

        let record = Entity::find_by_id(record_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound(format!("Attendance record ID {record_id} not found"))
            })?;

        let mut active: ActiveModel = record.into();
        active.status = Set(status);
        active.notes = Set(notes);
        active.marked_by = Set(marked_by);
        active.marked_at_time = Set(Some(minute_of(now)));
        active.updated_at = Set(now);

        Ok(active.update(db).await?)
    }

    /// Present/total aggregate for one class on one date.
    pub async fn class_day_stats(
        db: &DatabaseConnection,
        class_id: i64,
        date: NaiveDate,
    ) -> Result<AttendanceStats, DbErr> {
        let base = Entity::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::AttendanceDate.eq(date));
        let total = base.clone().count(db).await?;
        let present = base
            .filter(Column::Status.eq(AttendanceStatus::Present))
            .count(db)
            .await?;
        Ok(AttendanceStats::from_counts(total, present))
    }

    /// Present/total aggregate over one student's history, optionally
    /// bounded by an inclusive date range.
    pub async fn student_stats(
        db: &DatabaseConnection,
        student_id: i64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<AttendanceStats, DbErr> {
        let mut base = Entity::find().filter(Column::StudentId.eq(student_id));
        if let Some(from) = from {
            base = base.filter(Column::AttendanceDate.gte(from));
        }
        if let Some(to) = to {
            base = base.filter(Column::AttendanceDate.lte(to));
        }
        let total = base.clone().count(db).await?;
        let present = base
            .filter(Column::Status.eq(AttendanceStatus::Present))
            .count(db)
            .await?;
        Ok(AttendanceStats::from_counts(total, present))
    }
}

fn validate_notes(notes: Option<&str>) -> Result<(), DomainError> {
    match notes {
        Some(n) if n.chars().count() > MAX_NOTES_LEN => Err(DomainError::Validation(format!(
            "Notes may not exceed {MAX_NOTES_LEN} characters"
        ))),
        _ => Ok(()),
    }
}
