//! QR attendance marking.
//!
//! A scan resolves an identifier to a user by rebuilding the exact scan URL that was
//! stored at registration, then records at most one entry per civil day. The
//! duplicate check and the append are one conditional insert, so concurrent scans
//! of the same code cannot both succeed.

use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use serde::Serialize;

use crate::error::AppError;
use crate::notification::{templates, Notifier};
use crate::Settings;
use db::models::{attendance_entry, user};
use util::time::civil_date;

pub const MARKED_MESSAGE: &str = "Attendance marked successfully";
pub const ALREADY_MARKED_MESSAGE: &str = "Attendance already marked for today";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkStatus {
    Marked,
    AlreadyMarked,
}

impl MarkStatus {
    pub fn message(self) -> &'static str {
        match self {
            MarkStatus::Marked => MARKED_MESSAGE,
            MarkStatus::AlreadyMarked => ALREADY_MARKED_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkOutcome {
    pub status: MarkStatus,
    pub civil_date: String,
    pub user: user::Model,
    pub attendance: Vec<attendance_entry::Model>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TodaySummary {
    pub date: String,
    pub total: u64,
    pub present: u64,
    /// Percentage of all users present today, one decimal place.
    pub rate: f64,
}

pub struct AttendanceService;

impl AttendanceService {
    /// Marks `identifier` present for the civil day containing `now`.
    ///
    /// A repeat on the same civil day is not an error: it returns
    /// `MarkStatus::AlreadyMarked` and writes nothing. The confirmation email goes
    /// out only on `Marked`, and its delivery never affects the result.
    ///
    /// The identifier is used verbatim: anything that does not rebuild a stored scan
    /// URL exactly, blank or otherwise, is `NotFound`.
    pub async fn mark(
        db: &DatabaseConnection,
        notifier: &Notifier,
        settings: &Settings,
        identifier: &str,
        now: DateTime<Utc>,
    ) -> Result<MarkOutcome, AppError> {
        let expected = settings.scan_url(identifier);

        let user = user::Model::find_by_qr_code(db, &expected)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        let today = civil_date(now, settings.civil_offset_minutes);
        let inserted = attendance_entry::Model::insert_for_day(db, user.id, now, &today).await?;
        let status = if inserted {
            MarkStatus::Marked
        } else {
            MarkStatus::AlreadyMarked
        };

        tracing::info!(
            user_id = user.id,
            civil_date = %today,
            status = ?status,
            "Attendance scan"
        );

        if status == MarkStatus::Marked {
            notifier.dispatch(templates::attendance_confirmation(
                &user,
                now,
                settings.civil_offset_minutes,
                &settings.email_from_name,
            ));
        }

        let attendance = attendance_entry::Model::history(db, user.id).await?;
        Ok(MarkOutcome {
            status,
            civil_date: today,
            user,
            attendance,
        })
    }

    /// Dashboard counters for the civil day containing `now`.
    pub async fn today_summary(
        db: &DatabaseConnection,
        settings: &Settings,
        now: DateTime<Utc>,
    ) -> Result<TodaySummary, AppError> {
        let date = civil_date(now, settings.civil_offset_minutes);
        let total = user::Entity::find().count(db).await?;
        let present = attendance_entry::Model::count_for_day(db, &date).await?;
        let rate = if total == 0 {
            0.0
        } else {
            ((present as f64 / total as f64) * 1000.0).round() / 10.0
        };

        Ok(TodaySummary {
            date,
            total,
            present,
            rate,
        })
    }
}
