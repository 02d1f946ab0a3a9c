use futures::future::join_all;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use validator::Validate;

use crate::error::AppError;
use crate::notification::{templates, Notifier};
use crate::Settings;
use common::format_validation_errors;
use db::models::{
    event::Model as EventModel,
    event_attendance::Model as EventAttendanceModel,
    event_registration::Model as EventRegistration,
    user,
};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateEvent {
    #[validate(length(min = 1, message = "Event name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Event date is required"))]
    pub date: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct EventAttendanceInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Roll number is required"))]
    pub roll_no: String,
    #[serde(default = "default_present")]
    pub present: bool,
}

fn default_present() -> bool {
    true
}

#[derive(Debug, Clone, Serialize)]
pub struct EventDetail {
    #[serde(flatten)]
    pub event: EventModel,
    pub registrations: Vec<user::Model>,
    pub attendance: Vec<EventAttendanceModel>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ReminderReport {
    pub recipients: usize,
    pub sent: usize,
    pub failed: usize,
}

pub struct EventService;

impl EventService {
    pub async fn create(
        db: &DatabaseConnection,
        input: CreateEvent,
    ) -> Result<EventModel, AppError> {
        let input = CreateEvent {
            name: input.name.trim().to_string(),
            date: input.date.trim().to_string(),
        };
        input
            .validate()
            .map_err(|e| AppError::Validation(format_validation_errors(&e)))?;

        let event = EventModel::create(db, &input.name, &input.date).await?;
        tracing::info!(event_id = event.id, name = %event.name, "Event created");
        Ok(event)
    }

    pub async fn list(db: &DatabaseConnection) -> Result<Vec<EventModel>, AppError> {
        Ok(EventModel::list_newest_first(db).await?)
    }

    pub async fn get(db: &DatabaseConnection, id: i64) -> Result<EventDetail, AppError> {
        let event = EventModel::find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".into()))?;
        let registrations = EventRegistration::registrants(db, id).await?;
        let attendance = EventAttendanceModel::for_event(db, id).await?;

        Ok(EventDetail {
            event,
            registrations,
            attendance,
        })
    }

    pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<(), AppError> {
        if !EventModel::delete(db, id).await? {
            return Err(AppError::NotFound("Event not found".into()));
        }
        tracing::info!(event_id = id, "Event deleted");
        Ok(())
    }

    pub async fn add_attendance(
        db: &DatabaseConnection,
        event_id: i64,
        input: EventAttendanceInput,
    ) -> Result<EventAttendanceModel, AppError> {
        input
            .validate()
            .map_err(|e| AppError::Validation(format_validation_errors(&e)))?;

        if EventModel::find_by_id(db, event_id).await?.is_none() {
            return Err(AppError::NotFound("Event not found".into()));
        }

        Ok(EventAttendanceModel::create(
            db,
            event_id,
            &input.name,
            &input.email,
            &input.roll_no,
            input.present,
        )
        .await?)
    }

    /// Emails everyone on the roster plus everyone who named this event when they
    /// registered. Sends run concurrently; each failure is logged and counted.
    pub async fn remind(
        db: &DatabaseConnection,
        notifier: &Notifier,
        settings: &Settings,
        event_id: i64,
    ) -> Result<ReminderReport, AppError> {
        let event = EventModel::find_by_id(db, event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".into()))?;

        let mut recipients = EventRegistration::registrants(db, event.id).await?;
        recipients.extend(user::Model::find_by_event_name(db, &event.name).await?);

        let mut seen = HashSet::new();
        recipients.retain(|u| seen.insert(u.email.clone()));

        let sends = recipients.iter().map(|u| {
            let email = templates::event_reminder(u, &event, &settings.email_from_name);
            async move {
                let to = email.to.clone();
                let result = notifier.send(email).await;
                if let Err(e) = &result {
                    tracing::warn!(event_id, to = %to, error = %e, "Reminder failed");
                }
                result.is_ok()
            }
        });
        let results = join_all(sends).await;

        let sent = results.iter().filter(|ok| **ok).count();
        let report = ReminderReport {
            recipients: results.len(),
            sent,
            failed: results.len() - sent,
        };
        tracing::info!(
            event_id = event.id,
            sent = report.sent,
            failed = report.failed,
            "Reminders sent"
        );
        Ok(report)
    }
}
