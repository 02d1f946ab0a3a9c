use rand::Rng;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use validator::Validate;

use crate::credentials::{hash_password, verify_password};
use crate::error::AppError;
use crate::notification::{templates, Notifier};
use crate::Settings;
use common::format_validation_errors;
use db::models::{
    attendance_entry,
    event::Model as EventModel,
    event_registration::Model as EventRegistration,
    user::{self, NewUser, ReviewUpdate, Role},
};

const MISSING_FIELDS: &str = "Missing required fields (Name, Email, Password, Roll Number)";
const DUPLICATE_USER: &str = "User with this email or roll number already exists.";
const INVALID_CREDENTIALS: &str = "Invalid credentials";
const NO_PASSWORD: &str = "Please contact admin to set your password.";
const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Self-service registration form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterUser {
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub password: String,
    pub roll_number: String,
    pub university_roll_no: Option<String>,
    pub branch: Option<String>,
    pub year: Option<String>,
    pub phone_number: Option<String>,
    pub event_name: Option<String>,
    pub github_profile: Option<String>,
    pub linkedin_profile: Option<String>,
    pub portfolio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// One row of an administrator bulk-add. Password is the configured default.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BulkEntry {
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub roll_number: String,
    pub university_roll_no: Option<String>,
    pub branch: Option<String>,
    pub year: Option<String>,
    pub phone_number: Option<String>,
    pub event_name: Option<String>,
    #[serde(default)]
    pub legacy: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkResult {
    pub email: String,
    pub created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Self-service password change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangePassword {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ReviewInput {
    #[validate(range(min = 0, max = 10, message = "Review score must be between 0 and 10"))]
    pub review: Option<i32>,
    pub comment: Option<String>,
    pub round_one_attendance: Option<bool>,
    pub round_two_attendance: Option<bool>,
    pub round_one_qualified: Option<bool>,
    pub round_two_qualified: Option<bool>,
}

/// A user with their attendance history, as shown on dashboards and the review grid.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: user::Model,
    pub attendance: Vec<attendance_entry::Model>,
}

/// Random lower-case base-36 token for QR codes.
pub fn generate_qr_token() -> String {
    let mut rng = rand::rng();
    (0..20)
        .map(|_| TOKEN_ALPHABET[rng.random_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn validate<T: Validate>(input: &T) -> Result<(), AppError> {
    input
        .validate()
        .map_err(|e| AppError::Validation(format_validation_errors(&e)))
}

pub struct UserService;

impl UserService {
    /// Creates an ordinary `user` account with a fresh QR code and sends the welcome
    /// email. If `event_name` names an existing event the user joins its roster.
    pub async fn register(
        db: &DatabaseConnection,
        notifier: &Notifier,
        settings: &Settings,
        input: RegisterUser,
    ) -> Result<user::Model, AppError> {
        if blank(&input.name)
            || blank(&input.email)
            || blank(&input.password)
            || blank(&input.roll_number)
        {
            return Err(AppError::Validation(MISSING_FIELDS.into()));
        }
        let mut input = input;
        input.email = user::normalize_email(&input.email);
        validate(&input)?;

        if user::Model::find_conflicting(db, &input.email, &input.roll_number)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(DUPLICATE_USER.into()));
        }

        let password_hash = hash_password(&input.password)?;
        let event_name = input.event_name.clone();

        let created = user::Model::create(
            db,
            NewUser {
                name: input.name,
                email: input.email,
                password_hash: Some(password_hash),
                roll_number: input.roll_number,
                university_roll_no: input.university_roll_no,
                branch: input.branch,
                year: input.year,
                phone_number: input.phone_number,
                event_name: input.event_name,
                github_profile: input.github_profile,
                linkedin_profile: input.linkedin_profile,
                portfolio: input.portfolio,
                skills: input.skills,
                role: Some(Role::User),
                qr_code: settings.scan_url(&generate_qr_token()),
                legacy: false,
            },
        )
        .await
        .map_err(|e| AppError::conflict_or_persistence(e, DUPLICATE_USER))?;

        if let Some(name) = event_name.filter(|n| !blank(n)) {
            if let Some(event) = EventModel::find_by_name(db, &name).await? {
                EventRegistration::register(db, event.id, created.id).await?;
            }
        }

        tracing::info!(user_id = created.id, email = %created.email, "User registered");
        notifier.dispatch(templates::registration_welcome(
            &created,
            &settings.app_url,
            &settings.email_from_name,
            None,
        ));

        Ok(created)
    }

    /// Creates each entry independently; one failure does not stop the rest.
    pub async fn bulk_add(
        db: &DatabaseConnection,
        notifier: &Notifier,
        settings: &Settings,
        entries: Vec<BulkEntry>,
    ) -> Result<Vec<BulkResult>, AppError> {
        let password_hash = hash_password(&settings.default_member_password)?;
        let mut results = Vec::with_capacity(entries.len());

        for entry in entries {
            let email = user::normalize_email(&entry.email);
            match Self::add_one(db, settings, &password_hash, entry).await {
                Ok(created) => {
                    notifier.dispatch(templates::registration_welcome(
                        &created,
                        &settings.app_url,
                        &settings.email_from_name,
                        Some(&settings.default_member_password),
                    ));
                    results.push(BulkResult {
                        email,
                        created: true,
                        id: Some(created.id),
                        error: None,
                    });
                }
                Err(AppError::Persistence(e)) => return Err(AppError::Persistence(e)),
                Err(e) => results.push(BulkResult {
                    email,
                    created: false,
                    id: None,
                    error: Some(e.to_string()),
                }),
            }
        }

        tracing::info!(
            total = results.len(),
            created = results.iter().filter(|r| r.created).count(),
            "Bulk add finished"
        );
        Ok(results)
    }

    async fn add_one(
        db: &DatabaseConnection,
        settings: &Settings,
        password_hash: &str,
        entry: BulkEntry,
    ) -> Result<user::Model, AppError> {
        if blank(&entry.name) || blank(&entry.email) || blank(&entry.roll_number) {
            return Err(AppError::Validation(
                "Missing required fields (Name, Email, Roll Number)".into(),
            ));
        }
        validate(&entry)?;

        if user::Model::find_conflicting(db, &entry.email, &entry.roll_number)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(DUPLICATE_USER.into()));
        }

        user::Model::create(
            db,
            NewUser {
                name: entry.name,
                email: entry.email,
                password_hash: Some(password_hash.to_string()),
                roll_number: entry.roll_number,
                university_roll_no: entry.university_roll_no,
                branch: entry.branch,
                year: entry.year,
                phone_number: entry.phone_number,
                event_name: entry.event_name,
                role: Some(Role::User),
                qr_code: settings.scan_url(&generate_qr_token()),
                legacy: entry.legacy,
                ..Default::default()
            },
        )
        .await
        .map_err(|e| AppError::conflict_or_persistence(e, DUPLICATE_USER))
    }

    pub async fn authenticate(
        db: &DatabaseConnection,
        email: &str,
        password: &str,
    ) -> Result<user::Model, AppError> {
        if blank(email) || password.is_empty() {
            return Err(AppError::Validation("Email and password are required".into()));
        }

        let user = user::Model::find_by_email(db, email)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.into()))?;

        let Some(digest) = user.password_hash.as_deref() else {
            return Err(AppError::Unauthorized(NO_PASSWORD.into()));
        };

        if !verify_password(password, digest) {
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        Ok(user)
    }

    async fn profile(db: &DatabaseConnection, user: user::Model) -> Result<UserProfile, AppError> {
        let attendance = attendance_entry::Model::history(db, user.id).await?;
        Ok(UserProfile { user, attendance })
    }

    pub async fn get_by_id(db: &DatabaseConnection, id: i64) -> Result<UserProfile, AppError> {
        let user = user::Model::find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;
        Self::profile(db, user).await
    }

    pub async fn get_by_email(
        db: &DatabaseConnection,
        email: &str,
    ) -> Result<UserProfile, AppError> {
        let user = user::Model::find_by_email(db, email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;
        Self::profile(db, user).await
    }

    pub async fn get_by_roll_number(
        db: &DatabaseConnection,
        roll_number: &str,
    ) -> Result<UserProfile, AppError> {
        let user = user::Model::find_by_roll_number(db, roll_number)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;
        Self::profile(db, user).await
    }

    pub async fn list(
        db: &DatabaseConnection,
        legacy: Option<bool>,
    ) -> Result<Vec<user::Model>, AppError> {
        Ok(user::Model::list_by_name(db, legacy).await?)
    }

    /// Review grid: every record newest first, one per email, with history.
    pub async fn recruitments(db: &DatabaseConnection) -> Result<Vec<UserProfile>, AppError> {
        let users = user::Model::list_newest_first(db).await?;
        let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
        let mut histories = attendance_entry::Model::histories(db, &ids).await?;

        let mut seen = HashSet::new();
        Ok(users
            .into_iter()
            .filter(|u| seen.insert(u.email.clone()))
            .map(|u| UserProfile {
                attendance: histories.remove(&u.id).unwrap_or_default(),
                user: u,
            })
            .collect())
    }

    pub async fn review(
        db: &DatabaseConnection,
        id: i64,
        input: ReviewInput,
    ) -> Result<user::Model, AppError> {
        validate(&input)?;

        if user::Model::find_by_id(db, id).await?.is_none() {
            return Err(AppError::NotFound("User not found".into()));
        }

        let updated = user::Model::update_review(
            db,
            id,
            ReviewUpdate {
                review: input.review,
                comment: input.comment,
                round_one_attendance: input.round_one_attendance,
                round_two_attendance: input.round_two_attendance,
                round_one_qualified: input.round_one_qualified,
                round_two_qualified: input.round_two_qualified,
            },
        )
        .await?;

        tracing::info!(user_id = id, review = ?updated.review, "Review updated");
        Ok(updated)
    }

    pub async fn set_role(
        db: &DatabaseConnection,
        id: i64,
        role: Role,
    ) -> Result<user::Model, AppError> {
        if user::Model::find_by_id(db, id).await?.is_none() {
            return Err(AppError::NotFound("User not found".into()));
        }
        let updated = user::Model::set_role(db, id, role).await?;
        tracing::info!(user_id = id, role = %role, "Role changed");
        Ok(updated)
    }

    /// Administrator reset; also the only way a legacy record without a password
    /// gets one.
    pub async fn set_password(
        db: &DatabaseConnection,
        id: i64,
        password: &str,
    ) -> Result<(), AppError> {
        if password.is_empty() {
            return Err(AppError::Validation("Password is required".into()));
        }
        if user::Model::find_by_id(db, id).await?.is_none() {
            return Err(AppError::NotFound("User not found".into()));
        }
        user::Model::set_password_hash(db, id, hash_password(password)?).await?;
        tracing::info!(user_id = id, "Password set by administrator");
        Ok(())
    }

    /// Replaces the caller's own password after checking the current one.
    pub async fn change_password(
        db: &DatabaseConnection,
        id: i64,
        input: ChangePassword,
    ) -> Result<(), AppError> {
        if input.current_password.is_empty() || input.new_password.is_empty() {
            return Err(AppError::Validation(
                "Current and new password are required".into(),
            ));
        }

        let user = user::Model::find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;
        let Some(digest) = user.password_hash.as_deref() else {
            return Err(AppError::Validation(NO_PASSWORD.into()));
        };
        if !verify_password(&input.current_password, digest) {
            return Err(AppError::Validation("Current password is incorrect".into()));
        }

        user::Model::set_password_hash(db, id, hash_password(&input.new_password)?).await?;
        tracing::info!(user_id = id, "Password changed");
        Ok(())
    }

    /// Makes sure an administrator account exists for `email`.
    ///
    /// Returns `true` when a new account was created. An existing account with that
    /// email is promoted to admin but its password is left alone.
    pub async fn ensure_admin(
        db: &DatabaseConnection,
        settings: &Settings,
        email: &str,
        password: &str,
    ) -> Result<bool, AppError> {
        if let Some(existing) = user::Model::find_by_email(db, email).await? {
            if existing.role != Role::Admin {
                user::Model::set_role(db, existing.id, Role::Admin).await?;
                tracing::warn!(user_id = existing.id, "Promoted bootstrap account to admin");
            }
            return Ok(false);
        }

        let admin = user::Model::create(
            db,
            NewUser {
                name: "Administrator".into(),
                email: email.to_string(),
                password_hash: Some(hash_password(password)?),
                roll_number: format!("ADMIN-{}", generate_qr_token()),
                role: Some(Role::Admin),
                qr_code: settings.scan_url(&generate_qr_token()),
                ..Default::default()
            },
        )
        .await?;

        tracing::info!(user_id = admin.id, email = %admin.email, "Created bootstrap administrator");
        Ok(true)
    }
}
