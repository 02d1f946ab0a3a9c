use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A club identity record: profile, credentials, review state and QR identifier.
///
/// Records imported from the old student roster carry `legacy = true`; they live in
/// the same table so every lookup is a single query.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    /// Unique, stored trimmed and lower-cased.
    #[sea_orm(unique)]
    pub email: String,
    /// Legacy records may have no password until an administrator sets one.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    #[sea_orm(unique)]
    pub roll_number: String,
    pub university_roll_no: Option<String>,
    pub branch: Option<String>,
    pub year: Option<String>,
    pub phone_number: Option<String>,
    pub event_name: Option<String>,
    pub github_profile: Option<String>,
    pub linkedin_profile: Option<String>,
    pub portfolio: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub skills: Json,
    pub role: Role,
    /// Full scan URL, `{APP_URL}/scan/{token}`. Never rewritten after insert.
    #[sea_orm(unique)]
    pub qr_code: String,
    pub legacy: bool,
    pub review: Option<i32>,
    pub comment: String,
    pub round_one_attendance: bool,
    pub round_two_attendance: bool,
    pub round_one_qualified: bool,
    pub round_two_qualified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role_type")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    #[sea_orm(string_value = "user")]
    User,

    #[sea_orm(string_value = "member")]
    Member,

    #[sea_orm(string_value = "admin")]
    Admin,
}

impl Role {
    /// Members and admins may scan QR codes and mark attendance.
    pub fn can_scan(self) -> bool {
        matches!(self, Role::Member | Role::Admin)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance_entry::Entity")]
    AttendanceEntries,
    #[sea_orm(has_many = "super::event_registration::Entity")]
    EventRegistrations,
}

impl Related<super::attendance_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceEntries.def()
    }
}

impl Related<super::event_registration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventRegistrations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert payload for [`Model::create`]. Strings are normalized on insert.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub roll_number: String,
    pub university_roll_no: Option<String>,
    pub branch: Option<String>,
    pub year: Option<String>,
    pub phone_number: Option<String>,
    pub event_name: Option<String>,
    pub github_profile: Option<String>,
    pub linkedin_profile: Option<String>,
    pub portfolio: Option<String>,
    pub skills: Vec<String>,
    pub role: Option<Role>,
    pub qr_code: String,
    pub legacy: bool,
}

/// Review fields an administrator may overwrite. `None` on a round flag keeps
/// the stored value.
#[derive(Debug, Clone, Default)]
pub struct ReviewUpdate {
    pub review: Option<i32>,
    pub comment: Option<String>,
    pub round_one_attendance: Option<bool>,
    pub round_two_attendance: Option<bool>,
    pub round_one_qualified: Option<bool>,
    pub round_two_qualified: Option<bool>,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Model {
    pub async fn create(db: &DbConn, new: NewUser) -> Result<Model, DbErr> {
        let now = Utc::now();

        let active_model = ActiveModel {
            name: Set(new.name.trim().to_string()),
            email: Set(normalize_email(&new.email)),
            password_hash: Set(new.password_hash),
            roll_number: Set(new.roll_number.trim().to_string()),
            university_roll_no: Set(non_blank(new.university_roll_no)),
            branch: Set(non_blank(new.branch)),
            year: Set(non_blank(new.year)),
            phone_number: Set(non_blank(new.phone_number)),
            event_name: Set(non_blank(new.event_name)),
            github_profile: Set(non_blank(new.github_profile)),
            linkedin_profile: Set(non_blank(new.linkedin_profile)),
            portfolio: Set(non_blank(new.portfolio)),
            skills: Set(serde_json::json!(new.skills)),
            role: Set(new.role.unwrap_or(Role::User)),
            qr_code: Set(new.qr_code),
            legacy: Set(new.legacy),
            review: Set(None),
            comment: Set(String::new()),
            round_one_attendance: Set(false),
            round_two_attendance: Set(false),
            round_one_qualified: Set(false),
            round_two_qualified: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn find_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn find_by_email(db: &DbConn, email: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Email.eq(normalize_email(email)))
            .one(db)
            .await
    }

    pub async fn find_by_roll_number(
        db: &DbConn,
        roll_number: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::RollNumber.eq(roll_number.trim()))
            .one(db)
            .await
    }

    /// Exact match on the stored scan URL.
    pub async fn find_by_qr_code(db: &DbConn, qr_code: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::QrCode.eq(qr_code))
            .one(db)
            .await
    }

    /// Any record already holding this email or roll number.
    pub async fn find_conflicting(
        db: &DbConn,
        email: &str,
        roll_number: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(
                Condition::any()
                    .add(Column::Email.eq(normalize_email(email)))
                    .add(Column::RollNumber.eq(roll_number.trim())),
            )
            .one(db)
            .await
    }

    /// Roster sorted by name, optionally restricted to legacy or current records.
    pub async fn list_by_name(db: &DbConn, legacy: Option<bool>) -> Result<Vec<Model>, DbErr> {
        let mut query = Entity::find();
        if let Some(legacy) = legacy {
            query = query.filter(Column::Legacy.eq(legacy));
        }
        query
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    pub async fn list_newest_first(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    pub async fn find_by_event_name(db: &DbConn, event_name: &str) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::EventName.eq(event_name.trim()))
            .all(db)
            .await
    }

    pub async fn set_role(db: &DbConn, id: i64, role: Role) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User not found".to_string()))?;

        let mut active_model: ActiveModel = model.into();
        active_model.role = Set(role);
        active_model.updated_at = Set(Utc::now());
        active_model.update(db).await
    }

    pub async fn set_password_hash(
        db: &DbConn,
        id: i64,
        password_hash: String,
    ) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User not found".to_string()))?;

        let mut active_model: ActiveModel = model.into();
        active_model.password_hash = Set(Some(password_hash));
        active_model.updated_at = Set(Utc::now());
        active_model.update(db).await
    }

    /// Overwrites score and comment, and any round flag that is given.
    pub async fn update_review(db: &DbConn, id: i64, update: ReviewUpdate) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User not found".to_string()))?;

        let mut active_model: ActiveModel = model.into();
        active_model.review = Set(update.review);
        active_model.comment = Set(update.comment.unwrap_or_default());
        if let Some(v) = update.round_one_attendance {
            active_model.round_one_attendance = Set(v);
        }
        if let Some(v) = update.round_two_attendance {
            active_model.round_two_attendance = Set(v);
        }
        if let Some(v) = update.round_one_qualified {
            active_model.round_one_qualified = Set(v);
        }
        if let Some(v) = update.round_two_qualified {
            active_model.round_two_qualified = Set(v);
        }
        active_model.updated_at = Set(Utc::now());
        active_model.update(db).await
    }

    pub fn skills_list(&self) -> Vec<String> {
        serde_json::from_value(self.skills.clone()).unwrap_or_default()
    }
}
