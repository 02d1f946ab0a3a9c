use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{QueryOrder, Set};

/// One day of recorded attendance for a user.
///
/// `(user_id, civil_date)` is unique in storage, so a second mark on the same civil
/// day cannot be persisted no matter how the requests interleave.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "attendance_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub taken_at: DateTime<Utc>,
    /// `YYYY-MM-DD` in the club's fixed civil zone.
    pub civil_date: String,
    /// Always written `true`; absence is never recorded.
    pub present: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Appends an entry unless one already exists for `civil_date`.
    ///
    /// Single `INSERT ... ON CONFLICT DO NOTHING`; returns whether a row was written.
    pub async fn insert_for_day(
        db: &DbConn,
        user_id: i64,
        taken_at: DateTime<Utc>,
        civil_date: &str,
    ) -> Result<bool, DbErr> {
        let entry = ActiveModel {
            user_id: Set(user_id),
            taken_at: Set(taken_at),
            civil_date: Set(civil_date.to_string()),
            present: Set(true),
            ..Default::default()
        };

        let inserted = Entity::insert(entry)
            .on_conflict(
                OnConflict::columns([Column::UserId, Column::CivilDate])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;

        Ok(inserted == 1)
    }

    /// Chronological history for one user.
    pub async fn history(db: &DbConn, user_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::TakenAt)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    /// Histories for many users at once, keyed by user id.
    pub async fn histories(
        db: &DbConn,
        user_ids: &[i64],
    ) -> Result<std::collections::HashMap<i64, Vec<Model>>, DbErr> {
        let mut grouped: std::collections::HashMap<i64, Vec<Model>> =
            std::collections::HashMap::new();
        if user_ids.is_empty() {
            return Ok(grouped);
        }

        let rows = Entity::find()
            .filter(Column::UserId.is_in(user_ids.iter().copied()))
            .order_by_asc(Column::TakenAt)
            .order_by_asc(Column::Id)
            .all(db)
            .await?;

        for row in rows {
            grouped.entry(row.user_id).or_default().push(row);
        }
        Ok(grouped)
    }

    pub async fn count_for_day(db: &DbConn, civil_date: &str) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::CivilDate.eq(civil_date))
            .filter(Column::Present.eq(true))
            .count(db)
            .await
    }
}
