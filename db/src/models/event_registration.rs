use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::Set;

use super::user;

/// Roster link between an event and a registered user.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "event_registrations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub event_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id"
    )]
    Event,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Idempotent: registering twice leaves one row.
    pub async fn register(db: &DbConn, event_id: i64, user_id: i64) -> Result<(), DbErr> {
        let row = ActiveModel {
            event_id: Set(event_id),
            user_id: Set(user_id),
            created_at: Set(Utc::now()),
        };

        Entity::insert(row)
            .on_conflict(
                OnConflict::columns([Column::EventId, Column::UserId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
        Ok(())
    }

    pub async fn registrants(db: &DbConn, event_id: i64) -> Result<Vec<user::Model>, DbErr> {
        let user_ids: Vec<i64> = Entity::find()
            .filter(Column::EventId.eq(event_id))
            .all(db)
            .await?
            .into_iter()
            .map(|r| r.user_id)
            .collect();

        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(db)
            .await
    }
}
