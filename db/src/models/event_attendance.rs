use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};

/// Attendance row kept on an event. Independent of per-user attendance entries.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "event_attendance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub event_id: i64,
    pub name: String,
    pub email: String,
    pub roll_no: String,
    pub present: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id"
    )]
    Event,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        event_id: i64,
        name: &str,
        email: &str,
        roll_no: &str,
        present: bool,
    ) -> Result<Model, DbErr> {
        let active_model = ActiveModel {
            event_id: Set(event_id),
            name: Set(name.trim().to_owned()),
            email: Set(email.trim().to_lowercase()),
            roll_no: Set(roll_no.trim().to_owned()),
            present: Set(present),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn for_event(db: &DbConn, event_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::EventId.eq(event_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }
}
