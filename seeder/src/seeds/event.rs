use crate::seed::Seeder;
use async_trait::async_trait;
use db::models::{event, event_registration, user};
use sea_orm::DatabaseConnection;
use services::AppError;

pub struct EventSeeder;

#[async_trait]
impl Seeder for EventSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), AppError> {
        let users = user::Model::list_newest_first(db).await?;

        for (name, date) in [("Orientation", "2024-07-01"), ("Hackathon", "2024-09-10")] {
            let event = match event::Model::find_by_name(db, name).await? {
                Some(existing) => existing,
                None => event::Model::create(db, name, date).await?,
            };

            for u in users.iter().filter(|_| fastrand::bool()) {
                event_registration::Model::register(db, event.id, u.id).await?;
            }
        }

        Ok(())
    }
}
