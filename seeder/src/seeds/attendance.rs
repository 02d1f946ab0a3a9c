use crate::seed::Seeder;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use db::models::{attendance_entry, user};
use sea_orm::DatabaseConnection;
use services::AppError;
use util::config;
use util::time::civil_date;

const DAYS: i64 = 14;

pub struct AttendanceSeeder;

#[async_trait]
impl Seeder for AttendanceSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), AppError> {
        let offset = config::civil_offset_minutes();
        let users = user::Model::list_newest_first(db).await?;
        let now = Utc::now();

        for u in &users {
            for day in 1..=DAYS {
                if fastrand::u8(..100) >= 60 {
                    continue;
                }
                let jitter = Duration::minutes(fastrand::i64(-90..90));
                let taken_at = now - Duration::days(day) + jitter;
                let date = civil_date(taken_at, offset);
                attendance_entry::Model::insert_for_day(db, u.id, taken_at, &date).await?;
            }
        }

        Ok(())
    }
}
