use crate::seed::Seeder;
use async_trait::async_trait;
use db::models::user::{Model, NewUser, Role};
use fake::{
    Fake,
    faker::{internet::en::SafeEmail, name::en::Name},
};
use sea_orm::DatabaseConnection;
use services::credentials::hash_password;
use services::user_service::{UserService, generate_qr_token};
use services::{AppError, Settings};
use util::config::AppConfig;

const BRANCHES: [&str; 4] = ["CSE", "IT", "ECE", "ME"];
const YEARS: [&str; 4] = ["1", "2", "3", "4"];

pub struct UserSeeder;

#[async_trait]
impl Seeder for UserSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), AppError> {
        let config = AppConfig::global().clone();
        let settings = Settings::from_config(&config);

        // Bootstrap admin, same as server startup
        UserService::ensure_admin(db, &settings, &config.admin_email, &config.admin_password)
            .await?;

        let password = hash_password("password123")?;

        // Fixed scanner account and fixed student
        for (name, email, roll, role) in [
            ("Desk Member", "member@example.com", "M0001", Role::Member),
            ("Sample Student", "student@example.com", "S0001", Role::User),
        ] {
            if Model::find_by_email(db, email).await?.is_some() {
                continue;
            }
            Model::create(
                db,
                NewUser {
                    name: name.into(),
                    email: email.into(),
                    password_hash: Some(password.clone()),
                    roll_number: roll.into(),
                    branch: Some("CSE".into()),
                    year: Some("2".into()),
                    role: Some(role),
                    qr_code: settings.scan_url(&generate_qr_token()),
                    ..Default::default()
                },
            )
            .await?;
        }

        // Random users; every third one looks like an imported roster entry
        for i in 0..20 {
            let legacy = i % 3 == 0;
            let email: String = SafeEmail().fake();
            let roll = format!("{:02}{:06}", fastrand::u8(20..26), fastrand::u32(..1_000_000));
            let _ = Model::create(
                db,
                NewUser {
                    name: Name().fake(),
                    email,
                    password_hash: (!legacy).then(|| password.clone()),
                    roll_number: roll,
                    branch: Some(BRANCHES[fastrand::usize(..BRANCHES.len())].into()),
                    year: Some(YEARS[fastrand::usize(..YEARS.len())].into()),
                    skills: vec!["rust".into(), "sql".into()],
                    role: Some(Role::User),
                    qr_code: settings.scan_url(&generate_qr_token()),
                    legacy,
                    ..Default::default()
                },
            )
            .await;
        }

        Ok(())
    }
}
