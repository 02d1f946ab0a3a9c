use async_trait::async_trait;
use colored::*;
use sea_orm::DatabaseConnection;
use services::AppError;
use std::io::{self, Write};
use std::time::Instant;

const STATUS_COLUMN: usize = 80;

#[async_trait]
pub trait Seeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), AppError>;
}

/// Runs one seeder with a dotted progress line. Exits the process on failure so
/// later seeders never run against partial data.
pub async fn run_seeder<S: Seeder + ?Sized>(seeder: &S, name: &str, db: &DatabaseConnection) {
    let base_msg = format!("Seeding {}", name.bold());
    let dots = ".".repeat(STATUS_COLUMN.saturating_sub(base_msg.len()));
    print!("{}{} ", base_msg, dots);
    let _ = io::stdout().flush();

    let start = Instant::now();
    if let Err(e) = seeder.seed(db).await {
        println!("{}", "failed".red());
        eprintln!("  {}", e.to_string().red());
        std::process::exit(1);
    }

    let time_str = format!("({:.2?})", start.elapsed()).dimmed();
    println!("{} {}", "done".green(), time_str);
}
