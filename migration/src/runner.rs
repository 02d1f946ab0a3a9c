use colored::*;
use futures::FutureExt;
use migration::Migrator;
use sea_orm::DatabaseConnection;
use sea_orm_migration::prelude::*;
use std::io::{self, Write};
use std::time::Instant;

const STATUS_COLUMN: usize = 80;

pub async fn connect(url: &str) -> DatabaseConnection {
    match sea_orm::Database::connect(url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("{} {}", "DB connection failed:".red(), e);
            std::process::exit(1);
        }
    }
}

/// Applies pending migrations one at a time, printing a status line per step.
///
/// Each step is recorded in `seaql_migrations`, so the server's own startup
/// migration sees them as applied. Exits the process on the first failure.
pub async fn run_pending_migrations(db: &DatabaseConnection) {
    let pending = match Migrator::get_pending_migrations(db).await {
        Ok(pending) => pending,
        Err(e) => {
            eprintln!("{} {}", "Could not read migration state:".red(), e);
            std::process::exit(1);
        }
    };

    if pending.is_empty() {
        println!("{}", "Nothing to migrate".dimmed());
        return;
    }

    println!("Running {} migration(s)...", pending.len());
    for migration in pending {
        apply_next(db, migration.name()).await;
    }
}

async fn apply_next(db: &DatabaseConnection, name: &str) {
    let name_str = format!("Applying {}", name.bold());
    let dots = ".".repeat(STATUS_COLUMN.saturating_sub(name_str.len()));
    print!("{}{} ", name_str, dots);
    io::stdout().flush().ok();

    let start = Instant::now();
    let result = std::panic::AssertUnwindSafe(Migrator::up(db, Some(1)))
        .catch_unwind()
        .await;

    match result {
        Ok(Ok(())) => {
            let time_str = format!("({:.2?})", start.elapsed()).dimmed();
            println!("{} {}", "done".green(), time_str);
        }
        Ok(Err(e)) => {
            println!("{}", "failed".red());
            eprintln!("  {}", e);
            std::process::exit(1);
        }
        Err(_) => {
            println!("{}", "panicked".red());
            std::process::exit(1);
        }
    }
}

/// Prints each known migration and whether it has been applied.
pub async fn print_status(db: &DatabaseConnection) {
    let applied = match Migrator::get_applied_migrations(db).await {
        Ok(applied) => applied,
        Err(e) => {
            eprintln!("{} {}", "Could not read migration state:".red(), e);
            std::process::exit(1);
        }
    };
    let applied: Vec<String> = applied.iter().map(|m| m.name().to_string()).collect();

    for migration in Migrator::migrations() {
        let name = migration.name().to_string();
        let state = if applied.contains(&name) {
            "applied".green()
        } else {
            "pending".yellow()
        };
        println!("{name:<60} {state}");
    }
}
