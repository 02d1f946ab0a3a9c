use std::{env, fs, path::Path};
use util::config;

mod runner;

/// `migration`          apply pending migrations
/// `migration status`   list migrations and whether each is applied
/// `migration fresh`    delete the database file, then apply all migrations
/// `migration clean`    delete the database file only
#[tokio::main]
async fn main() {
    let db_path = config::database_path();
    let url = format!("sqlite://{}?mode=rwc", db_path);
    let command = env::args().nth(1);

    match command.as_deref() {
        Some("clean") => remove_db_file(&db_path),
        Some("status") => {
            let db = runner::connect(&url).await;
            runner::print_status(&db).await;
        }
        Some("fresh") => {
            remove_db_file(&db_path);
            create_db_dir(&db_path);
            let db = runner::connect(&url).await;
            runner::run_pending_migrations(&db).await;
        }
        None | Some("up") => {
            create_db_dir(&db_path);
            let db = runner::connect(&url).await;
            runner::run_pending_migrations(&db).await;
        }
        Some(other) => {
            eprintln!("Unknown command `{other}`; expected up, status, fresh or clean");
            std::process::exit(2);
        }
    }
}

fn remove_db_file(path: &str) {
    let db_path = Path::new(path);
    if !db_path.exists() {
        println!("DB file does not exist: {}", db_path.display());
        return;
    }
    if let Err(e) = fs::remove_file(db_path) {
        eprintln!("Failed to delete {}: {e}", db_path.display());
        std::process::exit(1);
    }
    println!("Deleted DB: {}", db_path.display());
}

fn create_db_dir(path: &str) {
    if let Some(parent) = Path::new(path).parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Failed to create {}: {e}", parent.display());
            std::process::exit(1);
        }
    }
}
