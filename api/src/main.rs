use api::auth::middleware::log_request;
use api::routes::routes;
use api::services::email::mailer_from_config;
use api::state::AppState;
use axum::{Router, middleware::from_fn_with_state};
use migration::Migrator;
use sea_orm_migration::MigratorTrait;
use services::Settings;
use services::user_service::UserService;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tracing_appender::rolling;
use util::config::AppConfig;

#[tokio::main]
async fn main() {
    let config = AppConfig::global().clone();

    // Load configuration and initialize logging
    let _log_guard = init_logging(&config.log_file, &config.log_level, config.log_to_stdout);

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Refusing to start with unsafe configuration");
        eprintln!("Configuration error: {e}");
        std::process::exit(1);
    }

    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(error = %e, path = %config.database_path, "Failed to open database");
            eprintln!("Failed to open database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = Migrator::up(&db, None).await {
        tracing::error!(error = %e, "Migrations failed");
        eprintln!("Migrations failed: {e}");
        std::process::exit(1);
    }

    let settings = Settings::from_config(&config);
    match UserService::ensure_admin(&db, &settings, &config.admin_email, &config.admin_password)
        .await
    {
        Ok(true) => tracing::info!(email = %config.admin_email, "Bootstrap administrator created"),
        Ok(false) => {}
        Err(e) => tracing::error!(error = %e, "Failed to ensure bootstrap administrator"),
    }

    let app_state = AppState::new(db, mailer_from_config(&config), &config);

    let cors = CorsLayer::very_permissive();

    let app = Router::new()
        .nest("/api", routes(app_state.clone()))
        .with_state(app_state.clone())
        .layer(from_fn_with_state(app_state, log_request))
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid address");

    println!(
        "Starting {} on http://{}:{}",
        config.project_name, config.host, config.port
    );

    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server crashed");
}

fn init_logging(
    log_file: &str,
    log_level: &str,
    log_to_stdout: bool,
) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true)
        .with_thread_ids(true);

    let env_filter =
        EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if log_to_stdout {
        registry.with(stdout_layer).init();
    } else {
        registry.init();
    }

    guard
}
