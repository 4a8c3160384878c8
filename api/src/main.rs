use api::auth::middleware::log_request;
use api::routes::routes;
use api::mail::notifier_from_config;
use api::state::AppState;
use axum::{
    Router,
    http::{HeaderValue, header::CONTENT_TYPE},
    middleware::from_fn,
};
use migration::Migrator;
use sea_orm_migration::MigratorTrait;
use services::LifecycleSettings;
use services::remote_repository::RemoteRepository;
use services::remote_repository::github::GitHubRepository;
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{error, info, warn};
use tracing_appender::rolling;
use util::config::AppConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let config = AppConfig::global().clone();
    let _log_guard = init_logging(&config);

    if config.jwt_secret.is_empty() {
        error!("JWT_SECRET is not set, refusing to start");
        return ExitCode::FAILURE;
    }

    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %e, path = %config.database_path, "Could not open the database");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = Migrator::up(&db, None).await {
        error!(error = %e, "Migrations failed");
        return ExitCode::FAILURE;
    }

    let repo: Arc<dyn RemoteRepository> = match GitHubRepository::from_config(&config) {
        Ok(repo) => Arc::new(repo),
        Err(e) => {
            error!(error = %e, "Could not build the code repository client");
            return ExitCode::FAILURE;
        }
    };
    if config.github_token.is_empty() {
        warn!("GITHUB_TOKEN is not set, publishing will fail");
    }

    let app_state = AppState::new(
        db,
        repo,
        notifier_from_config(&config),
        LifecycleSettings::from_config(&config),
    );

    let app = Router::new()
        .nest("/api", routes(app_state))
        .layer(from_fn(log_request))
        .layer(cors_layer(&config.cors_origins));

    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!(error = %e, host = %config.host, port = config.port, "Invalid listen address");
            return ExitCode::FAILURE;
        }
    };

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, %addr, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(%addr, env = %config.env, "Starting {}", config.project_name);

    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    {
        error!(error = %e, "Server crashed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Any origin when `CORS_ORIGINS` is empty, otherwise only the listed ones.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::very_permissive().expose_headers([CONTENT_TYPE]);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::very_permissive()
        .allow_origin(AllowOrigin::list(allowed))
        .expose_headers([CONTENT_TYPE])
}

fn init_logging(config: &AppConfig) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", &config.log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let stdout_layer = config.log_to_stdout.then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_target(true)
            .with_thread_ids(true)
    });

    let env_filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new("api=info,services=info,db=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    guard
}
