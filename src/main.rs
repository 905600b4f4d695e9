use actix_cors::Cors;
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing::{Level, info, warn};
use tracing_appender::rolling;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use hrm_reports::config::Config;
use hrm_reports::db::init_db;
use hrm_reports::docs::ApiDoc;
use hrm_reports::error::expose_error_detail;
use hrm_reports::routes;
use hrm_reports::store::{Stores, mysql::MySqlStore};

fn cors(origin: &str) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    if origin == "*" {
        cors.allow_any_origin()
    } else {
        cors.allowed_origin(origin).supports_credentials()
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log; development also echoes to stdout
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let writer = if config.is_production() {
        BoxMakeWriter::new(non_blocking)
    } else {
        BoxMakeWriter::new(non_blocking.and(std::io::stdout))
    };

    let level = config.log_level.parse::<Level>().unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    if config.log_level.parse::<Level>().is_err() {
        warn!(log_level = %config.log_level, "Unknown LOG_LEVEL, using info");
    }

    expose_error_detail(!config.is_production());
    info!(environment = %config.environment, "Server starting...");

    let pool = init_db(&config.database_url, config.db_max_connections).await?;
    let stores = Stores::from_backend(Arc::new(MySqlStore::new(pool)));

    let (host, port) = config.server_addr();
    info!(%host, port, api = %config.api_prefix, "Listening");
    if config.rate_api_per_min == 0 {
        warn!("API rate limiting disabled");
    }

    let app_config = config.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .wrap(cors(&app_config.cors_origin))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // wildcard to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .configure(|cfg| routes::configure(cfg, &app_config, stores.clone()))
    })
    .bind((host.as_str(), port))
    .with_context(|| format!("Failed to bind {host}:{port}"))?
    .run()
    .await
    .context("Server error")
}
