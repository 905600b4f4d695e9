use std::sync::Arc;

use hrm_reports::config::Config;
use hrm_reports::store::{MemoryStore, Stores};

/// Config for in-process tests: nothing is read from the environment and the
/// limiter is off because test requests carry no peer address.
pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some("mysql://unused/reports".to_string()),
        "RATE_API_PER_MIN" => Some("0".to_string()),
        "APP_ENV" => Some("test".to_string()),
        _ => None,
    })
    .expect("test config")
}

pub fn memory_stores() -> Stores {
    Stores::from_backend(Arc::new(MemoryStore::new()))
}

/// Builds the app the way `main` does, minus CORS and Swagger.
macro_rules! test_app {
    ($stores:expr) => {{
        let config = common::test_config();
        let stores = $stores;
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(actix_web::middleware::NormalizePath::trim())
                .configure(|cfg| hrm_reports::routes::configure(cfg, &config, stores.clone())),
        )
        .await
    }};
}
