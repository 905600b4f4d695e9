use crate::{
    api::{dashboard, employee, expense, financial, health, payroll},
    config::Config,
    error::ApiError,
    store::Stores,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{HttpRequest, HttpResponse, middleware::Condition, web};
use serde_json::json;

/// Per-IP limiter for the API scope; `None` when the limit is 0.
fn api_limiter(requests_per_min: u32) -> Option<GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>> {
    if requests_per_min == 0 {
        return None;
    }
    let per_ms = (60_000 / requests_per_min as u64).max(1);
    GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
}

async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "success": false,
        "error": format!("Not Found - {}", req.path())
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, stores: Stores) {
    let limiter = api_limiter(config.rate_api_per_min);
    let limiter_enabled = limiter.is_some();
    let limiter = Governor::new(&limiter.unwrap_or_default());

    // Malformed bodies and query strings answer in the same envelope as validation errors
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::validation(err.to_string()).into());
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::validation(err.to_string()).into());

    cfg.app_data(json_config)
        .app_data(query_config)
        .app_data(web::Data::from(stores.employees))
        .app_data(web::Data::from(stores.payrolls))
        .app_data(web::Data::from(stores.expenses))
        .app_data(web::Data::from(stores.financial));

    cfg.service(health::index);

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(Condition::new(limiter_enabled, limiter))
            .service(web::resource("/health").route(web::get().to(health::health)))
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::get().to(employee::list_employees))
                            .route(web::post().to(employee::create_employee)),
                    )
                    // /employees/{employee_id}
                    .service(
                        web::resource("/{employee_id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::update_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/payroll")
                    .service(
                        web::resource("")
                            .route(web::get().to(payroll::list_payrolls))
                            .route(web::post().to(payroll::create_payroll)),
                    )
                    // fixed paths before /{employee_id}
                    .service(web::resource("/summary").route(web::get().to(payroll::payroll_summary)))
                    .service(
                        web::resource("/total-salaries")
                            .route(web::get().to(payroll::total_salaries)),
                    )
                    .service(
                        web::resource("/{employee_id}")
                            .route(web::put().to(payroll::update_payroll))
                            .route(web::delete().to(payroll::delete_payroll)),
                    ),
            )
            .service(
                web::scope("/expenses")
                    .service(
                        web::resource("")
                            .route(web::get().to(expense::list_expenses))
                            .route(web::post().to(expense::create_expense)),
                    )
                    .service(web::resource("/summary").route(web::get().to(expense::expense_summary)))
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(expense::update_expense))
                            .route(web::delete().to(expense::delete_expense)),
                    ),
            )
            .service(
                web::scope("/financial")
                    .service(web::resource("").route(web::post().to(financial::create_financial)))
                    .service(web::resource("/analytics").route(web::get().to(financial::analytics)))
                    .service(web::resource("/{id}").route(web::put().to(financial::update_financial))),
            )
            .service(
                web::scope("/dashboard")
                    .service(web::resource("/overview").route(web::get().to(dashboard::overview)))
                    .service(web::resource("/hiring").route(web::get().to(dashboard::hiring))),
            ),
    );

    cfg.default_service(web::to(not_found));
}
