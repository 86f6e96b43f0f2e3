use actix_web::{web, App, HttpServer};
use clout_backend::config::{load_card_catalog, ServerConfig};
use clout_backend::infra::state::build_state;
use clout_backend::middleware::cors::cors_middleware;
use clout_backend::middleware::request_trace::RequestTrace;
use clout_backend::middleware::structured_logger::StructuredLogger;
use clout_backend::routes;
use clout_backend::telemetry;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Configuration comes from the process environment only; no .env file is read.
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let catalog = load_card_catalog(&config.card_templates_path);
    let app_state = build_state()
        .with_catalog(catalog)
        .with_seed(config.rng_seed)
        .build();

    info!(host = %config.host, port = config.port, "Starting Clout Backend");

    let data = web::Data::new(app_state);
    let origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
