use actix_web::web;

pub mod health;
pub mod realtime;

/// Register every route. Middleware is wrapped by the caller so tests can
/// mount the same paths with or without it.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::root))
        .configure(health::configure_routes)
        .configure(realtime::configure_routes);
}
