use actix_cors::Cors;
use actix_web::http::header;

/// Origins allowed when none are configured.
pub const LOCAL_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Build CORS middleware for the game client.
///
/// `allowed_origins` comes from `ServerConfig` and is already validated;
/// an empty list falls back to localhost only. The API is read-only over
/// HTTP (health checks and the websocket upgrade), so only GET is allowed.
pub fn cors_middleware(allowed_origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(3600);

    if allowed_origins.is_empty() {
        for origin in LOCAL_ORIGINS {
            cors = cors.allowed_origin(origin);
        }
    } else {
        for origin in allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
