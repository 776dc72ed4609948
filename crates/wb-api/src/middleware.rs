//! warble/crates/wb-api/src/middleware.rs
//!
//! Shared middleware for logging and cross-origin access.

use actix_cors::Cors;
use actix_web::middleware::Logger;

// Returns the standard request logger:
// remote-ip "request-line" status-code response-size "referrer" "user-agent"
pub fn request_logger() -> Logger {
    Logger::default()
}

// Configures CORS (Cross-Origin Resource Sharing)
// Needed when a presentation layer is served from another origin.
pub fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_header()
        .allowed_methods(vec!["GET", "POST"])
        .max_age(3600)
}
