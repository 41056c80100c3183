use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, Request},
};
use std::path::Path;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tower_http::services::ServeDir;
use uuid::Uuid;

pub const LIVENESS_PATH: &str = "/";
pub const LIVENESS_MESSAGE: &str = "API Working Successfully!";
pub const STATIC_ASSETS_PREFIX: &str = "/images";

/// Credentialed CORS restricted to `allowed_origins`, which must not contain
/// `*` (`AppConfig` rejects it).
pub fn cors_layer(allowed_origins: &[HeaderValue]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins.iter().cloned()))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request())
}

pub fn body_limit_layer(limit: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(limit)
}

pub fn static_assets(dir: &Path) -> ServeDir {
    ServeDir::new(dir)
}

pub async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

#[derive(Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}
