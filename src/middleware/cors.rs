use tower_http::cors::{Any, CorsLayer};

/// Wide-open CORS for the API surface. Tighten per deployment.
pub fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any)
}
