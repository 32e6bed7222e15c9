use axum::http::{HeaderValue, request::Parts};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::constants::DEPLOYMENT_ORIGIN_SUFFIX;

/// Returns `true` for an origin in `allowed` or any HTTPS deployment subdomain.
pub fn origin_allowed(origin: &str, allowed: &[String]) -> bool {
    if allowed.iter().any(|o| o == origin) {
        return true;
    }

    let Some(host) = origin.strip_prefix("https://") else {
        return false;
    };
    let Some(subdomain) = host.strip_suffix(DEPLOYMENT_ORIGIN_SUFFIX) else {
        return false;
    };

    !subdomain.is_empty()
        && subdomain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
}

/// Credentialed CORS; methods and headers mirror the preflight request.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allowed = allowed_origins.to_vec();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .map(|o| origin_allowed(o, &allowed))
                    .unwrap_or(false)
            },
        ))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
