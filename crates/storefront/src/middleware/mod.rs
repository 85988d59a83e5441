//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transactions)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (CSP, frame denial, etc.)
//! 5. Rate limiting (governor, predictive search only)

pub mod rate_limit;
pub mod request_id;
pub mod security_headers;

pub use rate_limit::predictive_search_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
