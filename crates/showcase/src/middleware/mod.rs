//! HTTP middleware stack for the showcase.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Response headers (`X-Frame-Options`, `X-Content-Type-Options`,
//!    `Referrer-Policy`)
//! 4. Session layer (tower-sessions with the in-memory store)

pub mod auth;
pub mod session;

pub use auth::{RequireAdmin, admin_session, set_admin_session};
pub use session::{create_session_layer, push_notice, take_notice};
