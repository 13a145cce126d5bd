//! Quote Proxy API
//!
//! Axum routes, handlers and middleware for the swap quote proxy.

pub mod handlers;
pub mod router;
pub mod security;
pub mod state;

pub use handlers::common::ErrorResponse;
pub use router::create_router;
pub use state::AppState;
