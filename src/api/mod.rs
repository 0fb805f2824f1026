//! API Module
//!
//! HTTP handlers and routing for the cache controller.
//!
//! # Endpoints
//! - `POST /message` - Precache channel (fire-and-forget)
//! - `GET /fetch` - Intercepted asset requests
//! - `GET /stats` - Store statistics
//! - `GET /health` - Health and lifecycle phase

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
