//! Offline Cache - An offline-first asset cache controller
//!
//! Maintains a generation-tagged store of upstream responses, warmed through
//! a precache message channel and served through request interception.

pub mod api;
pub mod cache;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod net;

pub use api::AppState;
pub use config::Config;
pub use controller::{CacheController, Event, Outcome, Phase};
