// venue-scout: find nearby venues by location or keyword.
// Core resolution and caching logic; the binary in main.rs is a thin front end.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod geo;
pub mod state;
pub mod venue;

pub use config::Config;
pub use error::{Result, ScoutError};
