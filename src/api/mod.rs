// Search backend module.
// HTTP client, wire types, and the service seam the orchestrator calls through.

pub mod client;
pub mod endpoints;
pub mod service;
pub mod types;

pub use client::SearchClient;
pub use service::SearchService;
pub use types::{RawResult, SMOKING_FIELD_ALIASES};
