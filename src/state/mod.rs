// State management module.
// Published search state and the orchestrator that drives it.

pub mod loading;
pub mod search;

pub use loading::LoadingState;
pub use search::{Completion, Query, SearchOrchestrator, SearchState, SearchStatus};
