//! Client-side search orchestration: filters, view state, and the driver that
//! issues backend requests and folds their outcomes back into the state.

pub mod orchestrator;
pub mod query;
pub mod state;

pub use orchestrator::{Completion, Orchestrator};
pub use query::SearchFilters;
pub use state::{ResponseOrdering, SearchState};
