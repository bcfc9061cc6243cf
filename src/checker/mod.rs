//! Check-execution engine and its collaborators
//!
//! This module contains:
//! - The outcome taxonomy and batch result container
//! - The indexation classifier for search result pages
//! - The outbound search query (trait and reqwest implementation)
//! - The checker engine with its proxy failover loop

mod classifier;
mod engine;
mod outcome;
mod query;

pub use classifier::{classify, Classifier, Verdict, ORGANIC_RESULT_SELECTOR};
pub use engine::CheckerEngine;
pub use outcome::{BatchResult, Outcome};
pub use query::{
    build_client, HttpSearchQuery, QueryResult, SearchQuery, DEFAULT_SEARCH_BASE_URL,
    DEFAULT_TIMEOUT,
};
