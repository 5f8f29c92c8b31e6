// Query evaluation: per-term matching and AND/OR result merging.
//
// One MatchResult per sonnet per query word; the combiner folds them into a
// single index-aligned result vector that the renderer consumes.

pub mod combine;
pub mod error;
pub mod matcher;
pub mod types;

pub use combine::{SearchMode, combine, evaluate_query};
pub use error::{Result, SearchError};
pub use matcher::match_sonnet;
pub use types::{LineMatch, MatchResult, Span};
