// versegrep - interactive sonnet search library
//!
//! Naive multi-word substring search over Shakespeare's sonnets: each query
//! word is matched independently against every sonnet, per-word results are
//! merged under an AND/OR policy, and merged results are rendered with
//! optional ANSI highlighting.

pub mod config;
pub mod corpus;
pub mod render;
pub mod search;

// Re-export common types
pub use config::Preferences;
pub use corpus::Sonnet;
pub use render::HighlightMode;
pub use search::{LineMatch, MatchResult, SearchMode, Span};
