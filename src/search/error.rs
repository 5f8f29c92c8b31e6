use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("search term must not be empty")]
    EmptyTerm,
}

pub type Result<T> = std::result::Result<T, SearchError>;
