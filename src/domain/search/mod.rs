//! Fuzzy search over recordings, timestamps and groups

pub mod fuzzy;
mod ranker;

pub use ranker::{SearchHit, SearchQuery, SearchRanker, Searchable, DEFAULT_SEARCH_THRESHOLD};
