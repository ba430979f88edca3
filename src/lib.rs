//! AudioShelf - a library manager for audio recordings
//!
//! This crate keeps user annotations (tags, groups, timestamps and
//! descriptions) alongside a directory of recordings, reconciles them with
//! what is actually on disk, and ranks recordings, timestamps and groups
//! against fuzzy search queries.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects, the library snapshot, the search ranker and errors
//! - **Application**: The library store, persistence queue, capture use case and port traits
//! - **Infrastructure**: Adapter implementations (filesystem media index, JSON snapshots, XDG config)
//! - **CLI**: Command-line interface, argument parsing and output formatting

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
