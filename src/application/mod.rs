//! Application layer - Use cases and port interfaces
//!
//! Contains the library store, the persistence queue, the capture use case
//! and the trait definitions for external system interactions.

pub mod capture;
pub mod library;
pub mod persistence;
pub mod ports;

// Re-export use cases
pub use capture::{CaptureUseCase, CaptureUseCaseError};
pub use library::{DeleteOutcome, LibraryError, LibraryStore, VerifyReport};
pub use persistence::PersistQueue;
