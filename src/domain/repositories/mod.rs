//! Store trait definitions for the domain layer.
//!
//! The core never talks to a database directly. It consumes the [`RecordStore`]
//! contract, whose implementations live in `crate::infrastructure::persistence`.
//!
//! # Testing
//!
//! A `mockall` mock is generated under `cfg(test)`; integration tests use
//! [`crate::infrastructure::persistence::MemoryRecordStore`].

pub mod record_store;

pub use record_store::{CreateOutcome, IncrementOutcome, RecordStore};

#[cfg(test)]
pub use record_store::MockRecordStore;
