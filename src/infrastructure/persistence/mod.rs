//! Record store implementations.
//!
//! Concrete implementations of [`crate::domain::repositories::RecordStore`].
//!
//! # Stores
//!
//! - [`PgRecordStore`] - PostgreSQL, with a background sweeper for expired rows
//! - [`RedisRecordStore`] - Redis hashes with native key expiry
//! - [`MemoryRecordStore`] - In-process map for tests and local runs

pub mod memory_record_store;
pub mod pg_record_store;
pub mod redis_record_store;

pub use memory_record_store::MemoryRecordStore;
pub use pg_record_store::{PgRecordStore, spawn_expiry_sweeper};
pub use redis_record_store::RedisRecordStore;
