//! Advice Store
//!
//! SQLite persistence for computed regime recommendations. Writes are
//! fire-and-forget from the caller's perspective: a failed save must
//! never affect the response already computed.

pub mod db;
pub mod error;
pub mod models;

pub use db::AdviceStore;
pub use error::StoreError;
pub use models::{AdviceRecord, AdviceRecordInput};
