//! Port contracts for tracker persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by tracker services.

pub mod store;
pub mod unit_of_work;

pub use store::{ProjectFilter, StoreError, StoreResult, TaskFilter, TrackerStore};
pub use unit_of_work::{Change, CommitReceipt, CreatedRecord, UnitOfWork};
