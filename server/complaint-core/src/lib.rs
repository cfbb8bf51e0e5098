//! Complaint intake core: sanitization, validation, ticket assignment, storage.
//!
//! Submissions are sanitized and validated, stamped with a
//! `TKT-YYYYMMDD-NNNN` ticket number, and appended through a
//! [`ComplaintStore`]. Lookups and per-status counts read the same store.
//!
//! No network here; the HTTP surface lives in `complaint-api`.

pub mod config;
pub mod desk;
pub mod error;
pub mod file_store;
pub mod normalize;
pub mod stats;
pub mod store;
pub mod ticket;
pub mod types;

pub use config::Config;
pub use desk::Desk;
pub use error::{IntakeError, StoreError};
pub use file_store::FileStore;
pub use store::{ComplaintStore, Lookup, MemoryStore};
pub use types::{Complaint, Receipt, Status, StatusCounts, Submission};
