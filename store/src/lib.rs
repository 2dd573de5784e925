//! Abstract storage traits for the Charter governance core.
//!
//! Every storage backend (embedded database, in-memory for testing)
//! implements these traits. The rest of the workspace depends only on
//! the traits.

pub mod error;
pub mod governance;

pub use error::StoreError;
pub use governance::GovernanceStore;
