//! Fundamental types for the Charter governance core.
//!
//! This crate defines the core types shared across every other crate in
//! the workspace: principals, block heights, and proposal identifiers.

pub mod height;
pub mod id;
pub mod principal;

pub use height::BlockHeight;
pub use id::ProposalId;
pub use principal::Principal;
