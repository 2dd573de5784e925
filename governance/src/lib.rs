//! Membership-gated governance for a budget DAO.
//!
//! Members submit budget proposals, back their votes with locked
//! stake, and proposals pass by vote count once quorum is reached.
//! The [`engine::GovernanceEngine`] owns all state and exposes the
//! operations; persistence goes through the `charter-store` traits
//! and token custody is delegated to collaborators supplied by the
//! embedding application.

pub mod config;
pub mod engine;
pub mod error;
pub mod membership;
pub mod proposal;
pub mod stake;
pub mod transfer;
pub mod vote;

pub use config::DaoConfig;
pub use engine::GovernanceEngine;
pub use error::GovernanceError;
pub use membership::{MembershipOracle, StaticMembership};
pub use proposal::{
    Proposal, ProposalRegistry, ProposalStatus, MAX_DESCRIPTION_CHARS, MAX_TITLE_CHARS,
};
pub use stake::{Stake, StakeLedger};
pub use transfer::TransferInstruction;
pub use vote::{Vote, VoteChoice, VoteRegistry};
