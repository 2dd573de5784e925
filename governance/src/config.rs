//! DAO-wide configuration.

use charter_types::{Principal, ProposalId};
use serde::{Deserialize, Serialize};

/// DAO-wide parameters and references, mutated only through the
/// engine's admin operations.
///
/// Held by the engine instance, never ambient: two engines (two DAOs,
/// or a test and its subject) can never interfere through shared
/// configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaoConfig {
    /// The single principal allowed to change configuration.
    pub admin: Principal,
    /// Destination of collected proposal fees.
    pub treasury: Principal,
    /// Blocks a vote locks the voter's remaining stake for. Always > 0.
    pub voting_period: u64,
    /// Fee charged on every proposal submission.
    pub proposal_fee: u128,
    /// Total votes (for + against) a proposal needs before it can be
    /// finalized. Kept in (0, 100].
    pub quorum_threshold: u32,
    /// Master switch for proposal submission and voting.
    pub dao_active: bool,
    /// Id the next accepted proposal will receive.
    pub next_proposal_id: ProposalId,
    /// Cap on the number of proposals ever accepted.
    pub max_proposals: u64,
}

impl DaoConfig {
    /// Deployment default vote lock, roughly one day of blocks.
    pub const DEFAULT_VOTING_PERIOD: u64 = 1440;
    /// Deployment default submission fee.
    pub const DEFAULT_PROPOSAL_FEE: u128 = 100;
    /// Deployment default quorum.
    pub const DEFAULT_QUORUM_THRESHOLD: u32 = 50;
    /// Deployment default proposal cap.
    pub const DEFAULT_MAX_PROPOSALS: u64 = 1000;

    /// A configuration with the deployment defaults, active from the
    /// start.
    pub fn new(admin: Principal, treasury: Principal) -> Self {
        Self {
            admin,
            treasury,
            voting_period: Self::DEFAULT_VOTING_PERIOD,
            proposal_fee: Self::DEFAULT_PROPOSAL_FEE,
            quorum_threshold: Self::DEFAULT_QUORUM_THRESHOLD,
            dao_active: true,
            next_proposal_id: ProposalId::FIRST,
            max_proposals: Self::DEFAULT_MAX_PROPOSALS,
        }
    }

    /// Whether `caller` is the configured admin.
    pub fn is_admin(&self, caller: &Principal) -> bool {
        self.admin == *caller
    }
}
