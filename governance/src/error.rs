use charter_types::{Principal, ProposalId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("caller is not the configured admin")]
    NotAuthorized,

    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    #[error("the DAO is not accepting governance actions")]
    DaoInactive,

    #[error("principal {0} holds no membership token")]
    MembershipRequired(Principal),

    #[error("quorum not met: {have} of {need} required votes")]
    QuorumNotMet { have: u32, need: u32 },

    #[error("proposal {0} is not open for voting")]
    VotingNotActive(ProposalId),

    #[error("proposal {0} not found")]
    ProposalNotFound(ProposalId),

    #[error("principal {voter} has already voted on proposal {proposal}")]
    InvalidVote {
        proposal: ProposalId,
        voter: Principal,
    },

    #[error("proposal cap of {cap} reached")]
    MaxProposalsExceeded { cap: u64 },

    #[error("insufficient stake: need {needed}, have {available}")]
    InsufficientStake { needed: u128, available: u128 },

    #[error("storage error: {0}")]
    Storage(String),
}
