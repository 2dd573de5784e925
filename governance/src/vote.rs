//! Votes and the per-proposal vote registry.

use charter_types::{BlockHeight, Principal, ProposalId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A voter's choice on a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteChoice {
    For,
    Against,
}

/// A recorded vote.
///
/// The (proposal, voter) identity lives in the registry key. A vote is
/// never overwritten or deleted by this core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub choice: VoteChoice,
    /// Stake units debited to back this vote. Always positive.
    pub stake: u128,
    pub cast_at: BlockHeight,
}

/// At most one vote per (proposal, principal) pair, keyed by the
/// explicit composite tuple.
#[derive(Clone, Debug, Default)]
pub struct VoteRegistry {
    votes: HashMap<(ProposalId, Principal), Vote>,
}

impl VoteRegistry {
    pub fn new() -> Self {
        Self {
            votes: HashMap::new(),
        }
    }

    /// Whether `voter` has already voted on `proposal`.
    pub fn has_voted(&self, proposal: ProposalId, voter: &Principal) -> bool {
        self.votes.contains_key(&(proposal, voter.clone()))
    }

    /// Record a vote. The caller enforces uniqueness first.
    pub fn record(&mut self, proposal: ProposalId, voter: Principal, vote: Vote) {
        self.votes.insert((proposal, voter), vote);
    }

    pub fn get(&self, proposal: ProposalId, voter: &Principal) -> Option<&Vote> {
        self.votes.get(&(proposal, voter.clone()))
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(ProposalId, Principal), &Vote)> {
        self.votes.iter()
    }
}
