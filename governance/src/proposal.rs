//! Proposals and their lifecycle.

use charter_types::{BlockHeight, Principal, ProposalId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum proposal title length, in characters.
pub const MAX_TITLE_CHARS: usize = 200;
/// Maximum proposal description length, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Lifecycle status of a proposal.
///
/// `pending → voting → {approved, rejected}`; the terminal statuses
/// never change again. Opening the vote is driven from outside the
/// engine; finalization is the engine's own transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Accepted, not yet open for voting.
    Pending,
    /// Open for voting.
    Voting,
    /// Finalized with more votes for than against.
    Approved,
    /// Finalized with a tie or a majority against.
    Rejected,
}

impl ProposalStatus {
    /// Whether this status can never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

/// A budget proposal put to a membership vote.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub title: String,
    pub description: String,
    /// Requested budget. Always positive.
    pub budget: u128,
    /// Planned disbursement milestones. Never empty.
    pub milestones: Vec<u64>,
    pub status: ProposalStatus,
    pub creator: Principal,
    pub created_at: BlockHeight,
    /// Count of votes in favor. Only ever increases.
    pub votes_for: u32,
    /// Count of votes against. Only ever increases.
    pub votes_against: u32,
    /// Whether the combined tally has reached the quorum threshold.
    /// Never reverts to false once set.
    pub quorum_met: bool,
}

impl Proposal {
    /// Combined tally of both choices.
    pub fn total_votes(&self) -> u32 {
        self.votes_for.saturating_add(self.votes_against)
    }
}

/// Ordered collection of proposals keyed by their monotonically
/// increasing id.
#[derive(Clone, Debug, Default)]
pub struct ProposalRegistry {
    proposals: BTreeMap<ProposalId, Proposal>,
}

impl ProposalRegistry {
    pub fn new() -> Self {
        Self {
            proposals: BTreeMap::new(),
        }
    }

    /// Register a proposal under its own id.
    pub fn insert(&mut self, proposal: Proposal) {
        self.proposals.insert(proposal.id, proposal);
    }

    pub fn get(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(&id)
    }

    pub fn get_mut(&mut self, id: ProposalId) -> Option<&mut Proposal> {
        self.proposals.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }

    /// Iterate proposals in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_proposal(id: u64) -> Proposal {
        Proposal {
            id: ProposalId::new(id),
            title: "Fund the commons".to_string(),
            description: "A proposal".to_string(),
            budget: 1000,
            milestones: vec![1, 2, 3],
            status: ProposalStatus::Pending,
            creator: Principal::new("ST1TEST"),
            created_at: BlockHeight::new(1),
            votes_for: 0,
            votes_against: 0,
            quorum_met: false,
        }
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!ProposalStatus::Pending.is_terminal());
        assert!(!ProposalStatus::Voting.is_terminal());
        assert!(ProposalStatus::Approved.is_terminal());
        assert!(ProposalStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_total_votes_sums_both_choices() {
        let mut proposal = test_proposal(0);
        proposal.votes_for = 3;
        proposal.votes_against = 2;
        assert_eq!(proposal.total_votes(), 5);
    }

    #[test]
    fn test_total_votes_saturates() {
        let mut proposal = test_proposal(0);
        proposal.votes_for = u32::MAX;
        proposal.votes_against = 1;
        assert_eq!(proposal.total_votes(), u32::MAX);
    }

    #[test]
    fn test_registry_iterates_in_id_order() {
        let mut registry = ProposalRegistry::new();
        registry.insert(test_proposal(2));
        registry.insert(test_proposal(0));
        registry.insert(test_proposal(1));
        let ids: Vec<u64> = registry.iter().map(|p| p.id.as_u64()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_registry_get_by_id() {
        let mut registry = ProposalRegistry::new();
        assert!(registry.is_empty());
        registry.insert(test_proposal(0));
        assert_eq!(registry.len(), 1);
        assert!(registry.get(ProposalId::new(0)).is_some());
        assert!(registry.get(ProposalId::new(7)).is_none());
    }
}
