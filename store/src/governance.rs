//! Governance storage trait.

use crate::StoreError;
use charter_types::{Principal, ProposalId};

/// Trait for storing governance state (config, proposals, votes, stakes).
///
/// The persisted surface is four keyed tables; values are opaque
/// bytes serialized by the engine. No scans beyond the listed
/// enumerations are required of a backend.
pub trait GovernanceStore {
    /// Store the configuration record.
    fn put_config(&self, data: &[u8]) -> Result<(), StoreError>;

    /// Get the configuration record, if one has been stored.
    fn get_config(&self) -> Result<Option<Vec<u8>>, StoreError>;

    /// Store a proposal.
    fn put_proposal(&self, id: ProposalId, data: &[u8]) -> Result<(), StoreError>;

    /// Get a proposal by id.
    fn get_proposal(&self, id: ProposalId) -> Result<Vec<u8>, StoreError>;

    /// List all stored proposal ids.
    fn proposal_ids(&self) -> Result<Vec<ProposalId>, StoreError>;

    /// Store a vote under its (proposal, voter) key.
    fn put_vote(
        &self,
        proposal: ProposalId,
        voter: &Principal,
        data: &[u8],
    ) -> Result<(), StoreError>;

    /// Get a specific voter's vote on a proposal.
    fn get_vote(
        &self,
        proposal: ProposalId,
        voter: &Principal,
    ) -> Result<Option<Vec<u8>>, StoreError>;

    /// Get all votes for a proposal, keyed by voter.
    fn votes_for_proposal(
        &self,
        proposal: ProposalId,
    ) -> Result<Vec<(Principal, Vec<u8>)>, StoreError>;

    /// Store a principal's stake record.
    fn put_stake(&self, owner: &Principal, data: &[u8]) -> Result<(), StoreError>;

    /// Get a principal's stake record.
    fn get_stake(&self, owner: &Principal) -> Result<Option<Vec<u8>>, StoreError>;

    /// Delete a principal's stake record. Deleting an absent record is
    /// not an error.
    fn delete_stake(&self, owner: &Principal) -> Result<(), StoreError>;

    /// List all stored stake records, keyed by owner.
    fn stakes(&self) -> Result<Vec<(Principal, Vec<u8>)>, StoreError>;
}
