//! Nullable store — thread-safe in-memory governance storage for testing.

use charter_store::{GovernanceStore, StoreError};
use charter_types::{Principal, ProposalId};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

/// An in-memory governance store for testing.
/// Thread-safe so tests can share one behind an `Arc`.
pub struct MemoryStore {
    config: Mutex<Option<Vec<u8>>>,
    proposals: Mutex<BTreeMap<u64, Vec<u8>>>,
    votes: Mutex<HashMap<(u64, String), Vec<u8>>>,
    stakes: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            config: Mutex::new(None),
            proposals: Mutex::new(BTreeMap::new()),
            votes: Mutex::new(HashMap::new()),
            stakes: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GovernanceStore for MemoryStore {
    fn put_config(&self, data: &[u8]) -> Result<(), StoreError> {
        *self.config.lock().unwrap() = Some(data.to_vec());
        Ok(())
    }

    fn get_config(&self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.config.lock().unwrap().clone())
    }

    fn put_proposal(&self, id: ProposalId, data: &[u8]) -> Result<(), StoreError> {
        self.proposals
            .lock()
            .unwrap()
            .insert(id.as_u64(), data.to_vec());
        Ok(())
    }

    fn get_proposal(&self, id: ProposalId) -> Result<Vec<u8>, StoreError> {
        self.proposals
            .lock()
            .unwrap()
            .get(&id.as_u64())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn proposal_ids(&self) -> Result<Vec<ProposalId>, StoreError> {
        Ok(self
            .proposals
            .lock()
            .unwrap()
            .keys()
            .map(|id| ProposalId::new(*id))
            .collect())
    }

    fn put_vote(
        &self,
        proposal: ProposalId,
        voter: &Principal,
        data: &[u8],
    ) -> Result<(), StoreError> {
        self.votes
            .lock()
            .unwrap()
            .insert((proposal.as_u64(), voter.to_string()), data.to_vec());
        Ok(())
    }

    fn get_vote(
        &self,
        proposal: ProposalId,
        voter: &Principal,
    ) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .get(&(proposal.as_u64(), voter.to_string()))
            .cloned())
    }

    fn votes_for_proposal(
        &self,
        proposal: ProposalId,
    ) -> Result<Vec<(Principal, Vec<u8>)>, StoreError> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .iter()
            .filter(|((id, _), _)| *id == proposal.as_u64())
            .map(|((_, voter), data)| (Principal::new(voter.clone()), data.clone()))
            .collect())
    }

    fn put_stake(&self, owner: &Principal, data: &[u8]) -> Result<(), StoreError> {
        self.stakes
            .lock()
            .unwrap()
            .insert(owner.to_string(), data.to_vec());
        Ok(())
    }

    fn get_stake(&self, owner: &Principal) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.stakes.lock().unwrap().get(owner.as_str()).cloned())
    }

    fn delete_stake(&self, owner: &Principal) -> Result<(), StoreError> {
        self.stakes.lock().unwrap().remove(owner.as_str());
        Ok(())
    }

    fn stakes(&self) -> Result<Vec<(Principal, Vec<u8>)>, StoreError> {
        Ok(self
            .stakes
            .lock()
            .unwrap()
            .iter()
            .map(|(owner, data)| (Principal::new(owner.clone()), data.clone()))
            .collect())
    }
}
