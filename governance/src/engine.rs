//! Core governance engine.

use crate::config::DaoConfig;
use crate::error::GovernanceError;
use crate::membership::MembershipOracle;
use crate::proposal::{
    Proposal, ProposalRegistry, ProposalStatus, MAX_DESCRIPTION_CHARS, MAX_TITLE_CHARS,
};
use crate::stake::{Stake, StakeLedger};
use crate::transfer::TransferInstruction;
use crate::vote::{Vote, VoteChoice, VoteRegistry};
use charter_store::GovernanceStore;
use charter_types::{BlockHeight, Principal, ProposalId};
use tracing::{debug, info};

/// The governance engine — validates preconditions, applies state
/// transitions, computes quorum, and emits fee-transfer instructions.
///
/// Strictly sequential: each call runs validate → mutate → return to
/// completion, and every failure path returns before the first write.
/// All time-dependent rules compare block heights against the
/// caller-supplied `now`, so the engine is a deterministic function of
/// (state, call, now).
pub struct GovernanceEngine {
    config: DaoConfig,
    membership: Box<dyn MembershipOracle>,
    proposals: ProposalRegistry,
    votes: VoteRegistry,
    stakes: StakeLedger,
    /// Instructions awaiting pickup by the value-transfer ledger.
    /// Replaced on each submission, never appended.
    fee_transfers: Vec<TransferInstruction>,
}

impl std::fmt::Debug for GovernanceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GovernanceEngine")
            .field("config", &self.config)
            .field("proposals", &self.proposals)
            .field("votes", &self.votes)
            .field("stakes", &self.stakes)
            .field("fee_transfers", &self.fee_transfers)
            .finish_non_exhaustive()
    }
}

impl GovernanceEngine {
    pub fn new(config: DaoConfig, membership: Box<dyn MembershipOracle>) -> Self {
        info!(admin = %config.admin, active = config.dao_active, "governance engine initialized");
        Self {
            config,
            membership,
            proposals: ProposalRegistry::new(),
            votes: VoteRegistry::new(),
            stakes: StakeLedger::new(),
            fee_transfers: Vec::new(),
        }
    }

    fn require_admin(&self, caller: &Principal) -> Result<(), GovernanceError> {
        if !self.config.is_admin(caller) {
            return Err(GovernanceError::NotAuthorized);
        }
        Ok(())
    }

    fn require_member(&self, caller: &Principal) -> Result<(), GovernanceError> {
        if self.membership.balance_of(caller) == 0 {
            return Err(GovernanceError::MembershipRequired(caller.clone()));
        }
        Ok(())
    }

    fn require_active(&self) -> Result<(), GovernanceError> {
        if !self.config.dao_active {
            return Err(GovernanceError::DaoInactive);
        }
        Ok(())
    }

    /// Replace the membership oracle collaborator. Admin only.
    pub fn set_membership_oracle(
        &mut self,
        caller: &Principal,
        oracle: Box<dyn MembershipOracle>,
    ) -> Result<(), GovernanceError> {
        self.require_admin(caller)?;
        self.membership = oracle;
        info!("membership oracle replaced");
        Ok(())
    }

    /// Replace the treasury fee destination. Admin only.
    pub fn set_treasury(
        &mut self,
        caller: &Principal,
        treasury: Principal,
    ) -> Result<(), GovernanceError> {
        self.require_admin(caller)?;
        info!(treasury = %treasury, "treasury principal replaced");
        self.config.treasury = treasury;
        Ok(())
    }

    /// Set the vote lock period in blocks. Admin only; must be
    /// positive.
    pub fn update_voting_period(
        &mut self,
        caller: &Principal,
        blocks: u64,
    ) -> Result<(), GovernanceError> {
        self.require_admin(caller)?;
        if blocks == 0 {
            return Err(GovernanceError::InvalidParam(
                "voting period must be positive".into(),
            ));
        }
        self.config.voting_period = blocks;
        info!(blocks, "voting period updated");
        Ok(())
    }

    /// Set the proposal submission fee. Admin only.
    pub fn update_proposal_fee(
        &mut self,
        caller: &Principal,
        fee: u128,
    ) -> Result<(), GovernanceError> {
        self.require_admin(caller)?;
        self.config.proposal_fee = fee;
        info!(fee, "proposal fee updated");
        Ok(())
    }

    /// Set the quorum threshold. Admin only; must be in (0, 100].
    pub fn update_quorum_threshold(
        &mut self,
        caller: &Principal,
        threshold: u32,
    ) -> Result<(), GovernanceError> {
        self.require_admin(caller)?;
        if threshold == 0 || threshold > 100 {
            return Err(GovernanceError::InvalidParam(
                "quorum threshold must be in (0, 100]".into(),
            ));
        }
        self.config.quorum_threshold = threshold;
        info!(threshold, "quorum threshold updated");
        Ok(())
    }

    /// Flip the DAO active switch. Admin only. Returns the new state.
    pub fn toggle_active(&mut self, caller: &Principal) -> Result<bool, GovernanceError> {
        self.require_admin(caller)?;
        self.config.dao_active = !self.config.dao_active;
        info!(active = self.config.dao_active, "dao active flag toggled");
        Ok(self.config.dao_active)
    }

    /// Submit a budget proposal.
    ///
    /// Preconditions are checked in a fixed order and the first failure
    /// wins: the DAO must be active, the caller must hold a membership
    /// token, the proposal cap must not be reached, and the content
    /// must be well-formed (title 1..=200 characters, description
    /// 1..=500 characters, positive budget, at least one milestone).
    ///
    /// On success the pending fee-transfer batch is replaced with a
    /// single instruction moving `proposal_fee` from the caller to the
    /// treasury (emitted even at fee zero), and the proposal is
    /// registered as `Pending` under the next sequential id.
    pub fn submit_proposal(
        &mut self,
        caller: &Principal,
        title: impl Into<String>,
        description: impl Into<String>,
        budget: u128,
        milestones: Vec<u64>,
        now: BlockHeight,
    ) -> Result<ProposalId, GovernanceError> {
        self.require_active()?;
        self.require_member(caller)?;
        if self.config.next_proposal_id.as_u64() >= self.config.max_proposals {
            return Err(GovernanceError::MaxProposalsExceeded {
                cap: self.config.max_proposals,
            });
        }
        let title = title.into();
        let title_chars = title.chars().count();
        if title_chars == 0 || title_chars > MAX_TITLE_CHARS {
            return Err(GovernanceError::InvalidParam(format!(
                "title must be 1..={} characters",
                MAX_TITLE_CHARS
            )));
        }
        let description = description.into();
        let description_chars = description.chars().count();
        if description_chars == 0 || description_chars > MAX_DESCRIPTION_CHARS {
            return Err(GovernanceError::InvalidParam(format!(
                "description must be 1..={} characters",
                MAX_DESCRIPTION_CHARS
            )));
        }
        if budget == 0 {
            return Err(GovernanceError::InvalidParam(
                "budget must be positive".into(),
            ));
        }
        if milestones.is_empty() {
            return Err(GovernanceError::InvalidParam(
                "at least one milestone is required".into(),
            ));
        }

        // The fee instruction replaces whatever batch is still pending
        // pickup; there is never more than one instruction per call.
        self.fee_transfers = vec![TransferInstruction {
            amount: self.config.proposal_fee,
            from: caller.clone(),
            to: self.config.treasury.clone(),
        }];

        let id = self.config.next_proposal_id;
        self.proposals.insert(Proposal {
            id,
            title,
            description,
            budget,
            milestones,
            status: ProposalStatus::Pending,
            creator: caller.clone(),
            created_at: now,
            votes_for: 0,
            votes_against: 0,
            quorum_met: false,
        });
        self.config.next_proposal_id = id.next();
        info!(id = %id, creator = %caller, budget, "proposal submitted");
        Ok(id)
    }

    /// Cast a staked vote on a proposal.
    ///
    /// One vote per (proposal, voter) pair. The committed amount is
    /// debited from the caller's stake and the remaining balance is
    /// re-locked for a full fresh voting period. Quorum counts votes,
    /// not stake weight, and there is no status gate: votes on a still
    /// `Pending` proposal are accepted and counted.
    pub fn cast_vote(
        &mut self,
        caller: &Principal,
        proposal_id: ProposalId,
        choice: VoteChoice,
        stake_amount: u128,
        now: BlockHeight,
    ) -> Result<(), GovernanceError> {
        self.require_active()?;
        self.require_member(caller)?;
        let proposal = self
            .proposals
            .get_mut(proposal_id)
            .ok_or(GovernanceError::ProposalNotFound(proposal_id))?;
        if self.votes.has_voted(proposal_id, caller) {
            return Err(GovernanceError::InvalidVote {
                proposal: proposal_id,
                voter: caller.clone(),
            });
        }
        if stake_amount == 0 {
            return Err(GovernanceError::InvalidParam(
                "stake amount must be positive".into(),
            ));
        }
        let available = self.stakes.available(caller);
        if available < stake_amount {
            return Err(GovernanceError::InsufficientStake {
                needed: stake_amount,
                available,
            });
        }

        // Preconditions all hold; the vote record, the stake debit and
        // the tally move together.
        self.votes.record(
            proposal_id,
            caller.clone(),
            Vote {
                choice,
                stake: stake_amount,
                cast_at: now,
            },
        );
        let lock_until = now.saturating_add(self.config.voting_period);
        self.stakes.debit(caller, stake_amount, lock_until);
        match choice {
            VoteChoice::For => proposal.votes_for = proposal.votes_for.saturating_add(1),
            VoteChoice::Against => {
                proposal.votes_against = proposal.votes_against.saturating_add(1)
            }
        }
        if proposal.total_votes() >= self.config.quorum_threshold {
            proposal.quorum_met = true;
        }
        debug!(id = %proposal_id, voter = %caller, choice = ?choice, stake = stake_amount, "vote cast");
        Ok(())
    }

    /// Deposit stake, creating the caller's record if absent.
    ///
    /// Deposits never touch the lock: a fresh record starts unlocked
    /// and a top-up leaves the existing lock where it is. Stake
    /// management stays available while the DAO is paused. Returns the
    /// new total.
    pub fn deposit_stake(
        &mut self,
        caller: &Principal,
        amount: u128,
    ) -> Result<u128, GovernanceError> {
        self.require_member(caller)?;
        if amount == 0 {
            return Err(GovernanceError::InvalidParam(
                "deposit amount must be positive".into(),
            ));
        }
        let total = self.stakes.credit(caller, amount).ok_or_else(|| {
            GovernanceError::InvalidParam("deposit overflows the stake balance".into())
        })?;
        debug!(owner = %caller, amount, total, "stake deposited");
        Ok(total)
    }

    /// Withdraw the caller's entire stake.
    ///
    /// All-or-nothing: there is no partial withdrawal. Once the lock
    /// has expired (`now == locked_until` already qualifies) the record
    /// is deleted and the full amount returned.
    pub fn withdraw_stake(
        &mut self,
        caller: &Principal,
        now: BlockHeight,
    ) -> Result<u128, GovernanceError> {
        self.require_member(caller)?;
        let stake = self
            .stakes
            .get(caller)
            .ok_or_else(|| GovernanceError::InvalidParam("no stake to withdraw".into()))?;
        if stake.is_locked(now) {
            return Err(GovernanceError::InvalidParam(format!(
                "stake is locked until {}",
                stake.locked_until
            )));
        }
        let amount = stake.amount;
        self.stakes.remove(caller);
        debug!(owner = %caller, amount, "stake withdrawn");
        Ok(amount)
    }

    /// Open voting on a pending proposal.
    ///
    /// When a proposal leaves `Pending` is scheduling policy decided
    /// outside the engine; this operation only performs the legal
    /// transition.
    pub fn open_voting(&mut self, proposal_id: ProposalId) -> Result<(), GovernanceError> {
        let proposal = self
            .proposals
            .get_mut(proposal_id)
            .ok_or(GovernanceError::ProposalNotFound(proposal_id))?;
        if proposal.status != ProposalStatus::Pending {
            return Err(GovernanceError::InvalidParam(format!(
                "proposal {} is not pending",
                proposal_id
            )));
        }
        proposal.status = ProposalStatus::Voting;
        info!(id = %proposal_id, "voting opened");
        Ok(())
    }

    /// Finalize a proposal that has met quorum.
    ///
    /// More votes for than against approves; a tie rejects. The
    /// transition is terminal. Voting-period expiry is deliberately not
    /// checked here.
    pub fn finalize_proposal(
        &mut self,
        proposal_id: ProposalId,
        now: BlockHeight,
    ) -> Result<ProposalStatus, GovernanceError> {
        let threshold = self.config.quorum_threshold;
        let proposal = self
            .proposals
            .get_mut(proposal_id)
            .ok_or(GovernanceError::ProposalNotFound(proposal_id))?;
        if proposal.status != ProposalStatus::Voting {
            return Err(GovernanceError::VotingNotActive(proposal_id));
        }
        let total = proposal.total_votes();
        if total < threshold {
            return Err(GovernanceError::QuorumNotMet {
                have: total,
                need: threshold,
            });
        }
        proposal.status = if proposal.votes_for > proposal.votes_against {
            ProposalStatus::Approved
        } else {
            ProposalStatus::Rejected
        };
        info!(id = %proposal_id, status = ?proposal.status, height = %now, "proposal finalized");
        Ok(proposal.status)
    }

    /// Get a proposal by id.
    pub fn get_proposal(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(id)
    }

    /// Get a recorded vote.
    pub fn get_vote(&self, proposal: ProposalId, voter: &Principal) -> Option<&Vote> {
        self.votes.get(proposal, voter)
    }

    /// Get a principal's stake record.
    pub fn get_stake(&self, owner: &Principal) -> Option<&Stake> {
        self.stakes.get(owner)
    }

    /// The current configuration.
    pub fn config(&self) -> &DaoConfig {
        &self.config
    }

    /// Instructions awaiting pickup by the value-transfer ledger.
    pub fn fee_transfers(&self) -> &[TransferInstruction] {
        &self.fee_transfers
    }

    /// Number of proposals ever accepted.
    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }
}

impl GovernanceEngine {
    /// Persist all engine state to a governance store.
    ///
    /// Writes the config record and every proposal, vote and stake,
    /// then deletes stored stakes that no longer exist in memory so a
    /// full withdrawal survives the round-trip. The pending fee batch
    /// is not part of the persisted surface.
    pub fn save_to_store(&self, store: &dyn GovernanceStore) -> Result<(), GovernanceError> {
        let config_bytes = bincode::serialize(&self.config)
            .map_err(|e| GovernanceError::Storage(e.to_string()))?;
        store
            .put_config(&config_bytes)
            .map_err(|e| GovernanceError::Storage(e.to_string()))?;

        for proposal in self.proposals.iter() {
            let bytes = bincode::serialize(proposal)
                .map_err(|e| GovernanceError::Storage(e.to_string()))?;
            store
                .put_proposal(proposal.id, &bytes)
                .map_err(|e| GovernanceError::Storage(e.to_string()))?;
        }

        for ((proposal_id, voter), vote) in self.votes.iter() {
            let bytes = bincode::serialize(vote)
                .map_err(|e| GovernanceError::Storage(e.to_string()))?;
            store
                .put_vote(*proposal_id, voter, &bytes)
                .map_err(|e| GovernanceError::Storage(e.to_string()))?;
        }

        for (owner, stake) in self.stakes.iter() {
            let bytes = bincode::serialize(stake)
                .map_err(|e| GovernanceError::Storage(e.to_string()))?;
            store
                .put_stake(owner, &bytes)
                .map_err(|e| GovernanceError::Storage(e.to_string()))?;
        }
        let stored = store
            .stakes()
            .map_err(|e| GovernanceError::Storage(e.to_string()))?;
        for (owner, _) in stored {
            if self.stakes.get(&owner).is_none() {
                store
                    .delete_stake(&owner)
                    .map_err(|e| GovernanceError::Storage(e.to_string()))?;
            }
        }
        Ok(())
    }

    /// Restore engine state from a governance store.
    ///
    /// The membership oracle is a live collaborator, not persisted
    /// state, so the caller supplies it.
    pub fn load_from_store(
        store: &dyn GovernanceStore,
        membership: Box<dyn MembershipOracle>,
    ) -> Result<Self, GovernanceError> {
        let config: DaoConfig = match store
            .get_config()
            .map_err(|e| GovernanceError::Storage(e.to_string()))?
        {
            Some(bytes) => bincode::deserialize(&bytes)
                .map_err(|e| GovernanceError::Storage(e.to_string()))?,
            None => {
                return Err(GovernanceError::Storage(
                    "no configuration record in store".into(),
                ))
            }
        };

        let mut proposals = ProposalRegistry::new();
        let mut votes = VoteRegistry::new();
        let ids = store
            .proposal_ids()
            .map_err(|e| GovernanceError::Storage(e.to_string()))?;
        for id in ids {
            let bytes = store
                .get_proposal(id)
                .map_err(|e| GovernanceError::Storage(e.to_string()))?;
            let proposal: Proposal = bincode::deserialize(&bytes)
                .map_err(|e| GovernanceError::Storage(e.to_string()))?;
            proposals.insert(proposal);

            let proposal_votes = store
                .votes_for_proposal(id)
                .map_err(|e| GovernanceError::Storage(e.to_string()))?;
            for (voter, vote_bytes) in proposal_votes {
                let vote: Vote = bincode::deserialize(&vote_bytes)
                    .map_err(|e| GovernanceError::Storage(e.to_string()))?;
                votes.record(id, voter, vote);
            }
        }

        let mut stakes = StakeLedger::new();
        let stake_rows = store
            .stakes()
            .map_err(|e| GovernanceError::Storage(e.to_string()))?;
        for (owner, bytes) in stake_rows {
            let stake: Stake = bincode::deserialize(&bytes)
                .map_err(|e| GovernanceError::Storage(e.to_string()))?;
            stakes.insert(owner, stake);
        }

        Ok(Self {
            config,
            membership,
            proposals,
            votes,
            stakes,
            fee_transfers: Vec::new(),
        })
    }
}
