//! Stake records and the per-principal stake ledger.

use charter_types::{BlockHeight, Principal};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A principal's uncommitted stake balance and its lock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stake {
    /// Balance available to back votes or withdraw.
    pub amount: u128,
    /// Height at which the balance unlocks. Only moves forward.
    pub locked_until: BlockHeight,
}

impl Stake {
    /// Whether the balance is still locked at `now`.
    pub fn is_locked(&self, now: BlockHeight) -> bool {
        !self.locked_until.is_reached(now)
    }
}

/// One stake record per principal; the record is deleted entirely on
/// withdrawal.
#[derive(Clone, Debug, Default)]
pub struct StakeLedger {
    stakes: HashMap<Principal, Stake>,
}

impl StakeLedger {
    pub fn new() -> Self {
        Self {
            stakes: HashMap::new(),
        }
    }

    pub fn get(&self, owner: &Principal) -> Option<&Stake> {
        self.stakes.get(owner)
    }

    /// The balance available to `owner`, treating a missing record as
    /// zero.
    pub fn available(&self, owner: &Principal) -> u128 {
        self.stakes.get(owner).map(|s| s.amount).unwrap_or(0)
    }

    /// Add to a principal's balance, creating an unlocked record if
    /// none exists. Returns the new total, or `None` on overflow with
    /// nothing changed.
    pub fn credit(&mut self, owner: &Principal, amount: u128) -> Option<u128> {
        let new_amount = self.available(owner).checked_add(amount)?;
        let stake = self.stakes.entry(owner.clone()).or_insert(Stake {
            amount: 0,
            locked_until: BlockHeight::ZERO,
        });
        stake.amount = new_amount;
        Some(new_amount)
    }

    /// Debit a vote's committed stake and extend the lock. The caller
    /// validates sufficiency first; a missing record is treated as a
    /// zero balance, matching the read side. The lock never moves
    /// backward. Returns the remaining balance.
    pub fn debit(&mut self, owner: &Principal, amount: u128, lock_until: BlockHeight) -> u128 {
        let stake = self.stakes.entry(owner.clone()).or_insert(Stake {
            amount: 0,
            locked_until: BlockHeight::ZERO,
        });
        stake.amount = stake.amount.saturating_sub(amount);
        if lock_until > stake.locked_until {
            stake.locked_until = lock_until;
        }
        stake.amount
    }

    /// Delete a principal's record, returning it.
    pub fn remove(&mut self, owner: &Principal) -> Option<Stake> {
        self.stakes.remove(owner)
    }

    /// Insert a record as-is. Used when restoring from storage.
    pub fn insert(&mut self, owner: Principal, stake: Stake) {
        self.stakes.insert(owner, stake);
    }

    pub fn len(&self) -> usize {
        self.stakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stakes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Principal, &Stake)> {
        self.stakes.iter()
    }
}
