//! Membership oracle seam.

use charter_types::Principal;
use std::collections::HashMap;

/// Answers how many membership tokens a principal holds.
///
/// The oracle is an external collaborator: side-effect free and
/// infallible. Holding at least one token is what gates every
/// member-only operation.
pub trait MembershipOracle {
    fn balance_of(&self, principal: &Principal) -> u64;
}

/// A fixed in-memory roster.
///
/// The bundled reference oracle: embedders without a live token
/// contract can maintain the roster programmatically, and the test
/// suites drive membership through it.
#[derive(Clone, Debug, Default)]
pub struct StaticMembership {
    balances: HashMap<Principal, u64>,
}

impl StaticMembership {
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
        }
    }

    /// A roster where every listed principal holds one token.
    pub fn with_members(members: impl IntoIterator<Item = Principal>) -> Self {
        let mut roster = Self::new();
        for member in members {
            roster.set_balance(member, 1);
        }
        roster
    }

    /// Set a principal's token balance.
    pub fn set_balance(&mut self, principal: Principal, balance: u64) {
        self.balances.insert(principal, balance);
    }
}

impl MembershipOracle for StaticMembership {
    fn balance_of(&self, principal: &Principal) -> u64 {
        self.balances.get(principal).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_principal_has_zero_balance() {
        let roster = StaticMembership::new();
        assert_eq!(roster.balance_of(&Principal::new("ST1NOBODY")), 0);
    }

    #[test]
    fn test_set_balance_overwrites() {
        let mut roster = StaticMembership::new();
        let alice = Principal::new("ST1ALICE");
        roster.set_balance(alice.clone(), 3);
        assert_eq!(roster.balance_of(&alice), 3);
        roster.set_balance(alice.clone(), 0);
        assert_eq!(roster.balance_of(&alice), 0);
    }

    #[test]
    fn test_with_members_grants_one_token_each() {
        let alice = Principal::new("ST1ALICE");
        let bob = Principal::new("ST1BOB");
        let roster = StaticMembership::with_members([alice.clone(), bob.clone()]);
        assert_eq!(roster.balance_of(&alice), 1);
        assert_eq!(roster.balance_of(&bob), 1);
    }
}
