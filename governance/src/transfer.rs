//! Fee-transfer instructions for the value-transfer ledger.

use charter_types::Principal;
use serde::{Deserialize, Serialize};

/// An instruction for the external value-transfer ledger.
///
/// The engine only records the instruction; settlement is the
/// collaborator's concern and is never verified here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferInstruction {
    pub amount: u128,
    pub from: Principal,
    pub to: Principal,
}
