//! Approval engine
//!
//! Maps an approval vector and a threshold to a transaction state. The
//! result is recomputed from scratch on every vote; callers only consult it
//! while the transaction is still pending.

use crate::state::{TransactionState, Vote};

/// `Accepted` once `threshold` approvals exist, `Rejected` as soon as the
/// threshold is unreachable even if every unset slot approved, otherwise
/// `Pending`.
pub fn tally(approvals: &[Vote], threshold: u64) -> TransactionState {
    let members = approvals.len() as u64;
    let approved = approvals.iter().filter(|v| **v == Vote::Approved).count() as u64;

    if approved >= threshold {
        return TransactionState::Accepted;
    }

    let rejected = approvals.iter().filter(|v| **v == Vote::Rejected).count() as u64;
    if members.saturating_sub(rejected) < threshold {
        return TransactionState::Rejected;
    }

    TransactionState::Pending
}
