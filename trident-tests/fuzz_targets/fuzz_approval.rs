//! Fuzz test for the league approval engine
//!
//! Generates random league sizes, thresholds and vote sequences, replays
//! them the way `approve_transaction` does (votes stop once the transaction
//! settles) and checks every resulting state against an independent oracle.

use league_multisig::approval::tally;
use league_multisig::constants::MAX_MEMBERS;
use league_multisig::state::{TransactionState, Vote};

/// Fuzz data - the inputs we're randomizing
#[derive(Debug, Clone)]
pub struct VoteFuzzData {
    /// League size N
    pub members: usize,
    /// Threshold M, 1..=N
    pub threshold: u64,
    /// (member position, approve) in casting order; position 0 proposed
    pub votes: Vec<(usize, bool)>,
}

impl VoteFuzzData {
    pub fn from_seed(seed: u64) -> Self {
        let members = (rand_u64(seed) % MAX_MEMBERS as u64) as usize + 1;
        let threshold = rand_u64(seed ^ 0xA5A5) % members as u64 + 1;
        let len = (rand_u64(seed ^ 0x5A5A) % (2 * members as u64 + 1)) as usize;
        let votes = (0..len)
            .map(|i| {
                let r = rand_u64(seed.wrapping_mul(31).wrapping_add(i as u64));
                ((r % members as u64) as usize, r & (1 << 40) != 0)
            })
            .collect();
        Self {
            members,
            threshold,
            votes,
        }
    }
}

/// Oracle: phrased in terms of the best case still open to the league.
fn expected_state(approvals: &[Vote], threshold: u64) -> TransactionState {
    let approved = approvals.iter().filter(|v| **v == Vote::Approved).count() as u64;
    let unset = approvals.iter().filter(|v| **v == Vote::Unset).count() as u64;

    if approved >= threshold {
        TransactionState::Accepted
    } else if approved + unset < threshold {
        TransactionState::Rejected
    } else {
        TransactionState::Pending
    }
}

/// Replays the proposal and its votes, returning every state observed.
fn replay(data: &VoteFuzzData) -> Vec<TransactionState> {
    let mut approvals = vec![Vote::Unset; data.members];
    approvals[0] = Vote::Approved;
    let mut state = tally(&approvals, data.threshold);
    let mut states = vec![state];

    for &(position, approve) in &data.votes {
        if state != TransactionState::Pending {
            // approve_transaction refuses votes on settled transactions
            break;
        }
        approvals[position] = if approve { Vote::Approved } else { Vote::Rejected };
        state = tally(&approvals, data.threshold);
        assert_eq!(
            state,
            expected_state(&approvals, data.threshold),
            "engine disagrees with oracle for {:?} at {:?}",
            data,
            approvals
        );
        states.push(state);
    }
    states
}

/// Property: states only move Pending -> Accepted | Rejected, never back.
fn check_transitions(states: &[TransactionState]) -> bool {
    states.windows(2).all(|w| match (w[0], w[1]) {
        (TransactionState::Pending, _) => true,
        (settled, next) => settled == next,
    }) && states
        .iter()
        .all(|s| *s != TransactionState::Executed)
}

/// Property: N - M + 1 rejections settle as Rejected unless M approvals exist.
fn check_rejection_boundary(members: usize, threshold: u64) -> bool {
    let rejections = members - threshold as usize + 1;
    let mut approvals = vec![Vote::Unset; members];
    for slot in approvals.iter_mut().take(rejections) {
        *slot = Vote::Rejected;
    }
    let one_short = {
        let mut a = approvals.clone();
        a[0] = Vote::Unset;
        tally(&a, threshold)
    };
    tally(&approvals, threshold) == TransactionState::Rejected
        && one_short == TransactionState::Pending
}


/// Simple pseudo-random number generator for testing
fn rand_u64(seed: u64) -> u64 {
    let mut x = seed.wrapping_add(0x9E3779B97F4A7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}

// Entry point for trident fuzzer (when using full trident)
fn main() {
    let mut settled = 0usize;
    for i in 0..10_000 {
        let data = VoteFuzzData::from_seed(i);
        let states = replay(&data);
        assert!(check_transitions(&states), "iteration {}: {:?}", i, data);
        if states.last() != Some(&TransactionState::Pending) {
            settled += 1;
        }
    }
    println!("League Approval Fuzz Test");
    println!("=========================");
    println!("10000 vote sequences replayed, {} settled", settled);
    println!("Run unit tests with: cargo test");
    println!("Run full fuzzer with: trident fuzz run fuzz_approval");
}
