//! Seeds and capacity limits

/// Seed prefix of the league registry PDA: `["league", create_key]`.
pub const LEAGUE_SEED: &[u8] = b"league";

/// Seed prefix of the derived authority: `["league_signer", league]`.
pub const LEAGUE_SIGNER_SEED: &[u8] = b"league_signer";

/// Seed prefix of a proposal: `["transaction", league, index_le]`.
pub const TRANSACTION_SEED: &[u8] = b"transaction";

/// Upper bound on `max_members` chosen at league creation.
pub const MAX_MEMBERS: usize = 32;

/// Accounts a stored instruction may reference.
pub const MAX_TRANSACTION_ACCOUNTS: usize = 24;

/// Payload bytes a stored instruction may carry.
///
/// Fits a `set_league` call naming `MAX_MEMBERS` members: discriminator,
/// vector length prefix, the keys and the threshold.
pub const MAX_INSTRUCTION_DATA: usize = 8 + 4 + 32 * MAX_MEMBERS + 8;
