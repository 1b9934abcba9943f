//! Error definitions

use anchor_lang::prelude::*;

#[error_code]
pub enum LeagueError {
    #[msg("Caller is not a member of the league")]
    Unauthorized,
    #[msg("Threshold must be between 1 and the number of members")]
    InvalidThreshold,
    #[msg("Duplicate members")]
    DuplicateMember,
    #[msg("League needs at least one member")]
    NoMembers,
    #[msg("Member list exceeds the league capacity")]
    TooManyMembers,
    #[msg("Transaction is not in the required state")]
    InvalidState,
    #[msg("Supplied accounts do not match the stored instruction")]
    AccountMismatch,
    #[msg("Transaction has expired")]
    Expired,
    #[msg("Expiry must be zero or in the future")]
    InvalidExpiry,
    #[msg("Derived authority could not be reproduced")]
    DerivationFailure,
    #[msg("Instruction cannot be replayed by the league")]
    InvalidInstruction,
    #[msg("League configuration changed since the transaction was created")]
    StaleTransaction,
    #[msg("Arithmetic overflow")]
    MathOverflow,
}
