//! Derived authority
//!
//! Each league acts through a PDA at `["league_signer", league]`. No private
//! key exists for it; the program signs for it by presenting the seeds and
//! the stored bump to `invoke_signed`.

use anchor_lang::prelude::*;

use crate::constants::LEAGUE_SIGNER_SEED;
use crate::error::LeagueError;

/// Finds the authority address and canonical bump for `league`.
pub fn derive_authority(league: &Pubkey, program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    Pubkey::try_find_program_address(&[LEAGUE_SIGNER_SEED, league.as_ref()], program_id)
        .ok_or_else(|| error!(LeagueError::DerivationFailure))
}

/// Checks that `authority` and `bump` are the canonical derivation for `league`.
pub fn verify_authority(
    league: &Pubkey,
    program_id: &Pubkey,
    authority: &Pubkey,
    bump: u8,
) -> Result<()> {
    let (expected, canonical_bump) = derive_authority(league, program_id)?;
    require_eq!(bump, canonical_bump, LeagueError::DerivationFailure);
    require_keys_eq!(expected, *authority, LeagueError::DerivationFailure);
    Ok(())
}

/// Signer seeds for `invoke_signed` on behalf of the league authority.
pub fn authority_signer_seeds<'a>(league: &'a Pubkey, bump: &'a [u8; 1]) -> [&'a [u8]; 3] {
    [LEAGUE_SIGNER_SEED, league.as_ref(), bump]
}
