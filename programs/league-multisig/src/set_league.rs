use anchor_lang::prelude::*;

use crate::error::LeagueError;
use crate::state::{validate_members, League};

// ---------------------------------------------------------------------------
// Set League
// ---------------------------------------------------------------------------
// Replaces the member list and threshold. The derived authority must sign,
// which only `exec_transaction` can arrange, so this runs exclusively as the
// target of an accepted league transaction.
// ---------------------------------------------------------------------------

#[derive(Accounts)]
pub struct SetLeague<'info> {
    #[account(mut, has_one = authority @ LeagueError::Unauthorized)]
    pub league: Account<'info, League>,

    pub authority: Signer<'info>,
}

impl<'info> SetLeague<'info> {
    pub fn set_league(&mut self, members: Vec<Pubkey>, threshold: u64) -> Result<()> {
        validate_members(&members, threshold, usize::from(self.league.max_members))?;

        let league = &mut self.league;
        league.members = members;
        league.threshold = threshold;
        league.config_version = league
            .config_version
            .checked_add(1)
            .ok_or(LeagueError::MathOverflow)?;

        msg!(
            "League reconfigured: threshold {} of {}, version {}",
            league.threshold,
            league.members.len(),
            league.config_version
        );
        Ok(())
    }
}
