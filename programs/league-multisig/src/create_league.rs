use anchor_lang::prelude::*;

use crate::authority::verify_authority;
use crate::constants::{LEAGUE_SEED, MAX_MEMBERS};
use crate::error::LeagueError;
use crate::state::{validate_members, ExpiryPolicy, League};

// ---------------------------------------------------------------------------
// Create League
// ---------------------------------------------------------------------------
// Allocates the registry entry at ["league", create_key] and records the
// derived authority that will hold the league's funds.
// ---------------------------------------------------------------------------

#[derive(Accounts)]
#[instruction(members: Vec<Pubkey>, threshold: u64, authority_bump: u8, max_members: u16)]
pub struct CreateLeague<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// CHECK: only contributes its key to the league seeds
    pub create_key: UncheckedAccount<'info>,

    #[account(
        init,
        payer = payer,
        space = League::space(usize::from(max_members).min(MAX_MEMBERS)),
        seeds = [LEAGUE_SEED, create_key.key().as_ref()],
        bump
    )]
    pub league: Account<'info, League>,

    /// CHECK: derived authority, verified against `authority_bump` in the handler
    pub authority: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> CreateLeague<'info> {
    pub fn create_league(
        &mut self,
        bumps: &CreateLeagueBumps,
        members: Vec<Pubkey>,
        threshold: u64,
        authority_bump: u8,
        max_members: u16,
        expiry_policy: ExpiryPolicy,
    ) -> Result<()> {
        let capacity = usize::from(max_members);
        require!(capacity <= MAX_MEMBERS, LeagueError::TooManyMembers);
        validate_members(&members, threshold, capacity)?;

        let league_key = self.league.key();
        verify_authority(&league_key, &crate::ID, &self.authority.key(), authority_bump)?;

        self.league.set_inner(League {
            create_key: self.create_key.key(),
            authority: self.authority.key(),
            threshold,
            tx_count: 0,
            config_version: 0,
            max_members,
            expiry_policy,
            bump: bumps.league,
            authority_bump,
            members,
        });

        msg!("League {} created with authority {}", league_key, self.authority.key());
        msg!(
            "Threshold {} of {} (capacity {})",
            threshold,
            self.league.members.len(),
            max_members
        );
        Ok(())
    }
}
