use anchor_lang::prelude::*;
use anchor_lang::solana_program::program::invoke_signed;

use crate::authority::authority_signer_seeds;
use crate::error::LeagueError;
use crate::state::{League, Transaction, TransactionAccount, TransactionState};

// ---------------------------------------------------------------------------
// Execute Transaction
// ---------------------------------------------------------------------------
// Replays an accepted instruction with the derived authority as signer.
// The caller passes the stored accounts, in order, as remaining accounts,
// optionally followed by the target program.
// ---------------------------------------------------------------------------

#[derive(Accounts)]
pub struct ExecTransaction<'info> {
    pub league: Account<'info, League>,

    #[account(mut, has_one = league @ LeagueError::AccountMismatch)]
    pub transaction: Account<'info, Transaction>,
}

impl<'info> ExecTransaction<'info> {
    pub fn exec_transaction(&mut self, remaining_accounts: &[AccountInfo<'info>]) -> Result<()> {
        require!(
            self.transaction.state == TransactionState::Accepted,
            LeagueError::InvalidState
        );
        require_eq!(
            self.transaction.config_version,
            self.league.config_version,
            LeagueError::StaleTransaction
        );

        let now = Clock::get()?.unix_timestamp;
        require!(!self.transaction.is_expired(now), LeagueError::Expired);

        let supplied: Vec<(Pubkey, bool)> = remaining_accounts
            .iter()
            .map(|a| (*a.key, a.is_writable))
            .collect();
        match_accounts(&self.transaction.accounts, &self.transaction.program, &supplied)?;

        // Written back on exit; a failed replay rolls the state back to Accepted.
        self.transaction.state = TransactionState::Executed;

        let ix = self.transaction.to_instruction();
        let league_key = self.league.key();
        let bump = [self.league.authority_bump];
        let seeds = authority_signer_seeds(&league_key, &bump);
        let signer_seeds = &[&seeds[..]];

        invoke_signed(&ix, remaining_accounts, signer_seeds)?;

        msg!(
            "Transaction {} executed against {}",
            self.transaction.index,
            self.transaction.program
        );
        Ok(())
    }
}

/// Position-for-position identity check of the supplied accounts.
///
/// `supplied` is `(key, is_writable)`. It must list the stored accounts in
/// order, optionally followed by the target program and nothing else.
pub fn match_accounts(
    stored: &[TransactionAccount],
    program: &Pubkey,
    supplied: &[(Pubkey, bool)],
) -> Result<()> {
    require!(supplied.len() >= stored.len(), LeagueError::AccountMismatch);

    for (expected, (key, is_writable)) in stored.iter().zip(supplied) {
        require_keys_eq!(expected.pubkey, *key, LeagueError::AccountMismatch);
        require!(
            !expected.is_writable || *is_writable,
            LeagueError::AccountMismatch
        );
    }

    match &supplied[stored.len()..] {
        [] => Ok(()),
        [(key, _)] if key == program => Ok(()),
        _ => err!(LeagueError::AccountMismatch),
    }
}
