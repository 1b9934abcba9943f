use anchor_lang::prelude::*;

use crate::approval::tally;
use crate::constants::{MAX_INSTRUCTION_DATA, MAX_TRANSACTION_ACCOUNTS, TRANSACTION_SEED};
use crate::error::LeagueError;
use crate::state::{League, Transaction, TransactionAccount, Vote};

// ---------------------------------------------------------------------------
// Create Transaction
// ---------------------------------------------------------------------------
// Stores an instruction for the league to vote on. The proposer's vote is
// cast as an approval immediately, so a 1-of-N league accepts on creation.
// ---------------------------------------------------------------------------

#[derive(Accounts)]
#[instruction(target_program: Pubkey, target_accounts: Vec<TransactionAccount>, payload: Vec<u8>)]
pub struct CreateTransaction<'info> {
    #[account(mut)]
    pub league: Account<'info, League>,

    #[account(
        init,
        payer = payer,
        space = Transaction::space(target_accounts.len(), payload.len(), league.members.len()),
        seeds = [TRANSACTION_SEED, league.key().as_ref(), &league.tx_count.to_le_bytes()],
        bump
    )]
    pub transaction: Account<'info, Transaction>,

    #[account(constraint = league.is_member(member.key) @ LeagueError::Unauthorized)]
    pub member: Signer<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> CreateTransaction<'info> {
    pub fn create_transaction(
        &mut self,
        bumps: &CreateTransactionBumps,
        target_program: Pubkey,
        target_accounts: Vec<TransactionAccount>,
        payload: Vec<u8>,
        expiry: i64,
    ) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        require!(expiry == 0 || expiry > now, LeagueError::InvalidExpiry);
        validate_instruction(
            &target_program,
            &target_accounts,
            &payload,
            &self.league.authority,
        )?;

        let position = self
            .league
            .member_position(self.member.key)
            .ok_or(LeagueError::Unauthorized)?;

        let index = self.league.tx_count;
        self.league.tx_count = index.checked_add(1).ok_or(LeagueError::MathOverflow)?;

        let mut approvals = vec![Vote::Unset; self.league.members.len()];
        approvals[position] = Vote::Approved;
        let state = tally(&approvals, self.league.threshold);

        self.transaction.set_inner(Transaction {
            league: self.league.key(),
            proposer: self.member.key(),
            program: target_program,
            index,
            config_version: self.league.config_version,
            created_at: now,
            expiry,
            state,
            bump: bumps.transaction,
            accounts: target_accounts,
            data: payload,
            approvals,
        });

        msg!("Transaction {} proposed by {}", index, self.member.key());
        msg!("Target program {}, state {:?}", target_program, state);
        Ok(())
    }
}

/// Rejects instructions the league could not replay through its authority.
///
/// The only signature available at execution time is the derived
/// authority's, so no other account may be flagged as a signer.
pub fn validate_instruction(
    program: &Pubkey,
    accounts: &[TransactionAccount],
    data: &[u8],
    authority: &Pubkey,
) -> Result<()> {
    require_keys_neq!(*program, Pubkey::default(), LeagueError::InvalidInstruction);
    require!(
        accounts.len() <= MAX_TRANSACTION_ACCOUNTS,
        LeagueError::InvalidInstruction
    );
    require!(
        data.len() <= MAX_INSTRUCTION_DATA,
        LeagueError::InvalidInstruction
    );
    require!(
        accounts
            .iter()
            .all(|a| !a.is_signer || a.pubkey == *authority),
        LeagueError::InvalidInstruction
    );
    Ok(())
}
