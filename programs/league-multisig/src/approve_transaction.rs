use anchor_lang::prelude::*;

use crate::error::LeagueError;
use crate::state::{ExpiryPolicy, League, Transaction, TransactionState, Vote};

// ---------------------------------------------------------------------------
// Approve Transaction
// ---------------------------------------------------------------------------
// Records a member's approval or rejection in their slot of the proposal and
// settles it once the threshold is met or a majority becomes unreachable.
// ---------------------------------------------------------------------------

#[derive(Accounts)]
pub struct ApproveTransaction<'info> {
    pub league: Account<'info, League>,

    #[account(mut, has_one = league @ LeagueError::AccountMismatch)]
    pub transaction: Account<'info, Transaction>,

    pub member: Signer<'info>,
}

impl<'info> ApproveTransaction<'info> {
    /// Casts or overwrites the member's vote, then re-runs the approval engine.
    pub fn approve_transaction(&mut self, approve: bool) -> Result<()> {
        require!(
            self.transaction.state == TransactionState::Pending,
            LeagueError::InvalidState
        );
        require_eq!(
            self.transaction.config_version,
            self.league.config_version,
            LeagueError::StaleTransaction
        );

        let position = self
            .league
            .member_position(self.member.key)
            .ok_or(LeagueError::Unauthorized)?;

        if self.league.expiry_policy == ExpiryPolicy::Strict {
            let now = Clock::get()?.unix_timestamp;
            require!(!self.transaction.is_expired(now), LeagueError::Expired);
        }

        let vote = if approve { Vote::Approved } else { Vote::Rejected };
        self.transaction
            .cast(position, vote, self.league.threshold)?;

        msg!(
            "Member {} voted {:?} on transaction {}",
            position,
            vote,
            self.transaction.index
        );
        msg!("Transaction state: {:?}", self.transaction.state);
        Ok(())
    }
}
