//! State definitions for leagues and their transactions

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};

use crate::approval::tally;
use crate::error::LeagueError;

/// What a non-zero transaction expiry blocks.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExpiryPolicy {
    /// Expiry only blocks execution.
    #[default]
    Advisory,
    /// Expiry blocks execution and further votes.
    Strict,
}

/// The league registry entry.
///
/// Storage is sized for `max_members` at creation and never resized, so
/// self-governance can shrink or grow the member list only within that bound.
#[account]
pub struct League {
    /// Key the league PDA was derived from
    pub create_key: Pubkey,
    /// Derived authority holding the league's funds and permissions
    pub authority: Pubkey,
    /// Approvals needed to accept a transaction
    pub threshold: u64,
    /// Index of the next transaction; only ever increases
    pub tx_count: u64,
    /// Bumped on every membership/threshold change
    pub config_version: u32,
    /// Capacity of `members`
    pub max_members: u16,
    pub expiry_policy: ExpiryPolicy,
    /// Bump seed for the league PDA
    pub bump: u8,
    /// Bump seed for the derived authority
    pub authority_bump: u8,
    pub members: Vec<Pubkey>,
}

impl League {
    const FIXED_LEN: usize = 8 // discriminator
        + 32 // create_key
        + 32 // authority
        + 8 // threshold
        + 8 // tx_count
        + 4 // config_version
        + 2 // max_members
        + 1 // expiry_policy
        + 1 // bump
        + 1 // authority_bump
        + 4; // members length prefix

    /// Account size for a league holding up to `max_members` members.
    pub fn space(max_members: usize) -> usize {
        Self::FIXED_LEN + max_members * 32
    }

    pub fn member_position(&self, key: &Pubkey) -> Option<usize> {
        self.members.iter().position(|m| m == key)
    }

    pub fn is_member(&self, key: &Pubkey) -> bool {
        self.member_position(key).is_some()
    }
}

/// Checks a member list and threshold before they are written to a league.
pub fn validate_members(members: &[Pubkey], threshold: u64, capacity: usize) -> Result<()> {
    require!(!members.is_empty(), LeagueError::NoMembers);
    require!(members.len() <= capacity, LeagueError::TooManyMembers);

    for (i, member) in members.iter().enumerate() {
        require!(
            !members[i + 1..].contains(member),
            LeagueError::DuplicateMember
        );
    }

    require!(
        threshold >= 1 && threshold <= members.len() as u64,
        LeagueError::InvalidThreshold
    );
    Ok(())
}

/// One member's slot in a transaction's approval vector.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Vote {
    #[default]
    Unset,
    Approved,
    Rejected,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransactionState {
    #[default]
    Pending,
    Accepted,
    Rejected,
    Executed,
}

/// An account referenced by a stored instruction.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct TransactionAccount {
    pub pubkey: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl TransactionAccount {
    pub const LEN: usize = 32 + 1 + 1;
}

impl From<&TransactionAccount> for AccountMeta {
    fn from(account: &TransactionAccount) -> Self {
        AccountMeta {
            pubkey: account.pubkey,
            is_signer: account.is_signer,
            is_writable: account.is_writable,
        }
    }
}

impl From<AccountMeta> for TransactionAccount {
    fn from(meta: AccountMeta) -> Self {
        TransactionAccount {
            pubkey: meta.pubkey,
            is_signer: meta.is_signer,
            is_writable: meta.is_writable,
        }
    }
}

/// A proposed instruction and the votes cast on it.
#[account]
pub struct Transaction {
    /// League this transaction belongs to
    pub league: Pubkey,
    /// Member that created the transaction
    pub proposer: Pubkey,
    /// Program the stored instruction targets
    pub program: Pubkey,
    /// `tx_count` of the league when this transaction was created
    pub index: u64,
    /// League `config_version` the approvals are aligned with
    pub config_version: u32,
    /// Unix timestamp of creation
    pub created_at: i64,
    /// Unix timestamp deadline, zero for none
    pub expiry: i64,
    pub state: TransactionState,
    /// Bump seed for the transaction PDA
    pub bump: u8,
    pub accounts: Vec<TransactionAccount>,
    pub data: Vec<u8>,
    /// Positionally aligned with `League::members`
    pub approvals: Vec<Vote>,
}

impl Transaction {
    const FIXED_LEN: usize = 8 // discriminator
        + 32 // league
        + 32 // proposer
        + 32 // program
        + 8 // index
        + 4 // config_version
        + 8 // created_at
        + 8 // expiry
        + 1 // state
        + 1 // bump
        + 4 // accounts length prefix
        + 4 // data length prefix
        + 4; // approvals length prefix

    pub fn space(accounts: usize, data: usize, members: usize) -> usize {
        Self::FIXED_LEN + accounts * TransactionAccount::LEN + data + members
    }

    pub fn is_expired(&self, now: i64) -> bool {
        self.expiry != 0 && now > self.expiry
    }

    /// Records `vote` in slot `position` and re-evaluates the state.
    pub fn cast(&mut self, position: usize, vote: Vote, threshold: u64) -> Result<()> {
        require!(
            self.state == TransactionState::Pending,
            LeagueError::InvalidState
        );
        let slot = self
            .approvals
            .get_mut(position)
            .ok_or(LeagueError::Unauthorized)?;
        *slot = vote;
        self.state = tally(&self.approvals, threshold);
        Ok(())
    }

    /// The stored instruction exactly as it was proposed.
    pub fn to_instruction(&self) -> Instruction {
        Instruction {
            program_id: self.program,
            accounts: self.accounts.iter().map(AccountMeta::from).collect(),
            data: self.data.clone(),
        }
    }
}
