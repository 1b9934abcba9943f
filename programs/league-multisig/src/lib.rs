//! League Multisig - Anchor Program
//!
//! A league is a fixed group of members that controls a derived authority
//! PDA. Any member proposes an instruction, members vote on it, and once
//! `threshold` approvals are in, anyone can execute it: the program replays
//! the stored instruction and signs for the authority with its seeds.
//!
//! Membership and threshold changes go through the same path by proposing
//! a `set_league` instruction against the league itself.

#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod approval;
pub mod authority;
pub mod constants;
pub mod error;
pub mod state;

pub mod approve_transaction;
pub mod create_league;
pub mod create_transaction;
pub mod exec_transaction;
pub mod set_league;

use approve_transaction::*;
use create_league::*;
use create_transaction::*;
use exec_transaction::*;
use set_league::*;
use state::{ExpiryPolicy, TransactionAccount};

declare_id!("LeagueMu1tisig11111111111111111111111111111");

#[program]
pub mod league_multisig {
    use super::*;

    /// Create a league and record its derived authority.
    pub fn create_league(
        ctx: Context<CreateLeague>,
        members: Vec<Pubkey>,
        threshold: u64,
        authority_bump: u8,
        max_members: u16,
        expiry_policy: ExpiryPolicy,
    ) -> Result<()> {
        ctx.accounts.create_league(
            &ctx.bumps,
            members,
            threshold,
            authority_bump,
            max_members,
            expiry_policy,
        )
    }

    /// Propose an instruction; the proposer approves it implicitly.
    pub fn create_transaction(
        ctx: Context<CreateTransaction>,
        target_program: Pubkey,
        target_accounts: Vec<TransactionAccount>,
        payload: Vec<u8>,
        expiry: i64,
    ) -> Result<()> {
        ctx.accounts.create_transaction(
            &ctx.bumps,
            target_program,
            target_accounts,
            payload,
            expiry,
        )
    }

    /// Approve or reject a pending transaction.
    pub fn approve_transaction(ctx: Context<ApproveTransaction>, approve: bool) -> Result<()> {
        ctx.accounts.approve_transaction(approve)
    }

    /// Execute an accepted transaction, signing as the league authority.
    pub fn exec_transaction<'info>(
        ctx: Context<'_, '_, 'info, 'info, ExecTransaction<'info>>,
    ) -> Result<()> {
        ctx.accounts.exec_transaction(ctx.remaining_accounts)
    }

    /// Replace members and threshold. Requires the league authority's signature.
    pub fn set_league(ctx: Context<SetLeague>, members: Vec<Pubkey>, threshold: u64) -> Result<()> {
        ctx.accounts.set_league(members, threshold)
    }
}
