//! LiteSVM harness shared by the league program tests.
//!
//! The program is loaded from `target/deploy/league_multisig.so`, so run
//! `anchor build` first.

use std::path::PathBuf;

use anchor_lang::{AccountDeserialize, InstructionData, ToAccountMetas};
use league_multisig::{
    accounts,
    authority::derive_authority,
    constants::{LEAGUE_SEED, TRANSACTION_SEED},
    error::LeagueError,
    instruction,
    state::{ExpiryPolicy, League, Transaction as LeagueTransaction, TransactionAccount},
};
use litesvm::{
    types::{FailedTransactionMetadata, TransactionResult},
    LiteSVM,
};
use solana_clock::Clock;
use solana_instruction::{error::InstructionError, AccountMeta, Instruction};
use solana_keypair::Keypair;
use solana_native_token::LAMPORTS_PER_SOL;
use solana_pubkey::Pubkey;
use solana_signer::Signer;
use solana_transaction::Transaction;
use solana_transaction_error::TransactionError;

pub const PROGRAM_ID: Pubkey = league_multisig::ID;

/// Unix time the test clock starts at.
pub const START_TIME: i64 = 1_700_000_000;

pub fn read_program() -> Vec<u8> {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("../target/deploy/league_multisig.so");
    std::fs::read(path).expect("Failed to read program, run `anchor build` first")
}

pub fn members(n: usize) -> Vec<Keypair> {
    (0..n).map(|_| Keypair::new()).collect()
}

pub fn pubkeys(keypairs: &[Keypair]) -> Vec<Pubkey> {
    keypairs.iter().map(|k| k.pubkey()).collect()
}

pub fn league_pda(create_key: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[LEAGUE_SEED, create_key.as_ref()], &PROGRAM_ID)
}

pub fn transaction_pda(league: &Pubkey, index: u64) -> Pubkey {
    Pubkey::find_program_address(
        &[TRANSACTION_SEED, league.as_ref(), &index.to_le_bytes()],
        &PROGRAM_ID,
    )
    .0
}

/// Addresses of a created league.
#[derive(Clone, Copy, Debug)]
pub struct LeagueKeys {
    pub league: Pubkey,
    pub authority: Pubkey,
}

/// Asserts that `result` failed inside the program with `expected`.
pub fn assert_league_error<T: std::fmt::Debug>(
    result: Result<T, FailedTransactionMetadata>,
    expected: LeagueError,
) {
    let failed = result.expect_err("transaction should fail");
    assert_eq!(
        failed.err,
        TransactionError::InstructionError(0, InstructionError::Custom(u32::from(expected))),
        "logs: {:#?}",
        failed.meta.logs
    );
}

pub struct TestEnv {
    pub svm: LiteSVM,
    pub payer: Keypair,
}

impl TestEnv {
    pub fn new() -> Self {
        let mut svm = LiteSVM::new();
        svm.add_program(PROGRAM_ID, &read_program())
            .expect("failed to add program");

        let payer = Keypair::new();
        svm.airdrop(&payer.pubkey(), 100 * LAMPORTS_PER_SOL)
            .expect("Airdrop failed");

        let mut env = Self { svm, payer };
        env.set_time(START_TIME);
        env
    }

    pub fn set_time(&mut self, unix_timestamp: i64) {
        let mut clock = self.svm.get_sysvar::<Clock>();
        clock.unix_timestamp = unix_timestamp;
        self.svm.set_sysvar(&clock);
    }

    pub fn balance(&self, key: &Pubkey) -> u64 {
        self.svm.get_balance(key).unwrap_or(0)
    }

    /// Sends `ix` paid by the env payer and signed by `signers`.
    pub fn send(&mut self, ix: Instruction, signers: &[&Keypair]) -> TransactionResult {
        let mut all: Vec<&Keypair> = vec![&self.payer];
        all.extend_from_slice(signers);

        let blockhash = self.svm.latest_blockhash();
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&self.payer.pubkey()),
            all.as_slice(),
            blockhash,
        );
        let result = self.svm.send_transaction(tx);
        self.svm.expire_blockhash();
        result
    }

    pub fn league(&self, key: &Pubkey) -> League {
        let account = self.svm.get_account(key).expect("league account missing");
        League::try_deserialize(&mut account.data.as_slice()).expect("not a league")
    }

    pub fn transaction(&self, key: &Pubkey) -> LeagueTransaction {
        let account = self
            .svm
            .get_account(key)
            .expect("transaction account missing");
        LeagueTransaction::try_deserialize(&mut account.data.as_slice())
            .expect("not a league transaction")
    }

    pub fn create_league_with_bump(
        &mut self,
        create_key: Pubkey,
        members: &[Pubkey],
        threshold: u64,
        authority_bump: u8,
        max_members: u16,
        expiry_policy: ExpiryPolicy,
    ) -> Result<LeagueKeys, FailedTransactionMetadata> {
        let (league, _) = league_pda(&create_key);
        let (authority, _) = derive_authority(&league, &PROGRAM_ID).expect("derivation");

        let accounts = accounts::CreateLeague {
            payer: self.payer.pubkey(),
            create_key,
            league,
            authority,
            system_program: solana_sdk_ids::system_program::ID,
        };
        let ix = Instruction {
            program_id: PROGRAM_ID,
            accounts: accounts.to_account_metas(None),
            data: instruction::CreateLeague {
                members: members.to_vec(),
                threshold,
                authority_bump,
                max_members,
                expiry_policy,
            }
            .data(),
        };

        self.send(ix, &[])?;
        Ok(LeagueKeys { league, authority })
    }

    pub fn create_league_with(
        &mut self,
        members: &[Pubkey],
        threshold: u64,
        max_members: u16,
        expiry_policy: ExpiryPolicy,
    ) -> Result<LeagueKeys, FailedTransactionMetadata> {
        let create_key = Pubkey::new_unique();
        let (league, _) = league_pda(&create_key);
        let (_, bump) = derive_authority(&league, &PROGRAM_ID).expect("derivation");
        self.create_league_with_bump(
            create_key,
            members,
            threshold,
            bump,
            max_members,
            expiry_policy,
        )
    }

    /// League sized exactly for `members`, advisory expiry.
    pub fn create_league(&mut self, members: &[Pubkey], threshold: u64) -> LeagueKeys {
        self.create_league_with(
            members,
            threshold,
            members.len() as u16,
            ExpiryPolicy::Advisory,
        )
        .expect("league creation failed")
    }

    pub fn propose(
        &mut self,
        keys: &LeagueKeys,
        member: &Keypair,
        target: &Instruction,
        expiry: i64,
    ) -> Result<Pubkey, FailedTransactionMetadata> {
        let index = self.league(&keys.league).tx_count;
        let transaction = transaction_pda(&keys.league, index);

        let accounts = accounts::CreateTransaction {
            league: keys.league,
            transaction,
            member: member.pubkey(),
            payer: self.payer.pubkey(),
            system_program: solana_sdk_ids::system_program::ID,
        };
        let ix = Instruction {
            program_id: PROGRAM_ID,
            accounts: accounts.to_account_metas(None),
            data: instruction::CreateTransaction {
                target_program: target.program_id,
                target_accounts: target
                    .accounts
                    .iter()
                    .cloned()
                    .map(TransactionAccount::from)
                    .collect(),
                payload: target.data.clone(),
                expiry,
            }
            .data(),
        };

        self.send(ix, &[member])?;
        Ok(transaction)
    }

    pub fn approve(
        &mut self,
        keys: &LeagueKeys,
        transaction: &Pubkey,
        member: &Keypair,
        approve: bool,
    ) -> TransactionResult {
        let accounts = accounts::ApproveTransaction {
            league: keys.league,
            transaction: *transaction,
            member: member.pubkey(),
        };
        let ix = Instruction {
            program_id: PROGRAM_ID,
            accounts: accounts.to_account_metas(None),
            data: instruction::ApproveTransaction { approve }.data(),
        };
        self.send(ix, &[member])
    }

    /// Remaining accounts for executing `transaction`: the stored list with
    /// signer flags cleared, then the target program.
    pub fn replay_accounts(&self, transaction: &Pubkey) -> Vec<AccountMeta> {
        let stored = self.transaction(transaction);
        let mut metas: Vec<AccountMeta> = stored
            .accounts
            .iter()
            .map(|a| AccountMeta {
                pubkey: a.pubkey,
                is_signer: false,
                is_writable: a.is_writable,
            })
            .collect();
        metas.push(AccountMeta::new_readonly(stored.program, false));
        metas
    }

    pub fn exec_with(
        &mut self,
        keys: &LeagueKeys,
        transaction: &Pubkey,
        remaining: Vec<AccountMeta>,
    ) -> TransactionResult {
        let accounts = accounts::ExecTransaction {
            league: keys.league,
            transaction: *transaction,
        };
        let mut metas = accounts.to_account_metas(None);
        metas.extend(remaining);

        let ix = Instruction {
            program_id: PROGRAM_ID,
            accounts: metas,
            data: instruction::ExecTransaction {}.data(),
        };
        self.send(ix, &[])
    }

    pub fn exec(&mut self, keys: &LeagueKeys, transaction: &Pubkey) -> TransactionResult {
        let remaining = self.replay_accounts(transaction);
        self.exec_with(keys, transaction, remaining)
    }

    /// `set_league` as the league authority would sign it.
    pub fn set_league_ix(keys: &LeagueKeys, members: &[Pubkey], threshold: u64) -> Instruction {
        let accounts = accounts::SetLeague {
            league: keys.league,
            authority: keys.authority,
        };
        Instruction {
            program_id: PROGRAM_ID,
            accounts: accounts.to_account_metas(None),
            data: instruction::SetLeague {
                members: members.to_vec(),
                threshold,
            }
            .data(),
        }
    }
}
