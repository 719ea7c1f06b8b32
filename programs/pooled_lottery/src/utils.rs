use anchor_lang::prelude::*;

use crate::{
    errors::LotteryError,
    state::{Entry, Round},
};

// -----------------
// Seeds
// -----------------
pub const CONFIG_SEED: &[u8] = b"config_v1";
pub const ROUND_REGISTRY_SEED: &[u8] = b"round_registry_v1";
pub const ROUND_SEED: &[u8] = b"round_v1";
pub const ENTRY_SEED: &[u8] = b"entry_v1";
pub const REQUEST_SEED: &[u8] = b"randomness_request_v1";
pub const POOL_VAULT_SEED: &[u8] = b"pool_vault_v1";

// -------------------------
// Entry snapshot
// -------------------------

/// The snapshot must list every entry record of the round exactly once,
/// in first-entry order, and add up to the round totals.
pub fn validate_snapshot(round: &Round, entries: &[Entry]) -> Result<()> {
    require!(
        entries.len() == round.participant_count as usize,
        LotteryError::EntrySnapshotMismatch
    );

    let mut total: u64 = 0;
    for (i, entry) in entries.iter().enumerate() {
        require!(entry.round_id == round.round_id, LotteryError::EntrySnapshotMismatch);
        require!(entry.index as usize == i, LotteryError::EntrySnapshotMismatch);
        total = total.checked_add(entry.entries).ok_or(LotteryError::Overflow)?;
    }
    require!(total == round.total_entries, LotteryError::EntrySnapshotMismatch);

    Ok(())
}

pub fn snapshot_weights(entries: &[Entry]) -> Vec<(Pubkey, u64)> {
    entries.iter().map(|e| (e.participant, e.entries)).collect()
}

/// Reads an Entry passed through remaining accounts and checks its PDA.
pub fn load_entry(program_id: &Pubkey, ai: &AccountInfo) -> Result<Entry> {
    require_keys_eq!(*ai.owner, *program_id, LotteryError::EntryPdaMismatch);

    let data = ai
        .try_borrow_data()
        .map_err(|_| error!(LotteryError::AccountBorrowFailed))?;
    let mut slice: &[u8] = &data;
    let entry = Entry::try_deserialize(&mut slice)?;

    let round_le = entry.round_id.to_le_bytes();
    let expected = Pubkey::create_program_address(
        &[
            ENTRY_SEED,
            round_le.as_ref(),
            entry.participant.as_ref(),
            &[entry.bump],
        ],
        program_id,
    )
    .map_err(|_| error!(LotteryError::EntryPdaMismatch))?;
    require_keys_eq!(expected, *ai.key, LotteryError::EntryPdaMismatch);

    Ok(entry)
}

pub fn load_entry_snapshot(
    program_id: &Pubkey,
    round: &Round,
    accounts: &[AccountInfo],
) -> Result<Vec<Entry>> {
    let entries = accounts
        .iter()
        .map(|ai| load_entry(program_id, ai))
        .collect::<Result<Vec<_>>>()?;
    validate_snapshot(round, &entries)?;
    Ok(entries)
}

pub fn store_entry(ai: &AccountInfo, entry: &Entry) -> Result<()> {
    store_account(ai, entry, LotteryError::EntryPdaMismatch)
}

fn store_account<T: AccountSerialize>(ai: &AccountInfo, value: &T, not_writable: LotteryError) -> Result<()> {
    if !ai.is_writable {
        return Err(not_writable.into());
    }

    let mut data = ai
        .try_borrow_mut_data()
        .map_err(|_| error!(LotteryError::AccountBorrowFailed))?;
    let mut w = std::io::Cursor::new(&mut data[..]);
    value.try_serialize(&mut w)?;

    Ok(())
}

// -------------------------
// Rounds
// -------------------------

/// Rounds are taken unchecked (address bound by seeds) so that an id the
/// registry never handed out surfaces as `RoundNotFound`.
pub fn load_round(program_id: &Pubkey, ai: &AccountInfo) -> Result<Round> {
    if ai.data_is_empty() {
        return err!(LotteryError::RoundNotFound);
    }
    require_keys_eq!(*ai.owner, *program_id, LotteryError::RoundNotFound);

    let data = ai
        .try_borrow_data()
        .map_err(|_| error!(LotteryError::AccountBorrowFailed))?;
    let mut slice: &[u8] = &data;
    Round::try_deserialize(&mut slice)
}

pub fn store_round(ai: &AccountInfo, round: &Round) -> Result<()> {
    store_account(ai, round, LotteryError::AccountBorrowFailed)
}

/// For views: a participant without an entry record simply has nothing.
pub fn read_entry(program_id: &Pubkey, ai: &AccountInfo) -> Result<Option<Entry>> {
    if ai.data_is_empty() {
        return Ok(None);
    }
    load_entry(program_id, ai).map(Some)
}
