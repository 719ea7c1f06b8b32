use anchor_lang::prelude::*;

use crate::state::RoundInfo;
use crate::utils::{load_round, read_entry};
use crate::{ReadEntry, ReadRegistry, ReadRound};

/// Latest round id handed out, 0 before the first round.
pub fn get_current_round_id(ctx: Context<ReadRegistry>) -> Result<u64> {
    Ok(ctx.accounts.round_registry.current_round_id())
}

pub fn get_round_info(ctx: Context<ReadRound>, _round_id: u64) -> Result<RoundInfo> {
    let round = load_round(ctx.program_id, &ctx.accounts.round.to_account_info())?;
    Ok(round.info())
}

pub fn get_entries(ctx: Context<ReadEntry>, _round_id: u64, participant: Pubkey) -> Result<u64> {
    load_round(ctx.program_id, &ctx.accounts.round.to_account_info())?;
    let entry = read_entry(ctx.program_id, &ctx.accounts.entry.to_account_info())?;
    Ok(entry
        .filter(|e| e.participant == participant)
        .map_or(0, |e| e.entries))
}

pub fn get_winnings(ctx: Context<ReadEntry>, _round_id: u64, participant: Pubkey) -> Result<u64> {
    load_round(ctx.program_id, &ctx.accounts.round.to_account_info())?;
    let entry = read_entry(ctx.program_id, &ctx.accounts.entry.to_account_info())?;
    Ok(entry
        .filter(|e| e.participant == participant)
        .map_or(0, |e| e.winnings))
}
