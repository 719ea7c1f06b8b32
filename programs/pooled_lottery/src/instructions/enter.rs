use anchor_lang::prelude::*;

use crate::errors::LotteryError;
use crate::events::{EntryRecorded, ThresholdReached};
use crate::{ledger, utils};
use crate::EnterLottery;

/// Buys `num_entries` tickets in an open round. The token pull and every
/// counter update share one transaction, so a failed payment leaves nothing behind.
pub fn enter_lottery(ctx: Context<EnterLottery>, round_id: u64, num_entries: u64) -> Result<()> {
    ctx.accounts.config.assert_accepting_entries()?;
    require!(num_entries > 0, LotteryError::InvalidParameter);

    let round_ai = ctx.accounts.round.to_account_info();
    let mut round = utils::load_round(ctx.program_id, &round_ai)?;
    require!(!round.lottery_ended, LotteryError::RoundClosed);

    let now = Clock::get()?.unix_timestamp;
    let participant = ctx.accounts.participant.key();
    let cost = round.entry_cost(num_entries)?;

    let entry = &mut ctx.accounts.entry;
    if !entry.is_registered() {
        let index = round.register_participant()?;
        entry.register(round_id, participant, ctx.bumps.entry, index, now);
    }

    ledger::pull_into_pool(
        &ctx.accounts.token_program,
        &ctx.accounts.participant_token,
        &ctx.accounts.pool_vault,
        &ctx.accounts.participant,
        cost,
    )?;

    entry.add_entries(num_entries, now)?;
    let crossed = round.record_contribution(cost, num_entries, now)?;
    ctx.accounts.config.record_contribution(cost)?;
    utils::store_round(&round_ai, &round)?;

    emit!(EntryRecorded {
        round_id,
        participant,
        amount: cost,
        num_entries,
        total_entries: round.total_entries,
        total_prize_pool: round.total_prize_pool,
    });

    if crossed {
        msg!(
            "round {} threshold reached, deadline={}",
            round_id,
            round.deadline_time
        );
        emit!(ThresholdReached {
            round_id,
            threshold_amount: round.threshold_amount,
            deadline_time: round.deadline_time,
        });
    }

    Ok(())
}
