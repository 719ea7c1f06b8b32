use anchor_lang::prelude::*;

use crate::constants::MAX_RANDOM_WORDS;
use crate::errors::LotteryError;
use crate::events::{FeeCollected, PrizeDistributed, RandomnessRequested, RoundClosed, WinnersSelected};
use crate::{ledger, selection, utils};
use crate::{FulfillRandomness, RequestWinnerSelection};

/// Ends the round once its countdown elapsed and opens exactly one
/// randomness request for it. Callable by anyone.
pub fn request_winner_selection(ctx: Context<RequestWinnerSelection>, round_id: u64) -> Result<()> {
    ctx.accounts.config.assert_not_emergency()?;

    let round_ai = ctx.accounts.round.to_account_info();
    let mut round = utils::load_round(ctx.program_id, &round_ai)?;

    let now = Clock::get()?.unix_timestamp;

    let rr = &mut ctx.accounts.round_registry;
    let request_id = rr.next_request_id;
    round.close(now, request_id)?;
    rr.allocate_request_id()?;
    utils::store_round(&round_ai, &round)?;

    let req = &mut ctx.accounts.randomness_request;
    req.request_id = request_id;
    req.round_id = round_id;
    req.bump = ctx.bumps.randomness_request;
    req.requested_at = now;
    req.fulfilled = false;
    req.fulfilled_at = 0;
    req.seed = [0u8; 32];

    emit!(RoundClosed {
        round_id,
        total_prize_pool: round.total_prize_pool,
        total_entries: round.total_entries,
    });
    emit!(RandomnessRequested {
        request_id,
        round_id,
    });
    Ok(())
}

/// Oracle callback. Draws the winners over the round's entry snapshot
/// (passed as remaining accounts), pays the operator fee and records
/// each winner's share in its entry record.
pub fn fulfill_randomness<'info>(
    ctx: Context<'_, '_, 'info, 'info, FulfillRandomness<'info>>,
    request_id: u64,
    random_words: Vec<[u8; 32]>,
) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(
        cfg.randomness_oracle,
        ctx.accounts.oracle.key(),
        LotteryError::Unauthorized
    );

    let req = &ctx.accounts.randomness_request;
    let round = &ctx.accounts.round;
    if req.fulfilled || round.prize_distributed {
        msg!("request {} already resolved, ignoring", request_id);
        return Ok(());
    }

    cfg.assert_funds_available()?;
    require!(req.request_id == request_id, LotteryError::RequestMismatch);
    require!(round.request_id == request_id, LotteryError::RequestMismatch);
    require!(round.awaiting_randomness(), LotteryError::RequestMismatch);

    require!(!random_words.is_empty(), LotteryError::MissingRandomness);
    require!(random_words.len() <= MAX_RANDOM_WORDS, LotteryError::InvalidParameter);
    let seed = random_words[0];

    let mut entries = utils::load_entry_snapshot(ctx.program_id, round, ctx.remaining_accounts)?;
    let snapshot = utils::snapshot_weights(&entries);
    let draw = selection::draw(
        &snapshot,
        &seed,
        round.winners_per_round,
        round.total_prize_pool,
        round.fee_bps,
    )?;

    for w in &draw.winners {
        let entry = &mut entries[w.index];
        entry.credit_winnings(w.amount)?;
        utils::store_entry(&ctx.remaining_accounts[w.index], entry)?;
    }

    ledger::pay_from_pool(
        &ctx.accounts.token_program,
        &ctx.accounts.pool_vault,
        &ctx.accounts.fee_destination,
        &ctx.accounts.config,
        draw.fee,
    )?;

    let now = Clock::get()?.unix_timestamp;
    let owner = ctx.accounts.config.owner;

    let round = &mut ctx.accounts.round;
    round.record_distribution(&draw, now)?;
    ctx.accounts
        .config
        .record_distribution(round.total_prize_pool, draw.distributable)?;
    ctx.accounts.randomness_request.resolve(seed, now);

    let round_id = round.round_id;
    for w in &draw.winners {
        msg!(
            "round {} winner {} entries={} amount={}",
            round_id,
            w.participant,
            w.entries,
            w.amount
        );
    }

    emit!(WinnersSelected {
        round_id,
        request_id,
        winners: round.winners.clone(),
    });
    emit!(FeeCollected {
        round_id,
        owner,
        amount: draw.fee,
    });
    emit!(PrizeDistributed {
        round_id,
        prize_pool_after_fee: draw.distributable,
    });
    Ok(())
}
