use anchor_lang::prelude::*;

use crate::events::PrizeClaimed;
use crate::ledger;
use crate::ClaimPrize;

pub fn claim_prize(ctx: Context<ClaimPrize>, round_id: u64) -> Result<()> {
    ctx.accounts.config.assert_funds_available()?;

    let amount = ctx.accounts.entry.claimable()?;

    ledger::pay_from_pool(
        &ctx.accounts.token_program,
        &ctx.accounts.pool_vault,
        &ctx.accounts.winner_token,
        &ctx.accounts.config,
        amount,
    )?;

    ctx.accounts.entry.settle_claim()?;
    ctx.accounts.config.record_claim(amount)?;

    emit!(PrizeClaimed {
        round_id,
        winner: ctx.accounts.winner.key(),
        amount,
    });
    Ok(())
}
