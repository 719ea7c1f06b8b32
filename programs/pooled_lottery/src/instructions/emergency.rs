use anchor_lang::prelude::*;

use crate::events::{EmergencyModeEnabled, EmergencyWithdrawal};
use crate::ledger;
use crate::{EmergencyWithdraw, EnableEmergencyMode};

pub fn enable_emergency_mode(ctx: Context<EnableEmergencyMode>) -> Result<()> {
    let caller = ctx.accounts.emergency_admin.key();
    ctx.accounts.config.enable_emergency_mode(&caller)?;

    let timestamp = Clock::get()?.unix_timestamp;
    msg!("emergency mode enabled by {}", caller);
    emit!(EmergencyModeEnabled {
        emergency_admin: caller,
        timestamp,
    });
    Ok(())
}

/// Sweeps the whole pool vault to the safe address. Round accounting is
/// bypassed: whatever was still owed stays recorded as a liability.
pub fn emergency_withdraw(ctx: Context<EmergencyWithdraw>) -> Result<()> {
    let caller = ctx.accounts.emergency_admin.key();
    ctx.accounts.config.assert_can_emergency_withdraw(&caller)?;

    let amount = ctx.accounts.pool_vault.amount;
    ledger::pay_from_pool(
        &ctx.accounts.token_program,
        &ctx.accounts.pool_vault,
        &ctx.accounts.safe_destination,
        &ctx.accounts.config,
        amount,
    )?;

    let cfg = &mut ctx.accounts.config;
    cfg.emergency_withdrawn = true;

    msg!(
        "emergency withdrawal: amount={} undistributed_pool={} unclaimed_winnings={} outstanding={}",
        amount,
        cfg.undistributed_pool,
        cfg.unclaimed_winnings,
        cfg.outstanding_liabilities()?
    );
    emit!(EmergencyWithdrawal {
        safe_address: cfg.safe_address,
        amount,
        undistributed_pool: cfg.undistributed_pool,
        unclaimed_winnings: cfg.unclaimed_winnings,
    });
    Ok(())
}
