use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::LotteryError;
use crate::events::{
    EmergencyAdminSet, OwnershipTransferred, PauseChanged, RoundCreated,
};
use crate::{CreateRound, Initialize, SetPause, UpdateConfig};

pub fn initialize(ctx: Context<Initialize>, randomness_oracle: Pubkey, fee_bps: u16) -> Result<()> {
    crate::state::Config::validate_fee_bps(fee_bps)?;
    require!(randomness_oracle != Pubkey::default(), LotteryError::InvalidParameter);

    let owner = ctx.accounts.owner.key();

    let cfg = &mut ctx.accounts.config;
    cfg.owner = owner;
    cfg.bump = ctx.bumps.config;
    cfg.emergency_admin = Pubkey::default();
    cfg.safe_address = owner;
    cfg.randomness_oracle = randomness_oracle;

    cfg.token_mint = ctx.accounts.token_mint.key();
    cfg.token_decimals = ctx.accounts.token_mint.decimals;
    cfg.pool_vault = ctx.accounts.pool_vault.key();
    cfg.pool_vault_bump = ctx.bumps.pool_vault;

    cfg.fee_bps = fee_bps;
    cfg.winners_per_round = DEFAULT_WINNERS_PER_ROUND;

    cfg.paused = false;
    cfg.emergency_mode = false;
    cfg.emergency_withdrawn = false;
    cfg.undistributed_pool = 0;
    cfg.unclaimed_winnings = 0;
    cfg.version = INITIAL_VERSION;

    let rr = &mut ctx.accounts.round_registry;
    rr.bump = ctx.bumps.round_registry;
    rr.next_round_id = INITIAL_ROUND_ID;
    rr.next_request_id = INITIAL_REQUEST_ID;
    rr.version = INITIAL_VERSION;

    msg!(
        "initialized: owner={} mint={} decimals={} fee_bps={}",
        owner,
        cfg.token_mint,
        cfg.token_decimals,
        fee_bps
    );
    Ok(())
}

pub fn set_pause(ctx: Context<SetPause>, paused: bool) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    ctx.accounts.config.set_paused(&caller, paused)?;

    emit!(PauseChanged { paused });
    Ok(())
}

pub fn transfer_ownership(ctx: Context<UpdateConfig>, new_owner: Pubkey) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    let cfg = &mut ctx.accounts.config;
    cfg.transfer_ownership(&caller, new_owner)?;

    msg!("ownership {} -> {}, safe address {}", caller, new_owner, cfg.safe_address);
    emit!(OwnershipTransferred {
        previous_owner: caller,
        new_owner,
        safe_address: cfg.safe_address,
    });
    Ok(())
}

pub fn set_emergency_admin(ctx: Context<UpdateConfig>, emergency_admin: Pubkey) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    ctx.accounts.config.set_emergency_admin(&caller, emergency_admin)?;

    emit!(EmergencyAdminSet { emergency_admin });
    Ok(())
}

pub fn set_safe_address(ctx: Context<UpdateConfig>, safe_address: Pubkey) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    ctx.accounts.config.set_safe_address(&caller, safe_address)?;

    msg!("safe address set to {}", safe_address);
    Ok(())
}

pub fn set_randomness_oracle(ctx: Context<UpdateConfig>, oracle: Pubkey) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    ctx.accounts.config.set_randomness_oracle(&caller, oracle)?;

    msg!("randomness oracle set to {}", oracle);
    Ok(())
}

pub fn update_fee_bps(ctx: Context<UpdateConfig>, fee_bps: u16) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    ctx.accounts.config.set_fee_bps(&caller, fee_bps)?;

    msg!("fee_bps={} (applies to new rounds)", fee_bps);
    Ok(())
}

pub fn update_winners_per_round(ctx: Context<UpdateConfig>, winners: u8) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    ctx.accounts.config.set_winners_per_round(&caller, winners)?;

    msg!("winners_per_round={} (applies to new rounds)", winners);
    Ok(())
}

pub fn create_round(ctx: Context<CreateRound>, entry_fee: u64, target_prize_pool: u64) -> Result<()> {
    let cfg = &ctx.accounts.config;
    cfg.assert_owner(&ctx.accounts.owner.key())?;
    cfg.assert_not_emergency()?;

    require!(entry_fee > 0, LotteryError::InvalidParameter);
    require!(target_prize_pool > 0, LotteryError::InvalidParameter);
    cfg.validate_target_prize_pool(target_prize_pool)?;

    let now = Clock::get()?.unix_timestamp;
    let round_id = ctx.accounts.round_registry.allocate_round_id()?;

    let round = &mut ctx.accounts.round;
    round.open(
        round_id,
        ctx.bumps.round,
        entry_fee,
        target_prize_pool,
        cfg.fee_bps,
        cfg.winners_per_round,
        now,
    )?;

    emit!(RoundCreated {
        round_id,
        entry_fee,
        target_prize_pool,
        threshold_amount: round.threshold_amount,
    });
    Ok(())
}
