// programs/pooled_lottery/src/contexts.rs

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::errors::LotteryError;
use crate::state::{Config, Entry, RandomnessRequest, Round, RoundRegistry};

// ----------------------------
// Setup / owner controls
// ----------------------------

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = owner,
        space = 8 + Config::INIT_SPACE,
        seeds = [crate::CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = owner,
        space = 8 + RoundRegistry::INIT_SPACE,
        seeds = [crate::ROUND_REGISTRY_SEED, config.key().as_ref()],
        bump
    )]
    pub round_registry: Account<'info, RoundRegistry>,

    /// Stable-value token used for entry fees and payouts.
    pub token_mint: Account<'info, Mint>,

    /// Pool custody: TokenAccount PDA whose authority is the config PDA.
    #[account(
        init,
        payer = owner,
        seeds = [crate::POOL_VAULT_SEED, config.key().as_ref()],
        bump,
        token::mint = token_mint,
        token::authority = config
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

/// Owner-only setters. Authorization happens in the handler.
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    pub owner: Signer<'info>,
}

#[derive(Accounts)]
pub struct SetPause<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    pub owner: Signer<'info>,
}

#[derive(Accounts)]
pub struct CreateRound<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::ROUND_REGISTRY_SEED, config.key().as_ref()],
        bump = round_registry.bump,
    )]
    pub round_registry: Account<'info, RoundRegistry>,

    #[account(
        init,
        payer = owner,
        space = 8 + Round::INIT_SPACE,
        seeds = [crate::ROUND_SEED, round_registry.next_round_id.to_le_bytes().as_ref()],
        bump
    )]
    pub round: Account<'info, Round>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

// ----------------------------
// Entries
// ----------------------------

#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct EnterLottery<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    /// CHECK: address enforced by seeds; contents loaded by `load_round`.
    #[account(
        mut,
        seeds = [crate::ROUND_SEED, round_id.to_le_bytes().as_ref()],
        bump
    )]
    pub round: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = participant,
        space = 8 + Entry::INIT_SPACE,
        seeds = [crate::ENTRY_SEED, round_id.to_le_bytes().as_ref(), participant.key().as_ref()],
        bump
    )]
    pub entry: Account<'info, Entry>,

    #[account(
        mut,
        seeds = [crate::POOL_VAULT_SEED, config.key().as_ref()],
        bump = config.pool_vault_bump,
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = participant_token.mint == config.token_mint @ LotteryError::PaymentFailed,
        constraint = participant_token.owner == participant.key() @ LotteryError::Unauthorized,
    )]
    pub participant_token: Account<'info, TokenAccount>,

    #[account(mut)]
    pub participant: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

// ----------------------------
// Draw
// ----------------------------

#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct RequestWinnerSelection<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::ROUND_REGISTRY_SEED, config.key().as_ref()],
        bump = round_registry.bump,
    )]
    pub round_registry: Account<'info, RoundRegistry>,

    /// CHECK: address enforced by seeds; contents loaded by `load_round`.
    #[account(
        mut,
        seeds = [crate::ROUND_SEED, round_id.to_le_bytes().as_ref()],
        bump
    )]
    pub round: UncheckedAccount<'info>,

    #[account(
        init,
        payer = caller,
        space = 8 + RandomnessRequest::INIT_SPACE,
        seeds = [crate::REQUEST_SEED, round_registry.next_request_id.to_le_bytes().as_ref()],
        bump
    )]
    pub randomness_request: Account<'info, RandomnessRequest>,

    /// Anyone may close a round once its deadline passed.
    #[account(mut)]
    pub caller: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Remaining accounts: every Entry of the round, writable, in first-entry order.
#[derive(Accounts)]
#[instruction(request_id: u64)]
pub struct FulfillRandomness<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::REQUEST_SEED, request_id.to_le_bytes().as_ref()],
        bump = randomness_request.bump,
    )]
    pub randomness_request: Account<'info, RandomnessRequest>,

    #[account(
        mut,
        seeds = [crate::ROUND_SEED, randomness_request.round_id.to_le_bytes().as_ref()],
        bump = round.bump,
    )]
    pub round: Account<'info, Round>,

    #[account(
        mut,
        seeds = [crate::POOL_VAULT_SEED, config.key().as_ref()],
        bump = config.pool_vault_bump,
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = fee_destination.owner == config.owner @ LotteryError::FeeDestinationMismatch,
        constraint = fee_destination.mint == config.token_mint @ LotteryError::FeeDestinationMismatch,
    )]
    pub fee_destination: Account<'info, TokenAccount>,

    pub oracle: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

// ----------------------------
// Claims
// ----------------------------

#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct ClaimPrize<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::ENTRY_SEED, round_id.to_le_bytes().as_ref(), winner.key().as_ref()],
        bump = entry.bump,
    )]
    pub entry: Account<'info, Entry>,

    #[account(
        mut,
        seeds = [crate::POOL_VAULT_SEED, config.key().as_ref()],
        bump = config.pool_vault_bump,
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = winner_token.mint == config.token_mint @ LotteryError::PaymentFailed,
        constraint = winner_token.owner == winner.key() @ LotteryError::Unauthorized,
    )]
    pub winner_token: Account<'info, TokenAccount>,

    pub winner: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

// ----------------------------
// Emergency
// ----------------------------

#[derive(Accounts)]
pub struct EnableEmergencyMode<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    pub emergency_admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct EmergencyWithdraw<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::POOL_VAULT_SEED, config.key().as_ref()],
        bump = config.pool_vault_bump,
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = safe_destination.owner == config.safe_address @ LotteryError::SafeAddressMismatch,
        constraint = safe_destination.mint == config.token_mint @ LotteryError::SafeAddressMismatch,
    )]
    pub safe_destination: Account<'info, TokenAccount>,

    pub emergency_admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

// ----------------------------
// Views
// ----------------------------

#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct ReadRound<'info> {
    /// CHECK: address enforced by seeds; contents loaded by `load_round`.
    #[account(
        seeds = [crate::ROUND_SEED, round_id.to_le_bytes().as_ref()],
        bump
    )]
    pub round: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(round_id: u64, participant: Pubkey)]
pub struct ReadEntry<'info> {
    /// CHECK: address enforced by seeds; contents loaded by `load_round`.
    #[account(
        seeds = [crate::ROUND_SEED, round_id.to_le_bytes().as_ref()],
        bump
    )]
    pub round: UncheckedAccount<'info>,

    /// CHECK: may not exist yet; address enforced by seeds, contents by `read_entry`.
    #[account(
        seeds = [crate::ENTRY_SEED, round_id.to_le_bytes().as_ref(), participant.as_ref()],
        bump
    )]
    pub entry: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct ReadRegistry<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [crate::ROUND_REGISTRY_SEED, config.key().as_ref()],
        bump = round_registry.bump,
    )]
    pub round_registry: Account<'info, RoundRegistry>,
}
