// Token movements in and out of the pool vault.
use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{errors::LotteryError, state::Config, CONFIG_SEED};

/// Pulls `amount` from a participant's token account into the pool vault.
/// The participant signs; any rejection surfaces as `PaymentFailed`.
pub fn pull_into_pool<'info>(
    token_program: &Program<'info, Token>,
    source: &Account<'info, TokenAccount>,
    pool_vault: &Account<'info, TokenAccount>,
    authority: &Signer<'info>,
    amount: u64,
) -> Result<()> {
    require!(source.amount >= amount, LotteryError::PaymentFailed);

    token::transfer(
        CpiContext::new(
            token_program.to_account_info(),
            Transfer {
                from: source.to_account_info(),
                to: pool_vault.to_account_info(),
                authority: authority.to_account_info(),
            },
        ),
        amount,
    )
    .map_err(|_| error!(LotteryError::PaymentFailed))
}

/// Pays `amount` out of the pool vault. The config PDA signs as vault authority.
pub fn pay_from_pool<'info>(
    token_program: &Program<'info, Token>,
    pool_vault: &Account<'info, TokenAccount>,
    destination: &Account<'info, TokenAccount>,
    config: &Account<'info, Config>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    require!(pool_vault.amount >= amount, LotteryError::InsufficientPoolFunds);

    let signer_seeds: &[&[&[u8]]] = &[&[CONFIG_SEED, &[config.bump]]];

    token::transfer(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            Transfer {
                from: pool_vault.to_account_info(),
                to: destination.to_account_info(),
                authority: config.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )
    .map_err(|_| error!(LotteryError::PaymentFailed))
}
