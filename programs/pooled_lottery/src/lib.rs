use anchor_lang::prelude::*;

pub mod constants;
pub mod contexts;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod selection;
pub mod state;
pub mod utils;

pub use constants::*;
pub use contexts::*;
pub use errors::*;
pub use state::*;
pub use utils::*;


declare_id!("FzEsSzdXoVjkuSbm1bWQqWtSWyw15E9baqQG84UXZm2z");

#[program]
pub mod pooled_lottery {
    use super::*;
    use crate::instructions::{admin, claim, draw, emergency, enter, views};

    pub fn initialize(ctx: Context<Initialize>, randomness_oracle: Pubkey, fee_bps: u16) -> Result<()> {
        admin::initialize(ctx, randomness_oracle, fee_bps)
    }

    // ----------------------------
    // Owner controls
    // ----------------------------
    pub fn pause(ctx: Context<SetPause>) -> Result<()> {
        admin::set_pause(ctx, true)
    }

    pub fn unpause(ctx: Context<SetPause>) -> Result<()> {
        admin::set_pause(ctx, false)
    }

    pub fn transfer_ownership(ctx: Context<UpdateConfig>, new_owner: Pubkey) -> Result<()> {
        admin::transfer_ownership(ctx, new_owner)
    }

    pub fn set_emergency_admin(ctx: Context<UpdateConfig>, emergency_admin: Pubkey) -> Result<()> {
        admin::set_emergency_admin(ctx, emergency_admin)
    }

    pub fn set_safe_address(ctx: Context<UpdateConfig>, safe_address: Pubkey) -> Result<()> {
        admin::set_safe_address(ctx, safe_address)
    }

    pub fn set_randomness_oracle(ctx: Context<UpdateConfig>, oracle: Pubkey) -> Result<()> {
        admin::set_randomness_oracle(ctx, oracle)
    }

    pub fn update_fee_bps(ctx: Context<UpdateConfig>, fee_bps: u16) -> Result<()> {
        admin::update_fee_bps(ctx, fee_bps)
    }

    pub fn update_winners_per_round(ctx: Context<UpdateConfig>, winners: u8) -> Result<()> {
        admin::update_winners_per_round(ctx, winners)
    }

    pub fn create_round(ctx: Context<CreateRound>, entry_fee: u64, target_prize_pool: u64) -> Result<()> {
        admin::create_round(ctx, entry_fee, target_prize_pool)
    }

    // core
    pub fn enter_lottery(ctx: Context<EnterLottery>, round_id: u64, num_entries: u64) -> Result<()> {
        enter::enter_lottery(ctx, round_id, num_entries)
    }

    pub fn request_winner_selection(ctx: Context<RequestWinnerSelection>, round_id: u64) -> Result<()> {
        draw::request_winner_selection(ctx, round_id)
    }

    pub fn fulfill_randomness<'info>(
        ctx: Context<'_, '_, 'info, 'info, FulfillRandomness<'info>>,
        request_id: u64,
        random_words: Vec<[u8; 32]>,
    ) -> Result<()> {
        draw::fulfill_randomness(ctx, request_id, random_words)
    }

    pub fn claim_prize(ctx: Context<ClaimPrize>, round_id: u64) -> Result<()> {
        claim::claim_prize(ctx, round_id)
    }

    // ----------------------------
    // Emergency
    // ----------------------------
    pub fn enable_emergency_mode(ctx: Context<EnableEmergencyMode>) -> Result<()> {
        emergency::enable_emergency_mode(ctx)
    }

    pub fn emergency_withdraw(ctx: Context<EmergencyWithdraw>) -> Result<()> {
        emergency::emergency_withdraw(ctx)
    }

    // views
    pub fn get_current_round_id(ctx: Context<ReadRegistry>) -> Result<u64> {
        views::get_current_round_id(ctx)
    }

    pub fn get_round_info(ctx: Context<ReadRound>, round_id: u64) -> Result<RoundInfo> {
        views::get_round_info(ctx, round_id)
    }

    pub fn get_entries(ctx: Context<ReadEntry>, round_id: u64, participant: Pubkey) -> Result<u64> {
        views::get_entries(ctx, round_id, participant)
    }

    pub fn get_winnings(ctx: Context<ReadEntry>, round_id: u64, participant: Pubkey) -> Result<u64> {
        views::get_winnings(ctx, round_id, participant)
    }
}
