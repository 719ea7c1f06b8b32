use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::LotteryError;
use crate::selection::Draw;

#[account]
#[derive(InitSpace, Default)]
pub struct Config {
    pub owner: Pubkey,
    pub bump: u8,

    /// Pubkey::default() while unset.
    pub emergency_admin: Pubkey,
    /// Owner of the token account that receives an emergency withdrawal.
    pub safe_address: Pubkey,
    /// Only this key may deliver randomness.
    pub randomness_oracle: Pubkey,

    // Stable-value token + pool custody
    pub token_mint: Pubkey,
    pub token_decimals: u8,
    pub pool_vault: Pubkey,
    pub pool_vault_bump: u8,

    // Snapshotted into every new round
    pub fee_bps: u16,
    pub winners_per_round: u8,

    pub paused: bool,
    /// One-way.
    pub emergency_mode: bool,
    pub emergency_withdrawn: bool,

    // Liabilities against the pool vault
    pub undistributed_pool: u64,
    pub unclaimed_winnings: u64,

    pub version: u16,
}

impl Config {
    pub fn validate_fee_bps(fee_bps: u16) -> Result<()> {
        require!(fee_bps <= MAX_FEE_BPS, LotteryError::InvalidFeeBps);
        Ok(())
    }

    pub fn validate_winners_per_round(winners: u8) -> Result<()> {
        require!(
            winners > 0 && winners <= MAX_WINNERS_PER_ROUND,
            LotteryError::InvalidWinnerCount
        );
        Ok(())
    }

    pub fn assert_owner(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(self.owner, *caller, LotteryError::Unauthorized);
        Ok(())
    }

    pub fn assert_emergency_admin(&self, caller: &Pubkey) -> Result<()> {
        require!(
            self.emergency_admin != Pubkey::default(),
            LotteryError::EmergencyAdminNotSet
        );
        require_keys_eq!(self.emergency_admin, *caller, LotteryError::Unauthorized);
        Ok(())
    }

    /// Emergency mode wins over pause when both are set.
    pub fn assert_accepting_entries(&self) -> Result<()> {
        require!(!self.emergency_mode, LotteryError::EmergencyActive);
        require!(!self.paused, LotteryError::Paused);
        Ok(())
    }

    pub fn assert_not_emergency(&self) -> Result<()> {
        require!(!self.emergency_mode, LotteryError::EmergencyActive);
        Ok(())
    }

    /// Pool funds are gone once an emergency withdrawal happened.
    pub fn assert_funds_available(&self) -> Result<()> {
        require!(!self.emergency_withdrawn, LotteryError::EmergencyActive);
        Ok(())
    }

    /// Target pools are restricted to fixed tiers of whole tokens.
    pub fn validate_target_prize_pool(&self, target_prize_pool: u64) -> Result<()> {
        let unit = 10u64
            .checked_pow(self.token_decimals as u32)
            .ok_or(LotteryError::Overflow)?;
        let is_tier = PRIZE_POOL_TIERS
            .iter()
            .any(|tier| tier.checked_mul(unit) == Some(target_prize_pool));
        require!(is_tier, LotteryError::InvalidPrizePool);
        Ok(())
    }

    // ----------------------------
    // Owner controls
    // ----------------------------
    pub fn set_paused(&mut self, caller: &Pubkey, paused: bool) -> Result<()> {
        self.assert_owner(caller)?;
        self.paused = paused;
        Ok(())
    }

    /// A safe address still pointing at the outgoing owner follows the new one;
    /// one set explicitly through `set_safe_address` stays put.
    pub fn transfer_ownership(&mut self, caller: &Pubkey, new_owner: Pubkey) -> Result<()> {
        self.assert_owner(caller)?;
        require!(new_owner != Pubkey::default(), LotteryError::InvalidParameter);
        if self.safe_address == self.owner {
            self.safe_address = new_owner;
        }
        self.owner = new_owner;
        Ok(())
    }

    pub fn set_emergency_admin(&mut self, caller: &Pubkey, emergency_admin: Pubkey) -> Result<()> {
        self.assert_owner(caller)?;
        self.emergency_admin = emergency_admin;
        Ok(())
    }

    pub fn set_safe_address(&mut self, caller: &Pubkey, safe_address: Pubkey) -> Result<()> {
        self.assert_owner(caller)?;
        require!(safe_address != Pubkey::default(), LotteryError::InvalidParameter);
        self.safe_address = safe_address;
        Ok(())
    }

    pub fn set_randomness_oracle(&mut self, caller: &Pubkey, oracle: Pubkey) -> Result<()> {
        self.assert_owner(caller)?;
        require!(oracle != Pubkey::default(), LotteryError::InvalidParameter);
        self.randomness_oracle = oracle;
        Ok(())
    }

    pub fn set_fee_bps(&mut self, caller: &Pubkey, fee_bps: u16) -> Result<()> {
        self.assert_owner(caller)?;
        Self::validate_fee_bps(fee_bps)?;
        self.fee_bps = fee_bps;
        Ok(())
    }

    pub fn set_winners_per_round(&mut self, caller: &Pubkey, winners: u8) -> Result<()> {
        self.assert_owner(caller)?;
        Self::validate_winners_per_round(winners)?;
        self.winners_per_round = winners;
        Ok(())
    }

    // ----------------------------
    // Emergency controls
    // ----------------------------
    pub fn enable_emergency_mode(&mut self, caller: &Pubkey) -> Result<()> {
        self.assert_emergency_admin(caller)?;
        require!(!self.emergency_mode, LotteryError::EmergencyActive);
        self.emergency_mode = true;
        Ok(())
    }

    pub fn assert_can_emergency_withdraw(&self, caller: &Pubkey) -> Result<()> {
        self.assert_emergency_admin(caller)?;
        require!(self.emergency_mode, LotteryError::EmergencyNotActive);
        Ok(())
    }

    /// Contributions and winnings that the vault still owes to participants.
    pub fn outstanding_liabilities(&self) -> Result<u64> {
        self.undistributed_pool
            .checked_add(self.unclaimed_winnings)
            .ok_or_else(|| error!(LotteryError::Overflow))
    }

    // ----------------------------
    // Liability bookkeeping
    // ----------------------------
    pub fn record_contribution(&mut self, amount: u64) -> Result<()> {
        self.undistributed_pool = self
            .undistributed_pool
            .checked_add(amount)
            .ok_or(LotteryError::Overflow)?;
        Ok(())
    }

    /// The whole round pool leaves `undistributed_pool`; only the part owed
    /// to winners becomes a liability again (the fee is paid out immediately).
    pub fn record_distribution(&mut self, total_prize_pool: u64, distributable: u64) -> Result<()> {
        let undistributed_pool = self
            .undistributed_pool
            .checked_sub(total_prize_pool)
            .ok_or(LotteryError::Overflow)?;
        let unclaimed_winnings = self
            .unclaimed_winnings
            .checked_add(distributable)
            .ok_or(LotteryError::Overflow)?;

        self.undistributed_pool = undistributed_pool;
        self.unclaimed_winnings = unclaimed_winnings;
        Ok(())
    }

    pub fn record_claim(&mut self, amount: u64) -> Result<()> {
        self.unclaimed_winnings = self
            .unclaimed_winnings
            .checked_sub(amount)
            .ok_or(LotteryError::Overflow)?;
        Ok(())
    }
}

#[account]
#[derive(InitSpace, Default)]
pub struct RoundRegistry {
    pub bump: u8,
    pub next_round_id: u64,
    pub next_request_id: u64,
    pub version: u16,
}

impl RoundRegistry {
    pub fn allocate_round_id(&mut self) -> Result<u64> {
        let round_id = self.next_round_id;
        self.next_round_id = round_id.checked_add(1).ok_or(LotteryError::Overflow)?;
        Ok(round_id)
    }

    pub fn allocate_request_id(&mut self) -> Result<u64> {
        let request_id = self.next_request_id;
        self.next_request_id = request_id.checked_add(1).ok_or(LotteryError::Overflow)?;
        Ok(request_id)
    }

    /// Latest round id handed out, 0 before the first round.
    pub fn current_round_id(&self) -> u64 {
        self.next_round_id.saturating_sub(INITIAL_ROUND_ID)
    }
}

/// Observable lifecycle of a round. Strictly forward.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundStatus {
    /// Accepting entries, threshold not reached yet.
    Open,
    /// Accepting entries, countdown running.
    ThresholdMet,
    /// Randomness requested, no more entries.
    Ended,
    /// Winnings recorded, claims open.
    Distributed,
}

#[account]
#[derive(InitSpace, Default, Debug)]
pub struct Round {
    pub round_id: u64,
    pub bump: u8,

    pub entry_fee: u64,
    pub target_prize_pool: u64,
    pub threshold_amount: u64,

    // Always total_prize_pool == entry_fee * total_entries
    pub total_prize_pool: u64,
    pub total_entries: u64,
    pub participant_count: u32,

    pub fee_bps: u16,
    pub winners_per_round: u8,

    pub created_at: i64,

    pub threshold_met: bool,
    pub threshold_met_at: i64,
    pub deadline_time: i64,

    pub lottery_ended: bool,
    pub ended_at: i64,
    pub request_id: u64,

    pub prize_distributed: bool,
    pub distributed_at: i64,
    pub operator_fee: u64,
    pub distributed_amount: u64,

    /// Draw order. Bounded by MAX_WINNERS_PER_ROUND.
    #[max_len(5)]
    pub winners: Vec<Pubkey>,
}

pub fn threshold_for(target_prize_pool: u64) -> Result<u64> {
    let threshold = (target_prize_pool as u128)
        .checked_mul(THRESHOLD_BPS as u128)
        .ok_or(LotteryError::Overflow)?
        / BPS_DENOMINATOR as u128;
    u64::try_from(threshold).map_err(|_| error!(LotteryError::Overflow))
}

impl Round {
    #[allow(clippy::too_many_arguments)]
    pub fn open(
        &mut self,
        round_id: u64,
        bump: u8,
        entry_fee: u64,
        target_prize_pool: u64,
        fee_bps: u16,
        winners_per_round: u8,
        now: i64,
    ) -> Result<()> {
        require!(entry_fee > 0, LotteryError::InvalidParameter);
        require!(target_prize_pool > 0, LotteryError::InvalidParameter);

        *self = Round {
            round_id,
            bump,
            entry_fee,
            target_prize_pool,
            threshold_amount: threshold_for(target_prize_pool)?,
            fee_bps,
            winners_per_round,
            created_at: now,
            ..Round::default()
        };
        Ok(())
    }

    pub fn status(&self) -> RoundStatus {
        if self.prize_distributed {
            RoundStatus::Distributed
        } else if self.lottery_ended {
            RoundStatus::Ended
        } else if self.threshold_met {
            RoundStatus::ThresholdMet
        } else {
            RoundStatus::Open
        }
    }

    /// Ended but the randomness callback never arrived. Watchers alert on this.
    pub fn awaiting_randomness(&self) -> bool {
        self.lottery_ended && !self.prize_distributed
    }

    pub fn entry_cost(&self, num_entries: u64) -> Result<u64> {
        self.entry_fee
            .checked_mul(num_entries)
            .ok_or_else(|| error!(LotteryError::Overflow))
    }

    /// Hands out the next first-entry index.
    pub fn register_participant(&mut self) -> Result<u32> {
        require!(!self.lottery_ended, LotteryError::RoundClosed);
        require!(
            self.participant_count < MAX_PARTICIPANTS_PER_ROUND,
            LotteryError::RoundFull
        );
        let index = self.participant_count;
        self.participant_count += 1;
        Ok(index)
    }

    /// Adds a paid entry purchase to the round totals.
    /// Returns true when this contribution crossed the threshold.
    pub fn record_contribution(&mut self, amount: u64, entry_count: u64, now: i64) -> Result<bool> {
        require!(!self.lottery_ended, LotteryError::RoundClosed);
        require!(entry_count > 0, LotteryError::InvalidParameter);
        require!(
            self.entry_cost(entry_count)? == amount,
            LotteryError::InvalidParameter
        );

        let total_prize_pool = self
            .total_prize_pool
            .checked_add(amount)
            .ok_or(LotteryError::Overflow)?;
        let total_entries = self
            .total_entries
            .checked_add(entry_count)
            .ok_or(LotteryError::Overflow)?;

        let crosses = !self.threshold_met && total_prize_pool >= self.threshold_amount;
        let deadline_time = if crosses {
            now.checked_add(DEADLINE_COOLDOWN_SECS)
                .ok_or(LotteryError::Overflow)?
        } else {
            self.deadline_time
        };

        self.total_prize_pool = total_prize_pool;
        self.total_entries = total_entries;

        if crosses {
            self.threshold_met = true;
            self.threshold_met_at = now;
            self.deadline_time = deadline_time;
        }

        Ok(crosses)
    }

    /// Stops entries and binds the round to one randomness request.
    pub fn close(&mut self, now: i64, request_id: u64) -> Result<()> {
        require!(!self.lottery_ended, LotteryError::AlreadyEnded);
        require!(
            self.threshold_met && now >= self.deadline_time,
            LotteryError::DeadlineNotReached
        );

        self.lottery_ended = true;
        self.ended_at = now;
        self.request_id = request_id;
        Ok(())
    }

    pub fn record_distribution(&mut self, draw: &Draw, now: i64) -> Result<()> {
        require!(self.awaiting_randomness(), LotteryError::RequestMismatch);
        require!(
            draw.distributable
                .checked_add(draw.fee)
                .ok_or(LotteryError::Overflow)?
                == self.total_prize_pool,
            LotteryError::EntrySnapshotMismatch
        );

        self.prize_distributed = true;
        self.distributed_at = now;
        self.operator_fee = draw.fee;
        self.distributed_amount = draw.distributable;
        self.winners = draw.winners.iter().map(|w| w.participant).collect();
        Ok(())
    }

    pub fn info(&self) -> RoundInfo {
        RoundInfo {
            round_id: self.round_id,
            status: self.status(),
            entry_fee: self.entry_fee,
            target_prize_pool: self.target_prize_pool,
            total_prize_pool: self.total_prize_pool,
            threshold_amount: self.threshold_amount,
            threshold_met: self.threshold_met,
            deadline_time: self.deadline_time,
            lottery_ended: self.lottery_ended,
            prize_distributed: self.prize_distributed,
            awaiting_randomness: self.awaiting_randomness(),
            total_entries: self.total_entries,
            participant_count: self.participant_count,
            fee_bps: self.fee_bps,
            request_id: self.request_id,
            operator_fee: self.operator_fee,
            distributed_amount: self.distributed_amount,
            winners: self.winners.clone(),
        }
    }
}

/// Returned by the `get_round_info` view.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RoundInfo {
    pub round_id: u64,
    pub status: RoundStatus,
    pub entry_fee: u64,
    pub target_prize_pool: u64,
    pub total_prize_pool: u64,
    pub threshold_amount: u64,
    pub threshold_met: bool,
    pub deadline_time: i64,
    pub lottery_ended: bool,
    pub prize_distributed: bool,
    pub awaiting_randomness: bool,
    pub total_entries: u64,
    pub participant_count: u32,
    pub fee_bps: u16,
    pub request_id: u64,
    pub operator_fee: u64,
    pub distributed_amount: u64,
    pub winners: Vec<Pubkey>,
}

/// Entry count and winnings of one participant in one round.
#[account]
#[derive(InitSpace, Default, Debug)]
pub struct Entry {
    pub round_id: u64,
    pub participant: Pubkey,
    pub bump: u8,

    /// Position in first-entry order.
    pub index: u32,
    pub entries: u64,

    pub winnings: u64,
    pub claimed: u64,

    pub first_entry_at: i64,
    pub last_entry_at: i64,
}

impl Entry {
    pub fn is_registered(&self) -> bool {
        self.participant != Pubkey::default()
    }

    pub fn register(&mut self, round_id: u64, participant: Pubkey, bump: u8, index: u32, now: i64) {
        *self = Entry {
            round_id,
            participant,
            bump,
            index,
            first_entry_at: now,
            ..Entry::default()
        };
    }

    pub fn add_entries(&mut self, num_entries: u64, now: i64) -> Result<()> {
        self.entries = self
            .entries
            .checked_add(num_entries)
            .ok_or(LotteryError::Overflow)?;
        self.last_entry_at = now;
        Ok(())
    }

    /// Set at most once per round.
    pub fn credit_winnings(&mut self, amount: u64) -> Result<()> {
        require!(
            self.winnings == 0 && self.claimed == 0,
            LotteryError::EntrySnapshotMismatch
        );
        self.winnings = amount;
        Ok(())
    }

    pub fn claimable(&self) -> Result<u64> {
        require!(self.winnings > 0, LotteryError::NothingToClaim);
        Ok(self.winnings)
    }

    /// Zeroes the record; a second claim fails with NothingToClaim.
    pub fn settle_claim(&mut self) -> Result<u64> {
        let amount = self.claimable()?;
        self.claimed = self.claimed.checked_add(amount).ok_or(LotteryError::Overflow)?;
        self.winnings = 0;
        Ok(amount)
    }
}

/// Pending randomness request: request id -> round id.
#[account]
#[derive(InitSpace, Default)]
pub struct RandomnessRequest {
    pub request_id: u64,
    pub round_id: u64,
    pub bump: u8,

    pub requested_at: i64,

    pub fulfilled: bool,
    pub fulfilled_at: i64,
    pub seed: [u8; 32],
}

impl RandomnessRequest {
    pub fn resolve(&mut self, seed: [u8; 32], now: i64) {
        self.fulfilled = true;
        self.fulfilled_at = now;
        self.seed = seed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection;
    use anchor_lang::error::Error;

    const NOW: i64 = 1_700_000_000;

    fn open_round(entry_fee: u64, target: u64) -> Round {
        let mut round = Round::default();
        round
            .open(1, 255, entry_fee, target, DEFAULT_FEE_BPS, 1, NOW)
            .unwrap();
        round
    }

    fn config_with_owner(owner: Pubkey) -> Config {
        Config {
            owner,
            safe_address: owner,
            fee_bps: DEFAULT_FEE_BPS,
            winners_per_round: DEFAULT_WINNERS_PER_ROUND,
            ..Config::default()
        }
    }

    #[test]
    fn open_rejects_zero_fee_or_pool() {
        let mut round = Round::default();
        let err = round.open(1, 0, 0, 10_000, 0, 1, NOW).unwrap_err();
        assert_eq!(err, Error::from(LotteryError::InvalidParameter));

        let err = round.open(1, 0, 1, 0, 0, 1, NOW).unwrap_err();
        assert_eq!(err, Error::from(LotteryError::InvalidParameter));
    }

    #[test]
    fn open_derives_threshold_and_resets_flags() {
        let round = open_round(1, 10_000);
        assert_eq!(round.threshold_amount, 3_400);
        assert_eq!(round.status(), RoundStatus::Open);
        assert!(!round.threshold_met && !round.lottery_ended && !round.prize_distributed);
        assert_eq!(round.total_prize_pool, 0);
        assert_eq!(round.deadline_time, 0);
    }

    #[test]
    fn threshold_met_once_and_deadline_fixed() {
        let mut round = open_round(1, 10_000);

        assert!(!round.record_contribution(3_399, 3_399, NOW).unwrap());
        assert!(!round.threshold_met);

        assert!(round.record_contribution(1, 1, NOW + 10).unwrap());
        assert!(round.threshold_met);
        assert_eq!(round.threshold_met_at, NOW + 10);
        assert_eq!(round.deadline_time, NOW + 10 + DEADLINE_COOLDOWN_SECS);

        // later entries never move the deadline
        assert!(!round.record_contribution(500, 500, NOW + 100).unwrap());
        assert_eq!(round.deadline_time, NOW + 10 + DEADLINE_COOLDOWN_SECS);
        assert_eq!(round.status(), RoundStatus::ThresholdMet);
    }

    #[test]
    fn pool_tracks_fee_times_entries() {
        let mut round = open_round(1_000_000, 10_000_000_000);
        for n in [1u64, 7, 250, 3] {
            let cost = round.entry_cost(n).unwrap();
            round.record_contribution(cost, n, NOW).unwrap();
            assert_eq!(round.total_prize_pool, round.entry_fee * round.total_entries);
        }
        assert_eq!(round.total_entries, 261);
    }

    #[test]
    fn contribution_must_match_entry_cost() {
        let mut round = open_round(5, 10_000);
        let err = round.record_contribution(9, 2, NOW).unwrap_err();
        assert_eq!(err, Error::from(LotteryError::InvalidParameter));

        let err = round.record_contribution(0, 0, NOW).unwrap_err();
        assert_eq!(err, Error::from(LotteryError::InvalidParameter));
        assert_eq!(round.total_prize_pool, 0);
    }

    #[test]
    fn entry_cost_overflow_is_rejected() {
        let round = open_round(u64::MAX / 2, 10_000);
        assert_eq!(round.entry_cost(3).unwrap_err(), Error::from(LotteryError::Overflow));
    }

    #[test]
    fn close_requires_threshold_and_deadline() {
        let mut round = open_round(1, 10_000);
        assert_eq!(
            round.close(NOW, 1).unwrap_err(),
            Error::from(LotteryError::DeadlineNotReached)
        );

        round.record_contribution(3_400, 3_400, NOW).unwrap();
        assert_eq!(
            round.close(NOW + DEADLINE_COOLDOWN_SECS - 1, 1).unwrap_err(),
            Error::from(LotteryError::DeadlineNotReached)
        );

        round.close(NOW + DEADLINE_COOLDOWN_SECS, 7).unwrap();
        assert!(round.lottery_ended);
        assert_eq!(round.request_id, 7);
        assert_eq!(round.status(), RoundStatus::Ended);
        assert!(round.awaiting_randomness());

        assert_eq!(
            round.close(NOW + DEADLINE_COOLDOWN_SECS + 1, 8).unwrap_err(),
            Error::from(LotteryError::AlreadyEnded)
        );
        assert_eq!(round.request_id, 7);
    }

    #[test]
    fn ended_round_rejects_entries() {
        let mut round = open_round(1, 10_000);
        round.record_contribution(3_400, 3_400, NOW).unwrap();
        round.close(NOW + DEADLINE_COOLDOWN_SECS, 1).unwrap();

        assert_eq!(
            round.record_contribution(1, 1, NOW).unwrap_err(),
            Error::from(LotteryError::RoundClosed)
        );
        assert_eq!(
            round.register_participant().unwrap_err(),
            Error::from(LotteryError::RoundClosed)
        );
        assert_eq!(round.total_prize_pool, 3_400);
    }

    #[test]
    fn participants_are_capped() {
        let mut round = open_round(1, 10_000);
        for expected in 0..MAX_PARTICIPANTS_PER_ROUND {
            assert_eq!(round.register_participant().unwrap(), expected);
        }
        assert_eq!(
            round.register_participant().unwrap_err(),
            Error::from(LotteryError::RoundFull)
        );
    }

    #[test]
    fn distribution_records_winners_and_fee() {
        let mut round = open_round(1, 10_000);
        round.record_contribution(10_000, 10_000, NOW).unwrap();

        let alice = Pubkey::new_unique();
        let draw = selection::draw(&[(alice, 10_000)], &[9u8; 32], 1, 10_000, DEFAULT_FEE_BPS)
            .unwrap();

        // not ended yet
        assert_eq!(
            round.record_distribution(&draw, NOW).unwrap_err(),
            Error::from(LotteryError::RequestMismatch)
        );

        round.close(NOW + DEADLINE_COOLDOWN_SECS, 1).unwrap();
        round.record_distribution(&draw, NOW + DEADLINE_COOLDOWN_SECS + 5).unwrap();

        assert_eq!(round.status(), RoundStatus::Distributed);
        assert!(!round.awaiting_randomness());
        assert_eq!(round.winners, vec![alice]);
        assert_eq!(round.operator_fee, 500);
        assert_eq!(round.distributed_amount, 9_500);

        let info = round.info();
        assert_eq!(info.status, RoundStatus::Distributed);
        assert_eq!(info.winners, vec![alice]);
    }

    #[test]
    fn entry_claim_zeroes_record() {
        let mut entry = Entry::default();
        assert!(!entry.is_registered());
        let who = Pubkey::new_unique();
        entry.register(3, who, 254, 0, NOW);
        entry.add_entries(4, NOW + 1).unwrap();
        assert!(entry.is_registered());
        assert_eq!(entry.entries, 4);

        assert_eq!(entry.claimable().unwrap_err(), Error::from(LotteryError::NothingToClaim));

        entry.credit_winnings(9_500).unwrap();
        assert_eq!(entry.settle_claim().unwrap(), 9_500);
        assert_eq!(entry.winnings, 0);
        assert_eq!(entry.claimed, 9_500);

        assert_eq!(entry.settle_claim().unwrap_err(), Error::from(LotteryError::NothingToClaim));
        // never re-credited after a claim
        assert_eq!(
            entry.credit_winnings(1).unwrap_err(),
            Error::from(LotteryError::EntrySnapshotMismatch)
        );
    }

    #[test]
    fn registry_hands_out_sequential_ids() {
        let mut rr = RoundRegistry {
            next_round_id: INITIAL_ROUND_ID,
            next_request_id: INITIAL_REQUEST_ID,
            ..RoundRegistry::default()
        };
        assert_eq!(rr.current_round_id(), 0);
        assert_eq!(rr.allocate_round_id().unwrap(), 1);
        assert_eq!(rr.allocate_round_id().unwrap(), 2);
        assert_eq!(rr.current_round_id(), 2);
        assert_eq!(rr.allocate_request_id().unwrap(), 1);
        assert_eq!(rr.next_request_id, 2);
    }

    #[test]
    fn prize_pool_tiers_scale_with_decimals() {
        let mut cfg = config_with_owner(Pubkey::new_unique());
        cfg.validate_target_prize_pool(10_000).unwrap();
        cfg.validate_target_prize_pool(1_000_000).unwrap();
        assert_eq!(
            cfg.validate_target_prize_pool(20_000).unwrap_err(),
            Error::from(LotteryError::InvalidPrizePool)
        );

        cfg.token_decimals = 6;
        cfg.validate_target_prize_pool(10_000_000_000).unwrap();
        cfg.validate_target_prize_pool(100_000_000_000).unwrap();
        assert_eq!(
            cfg.validate_target_prize_pool(20_000_000_000).unwrap_err(),
            Error::from(LotteryError::InvalidPrizePool)
        );
        assert_eq!(
            cfg.validate_target_prize_pool(10_000).unwrap_err(),
            Error::from(LotteryError::InvalidPrizePool)
        );
    }

    #[test]
    fn owner_controls_require_owner() {
        let owner = Pubkey::new_unique();
        let stranger = Pubkey::new_unique();
        let mut cfg = config_with_owner(owner);

        assert_eq!(cfg.set_paused(&stranger, true).unwrap_err(), Error::from(LotteryError::Unauthorized));
        cfg.set_paused(&owner, true).unwrap();
        assert_eq!(cfg.assert_accepting_entries().unwrap_err(), Error::from(LotteryError::Paused));
        cfg.set_paused(&owner, false).unwrap();
        cfg.assert_accepting_entries().unwrap();

        assert_eq!(cfg.set_fee_bps(&owner, MAX_FEE_BPS + 1).unwrap_err(), Error::from(LotteryError::InvalidFeeBps));
        cfg.set_fee_bps(&owner, 1_000).unwrap();
        assert_eq!(cfg.fee_bps, 1_000);

        assert_eq!(cfg.set_winners_per_round(&owner, 0).unwrap_err(), Error::from(LotteryError::InvalidWinnerCount));
        assert_eq!(
            cfg.set_winners_per_round(&owner, MAX_WINNERS_PER_ROUND + 1).unwrap_err(),
            Error::from(LotteryError::InvalidWinnerCount)
        );
        cfg.set_winners_per_round(&owner, 3).unwrap();

        let next_owner = Pubkey::new_unique();
        assert_eq!(
            cfg.transfer_ownership(&owner, Pubkey::default()).unwrap_err(),
            Error::from(LotteryError::InvalidParameter)
        );
        cfg.transfer_ownership(&owner, next_owner).unwrap();
        assert_eq!(cfg.set_paused(&owner, true).unwrap_err(), Error::from(LotteryError::Unauthorized));
        cfg.set_paused(&next_owner, true).unwrap();
    }

    #[test]
    fn safe_address_follows_owner_until_set_explicitly() {
        let owner = Pubkey::new_unique();
        let next_owner = Pubkey::new_unique();
        let mut cfg = config_with_owner(owner);
        assert_eq!(cfg.safe_address, owner);

        cfg.transfer_ownership(&owner, next_owner).unwrap();
        assert_eq!(cfg.owner, next_owner);
        assert_eq!(cfg.safe_address, next_owner);

        let vault_key = Pubkey::new_unique();
        cfg.set_safe_address(&next_owner, vault_key).unwrap();
        let third_owner = Pubkey::new_unique();
        cfg.transfer_ownership(&next_owner, third_owner).unwrap();
        assert_eq!(cfg.safe_address, vault_key);

        assert_eq!(
            cfg.transfer_ownership(&owner, owner).unwrap_err(),
            Error::from(LotteryError::Unauthorized)
        );
        assert_eq!(cfg.safe_address, vault_key);
    }

    #[test]
    fn emergency_mode_is_one_way_and_admin_only() {
        let owner = Pubkey::new_unique();
        let admin = Pubkey::new_unique();
        let mut cfg = config_with_owner(owner);

        assert_eq!(cfg.enable_emergency_mode(&admin).unwrap_err(), Error::from(LotteryError::EmergencyAdminNotSet));
        assert_eq!(cfg.set_emergency_admin(&admin, admin).unwrap_err(), Error::from(LotteryError::Unauthorized));
        cfg.set_emergency_admin(&owner, admin).unwrap();

        assert_eq!(cfg.enable_emergency_mode(&owner).unwrap_err(), Error::from(LotteryError::Unauthorized));
        assert_eq!(
            cfg.assert_can_emergency_withdraw(&admin).unwrap_err(),
            Error::from(LotteryError::EmergencyNotActive)
        );

        cfg.enable_emergency_mode(&admin).unwrap();
        assert_eq!(cfg.enable_emergency_mode(&admin).unwrap_err(), Error::from(LotteryError::EmergencyActive));
        assert_eq!(cfg.assert_accepting_entries().unwrap_err(), Error::from(LotteryError::EmergencyActive));

        // unpausing does not lift emergency mode
        cfg.set_paused(&owner, false).unwrap();
        assert_eq!(cfg.assert_accepting_entries().unwrap_err(), Error::from(LotteryError::EmergencyActive));
        cfg.assert_can_emergency_withdraw(&admin).unwrap();
        assert_eq!(
            cfg.assert_can_emergency_withdraw(&owner).unwrap_err(),
            Error::from(LotteryError::Unauthorized)
        );
    }

    #[test]
    fn liabilities_follow_round_lifecycle() {
        let mut cfg = config_with_owner(Pubkey::new_unique());
        cfg.record_contribution(10_000).unwrap();
        cfg.record_contribution(2_000).unwrap();
        assert_eq!(cfg.outstanding_liabilities().unwrap(), 12_000);

        cfg.record_distribution(10_000, 9_500).unwrap();
        assert_eq!(cfg.undistributed_pool, 2_000);
        assert_eq!(cfg.unclaimed_winnings, 9_500);

        cfg.record_claim(9_500).unwrap();
        assert_eq!(cfg.outstanding_liabilities().unwrap(), 2_000);
        assert_eq!(cfg.record_claim(1).unwrap_err(), Error::from(LotteryError::Overflow));
    }
}
