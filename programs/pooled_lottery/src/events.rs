use anchor_lang::prelude::*;

#[event]
pub struct RoundCreated {
    pub round_id: u64,
    pub entry_fee: u64,
    pub target_prize_pool: u64,
    pub threshold_amount: u64,
}

#[event]
pub struct EntryRecorded {
    pub round_id: u64,
    pub participant: Pubkey,
    pub amount: u64,
    pub num_entries: u64,
    pub total_entries: u64,
    pub total_prize_pool: u64,
}

#[event]
pub struct ThresholdReached {
    pub round_id: u64,
    pub threshold_amount: u64,
    pub deadline_time: i64,
}

#[event]
pub struct RoundClosed {
    pub round_id: u64,
    pub total_prize_pool: u64,
    pub total_entries: u64,
}

#[event]
pub struct RandomnessRequested {
    pub request_id: u64,
    pub round_id: u64,
}

#[event]
pub struct WinnersSelected {
    pub round_id: u64,
    pub request_id: u64,
    pub winners: Vec<Pubkey>,
}

#[event]
pub struct FeeCollected {
    pub round_id: u64,
    pub owner: Pubkey,
    pub amount: u64,
}

#[event]
pub struct PrizeDistributed {
    pub round_id: u64,
    pub prize_pool_after_fee: u64,
}

#[event]
pub struct PrizeClaimed {
    pub round_id: u64,
    pub winner: Pubkey,
    pub amount: u64,
}

#[event]
pub struct PauseChanged {
    pub paused: bool,
}

#[event]
pub struct OwnershipTransferred {
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
    /// Destination of an emergency withdrawal after the handover.
    pub safe_address: Pubkey,
}

#[event]
pub struct EmergencyAdminSet {
    pub emergency_admin: Pubkey,
}

#[event]
pub struct EmergencyModeEnabled {
    pub emergency_admin: Pubkey,
    pub timestamp: i64,
}

/// Unpaid winnings and undistributed contributions stay owed after this.
#[event]
pub struct EmergencyWithdrawal {
    pub safe_address: Pubkey,
    pub amount: u64,
    pub undistributed_pool: u64,
    pub unclaimed_winnings: u64,
}
