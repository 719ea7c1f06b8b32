use anchor_lang::prelude::*;

#[error_code]
pub enum LotteryError {
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Lottery paused")]
    Paused,
    #[msg("Emergency mode active")]
    EmergencyActive,
    #[msg("Emergency mode not active")]
    EmergencyNotActive,
    #[msg("Emergency admin not set")]
    EmergencyAdminNotSet,

    #[msg("Invalid parameter")]
    InvalidParameter,
    #[msg("Invalid prize pool amount")]
    InvalidPrizePool,
    #[msg("Invalid fee bps")]
    InvalidFeeBps,
    #[msg("Invalid winner count")]
    InvalidWinnerCount,

    #[msg("Round not found")]
    RoundNotFound,
    #[msg("Round closed")]
    RoundClosed,
    #[msg("Round already ended")]
    AlreadyEnded,
    #[msg("Deadline not reached")]
    DeadlineNotReached,
    #[msg("Round is full")]
    RoundFull,
    #[msg("Round has no entries")]
    NoEntries,

    #[msg("Payment failed")]
    PaymentFailed,
    #[msg("Math overflow")]
    Overflow,
    #[msg("Nothing to claim")]
    NothingToClaim,
    #[msg("Insufficient pool funds")]
    InsufficientPoolFunds,

    #[msg("Randomness request does not match round")]
    RequestMismatch,
    #[msg("No random words delivered")]
    MissingRandomness,
    #[msg("Entry snapshot does not match round totals")]
    EntrySnapshotMismatch,
    #[msg("Entry PDA mismatch")]
    EntryPdaMismatch,
    #[msg("Failed to borrow account data")]
    AccountBorrowFailed,

    #[msg("Fee destination must belong to the owner")]
    FeeDestinationMismatch,
    #[msg("Destination must belong to the safe address")]
    SafeAddressMismatch,
}
