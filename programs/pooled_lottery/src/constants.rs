// Centralized Protocol Constants

// Round Economics
// ===============

/// Denominator for every basis-point value in the protocol.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Share of the target prize pool that must be contributed before the
/// countdown starts. 3_400 bps = 34%.
pub const THRESHOLD_BPS: u64 = 3_400;

/// Seconds between the threshold crossing and the earliest winner selection.
pub const DEADLINE_COOLDOWN_SECS: i64 = 24 * 60 * 60;

/// Default operator fee taken from the pool before distribution (bps). 500 = 5%.
pub const DEFAULT_FEE_BPS: u16 = 500;

/// Upper bound accepted for the operator fee (bps).
pub const MAX_FEE_BPS: u16 = 2_500;

/// Allowed target prize pools, in whole tokens. Scaled by the mint decimals.
pub const PRIZE_POOL_TIERS: [u64; 3] = [10_000, 100_000, 1_000_000];

// Draw Limits
// ===========

/// Default number of winners drawn per round (winner takes all).
pub const DEFAULT_WINNERS_PER_ROUND: u8 = 1;

/// Maximum number of winners a round can be configured for.
pub const MAX_WINNERS_PER_ROUND: u8 = 5;

/// Accounts a single transaction may lock (runtime limit).
pub const TX_ACCOUNT_LOCK_LIMIT: usize = 64;

/// Keys of a `fulfill_randomness` transaction besides the entry records:
/// the 7 named accounts plus the program id.
pub const FULFILL_FIXED_ACCOUNTS: usize = 8;

/// Every entry record of a round is passed to the randomness callback as a
/// remaining account, so the participant set is bounded by what is left of
/// the lock limit. At this size the callback only fits the 1232-byte packet
/// as a v0 transaction that loads the entry PDAs from an address lookup table.
pub const MAX_PARTICIPANTS_PER_ROUND: u32 = (TX_ACCOUNT_LOCK_LIMIT - FULFILL_FIXED_ACCOUNTS) as u32;

/// Maximum number of random words accepted by the callback.
pub const MAX_RANDOM_WORDS: usize = 8;

/// Domain separator for the seed expansion.
pub const DRAW_DOMAIN: &[u8] = b"pooled-lottery:draw_v1";

// Registry Defaults
// =================

/// Initial version for account structures.
pub const INITIAL_VERSION: u16 = 1;

/// First round id handed out by a new registry.
pub const INITIAL_ROUND_ID: u64 = 1;

/// First randomness request id. 0 means "no request" on a round.
pub const INITIAL_REQUEST_ID: u64 = 1;
