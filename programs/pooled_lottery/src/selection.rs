//! Weighted winner selection and prize splitting.
//!
//! Every entry is one ticket. Tickets are laid out contiguously per
//! participant in first-entry order; draw `i` picks a ticket among the
//! participants not drawn yet using `sha256(DRAW_DOMAIN || seed || i)`.
//! Identical snapshot and seed always give identical winners.

use anchor_lang::prelude::*;
use solana_sha256_hasher::hashv;

use crate::constants::{BPS_DENOMINATOR, DRAW_DOMAIN};
use crate::errors::LotteryError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Winner {
    /// Position in the entry snapshot.
    pub index: usize,
    pub participant: Pubkey,
    pub entries: u64,
    pub amount: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draw {
    /// Draw order.
    pub winners: Vec<Winner>,
    pub distributable: u64,
    pub fee: u64,
}

/// `distributable = floor(pool * (1 - fee))`, the rest is the operator fee.
pub fn split_fee(total_prize_pool: u64, fee_bps: u16) -> Result<(u64, u64)> {
    require!(fee_bps as u64 <= BPS_DENOMINATOR, LotteryError::InvalidFeeBps);

    let keep_bps = (BPS_DENOMINATOR - fee_bps as u64) as u128;
    let distributable = (total_prize_pool as u128)
        .checked_mul(keep_bps)
        .ok_or(LotteryError::Overflow)?
        / BPS_DENOMINATOR as u128;
    let distributable = u64::try_from(distributable).map_err(|_| error!(LotteryError::Overflow))?;
    let fee = total_prize_pool
        .checked_sub(distributable)
        .ok_or(LotteryError::Overflow)?;

    Ok((distributable, fee))
}

/// Ticket number in `0..ticket_count` for the given draw. `ticket_count > 0`.
pub fn draw_ticket(seed: &[u8; 32], draw_index: u32, ticket_count: u64) -> u64 {
    let h = hashv(&[
        DRAW_DOMAIN,
        seed.as_ref(),
        draw_index.to_le_bytes().as_ref(),
    ])
    .to_bytes();

    let mut word = [0u8; 16];
    word.copy_from_slice(&h[..16]);
    (u128::from_le_bytes(word) % ticket_count as u128) as u64
}

/// Samples up to `winner_count` distinct positions, weighted by `weights`.
/// Positions with zero weight are never drawn.
pub fn select_winners(weights: &[u64], seed: &[u8; 32], winner_count: usize) -> Result<Vec<usize>> {
    let mut remaining = weights
        .iter()
        .try_fold(0u64, |acc, w| acc.checked_add(*w))
        .ok_or(LotteryError::Overflow)?;
    require!(remaining > 0, LotteryError::NoEntries);

    let eligible = weights.iter().filter(|w| **w > 0).count();
    let draws = winner_count.min(eligible);

    let mut drawn = vec![false; weights.len()];
    let mut winners = Vec::with_capacity(draws);

    for i in 0..draws {
        let mut ticket = draw_ticket(seed, i as u32, remaining);

        let mut picked = None;
        for (pos, weight) in weights.iter().enumerate() {
            if drawn[pos] {
                continue;
            }
            if ticket < *weight {
                picked = Some(pos);
                break;
            }
            ticket -= weight;
        }
        let pos = picked.ok_or(LotteryError::NoEntries)?;

        drawn[pos] = true;
        remaining -= weights[pos];
        winners.push(pos);
    }

    Ok(winners)
}

/// Splits `distributable` proportionally to the winners' entry counts.
/// Shares are floored and the remainder goes to the first winner.
pub fn split_prize(distributable: u64, winner_weights: &[u64]) -> Result<Vec<u64>> {
    match winner_weights.len() {
        0 => return Ok(Vec::new()),
        1 => return Ok(vec![distributable]),
        _ => {}
    }

    let total_weight: u128 = winner_weights.iter().map(|w| *w as u128).sum();
    require!(total_weight > 0, LotteryError::NoEntries);

    let mut shares = Vec::with_capacity(winner_weights.len());
    let mut paid: u64 = 0;
    for w in winner_weights {
        let share = (distributable as u128)
            .checked_mul(*w as u128)
            .ok_or(LotteryError::Overflow)?
            / total_weight;
        let share = u64::try_from(share).map_err(|_| error!(LotteryError::Overflow))?;
        paid = paid.checked_add(share).ok_or(LotteryError::Overflow)?;
        shares.push(share);
    }

    let remainder = distributable
        .checked_sub(paid)
        .ok_or(LotteryError::Overflow)?;
    shares[0] = shares[0]
        .checked_add(remainder)
        .ok_or(LotteryError::Overflow)?;

    Ok(shares)
}

/// Full draw over a frozen entry snapshot.
pub fn draw(
    snapshot: &[(Pubkey, u64)],
    seed: &[u8; 32],
    winner_count: u8,
    total_prize_pool: u64,
    fee_bps: u16,
) -> Result<Draw> {
    require!(winner_count > 0, LotteryError::InvalidWinnerCount);

    let weights: Vec<u64> = snapshot.iter().map(|(_, entries)| *entries).collect();
    let picks = select_winners(&weights, seed, winner_count as usize)?;

    let (distributable, fee) = split_fee(total_prize_pool, fee_bps)?;
    let picked_weights: Vec<u64> = picks.iter().map(|pos| weights[*pos]).collect();
    let shares = split_prize(distributable, &picked_weights)?;

    let winners = picks
        .iter()
        .zip(shares)
        .map(|(pos, amount)| Winner {
            index: *pos,
            participant: snapshot[*pos].0,
            entries: snapshot[*pos].1,
            amount,
        })
        .collect();

    Ok(Draw {
        winners,
        distributable,
        fee,
    })
}
