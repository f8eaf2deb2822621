//! Mine-sweeper-style ladder game.
//!
//! 3 of 15 cells are mined. Each safe pick pays stake x ladder[stage],
//! truncated to integer units; hitting a mine ends the run with nothing.
//! Session state (stake, stage, mined set) is held server-side by the
//! settlement layer; this module is the stateless per-pick rule.

use crate::games::types::RuleOutcome;
use rand::seq::index::sample;
use rand::Rng;

pub const GRID: usize = 15;
pub const MINE_COUNT: usize = 3;

/// Ascending stage multipliers; clamped at the last entry.
pub const LADDER: [f64; 15] = [
    1.1, 1.2, 1.3, 1.5, 1.7, 2.0, 2.3, 2.7, 3.2, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0,
];

/// Multiplier for a stage index, clamped beyond the ladder.
pub fn stage_multiplier(stage: usize) -> f64 {
    LADDER[stage.min(LADDER.len() - 1)]
}

/// Draw the mined cells for a session.
pub fn draw_mines<R: Rng + ?Sized>(rng: &mut R) -> [u8; MINE_COUNT] {
    let picks = sample(rng, GRID, MINE_COUNT);
    let mut mines = [0u8; MINE_COUNT];
    for (slot, idx) in mines.iter_mut().zip(picks.iter()) {
        *slot = idx as u8;
    }
    mines
}

/// Settle one pick at the given stage.
pub fn settle(stake: i64, mines: &[u8; MINE_COUNT], position: u8, stage: usize) -> RuleOutcome {
    if mines.contains(&position) {
        RuleOutcome::loss("💣 BOOM! You hit a mine!")
    } else {
        let multiplier = stage_multiplier(stage);
        let prize = (stake as f64 * multiplier) as i64;
        RuleOutcome::win(prize, format!("🎯 Safe! Multiplier x{}!", multiplier))
    }
}
