//! Crash game on a fixed multiplier ladder.
//!
//! The round crashes at a point drawn uniformly from the ladder; a cash-out
//! target at or below the crash point pays stake x target, truncated.

use crate::games::types::RuleOutcome;
use rand::seq::SliceRandom;
use rand::Rng;

/// Possible crash points.
pub const LADDER: [f64; 11] = [1.0, 1.1, 1.2, 1.5, 2.0, 2.5, 3.0, 5.0, 10.0, 20.0, 50.0];

/// Draw the round's crash point.
pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    *LADDER.choose(rng).expect("crash ladder is non-empty")
}

/// Settle a round against the player's cash-out target.
pub fn settle(stake: i64, crash_point: f64, target: f64) -> RuleOutcome {
    if target <= crash_point {
        let prize = (stake as f64 * target) as i64;
        RuleOutcome::win(prize, format!("✈️ Cashed out at {}x! Won {}!", target, prize))
    } else {
        RuleOutcome::loss(format!("💥 Crashed at {}x", crash_point))
    }
}
