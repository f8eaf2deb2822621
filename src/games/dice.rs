//! Two-dice sum guessing game. An exact match pays 6x.

use crate::games::types::RuleOutcome;
use rand::Rng;

/// Valid range for a sum guess.
pub const GUESS_MIN: u8 = 2;
pub const GUESS_MAX: u8 = 12;

/// Roll two independent 1-6 dice.
pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> (u8, u8) {
    (rng.gen_range(1..=6), rng.gen_range(1..=6))
}

/// Settle a roll against the player's guess. The guess is validated at the
/// boundary before reaching this rule.
pub fn settle(stake: i64, dice: (u8, u8), guess: u8) -> RuleOutcome {
    let sum = dice.0 + dice.1;
    if sum == guess {
        let prize = stake * 6;
        RuleOutcome::win(prize, format!("🎉 Exact hit! Won {}!", prize))
    } else {
        RuleOutcome::loss(format!("😢 Missed! It was {}...", sum))
    }
}
