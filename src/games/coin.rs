//! Coin flip. Matching the drawn side pays 2x.

use crate::games::types::{CoinChoice, RuleOutcome};
use rand::Rng;

/// Flip a fair coin.
pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> CoinChoice {
    if rng.gen_bool(0.5) {
        CoinChoice::Heads
    } else {
        CoinChoice::Tails
    }
}

/// Settle a flip against the player's call.
pub fn settle(stake: i64, drawn: CoinChoice, choice: CoinChoice) -> RuleOutcome {
    if drawn == choice {
        let prize = stake * 2;
        RuleOutcome::win(prize, format!("🎉 It's {}! Won {}!", drawn, prize))
    } else {
        RuleOutcome::loss(format!("😢 It came up {}...", drawn))
    }
}
