//! Three-reel slot machine.
//!
//! Three matching symbols pay 10x (jackpot), any pair pays 2x.

use crate::games::types::RuleOutcome;
use rand::seq::SliceRandom;
use rand::Rng;

/// Reel symbol alphabet.
pub const SYMBOLS: [&str; 8] = ["🍒", "🍋", "🍇", "⭐", "💎", "🔔", "7️⃣", "🍀"];

/// Draw three independent symbols.
pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> [&'static str; 3] {
    let mut pick = || *SYMBOLS.choose(rng).expect("symbol alphabet is non-empty");
    [pick(), pick(), pick()]
}

/// Settle a spin against the pay rules.
pub fn settle(stake: i64, reels: &[&str; 3]) -> RuleOutcome {
    let [a, b, c] = *reels;
    if a == b && b == c {
        let prize = stake * 10;
        RuleOutcome::jackpot(prize, format!("🎉 JACKPOT! Won {}!", prize))
    } else if a == b || b == c || a == c {
        let prize = stake * 2;
        RuleOutcome::win(prize, format!("✨ Nice! Won {}!", prize))
    } else {
        RuleOutcome::loss("😢 Not this time...")
    }
}
