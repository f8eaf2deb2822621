//! Five-reel tiger slot.
//!
//! Every symbol that repeats on the line pays stake x multiplier x
//! (count - 1), summed across all repeating symbols.

use crate::games::types::RuleOutcome;
use rand::seq::SliceRandom;
use rand::Rng;

/// Reel symbol alphabet.
pub const SYMBOLS: [&str; 9] = ["🐯", "🐰", "🦊", "🐼", "🦁", "🐸", "💎", "⭐", "7️⃣"];

/// Per-symbol multiplier.
pub fn multiplier(symbol: &str) -> i64 {
    match symbol {
        "🐯" => 10,
        "💎" => 8,
        "7️⃣" => 5,
        "⭐" => 3,
        _ => 2,
    }
}

/// Draw five independent symbols.
pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> [&'static str; 5] {
    let mut line = [""; 5];
    for slot in &mut line {
        *slot = *SYMBOLS.choose(rng).expect("symbol alphabet is non-empty");
    }
    line
}

/// Settle a line against the repeat rules.
pub fn settle(stake: i64, line: &[&str; 5]) -> RuleOutcome {
    let mut prize = 0;
    for symbol in SYMBOLS {
        let count = line.iter().filter(|s| **s == symbol).count() as i64;
        if count >= 2 {
            prize += stake * multiplier(symbol) * (count - 1);
        }
    }
    if prize > 0 {
        RuleOutcome::win(prize, format!("🐯 TIGER! Won {}!", prize))
    } else {
        RuleOutcome::loss("😢 Not this time on the tiger...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::types::Classification;

    #[test]
    fn pair_of_tigers_pays_ten_times() {
        let out = settle(10, &["🐯", "🐯", "🦊", "🐼", "🐸"]);
        // 10 x 10 x (2 - 1)
        assert_eq!(out.prize, 100);
        assert_eq!(out.classification, Classification::Win);
    }

    #[test]
    fn triple_counts_twice() {
        let out = settle(10, &["💎", "💎", "💎", "🐼", "🐸"]);
        // 10 x 8 x (3 - 1)
        assert_eq!(out.prize, 160);
    }

    #[test]
    fn multiple_repeating_symbols_sum() {
        let out = settle(10, &["🐯", "🐯", "🐸", "🐸", "⭐"]);
        // tigers: 10x10x1, frogs: 10x2x1
        assert_eq!(out.prize, 120);
    }

    #[test]
    fn five_distinct_symbols_lose() {
        let out = settle(10, &["🐯", "🐰", "🦊", "🐼", "🦁"]);
        assert_eq!(out.prize, 0);
        assert_eq!(out.classification, Classification::Loss);
    }

    #[test]
    fn full_line_of_tigers() {
        let out = settle(10, &["🐯", "🐯", "🐯", "🐯", "🐯"]);
        // 10 x 10 x (5 - 1)
        assert_eq!(out.prize, 400);
    }
}
