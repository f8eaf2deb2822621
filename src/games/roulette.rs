//! Color roulette on a simplified wheel.
//!
//! The wheel is NOT real roulette coloring: 0 is green, 1-9 and 19-27 are
//! red, 10-18 and 28-36 are black. A color match pays 2x.

use crate::games::types::{RouletteColor, RuleOutcome};
use rand::Rng;

/// Spin the wheel: a uniform number in 0..=36.
pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(0..=36)
}

/// Color of a pocket on the simplified wheel.
pub fn color_of(number: u8) -> RouletteColor {
    match number {
        0 => RouletteColor::Green,
        1..=9 | 19..=27 => RouletteColor::Red,
        _ => RouletteColor::Black,
    }
}

/// Settle a spin against the player's color pick.
pub fn settle(stake: i64, number: u8, choice: RouletteColor) -> RuleOutcome {
    let color = color_of(number);
    if color == choice {
        let prize = stake * 2;
        RuleOutcome::win(prize, format!("🎉 {} it is! Won {}!", color, prize))
    } else {
        RuleOutcome::loss(format!("😢 It landed on {} ({})...", number, color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::types::Classification;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn simplified_wheel_colors() {
        assert_eq!(color_of(0), RouletteColor::Green);
        assert_eq!(color_of(5), RouletteColor::Red);
        assert_eq!(color_of(9), RouletteColor::Red);
        assert_eq!(color_of(10), RouletteColor::Black);
        assert_eq!(color_of(15), RouletteColor::Black);
        assert_eq!(color_of(18), RouletteColor::Black);
        assert_eq!(color_of(19), RouletteColor::Red);
        assert_eq!(color_of(27), RouletteColor::Red);
        assert_eq!(color_of(28), RouletteColor::Black);
        assert_eq!(color_of(36), RouletteColor::Black);
    }

    #[test]
    fn color_match_pays_double() {
        let out = settle(100, 5, RouletteColor::Red);
        assert_eq!(out.prize, 200);
        assert_eq!(out.classification, Classification::Win);
    }

    #[test]
    fn color_miss_loses_and_reports_the_pocket() {
        let out = settle(100, 15, RouletteColor::Red);
        assert_eq!(out.prize, 0);
        assert!(out.message.contains("15"));
        assert!(out.message.contains("black"));
    }

    #[test]
    fn spins_stay_on_the_wheel() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            assert!(draw(&mut rng) <= 36);
        }
    }
}
