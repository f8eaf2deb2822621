//! Bingo-style card game.
//!
//! Three cards of 5 numbers each (from 1-25) play against 15 drawn numbers.
//! Cards and the drawn set are sampled independently, so a card is not
//! guaranteed to be disjoint from another card. A card completes when all 5
//! of its numbers were drawn; 1/2/3 completed cards pay 2x/5x/10x.

use crate::games::types::RuleOutcome;
use rand::seq::index::sample;
use rand::Rng;

pub const CARDS: usize = 3;
pub const CARD_SIZE: usize = 5;
pub const DRAWN: usize = 15;
pub const POOL: usize = 25;

/// One round's random material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BingoDraw {
    /// Three sorted cards of five numbers in 1..=25.
    pub cards: [[u8; CARD_SIZE]; CARDS],
    /// Fifteen distinct drawn numbers in 1..=25, in draw order.
    pub drawn: [u8; DRAWN],
}

/// Sample the cards and the drawn set.
pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> BingoDraw {
    let mut cards = [[0u8; CARD_SIZE]; CARDS];
    for card in &mut cards {
        let picks = sample(rng, POOL, CARD_SIZE);
        for (slot, idx) in card.iter_mut().zip(picks.iter()) {
            *slot = idx as u8 + 1;
        }
        card.sort_unstable();
    }
    let mut drawn = [0u8; DRAWN];
    let picks = sample(rng, POOL, DRAWN);
    for (slot, idx) in drawn.iter_mut().zip(picks.iter()) {
        *slot = idx as u8 + 1;
    }
    BingoDraw { cards, drawn }
}

/// Settle a round: count completed cards and map to the prize ladder.
pub fn settle(stake: i64, draw: &BingoDraw) -> RuleOutcome {
    let completed = draw
        .cards
        .iter()
        .filter(|card| card.iter().all(|n| draw.drawn.contains(n)))
        .count();
    let prize = match completed {
        1 => stake * 2,
        2 => stake * 5,
        3 => stake * 10,
        _ => 0,
    };
    if prize > 0 {
        RuleOutcome::win(prize, format!("🐰 BINGO! Won {}!", prize))
    } else {
        RuleOutcome::loss("😢 No card completed...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::types::Classification;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn drawn_from(numbers: [u8; DRAWN]) -> [u8; DRAWN] {
        numbers
    }

    #[test]
    fn no_completed_card_loses() {
        let round = BingoDraw {
            cards: [[1, 2, 3, 4, 16], [5, 6, 7, 8, 17], [9, 10, 11, 12, 18]],
            drawn: drawn_from([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]),
        };
        let out = settle(100, &round);
        assert_eq!(out.prize, 0);
        assert_eq!(out.classification, Classification::Loss);
    }

    #[test]
    fn one_completed_card_pays_double() {
        let round = BingoDraw {
            cards: [[1, 2, 3, 4, 5], [5, 6, 7, 8, 17], [9, 10, 11, 12, 18]],
            drawn: drawn_from([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]),
        };
        assert_eq!(settle(100, &round).prize, 200);
    }

    #[test]
    fn two_completed_cards_pay_five_times() {
        let round = BingoDraw {
            cards: [[1, 2, 3, 4, 5], [6, 7, 8, 9, 10], [9, 10, 11, 12, 18]],
            drawn: drawn_from([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]),
        };
        assert_eq!(settle(100, &round).prize, 500);
    }

    #[test]
    fn three_completed_cards_pay_ten_times() {
        let round = BingoDraw {
            cards: [[1, 2, 3, 4, 5], [6, 7, 8, 9, 10], [11, 12, 13, 14, 15]],
            drawn: drawn_from([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]),
        };
        let out = settle(100, &round);
        assert_eq!(out.prize, 1000);
        assert_eq!(out.classification, Classification::Win);
    }

    #[test]
    fn draw_produces_sorted_distinct_cards_and_distinct_drawn_set() {
        let mut rng = StdRng::seed_from_u64(99);
        let round = draw(&mut rng);
        for card in &round.cards {
            let mut sorted = *card;
            sorted.sort_unstable();
            assert_eq!(&sorted, card);
            for window in card.windows(2) {
                assert!(window[0] < window[1], "card numbers must be distinct");
            }
            for n in card {
                assert!((1..=25).contains(n));
            }
        }
        let mut seen = round.drawn.to_vec();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), DRAWN);
    }
}
