//! Game modules: one draw + payout ruleset per game.

pub mod bingo;
pub mod coin;
pub mod crash;
pub mod dice;
pub mod mines;
pub mod roulette;
pub mod slots;
pub mod tiger;
pub mod types;
