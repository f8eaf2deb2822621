//! Shared game types: kinds, choices, and the rule engine output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported games.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Slots,
    Dice,
    Coin,
    Roulette,
    Tiger,
    Bingo,
    Mines,
    Crash,
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameKind::Slots => "slots",
            GameKind::Dice => "dice",
            GameKind::Coin => "coin",
            GameKind::Roulette => "roulette",
            GameKind::Tiger => "tiger",
            GameKind::Bingo => "bingo",
            GameKind::Mines => "mines",
            GameKind::Crash => "crash",
        };
        write!(f, "{}", name)
    }
}

/// Coarse result category used for UI messaging.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Win,
    Jackpot,
    Loss,
}

/// Coin flip choice (and result).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CoinChoice {
    Heads,
    Tails,
}

impl fmt::Display for CoinChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoinChoice::Heads => write!(f, "heads"),
            CoinChoice::Tails => write!(f, "tails"),
        }
    }
}

/// Roulette color on the simplified wheel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RouletteColor {
    Red,
    Black,
    Green,
}

impl fmt::Display for RouletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouletteColor::Red => write!(f, "red"),
            RouletteColor::Black => write!(f, "black"),
            RouletteColor::Green => write!(f, "green"),
        }
    }
}

/// Output of a payout ruleset: what the player gets back and how to tell them.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub prize: i64,
    pub classification: Classification,
    pub message: String,
}

impl RuleOutcome {
    pub fn loss(message: impl Into<String>) -> Self {
        Self {
            prize: 0,
            classification: Classification::Loss,
            message: message.into(),
        }
    }

    pub fn win(prize: i64, message: impl Into<String>) -> Self {
        Self {
            prize,
            classification: Classification::Win,
            message: message.into(),
        }
    }

    pub fn jackpot(prize: i64, message: impl Into<String>) -> Self {
        Self {
            prize,
            classification: Classification::Jackpot,
            message: message.into(),
        }
    }
}
