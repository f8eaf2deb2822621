//! Request and response DTOs for the HTTP surface.

use crate::games::types::{CoinChoice, RouletteColor};
use crate::ledger::LedgerEntry;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub account_id: u64,
    pub username: String,
    pub balance: i64,
}

#[derive(Debug, Deserialize)]
pub struct SlotsRequest {
    pub account_id: u64,
    pub stake: i64,
    #[serde(default)]
    pub request_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct DiceRequest {
    pub account_id: u64,
    pub stake: i64,
    pub guess: u8,
    #[serde(default)]
    pub request_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CoinRequest {
    pub account_id: u64,
    pub stake: i64,
    pub choice: CoinChoice,
    #[serde(default)]
    pub request_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct RouletteRequest {
    pub account_id: u64,
    pub stake: i64,
    pub color: RouletteColor,
    #[serde(default)]
    pub request_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct TigerRequest {
    pub account_id: u64,
    pub stake: i64,
    #[serde(default)]
    pub request_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct BingoRequest {
    pub account_id: u64,
    pub stake: i64,
    #[serde(default)]
    pub request_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct MinesRequest {
    pub account_id: u64,
    /// Only consulted at stage 0; later stages use the session's stake.
    #[serde(default)]
    pub stake: i64,
    pub stage: u32,
    pub position: u8,
    #[serde(default)]
    pub request_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CrashRequest {
    pub account_id: u64,
    pub stake: i64,
    pub target: f64,
    #[serde(default)]
    pub request_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CashRequest {
    pub account_id: u64,
    pub amount: i64,
    #[serde(default)]
    pub method: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CashResponse {
    pub amount: i64,
    pub balance: i64,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

fn default_history_limit() -> usize {
    50
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<LedgerEntry>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub account_id: u64,
    pub username: String,
    pub balance: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub entries: Vec<LedgerEntry>,
}
