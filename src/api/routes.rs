//! Route definitions: maps URLs to handlers with type-safe routing.

use super::handlers::*;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Build the API router with all endpoints.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Account lifecycle
        .route("/api/register", post(register_handler))
        .route("/api/login", post(login_handler))
        // Games
        .route("/api/slots", post(slots_handler))
        .route("/api/dice", post(dice_handler))
        .route("/api/coin", post(coin_handler))
        .route("/api/roulette", post(roulette_handler))
        .route("/api/tiger", post(tiger_handler))
        .route("/api/bingo", post(bingo_handler))
        .route("/api/mines", post(mines_handler))
        .route("/api/crash", post(crash_handler))
        // Simulated cash movement and history
        .route("/api/deposit", post(deposit_handler))
        .route("/api/withdraw", post(withdraw_handler))
        .route("/api/history/:account_id", get(history_handler))
        .route("/api/profile/:account_id", get(profile_handler))
        // Attach shared state
        .with_state(state)
}
