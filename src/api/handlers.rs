//! Request handlers: thin adapters from DTOs to the settlement core.

use super::{errors::ApiError, middleware::RequestId, models::*};
use crate::{
    errors::CoreError,
    ledger::Ledger,
    settlement::{BetParams, BetRequest, SettledOutcome, Settlement},
};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub ledger: Arc<Ledger>,
    pub settlement: Arc<Settlement>,
    pub version: String,
}

fn map_core_error(request_id: &RequestId, err: CoreError) -> ApiError {
    let id = request_id.0.clone();
    match err {
        CoreError::Validation(e) => ApiError::bad_request(id, e.to_string()),
        CoreError::Unauthenticated(msg) => ApiError::unauthorized(id, msg),
        CoreError::Persistence(msg) => ApiError::internal_error(id, msg),
        CoreError::Config(msg) => ApiError::internal_error(id, msg),
    }
}

async fn play(
    state: &AppState,
    request_id: &RequestId,
    account_id: u64,
    request: BetRequest,
) -> Result<Json<SettledOutcome>, ApiError> {
    state
        .settlement
        .play(account_id, request)
        .await
        .map(Json)
        .map_err(|e| map_core_error(request_id, e))
}

/// GET /health
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Running".to_string(),
        version: state.version.clone(),
    })
}

/// POST /api/register
pub async fn register_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = state
        .ledger
        .register(&request.username, &request.password)
        .await
        .map_err(|e| map_core_error(&request_id, e))?;
    Ok(Json(AccountResponse {
        account_id: account.id,
        username: account.username,
        balance: account.balance,
    }))
}

/// POST /api/login
pub async fn login_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = state
        .ledger
        .login(&request.username, &request.password)
        .map_err(|e| map_core_error(&request_id, e))?;
    Ok(Json(AccountResponse {
        account_id: account.id,
        username: account.username,
        balance: account.balance,
    }))
}

/// POST /api/slots
pub async fn slots_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<SlotsRequest>,
) -> Result<Json<SettledOutcome>, ApiError> {
    let bet = BetRequest {
        stake: request.stake,
        params: BetParams::Slots,
        request_id: request.request_id,
    };
    play(&state, &request_id, request.account_id, bet).await
}

/// POST /api/dice
pub async fn dice_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<DiceRequest>,
) -> Result<Json<SettledOutcome>, ApiError> {
    let bet = BetRequest {
        stake: request.stake,
        params: BetParams::Dice {
            guess: request.guess,
        },
        request_id: request.request_id,
    };
    play(&state, &request_id, request.account_id, bet).await
}

/// POST /api/coin
pub async fn coin_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<CoinRequest>,
) -> Result<Json<SettledOutcome>, ApiError> {
    let bet = BetRequest {
        stake: request.stake,
        params: BetParams::Coin {
            choice: request.choice,
        },
        request_id: request.request_id,
    };
    play(&state, &request_id, request.account_id, bet).await
}

/// POST /api/roulette
pub async fn roulette_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<RouletteRequest>,
) -> Result<Json<SettledOutcome>, ApiError> {
    let bet = BetRequest {
        stake: request.stake,
        params: BetParams::Roulette {
            color: request.color,
        },
        request_id: request.request_id,
    };
    play(&state, &request_id, request.account_id, bet).await
}

/// POST /api/tiger
pub async fn tiger_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<TigerRequest>,
) -> Result<Json<SettledOutcome>, ApiError> {
    let bet = BetRequest {
        stake: request.stake,
        params: BetParams::Tiger,
        request_id: request.request_id,
    };
    play(&state, &request_id, request.account_id, bet).await
}

/// POST /api/bingo
pub async fn bingo_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<BingoRequest>,
) -> Result<Json<SettledOutcome>, ApiError> {
    let bet = BetRequest {
        stake: request.stake,
        params: BetParams::Bingo,
        request_id: request.request_id,
    };
    play(&state, &request_id, request.account_id, bet).await
}

/// POST /api/mines
pub async fn mines_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<MinesRequest>,
) -> Result<Json<SettledOutcome>, ApiError> {
    let bet = BetRequest {
        stake: request.stake,
        params: BetParams::Mines {
            stage: request.stage,
            position: request.position,
        },
        request_id: request.request_id,
    };
    play(&state, &request_id, request.account_id, bet).await
}

/// POST /api/crash
pub async fn crash_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<CrashRequest>,
) -> Result<Json<SettledOutcome>, ApiError> {
    let bet = BetRequest {
        stake: request.stake,
        params: BetParams::Crash {
            target: request.target,
        },
        request_id: request.request_id,
    };
    play(&state, &request_id, request.account_id, bet).await
}

/// POST /api/deposit
pub async fn deposit_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<CashRequest>,
) -> Result<Json<CashResponse>, ApiError> {
    let receipt = state
        .ledger
        .deposit(request.account_id, request.amount, request.method.as_deref())
        .await
        .map_err(|e| map_core_error(&request_id, e))?;
    Ok(Json(CashResponse {
        amount: request.amount,
        balance: receipt.balance,
    }))
}

/// POST /api/withdraw
pub async fn withdraw_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<CashRequest>,
) -> Result<Json<CashResponse>, ApiError> {
    let receipt = state
        .ledger
        .withdraw(request.account_id, request.amount)
        .await
        .map_err(|e| map_core_error(&request_id, e))?;
    Ok(Json(CashResponse {
        amount: request.amount,
        balance: receipt.balance,
    }))
}

/// GET /api/profile/:account_id
pub async fn profile_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<u64>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let account = state
        .ledger
        .account(account_id)
        .map_err(|e| map_core_error(&request_id, e))?;
    let entries = state
        .ledger
        .recent_history(account_id, 50)
        .map_err(|e| map_core_error(&request_id, e))?;
    Ok(Json(ProfileResponse {
        account_id: account.id,
        username: account.username,
        balance: account.balance,
        created_at: account.created_at,
        entries,
    }))
}

/// GET /api/history/:account_id?limit={n}
pub async fn history_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<u64>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let entries = state
        .ledger
        .recent_history(account_id, params.limit)
        .map_err(|e| map_core_error(&request_id, e))?;
    Ok(Json(HistoryResponse { entries }))
}
