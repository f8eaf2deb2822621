//! Settlement orchestration: validate, debit, draw, rule, credit, log.
//!
//! One linear state machine per request. Validation failures abort before
//! any mutation; the debit/credit pair and the log entry commit atomically
//! through the ledger. Also owns the two pieces of server-side state the
//! hardened design requires: mines sessions (stake, stage, and mined set
//! fixed at stage 0) and the idempotency replay cache.

use crate::errors::{CoreResult, ValidationError};
use crate::games::types::{Classification, CoinChoice, GameKind, RouletteColor, RuleOutcome};
use crate::games::{bingo, coin, crash, dice, mines, roulette, slots, tiger};
use crate::ledger::{EntryKind, Ledger};
use dashmap::DashMap;
use lru::LruCache;
use rand::Rng;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// A wager to settle.
#[derive(Debug, Clone)]
pub struct BetRequest {
    pub stake: i64,
    pub params: BetParams,
    /// Optional idempotency key; replaying a settled key returns the
    /// recorded outcome without touching the balance again.
    pub request_id: Option<Uuid>,
}

/// Game-specific parameters, validated at the boundary.
#[derive(Debug, Clone)]
pub enum BetParams {
    Slots,
    Dice { guess: u8 },
    Coin { choice: CoinChoice },
    Roulette { color: RouletteColor },
    Tiger,
    Bingo,
    Mines { stage: u32, position: u8 },
    Crash { target: f64 },
}

impl BetParams {
    pub fn game(&self) -> GameKind {
        match self {
            BetParams::Slots => GameKind::Slots,
            BetParams::Dice { .. } => GameKind::Dice,
            BetParams::Coin { .. } => GameKind::Coin,
            BetParams::Roulette { .. } => GameKind::Roulette,
            BetParams::Tiger => GameKind::Tiger,
            BetParams::Bingo => GameKind::Bingo,
            BetParams::Mines { .. } => GameKind::Mines,
            BetParams::Crash { .. } => GameKind::Crash,
        }
    }
}

/// Game-specific draw data carried back to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum DrawData {
    Slots {
        symbols: [&'static str; 3],
    },
    Dice {
        dice: [u8; 2],
        sum: u8,
    },
    Coin {
        draw: CoinChoice,
    },
    Roulette {
        number: u8,
        color: RouletteColor,
    },
    Tiger {
        symbols: [&'static str; 5],
    },
    Bingo {
        cards: [[u8; bingo::CARD_SIZE]; bingo::CARDS],
        drawn: [u8; bingo::DRAWN],
    },
    Mines {
        /// Revealed only once the session is over.
        #[serde(skip_serializing_if = "Option::is_none")]
        mines: Option<[u8; mines::MINE_COUNT]>,
        stage: u32,
    },
    Crash {
        crash_point: f64,
    },
}

/// The settled result of one wager.
#[derive(Debug, Clone, Serialize)]
pub struct SettledOutcome {
    #[serde(flatten)]
    pub draw: DrawData,
    pub prize: i64,
    pub classification: Classification,
    pub message: String,
    pub balance: i64,
}

#[derive(Debug, Clone, Copy)]
struct MinesSession {
    stake: i64,
    stage: u32,
    mines: [u8; mines::MINE_COUNT],
}

/// Replay entries kept before the oldest keys are evicted.
const REPLAY_CAPACITY: usize = 4096;

pub struct Settlement {
    ledger: Arc<Ledger>,
    mines_sessions: DashMap<u64, MinesSession>,
    /// Bounded LRU so a long-running server cannot accumulate one entry
    /// per keyed wager forever. Keyed per account: a key never grants
    /// access to another account's outcome.
    replays: Mutex<LruCache<(u64, Uuid), SettledOutcome>>,
}

impl Settlement {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self::with_replay_capacity(ledger, REPLAY_CAPACITY)
    }

    pub fn with_replay_capacity(ledger: Arc<Ledger>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity is at least one");
        Self {
            ledger,
            mines_sessions: DashMap::new(),
            replays: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Settle one wager end to end.
    pub async fn play(&self, account_id: u64, request: BetRequest) -> CoreResult<SettledOutcome> {
        // Resolve the caller before consulting the replay cache; an
        // idempotency key never stands in for a valid account.
        self.ledger.account(account_id)?;

        if let Some(key) = request.request_id {
            let mut replays = self.replays.lock().expect("replay cache lock poisoned");
            if let Some(previous) = replays.get(&(account_id, key)) {
                tracing::debug!(account_id, %key, "idempotent replay, returning recorded outcome");
                return Ok(previous.clone());
            }
        }

        let outcome = match request.params {
            BetParams::Mines { stage, position } => {
                self.play_mines(account_id, request.stake, stage, position).await?
            }
            ref params => self.play_single(account_id, request.stake, params).await?,
        };

        if let Some(key) = request.request_id {
            self.replays
                .lock()
                .expect("replay cache lock poisoned")
                .put((account_id, key), outcome.clone());
        }
        Ok(outcome)
    }

    /// Single-shot games: everything except the staged mines game.
    async fn play_single(
        &self,
        account_id: u64,
        stake: i64,
        params: &BetParams,
    ) -> CoreResult<SettledOutcome> {
        validate_stake(stake, self.ledger.config().max_stake)?;
        validate_params(params)?;
        let balance = self.ledger.balance(account_id)?;
        if stake > balance {
            return Err(ValidationError::InsufficientBalance { stake, balance }.into());
        }

        // Entropy is consumed in a sync scope; the commit below is the only
        // suspension point.
        let (draw, rule) = {
            let mut rng = rand::thread_rng();
            resolve(stake, params, &mut rng)
        };
        let game = params.game();

        let receipt = self
            .ledger
            .commit(
                account_id,
                stake,
                rule.prize,
                EntryKind::Wager,
                format!("{}: {}", game, rule.message),
            )
            .await?;

        tracing::info!(
            account_id,
            %game,
            stake,
            prize = rule.prize,
            balance = receipt.balance,
            "settled wager"
        );
        Ok(SettledOutcome {
            draw,
            prize: rule.prize,
            classification: rule.classification,
            message: rule.message,
            balance: receipt.balance,
        })
    }

    /// Staged mines game backed by a server-held session. The stake is
    /// debited only at stage 0; the mined set is drawn once and kept fixed
    /// for the whole session, and revealed only when the session ends.
    async fn play_mines(
        &self,
        account_id: u64,
        stake: i64,
        stage: u32,
        position: u8,
    ) -> CoreResult<SettledOutcome> {
        if position as usize >= mines::GRID {
            return Err(ValidationError::PositionOutOfRange(position).into());
        }

        match self.mines_sessions.remove(&account_id) {
            None => {
                if stage != 0 {
                    return Err(ValidationError::NoActiveSession.into());
                }
                validate_stake(stake, self.ledger.config().max_stake)?;
                let balance = self.ledger.balance(account_id)?;
                if stake > balance {
                    return Err(ValidationError::InsufficientBalance { stake, balance }.into());
                }

                let mined = {
                    let mut rng = rand::thread_rng();
                    mines::draw_mines(&mut rng)
                };
                let rule = mines::settle(stake, &mined, position, 0);
                let receipt = self
                    .ledger
                    .commit(
                        account_id,
                        stake,
                        rule.prize,
                        EntryKind::Wager,
                        format!("mines: {}", rule.message),
                    )
                    .await?;

                let survived = rule.classification != Classification::Loss;
                if survived {
                    self.mines_sessions.insert(
                        account_id,
                        MinesSession {
                            stake,
                            stage: 1,
                            mines: mined,
                        },
                    );
                }
                Ok(SettledOutcome {
                    draw: DrawData::Mines {
                        mines: (!survived).then_some(mined),
                        stage: 0,
                    },
                    prize: rule.prize,
                    classification: rule.classification,
                    message: rule.message,
                    balance: receipt.balance,
                })
            }
            Some((_, session)) => {
                if stage != session.stage {
                    // Keep the session alive; the pick was never evaluated.
                    self.mines_sessions.insert(account_id, session);
                    return Err(ValidationError::StageMismatch {
                        claimed: stage,
                        expected: session.stage,
                    }
                    .into());
                }

                let rule = mines::settle(
                    session.stake,
                    &session.mines,
                    position,
                    session.stage as usize,
                );
                // Stake was debited at stage 0; this call's delta is only the
                // prize (zero on a hit).
                let receipt = match self
                    .ledger
                    .commit(
                        account_id,
                        0,
                        rule.prize,
                        EntryKind::Wager,
                        format!("mines: {}", rule.message),
                    )
                    .await
                {
                    Ok(receipt) => receipt,
                    Err(e) => {
                        self.mines_sessions.insert(account_id, session);
                        return Err(e);
                    }
                };

                let last_stage = session.stage as usize + 1 >= mines::LADDER.len();
                let survived = rule.classification != Classification::Loss;
                let continues = survived && !last_stage;
                if continues {
                    self.mines_sessions.insert(
                        account_id,
                        MinesSession {
                            stage: session.stage + 1,
                            ..session
                        },
                    );
                }
                Ok(SettledOutcome {
                    draw: DrawData::Mines {
                        mines: (!continues).then_some(session.mines),
                        stage: session.stage,
                    },
                    prize: rule.prize,
                    classification: rule.classification,
                    message: rule.message,
                    balance: receipt.balance,
                })
            }
        }
    }
}

fn validate_stake(stake: i64, max_stake: i64) -> Result<(), ValidationError> {
    if stake <= 0 {
        return Err(ValidationError::NonPositiveStake(stake));
    }
    if stake > max_stake {
        return Err(ValidationError::StakeAboveMaximum(stake, max_stake));
    }
    Ok(())
}

fn validate_params(params: &BetParams) -> Result<(), ValidationError> {
    match params {
        BetParams::Dice { guess } if !(dice::GUESS_MIN..=dice::GUESS_MAX).contains(guess) => {
            Err(ValidationError::GuessOutOfRange(*guess))
        }
        BetParams::Crash { target } if *target < 1.0 => {
            Err(ValidationError::TargetBelowOne(*target))
        }
        _ => Ok(()),
    }
}

/// Draw and settle a single-shot game.
fn resolve<R: Rng + ?Sized>(
    stake: i64,
    params: &BetParams,
    rng: &mut R,
) -> (DrawData, RuleOutcome) {
    match params {
        BetParams::Slots => {
            let reels = slots::draw(rng);
            (DrawData::Slots { symbols: reels }, slots::settle(stake, &reels))
        }
        BetParams::Dice { guess } => {
            let roll = dice::draw(rng);
            (
                DrawData::Dice {
                    dice: [roll.0, roll.1],
                    sum: roll.0 + roll.1,
                },
                dice::settle(stake, roll, *guess),
            )
        }
        BetParams::Coin { choice } => {
            let drawn = coin::draw(rng);
            (DrawData::Coin { draw: drawn }, coin::settle(stake, drawn, *choice))
        }
        BetParams::Roulette { color } => {
            let number = roulette::draw(rng);
            (
                DrawData::Roulette {
                    number,
                    color: roulette::color_of(number),
                },
                roulette::settle(stake, number, *color),
            )
        }
        BetParams::Tiger => {
            let line = tiger::draw(rng);
            (DrawData::Tiger { symbols: line }, tiger::settle(stake, &line))
        }
        BetParams::Bingo => {
            let round = bingo::draw(rng);
            let rule = bingo::settle(stake, &round);
            (
                DrawData::Bingo {
                    cards: round.cards,
                    drawn: round.drawn,
                },
                rule,
            )
        }
        BetParams::Crash { target } => {
            let crash_point = crash::draw(rng);
            (
                DrawData::Crash { crash_point },
                crash::settle(stake, crash_point, *target),
            )
        }
        // Mines is session-based and handled by `play_mines`.
        BetParams::Mines { .. } => unreachable!("mines is settled by play_mines"),
    }
}
