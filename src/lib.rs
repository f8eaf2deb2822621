//! rollhouse: a play-money casino backend.
//!
//! The core of the crate is the settlement pipeline: a wager is validated,
//! the stake debited, a random draw taken, the payout rules applied, the
//! prize credited, and the net effect appended to the account's transaction
//! log — all as one atomic unit per request. Eight games share that
//! pipeline; the HTTP layer in [`api`] is a thin adapter over it.

pub mod api;
pub mod config;
pub mod errors;
pub mod games;
pub mod ledger;
pub mod settlement;
pub mod store;

pub use config::{CasinoConfig, Config, ConfigLoader, ServerConfig};
pub use errors::{CoreError, CoreResult, ValidationError};
pub use games::types::{Classification, CoinChoice, GameKind, RouletteColor};
pub use ledger::{Account, CommitReceipt, EntryKind, Ledger, LedgerEntry};
pub use settlement::{BetParams, BetRequest, DrawData, SettledOutcome, Settlement};
pub use store::{MemoryStore, Store, StoreError};
