//! Durable commit seam for the ledger.
//!
//! The persistence engine itself is an external collaborator; the ledger only
//! needs a transactional "commit this balance together with this entry"
//! operation. The in-memory implementation doubles as the test harness for
//! rollback behavior.

use crate::ledger::LedgerEntry;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use thiserror::Error;

/// Error returned by a failed durable commit.
#[derive(Debug, Error)]
#[error("store write failed: {0}")]
pub struct StoreError(pub String);

/// Transactional persistence for settlement effects.
///
/// A commit must persist the account's new balance and the ledger entry as a
/// single unit; a returned error means neither was made durable.
#[async_trait]
pub trait Store: Send + Sync {
    async fn commit(
        &self,
        account_id: u64,
        balance: i64,
        entry: &LedgerEntry,
    ) -> Result<(), StoreError>;
}

/// In-memory store. Keeps the committed entry log for inspection and can be
/// switched into a failing mode to exercise rollback paths.
pub struct MemoryStore {
    committed: Mutex<Vec<LedgerEntry>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            committed: Mutex::new(Vec::new()),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make every subsequent commit fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of entries made durable so far.
    pub fn committed_count(&self) -> usize {
        self.committed.lock().expect("store lock poisoned").len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn commit(
        &self,
        _account_id: u64,
        _balance: i64,
        entry: &LedgerEntry,
    ) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError("injected write failure".to_string()));
        }
        self.committed
            .lock()
            .expect("store lock poisoned")
            .push(entry.clone());
        Ok(())
    }
}
