//! The ledger: single source of truth for balances and transaction history.
//!
//! Every balance-affecting operation goes through [`Ledger::commit`], which
//! holds a per-account lock across the read-modify-write and the durable
//! store write, so debit/credit pairs are linearized per account and a
//! failed store commit rolls the in-memory state back before the lock is
//! released.

use crate::config::CasinoConfig;
use crate::errors::{CoreError, CoreResult, ValidationError};
use crate::store::Store;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// A registered player.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub id: u64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

/// Kind of a balance-affecting event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Bonus,
    Deposit,
    Withdrawal,
    Wager,
}

/// One immutable line of the transaction log. The amount is signed: credits
/// are positive, debits negative; a wager carries the net (prize - stake).
#[derive(Debug, Clone, Serialize)]
pub struct LedgerEntry {
    pub id: u64,
    pub account_id: u64,
    pub kind: EntryKind,
    pub amount: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Result of a committed balance update.
#[derive(Debug, Clone, Copy)]
pub struct CommitReceipt {
    pub entry_id: u64,
    pub balance: i64,
}

pub struct Ledger {
    accounts: DashMap<u64, Account>,
    usernames: DashMap<String, u64>,
    entries: DashMap<u64, Vec<LedgerEntry>>,
    locks: DashMap<u64, Arc<Mutex<()>>>,
    next_account_id: AtomicU64,
    next_entry_id: AtomicU64,
    store: Arc<dyn Store>,
    config: CasinoConfig,
}

impl Ledger {
    pub fn new(store: Arc<dyn Store>, config: CasinoConfig) -> Self {
        Self {
            accounts: DashMap::new(),
            usernames: DashMap::new(),
            entries: DashMap::new(),
            locks: DashMap::new(),
            next_account_id: AtomicU64::new(1),
            next_entry_id: AtomicU64::new(1),
            store,
            config,
        }
    }

    /// Register a new account and credit the welcome bonus.
    pub async fn register(&self, username: &str, password: &str) -> CoreResult<Account> {
        let id = match self.usernames.entry(username.to_string()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                return Err(ValidationError::UsernameTaken(username.to_string()).into());
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                let id = self.next_account_id.fetch_add(1, Ordering::SeqCst);
                slot.insert(id);
                id
            }
        };

        let account = Account {
            id,
            username: username.to_string(),
            password_hash: hash_password(password),
            balance: 0,
            created_at: Utc::now(),
        };
        self.accounts.insert(id, account);

        if self.config.welcome_bonus > 0 {
            if let Err(e) = self
                .commit(id, 0, self.config.welcome_bonus, EntryKind::Bonus, "Welcome bonus")
                .await
            {
                // Unwind the registration so the username stays free.
                self.accounts.remove(&id);
                self.usernames.remove(username);
                return Err(e);
            }
        }

        tracing::info!(account_id = id, username, "registered account");
        self.account(id)
    }

    /// Check credentials and return the account.
    pub fn login(&self, username: &str, password: &str) -> CoreResult<Account> {
        let account = self
            .usernames
            .get(username)
            .and_then(|id| self.accounts.get(&id).map(|a| a.clone()))
            .ok_or_else(|| CoreError::Unauthenticated("invalid credentials".to_string()))?;
        if account.password_hash != hash_password(password) {
            return Err(CoreError::Unauthenticated("invalid credentials".to_string()));
        }
        Ok(account)
    }

    /// Look up an account by id.
    pub fn account(&self, account_id: u64) -> CoreResult<Account> {
        self.accounts
            .get(&account_id)
            .map(|a| a.clone())
            .ok_or_else(|| CoreError::Unauthenticated(format!("unknown account {}", account_id)))
    }

    /// Current balance.
    pub fn balance(&self, account_id: u64) -> CoreResult<i64> {
        Ok(self.account(account_id)?.balance)
    }

    /// Apply a debit and a credit as one atomic balance update and append the
    /// matching entry, committing both durably or neither.
    pub async fn commit(
        &self,
        account_id: u64,
        debit: i64,
        credit: i64,
        kind: EntryKind,
        description: impl Into<String>,
    ) -> CoreResult<CommitReceipt> {
        debug_assert!(debit >= 0 && credit >= 0);
        let lock = self.account_lock(account_id);
        let _guard = lock.lock().await;

        let old_balance = self.balance(account_id)?;
        if debit > old_balance {
            return Err(ValidationError::InsufficientBalance {
                stake: debit,
                balance: old_balance,
            }
            .into());
        }
        let new_balance = old_balance
            .checked_sub(debit)
            .and_then(|b| b.checked_add(credit))
            .ok_or(ValidationError::BalanceOverflow)?;

        let entry = LedgerEntry {
            id: self.next_entry_id.fetch_add(1, Ordering::SeqCst),
            account_id,
            kind,
            amount: credit - debit,
            description: description.into(),
            created_at: Utc::now(),
        };

        if let Some(mut account) = self.accounts.get_mut(&account_id) {
            account.balance = new_balance;
        }
        self.entries.entry(account_id).or_default().push(entry.clone());

        if let Err(e) = self.store.commit(account_id, new_balance, &entry).await {
            // Roll back: neither the balance nor the entry survives.
            if let Some(mut account) = self.accounts.get_mut(&account_id) {
                account.balance = old_balance;
            }
            if let Some(mut log) = self.entries.get_mut(&account_id) {
                log.pop();
            }
            tracing::error!(account_id, error = %e, "store commit failed, rolled back");
            return Err(CoreError::Persistence(e.to_string()));
        }

        tracing::debug!(
            account_id,
            entry_id = entry.id,
            kind = ?kind,
            amount = entry.amount,
            balance = new_balance,
            "committed ledger entry"
        );
        Ok(CommitReceipt {
            entry_id: entry.id,
            balance: new_balance,
        })
    }

    /// Simulated deposit: a credit-only entry.
    pub async fn deposit(
        &self,
        account_id: u64,
        amount: i64,
        method: Option<&str>,
    ) -> CoreResult<CommitReceipt> {
        self.account(account_id)?;
        self.validate_cash_amount(amount)?;
        let description = format!("Deposit via {}", method.unwrap_or("card"));
        self.commit(account_id, 0, amount, EntryKind::Deposit, description)
            .await
    }

    /// Simulated withdrawal: a debit-only entry, bounded by the balance.
    pub async fn withdraw(&self, account_id: u64, amount: i64) -> CoreResult<CommitReceipt> {
        self.account(account_id)?;
        self.validate_cash_amount(amount)?;
        self.commit(
            account_id,
            amount,
            0,
            EntryKind::Withdrawal,
            "Withdrawal requested",
        )
        .await
    }

    /// Most recent entries, newest first, capped at the configured limit.
    pub fn recent_history(&self, account_id: u64, limit: usize) -> CoreResult<Vec<LedgerEntry>> {
        self.account(account_id)?;
        let limit = limit.min(self.config.history_limit);
        Ok(self
            .entries
            .get(&account_id)
            .map(|log| log.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    /// House rules this ledger was built with.
    pub fn config(&self) -> &CasinoConfig {
        &self.config
    }

    fn validate_cash_amount(&self, amount: i64) -> Result<(), ValidationError> {
        if amount < self.config.min_cash_amount {
            return Err(ValidationError::BelowMinimumAmount(
                amount,
                self.config.min_cash_amount,
            ));
        }
        if amount > self.config.max_cash_amount {
            return Err(ValidationError::AboveMaximumAmount(
                amount,
                self.config.max_cash_amount,
            ));
        }
        Ok(())
    }

    fn account_lock(&self, account_id: u64) -> Arc<Mutex<()>> {
        self.locks
            .entry(account_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// SHA-256 hex digest of a password.
fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn ledger_with_store() -> (Arc<MemoryStore>, Ledger) {
        let store = Arc::new(MemoryStore::new());
        let ledger = Ledger::new(store.clone(), CasinoConfig::default());
        (store, ledger)
    }

    #[tokio::test]
    async fn registration_credits_the_welcome_bonus() {
        let (store, ledger) = ledger_with_store();
        let account = ledger.register("alice", "hunter2").await.unwrap();
        assert_eq!(account.balance, 5000);

        let history = ledger.recent_history(account.id, 10).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].kind, EntryKind::Bonus);
        assert_eq!(history[0].amount, 5000);
        assert_eq!(store.committed_count(), 1);
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let (_, ledger) = ledger_with_store();
        ledger.register("alice", "one").await.unwrap();
        let err = ledger.register("alice", "two").await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::UsernameTaken(_))
        ));
    }

    #[tokio::test]
    async fn login_checks_credentials() {
        let (_, ledger) = ledger_with_store();
        let account = ledger.register("bob", "secret").await.unwrap();
        assert_eq!(ledger.login("bob", "secret").unwrap().id, account.id);
        assert!(ledger.login("bob", "wrong").is_err());
        assert!(ledger.login("nobody", "secret").is_err());
    }

    #[tokio::test]
    async fn commit_rejects_debit_over_balance() {
        let (_, ledger) = ledger_with_store();
        let account = ledger.register("carol", "pw").await.unwrap();
        let err = ledger
            .commit(account.id, 6000, 0, EntryKind::Wager, "too big")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InsufficientBalance { .. })
        ));
        assert_eq!(ledger.balance(account.id).unwrap(), 5000);
        assert_eq!(ledger.recent_history(account.id, 50).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_store_commit_rolls_back() {
        let (store, ledger) = ledger_with_store();
        let account = ledger.register("dave", "pw").await.unwrap();

        store.set_fail_writes(true);
        let err = ledger
            .commit(account.id, 100, 50, EntryKind::Wager, "doomed")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Persistence(_)));

        assert_eq!(ledger.balance(account.id).unwrap(), 5000);
        assert_eq!(ledger.recent_history(account.id, 50).unwrap().len(), 1);
        assert_eq!(store.committed_count(), 1);
    }

    #[tokio::test]
    async fn deposit_and_withdraw_enforce_the_minimum() {
        let (_, ledger) = ledger_with_store();
        let account = ledger.register("erin", "pw").await.unwrap();

        let err = ledger.deposit(account.id, 5, None).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::BelowMinimumAmount(5, 10))
        ));
        let err = ledger.withdraw(account.id, 5).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::BelowMinimumAmount(5, 10))
        ));

        ledger.deposit(account.id, 200, Some("pix")).await.unwrap();
        assert_eq!(ledger.balance(account.id).unwrap(), 5200);
        let receipt = ledger.withdraw(account.id, 100).await.unwrap();
        assert_eq!(receipt.balance, 5100);

        let history = ledger.recent_history(account.id, 50).unwrap();
        assert_eq!(history[0].kind, EntryKind::Withdrawal);
        assert_eq!(history[0].amount, -100);
        assert_eq!(history[1].kind, EntryKind::Deposit);
        assert_eq!(history[1].amount, 200);
        assert!(history[1].description.contains("pix"));
    }

    #[tokio::test]
    async fn deposit_above_the_maximum_is_rejected() {
        let (_, ledger) = ledger_with_store();
        let account = ledger.register("whale", "pw").await.unwrap();
        let err = ledger
            .deposit(account.id, i64::MAX - 5000, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::AboveMaximumAmount(_, 1_000_000))
        ));
        assert_eq!(ledger.balance(account.id).unwrap(), 5000);
    }

    #[tokio::test]
    async fn commit_surfaces_balance_overflow_instead_of_wrapping() {
        let (_, ledger) = ledger_with_store();
        let account = ledger.register("icarus", "pw").await.unwrap();
        let err = ledger
            .commit(account.id, 0, i64::MAX, EntryKind::Deposit, "too much")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::BalanceOverflow)
        ));
        assert_eq!(ledger.balance(account.id).unwrap(), 5000);
        assert_eq!(ledger.recent_history(account.id, 50).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_welcome_bonus_unwinds_the_registration() {
        let (store, ledger) = ledger_with_store();

        store.set_fail_writes(true);
        let err = ledger.register("ghost", "pw").await.unwrap_err();
        assert!(matches!(err, CoreError::Persistence(_)));
        assert!(ledger.login("ghost", "pw").is_err());

        // The username stays free and registers cleanly once writes recover.
        store.set_fail_writes(false);
        let account = ledger.register("ghost", "pw").await.unwrap();
        assert_eq!(account.balance, 5000);
    }

    #[tokio::test]
    async fn withdrawal_cannot_exceed_the_balance() {
        let (_, ledger) = ledger_with_store();
        let account = ledger.register("frank", "pw").await.unwrap();
        let err = ledger.withdraw(account.id, 9000).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InsufficientBalance { .. })
        ));
        assert_eq!(ledger.balance(account.id).unwrap(), 5000);
    }

    #[tokio::test]
    async fn history_is_newest_first_and_capped() {
        let (_, ledger) = ledger_with_store();
        let account = ledger.register("gabi", "pw").await.unwrap();
        for i in 0..5 {
            ledger
                .deposit(account.id, 10 + i, None)
                .await
                .unwrap();
        }
        let history = ledger.recent_history(account.id, 3).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].amount, 14);
        assert_eq!(history[1].amount, 13);
        assert_eq!(history[2].amount, 12);

        // limit is clamped to the configured cap
        let all = ledger.recent_history(account.id, 500).unwrap();
        assert_eq!(all.len(), 6); // bonus + 5 deposits
    }

    #[tokio::test]
    async fn unknown_account_is_unauthenticated() {
        let (_, ledger) = ledger_with_store();
        assert!(matches!(
            ledger.balance(42).unwrap_err(),
            CoreError::Unauthenticated(_)
        ));
        assert!(matches!(
            ledger.deposit(42, 100, None).await.unwrap_err(),
            CoreError::Unauthenticated(_)
        ));
    }
}
