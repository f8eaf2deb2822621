//! End-to-end flows through the public crate API: account lifecycle,
//! wager settlement across every game, concurrency, and failure handling.

use rollhouse::{
    BetParams, BetRequest, CasinoConfig, Classification, CoinChoice, CoreError, Ledger,
    MemoryStore, RouletteColor, Settlement, ValidationError,
};
use std::sync::Arc;
use uuid::Uuid;

fn casino() -> (Arc<MemoryStore>, Arc<Ledger>, Arc<Settlement>) {
    let store = Arc::new(MemoryStore::new());
    let ledger = Arc::new(Ledger::new(store.clone(), CasinoConfig::default()));
    let settlement = Arc::new(Settlement::new(ledger.clone()));
    (store, ledger, settlement)
}

fn bet(stake: i64, params: BetParams) -> BetRequest {
    BetRequest {
        stake,
        params,
        request_id: None,
    }
}

#[tokio::test]
async fn full_player_journey() {
    let (store, ledger, settlement) = casino();

    let account = ledger.register("journey", "pw").await.expect("register");
    assert_eq!(account.balance, 5000);
    assert_eq!(ledger.login("journey", "pw").expect("login").id, account.id);

    ledger
        .deposit(account.id, 1000, Some("pix"))
        .await
        .expect("deposit");
    assert_eq!(ledger.balance(account.id).unwrap(), 6000);

    // One wager per single-shot game; each settles to a consistent balance.
    let wagers = vec![
        bet(100, BetParams::Slots),
        bet(100, BetParams::Dice { guess: 7 }),
        bet(100, BetParams::Coin { choice: CoinChoice::Heads }),
        bet(100, BetParams::Roulette { color: RouletteColor::Red }),
        bet(100, BetParams::Tiger),
        bet(100, BetParams::Bingo),
        bet(100, BetParams::Crash { target: 2.0 }),
    ];
    let mut expected = 6000;
    for wager in wagers {
        let outcome = settlement.play(account.id, wager).await.expect("settle");
        expected = expected - 100 + outcome.prize;
        assert_eq!(outcome.balance, expected);
        assert_eq!(ledger.balance(account.id).unwrap(), expected);
        assert!(outcome.prize >= 0);
        match outcome.classification {
            Classification::Loss => assert_eq!(outcome.prize, 0),
            _ => assert!(outcome.prize > 0),
        }
    }

    ledger.withdraw(account.id, 50).await.expect("withdraw");
    expected -= 50;
    assert_eq!(ledger.balance(account.id).unwrap(), expected);

    // bonus + deposit + 7 wagers + withdrawal, newest first, all durable.
    let history = ledger.recent_history(account.id, 50).unwrap();
    assert_eq!(history.len(), 10);
    assert_eq!(history[0].amount, -50);
    assert_eq!(store.committed_count(), 10);

    // The signed entry amounts replay to the final balance.
    let replayed: i64 = history.iter().map(|entry| entry.amount).sum();
    assert_eq!(replayed, expected);
}

#[tokio::test]
async fn mines_run_settles_stage_by_stage() {
    let (_, ledger, settlement) = casino();
    let account = ledger.register("miner", "pw").await.unwrap();

    let first = settlement
        .play(account.id, bet(100, BetParams::Mines { stage: 0, position: 0 }))
        .await
        .expect("stage 0");
    let mut balance = 5000 - 100 + first.prize;
    assert_eq!(first.balance, balance);

    // Walk the session until a mine ends it or the ladder runs out. Later
    // stages never debit, so the balance only moves by the prize.
    let mut stage = 1;
    let mut alive = first.classification != Classification::Loss;
    while alive && stage < 15 {
        let outcome = settlement
            .play(
                account.id,
                bet(0, BetParams::Mines { stage, position: (stage % 15) as u8 }),
            )
            .await
            .expect("later stage");
        balance += outcome.prize;
        assert_eq!(outcome.balance, balance);
        alive = outcome.classification != Classification::Loss && stage < 14;
        stage += 1;
    }

    // The session is gone either way: stage 1 without a fresh start fails.
    let err = settlement
        .play(account.id, bet(0, BetParams::Mines { stage: 1, position: 3 }))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::NoActiveSession)
    ));
    assert_eq!(ledger.balance(account.id).unwrap(), balance);
}

#[tokio::test]
async fn concurrent_wagers_on_one_account_stay_consistent() {
    let (store, ledger, settlement) = casino();
    let account = ledger.register("parallel", "pw").await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..20 {
        let settlement = settlement.clone();
        let id = account.id;
        handles.push(tokio::spawn(async move {
            settlement.play(id, bet(200, BetParams::Coin { choice: CoinChoice::Heads })).await
        }));
    }

    let mut settled = 0i64;
    let mut net = 0i64;
    for handle in handles {
        match handle.await.expect("join") {
            Ok(outcome) => {
                settled += 1;
                net += outcome.prize - 200;
            }
            // Losses can drain the balance mid-run; rejection is the only
            // acceptable alternative to settling.
            Err(CoreError::Validation(ValidationError::InsufficientBalance { .. })) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    let balance = ledger.balance(account.id).unwrap();
    assert!(balance >= 0);
    assert_eq!(balance, 5000 + net);

    let history = ledger.recent_history(account.id, 50).unwrap();
    assert_eq!(history.len() as i64, settled + 1);
    assert_eq!(store.committed_count() as i64, settled + 1);
}

#[tokio::test]
async fn store_failure_leaves_the_wager_unsettled() {
    let (store, ledger, settlement) = casino();
    let account = ledger.register("unlucky", "pw").await.unwrap();

    store.set_fail_writes(true);
    let err = settlement
        .play(account.id, bet(100, BetParams::Slots))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Persistence(_)));
    assert_eq!(ledger.balance(account.id).unwrap(), 5000);
    assert_eq!(ledger.recent_history(account.id, 50).unwrap().len(), 1);

    // Once writes recover the same account settles normally.
    store.set_fail_writes(false);
    let outcome = settlement
        .play(account.id, bet(100, BetParams::Slots))
        .await
        .expect("settle after recovery");
    assert_eq!(outcome.balance, 5000 - 100 + outcome.prize);
}

#[tokio::test]
async fn idempotency_replays_require_the_same_account_and_key() {
    let (_, ledger, settlement) = casino();
    let account = ledger.register("replayer", "pw").await.unwrap();
    let other = ledger.register("bystander", "pw").await.unwrap();

    let key = Uuid::new_v4();
    let keyed = BetRequest {
        stake: 100,
        params: BetParams::Dice { guess: 7 },
        request_id: Some(key),
    };
    let first = settlement.play(account.id, keyed.clone()).await.unwrap();
    let replay = settlement.play(account.id, keyed).await.unwrap();
    assert_eq!(replay.balance, first.balance);
    assert_eq!(replay.prize, first.prize);

    // A different key is a fresh wager and moves the balance again.
    let fresh = BetRequest {
        stake: 100,
        params: BetParams::Dice { guess: 7 },
        request_id: Some(Uuid::new_v4()),
    };
    let second = settlement.play(account.id, fresh).await.unwrap();
    assert_eq!(second.balance, first.balance - 100 + second.prize);
    assert_eq!(ledger.recent_history(account.id, 50).unwrap().len(), 3);

    // Another account presenting the same key gets its own wager, never
    // the recorded outcome.
    let borrowed = BetRequest {
        stake: 100,
        params: BetParams::Dice { guess: 7 },
        request_id: Some(key),
    };
    let foreign = settlement.play(other.id, borrowed).await.unwrap();
    assert_eq!(foreign.balance, 5000 - 100 + foreign.prize);
    assert_eq!(ledger.recent_history(other.id, 50).unwrap().len(), 2);
}

#[tokio::test]
async fn welcome_bonus_follows_the_configuration() {
    let store = Arc::new(MemoryStore::new());
    let config = CasinoConfig {
        welcome_bonus: 250,
        ..CasinoConfig::default()
    };
    let ledger = Ledger::new(store, config);

    let account = ledger.register("custom", "pw").await.unwrap();
    assert_eq!(account.balance, 250);
}
