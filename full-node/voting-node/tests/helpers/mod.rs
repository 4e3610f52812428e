use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use voting_ledger::{CallMessage, VotingLedgerConfig};
use voting_modules_api::default_context::DefaultContext;
use voting_modules_api::utils::generate_address;
use voting_modules_api::{Address, ProverStorage};
use voting_node::{LedgerClock, LedgerRunner};

pub type C = DefaultContext;

pub const START: u64 = 1_700_000_000;

/// A clock the test moves by hand.
#[derive(Clone)]
pub struct ManualClock(Arc<AtomicU64>);

impl ManualClock {
    pub fn new(now: u64) -> Self {
        Self(Arc::new(AtomicU64::new(now)))
    }

    pub fn set(&self, now: u64) {
        self.0.store(now, Ordering::SeqCst);
    }

    pub fn ledger_clock(&self) -> LedgerClock {
        let time = self.0.clone();
        LedgerClock::from_fn(move || time.load(Ordering::SeqCst))
    }
}

pub fn address(key: &str) -> Address {
    generate_address::<C>(key)
}

pub fn new_runner(storage: ProverStorage, clock: &ManualClock) -> LedgerRunner {
    LedgerRunner::new(storage, &VotingLedgerConfig::default(), clock.ledger_clock()).unwrap()
}

#[allow(dead_code)]
pub fn create_event(title: &str, duration_seconds: u64) -> CallMessage<C> {
    CallMessage::CreateEvent {
        title: title.to_owned(),
        duration_seconds,
    }
}

#[allow(dead_code)]
pub fn register(event_id: u64, name: &str) -> CallMessage<C> {
    CallMessage::RegisterCandidate {
        event_id,
        name: name.to_owned(),
        wallet_address: address(name),
    }
}

#[allow(dead_code)]
pub fn vote(event_id: u64, candidate_index: u32) -> CallMessage<C> {
    CallMessage::Vote {
        event_id,
        candidate_index,
    }
}
