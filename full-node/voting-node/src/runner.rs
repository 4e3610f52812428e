use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use voting_ledger::{CallMessage, VotingLedger, VotingLedgerConfig};
use voting_modules_api::default_context::DefaultContext;
use voting_modules_api::{
    Address, Context, Module, Prefix, ProverStorage, StateCheckpoint, Storage, WorkingSet,
};
use voting_state::StateValue;

use crate::event_log::{EventLog, LoggedEvent};
use crate::{LedgerClock, NodeError};

type C = DefaultContext;

/// Outcome of a successful call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallReceipt {
    /// Time the call was executed at.
    pub timestamp: u64,
    /// Events emitted by the call, as appended to the audit log.
    pub events: Vec<LoggedEvent>,
}

/// Applies calls to the ledger one at a time.
///
/// Every call runs in its own revertable working set: the writes and events of
/// a successful call are committed to the storage, a failed call is reverted.
/// The timestamp of every call is persisted, so a restarted runner never
/// executes a call at an earlier time than one it already executed.
pub struct LedgerRunner {
    storage: ProverStorage,
    ledger: VotingLedger<C>,
    event_log: EventLog,
    last_timestamp: StateValue<u64>,
    clock: LedgerClock,
}

impl LedgerRunner {
    /// Creates a runner on top of `storage`. Genesis runs only when the storage is empty,
    /// so a runner restarted on a persisted database keeps the existing state.
    pub fn new(
        storage: ProverStorage,
        genesis_config: &VotingLedgerConfig,
        clock: LedgerClock,
    ) -> anyhow::Result<Self> {
        let mut runner = Self {
            storage,
            ledger: VotingLedger::default(),
            event_log: EventLog::default(),
            last_timestamp: StateValue::new(
                Prefix::new_storage(module_path!(), "LedgerRunner", "last_timestamp").into(),
            ),
            clock,
        };

        if runner.storage.is_empty() {
            info!(ledger = %runner.ledger.address, "Running genesis");
            let mut working_set = StateCheckpoint::new(runner.storage.clone()).to_revertable();
            runner.ledger.genesis(genesis_config, &mut working_set)?;
            let mut checkpoint = working_set.checkpoint();
            runner.storage.commit(&checkpoint.freeze())?;
        } else {
            info!(
                event_count = runner.query(|ledger, ws| ledger.event_count(ws)),
                "Existing state found, skipping genesis"
            );
        }

        let mut working_set = WorkingSet::new(runner.storage.clone());
        if let Some(last_timestamp) = runner.last_timestamp.get(&mut working_set) {
            debug!(last_timestamp, "Resuming clock");
            runner.clock.advance_to(last_timestamp);
        }

        Ok(runner)
    }

    /// Executes `message` on behalf of `sender` at the current clock reading.
    pub fn apply(
        &mut self,
        sender: Address,
        message: CallMessage<C>,
    ) -> Result<CallReceipt, NodeError> {
        let timestamp = self.clock.now();
        let context = C::new(sender, timestamp);
        let mut working_set = StateCheckpoint::new(self.storage.clone()).to_revertable();

        if let Err(err) = self.ledger.call(message, &context, &mut working_set) {
            debug!(%sender, %err, "Call rejected");
            let mut working_set = working_set.revert().to_revertable();
            self.last_timestamp.set(&timestamp, &mut working_set);
            let mut checkpoint = working_set.checkpoint();
            self.storage.commit(&checkpoint.freeze())?;
            return Err(NodeError::Rejected(err));
        }

        let events = working_set.take_events();
        let logged = self.event_log.append(events, timestamp, &mut working_set)?;
        self.last_timestamp.set(&timestamp, &mut working_set);
        let mut checkpoint = working_set.checkpoint();
        self.storage.commit(&checkpoint.freeze())?;

        info!(%sender, timestamp, events = logged.len(), "Call applied");
        Ok(CallReceipt {
            timestamp,
            events: logged,
        })
    }

    /// Runs a read-only query against the committed state.
    pub fn query<T>(&self, query: impl FnOnce(&VotingLedger<C>, &mut WorkingSet<ProverStorage>) -> T) -> T {
        let mut working_set = WorkingSet::new(self.storage.clone());
        query(&self.ledger, &mut working_set)
    }

    /// Audit log entries starting at sequence `from`.
    pub fn logged_events(&self, from: u64, limit: u64) -> Vec<LoggedEvent> {
        let mut working_set = WorkingSet::new(self.storage.clone());
        self.event_log.range(from, limit, &mut working_set)
    }
}
