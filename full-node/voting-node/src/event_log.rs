use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use voting_modules_api::Prefix;
use voting_state::{Event, StateMap, StateValue, Storage, WorkingSet};

const LOG_NAME: &str = "EventLog";

/// Most entries returned by a single [`EventLog::range`] query.
pub const MAX_LOGGED_EVENTS_PER_QUERY: u64 = 100;

/// A ledger event as kept by the audit log.
#[derive(
    Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct LoggedEvent {
    /// Position in the log, starting at 0.
    pub sequence: u64,
    /// Time of the call that emitted the event.
    pub timestamp: u64,
    /// The event as emitted by the ledger.
    pub event: Event,
}

/// Append-only log of the events emitted by successful calls.
///
/// The log lives in the same storage as the ledger, so an entry is committed
/// together with the state changes of the call that emitted it.
pub struct EventLog {
    next_sequence: StateValue<u64>,
    entries: StateMap<u64, LoggedEvent>,
}

impl Default for EventLog {
    fn default() -> Self {
        let module_path = module_path!();
        Self {
            next_sequence: StateValue::new(
                Prefix::new_storage(module_path, LOG_NAME, "next_sequence").into(),
            ),
            entries: StateMap::new(Prefix::new_storage(module_path, LOG_NAME, "entries").into()),
        }
    }
}

impl EventLog {
    /// Number of entries in the log.
    pub fn len<S: Storage>(&self, working_set: &mut WorkingSet<S>) -> u64 {
        self.next_sequence.get(working_set).unwrap_or_default()
    }

    /// Appends `events` in order and returns them as logged.
    pub fn append<S: Storage>(
        &self,
        events: Vec<Event>,
        timestamp: u64,
        working_set: &mut WorkingSet<S>,
    ) -> anyhow::Result<Vec<LoggedEvent>> {
        let mut sequence = self.len(working_set);
        let mut logged = Vec::with_capacity(events.len());
        for event in events {
            let entry = LoggedEvent {
                sequence,
                timestamp,
                event,
            };
            self.entries.set(&sequence, &entry, working_set);
            logged.push(entry);
            sequence = sequence
                .checked_add(1)
                .ok_or_else(|| anyhow::anyhow!("Event log is full"))?;
        }
        self.next_sequence.set(&sequence, working_set);
        Ok(logged)
    }

    /// Entries starting at sequence `from`, at most `limit` of them
    /// (capped at [`MAX_LOGGED_EVENTS_PER_QUERY`]).
    pub fn range<S: Storage>(
        &self,
        from: u64,
        limit: u64,
        working_set: &mut WorkingSet<S>,
    ) -> Vec<LoggedEvent> {
        let end = from
            .saturating_add(limit.min(MAX_LOGGED_EVENTS_PER_QUERY))
            .min(self.len(working_set));
        (from..end)
            .filter_map(|sequence| self.entries.get(&sequence, working_set))
            .collect()
    }
}
