use serde::{Deserialize, Serialize};
use voting_state::{Event, Storage, WorkingSet};

/// Notifications emitted by the ledger. Each one is appended to the working set
/// under its variant name, with the fields as a JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    EventCreated {
        event_id: u64,
        title: String,
        creator: String,
    },
    CandidateRegistered {
        event_id: u64,
        index: u32,
        name: String,
    },
    VotingEnded {
        event_id: u64,
        winner: String,
    },
}

impl LedgerEvent {
    pub fn key(&self) -> &'static str {
        match self {
            LedgerEvent::EventCreated { .. } => "EventCreated",
            LedgerEvent::CandidateRegistered { .. } => "CandidateRegistered",
            LedgerEvent::VotingEnded { .. } => "VotingEnded",
        }
    }

    pub(crate) fn emit<S: Storage>(&self, working_set: &mut WorkingSet<S>) -> anyhow::Result<()> {
        // Externally tagged: the payload is the inner object of `{"<key>": {...}}`.
        let value = match serde_json::to_value(self)? {
            serde_json::Value::Object(mut tagged) => tagged
                .remove(self.key())
                .ok_or_else(|| anyhow::anyhow!("Event {} lost its payload", self.key()))?,
            other => other,
        };
        working_set.add_event(self.key(), &value.to_string());
        Ok(())
    }

    /// Decodes an event previously emitted by the ledger.
    /// Returns `None` for events of other modules.
    pub fn decode(event: &Event) -> Option<Self> {
        let payload: serde_json::Value = serde_json::from_str(event.value()).ok()?;
        let mut tagged = serde_json::Map::new();
        tagged.insert(event.key().to_owned(), payload);
        serde_json::from_value(serde_json::Value::Object(tagged)).ok()
    }
}
