pub mod call;
mod error;
mod event;
pub mod genesis;
pub mod query;
mod types;


pub use call::CallMessage;
pub use error::VotingError;
pub use event::LedgerEvent;
pub use genesis::VotingLedgerConfig;
pub use query::{CandidateResponse, EventResponse};
pub use types::{Candidate, VotingEvent};
use voting_modules_api::{Context, Error, ModuleInfo, Prefix, Spec, StateMap, StateValue, WorkingSet};

const MODULE_NAME: &str = "VotingLedger";

/// The voting ledger records voting events, their candidate rosters and
/// per-voter ballots, and declares a winner when voting is ended.
///
/// Anyone may create an event. An event accepts ballots from its creation
/// until `created_at + duration_seconds` (inclusive), one ballot per caller
/// address.
#[derive(Clone)]
pub struct VotingLedger<C: Context> {
    /// Address of the module.
    pub address: C::Address,

    /// Number of events created so far, which is also the id of the last one.
    pub(crate) event_count: StateValue<u64>,

    /// Events by id. Ids start at 1.
    pub(crate) events: StateMap<u64, VotingEvent<C>>,

    /// `(event id, voter)` pairs that already cast a ballot.
    pub(crate) has_voted: StateMap<(u64, C::Address), bool>,
}

impl<C: Context> Default for VotingLedger<C> {
    fn default() -> Self {
        let module_path = module_path!();
        let storage = |name: &'static str| -> voting_state::Prefix {
            Prefix::new_storage(module_path, MODULE_NAME, name).into()
        };

        Self {
            address: C::Address::from(Prefix::new_module(module_path, MODULE_NAME).hash()),
            event_count: StateValue::new(storage("event_count")),
            events: StateMap::new(storage("events")),
            has_voted: StateMap::new(storage("has_voted")),
        }
    }
}

impl<C: Context> ModuleInfo for VotingLedger<C> {
    type Context = C;

    fn address(&self) -> &<Self::Context as Spec>::Address {
        &self.address
    }

    fn prefix(&self) -> Prefix {
        Prefix::new_module(module_path!(), MODULE_NAME)
    }
}

impl<C: Context> voting_modules_api::Module for VotingLedger<C> {
    type Context = C;

    type Config = VotingLedgerConfig;

    type CallMessage = call::CallMessage<C>;

    fn genesis(
        &self,
        config: &Self::Config,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(), Error> {
        Ok(self.init_module(config, working_set)?)
    }

    fn call(
        &self,
        msg: Self::CallMessage,
        context: &Self::Context,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<voting_modules_api::CallResponse, Error> {
        match msg {
            call::CallMessage::CreateEvent {
                title,
                duration_seconds,
            } => {
                self.create_event(title, duration_seconds, context, working_set)?;
            }

            call::CallMessage::RegisterCandidate {
                event_id,
                name,
                wallet_address,
            } => {
                self.register_candidate(event_id, name, wallet_address, working_set)?;
            }

            call::CallMessage::Vote {
                event_id,
                candidate_index,
            } => {
                self.vote(event_id, candidate_index, context, working_set)?;
            }

            call::CallMessage::EndVoting { event_id } => {
                self.end_voting(event_id, working_set)?;
            }
        }
        Ok(voting_modules_api::CallResponse::default())
    }
}
