use voting_ledger::{CallMessage, VotingLedger, VotingLedgerConfig};
use voting_modules_api::default_context::DefaultContext;
use voting_modules_api::utils::generate_address;
use voting_modules_api::{Context, Error, Module, ProverStorage, StateCheckpoint, Storage};

pub type C = DefaultContext;

pub const START: u64 = 1_700_000_000;

pub fn sender(key: &str, timestamp: u64) -> C {
    C::new(generate_address::<C>(key), timestamp)
}

/// Runs genesis and commits it to `storage`.
pub fn genesis(ledger: &VotingLedger<C>, storage: &ProverStorage) {
    let mut working_set = StateCheckpoint::new(storage.clone()).to_revertable();
    ledger
        .genesis(&VotingLedgerConfig::default(), &mut working_set)
        .unwrap();
    let writes = working_set.checkpoint().freeze();
    storage.commit(&writes).unwrap();
}

/// Applies a single call the way a host does: the working set is kept when the
/// call succeeds and reverted when it fails, and only then committed.
pub fn apply(
    ledger: &VotingLedger<C>,
    storage: &ProverStorage,
    message: CallMessage<C>,
    context: &C,
) -> Result<(), Error> {
    let mut working_set = StateCheckpoint::new(storage.clone()).to_revertable();
    let result = ledger.call(message, context, &mut working_set);
    let mut checkpoint = if result.is_ok() {
        working_set.checkpoint()
    } else {
        working_set.revert()
    };
    storage.commit(&checkpoint.freeze()).unwrap();
    result.map(|_| ())
}

#[allow(dead_code)]
pub fn create_event_with_candidates(
    ledger: &VotingLedger<C>,
    storage: &ProverStorage,
    title: &str,
    duration_seconds: u64,
    names: &[&str],
) {
    let owner = sender("owner", START);
    apply(
        ledger,
        storage,
        CallMessage::CreateEvent {
            title: title.to_owned(),
            duration_seconds,
        },
        &owner,
    )
    .unwrap();
    for name in names {
        apply(
            ledger,
            storage,
            CallMessage::RegisterCandidate {
                event_id: 1,
                name: (*name).to_owned(),
                wallet_address: generate_address::<C>(name),
            },
            &owner,
        )
        .unwrap();
    }
}
