use voting_ledger::VotingError;

/// Errors returned by the node to its clients.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    /// The ledger rejected the call. Nothing was committed.
    #[error(transparent)]
    Rejected(voting_modules_api::Error),
    /// A query referenced an unknown voting event.
    #[error(transparent)]
    Query(#[from] VotingError),
    /// Committing to the storage failed.
    #[error("Storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}
