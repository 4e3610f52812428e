use thiserror::Error;

/// Reasons a ledger call is rejected. A rejected call leaves the ledger untouched.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum VotingError {
    #[error("Voting event {0} not found")]
    NotFound(u64),
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("Candidate index {index} is out of range for event {event_id}")]
    InvalidCandidate { event_id: u64, index: u32 },
    #[error("Voting ended")]
    VotingEnded,
    #[error("Already voted")]
    AlreadyVoted,
    #[error("Already ended")]
    AlreadyEnded,
    #[error("Voting event {0} has no candidates")]
    NoCandidates(u64),
}
