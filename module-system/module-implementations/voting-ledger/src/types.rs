use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use voting_modules_api::Context;

/// A candidate of a voting event. Its ballot index is its position in the roster.
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(bound = "C::Address: Serialize + serde::de::DeserializeOwned")]
pub struct Candidate<C: Context> {
    pub name: String,
    /// Payout/reference identity. Never used as a tally key.
    pub wallet_address: C::Address,
    pub vote_count: u64,
}

impl<C: Context> Candidate<C> {
    pub(crate) fn new(name: String, wallet_address: C::Address) -> Self {
        Self {
            name,
            wallet_address,
            vote_count: 0,
        }
    }
}

/// Stored record of a voting event.
#[derive(BorshDeserialize, BorshSerialize, Debug, Clone, PartialEq)]
pub struct VotingEvent<C: Context> {
    pub title: String,
    pub duration_seconds: u64,
    pub created_at: u64,
    pub ended: bool,
    pub candidates: Vec<Candidate<C>>,
    /// Set once, when voting is ended.
    pub winner: Option<String>,
}

impl<C: Context> VotingEvent<C> {
    pub(crate) fn new(title: String, duration_seconds: u64, created_at: u64) -> Self {
        Self {
            title,
            duration_seconds,
            created_at,
            ended: false,
            candidates: Vec::new(),
            winner: None,
        }
    }

    /// Last second at which a ballot is still accepted.
    pub fn ends_at(&self) -> u64 {
        self.created_at.saturating_add(self.duration_seconds)
    }

    /// `true` while `now` lies inside `[created_at, created_at + duration_seconds]`.
    pub fn is_open_at(&self, now: u64) -> bool {
        now <= self.ends_at()
    }

    pub fn total_votes(&self) -> u64 {
        self.candidates.iter().map(|c| c.vote_count).sum()
    }

    /// Index of the candidate with the strictly greatest count.
    /// A later candidate never overtakes an earlier one with the same count.
    pub fn leading_candidate(&self) -> Option<usize> {
        let mut leader: Option<(usize, u64)> = None;
        for (index, candidate) in self.candidates.iter().enumerate() {
            match leader {
                Some((_, max)) if candidate.vote_count <= max => {}
                _ => leader = Some((index, candidate.vote_count)),
            }
        }
        leader.map(|(index, _)| index)
    }
}
