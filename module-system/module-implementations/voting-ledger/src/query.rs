use serde::{Deserialize, Serialize};
use voting_modules_api::{Context, WorkingSet};

use crate::{VotingError, VotingLedger};

/// Metadata of a voting event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventResponse {
    pub event_id: u64,
    pub title: String,
    pub duration_seconds: u64,
    pub created_at: u64,
    pub ends_at: u64,
    pub ended: bool,
    pub candidate_count: usize,
    pub total_votes: u64,
    pub winner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateResponse<A> {
    pub name: String,
    pub wallet_address: A,
    pub vote_count: u64,
}

impl<C: Context> VotingLedger<C> {
    /// Number of events created so far.
    pub fn event_count(&self, working_set: &mut WorkingSet<C::Storage>) -> u64 {
        self.event_count.get(working_set).unwrap_or_default()
    }

    pub fn get_event(
        &self,
        event_id: u64,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<EventResponse, VotingError> {
        let event = self.get_event_or_err(event_id, working_set)?;
        Ok(EventResponse {
            event_id,
            ends_at: event.ends_at(),
            candidate_count: event.candidates.len(),
            total_votes: event.total_votes(),
            title: event.title,
            duration_seconds: event.duration_seconds,
            created_at: event.created_at,
            ended: event.ended,
            winner: event.winner,
        })
    }

    /// Candidates in registration order.
    pub fn get_candidates(
        &self,
        event_id: u64,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<Vec<CandidateResponse<C::Address>>, VotingError> {
        let event = self.get_event_or_err(event_id, working_set)?;
        Ok(event
            .candidates
            .into_iter()
            .map(|candidate| CandidateResponse {
                name: candidate.name,
                wallet_address: candidate.wallet_address,
                vote_count: candidate.vote_count,
            })
            .collect())
    }

    pub fn has_voted(
        &self,
        event_id: u64,
        voter: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<bool, VotingError> {
        self.get_event_or_err(event_id, working_set)?;
        Ok(self
            .has_voted
            .contains(&(event_id, voter.clone()), working_set))
    }
}
