use anyhow::{anyhow, bail, ensure, Result};
use voting_modules_api::{Context, WorkingSet};

use crate::event::LedgerEvent;
use crate::types::{Candidate, VotingEvent};
use crate::{VotingError, VotingLedger};

/// Call actions supported by the module.
#[cfg_attr(
    feature = "native",
    derive(serde::Serialize),
    derive(serde::Deserialize),
    derive(schemars::JsonSchema),
    serde(bound = "C::Address: serde::Serialize + serde::de::DeserializeOwned"),
    schemars(bound = "C::Address: ::schemars::JsonSchema", rename = "CallMessage")
)]
#[derive(borsh::BorshDeserialize, borsh::BorshSerialize, Debug, PartialEq, Clone)]
pub enum CallMessage<C: Context> {
    /// Opens a new voting event. Its window starts at the time of the call.
    CreateEvent {
        /// Non-empty title.
        title: String,
        /// Length of the voting window.
        duration_seconds: u64,
    },
    /// Appends a candidate to the roster of an event.
    RegisterCandidate {
        event_id: u64,
        /// Non-empty name, reported as the winner.
        name: String,
        /// Reference identity of the candidate.
        wallet_address: C::Address,
    },
    /// Casts the sender's ballot.
    Vote {
        event_id: u64,
        /// Zero-based position in the roster.
        candidate_index: u32,
    },
    /// Closes the event and declares the winner.
    EndVoting { event_id: u64 },
}

impl<C: Context> VotingLedger<C> {
    /// Creates a voting event and returns its id.
    pub fn create_event(
        &self,
        title: String,
        duration_seconds: u64,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<u64> {
        ensure!(
            !title.is_empty(),
            VotingError::InvalidInput("title must not be empty")
        );

        let event_id = self
            .event_count
            .get(working_set)
            .unwrap_or_default()
            .checked_add(1)
            .ok_or_else(|| anyhow!("Event id overflow"))?;

        let event = VotingEvent::<C>::new(title.clone(), duration_seconds, context.timestamp());
        self.events.set(&event_id, &event, working_set);
        self.event_count.set(&event_id, working_set);

        LedgerEvent::EventCreated {
            event_id,
            title,
            creator: context.sender().to_string(),
        }
        .emit(working_set)?;

        Ok(event_id)
    }

    /// Appends a candidate and returns its ballot index.
    ///
    /// Registration is accepted at any time, including after ballots were cast
    /// or after the event was ended.
    pub fn register_candidate(
        &self,
        event_id: u64,
        name: String,
        wallet_address: C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<u32> {
        let mut event = self.get_event_or_err(event_id, working_set)?;
        ensure!(
            !name.is_empty(),
            VotingError::InvalidInput("candidate name must not be empty")
        );

        let index = u32::try_from(event.candidates.len())
            .map_err(|_| anyhow!("Too many candidates in event {event_id}"))?;
        event
            .candidates
            .push(Candidate::new(name.clone(), wallet_address));
        self.events.set(&event_id, &event, working_set);

        LedgerEvent::CandidateRegistered {
            event_id,
            index,
            name,
        }
        .emit(working_set)?;

        Ok(index)
    }

    /// Counts the sender's ballot for `candidate_index`.
    pub fn vote(
        &self,
        event_id: u64,
        candidate_index: u32,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        let mut event = self.get_event_or_err(event_id, working_set)?;

        if event.ended || !event.is_open_at(context.timestamp()) {
            bail!(VotingError::VotingEnded);
        }

        let voter_key = (event_id, context.sender().clone());
        ensure!(
            !self.has_voted.contains(&voter_key, working_set),
            VotingError::AlreadyVoted
        );

        let candidate = usize::try_from(candidate_index)
            .ok()
            .and_then(|index| event.candidates.get_mut(index))
            .ok_or(VotingError::InvalidCandidate {
                event_id,
                index: candidate_index,
            })?;

        candidate.vote_count = candidate
            .vote_count
            .checked_add(1)
            .ok_or_else(|| anyhow!("Vote count overflow"))?;

        self.events.set(&event_id, &event, working_set);
        self.has_voted.set(&voter_key, &true, working_set);

        Ok(())
    }

    /// Freezes the event and returns the name of the winner.
    ///
    /// Ending is allowed before the window elapses.
    pub fn end_voting(
        &self,
        event_id: u64,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<String> {
        let mut event = self.get_event_or_err(event_id, working_set)?;
        ensure!(!event.ended, VotingError::AlreadyEnded);

        let winner_index = event
            .leading_candidate()
            .ok_or(VotingError::NoCandidates(event_id))?;
        let winner = event.candidates[winner_index].name.clone();

        event.ended = true;
        event.winner = Some(winner.clone());
        self.events.set(&event_id, &event, working_set);

        LedgerEvent::VotingEnded {
            event_id,
            winner: winner.clone(),
        }
        .emit(working_set)?;

        Ok(winner)
    }

    pub(crate) fn get_event_or_err(
        &self,
        event_id: u64,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<VotingEvent<C>, VotingError> {
        self.events
            .get(&event_id, working_set)
            .ok_or(VotingError::NotFound(event_id))
    }
}
