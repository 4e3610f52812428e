//! Storage and state management interfaces for voting ledger modules.

#![deny(missing_docs)]

pub mod codec;
/// Storage configuration.
pub mod config;
mod containers;
mod event;
mod prover_storage;
mod scratchpad;

/// Trait and type definitions related to the [`Storage`] trait.
pub mod storage;

#[cfg(test)]
mod state_tests;

pub use containers::{StateMap, StateValue};
pub use event::Event;
pub use prover_storage::ProverStorage;
pub use scratchpad::{StateCheckpoint, WorkingSet};
pub use storage::{OrderedWrites, Storage, StorageKey, StorageValue};

/// A prefix prepended to each key before insertion and retrieval from the storage.
///
/// All state containers of a module share the same working set, so every container
/// gets its own prefix to avoid key collisions.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    Debug,
    PartialEq,
    Eq,
    Clone,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Prefix {
    prefix: Vec<u8>,
}

impl Prefix {
    /// Creates a new prefix from a byte vector.
    pub fn new(prefix: Vec<u8>) -> Self {
        Self { prefix }
    }

    /// Returns the raw bytes of the prefix.
    pub fn as_bytes(&self) -> &[u8] {
        &self.prefix
    }

    /// Returns the length in bytes of the prefix.
    pub fn len(&self) -> usize {
        self.prefix.len()
    }

    /// Returns `true` if the prefix is empty, `false` otherwise.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty()
    }
}
