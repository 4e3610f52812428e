use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::codec::{StateKeyCodec, StateValueCodec};
use crate::Prefix;

/// `Key` type for the [`Storage`].
#[derive(
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    Serialize,
    Deserialize,
    BorshDeserialize,
    BorshSerialize,
)]
pub struct StorageKey {
    key: Vec<u8>,
}

impl StorageKey {
    /// Creates a new [`StorageKey`] that combines a prefix and a key.
    pub fn new<K, KC>(prefix: &Prefix, key: &K, codec: &KC) -> Self
    where
        KC: StateKeyCodec<K>,
    {
        let encoded_key = codec.encode_key(key);

        let mut full_key = Vec::<u8>::with_capacity(prefix.len() + encoded_key.len());
        full_key.extend_from_slice(prefix.as_bytes());
        full_key.extend_from_slice(&encoded_key);

        Self { key: full_key }
    }

    /// Creates a new [`StorageKey`] for a container holding a single value.
    pub fn singleton(prefix: &Prefix) -> Self {
        Self {
            key: prefix.as_bytes().to_vec(),
        }
    }

    /// Returns the raw bytes of the key.
    pub fn key(&self) -> &[u8] {
        &self.key
    }
}

/// A serialized value suitable for storing.
#[derive(
    Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize, Default,
)]
pub struct StorageValue {
    value: Vec<u8>,
}

impl From<Vec<u8>> for StorageValue {
    fn from(value: Vec<u8>) -> Self {
        Self { value }
    }
}

impl StorageValue {
    /// Create a new storage value by serializing the input with the given codec.
    pub fn new<V, VC>(value: &V, codec: &VC) -> Self
    where
        VC: StateValueCodec<V>,
    {
        Self {
            value: codec.encode_value(value),
        }
    }

    /// Get the bytes of this value.
    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

/// Writes produced by a [`crate::StateCheckpoint`], ordered by key.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OrderedWrites {
    /// The key/value pairs, sorted by key.
    pub ordered_writes: Vec<(StorageKey, StorageValue)>,
}

impl OrderedWrites {
    /// Returns `true` if there is nothing to commit.
    pub fn is_empty(&self) -> bool {
        self.ordered_writes.is_empty()
    }
}

/// An interface for retrieving values from and committing writes to a key/value store.
///
/// Implementations are expected to be cheap to clone: clones share the same
/// underlying data.
pub trait Storage: Clone {
    /// Returns the value corresponding to the key or None if key is absent.
    fn get(&self, key: &StorageKey) -> Option<StorageValue>;

    /// Applies a batch of writes atomically.
    fn commit(&self, writes: &OrderedWrites) -> anyhow::Result<()>;

    /// Indicates if the storage holds no committed data.
    fn is_empty(&self) -> bool;
}
