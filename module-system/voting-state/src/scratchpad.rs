use std::collections::HashMap;
use std::fmt::Debug;

use crate::codec::{StateKeyCodec, StateValueCodec};
use crate::event::Event;
use crate::storage::{OrderedWrites, StorageKey, StorageValue};
use crate::{Prefix, Storage};

/// Accumulates writes on top of the underlying storage.
struct Delta<S: Storage> {
    inner: S,
    writes: HashMap<StorageKey, StorageValue>,
}

/// A wrapper that adds additional writes on top of an underlying [`Delta`].
/// Used for calls that might fail: the whole call is discarded on revert,
/// without touching what previous calls already wrote to the delta.
struct RevertableDelta<S: Storage> {
    /// The inner (non-revertable) delta
    inner: Delta<S>,
    /// The most recent values written. Reads are first checked
    /// against this map, and if the key is not present, the underlying Delta is checked.
    writes: HashMap<StorageKey, StorageValue>,
}

impl<S: Storage> Debug for RevertableDelta<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevertableDelta")
            .field("pending_writes", &self.writes.len())
            .finish()
    }
}

/// This structure is responsible for storing the committed writes
/// and is obtained from the [`WorkingSet`] by using either the `checkpoint` or `revert` method.
pub struct StateCheckpoint<S: Storage> {
    delta: Delta<S>,
}

impl<S: Storage> StateCheckpoint<S> {
    /// Creates an empty checkpoint on top of `inner`.
    pub fn new(inner: S) -> Self {
        Self {
            delta: Delta::new(inner),
        }
    }

    /// Opens a revertable [`WorkingSet`] on top of this checkpoint.
    pub fn to_revertable(self) -> WorkingSet<S> {
        WorkingSet {
            delta: self.delta.get_revertable_wrapper(),
            events: Default::default(),
        }
    }

    /// Drains the accumulated writes, ordered by key, ready to be committed to the storage.
    pub fn freeze(&mut self) -> OrderedWrites {
        self.delta.freeze()
    }
}

/// This structure contains the pending writes and the events collected during the execution of a call.
/// There are two ways to convert it into a [`StateCheckpoint`]:
/// 1. By using the [`WorkingSet::checkpoint`] method, where all the changes are added to the underlying [`StateCheckpoint`].
/// 2. By using the [`WorkingSet::revert`] method, where the most recent changes and events are dropped.
pub struct WorkingSet<S: Storage> {
    delta: RevertableDelta<S>,
    events: Vec<Event>,
}

impl<S: Storage> Debug for WorkingSet<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkingSet")
            .field("delta", &self.delta)
            .field("events", &self.events)
            .finish()
    }
}

impl<S: Storage> WorkingSet<S> {
    /// Creates a working set directly on top of `inner`.
    pub fn new(inner: S) -> Self {
        StateCheckpoint::new(inner).to_revertable()
    }

    /// Keeps the pending writes. Events are dropped; take them first with
    /// [`WorkingSet::take_events`] if they are needed.
    pub fn checkpoint(self) -> StateCheckpoint<S> {
        StateCheckpoint {
            delta: self.delta.commit(),
        }
    }

    /// Discards the pending writes and events.
    pub fn revert(self) -> StateCheckpoint<S> {
        StateCheckpoint {
            delta: self.delta.revert(),
        }
    }

    pub(crate) fn get(&mut self, key: &StorageKey) -> Option<StorageValue> {
        self.delta.get(key)
    }

    pub(crate) fn set(&mut self, key: StorageKey, value: StorageValue) {
        self.delta.set(key, value)
    }

    /// Appends an event to the events of the current call.
    pub fn add_event(&mut self, key: &str, value: &str) {
        self.events.push(Event::new(key, value));
    }

    /// Removes and returns the collected events.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// The events collected so far.
    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

impl<S: Storage> WorkingSet<S> {
    pub(crate) fn set_value<K, V, C>(&mut self, prefix: &Prefix, key: &K, value: &V, codec: &C)
    where
        C: StateKeyCodec<K> + StateValueCodec<V>,
    {
        let storage_key = StorageKey::new(prefix, key, codec);
        let storage_value = StorageValue::new(value, codec);
        self.set(storage_key, storage_value);
    }

    pub(crate) fn get_value<K, V, C>(&mut self, prefix: &Prefix, key: &K, codec: &C) -> Option<V>
    where
        C: StateKeyCodec<K> + StateValueCodec<V>,
    {
        let storage_key = StorageKey::new(prefix, key, codec);
        self.get_decoded(&storage_key, codec)
    }

    pub(crate) fn set_singleton<V, C>(&mut self, prefix: &Prefix, value: &V, codec: &C)
    where
        C: StateValueCodec<V>,
    {
        let storage_key = StorageKey::singleton(prefix);
        let storage_value = StorageValue::new(value, codec);
        self.set(storage_key, storage_value);
    }

    pub(crate) fn get_singleton<V, C>(&mut self, prefix: &Prefix, codec: &C) -> Option<V>
    where
        C: StateValueCodec<V>,
    {
        let storage_key = StorageKey::singleton(prefix);
        self.get_decoded(&storage_key, codec)
    }

    fn get_decoded<V, C>(&mut self, storage_key: &StorageKey, codec: &C) -> Option<V>
    where
        C: StateValueCodec<V>,
    {
        let storage_value = self.get(storage_key)?;

        // It is ok to panic here. Deserialization problem means that something is terribly wrong.
        Some(codec.decode_value(storage_value.value()))
    }
}

impl<S: Storage> RevertableDelta<S> {
    fn get(&mut self, key: &StorageKey) -> Option<StorageValue> {
        match self.writes.get(key) {
            Some(value) => Some(value.clone()),
            None => self.inner.get(key),
        }
    }

    fn set(&mut self, key: StorageKey, value: StorageValue) {
        self.writes.insert(key, value);
    }

    fn commit(self) -> Delta<S> {
        let mut inner = self.inner;
        inner.writes.extend(self.writes);
        inner
    }

    fn revert(self) -> Delta<S> {
        self.inner
    }
}

impl<S: Storage> Delta<S> {
    fn new(inner: S) -> Self {
        Self {
            inner,
            writes: Default::default(),
        }
    }

    fn get_revertable_wrapper(self) -> RevertableDelta<S> {
        RevertableDelta {
            inner: self,
            writes: Default::default(),
        }
    }

    fn get(&self, key: &StorageKey) -> Option<StorageValue> {
        match self.writes.get(key) {
            Some(value) => Some(value.clone()),
            None => self.inner.get(key),
        }
    }

    fn freeze(&mut self) -> OrderedWrites {
        let mut ordered_writes: Vec<_> = std::mem::take(&mut self.writes).into_iter().collect();
        ordered_writes.sort_by(|(a, _), (b, _)| a.cmp(b));
        OrderedWrites { ordered_writes }
    }
}
