use proptest::prelude::*;

use super::*;

fn create_state_value(working_set: &mut WorkingSet<ProverStorage>) -> StateValue<u64> {
    let value = StateValue::new(Prefix::new(b"test/value".to_vec()));
    value.set(&7, working_set);
    value
}

#[test]
fn test_value_and_map_roundtrip() {
    let mut working_set = WorkingSet::new(ProverStorage::temporary());

    let value = create_state_value(&mut working_set);
    assert_eq!(value.get(&mut working_set), Some(7));

    let map: StateMap<u64, String> = StateMap::new(Prefix::new(b"test/map".to_vec()));
    map.set(&1, &"one".to_owned(), &mut working_set);
    assert_eq!(map.get(&1, &mut working_set), Some("one".to_owned()));
    assert!(map.get(&2, &mut working_set).is_none());
    assert!(map.contains(&1, &mut working_set));
    assert!(!map.contains(&2, &mut working_set));
}

#[test]
fn test_prefixes_do_not_collide() {
    let mut working_set = WorkingSet::new(ProverStorage::temporary());

    let first: StateMap<u64, u64> = StateMap::new(Prefix::new(b"first/".to_vec()));
    let second: StateMap<u64, u64> = StateMap::new(Prefix::new(b"second/".to_vec()));
    first.set(&1, &10, &mut working_set);

    assert_eq!(first.get(&1, &mut working_set), Some(10));
    assert_eq!(second.get(&1, &mut working_set), None);
}

#[test]
fn test_revert_discards_writes_and_events() {
    let mut working_set = WorkingSet::new(ProverStorage::temporary());
    let value = create_state_value(&mut working_set);
    let checkpoint = working_set.checkpoint();

    let mut working_set = checkpoint.to_revertable();
    value.set(&100, &mut working_set);
    working_set.add_event("test", "should disappear");
    assert_eq!(value.get(&mut working_set), Some(100));
    let checkpoint = working_set.revert();

    let mut working_set = checkpoint.to_revertable();
    assert_eq!(value.get(&mut working_set), Some(7));
    assert!(working_set.events().is_empty());
}

#[test]
fn test_commit_is_visible_to_new_working_sets() {
    let storage = ProverStorage::temporary();
    assert!(storage.is_empty());

    let mut working_set = WorkingSet::new(storage.clone());
    let value = create_state_value(&mut working_set);

    // Nothing reaches the storage until the checkpoint is committed.
    assert!(storage.is_empty());

    let mut checkpoint = working_set.checkpoint();
    storage.commit(&checkpoint.freeze()).unwrap();

    let mut working_set = WorkingSet::new(storage.clone());
    assert_eq!(value.get(&mut working_set), Some(7));
    assert!(!storage.is_empty());
}

#[test]
fn test_committed_writes_survive_reopen() {
    let tmpdir = tempfile::tempdir().unwrap();
    let value: StateValue<String> = StateValue::new(Prefix::new(b"test/title".to_vec()));
    let map: StateMap<u32, u64> = StateMap::new(Prefix::new(b"test/votes".to_vec()));

    {
        let storage = ProverStorage::with_path(tmpdir.path()).unwrap();
        assert!(storage.is_empty());
        let mut working_set = WorkingSet::new(storage.clone());
        value.set(&"Test Election".to_owned(), &mut working_set);
        map.set(&1, &3, &mut working_set);
        map.set(&2, &5, &mut working_set);
        let mut checkpoint = working_set.checkpoint();
        storage.commit(&checkpoint.freeze()).unwrap();
    }

    let storage = ProverStorage::with_path(tmpdir.path()).unwrap();
    assert!(!storage.is_empty());
    assert_eq!(
        storage.path(),
        Some(tmpdir.path().join("state-db").as_path())
    );
    let mut working_set = WorkingSet::new(storage);
    assert_eq!(
        value.get(&mut working_set),
        Some("Test Election".to_owned())
    );
    assert_eq!(map.get(&1, &mut working_set), Some(3));
    assert_eq!(map.get(&2, &mut working_set), Some(5));
    assert_eq!(map.get(&3, &mut working_set), None);
}

#[test]
fn test_uncommitted_writes_are_not_persisted() {
    let tmpdir = tempfile::tempdir().unwrap();
    let value: StateValue<u64> = StateValue::new(Prefix::new(b"test/count".to_vec()));

    {
        let storage = ProverStorage::with_path(tmpdir.path()).unwrap();
        let mut working_set = WorkingSet::new(storage.clone());
        value.set(&1, &mut working_set);
        let mut checkpoint = working_set.checkpoint();
        storage.commit(&checkpoint.freeze()).unwrap();

        let mut working_set = WorkingSet::new(storage);
        value.set(&2, &mut working_set);
    }

    let storage = ProverStorage::with_path(tmpdir.path()).unwrap();
    let mut working_set = WorkingSet::new(storage);
    assert_eq!(value.get(&mut working_set), Some(1));
}

#[test]
fn test_temporary_storage_has_no_path() {
    let storage = ProverStorage::temporary();
    assert!(storage.path().is_none());
    assert!(storage.is_empty());
}

#[test]
fn test_ordered_writes_are_sorted() {
    let mut working_set = WorkingSet::new(ProverStorage::temporary());
    let map: StateMap<u8, u8> = StateMap::new(Prefix::new(b"m".to_vec()));
    for key in [5u8, 1, 3] {
        map.set(&key, &key, &mut working_set);
    }
    let writes = working_set.checkpoint().freeze();
    let keys: Vec<_> = writes
        .ordered_writes
        .iter()
        .map(|(key, _)| key.key().to_vec())
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

proptest! {
    #[test]
    fn last_write_wins(values in proptest::collection::vec(any::<u64>(), 1..20)) {
        let mut working_set = WorkingSet::new(ProverStorage::temporary());
        let value: StateValue<u64> = StateValue::new(Prefix::new(b"p".to_vec()));
        for v in &values {
            value.set(v, &mut working_set);
        }
        prop_assert_eq!(value.get(&mut working_set), values.last().copied());
    }
}
