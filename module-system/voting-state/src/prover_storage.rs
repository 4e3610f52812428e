use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use anyhow::Context;
use rocksdb::{IteratorMode, Options, WriteBatch, WriteOptions, DB};
use tracing::debug;

use crate::config::Config;
use crate::storage::{OrderedWrites, Storage, StorageKey, StorageValue};

/// A [`Storage`] implementation to be used by the ledger host.
///
/// Created with [`ProverStorage::with_path`], the state lives in a RocksDB database
/// and every commit is written as one synced batch. [`ProverStorage::temporary`]
/// keeps the state in memory only.
#[derive(Clone)]
pub struct ProverStorage {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    Memory(Arc<RwLock<BTreeMap<Vec<u8>, Vec<u8>>>>),
    Rocks { db: Arc<DB>, path: PathBuf },
}

impl std::fmt::Debug for ProverStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProverStorage")
            .field("path", &self.path())
            .finish()
    }
}

impl ProverStorage {
    const DB_PATH_SUFFIX: &'static str = "state-db";

    /// Creates a storage that only lives in memory.
    pub fn temporary() -> Self {
        Self {
            backend: Backend::Memory(Default::default()),
        }
    }

    /// Creates a new [`ProverStorage`] instance at the specified path, opening
    /// or creating the RocksDB database at `{path}/state-db`.
    pub fn with_path(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let path = path.as_ref().join(Self::DB_PATH_SUFFIX);
        let db = DB::open(&gen_rocksdb_options(), &path)
            .with_context(|| format!("Failed to open state database {}", path.display()))?;
        debug!(path = %path.display(), "Opened state database");

        Ok(Self {
            backend: Backend::Rocks {
                db: Arc::new(db),
                path,
            },
        })
    }

    /// Creates a storage from a [`Config`].
    pub fn with_config(config: &Config) -> Result<Self, anyhow::Error> {
        match &config.path {
            Some(path) => Self::with_path(path),
            None => Ok(Self::temporary()),
        }
    }

    /// Location of the database, if the storage is persistent.
    pub fn path(&self) -> Option<&Path> {
        match &self.backend {
            Backend::Memory(_) => None,
            Backend::Rocks { path, .. } => Some(path),
        }
    }
}

/// RocksDB options for the state database.
fn gen_rocksdb_options() -> Options {
    let mut db_opts = Options::default();
    db_opts.set_max_open_files(5000);
    db_opts.set_max_total_wal_size(1u64 << 30);
    db_opts.set_max_background_jobs(16);
    db_opts.create_if_missing(true);
    db_opts
}

impl Storage for ProverStorage {
    fn get(&self, key: &StorageKey) -> Option<StorageValue> {
        match &self.backend {
            Backend::Memory(db) => db
                .read()
                .unwrap_or_else(|e| e.into_inner())
                .get(key.key())
                .cloned()
                .map(Into::into),
            Backend::Rocks { db, .. } => match db.get(key.key()) {
                Ok(value) => value.map(Into::into),
                // It is ok to panic here, we assume the db is available and consistent.
                Err(e) => panic!("Unable to read value from db: {e}"),
            },
        }
    }

    fn commit(&self, writes: &OrderedWrites) -> anyhow::Result<()> {
        if writes.is_empty() {
            return Ok(());
        }

        match &self.backend {
            Backend::Memory(db) => {
                let mut db = db.write().unwrap_or_else(|e| e.into_inner());
                for (key, value) in &writes.ordered_writes {
                    db.insert(key.key().to_vec(), value.value().to_vec());
                }
            }
            Backend::Rocks { db, .. } => {
                let mut batch = WriteBatch::default();
                for (key, value) in &writes.ordered_writes {
                    batch.put(key.key(), value.value());
                }
                let mut write_opts = WriteOptions::default();
                write_opts.set_sync(true);
                db.write_opt(batch, &write_opts)
                    .context("Failed to commit state writes")?;
            }
        }

        debug!(writes = writes.ordered_writes.len(), "Committed state writes");
        Ok(())
    }

    fn is_empty(&self) -> bool {
        match &self.backend {
            Backend::Memory(db) => db.read().unwrap_or_else(|e| e.into_inner()).is_empty(),
            Backend::Rocks { db, .. } => db.iterator(IteratorMode::Start).next().is_none(),
        }
    }
}
