use std::path::PathBuf;

/// Configuration parameters for the [`crate::ProverStorage`].
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    /// Directory holding the state database. When absent, state lives in memory only.
    pub path: Option<PathBuf>,
}
