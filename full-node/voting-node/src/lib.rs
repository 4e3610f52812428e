#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

mod clock;
/// Node configuration files.
pub mod config;
mod error;
/// Audit log of ledger events.
pub mod event_log;
/// JSON-RPC server.
pub mod rpc;
mod runner;

pub use clock::LedgerClock;
pub use config::{from_json_path, from_toml_path, NodeConfig, RpcConfig, StorageConfig};
pub use error::NodeError;
pub use event_log::{EventLog, LoggedEvent};
pub use rpc::{rpc_module, start_rpc_server, SubmitCall, VOTING_RPC_ERROR};
pub use runner::{CallReceipt, LedgerRunner};
