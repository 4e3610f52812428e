//! JSON-RPC interface of the node.

use std::net::SocketAddr;
use std::sync::{Mutex, MutexGuard};

use jsonrpsee::server::ServerHandle;
use jsonrpsee::types::ErrorObjectOwned;
use jsonrpsee::RpcModule;
use serde::{Deserialize, Serialize};
use tracing::info;
use voting_ledger::CallMessage;
use voting_modules_api::default_context::DefaultContext;
use voting_modules_api::utils::to_jsonrpsee_error_object;
use voting_modules_api::Address;

use crate::config::RpcConfig;
use crate::event_log::MAX_LOGGED_EVENTS_PER_QUERY;
use crate::runner::LedgerRunner;
use crate::NodeError;

/// Message of every error returned by the voting RPC methods. The error text is in `data`.
pub const VOTING_RPC_ERROR: &str = "VOTING_RPC_ERROR";

/// A call to be applied to the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitCall {
    /// Sender identity, already authenticated by the submitter.
    pub sender: Address,
    /// The call itself.
    pub message: CallMessage<DefaultContext>,
}

/// Creates a new [`jsonrpsee::RpcModule`] serving the ledger held by `runner`.
pub fn rpc_module(runner: LedgerRunner) -> anyhow::Result<RpcModule<Mutex<LedgerRunner>>> {
    let mut rpc = RpcModule::new(Mutex::new(runner));

    rpc.register_method("voting_submitCall", |params, runner| {
        let call: SubmitCall = params.one()?;
        lock(runner)?
            .apply(call.sender, call.message)
            .map_err(|e| to_jsonrpsee_error_object(e, VOTING_RPC_ERROR))
    })?;

    rpc.register_method(
        "voting_eventCount",
        |_, runner| -> Result<u64, ErrorObjectOwned> {
            Ok(lock(runner)?.query(|ledger, ws| ledger.event_count(ws)))
        },
    )?;
    rpc.register_method("voting_getEvent", |params, runner| {
        let event_id: u64 = params.one()?;
        lock(runner)?
            .query(|ledger, ws| ledger.get_event(event_id, ws))
            .map_err(|e| to_jsonrpsee_error_object(e, VOTING_RPC_ERROR))
    })?;
    rpc.register_method("voting_getCandidates", |params, runner| {
        let event_id: u64 = params.one()?;
        lock(runner)?
            .query(|ledger, ws| ledger.get_candidates(event_id, ws))
            .map_err(|e| to_jsonrpsee_error_object(e, VOTING_RPC_ERROR))
    })?;
    rpc.register_method("voting_hasVoted", |params, runner| {
        let (event_id, voter): (u64, Address) = params.parse()?;
        lock(runner)?
            .query(|ledger, ws| ledger.has_voted(event_id, &voter, ws))
            .map_err(|e| to_jsonrpsee_error_object(e, VOTING_RPC_ERROR))
    })?;

    rpc.register_method("voting_getLoggedEvents", |params, runner| {
        let mut params = params.sequence();
        let from: u64 = params.next()?;
        let limit = params
            .optional_next::<u64>()?
            .unwrap_or(MAX_LOGGED_EVENTS_PER_QUERY);
        Ok::<_, ErrorObjectOwned>(lock(runner)?.logged_events(from, limit))
    })?;

    Ok(rpc)
}

/// Binds the server to the configured address and starts serving `runner`.
pub async fn start_rpc_server(
    runner: LedgerRunner,
    config: &RpcConfig,
) -> anyhow::Result<(SocketAddr, ServerHandle)> {
    let listen_address = format!("{}:{}", config.bind_host, config.bind_port);
    let rpc = rpc_module(runner)?;

    let server = jsonrpsee::server::ServerBuilder::default()
        .build(&listen_address)
        .await?;
    let bound_address = server.local_addr()?;
    let handle = server.start(rpc);
    info!("Starting RPC server at {}", bound_address);

    Ok((bound_address, handle))
}

fn lock(runner: &Mutex<LedgerRunner>) -> Result<MutexGuard<'_, LedgerRunner>, ErrorObjectOwned> {
    runner.lock().map_err(|_| {
        to_jsonrpsee_error_object(
            NodeError::Storage(anyhow::anyhow!("Ledger runner is poisoned")),
            VOTING_RPC_ERROR,
        )
    })
}
