mod address;
pub mod default_context;
mod error;
mod prefix;
mod response;
pub mod utils;

use core::fmt::{Debug, Display};
use core::hash::Hash;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use crate::address::{Address, AddressBech32, HRP};
pub use crate::error::{Bech32ParseError, Error};
pub use crate::prefix::Prefix;
pub use crate::response::CallResponse;
pub use voting_state::{
    Event, ProverStorage, StateCheckpoint, StateMap, StateValue, Storage, WorkingSet,
};

/// The `Spec` trait configures the key primitives used by a particular deployment of the ledger.
/// It is almost always implemented on a Context object; modules are generic over the Context,
/// so swapping the Context swaps the address type and the storage backend without touching
/// module code.
pub trait Spec {
    /// The identity of a caller.
    type Address: Clone
        + Eq
        + Hash
        + Debug
        + Display
        + BorshSerialize
        + BorshDeserialize
        + Serialize
        + DeserializeOwned
        + From<[u8; 32]>
        + Send
        + Sync;

    /// State storage used by the ledger.
    type Storage: Storage + Send + Sync;
}

/// A context contains information which is passed to modules during
/// call execution: the sender of the call as authenticated by the host, and
/// the current time as supplied by the host.
pub trait Context: Spec + Clone + Debug + PartialEq {
    /// Sender of the call.
    fn sender(&self) -> &Self::Address;

    /// Current time in seconds. The host guarantees it never decreases between calls.
    fn timestamp(&self) -> u64;

    /// Constructor for the Context.
    fn new(sender: Self::Address, timestamp: u64) -> Self;
}

/// Every module has to implement this trait.
pub trait Module {
    /// Execution context.
    type Context: Context;

    /// Configuration for the genesis method.
    type Config;

    /// Module defined argument to the call method.
    type CallMessage: Debug + BorshSerialize + BorshDeserialize;

    /// Genesis is called when the ledger is deployed and can be used to set initial state values in the module.
    fn genesis(
        &self,
        _config: &Self::Config,
        _working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<(), Error> {
        Ok(())
    }

    /// Call allows interaction with the module and invokes state changes.
    /// It takes a module defined type and a context as parameters.
    fn call(
        &self,
        message: Self::CallMessage,
        context: &Self::Context,
        working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<CallResponse, Error>;
}

/// Static information about a module: where it lives and under which prefix it keeps its state.
pub trait ModuleInfo: Default {
    type Context: Context;

    /// Returns address of the module.
    fn address(&self) -> &<Self::Context as Spec>::Address;

    /// Returns the prefix of the module.
    fn prefix(&self) -> Prefix;
}
