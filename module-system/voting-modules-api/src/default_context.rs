use serde::{Deserialize, Serialize};

use crate::{Address, Context, ProverStorage, Spec};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefaultContext {
    pub sender: Address,
    pub timestamp: u64,
}

impl Spec for DefaultContext {
    type Address = Address;
    type Storage = ProverStorage;
}

impl Context for DefaultContext {
    fn sender(&self) -> &Self::Address {
        &self.sender
    }

    fn timestamp(&self) -> u64 {
        self.timestamp
    }

    fn new(sender: Self::Address, timestamp: u64) -> Self {
        Self { sender, timestamp }
    }
}
