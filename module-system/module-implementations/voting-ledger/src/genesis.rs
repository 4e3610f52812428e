use anyhow::Result;
use serde::{Deserialize, Serialize};
use voting_modules_api::{Context, WorkingSet};

use crate::VotingLedger;

/// Initial configuration of the ledger. The ledger starts empty: deployment takes no arguments.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VotingLedgerConfig {}

impl<C: Context> VotingLedger<C> {
    pub(crate) fn init_module(
        &self,
        _config: &VotingLedgerConfig,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        anyhow::ensure!(
            self.event_count.get(working_set).is_none(),
            "Voting ledger is already initialized"
        );
        self.event_count.set(&0, working_set);
        Ok(())
    }
}
