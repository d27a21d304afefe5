//! Entitlement set initialization.

use tracing::info;

use super::HandlerOutcome;
use crate::commands::Command;
use crate::error::Result;
use crate::events::Event;
use crate::model::EntitlementDescriptor;
use crate::store::{Action, ActionBatch};

/// Initialize (or wholesale replace) the session entitlement set.
pub(crate) fn handle(
    cmd: &Command,
    entitlements: &[EntitlementDescriptor],
) -> Result<HandlerOutcome> {
    info!(
        correlation_id = %cmd.correlation_id(),
        count = entitlements.len(),
        "Initializing entitlements"
    );

    let batch = ActionBatch::new(vec![Action::InitializeEntitlements {
        entitlements: entitlements.to_vec(),
    }]);
    let event = Event::entitlements_initialized(cmd, entitlements.len());
    Ok(HandlerOutcome { batch, event })
}
