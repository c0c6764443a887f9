//! Best-effort command policy.
//!
//! A command either never reaches the client ([`abort`]) or reaches it and
//! is settled with [`settle`]: failures are logged, never propagated, and the
//! coordinator is refreshed regardless so the displayed state reconciles
//! with the server.

use vsmart_domain::command::CommandOutcome;
use vsmart_domain::error::{ApiError, VsmartError};

use crate::ports::Coordinator;

/// Log a failed client call, request a refresh, and report the outcome.
pub async fn settle<K: Coordinator>(
    coordinator: &K,
    command: &'static str,
    result: Result<(), ApiError>,
) -> CommandOutcome {
    match &result {
        Ok(()) => tracing::debug!(command, "vendor command accepted"),
        Err(err) => tracing::error!(%err, command, "vendor command failed"),
    }
    coordinator.request_refresh().await;
    result.into()
}

/// Log why a command was not sent and report it as aborted.
///
/// No refresh is requested.
pub fn abort(command: &'static str, err: VsmartError) -> CommandOutcome {
    match &err {
        VsmartError::Api(api) => {
            tracing::error!(err = %api, command, "failed to fetch vSMART home data");
        }
        other => tracing::error!(err = %other, command, "vendor command not sent"),
    }
    CommandOutcome::Aborted(err)
}
