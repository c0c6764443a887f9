//! Command outcome: what happened to a best-effort switch command.
//!
//! Commands never fail from the host's point of view. The outcome records
//! whether the remote action was sent, rejected, or never attempted.

use crate::error::{ApiError, VsmartError};

/// Result of a single `turn_on` / `turn_off` command.
#[derive(Debug)]
#[must_use]
pub enum CommandOutcome {
    /// The client accepted the command; a refresh was requested.
    Applied,
    /// The client failed; the error was logged and a refresh was requested anyway.
    Rejected(ApiError),
    /// A precondition failed before any command was sent; no refresh was requested.
    Aborted(VsmartError),
    /// Nothing to do for this command (no client call, no refresh).
    Ignored,
}

impl CommandOutcome {
    /// Whether the remote command was accepted.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    /// Whether a coordinator refresh followed the command.
    #[must_use]
    pub fn refreshed(&self) -> bool {
        matches!(self, Self::Applied | Self::Rejected(_))
    }
}

impl From<Result<(), ApiError>> for CommandOutcome {
    fn from(result: Result<(), ApiError>) -> Self {
        match result {
            Ok(()) => Self::Applied,
            Err(err) => Self::Rejected(err),
        }
    }
}
