//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`VsmartError`]
//! via `#[from]` when crossing a port boundary.

use crate::id::DeviceId;

/// Top-level error for the vsmart integration.
#[derive(Debug, thiserror::Error)]
pub enum VsmartError {
    /// The vendor cloud rejected or failed a call.
    #[error("vendor API error")]
    Api(#[from] ApiError),

    /// A referenced entity, device, or program does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// A descriptor failed its invariants.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// No home could be resolved for the device, so a command cannot be addressed.
    #[error("home not found for device {device_id}")]
    HomeNotFound {
        /// The device whose home lookup failed.
        device_id: DeviceId,
    },

    /// The service name is not one a switch understands.
    #[error("unsupported service {service:?}")]
    UnsupportedService {
        /// The rejected service name.
        service: String,
    },

    /// An adapter-specific failure (configuration, fixture loading, …).
    #[error("adapter error")]
    Adapter(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// The single error kind reported by the vendor API client.
///
/// Network, authentication, and server-side failures are not distinguished at
/// this layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    /// Human-readable reason reported by the client.
    pub message: String,
}

impl ApiError {
    /// Build an error from any displayable reason.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A lookup failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of thing that was looked up (e.g. `"Entity"`, `"Device"`).
    pub entity: &'static str,
    /// The identifier that was not found.
    pub id: String,
}

/// Descriptor invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The `unique_id` is empty.
    #[error("unique id must not be empty")]
    EmptyUniqueId,

    /// Neither a display name nor a translation key was set.
    #[error("entity needs a name or a translation key")]
    MissingName,

    /// A required builder field was not provided.
    #[error("missing required field {0}")]
    MissingField(&'static str),
}
