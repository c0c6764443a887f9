//! Simulated cloud error types.

use vsmart_domain::error::VsmartError;
use vsmart_domain::id::DeviceId;

/// Errors raised while building the simulated cloud.
#[derive(Debug, thiserror::Error)]
pub enum SimulatedError {
    /// Two configured devices share the same id.
    #[error("duplicate simulated device {0}")]
    DuplicateDevice(DeviceId),
}

impl From<SimulatedError> for VsmartError {
    fn from(err: SimulatedError) -> Self {
        VsmartError::Adapter(Box::new(err))
    }
}
