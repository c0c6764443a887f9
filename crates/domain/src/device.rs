//! Device entry: the host registry record for a vendor device.

use serde::{Deserialize, Serialize};

use crate::id::DeviceId;

/// Host-side registry record grouping the switches of one vendor device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceEntry {
    pub id: DeviceId,
    pub name: String,
    pub manufacturer: String,
    pub model: String,
    /// Integration that registered the device (e.g. `"vaillant_vsmart"`).
    pub integration: String,
}

impl DeviceEntry {
    /// Registry record for a vSMART relay.
    #[must_use]
    pub fn vsmart(id: DeviceId, integration: &str) -> Self {
        Self {
            name: format!("vSMART {id}"),
            id,
            manufacturer: "Vaillant".to_string(),
            model: "vSMART".to_string(),
            integration: integration.to_string(),
        }
    }
}
