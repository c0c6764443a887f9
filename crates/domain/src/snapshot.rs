//! Snapshot: the coordinator's point-in-time view of every device.
//!
//! A snapshot is immutable once built. The coordinator replaces it wholesale
//! on every refresh, so readers always hold a consistent view.

use serde::{Deserialize, Serialize};

use crate::id::{DeviceId, ModuleId, ProgramId};
use crate::time::Timestamp;

/// All devices known to the coordinator, in the order the API returned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub devices: Vec<Device>,
}

impl Snapshot {
    /// Build a snapshot from a list of devices.
    #[must_use]
    pub fn new(devices: Vec<Device>) -> Self {
        Self { devices }
    }

    /// Look up a device by id.
    #[must_use]
    pub fn device(&self, id: &DeviceId) -> Option<&Device> {
        self.devices.iter().find(|d| &d.id == id)
    }

    /// Look up a program by its full `(device, module, program)` path.
    #[must_use]
    pub fn program(
        &self,
        device_id: &DeviceId,
        module_id: &ModuleId,
        program_id: &ProgramId,
    ) -> Option<&Program> {
        self.device(device_id)?
            .module(module_id)?
            .therm_program_list
            .iter()
            .find(|p| &p.id == program_id)
    }

    /// Iterate every `(device, module, program)` triple in snapshot order.
    pub fn programs(&self) -> impl Iterator<Item = (&Device, &Module, &Program)> {
        self.devices.iter().flat_map(|device| {
            device.modules.iter().flat_map(move |module| {
                module
                    .therm_program_list
                    .iter()
                    .map(move |program| (device, module, program))
            })
        })
    }
}

/// A vSMART relay device and its attached thermostat modules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default)]
    pub setpoint_hwb: HotWaterBoost,
    /// Default boost length in minutes.
    pub setpoint_default_duration: u32,
}

impl Device {
    /// Look up a module by id.
    #[must_use]
    pub fn module(&self, id: &ModuleId) -> Option<&Module> {
        self.modules.iter().find(|m| &m.id == id)
    }

    /// Whether a hot-water boost is currently active.
    #[must_use]
    pub fn is_boost_active(&self) -> bool {
        self.setpoint_hwb.setpoint_activate
    }
}

/// Current hot-water-boost setpoint of a device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotWaterBoost {
    pub setpoint_activate: bool,
    #[serde(default)]
    pub setpoint_endtime: Option<Timestamp>,
}

/// A thermostat module carrying the weekly programs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    #[serde(default)]
    pub therm_program_list: Vec<Program>,
}

impl Module {
    /// The program currently marked as selected, if any.
    #[must_use]
    pub fn selected_program(&self) -> Option<&Program> {
        self.therm_program_list.iter().find(|p| p.selected)
    }
}

/// A weekly heating schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub id: ProgramId,
    pub name: String,
    #[serde(default)]
    pub selected: bool,
}
