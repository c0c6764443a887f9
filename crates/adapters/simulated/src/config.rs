//! Simulated cloud configuration.

use std::collections::HashSet;

use serde::Deserialize;

use vsmart_domain::home::{Home, HomeModule};
use vsmart_domain::id::{DeviceId, HomeId, ModuleId, ProgramId};
use vsmart_domain::snapshot::{Device, HotWaterBoost, Module, Program};

use crate::error::SimulatedError;

/// Configuration for the simulated cloud.
///
/// The defaults describe one relay with one thermostat and three programs,
/// living in a single home.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulatedConfig {
    /// Artificial delay applied to every client call, in milliseconds.
    pub latency_ms: u64,
    /// Devices served by the cloud.
    pub devices: Vec<Device>,
    /// Homes returned by the home-data endpoint.
    pub homes: Vec<Home>,
}

impl SimulatedConfig {
    /// Check that device ids are unique.
    ///
    /// # Errors
    ///
    /// Returns [`SimulatedError::DuplicateDevice`] for the first repeated id.
    pub fn validate(&self) -> Result<(), SimulatedError> {
        let mut seen = HashSet::new();
        for device in &self.devices {
            if !seen.insert(&device.id) {
                return Err(SimulatedError::DuplicateDevice(device.id.clone()));
            }
        }
        Ok(())
    }
}

impl Default for SimulatedConfig {
    fn default() -> Self {
        let device_id = "70:ee:50:00:00:01";
        let program = |id: &str, name: &str, selected: bool| Program {
            id: ProgramId::new(id),
            name: name.to_string(),
            selected,
        };
        Self {
            latency_ms: 0,
            devices: vec![Device {
                id: DeviceId::new(device_id),
                modules: vec![Module {
                    id: ModuleId::new("04:00:00:00:00:01"),
                    therm_program_list: vec![
                        program("5e00000000000000000000a1", "Winter", true),
                        program("5e00000000000000000000a2", "Summer", false),
                        program("5e00000000000000000000a3", "Holidays", false),
                    ],
                }],
                setpoint_hwb: HotWaterBoost::default(),
                setpoint_default_duration: 30,
            }],
            homes: vec![Home {
                home_id: HomeId::new("5e00000000000000000000h1"),
                modules: vec![HomeModule {
                    module_id: ModuleId::new(device_id),
                }],
            }],
        }
    }
}
