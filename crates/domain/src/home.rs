//! Homes and device-to-home resolution.
//!
//! Commands that change a module's setpoint are addressed by home. The
//! home-data endpoint lists every home with its modules; the relay device
//! of a home is reported as that home's first module.

use serde::{Deserialize, Serialize};

use crate::id::{DeviceId, HomeId, ModuleId};

/// A home as returned by the home-data endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Home {
    pub home_id: HomeId,
    #[serde(default)]
    pub modules: Vec<HomeModule>,
}

/// A module entry of a [`Home`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeModule {
    pub module_id: ModuleId,
}

impl Home {
    /// Whether the home's first module is the given device.
    #[must_use]
    pub fn is_addressed_by(&self, device_id: &DeviceId) -> bool {
        self.modules
            .first()
            .is_some_and(|m| m.module_id.as_str() == device_id.as_str())
    }
}

/// Outcome of looking up the home of a device.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum HomeResolution {
    Found(HomeId),
    NotFound,
}

/// Resolve which home a device belongs to.
///
/// A single home is used unconditionally. Otherwise the first home whose
/// first module is the device wins.
pub fn resolve_home(homes: &[Home], device_id: &DeviceId) -> HomeResolution {
    if let [only] = homes {
        return HomeResolution::Found(only.home_id.clone());
    }
    homes
        .iter()
        .find(|home| home.is_addressed_by(device_id))
        .map_or(HomeResolution::NotFound, |home| {
            HomeResolution::Found(home.home_id.clone())
        })
}

/// Setpoint modes accepted by the set-state endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetpointMode {
    #[serde(rename = "manual")]
    Manual,
    #[serde(rename = "away")]
    Away,
    #[serde(rename = "hg")]
    FrostGuard,
    /// Hot-water boost.
    #[serde(rename = "hwb")]
    Hwb,
}

impl std::fmt::Display for SetpointMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Manual => f.write_str("manual"),
            Self::Away => f.write_str("away"),
            Self::FrostGuard => f.write_str("hg"),
            Self::Hwb => f.write_str("hwb"),
        }
    }
}
