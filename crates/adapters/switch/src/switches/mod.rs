//! Switch implementations: schedule selection and hot-water boost.

mod hot_water_boost;
mod schedule;

pub use hot_water_boost::{HotWaterBoostSwitch, TRANSLATION_KEY as HOT_WATER_BOOST_KEY};
pub use schedule::ScheduleSwitch;

use vsmart_app::ports::{Coordinator, VaillantClient};
use vsmart_domain::command::CommandOutcome;
use vsmart_domain::entity::Entity;
use vsmart_domain::error::VsmartError;
use vsmart_domain::id::EntityId;

/// Wrapper enum for the concrete switch types.
pub enum VsmartSwitch<C, K> {
    Schedule(ScheduleSwitch<C, K>),
    HotWaterBoost(HotWaterBoostSwitch<C, K>),
}

impl<C: VaillantClient, K: Coordinator> VsmartSwitch<C, K> {
    #[must_use]
    pub fn entity_id(&self) -> EntityId {
        match self {
            Self::Schedule(s) => s.entity_id(),
            Self::HotWaterBoost(s) => s.entity_id(),
        }
    }

    #[must_use]
    pub fn is_on(&self) -> Option<bool> {
        match self {
            Self::Schedule(s) => s.is_on(),
            Self::HotWaterBoost(s) => s.is_on(),
        }
    }

    /// Build the entity descriptor from the latest snapshot.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the descriptor is malformed.
    pub fn entity(&self) -> Result<Entity, VsmartError> {
        match self {
            Self::Schedule(s) => s.entity(),
            Self::HotWaterBoost(s) => s.entity(),
        }
    }

    pub async fn turn_on(&self) -> CommandOutcome {
        match self {
            Self::Schedule(s) => s.turn_on().await,
            Self::HotWaterBoost(s) => s.turn_on().await,
        }
    }

    pub async fn turn_off(&self) -> CommandOutcome {
        match self {
            Self::Schedule(s) => s.turn_off(),
            Self::HotWaterBoost(s) => s.turn_off().await,
        }
    }

    /// Dispatch a host service call.
    ///
    /// `toggle` turns the switch off when it currently reports on, and on
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`VsmartError::UnsupportedService`] for any other service name.
    pub async fn handle_service(&self, service: &str) -> Result<CommandOutcome, VsmartError> {
        match service {
            "turn_on" => Ok(self.turn_on().await),
            "turn_off" => Ok(self.turn_off().await),
            "toggle" if self.is_on() == Some(true) => Ok(self.turn_off().await),
            "toggle" => Ok(self.turn_on().await),
            other => Err(VsmartError::UnsupportedService {
                service: other.to_string(),
            }),
        }
    }
}
