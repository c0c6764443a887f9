//! Hot-water-boost switch: forces domestic hot water on until an end time.
//!
//! Boost commands are addressed by home, so every command first resolves the
//! device's home through the shared [`HomeDirectory`]. When that fails the
//! command is aborted before anything is sent and no refresh is requested.

use std::sync::Arc;

use vsmart_app::ports::{Coordinator, VaillantClient};
use vsmart_app::services::command;
use vsmart_app::services::home_directory::HomeDirectory;
use vsmart_domain::command::CommandOutcome;
use vsmart_domain::entity::{Entity, EntityCategory, EntityState, SwitchDeviceClass};
use vsmart_domain::error::{NotFoundError, VsmartError};
use vsmart_domain::home::SetpointMode;
use vsmart_domain::id::{DeviceId, EntityId};
use vsmart_domain::snapshot::Device;
use vsmart_domain::time::{boost_end_time, now};

const COMMAND: &str = "set_state_module";

/// Translation key the host uses to name the switch.
pub const TRANSLATION_KEY: &str = "hwb";

/// Switch bound to the boost setpoint of one device.
pub struct HotWaterBoostSwitch<C, K> {
    entity_id: EntityId,
    device_id: DeviceId,
    client: Arc<C>,
    coordinator: Arc<K>,
    homes: Arc<HomeDirectory>,
}

impl<C: VaillantClient, K: Coordinator> HotWaterBoostSwitch<C, K> {
    pub fn new(
        client: Arc<C>,
        coordinator: Arc<K>,
        homes: Arc<HomeDirectory>,
        device_id: DeviceId,
    ) -> Self {
        Self {
            entity_id: EntityId::new(),
            device_id,
            client,
            coordinator,
            homes,
        }
    }

    #[must_use]
    pub fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    #[must_use]
    pub fn unique_id(&self) -> String {
        format!("{}-{TRANSLATION_KEY}", self.device_id)
    }

    /// Whether a boost is active in the latest snapshot.
    ///
    /// `None` when the device is no longer part of the snapshot.
    #[must_use]
    pub fn is_on(&self) -> Option<bool> {
        self.coordinator
            .snapshot()
            .device(&self.device_id)
            .map(Device::is_boost_active)
    }

    /// Build the entity descriptor from the latest snapshot.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the descriptor is malformed.
    pub fn entity(&self) -> Result<Entity, VsmartError> {
        let entity = Entity::builder()
            .id(self.entity_id)
            .unique_id(self.unique_id())
            .device_id(self.device_id.clone())
            .translation_key(TRANSLATION_KEY)
            .category(EntityCategory::Config)
            .device_class(SwitchDeviceClass::Switch)
            .state(EntityState::from(self.is_on()))
            .build()?;
        Ok(entity)
    }

    /// Start a boost lasting the device's default duration.
    #[tracing::instrument(skip(self), fields(device_id = %self.device_id))]
    pub async fn turn_on(&self) -> CommandOutcome {
        let duration = self
            .coordinator
            .snapshot()
            .device(&self.device_id)
            .map(|device| device.setpoint_default_duration);
        let Some(duration) = duration else {
            let err = NotFoundError {
                entity: "Device",
                id: self.device_id.to_string(),
            };
            return command::abort(COMMAND, err.into());
        };
        let end_time = boost_end_time(now(), duration);

        let home_id = match self.homes.resolve(self.client.as_ref(), &self.device_id).await {
            Ok(home_id) => home_id,
            Err(err) => return command::abort(COMMAND, err),
        };

        tracing::debug!(%home_id, %end_time, "starting hot water boost");
        let result = self
            .client
            .set_state_module(
                &home_id,
                &self.device_id,
                SetpointMode::Hwb,
                true,
                Some(end_time),
            )
            .await;
        command::settle(self.coordinator.as_ref(), COMMAND, result).await
    }

    /// Cancel the boost.
    #[tracing::instrument(skip(self), fields(device_id = %self.device_id))]
    pub async fn turn_off(&self) -> CommandOutcome {
        let home_id = match self.homes.resolve(self.client.as_ref(), &self.device_id).await {
            Ok(home_id) => home_id,
            Err(err) => return command::abort(COMMAND, err),
        };

        tracing::debug!(%home_id, "cancelling hot water boost");
        let result = self
            .client
            .set_state_module(&home_id, &self.device_id, SetpointMode::Hwb, false, None)
            .await;
        command::settle(self.coordinator.as_ref(), COMMAND, result).await
    }
}
