//! Entity: the host-facing descriptor of a single switch.
//!
//! The host platform renders entities; it never sees the vendor snapshot.
//! Switches rebuild their entity from the latest snapshot on every read.

mod state;

pub use state::EntityState;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{DeviceId, EntityId};
use crate::time::{Timestamp, now};

/// Where the host should list the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityCategory {
    /// A control that changes device configuration.
    #[default]
    Config,
    /// A read-only diagnostic value.
    Diagnostic,
}

/// How the host should present a switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchDeviceClass {
    #[default]
    Switch,
    Outlet,
}

/// A registered switch entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    /// Stable identifier derived from vendor ids; survives restarts.
    pub unique_id: String,
    pub device_id: DeviceId,
    /// Literal display name. Takes precedence over `translation_key`.
    pub name: Option<String>,
    pub translation_key: Option<String>,
    pub category: EntityCategory,
    pub device_class: SwitchDeviceClass,
    pub state: EntityState,
    pub last_updated: Timestamp,
}

impl Entity {
    /// Start building an entity.
    #[must_use]
    pub fn builder() -> EntityBuilder {
        EntityBuilder::default()
    }

    /// Whether the switch currently reports on.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.state == EntityState::On
    }
}

/// Builder for [`Entity`].
#[derive(Debug, Default)]
pub struct EntityBuilder {
    id: Option<EntityId>,
    unique_id: Option<String>,
    device_id: Option<DeviceId>,
    name: Option<String>,
    translation_key: Option<String>,
    category: EntityCategory,
    device_class: SwitchDeviceClass,
    state: EntityState,
}

impl EntityBuilder {
    #[must_use]
    pub fn id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn unique_id(mut self, unique_id: impl Into<String>) -> Self {
        self.unique_id = Some(unique_id.into());
        self
    }

    #[must_use]
    pub fn device_id(mut self, device_id: DeviceId) -> Self {
        self.device_id = Some(device_id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn translation_key(mut self, key: impl Into<String>) -> Self {
        self.translation_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: EntityCategory) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn device_class(mut self, device_class: SwitchDeviceClass) -> Self {
        self.device_class = device_class;
        self
    }

    #[must_use]
    pub fn state(mut self, state: EntityState) -> Self {
        self.state = state;
        self
    }

    /// Validate and build the entity.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the unique id is empty, the device id is
    /// missing, or neither a name nor a translation key was given.
    pub fn build(self) -> Result<Entity, ValidationError> {
        let unique_id = self
            .unique_id
            .ok_or(ValidationError::MissingField("unique_id"))?;
        if unique_id.trim().is_empty() {
            return Err(ValidationError::EmptyUniqueId);
        }
        let device_id = self
            .device_id
            .ok_or(ValidationError::MissingField("device_id"))?;
        if self.name.is_none() && self.translation_key.is_none() {
            return Err(ValidationError::MissingName);
        }

        Ok(Entity {
            id: self.id.unwrap_or_default(),
            unique_id,
            device_id,
            name: self.name,
            translation_key: self.translation_key,
            category: self.category,
            device_class: self.device_class,
            state: self.state,
            last_updated: now(),
        })
    }
}
