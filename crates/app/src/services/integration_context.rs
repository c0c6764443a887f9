//! In-memory [`IntegrationContext`] used by the daemon and tests.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use vsmart_domain::device::DeviceEntry;
use vsmart_domain::entity::Entity;
use vsmart_domain::error::VsmartError;

use crate::ports::IntegrationContext;

#[derive(Debug, Default)]
struct Registry {
    devices: Vec<DeviceEntry>,
    entities: Vec<Entity>,
}

/// [`IntegrationContext`] that keeps registrations in memory, in order.
///
/// Cheaply cloneable; clones share the same registry.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContext {
    registry: Arc<Mutex<Registry>>,
}

impl InMemoryContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered device entries in registration order.
    #[must_use]
    pub fn devices(&self) -> Vec<DeviceEntry> {
        self.lock().devices.clone()
    }

    /// Registered entities in registration order.
    #[must_use]
    pub fn entities(&self) -> Vec<Entity> {
        self.lock().entities.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl IntegrationContext for InMemoryContext {
    async fn upsert_device(&self, device: DeviceEntry) -> Result<DeviceEntry, VsmartError> {
        let mut registry = self.lock();
        match registry.devices.iter_mut().find(|d| d.id == device.id) {
            Some(existing) => *existing = device.clone(),
            None => registry.devices.push(device.clone()),
        }
        Ok(device)
    }

    async fn upsert_entity(&self, entity: Entity) -> Result<Entity, VsmartError> {
        let mut registry = self.lock();
        match registry
            .entities
            .iter_mut()
            .find(|e| e.unique_id == entity.unique_id)
        {
            Some(existing) => *existing = entity.clone(),
            None => registry.entities.push(entity.clone()),
        }
        Ok(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsmart_domain::entity::EntityState;
    use vsmart_domain::id::DeviceId;

    fn entity(unique_id: &str, state: EntityState) -> Entity {
        Entity::builder()
            .unique_id(unique_id)
            .device_id(DeviceId::new("dev-1"))
            .translation_key("hwb")
            .state(state)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_keep_registration_order() {
        let ctx = InMemoryContext::new();
        ctx.upsert_entity(entity("a", EntityState::Off)).await.unwrap();
        ctx.upsert_entity(entity("b", EntityState::Off)).await.unwrap();

        let ids: Vec<String> = ctx.entities().into_iter().map(|e| e.unique_id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn should_replace_entity_with_same_unique_id() {
        let ctx = InMemoryContext::new();
        ctx.upsert_entity(entity("a", EntityState::Off)).await.unwrap();
        ctx.upsert_entity(entity("a", EntityState::On)).await.unwrap();

        let entities = ctx.entities();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].state, EntityState::On);
    }

    #[tokio::test]
    async fn should_replace_device_with_same_id() {
        let ctx = InMemoryContext::new();
        let entry = DeviceEntry::vsmart(DeviceId::new("dev-1"), "vaillant_vsmart");
        ctx.upsert_device(entry.clone()).await.unwrap();
        ctx.upsert_device(entry).await.unwrap();
        assert_eq!(ctx.devices().len(), 1);
    }

    #[tokio::test]
    async fn should_share_registry_between_clones() {
        let ctx = InMemoryContext::new();
        let clone = ctx.clone();
        clone
            .upsert_entity(entity("a", EntityState::Off))
            .await
            .unwrap();
        assert_eq!(ctx.entities().len(), 1);
    }
}
