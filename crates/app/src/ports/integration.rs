//! Integration port: lifecycle and service-call handling for the switch platform.
//!
//! An integration turns the vendor snapshot into host entities on setup and
//! handles service calls directed at the entities it owns.

use std::future::Future;

use vsmart_domain::command::CommandOutcome;
use vsmart_domain::device::DeviceEntry;
use vsmart_domain::entity::Entity;
use vsmart_domain::error::VsmartError;
use vsmart_domain::id::EntityId;

/// Context provided to integrations for registering what they expose.
///
/// The host platform provides the implementation; see
/// [`InMemoryContext`](crate::services::integration_context::InMemoryContext)
/// for the one used by the daemon and tests.
pub trait IntegrationContext: Send + Sync {
    /// Register a device entry (create or replace by device id).
    fn upsert_device(
        &self,
        device: DeviceEntry,
    ) -> impl Future<Output = Result<DeviceEntry, VsmartError>> + Send;

    /// Register an entity (create or replace by `unique_id`).
    fn upsert_entity(
        &self,
        entity: Entity,
    ) -> impl Future<Output = Result<Entity, VsmartError>> + Send;
}

/// Response to a service call.
#[derive(Debug)]
pub struct ServiceResponse {
    /// The entity as seen after the command (and its refresh, if any).
    pub entity: Entity,
    /// What happened to the remote command.
    pub outcome: CommandOutcome,
}

/// A pluggable integration.
///
/// The binary crate calls the lifecycle methods in order:
///
/// 1. [`setup`](Self::setup): build entities and register them via `ctx`
/// 2. (the host runs, forwarding service calls via [`handle_service_call`](Self::handle_service_call))
/// 3. [`teardown`](Self::teardown): release everything
pub trait Integration {
    /// Unique name identifying this integration (e.g. `"vaillant_vsmart"`).
    fn name(&self) -> &'static str;

    /// Build the integration's entities from the current state and register them.
    fn setup(
        &mut self,
        ctx: &impl IntegrationContext,
    ) -> impl Future<Output = Result<(), VsmartError>> + Send;

    /// Handle a service call (`turn_on`, `turn_off`, `toggle`) for an owned entity.
    ///
    /// Remote failures are reported through [`ServiceResponse::outcome`];
    /// only unknown entities or services are errors.
    fn handle_service_call(
        &self,
        entity_id: EntityId,
        service: &str,
        data: serde_json::Value,
    ) -> impl Future<Output = Result<ServiceResponse, VsmartError>> + Send;

    /// Called on graceful shutdown.
    fn teardown(&mut self) -> impl Future<Output = Result<(), VsmartError>> + Send;
}
