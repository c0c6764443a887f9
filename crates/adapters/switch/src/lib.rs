//! # vsmart-adapter-switch
//!
//! Switch platform for Vaillant vSMART relays.
//!
//! ## Provided switches
//!
//! | Switch | One per | On when | `turn_on` | `turn_off` |
//! |--------|---------|---------|-----------|------------|
//! | Schedule | device × module × program | program is selected | make it the active schedule | no-op |
//! | Hot-water boost | device | boost is active | boost for the default duration | cancel boost |
//!
//! Switches read the coordinator's latest snapshot on every state query and
//! refresh it after each command that reached the client.
//!
//! ## Dependency rule
//!
//! Depends on `vsmart-app` (port traits) and `vsmart-domain` only.

mod switches;

pub use switches::{HOT_WATER_BOOST_KEY, HotWaterBoostSwitch, ScheduleSwitch, VsmartSwitch};

use std::sync::Arc;

use vsmart_app::ports::{
    Coordinator, Integration, IntegrationContext, ServiceResponse, VaillantClient,
};
use vsmart_app::services::home_directory::HomeDirectory;
use vsmart_domain::device::DeviceEntry;
use vsmart_domain::entity::Entity;
use vsmart_domain::error::{NotFoundError, VsmartError};
use vsmart_domain::id::EntityId;
use vsmart_domain::snapshot::Snapshot;

/// Name under which the platform registers devices and entities.
pub const INTEGRATION_NAME: &str = "vaillant_vsmart";

/// The vSMART switch platform.
pub struct VsmartSwitchPlatform<C, K> {
    client: Arc<C>,
    coordinator: Arc<K>,
    homes: Arc<HomeDirectory>,
    switches: Vec<VsmartSwitch<C, K>>,
}

impl<C: VaillantClient, K: Coordinator> VsmartSwitchPlatform<C, K> {
    /// Create a platform; switches are built by [`Integration::setup`].
    pub fn new(client: Arc<C>, coordinator: Arc<K>, homes: Arc<HomeDirectory>) -> Self {
        Self {
            client,
            coordinator,
            homes,
            switches: Vec::new(),
        }
    }

    /// One schedule switch per `(device, module, program)`, then one boost
    /// switch per device, both in snapshot order.
    fn build_switches(&self, snapshot: &Snapshot) -> Vec<VsmartSwitch<C, K>> {
        let schedules = snapshot.programs().map(|(device, module, program)| {
            VsmartSwitch::Schedule(ScheduleSwitch::new(
                Arc::clone(&self.client),
                Arc::clone(&self.coordinator),
                device.id.clone(),
                module.id.clone(),
                program.id.clone(),
            ))
        });
        let boosts = snapshot.devices.iter().map(|device| {
            VsmartSwitch::HotWaterBoost(HotWaterBoostSwitch::new(
                Arc::clone(&self.client),
                Arc::clone(&self.coordinator),
                Arc::clone(&self.homes),
                device.id.clone(),
            ))
        });
        schedules.chain(boosts).collect()
    }

    /// The switches built during setup, in registration order.
    #[must_use]
    pub fn switches(&self) -> &[VsmartSwitch<C, K>] {
        &self.switches
    }

    /// Look up a switch by entity id.
    #[must_use]
    pub fn switch(&self, entity_id: EntityId) -> Option<&VsmartSwitch<C, K>> {
        self.switches.iter().find(|s| s.entity_id() == entity_id)
    }

    /// Check whether this platform owns the given entity.
    #[must_use]
    pub fn owns_entity(&self, entity_id: EntityId) -> bool {
        self.switch(entity_id).is_some()
    }

    /// Current entity descriptors of every switch.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a descriptor is malformed.
    pub fn entities(&self) -> Result<Vec<Entity>, VsmartError> {
        self.switches.iter().map(VsmartSwitch::entity).collect()
    }
}

impl<C, K> Integration for VsmartSwitchPlatform<C, K>
where
    C: VaillantClient + 'static,
    K: Coordinator + 'static,
{
    fn name(&self) -> &'static str {
        INTEGRATION_NAME
    }

    async fn setup(&mut self, ctx: &impl IntegrationContext) -> Result<(), VsmartError> {
        let snapshot = self.coordinator.snapshot();
        let switches = self.build_switches(&snapshot);

        for device in &snapshot.devices {
            ctx.upsert_device(DeviceEntry::vsmart(device.id.clone(), INTEGRATION_NAME))
                .await?;
        }
        for switch in &switches {
            ctx.upsert_entity(switch.entity()?).await?;
        }

        tracing::info!(
            devices = snapshot.devices.len(),
            switches = switches.len(),
            "vSMART switches registered"
        );
        self.switches = switches;
        Ok(())
    }

    async fn handle_service_call(
        &self,
        entity_id: EntityId,
        service: &str,
        _data: serde_json::Value,
    ) -> Result<ServiceResponse, VsmartError> {
        let switch = self.switch(entity_id).ok_or_else(|| NotFoundError {
            entity: "Entity",
            id: entity_id.to_string(),
        })?;

        let outcome = switch.handle_service(service).await?;
        let entity = switch.entity()?;
        Ok(ServiceResponse { entity, outcome })
    }

    async fn teardown(&mut self) -> Result<(), VsmartError> {
        self.switches.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsmart_adapter_simulated::{RecordedCall, SimulatedCloud};
    use vsmart_app::services::integration_context::InMemoryContext;
    use vsmart_domain::command::CommandOutcome;
    use vsmart_domain::entity::EntityState;
    use vsmart_domain::home::{Home, HomeModule};
    use vsmart_domain::id::{DeviceId, HomeId, ModuleId, ProgramId};
    use vsmart_domain::snapshot::{Device, HotWaterBoost, Module, Program};

    fn program(id: &str, selected: bool) -> Program {
        Program {
            id: ProgramId::new(id),
            name: id.to_uppercase(),
            selected,
        }
    }

    fn device(id: &str, modules: Vec<Module>) -> Device {
        Device {
            id: DeviceId::new(id),
            modules,
            setpoint_hwb: HotWaterBoost::default(),
            setpoint_default_duration: 30,
        }
    }

    fn cloud() -> Arc<SimulatedCloud> {
        let devices = vec![
            device(
                "dev-1",
                vec![Module {
                    id: ModuleId::new("mod-1"),
                    therm_program_list: vec![program("p1", true), program("p2", false)],
                }],
            ),
            device(
                "dev-2",
                vec![Module {
                    id: ModuleId::new("mod-2"),
                    therm_program_list: vec![program("p3", true)],
                }],
            ),
        ];
        let homes = vec![
            Home {
                home_id: HomeId::new("home-1"),
                modules: vec![HomeModule {
                    module_id: ModuleId::new("dev-1"),
                }],
            },
            Home {
                home_id: HomeId::new("home-2"),
                modules: vec![HomeModule {
                    module_id: ModuleId::new("dev-2"),
                }],
            },
        ];
        Arc::new(SimulatedCloud::new(devices, homes))
    }

    async fn platform(
        cloud: &Arc<SimulatedCloud>,
    ) -> (VsmartSwitchPlatform<SimulatedCloud, SimulatedCloud>, InMemoryContext) {
        let mut platform = VsmartSwitchPlatform::new(
            Arc::clone(cloud),
            Arc::clone(cloud),
            Arc::new(HomeDirectory::new()),
        );
        let ctx = InMemoryContext::new();
        platform.setup(&ctx).await.unwrap();
        (platform, ctx)
    }

    fn entity_id_of(platform: &VsmartSwitchPlatform<SimulatedCloud, SimulatedCloud>, unique_id: &str) -> EntityId {
        platform
            .entities()
            .unwrap()
            .into_iter()
            .find(|e| e.unique_id == unique_id)
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn should_return_vaillant_vsmart_as_name() {
        let cloud = cloud();
        let (platform, _) = platform(&cloud).await;
        assert_eq!(platform.name(), "vaillant_vsmart");
    }

    #[tokio::test]
    async fn should_register_one_schedule_per_program_then_one_boost_per_device() {
        let cloud = cloud();
        let (_, ctx) = platform(&cloud).await;

        let unique_ids: Vec<String> = ctx.entities().into_iter().map(|e| e.unique_id).collect();
        assert_eq!(
            unique_ids,
            vec![
                "dev-1-mod-1-p1",
                "dev-1-mod-1-p2",
                "dev-2-mod-2-p3",
                "dev-1-hwb",
                "dev-2-hwb",
            ]
        );
    }

    #[tokio::test]
    async fn should_register_one_device_entry_per_device() {
        let cloud = cloud();
        let (_, ctx) = platform(&cloud).await;

        let devices = ctx.devices();
        assert_eq!(devices.len(), 2);
        assert!(devices.iter().all(|d| d.integration == INTEGRATION_NAME));
    }

    #[tokio::test]
    async fn should_not_call_client_during_setup() {
        let cloud = cloud();
        let _ = platform(&cloud).await;
        assert!(cloud.calls().is_empty());
        assert_eq!(cloud.refresh_count(), 0);
    }

    #[tokio::test]
    async fn should_register_nothing_for_empty_snapshot() {
        let cloud = Arc::new(SimulatedCloud::new(vec![], vec![]));
        let (platform, ctx) = platform(&cloud).await;
        assert!(platform.switches().is_empty());
        assert!(ctx.entities().is_empty());
    }

    #[tokio::test]
    async fn should_switch_schedule_through_service_call() {
        let cloud = cloud();
        let (platform, _) = platform(&cloud).await;
        let p2 = entity_id_of(&platform, "dev-1-mod-1-p2");

        let response = platform
            .handle_service_call(p2, "turn_on", serde_json::json!({}))
            .await
            .unwrap();

        assert!(response.outcome.is_applied());
        assert_eq!(response.entity.state, EntityState::On);
        let p1 = entity_id_of(&platform, "dev-1-mod-1-p1");
        assert_eq!(platform.switch(p1).unwrap().is_on(), Some(false));
    }

    #[tokio::test]
    async fn should_ignore_turn_off_of_active_schedule() {
        let cloud = cloud();
        let (platform, _) = platform(&cloud).await;
        let p1 = entity_id_of(&platform, "dev-1-mod-1-p1");

        let response = platform
            .handle_service_call(p1, "turn_off", serde_json::json!({}))
            .await
            .unwrap();

        assert!(matches!(response.outcome, CommandOutcome::Ignored));
        assert_eq!(response.entity.state, EntityState::On);
        assert!(cloud.calls().is_empty());
    }

    #[tokio::test]
    async fn should_toggle_boost_on_then_off() {
        let cloud = cloud();
        let (platform, _) = platform(&cloud).await;
        let boost = entity_id_of(&platform, "dev-2-hwb");

        let on = platform
            .handle_service_call(boost, "toggle", serde_json::json!({}))
            .await
            .unwrap();
        assert_eq!(on.entity.state, EntityState::On);

        let off = platform
            .handle_service_call(boost, "toggle", serde_json::json!({}))
            .await
            .unwrap();
        assert_eq!(off.entity.state, EntityState::Off);

        let activations: Vec<bool> = cloud
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                RecordedCall::SetStateModule {
                    home_id, activate, ..
                } => {
                    assert_eq!(home_id, HomeId::new("home-2"));
                    Some(activate)
                }
                _ => None,
            })
            .collect();
        assert_eq!(activations, vec![true, false]);
        assert_eq!(cloud.home_data_fetches(), 1);
    }

    #[tokio::test]
    async fn should_toggle_inactive_schedule_on() {
        let cloud = cloud();
        let (platform, _) = platform(&cloud).await;
        let p2 = entity_id_of(&platform, "dev-1-mod-1-p2");

        let response = platform
            .handle_service_call(p2, "toggle", serde_json::json!({}))
            .await
            .unwrap();

        assert!(response.outcome.is_applied());
        assert_eq!(response.entity.state, EntityState::On);
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_entity() {
        let cloud = cloud();
        let (platform, _) = platform(&cloud).await;

        let result = platform
            .handle_service_call(EntityId::new(), "turn_on", serde_json::json!({}))
            .await;
        assert!(matches!(result, Err(VsmartError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_reject_unknown_service() {
        let cloud = cloud();
        let (platform, _) = platform(&cloud).await;
        let boost = entity_id_of(&platform, "dev-1-hwb");

        let result = platform
            .handle_service_call(boost, "reboot", serde_json::json!({}))
            .await;
        assert!(matches!(
            result,
            Err(VsmartError::UnsupportedService { ref service }) if service == "reboot"
        ));
        assert!(cloud.calls().is_empty());
    }

    #[tokio::test]
    async fn should_own_registered_entities() {
        let cloud = cloud();
        let (platform, ctx) = platform(&cloud).await;

        for entity in ctx.entities() {
            assert!(platform.owns_entity(entity.id));
        }
        assert!(!platform.owns_entity(EntityId::new()));
    }

    #[tokio::test]
    async fn should_drop_switches_on_teardown() {
        let cloud = cloud();
        let (mut platform, _) = platform(&cloud).await;

        platform.teardown().await.unwrap();
        assert!(platform.switches().is_empty());
    }
}
