//! Schedule switch: on when its program is the module's active schedule.
//!
//! The programs of a module behave like radio buttons: turning one on
//! deselects the others on the server, and there is no remote action for
//! turning the active one off.

use std::sync::Arc;

use vsmart_app::ports::{Coordinator, VaillantClient};
use vsmart_app::services::command;
use vsmart_domain::command::CommandOutcome;
use vsmart_domain::entity::{Entity, EntityCategory, EntityState, SwitchDeviceClass};
use vsmart_domain::error::VsmartError;
use vsmart_domain::id::{DeviceId, EntityId, ModuleId, ProgramId};

/// Switch bound to one `(device, module, program)` triple.
pub struct ScheduleSwitch<C, K> {
    entity_id: EntityId,
    device_id: DeviceId,
    module_id: ModuleId,
    program_id: ProgramId,
    client: Arc<C>,
    coordinator: Arc<K>,
}

impl<C: VaillantClient, K: Coordinator> ScheduleSwitch<C, K> {
    pub fn new(
        client: Arc<C>,
        coordinator: Arc<K>,
        device_id: DeviceId,
        module_id: ModuleId,
        program_id: ProgramId,
    ) -> Self {
        Self {
            entity_id: EntityId::new(),
            device_id,
            module_id,
            program_id,
            client,
            coordinator,
        }
    }

    #[must_use]
    pub fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    #[must_use]
    pub fn unique_id(&self) -> String {
        format!("{}-{}-{}", self.device_id, self.module_id, self.program_id)
    }

    /// Whether the program is selected in the latest snapshot.
    ///
    /// `None` when the program is no longer part of the snapshot.
    #[must_use]
    pub fn is_on(&self) -> Option<bool> {
        self.coordinator
            .snapshot()
            .program(&self.device_id, &self.module_id, &self.program_id)
            .map(|program| program.selected)
    }

    /// Build the entity descriptor from the latest snapshot.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the descriptor is malformed.
    pub fn entity(&self) -> Result<Entity, VsmartError> {
        let snapshot = self.coordinator.snapshot();
        let program = snapshot.program(&self.device_id, &self.module_id, &self.program_id);
        let name = program.map_or_else(|| self.program_id.to_string(), |p| p.name.clone());

        let entity = Entity::builder()
            .id(self.entity_id)
            .unique_id(self.unique_id())
            .device_id(self.device_id.clone())
            .name(name)
            .category(EntityCategory::Config)
            .device_class(SwitchDeviceClass::Switch)
            .state(EntityState::from(program.map(|p| p.selected)))
            .build()?;
        Ok(entity)
    }

    /// Make this program the active schedule.
    ///
    /// A failed call is logged; the coordinator is refreshed either way.
    #[tracing::instrument(
        skip(self),
        fields(device_id = %self.device_id, module_id = %self.module_id, program_id = %self.program_id)
    )]
    pub async fn turn_on(&self) -> CommandOutcome {
        let result = self
            .client
            .switch_schedule(&self.device_id, &self.module_id, &self.program_id)
            .await;
        command::settle(self.coordinator.as_ref(), "switch_schedule", result).await
    }

    /// The active schedule cannot be switched off; switch another one on instead.
    pub fn turn_off(&self) -> CommandOutcome {
        tracing::info!(
            program_id = %self.program_id,
            "active schedule can't be switched off, switch on the schedule you want active instead"
        );
        CommandOutcome::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsmart_adapter_simulated::{RecordedCall, SimulatedCloud, SimulatedOperation};
    use vsmart_domain::snapshot::{Device, HotWaterBoost, Module, Program, Snapshot};

    fn cloud() -> Arc<SimulatedCloud> {
        let device = Device {
            id: DeviceId::new("dev-1"),
            modules: vec![Module {
                id: ModuleId::new("mod-1"),
                therm_program_list: vec![
                    Program {
                        id: ProgramId::new("winter"),
                        name: "Winter".to_string(),
                        selected: true,
                    },
                    Program {
                        id: ProgramId::new("summer"),
                        name: "Summer".to_string(),
                        selected: false,
                    },
                ],
            }],
            setpoint_hwb: HotWaterBoost::default(),
            setpoint_default_duration: 30,
        };
        Arc::new(SimulatedCloud::new(vec![device], vec![]))
    }

    fn switch(cloud: &Arc<SimulatedCloud>, program: &str) -> ScheduleSwitch<SimulatedCloud, SimulatedCloud> {
        ScheduleSwitch::new(
            Arc::clone(cloud),
            Arc::clone(cloud),
            DeviceId::new("dev-1"),
            ModuleId::new("mod-1"),
            ProgramId::new(program),
        )
    }

    #[test]
    fn should_mirror_selected_flag() {
        let cloud = cloud();
        assert_eq!(switch(&cloud, "winter").is_on(), Some(true));
        assert_eq!(switch(&cloud, "summer").is_on(), Some(false));
    }

    #[test]
    fn should_read_fresh_snapshot_after_refresh() {
        let cloud = cloud();
        let winter = switch(&cloud, "winter");
        assert_eq!(winter.is_on(), Some(true));

        cloud.update_server(|snapshot: &mut Snapshot| {
            for program in &mut snapshot.devices[0].modules[0].therm_program_list {
                program.selected = program.id.as_str() == "summer";
            }
        });
        assert_eq!(winter.is_on(), Some(true));

        cloud.publish();
        assert_eq!(winter.is_on(), Some(false));
    }

    #[tokio::test]
    async fn should_select_program_and_refresh_when_turned_on() {
        let cloud = cloud();
        let summer = switch(&cloud, "summer");
        let winter = switch(&cloud, "winter");

        let outcome = summer.turn_on().await;

        assert!(outcome.is_applied());
        assert_eq!(cloud.refresh_count(), 1);
        assert_eq!(summer.is_on(), Some(true));
        assert_eq!(winter.is_on(), Some(false));
        assert_eq!(
            cloud.calls(),
            vec![RecordedCall::SwitchSchedule {
                device_id: DeviceId::new("dev-1"),
                module_id: ModuleId::new("mod-1"),
                program_id: ProgramId::new("summer"),
            }]
        );
    }

    #[tokio::test]
    async fn should_refresh_even_when_client_fails() {
        let cloud = cloud();
        cloud.fail(SimulatedOperation::SwitchSchedule, "gateway timeout");
        let summer = switch(&cloud, "summer");

        let outcome = summer.turn_on().await;

        assert!(matches!(outcome, CommandOutcome::Rejected(ref e) if e.message == "gateway timeout"));
        assert_eq!(cloud.refresh_count(), 1);
        assert_eq!(summer.is_on(), Some(false));
    }

    #[test]
    fn should_do_nothing_when_turned_off() {
        let cloud = cloud();
        let winter = switch(&cloud, "winter");

        let outcome = winter.turn_off();

        assert!(matches!(outcome, CommandOutcome::Ignored));
        assert!(cloud.calls().is_empty());
        assert_eq!(cloud.refresh_count(), 0);
        assert_eq!(winter.is_on(), Some(true));
    }

    #[test]
    fn should_describe_entity_from_program() {
        let cloud = cloud();
        let winter = switch(&cloud, "winter");

        let entity = winter.entity().unwrap();

        assert_eq!(entity.id, winter.entity_id());
        assert_eq!(entity.name.as_deref(), Some("Winter"));
        assert_eq!(entity.unique_id, "dev-1-mod-1-winter");
        assert_eq!(entity.category, EntityCategory::Config);
        assert_eq!(entity.device_class, SwitchDeviceClass::Switch);
        assert_eq!(entity.state, EntityState::On);
    }

    #[test]
    fn should_report_unavailable_when_program_disappears() {
        let cloud = cloud();
        let summer = switch(&cloud, "summer");

        cloud.update_server(|snapshot: &mut Snapshot| {
            snapshot.devices[0].modules[0]
                .therm_program_list
                .retain(|p| p.id.as_str() != "summer");
        });
        cloud.publish();

        assert_eq!(summer.is_on(), None);
        let entity = summer.entity().unwrap();
        assert_eq!(entity.state, EntityState::Unavailable);
        assert_eq!(entity.name.as_deref(), Some("summer"));
    }
}
