//! # vsmart-adapter-simulated
//!
//! Simulated vSMART cloud that stands in for both the vendor client and the
//! polling coordinator. Used by the daemon's demo mode and by end-to-end tests.
//!
//! ## How it works
//!
//! The cloud keeps two snapshots: the **server** snapshot, which commands
//! mutate immediately, and the **published** snapshot, which is what the
//! coordinator hands to switches. A refresh copies the server snapshot over
//! the published one, so switch state only changes after a refresh.
//!
//! Every client call is recorded, and each operation can be made to fail
//! with an injected [`ApiError`].
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `vsmart-app` and `vsmart-domain`.

mod config;
mod error;

pub use config::SimulatedConfig;
pub use error::SimulatedError;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;

use vsmart_app::ports::{Coordinator, VaillantClient};
use vsmart_domain::error::ApiError;
use vsmart_domain::home::{Home, SetpointMode};
use vsmart_domain::id::{DeviceId, HomeId, ModuleId, ProgramId};
use vsmart_domain::snapshot::{Device, HotWaterBoost, Snapshot};
use vsmart_domain::time::Timestamp;

/// Client operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulatedOperation {
    SwitchSchedule,
    GetHomeData,
    SetStateModule,
}

/// A client call as received by the simulated cloud.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    SwitchSchedule {
        device_id: DeviceId,
        module_id: ModuleId,
        program_id: ProgramId,
    },
    GetHomeData,
    SetStateModule {
        home_id: HomeId,
        device_id: DeviceId,
        mode: SetpointMode,
        activate: bool,
        end_time: Option<Timestamp>,
    },
}

#[derive(Debug, Default)]
struct CloudState {
    server: Snapshot,
    homes: Vec<Home>,
    failures: HashMap<SimulatedOperation, ApiError>,
    calls: Vec<RecordedCall>,
    refreshes: usize,
}

impl CloudState {
    fn begin(&mut self, operation: SimulatedOperation, call: RecordedCall) -> Result<(), ApiError> {
        self.calls.push(call);
        match self.failures.get(&operation) {
            Some(err) => {
                tracing::debug!(?operation, %err, "simulated cloud failing call");
                Err(err.clone())
            }
            None => Ok(()),
        }
    }

    fn device_mut(&mut self, device_id: &DeviceId) -> Result<&mut Device, ApiError> {
        self.server
            .devices
            .iter_mut()
            .find(|d| &d.id == device_id)
            .ok_or_else(|| ApiError::new(format!("unknown device {device_id}")))
    }
}

/// In-memory vSMART cloud implementing [`VaillantClient`] and [`Coordinator`].
pub struct SimulatedCloud {
    latency: Duration,
    state: Mutex<CloudState>,
    published: RwLock<Arc<Snapshot>>,
}

impl SimulatedCloud {
    /// Create a cloud serving `devices` and `homes`, already published once.
    #[must_use]
    pub fn new(devices: Vec<Device>, homes: Vec<Home>) -> Self {
        let server = Snapshot::new(devices);
        Self {
            latency: Duration::ZERO,
            published: RwLock::new(Arc::new(server.clone())),
            state: Mutex::new(CloudState {
                server,
                homes,
                ..CloudState::default()
            }),
        }
    }

    /// Create a cloud from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimulatedError`] if the configuration is invalid.
    pub fn from_config(config: &SimulatedConfig) -> Result<Self, SimulatedError> {
        config.validate()?;
        Ok(Self::new(config.devices.clone(), config.homes.clone())
            .with_latency(Duration::from_millis(config.latency_ms)))
    }

    /// Delay every client call and refresh by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make every following call of `operation` fail with `message`.
    pub fn fail(&self, operation: SimulatedOperation, message: impl Into<String>) {
        self.lock()
            .failures
            .insert(operation, ApiError::new(message));
    }

    /// Stop failing calls of `operation`.
    pub fn recover(&self, operation: SimulatedOperation) {
        self.lock().failures.remove(&operation);
    }

    /// Every client call received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Number of home-data fetches received, failed ones included.
    #[must_use]
    pub fn home_data_fetches(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| matches!(call, RecordedCall::GetHomeData))
            .count()
    }

    /// Number of refreshes requested through the coordinator port.
    #[must_use]
    pub fn refresh_count(&self) -> usize {
        self.lock().refreshes
    }

    /// The server-side truth, which may be ahead of the published snapshot.
    #[must_use]
    pub fn server_snapshot(&self) -> Snapshot {
        self.lock().server.clone()
    }

    /// Mutate the server-side truth, e.g. to simulate a change made in the
    /// vendor app. Switches see it after the next refresh.
    pub fn update_server(&self, update: impl FnOnce(&mut Snapshot)) {
        update(&mut self.lock().server);
    }

    /// Publish the server snapshot without counting a refresh.
    pub fn publish(&self) {
        let snapshot = self.server_snapshot();
        self.replace_published(snapshot);
    }

    fn replace_published(&self, snapshot: Snapshot) {
        let mut published = self
            .published
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *published = Arc::new(snapshot);
    }

    fn lock(&self) -> MutexGuard<'_, CloudState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl VaillantClient for SimulatedCloud {
    async fn switch_schedule(
        &self,
        device_id: &DeviceId,
        module_id: &ModuleId,
        program_id: &ProgramId,
    ) -> Result<(), ApiError> {
        self.delay().await;
        let mut state = self.lock();
        state.begin(
            SimulatedOperation::SwitchSchedule,
            RecordedCall::SwitchSchedule {
                device_id: device_id.clone(),
                module_id: module_id.clone(),
                program_id: program_id.clone(),
            },
        )?;

        let module = state
            .device_mut(device_id)?
            .modules
            .iter_mut()
            .find(|m| &m.id == module_id)
            .ok_or_else(|| ApiError::new(format!("unknown module {module_id}")))?;
        if !module.therm_program_list.iter().any(|p| &p.id == program_id) {
            return Err(ApiError::new(format!("unknown program {program_id}")));
        }
        for program in &mut module.therm_program_list {
            program.selected = &program.id == program_id;
        }
        Ok(())
    }

    async fn get_home_data(&self) -> Result<Vec<Home>, ApiError> {
        self.delay().await;
        let mut state = self.lock();
        state.begin(SimulatedOperation::GetHomeData, RecordedCall::GetHomeData)?;
        Ok(state.homes.clone())
    }

    async fn set_state_module(
        &self,
        home_id: &HomeId,
        device_id: &DeviceId,
        mode: SetpointMode,
        activate: bool,
        end_time: Option<Timestamp>,
    ) -> Result<(), ApiError> {
        self.delay().await;
        let mut guard = self.lock();
        let state = &mut *guard;
        state.begin(
            SimulatedOperation::SetStateModule,
            RecordedCall::SetStateModule {
                home_id: home_id.clone(),
                device_id: device_id.clone(),
                mode,
                activate,
                end_time,
            },
        )?;

        if !state.homes.iter().any(|h| &h.home_id == home_id) {
            return Err(ApiError::new(format!("unknown home {home_id}")));
        }
        let device = state.device_mut(device_id)?;
        match mode {
            SetpointMode::Hwb => {
                device.setpoint_hwb = HotWaterBoost {
                    setpoint_activate: activate,
                    setpoint_endtime: end_time.filter(|_| activate),
                };
            }
            other => tracing::debug!(mode = %other, "simulated cloud ignores setpoint mode"),
        }
        Ok(())
    }
}

impl Coordinator for SimulatedCloud {
    fn snapshot(&self) -> Arc<Snapshot> {
        let published = self.published.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&published)
    }

    async fn request_refresh(&self) {
        self.delay().await;
        let snapshot = {
            let mut state = self.lock();
            state.refreshes += 1;
            state.server.clone()
        };
        self.replace_published(snapshot);
    }
}
