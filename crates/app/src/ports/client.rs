//! Vendor client port: the calls the switches make against the cloud API.
//!
//! Connection handling, authentication, retries, and serialization belong to
//! the implementation. Every failure surfaces as a single [`ApiError`].

use std::future::Future;

use vsmart_domain::error::ApiError;
use vsmart_domain::home::{Home, SetpointMode};
use vsmart_domain::id::{DeviceId, HomeId, ModuleId, ProgramId};
use vsmart_domain::time::Timestamp;

/// Asynchronous client for the vSMART cloud API.
pub trait VaillantClient: Send + Sync {
    /// Make `program_id` the active weekly schedule of the module.
    fn switch_schedule(
        &self,
        device_id: &DeviceId,
        module_id: &ModuleId,
        program_id: &ProgramId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// List the homes of the account together with their modules.
    fn get_home_data(&self) -> impl Future<Output = Result<Vec<Home>, ApiError>> + Send;

    /// Change the setpoint mode of a device.
    ///
    /// `end_time` bounds a timed mode; `None` leaves the end to the server.
    fn set_state_module(
        &self,
        home_id: &HomeId,
        device_id: &DeviceId,
        mode: SetpointMode,
        activate: bool,
        end_time: Option<Timestamp>,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}
