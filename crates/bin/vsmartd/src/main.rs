//! # vsmartd: vSMART switch daemon
//!
//! Composition root that wires the switch platform to a vSMART cloud and
//! keeps it running.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize logging
//! - Build the simulated cloud, which serves as both client and coordinator
//! - Set up the switch platform against an in-memory entity registry
//! - Handle graceful shutdown (Ctrl-C)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use vsmart_adapter_simulated::SimulatedCloud;
use vsmart_adapter_switch::VsmartSwitchPlatform;
use vsmart_app::ports::Integration;
use vsmart_app::services::home_directory::HomeDirectory;
use vsmart_app::services::integration_context::InMemoryContext;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Cloud
    let cloud = Arc::new(SimulatedCloud::from_config(&config.simulated)?);
    tracing::info!(
        devices = config.simulated.devices.len(),
        homes = config.simulated.homes.len(),
        latency_ms = config.simulated.latency_ms,
        "simulated vSMART cloud ready"
    );

    // Platform
    let homes = Arc::new(HomeDirectory::new());
    let registry = InMemoryContext::new();
    let mut platform = VsmartSwitchPlatform::new(Arc::clone(&cloud), cloud, homes);
    platform.setup(&registry).await?;

    for entity in registry.entities() {
        let label = entity
            .name
            .as_deref()
            .or(entity.translation_key.as_deref())
            .unwrap_or_default();
        tracing::info!(
            entity_id = %entity.id,
            unique_id = %entity.unique_id,
            device_id = %entity.device_id,
            state = %entity.state,
            label,
            "switch available"
        );
    }

    tracing::info!("vsmartd running, press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;

    tracing::info!("shutting down");
    platform.teardown().await?;
    Ok(())
}
