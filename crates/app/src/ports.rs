//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod client;
pub mod coordinator;
pub mod integration;

pub use client::VaillantClient;
pub use coordinator::Coordinator;
pub use integration::{Integration, IntegrationContext, ServiceResponse};
