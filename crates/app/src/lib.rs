//! # vsmart-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** for the external collaborators:
//!   - `VaillantClient`: the vendor cloud API
//!   - `Coordinator`: the polling cache holding the latest snapshot
//!   - `Integration` / `IntegrationContext`: the host platform boundary
//! - Provide the **home directory**, a lazily filled, shared cache of homes
//! - Provide the **best-effort command policy** that turns client results
//!   into explicit outcomes and always refreshes afterwards
//!
//! ## Dependency rule
//! Depends on `vsmart-domain` only (plus `tokio::sync` for locks).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
