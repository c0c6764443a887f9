//! # vsmart-domain
//!
//! Pure domain model for the Vaillant vSMART switch integration.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the **snapshot** the coordinator caches (devices → modules → programs)
//! - Define **homes** and the rule that maps a device to the home it belongs to
//! - Define the host-facing descriptors (**entities**, **device entries**) that
//!   switches are registered as
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod command;
pub mod device;
pub mod entity;
pub mod home;
pub mod snapshot;
