//! qbridge core: queue domain model, attribute catalog, and exposition types.
//!
//! This crate defines the pieces of the bridge that do not touch the network:
//! which queue attributes are exported, how a queue is named from its locator,
//! how raw attribute values become samples, and how samples are rendered in
//! the Prometheus text format. It carries no runtime or transport
//! dependencies so the exporter and its tests can share it freely.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Every fallible
//! path surfaces as `QBridgeError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod catalog;
pub mod error;
pub mod exposition;
pub mod metric;
pub mod queue;

/// Shared result type.
pub use error::{QBridgeError, Result};
