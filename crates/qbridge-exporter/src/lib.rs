//! qbridge exporter library entry.
//!
//! Wires configuration, the upstream queue API, the inventory refresher, the
//! queue collector, and the HTTP surface into one exporter process. It is
//! consumed by the binary (`main.rs`) and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod app_state;
pub mod config;
pub mod inventory;
pub mod obs;
pub mod ops;
pub mod router;
pub mod upstream;
