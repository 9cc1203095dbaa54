//! Metrics surface: the collector registry and the queue collector.
//!
//! Collectors describe their families up front and produce samples on
//! demand; the registry renders them with `qbridge_core::exposition`.

pub mod collector;
pub mod registry;

pub use collector::QueueCollector;
pub use registry::{Collector, Registry};
