//! Top-level facade crate for qbridge.
//!
//! Re-exports core types and the exporter library so users can depend on a single crate.

pub mod core {
    pub use qbridge_core::*;
}

pub mod exporter {
    pub use qbridge_exporter::*;
}
