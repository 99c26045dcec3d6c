//! Test fixtures and logging helpers for Rift development.
//!
//! The [`fixtures`] module declares a small vehicle hierarchy used across
//! the workspace's tests and benchmarks:
//!
//! ```text
//! Vehicle (class, abstract)      speed, name
//! ├── Car                        bEnabled, doors, transform
//! │   └── Wheel (CarWheel)       radius
//! └── Truck                      payload, speed (redeclared)
//!     └── Wheel (TruckWheel)     radius
//! Transform (struct)             x, y
//! ```

#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    fixture_reflection, register_fixtures, Car, CarWheel, Transform, Truck, TruckWheel, Vehicle,
};

/// Initialize a tracing subscriber for tests.
///
/// Output goes through the test writer so it is captured per test.
/// `RUST_LOG` overrides the default `debug` filter. Calling it more than
/// once is harmless.
pub fn init_test_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}
