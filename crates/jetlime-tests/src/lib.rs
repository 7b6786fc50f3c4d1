//! Integration test crate for JetLime.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It drives the engine through its public API and through the egui
//! frontend to verify they work together.

/// Route `tracing` output through the test harness. Filter with `RUST_LOG`,
/// e.g. `RUST_LOG=jetlime=trace`.
#[cfg(test)]
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[cfg(test)]
mod column;

#[cfg(test)]
mod row;

#[cfg(test)]
mod style_config;

#[cfg(test)]
mod egui_frontend;
