//! Developer roster service library.
//!
//! Hosts the configuration and telemetry bootstrap shared by the binaries, plus the
//! [`developers`] module: level validation, the lifecycle service, its persistence
//! ports and adapters, and the axum router exposing the `/developers` resource.

pub mod config;
pub mod developers;
pub mod error;
pub mod telemetry;
