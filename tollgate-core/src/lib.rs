// tollgate-core/src/lib.rs

#![allow(missing_docs)]
// Memory safety
#![deny(unsafe_code)]
// Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 0. Ports (Interfaces / Traits)
// Defines the contracts (CheckpointRepository...)
pub mod ports;

// 1. Domain (checkpoint model, linter, run names)
// Depends on nothing else in the crate.
pub mod domain;

// 2. Infrastructure (YAML loader, variables, data context, filesystem store)
pub mod infrastructure;

// 3. Application (Use Cases: planning, inspection, editing)
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use domain::checkpoint::{ActionConfig, ActionSpec, CheckpointConfig, ValidationSpec};
pub use error::TollgateError;
