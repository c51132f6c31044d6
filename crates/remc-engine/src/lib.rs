#![deny(missing_docs)]
#![doc = include_str!("../docs/replica-api.md")]

/// Per-temperature chain state.
pub mod chain;
/// YAML configuration schema and defaults.
pub mod config;
/// Deterministic seed derivation helpers.
pub mod determinism;
/// Replica-exchange engine and the public sampling driver.
pub mod engine;
/// Pairwise exchange schedule and swap test.
pub mod exchange;
/// Append-only sampling history.
pub mod history;
/// Run manifest serialization helpers.
pub mod manifest;
/// Coordinate-wise Metropolis updates.
pub mod metropolis;
/// Snapshot payload and persistence.
pub mod snapshot;

pub use config::{LadderPolicy, SamplerConfig, SeedPolicy, StepWidthPolicy};
pub use engine::ReplicaEngine;
pub use history::{HistoryStore, ACCEPTED, NOT_APPLICABLE, REJECTED};
pub use manifest::RunManifest;
pub use snapshot::SnapshotPayload;
