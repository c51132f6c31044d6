#![deny(missing_docs)]
#![doc = "Core traits and data types shared by the REMC sampler crates: the \
structured error model, the deterministic RNG handle with substream seed \
derivation, and the probability-model capability trait consumed by the engine."]

pub mod errors;
pub mod model;
pub mod rng;

pub use errors::{ErrorInfo, RemcError};
pub use model::{gaussian_coordinate_step, ProbabilityModel};
pub use rng::{derive_substream_seed, RngHandle};
