#![deny(missing_docs)]
#![doc = "Core error, randomness, provenance and value types shared by the holo crates."]

pub mod errors;
pub mod provenance;
pub mod rng;
mod types;

pub use errors::{ErrorInfo, HoloError};
pub use provenance::{FitProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RngHandle};
pub use types::SiteValue;

/// Convenience alias used throughout the holo crates.
pub type Result<T> = std::result::Result<T, HoloError>;
