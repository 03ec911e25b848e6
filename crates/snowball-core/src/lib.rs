#![deny(missing_docs)]
#![doc = "Shared error, configuration, and seeding types for the snowball assertion engine."]

pub mod config;
pub mod errors;
pub mod rng;

pub use config::{AbortPolicy, SessionConfig, DEFAULT_EXIT_STATUS};
pub use errors::{AssertionFailure, SnowballError};
pub use rng::{derive_case_seed, FuzzRng};
