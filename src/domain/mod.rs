//! Domain layer for dominion-logging.
//!
//! Contains the caller-facing severity scale and its mapping onto the host
//! backend's levels.

pub mod severity;

pub use severity::{LEVEL_MAPPING, Severity};
