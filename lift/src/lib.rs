//! Lift journeys through a building.
//!
//! Loads a building description ([`config`]), routes the lift over it with
//! `lift-paths`, and lays the route out as timed steps ([`journey`]).

pub mod config;
pub mod journey;

pub use config::{Building, ConfigError, Timing};
pub use journey::{Journey, Lift, Step};
