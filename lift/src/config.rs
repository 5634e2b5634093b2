//! Building configuration.
//!
//! A building is described in JSON by the time (ms) the lift needs to pass
//! through each room, listed top floor first the way a building is drawn.
//! Rooms with time `0` cannot be entered.

use std::fs;
use std::path::{Path, PathBuf};

use lift_core::{Coord, CostGrid, GridError};
use serde::Deserialize;

/// Errors raised while loading a building.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid building description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid room times: {0}")]
    Grid(#[from] GridError),

    #[error("start room {0} is outside the building")]
    StartOutside(Coord),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Lift door and departure timings.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct Timing {
    /// Time to open or to close the doors, in ms (default: 500)
    #[serde(default = "default_door_toggle_ms")]
    pub door_toggle_ms: u64,

    /// Pause between closing the doors and moving off, in ms (default: 1000)
    #[serde(default = "default_departure_delay_ms")]
    pub departure_delay_ms: u64,
}

fn default_door_toggle_ms() -> u64 {
    500
}

fn default_departure_delay_ms() -> u64 {
    1000
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            door_toggle_ms: default_door_toggle_ms(),
            departure_delay_ms: default_departure_delay_ms(),
        }
    }
}

/// A building: room traversal times plus lift settings.
#[derive(Clone, Debug, Deserialize)]
pub struct Building {
    /// Room times in ms, top floor first.
    pub times: Vec<Vec<u32>>,

    #[serde(default)]
    pub timing: Timing,

    /// Where the lift waits initially (default: ground floor, room 0).
    #[serde(default)]
    pub start: Coord,
}

impl Building {
    /// Load a building from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse a building from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// The cost grid with row 0 as the ground floor.
    pub fn grid(&self) -> Result<CostGrid> {
        let grid = CostGrid::from_rows(&self.times)?.flipped();
        if !grid.contains(self.start) {
            return Err(ConfigError::StartOutside(self.start));
        }
        log::debug!(
            "building has {} floors of {} rooms, {} enterable",
            grid.rows(),
            grid.cols(),
            grid.passable_count()
        );
        Ok(grid)
    }
}
