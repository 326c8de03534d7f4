//! Startup settings read from the environment.
//!
//! Missing or unusable values fall back to the defaults.

pub const DEFAULT_GRID_W: usize = 10;
pub const DEFAULT_GRID_H: usize = 10;
pub const DEFAULT_MARGIN: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub width: usize,
    pub height: usize,
    pub margin: i32,
    /// Fixed seed for a reproducible maze sequence.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_W,
            height: DEFAULT_GRID_H,
            margin: DEFAULT_MARGIN,
            seed: None,
        }
    }
}

impl Settings {
    /// Reads `MAZE_WIDTH`, `MAZE_HEIGHT`, `MAZE_MARGIN` and `MAZE_SEED`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let width = lookup("MAZE_WIDTH")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_GRID_W);
        let height = lookup("MAZE_HEIGHT")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_GRID_H);
        let margin = lookup("MAZE_MARGIN")
            .and_then(|v| v.trim().parse::<i32>().ok())
            .filter(|v| *v >= 0)
            .unwrap_or(DEFAULT_MARGIN);
        let seed = lookup("MAZE_SEED").and_then(|v| v.trim().parse::<u64>().ok());
        Self {
            width,
            height,
            margin,
            seed,
        }
    }
}
