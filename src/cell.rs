use std::fmt;

use crate::direction::Direction;
use crate::render::{Color, BLUE, GOLD, LIGHT_GREY, NEON_GREEN, WHITE, YELLOW};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Side of `self` that faces `other`, if the two share one.
    pub fn direction_to(self, other: Coord) -> Option<Direction> {
        let dr = other.row as isize - self.row as isize;
        let dc = other.col as isize - self.col as isize;
        Direction::ALL.into_iter().find(|d| d.delta() == (dr, dc))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Wall flags in fixed order: West, North, East, South.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walls([bool; 4]);

impl Default for Walls {
    fn default() -> Self {
        Walls([true; 4])
    }
}

impl Walls {
    pub fn has(&self, side: Direction) -> bool {
        self.0[side.wall_index()]
    }

    /// Carves one side. Walls are never raised again within a maze.
    pub fn clear(&mut self, side: Direction) {
        self.0[side.wall_index()] = false;
    }

    pub fn as_array(&self) -> [bool; 4] {
        self.0
    }
}

/// Persistent designation handed out by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Marker {
    #[default]
    None,
    Start,
    Goal,
}

/// What the player has done with a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trail {
    #[default]
    Untouched,
    Visited,
    /// The player stands here. `visited` records whether the cell was
    /// stepped onto (the start cell is occupied without being visited).
    Current { visited: bool },
}

/// The single presentation role of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Default,
    Start,
    Goal,
    Current,
    Visited,
    Chosen,
}

impl Role {
    pub fn color(self) -> Color {
        match self {
            Role::Default => WHITE,
            Role::Start => NEON_GREEN,
            Role::Goal => GOLD,
            Role::Current => BLUE,
            Role::Chosen => YELLOW,
            Role::Visited => LIGHT_GREY,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub walls: Walls,
    pub marker: Marker,
    pub trail: Trail,
}

impl Cell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the role shown for this cell.
    ///
    /// Precedence: current, chosen, visited, start, goal, default.
    pub fn role(&self, chosen: bool) -> Role {
        match self.trail {
            Trail::Current { .. } => Role::Current,
            _ if chosen => Role::Chosen,
            Trail::Visited => Role::Visited,
            Trail::Untouched => match self.marker {
                Marker::Start => Role::Start,
                Marker::Goal => Role::Goal,
                Marker::None => Role::Default,
            },
        }
    }

    pub fn is_current(&self) -> bool {
        matches!(self.trail, Trail::Current { .. })
    }

    pub fn is_visited(&self) -> bool {
        matches!(self.trail, Trail::Visited | Trail::Current { visited: true })
    }

    pub fn enter(&mut self) {
        self.trail = Trail::Current { visited: true };
    }

    pub fn leave(&mut self) {
        if let Trail::Current { visited } = self.trail {
            self.trail = if visited {
                Trail::Visited
            } else {
                Trail::Untouched
            };
        }
    }

    /// Back to a fully walled, unmarked, untouched cell.
    pub fn reset_state(&mut self) {
        *self = Cell::default();
    }
}
