//! Procedural perfect mazes with a single player walking them.
//!
//! The core ([`grid`], [`maze`], [`session`]) never touches a drawing
//! backend; it draws through the [`render::Renderer`] trait. The crossterm
//! backend used by the `maze` binary lives in [`terminal`].
//!
//! ```
//! use maze_game::{Direction, GameSession, Geometry, Grid};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let grid = Grid::new(5, 5, Geometry::new(100, 100, 1)).unwrap();
//! let mut session = GameSession::from_grid(grid, StdRng::seed_from_u64(7));
//! assert_eq!(session.grid().removed_walls(), 24);
//!
//! let before = session.current();
//! session.move_player(Direction::North);
//! assert!(session.current() == before || session.grid().contains(session.current()));
//! ```

pub mod cell;
pub mod config;
pub mod direction;
pub mod error;
pub mod grid;
pub mod maze;
pub mod render;
pub mod session;
pub mod terminal;

pub use cell::{Cell, Coord, Marker, Role, Trail, Walls};
pub use direction::Direction;
pub use error::MazeError;
pub use grid::{Geometry, Grid, Layout};
pub use maze::Maze;
pub use render::{Color, Renderer};
pub use session::{GameSession, MoveOutcome};
