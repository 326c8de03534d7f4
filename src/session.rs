//! Player movement, goal detection and level progression.

use rand::Rng;

use crate::cell::{Coord, Marker, Trail};
use crate::direction::Direction;
use crate::error::MazeError;
use crate::grid::Grid;
use crate::maze::Maze;
use crate::render::Renderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Edge of the grid or a standing wall. Nothing changed.
    Blocked,
    Moved(Coord),
    /// The goal was reached and a larger maze is ready.
    Advanced { round: u32 },
}

/// One player walking one maze at a time.
///
/// Owns the maze and the random source used to rebuild it, so a goal-reaching
/// move finishes the whole regeneration before it returns.
#[derive(Debug)]
pub struct GameSession<R> {
    maze: Maze,
    rng: R,
    start: Coord,
    goal: Coord,
    current: Coord,
    round: u32,
}

impl<R: Rng> GameSession<R> {
    pub fn new(maze: Maze, rng: R) -> Self {
        let origin = maze.origin();
        let mut session = Self {
            maze,
            rng,
            start: origin,
            goal: origin,
            current: origin,
            round: 0,
        };
        session.designate();
        session
    }

    pub fn from_grid(grid: Grid, mut rng: R) -> Self {
        let maze = Maze::generate(grid, &mut rng);
        Self::new(maze, rng)
    }

    /// Flags start and goal of the freshly carved maze and puts the player
    /// on the start.
    fn designate(&mut self) {
        self.start = self.maze.origin();
        self.goal = self.maze.deepest();
        self.current = self.start;

        let grid = self.maze.grid_mut();
        grid.clear_marks();
        // On a 1x1 grid start and goal coincide; the start marker wins.
        if let Some(cell) = grid.cell_mut(self.goal) {
            cell.marker = Marker::Goal;
        }
        if let Some(cell) = grid.cell_mut(self.start) {
            cell.marker = Marker::Start;
            cell.trail = Trail::Current { visited: false };
        }
    }

    /// Moves the player one cell. Blocked moves change nothing.
    pub fn move_player(&mut self, dir: Direction) -> MoveOutcome {
        let grid = self.maze.grid_mut();
        let Some(target) = grid.neighbor(self.current, dir) else {
            return MoveOutcome::Blocked;
        };
        if grid.has_wall_between(self.current, target) {
            return MoveOutcome::Blocked;
        }

        if let Some(cell) = grid.cell_mut(self.current) {
            cell.leave();
        }
        if target == self.goal {
            self.advance();
            return MoveOutcome::Advanced { round: self.round };
        }
        if let Some(cell) = grid.cell_mut(target) {
            cell.enter();
        }
        self.current = target;
        MoveOutcome::Moved(target)
    }

    fn advance(&mut self) {
        self.round += 1;
        let round = self.round as usize;
        self.maze.grid_mut().grow(round, round);
        self.maze.regenerate(&mut self.rng);
        self.designate();
    }

    /// Highlights the neighbor in `dir`. Clears the highlight at the edge.
    pub fn target(&mut self, dir: Direction) {
        let grid = self.maze.grid_mut();
        let chosen = grid.neighbor(self.current, dir);
        grid.set_chosen(chosen);
    }

    /// Handles a pick on `coord`, typically a mouse click mapped through
    /// [`Grid::cell_at_point`]. A neighbor of the player gets highlighted;
    /// picking the highlighted neighbor again moves there. Anything else
    /// clears the highlight.
    pub fn select(&mut self, coord: Option<Coord>) -> Option<MoveOutcome> {
        let dir = coord
            .filter(|c| self.grid().contains(*c))
            .and_then(|c| self.current.direction_to(c));
        let Some(dir) = dir else {
            self.maze.grid_mut().set_chosen(None);
            return None;
        };
        if self.grid().chosen() != coord {
            self.target(dir);
            return None;
        }
        let outcome = self.move_player(dir);
        self.maze.grid_mut().set_chosen(None);
        Some(outcome)
    }

    /// Puts the player on any cell without moving through the maze. Landing
    /// on the goal this way does not advance the round.
    pub fn place_player(&mut self, coord: Coord) -> Result<(), MazeError> {
        let grid = self.maze.grid_mut();
        if !grid.contains(coord) {
            return Err(MazeError::OutOfBounds(coord));
        }
        if let Some(cell) = grid.cell_mut(self.current) {
            cell.leave();
        }
        if let Some(cell) = grid.cell_mut(coord) {
            cell.trail = Trail::Current {
                visited: cell.is_visited(),
            };
        }
        self.current = coord;
        Ok(())
    }

    pub fn draw<T: Renderer>(&self, renderer: &mut T) -> Result<(), T::Error> {
        self.maze.grid().draw(renderer)
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn grid(&self) -> &Grid {
        self.maze.grid()
    }

    pub fn set_surface(&mut self, width: i32, height: i32) {
        self.maze.grid_mut().set_surface(width, height);
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn goal(&self) -> Coord {
        self.goal
    }

    pub fn current(&self) -> Coord {
        self.current
    }

    pub fn round(&self) -> u32 {
        self.round
    }
}
