//! Perfect-maze generation by randomized depth-first carving.
//!
//! Carving starts from a random origin and records, for every cell, its
//! depth along the carved tree. The deepest cell is the natural goal.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::cell::Coord;
use crate::grid::Grid;

#[derive(Debug, Clone)]
pub struct Maze {
    grid: Grid,
    origin: Coord,
    /// Depth from `origin`, indexed by `Grid::index`.
    distances: Vec<u32>,
}

impl Maze {
    /// Carves a perfect maze into `grid`. Any earlier carving and cell state
    /// is discarded first.
    pub fn generate<R: Rng>(grid: Grid, rng: &mut R) -> Self {
        let mut maze = Self {
            origin: Coord::new(0, 0),
            distances: Vec::new(),
            grid,
        };
        maze.carve(rng);
        maze
    }

    /// Carves a new maze at the grid's current size.
    pub fn regenerate<R: Rng>(&mut self, rng: &mut R) {
        self.carve(rng);
    }

    fn carve<R: Rng>(&mut self, rng: &mut R) {
        self.grid.reset_cell_states();
        let n = self.grid.len();
        let origin = self.grid.coord(rng.gen_range(0..n));

        let mut visited = vec![false; n];
        let mut distances = vec![0u32; n];
        let mut stack = vec![origin];
        visited[self.grid.index(origin)] = true;

        while let Some(current) = stack.pop() {
            let unvisited: Vec<_> = self
                .grid
                .neighbors(current)
                .into_iter()
                .filter(|(_, next)| !visited[self.grid.index(*next)])
                .collect();

            if let Some(&(dir, next)) = unvisited.choose(rng) {
                stack.push(current);
                self.grid.carve(current, dir);
                let (cur_idx, next_idx) = (self.grid.index(current), self.grid.index(next));
                visited[next_idx] = true;
                distances[next_idx] = distances[cur_idx] + 1;
                stack.push(next);
            }
        }

        self.origin = origin;
        self.distances = distances;
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Callers that resize the grid must `regenerate` before reading
    /// distances again.
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn distance(&self, coord: Coord) -> Option<u32> {
        if self.grid.contains(coord) {
            self.distances.get(self.grid.index(coord)).copied()
        } else {
            None
        }
    }

    pub fn distances(&self) -> &[u32] {
        &self.distances
    }

    /// The cell farthest from the origin along the carved tree. Ties go to
    /// the first one in row-major order.
    pub fn deepest(&self) -> Coord {
        let mut best = 0;
        for (idx, &d) in self.distances.iter().enumerate() {
            if d > self.distances[best] {
                best = idx;
            }
        }
        self.grid.coord(best)
    }
}
