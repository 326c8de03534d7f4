//! Cell storage, adjacency and the wall model.
//!
//! Every interior wall is stored twice, once on each cell that shares it.
//! All mutations go through [`Grid::remove_wall_between`] (or the carver's
//! direction-based twin) so both copies always change together.

use crate::cell::{Cell, Coord, Marker, Role, Trail};
use crate::direction::Direction;
use crate::error::MazeError;
use crate::render::{Point, Renderer, BLACK};

/// Drawing-surface parameters. Only pixel mapping depends on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub surface_width: i32,
    pub surface_height: i32,
    pub margin: i32,
}

impl Geometry {
    pub fn new(surface_width: i32, surface_height: i32, margin: i32) -> Self {
        Self {
            surface_width,
            surface_height,
            margin: margin.max(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub cell_width: i32,
    pub cell_height: i32,
    pub margin: i32,
    /// Size of the drawn grid, margins included.
    pub drawn_width: i32,
    pub drawn_height: i32,
    /// Top-left of the drawn grid, centering it on the surface.
    pub offset_x: i32,
    pub offset_y: i32,
}

impl Layout {
    fn compute(geometry: &Geometry, width: usize, height: usize) -> Self {
        let m = geometry.margin;
        let (cols, rows) = (to_pixels(width), to_pixels(height));

        // Margins alone can exceed the surface; the math saturates instead.
        let gaps_w = m.saturating_mul(cols.saturating_add(1));
        let gaps_h = m.saturating_mul(rows.saturating_add(1));
        let cell_width = (geometry.surface_width.saturating_sub(gaps_w) / cols).max(0);
        let cell_height = (geometry.surface_height.saturating_sub(gaps_h) / rows).max(0);

        let drawn_width = cell_width.saturating_mul(cols).saturating_add(gaps_w);
        let drawn_height = cell_height.saturating_mul(rows).saturating_add(gaps_h);

        Self {
            cell_width,
            cell_height,
            margin: m,
            drawn_width,
            drawn_height,
            offset_x: geometry.surface_width.saturating_sub(drawn_width).div_euclid(2),
            offset_y: geometry.surface_height.saturating_sub(drawn_height).div_euclid(2),
        }
    }

    /// Wall strokes cover the margin on their side of the cell.
    pub fn wall_thickness(&self) -> i32 {
        self.margin.saturating_mul(2).saturating_add(1)
    }

    pub fn fits(&self) -> bool {
        self.cell_width > 0 && self.cell_height > 0
    }

    fn leading_edge(offset: i32, margin: i32, size: i32, index: usize) -> i32 {
        let i = to_pixels(index);
        offset
            .saturating_add(margin.saturating_mul(i.saturating_add(1)))
            .saturating_add(size.saturating_mul(i))
    }
}

fn to_pixels(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    geometry: Geometry,
    layout: Layout,
    cells: Vec<Cell>,
    chosen: Option<Coord>,
}

impl Grid {
    pub fn new(width: usize, height: usize, geometry: Geometry) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::EmptyGrid { width, height });
        }
        Ok(Self {
            width,
            height,
            geometry,
            layout: Layout::compute(&geometry, width, height),
            cells: vec![Cell::new(); width * height],
            chosen: None,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.height && coord.col < self.width
    }

    pub fn index(&self, coord: Coord) -> usize {
        coord.row * self.width + coord.col
    }

    pub fn coord(&self, index: usize) -> Coord {
        Coord::new(index / self.width, index % self.width)
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.cells.len()).map(move |i| self.coord(i))
    }

    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        if self.contains(coord) {
            self.cells.get(self.index(coord))
        } else {
            None
        }
    }

    pub fn cell_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        if self.contains(coord) {
            let idx = self.index(coord);
            self.cells.get_mut(idx)
        } else {
            None
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn neighbor(&self, coord: Coord, dir: Direction) -> Option<Coord> {
        let (dr, dc) = dir.delta();
        let row = coord.row as isize + dr;
        let col = coord.col as isize + dc;
        if row < 0 || col < 0 {
            return None;
        }
        let next = Coord::new(row as usize, col as usize);
        if self.contains(next) {
            Some(next)
        } else {
            None
        }
    }

    /// In-bounds neighbors in N, S, W, E order. Directions that leave the
    /// grid are simply absent.
    pub fn neighbors(&self, coord: Coord) -> Vec<(Direction, Coord)> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| self.neighbor(coord, dir).map(|n| (dir, n)))
            .collect()
    }

    pub fn open_directions(&self, coord: Coord) -> Vec<Direction> {
        self.neighbors(coord)
            .into_iter()
            .filter(|(_, n)| !self.has_wall_between(coord, *n))
            .map(|(dir, _)| dir)
            .collect()
    }

    pub fn cell_origin(&self, coord: Coord) -> Point {
        let l = &self.layout;
        (
            Layout::leading_edge(l.offset_x, l.margin, l.cell_width, coord.col),
            Layout::leading_edge(l.offset_y, l.margin, l.cell_height, coord.row),
        )
    }

    /// Maps a surface pixel back to the cell drawn there.
    ///
    /// Leading edges belong to the cell; trailing edges belong to whatever
    /// comes next (a margin gap, another cell or nothing).
    pub fn cell_at_point(&self, x: i32, y: i32) -> Option<Coord> {
        let l = &self.layout;
        let adjusted_x = x.saturating_sub(l.offset_x);
        let adjusted_y = y.saturating_sub(l.offset_y);
        if adjusted_x < 0 || adjusted_y < 0 {
            return None;
        }
        let pitch_x = l.cell_width.saturating_add(l.margin);
        let pitch_y = l.cell_height.saturating_add(l.margin);
        if pitch_x <= 0 || pitch_y <= 0 {
            return None;
        }

        let coord = Coord::new((adjusted_y / pitch_y) as usize, (adjusted_x / pitch_x) as usize);
        if !self.contains(coord) {
            return None;
        }
        let (cell_x, cell_y) = self.cell_origin(coord);
        let inside_x = cell_x <= x && x < cell_x.saturating_add(l.cell_width);
        let inside_y = cell_y <= y && y < cell_y.saturating_add(l.cell_height);
        if inside_x && inside_y {
            Some(coord)
        } else {
            None
        }
    }

    /// Carves the wall between two adjacent cells on both sides.
    pub fn remove_wall_between(&mut self, a: Coord, b: Coord) -> Result<(), MazeError> {
        for c in [a, b] {
            if !self.contains(c) {
                return Err(MazeError::OutOfBounds(c));
            }
        }
        let dir = a.direction_to(b).ok_or(MazeError::NotAdjacent { a, b })?;
        self.carve(a, dir);
        Ok(())
    }

    /// Carves from `coord` towards `dir`. No-op at the grid edge.
    pub(crate) fn carve(&mut self, coord: Coord, dir: Direction) {
        let Some(next) = self.neighbor(coord, dir) else {
            return;
        };
        let (a, b) = (self.index(coord), self.index(next));
        self.cells[a].walls.clear(dir);
        self.cells[b].walls.clear(dir.opposite());
    }

    /// Whether a wall separates `a` from `b`.
    ///
    /// Either copy standing counts as a wall. Pairs that are not adjacent
    /// (or not in the grid) always report a wall.
    pub fn has_wall_between(&self, a: Coord, b: Coord) -> bool {
        let (Some(cell_a), Some(cell_b)) = (self.cell(a), self.cell(b)) else {
            return true;
        };
        match a.direction_to(b) {
            Some(dir) => cell_a.walls.has(dir) || cell_b.walls.has(dir.opposite()),
            None => true,
        }
    }

    pub fn removed_walls(&self) -> usize {
        self.coords()
            .map(|c| {
                [Direction::East, Direction::South]
                    .into_iter()
                    .filter_map(|dir| self.neighbor(c, dir))
                    .filter(|n| !self.has_wall_between(c, *n))
                    .count()
            })
            .sum()
    }

    /// Grows the grid and rebuilds a fresh, fully walled cell array.
    pub fn grow(&mut self, by_rows: usize, by_cols: usize) {
        self.height += by_rows;
        self.width += by_cols;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.layout = Layout::compute(&self.geometry, self.width, self.height);
        self.cells = vec![Cell::new(); self.width * self.height];
        self.chosen = None;
    }

    /// Resets gameplay state and walls on every cell in place.
    pub fn reset_cell_states(&mut self) {
        for cell in &mut self.cells {
            cell.reset_state();
        }
        self.chosen = None;
    }

    /// Clears markers, trails and the highlight. Walls stay as carved.
    pub(crate) fn clear_marks(&mut self) {
        for cell in &mut self.cells {
            cell.marker = Marker::None;
            cell.trail = Trail::Untouched;
        }
        self.chosen = None;
    }

    /// Adapts the pixel mapping to a resized surface. Cells are untouched.
    pub fn set_surface(&mut self, surface_width: i32, surface_height: i32) {
        self.geometry.surface_width = surface_width;
        self.geometry.surface_height = surface_height;
        self.layout = Layout::compute(&self.geometry, self.width, self.height);
    }

    pub fn chosen(&self) -> Option<Coord> {
        self.chosen
    }

    /// Moves the single chosen highlight. Out-of-grid coordinates clear it.
    pub fn set_chosen(&mut self, coord: Option<Coord>) {
        self.chosen = coord.filter(|c| self.contains(*c));
    }

    pub fn role(&self, coord: Coord) -> Option<Role> {
        self.cell(coord)
            .map(|cell| cell.role(self.chosen == Some(coord)))
    }

    /// Draws every cell: standing walls in W, N, E, S order, then the body.
    pub fn draw<R: Renderer>(&self, renderer: &mut R) -> Result<(), R::Error> {
        let thickness = self.layout.wall_thickness();
        let (w, h) = (self.layout.cell_width, self.layout.cell_height);

        for (idx, cell) in self.cells.iter().enumerate() {
            let coord = self.coord(idx);
            let (x, y) = self.cell_origin(coord);
            let (right, bottom) = (x.saturating_add(w - 1), y.saturating_add(h - 1));
            let strokes = [
                ((x, y), (x, bottom)),
                ((x, y), (right, y)),
                ((right, y), (right, bottom)),
                ((x, bottom), (right, bottom)),
            ];
            for (standing, (start, end)) in cell.walls.as_array().into_iter().zip(strokes) {
                if standing {
                    renderer.draw_line(start, end, BLACK, thickness)?;
                }
            }

            let color = cell.role(self.chosen == Some(coord)).color();
            renderer.draw_rect(x, y, w, h, color)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Color, BLUE, NEON_GREEN, WHITE};

    fn grid(width: usize, height: usize) -> Grid {
        Grid::new(width, height, Geometry::new(255, 255, 5)).unwrap()
    }

    #[derive(Debug, PartialEq)]
    enum Call {
        Line(Point, Point),
        Rect(i32, i32, Color),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Renderer for Recorder {
        type Error = ();

        fn draw_rect(&mut self, x: i32, y: i32, _: i32, _: i32, color: Color) -> Result<(), ()> {
            self.calls.push(Call::Rect(x, y, color));
            Ok(())
        }

        fn draw_line(&mut self, start: Point, end: Point, _: Color, _: i32) -> Result<(), ()> {
            self.calls.push(Call::Line(start, end));
            Ok(())
        }

        fn clear_surface(&mut self, _: Color) -> Result<(), ()> {
            Ok(())
        }

        fn present(&mut self) -> Result<(), ()> {
            Ok(())
        }
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let geometry = Geometry::new(100, 100, 1);
        assert_eq!(
            Grid::new(0, 3, geometry).unwrap_err(),
            MazeError::EmptyGrid { width: 0, height: 3 }
        );
        assert!(Grid::new(3, 0, geometry).is_err());
    }

    #[test]
    fn test_layout_matches_surface() {
        let g = grid(10, 10);
        let l = g.layout();
        // (255 - 5 * 11) / 10
        assert_eq!(l.cell_width, 20);
        assert_eq!(l.drawn_width, 255);
        assert_eq!(l.offset_x, 0);
        assert_eq!(g.cell_origin(Coord::new(0, 0)), (5, 5));
        assert_eq!(g.cell_origin(Coord::new(1, 2)), (55, 30));
    }

    #[test]
    fn test_layout_centers_leftover() {
        let g = Grid::new(3, 3, Geometry::new(100, 50, 2)).unwrap();
        let l = g.layout();
        assert_eq!(l.cell_width, 30);
        assert_eq!(l.cell_height, 14);
        assert_eq!(l.drawn_width, 98);
        assert_eq!(l.offset_x, 1);
        assert_eq!(l.drawn_height, 50);
        assert_eq!(l.offset_y, 0);
    }

    #[test]
    fn test_neighbors_skip_out_of_bounds() {
        let g = grid(3, 2);
        let corner: Vec<Direction> = g.neighbors(Coord::new(0, 0)).into_iter().map(|(d, _)| d).collect();
        assert_eq!(corner, vec![Direction::South, Direction::East]);

        let edge = g.neighbors(Coord::new(1, 1));
        assert_eq!(
            edge,
            vec![
                (Direction::North, Coord::new(0, 1)),
                (Direction::West, Coord::new(1, 0)),
                (Direction::East, Coord::new(1, 2)),
            ]
        );
    }

    #[test]
    fn test_cell_at_point_edges() {
        let g = grid(10, 10);
        // Cell (0, 0) spans [5, 25) on both axes.
        assert_eq!(g.cell_at_point(5, 5), Some(Coord::new(0, 0)));
        assert_eq!(g.cell_at_point(24, 24), Some(Coord::new(0, 0)));
        assert_eq!(g.cell_at_point(25, 5), None);
        assert_eq!(g.cell_at_point(4, 5), None);
        assert_eq!(g.cell_at_point(30, 5), Some(Coord::new(0, 1)));
        assert_eq!(g.cell_at_point(-1, 5), None);
        assert_eq!(g.cell_at_point(254, 254), None);
        assert_eq!(g.cell_at_point(249, 249), Some(Coord::new(9, 9)));
    }

    #[test]
    fn test_cell_at_point_without_margin() {
        let g = Grid::new(2, 2, Geometry::new(20, 20, 0)).unwrap();
        assert_eq!(g.cell_at_point(9, 0), Some(Coord::new(0, 0)));
        assert_eq!(g.cell_at_point(10, 0), Some(Coord::new(0, 1)));
        assert_eq!(g.cell_at_point(20, 0), None);
    }

    #[test]
    fn test_cell_at_point_round_trips_origins() {
        let g = Grid::new(7, 4, Geometry::new(200, 90, 1)).unwrap();
        for c in g.coords() {
            let (x, y) = g.cell_origin(c);
            assert_eq!(g.cell_at_point(x, y), Some(c));
        }
    }

    #[test]
    fn test_remove_wall_is_symmetric() {
        let mut g = grid(3, 3);
        let a = Coord::new(1, 1);
        let b = Coord::new(1, 2);
        assert!(g.has_wall_between(a, b));
        g.remove_wall_between(a, b).unwrap();
        assert!(!g.has_wall_between(a, b));
        assert!(!g.has_wall_between(b, a));
        assert!(!g.cell(a).unwrap().walls.has(Direction::East));
        assert!(!g.cell(b).unwrap().walls.has(Direction::West));
        assert_eq!(g.removed_walls(), 1);
    }

    #[test]
    fn test_remove_wall_rejects_non_adjacent() {
        let mut g = grid(3, 3);
        let a = Coord::new(0, 0);
        let b = Coord::new(1, 1);
        assert_eq!(
            g.remove_wall_between(a, b),
            Err(MazeError::NotAdjacent { a, b })
        );
        assert_eq!(
            g.remove_wall_between(a, a),
            Err(MazeError::NotAdjacent { a, b: a })
        );
        assert_eq!(
            g.remove_wall_between(a, Coord::new(0, 5)),
            Err(MazeError::OutOfBounds(Coord::new(0, 5)))
        );
        assert_eq!(g.removed_walls(), 0);
    }

    #[test]
    fn test_has_wall_between_non_adjacent_is_walled() {
        let mut g = grid(3, 3);
        g.remove_wall_between(Coord::new(0, 0), Coord::new(0, 1)).unwrap();
        assert!(g.has_wall_between(Coord::new(0, 0), Coord::new(0, 2)));
        assert!(g.has_wall_between(Coord::new(0, 0), Coord::new(9, 9)));
    }

    #[test]
    fn test_has_wall_between_tolerates_one_sided_wall() {
        let mut g = grid(2, 1);
        let a = Coord::new(0, 0);
        let b = Coord::new(0, 1);
        g.cell_mut(a).unwrap().walls.clear(Direction::East);
        assert!(g.has_wall_between(a, b));
        assert!(g.has_wall_between(b, a));
    }

    #[test]
    fn test_grow_rebuilds_walled_cells() {
        let mut g = grid(3, 3);
        g.remove_wall_between(Coord::new(0, 0), Coord::new(0, 1)).unwrap();
        g.set_chosen(Some(Coord::new(0, 0)));
        g.grow(2, 1);
        assert_eq!((g.width(), g.height()), (4, 5));
        assert_eq!(g.len(), 20);
        assert_eq!(g.removed_walls(), 0);
        assert_eq!(g.chosen(), None);
        assert!(g.cells().iter().all(|c| *c == Cell::new()));
    }

    #[test]
    fn test_set_surface_keeps_cells() {
        let mut g = grid(3, 3);
        g.remove_wall_between(Coord::new(0, 0), Coord::new(1, 0)).unwrap();
        g.set_surface(40, 40);
        assert_eq!(g.removed_walls(), 1);
        // (40 - 5 * 4) / 3
        assert_eq!(g.layout().cell_width, 6);
    }

    #[test]
    fn test_draw_order_and_colors() {
        let mut g = Grid::new(2, 1, Geometry::new(25, 13, 1)).unwrap();
        g.remove_wall_between(Coord::new(0, 0), Coord::new(0, 1)).unwrap();
        g.cell_mut(Coord::new(0, 0)).unwrap().marker = Marker::Start;
        g.cell_mut(Coord::new(0, 1)).unwrap().trail = Trail::Current { visited: true };

        let mut rec = Recorder::default();
        g.draw(&mut rec).unwrap();

        // Cells are 11x11 at (1, 1) and (13, 1).
        assert_eq!(
            rec.calls,
            vec![
                Call::Line((1, 1), (1, 11)),
                Call::Line((1, 1), (11, 1)),
                Call::Line((1, 11), (11, 11)),
                Call::Rect(1, 1, NEON_GREEN),
                Call::Line((13, 1), (23, 1)),
                Call::Line((23, 1), (23, 11)),
                Call::Line((13, 11), (23, 11)),
                Call::Rect(13, 1, BLUE),
            ]
        );
    }

    #[test]
    fn test_chosen_highlight() {
        let mut g = grid(2, 2);
        g.set_chosen(Some(Coord::new(1, 1)));
        assert_eq!(g.role(Coord::new(1, 1)), Some(Role::Chosen));
        assert_eq!(g.role(Coord::new(0, 0)).map(|r| r.color()), Some(WHITE));
        g.set_chosen(Some(Coord::new(5, 5)));
        assert_eq!(g.chosen(), None);
    }

    #[test]
    fn test_huge_margin_saturates() {
        for margin in [1_000_000_000, i32::MAX] {
            let g = Grid::new(10, 10, Geometry::new(80, 40, margin)).unwrap();
            let l = g.layout();
            assert!(!l.fits());
            assert_eq!(l.cell_width, 0);
            assert_eq!(l.drawn_width, i32::MAX);
            assert!(l.wall_thickness() >= margin);

            for c in g.coords() {
                let (x, y) = g.cell_origin(c);
                assert_eq!(g.cell_at_point(x, y), None);
            }
            assert_eq!(g.cell_at_point(0, 0), None);
            assert_eq!(g.cell_at_point(i32::MAX, i32::MIN), None);

            let mut rec = Recorder::default();
            g.draw(&mut rec).unwrap();
            assert_eq!(rec.calls.len(), 500);
        }
    }

    #[test]
    fn test_clear_marks_keeps_walls() {
        let mut g = grid(2, 2);
        g.remove_wall_between(Coord::new(0, 0), Coord::new(0, 1)).unwrap();
        g.cell_mut(Coord::new(0, 0)).unwrap().marker = Marker::Start;
        g.cell_mut(Coord::new(1, 1)).unwrap().enter();
        g.set_chosen(Some(Coord::new(1, 0)));

        g.clear_marks();
        assert_eq!(g.removed_walls(), 1);
        assert_eq!(g.chosen(), None);
        assert!(g.coords().all(|c| g.role(c) == Some(Role::Default)));
    }
}
