//! Drawing capability the core draws through.
//!
//! The grid only knows this trait; concrete backends (the crossterm one in
//! [`crate::terminal`], test doubles) live elsewhere.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const BLACK: Color = Color::rgb(0, 0, 0);
pub const WHITE: Color = Color::rgb(255, 255, 255);
pub const NEON_GREEN: Color = Color::rgb(57, 255, 20);
pub const GOLD: Color = Color::rgb(255, 215, 0);
pub const BLUE: Color = Color::rgb(0, 0, 255);
pub const YELLOW: Color = Color::rgb(255, 255, 0);
pub const LIGHT_GREY: Color = Color::rgb(211, 211, 211);

/// A pixel position on the drawing surface.
pub type Point = (i32, i32);

/// A drawing surface.
///
/// Calls are synchronous. Implementations read what they are given and never
/// call back into the maze.
pub trait Renderer {
    type Error;

    fn draw_rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
    ) -> Result<(), Self::Error>;

    fn draw_line(
        &mut self,
        start: Point,
        end: Point,
        color: Color,
        thickness: i32,
    ) -> Result<(), Self::Error>;

    fn clear_surface(&mut self, color: Color) -> Result<(), Self::Error>;

    /// Makes everything drawn since the last call visible.
    fn present(&mut self) -> Result<(), Self::Error>;
}
