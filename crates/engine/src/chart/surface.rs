use core::fmt;

/// Minimal 2D drawing target the chart renders onto.
///
/// Coordinates are pixels with the origin in the top-left corner and y
/// growing downwards. `save`/`restore` push and pop the current transform;
/// `translate` and `rotate` compose onto it.
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    /// Erases everything drawn so far.
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Draws `text` with its baseline at `y`, aligned on `x` per `style.align`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    fn rotate(&mut self, radians: f64);
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Opaque RGB colour. Displays as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    /// Size in pixels.
    pub size: f64,
    pub family: String,
}

impl Font {
    pub fn new(size: f64, family: impl Into<String>) -> Self {
        Self {
            size,
            family: family.into(),
        }
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.size, self.family)
    }
}

/// Which end of the text sits on the given x coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub color: Color,
    pub align: TextAlign,
}
