use super::{Color, Rect, Surface, TextStyle};

/// A draw call captured by [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    FillRect {
        rect: Rect,
        color: Color,
    },
    FillText {
        text: String,
        x: f64,
        y: f64,
        style: TextStyle,
    },
    Save,
    Restore,
    Translate {
        dx: f64,
        dy: f64,
    },
    Rotate {
        radians: f64,
    },
}

/// Headless surface that records draw calls instead of painting pixels.
///
/// `clear` drops everything recorded so far, like clearing a canvas, so
/// [`ops`](Self::ops) is always what is currently visible.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    ops: Vec<DrawOp>,
    clears: usize,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Draw calls since the last clear.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// How many times the surface was cleared.
    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    /// Filled rectangles since the last clear, in draw order.
    #[must_use]
    pub fn rects(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    /// Drawn strings since the last clear, in draw order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.clears += 1;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            x,
            y,
            style: style.clone(),
        });
    }

    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.ops.push(DrawOp::Translate { dx, dy });
    }

    fn rotate(&mut self, radians: f64) {
        self.ops.push(DrawOp::Rotate { radians });
    }
}
