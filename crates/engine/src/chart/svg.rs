use std::{fs, path::Path};

use super::{Color, Rect, Surface, TextAlign, TextStyle};
use crate::ResultEngine;

/// 2D affine transform `[a c e; b d f]`, same layout as a canvas matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Transform {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Transform {
    const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            e: self.e + self.a * dx + self.c * dy,
            f: self.f + self.b * dx + self.d * dy,
            ..self
        }
    }

    fn rotated(self, radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            a: self.a * cos + self.c * sin,
            b: self.b * cos + self.d * sin,
            c: self.c * cos - self.a * sin,
            d: self.d * cos - self.b * sin,
            ..self
        }
    }

    fn attribute(&self) -> String {
        if *self == Self::IDENTITY {
            return String::new();
        }
        format!(
            " transform=\"matrix({} {} {} {} {} {})\"",
            num(self.a),
            num(self.b),
            num(self.c),
            num(self.d),
            num(self.e),
            num(self.f)
        )
    }
}

/// Surface that builds an SVG document.
///
/// ```rust
/// use engine::chart::{BarChart, SvgSurface};
/// use engine::CategoryTotals;
///
/// let totals: CategoryTotals = [("food", 1500.0)].into_iter().collect();
/// let mut svg = SvgSurface::new(600.0, 300.0);
/// BarChart::default().render(&mut svg, &totals);
/// assert!(svg.to_svg().contains("1500 Ft"));
/// ```
#[derive(Clone, Debug)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    current: Transform,
    stack: Vec<Transform>,
    elements: Vec<String>,
}

impl SvgSurface {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            current: Transform::IDENTITY,
            stack: Vec::new(),
            elements: Vec::new(),
        }
    }

    /// The complete SVG document for what is currently drawn.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = num(self.width),
            h = num(self.height)
        );
        for element in &self.elements {
            out.push_str("  ");
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }

    /// Writes the document to `path`.
    pub fn write_to(&self, path: &Path) -> ResultEngine<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_svg())?;
        Ok(())
    }
}

impl Surface for SvgSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.elements.clear();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.elements.push(format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{color}\"{}/>",
            num(rect.x),
            num(rect.y),
            num(rect.width),
            num(rect.height),
            self.current.attribute()
        ));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        let anchor = match style.align {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
            TextAlign::Right => "end",
        };
        self.elements.push(format!(
            "<text x=\"{}\" y=\"{}\" fill=\"{}\" font-family=\"{}\" font-size=\"{}\" text-anchor=\"{anchor}\"{}>{}</text>",
            num(x),
            num(y),
            style.color,
            escape(&style.font.family),
            num(style.font.size),
            self.current.attribute(),
            escape(text)
        ));
    }

    fn save(&mut self) {
        self.stack.push(self.current);
    }

    fn restore(&mut self) {
        if let Some(previous) = self.stack.pop() {
            self.current = previous;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.current = self.current.translated(dx, dy);
    }

    fn rotate(&mut self, radians: f64) {
        self.current = self.current.rotated(radians);
    }
}

/// Up to three decimals, trailing zeros trimmed.
fn num(value: f64) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
