use super::{ChartStyle, Rect};
use crate::CategoryTotals;

/// Position and size of one bar.
#[derive(Clone, Debug, PartialEq)]
pub struct BarGeometry {
    pub category: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BarGeometry {
    /// Horizontal midpoint of the bar.
    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Geometry of a chart for a given surface size.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartLayout {
    pub margin: f64,
    pub chart_width: f64,
    pub chart_height: f64,
    pub bar_width: f64,
    /// Largest category total; bars are scaled against it.
    pub max: f64,
    /// One bar per category, left to right in mapping order.
    pub bars: Vec<BarGeometry>,
}

impl ChartLayout {
    /// Lays out `totals` on a `width` x `height` surface.
    ///
    /// Bars grow upwards from the bottom of the plot area. A bar is
    /// `value / max` of the plot height, and 0 high when its value or `max`
    /// is not positive.
    #[must_use]
    pub fn compute(width: f64, height: f64, totals: &CategoryTotals, style: &ChartStyle) -> Self {
        let margin = style.margin;
        let chart_width = (width - 2.0 * margin).max(0.0);
        let chart_height = (height - 2.0 * margin).max(0.0);
        let max = totals.max_value().unwrap_or(0.0);

        let bar_width = if totals.is_empty() {
            style.min_bar_width
        } else {
            (chart_width / totals.len() as f64 - style.gap).max(style.min_bar_width)
        };

        let bars = totals
            .iter()
            .enumerate()
            .map(|(i, (category, value))| {
                let bar_height = if max > 0.0 && value > 0.0 {
                    value / max * chart_height
                } else {
                    0.0
                };
                BarGeometry {
                    category: category.to_string(),
                    value,
                    x: margin + i as f64 * (bar_width + style.gap),
                    y: margin + (chart_height - bar_height),
                    width: bar_width,
                    height: bar_height,
                }
            })
            .collect();

        Self {
            margin,
            chart_width,
            chart_height,
            bar_width,
            max,
            bars,
        }
    }

    /// The y coordinate bars grow up from.
    #[must_use]
    pub fn baseline(&self) -> f64 {
        self.margin + self.chart_height
    }
}
