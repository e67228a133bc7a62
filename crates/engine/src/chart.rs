//! Proportional bar chart of category totals.
//!
//! [`ChartLayout`] is the pure geometry pass; [`BarChart`] clears a
//! [`Surface`] and draws the layout onto it with value labels above the bars
//! and rotated category labels under the baseline. Rendering is a single
//! stateless pass, so drawing the same totals twice leaves the surface in the
//! same state.
//!
//! Negative totals are drawn as 0-height bars; their value label keeps the
//! sign.
use crate::{
    CategoryTotals,
    format::{CURRENCY_SUFFIX, capitalize, round_half_up},
};

pub use layout::{BarGeometry, ChartLayout};
pub use recording::{DrawOp, RecordingSurface};
pub use surface::{Color, Font, Rect, Surface, TextAlign, TextStyle};
pub use svg::SvgSurface;

mod layout;
mod recording;
mod surface;
mod svg;

/// Fixed look of the chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartStyle {
    /// Space kept free on each side of the plot area.
    pub margin: f64,
    /// Horizontal space between two bars.
    pub gap: f64,
    /// Bars never get narrower than this, even if they overflow the width.
    pub min_bar_width: f64,
    pub bar_color: Color,
    pub value_style: TextStyle,
    /// Distance between the top of a bar and the baseline of its value.
    pub value_offset: f64,
    pub label_style: TextStyle,
    /// Distance between the plot baseline and the category label anchor.
    pub label_offset: f64,
    /// Rotation of the category labels, in radians.
    pub label_angle: f64,
    pub placeholder: String,
    pub placeholder_style: TextStyle,
    pub placeholder_position: (f64, f64),
}

impl Default for ChartStyle {
    fn default() -> Self {
        let text = TextStyle {
            font: Font::new(12.0, "Arial"),
            color: Color::rgb(0x22, 0x22, 0x22),
            align: TextAlign::Left,
        };
        Self {
            margin: 20.0,
            gap: 10.0,
            min_bar_width: 20.0,
            bar_color: Color::rgb(0x34, 0x98, 0xdb),
            value_style: text.clone(),
            value_offset: 6.0,
            label_style: TextStyle {
                align: TextAlign::Right,
                ..text
            },
            label_offset: 10.0,
            label_angle: -0.3,
            placeholder: "Nincs adat a grafikonhoz.".to_string(),
            placeholder_style: TextStyle {
                font: Font::new(14.0, "Arial"),
                color: Color::rgb(0x99, 0x99, 0x99),
                align: TextAlign::Left,
            },
            placeholder_position: (10.0, 20.0),
        }
    }
}

/// Draws category totals as vertical bars.
#[derive(Clone, Debug, Default)]
pub struct BarChart {
    style: ChartStyle,
}

impl BarChart {
    #[must_use]
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }

    #[must_use]
    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Clears `surface` and draws `totals` onto it.
    ///
    /// With no categories only the placeholder message is drawn.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, totals: &CategoryTotals) {
        let style = &self.style;
        surface.clear();

        if totals.is_empty() {
            let (x, y) = style.placeholder_position;
            surface.fill_text(&style.placeholder, x, y, &style.placeholder_style);
            tracing::debug!("rendered empty chart placeholder");
            return;
        }

        let layout = ChartLayout::compute(surface.width(), surface.height(), totals, style);
        let label_y = layout.baseline() + style.label_offset;

        for bar in &layout.bars {
            surface.fill_rect(bar.rect(), style.bar_color);

            let value = format!("{}{CURRENCY_SUFFIX}", round_half_up(bar.value));
            surface.fill_text(&value, bar.x, bar.y - style.value_offset, &style.value_style);

            surface.save();
            surface.translate(bar.center_x(), label_y);
            surface.rotate(style.label_angle);
            surface.fill_text(&capitalize(&bar.category), 0.0, 0.0, &style.label_style);
            surface.restore();
        }

        tracing::debug!(
            bars = layout.bars.len(),
            bar_width = layout.bar_width,
            "rendered bar chart"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_labels_sit_above_bars() {
        let totals: CategoryTotals = [("food", 1500.0), ("transport", 300.0)]
            .into_iter()
            .collect();
        let mut surface = RecordingSurface::new(600.0, 300.0);
        BarChart::default().render(&mut surface, &totals);

        let texts: Vec<_> = surface
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillText { text, x, y, .. } => Some((text.as_str(), *x, *y)),
                _ => None,
            })
            .collect();
        // chart height 260, food bar full height starts at y = 20
        assert_eq!(texts[0], ("1500 Ft", 20.0, 14.0));
        assert_eq!(texts[1].0, "Food");
        assert_eq!(texts[2].0, "300 Ft");
        assert_eq!(texts[3].0, "Transport");
    }

    #[test]
    fn category_labels_are_rotated_and_right_aligned() {
        let totals: CategoryTotals = [("food", 10.0)].into_iter().collect();
        let mut surface = RecordingSurface::new(600.0, 300.0);
        BarChart::default().render(&mut surface, &totals);

        let ops = surface.ops();
        // FillRect, value FillText, Save, Translate, Rotate, label FillText, Restore
        assert_eq!(ops.len(), 7);
        assert_eq!(ops[2], DrawOp::Save);
        // bar width = 560 - 10 = 550, centre at 20 + 275
        assert_eq!(ops[3], DrawOp::Translate { dx: 295.0, dy: 290.0 });
        assert_eq!(ops[4], DrawOp::Rotate { radians: -0.3 });
        match &ops[5] {
            DrawOp::FillText { text, x, y, style } => {
                assert_eq!(text, "Food");
                assert_eq!((*x, *y), (0.0, 0.0));
                assert_eq!(style.align, TextAlign::Right);
            }
            other => panic!("unexpected op {other:?}"),
        }
        assert_eq!(ops[6], DrawOp::Restore);
    }

    #[test]
    fn negative_total_draws_flat_bar_with_signed_label() {
        let totals: CategoryTotals = [("food", 100.0), ("refund", -40.0)]
            .into_iter()
            .collect();
        let mut surface = RecordingSurface::new(600.0, 300.0);
        BarChart::default().render(&mut surface, &totals);

        let rects = surface.rects();
        assert_eq!(rects[1].height, 0.0);
        assert_eq!(rects[1].y, 280.0);
        assert!(surface.texts().contains(&"-40 Ft"));
    }
}
