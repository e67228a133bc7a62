use engine::{
    BarChart, CategoryTotals, ChartLayout, ChartStyle, ExpenseEntry, compute_category_totals,
    chart::{DrawOp, RecordingSurface, SvgSurface, Surface, TextAlign},
};

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 300.0;

fn totals(pairs: &[(&str, f64)]) -> CategoryTotals {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

fn render(totals: &CategoryTotals) -> RecordingSurface {
    let mut surface = RecordingSurface::new(WIDTH, HEIGHT);
    BarChart::default().render(&mut surface, totals);
    surface
}

#[test]
fn empty_mapping_draws_only_placeholder() {
    let surface = render(&CategoryTotals::new());

    assert!(surface.rects().is_empty());
    assert_eq!(surface.ops().len(), 1);
    match &surface.ops()[0] {
        DrawOp::FillText { text, x, y, style } => {
            assert_eq!(text, "Nincs adat a grafikonhoz.");
            assert_eq!((*x, *y), (10.0, 20.0));
            assert_eq!(style.color.to_string(), "#999999");
            assert_eq!(style.font.to_string(), "14px Arial");
        }
        other => panic!("unexpected op {other:?}"),
    }
}

#[test]
fn bar_heights_are_proportional() {
    let entries = vec![
        ExpenseEntry::new("a", "food", 1000.0),
        ExpenseEntry::new("b", "food", 500.0),
        ExpenseEntry::new("c", "transport", 300.0),
    ];
    let surface = render(&compute_category_totals(&entries));

    let rects = surface.rects();
    assert_eq!(rects.len(), 2);
    let chart_height = HEIGHT - 2.0 * 20.0;
    assert_eq!(rects[0].height, chart_height);
    assert!((rects[1].height - chart_height / 5.0).abs() < 1e-9);
    // both bars stand on the same baseline
    assert_eq!(rects[0].y + rects[0].height, HEIGHT - 20.0);
    assert!((rects[1].y + rects[1].height - (HEIGHT - 20.0)).abs() < 1e-9);
}

#[test]
fn bar_height_matches_rounded_ratio() {
    let map = totals(&[("a", 7.0), ("b", 13.0), ("c", 29.0), ("d", 3.5)]);
    let layout = ChartLayout::compute(WIDTH, HEIGHT, &map, &ChartStyle::default());
    let max = 29.0;

    for bar in &layout.bars {
        let expected = (bar.value / max * layout.chart_height).round();
        assert!((bar.height - expected).abs() <= 0.5, "{}", bar.category);
    }
}

#[test]
fn food_bar_is_twice_transport_when_double() {
    let surface = render(&totals(&[("food", 600.0), ("transport", 300.0)]));
    let rects = surface.rects();
    assert!((rects[0].height - 2.0 * rects[1].height).abs() < 1e-9);
}

#[test]
fn all_zero_values_collapse_bars() {
    let surface = render(&totals(&[("food", 0.0), ("fun", 0.0)]));
    let rects = surface.rects();
    assert_eq!(rects.len(), 2);
    assert!(rects.iter().all(|r| r.height == 0.0));
    assert!(rects.iter().all(|r| r.height.is_finite() && r.y.is_finite()));
}

#[test]
fn zero_amount_bar_has_zero_label() {
    let entries: Vec<ExpenseEntry> =
        serde_json::from_str(r#"[{"id":"a","category":"food","amount":"abc"}]"#).unwrap();
    let surface = render(&compute_category_totals(&entries));

    assert_eq!(surface.rects()[0].height, 0.0);
    assert_eq!(surface.texts(), vec!["0 Ft", "Food"]);
}

#[test]
fn bars_are_spaced_left_to_right() {
    let map = totals(&[("a", 1.0), ("b", 2.0), ("c", 3.0), ("d", 4.0)]);
    let layout = ChartLayout::compute(WIDTH, HEIGHT, &map, &ChartStyle::default());

    // 560 / 4 - 10
    assert_eq!(layout.bar_width, 130.0);
    let xs: Vec<_> = layout.bars.iter().map(|b| b.x).collect();
    assert_eq!(xs, vec![20.0, 160.0, 300.0, 440.0]);
}

#[test]
fn many_categories_keep_minimum_width() {
    let pairs: Vec<(String, f64)> = (0..40).map(|i| (format!("c{i}"), i as f64)).collect();
    let map: CategoryTotals = pairs.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    let layout = ChartLayout::compute(WIDTH, HEIGHT, &map, &ChartStyle::default());

    assert_eq!(layout.bar_width, 20.0);
    let last = layout.bars.last().unwrap();
    assert_eq!(last.x, 20.0 + 39.0 * 30.0);
    assert!(last.x + last.width > WIDTH);
}

#[test]
fn value_labels_round_half_up() {
    let surface = render(&totals(&[("a", 2.5), ("b", 10.49)]));
    let texts = surface.texts();
    assert_eq!(texts[0], "3 Ft");
    assert_eq!(texts[2], "10 Ft");
}

#[test]
fn category_labels_are_capitalized_and_right_aligned() {
    let surface = render(&totals(&[("élelmiszer", 10.0)]));
    let label = surface.ops().iter().find_map(|op| match op {
        DrawOp::FillText { text, style, .. } if style.align == TextAlign::Right => {
            Some(text.clone())
        }
        _ => None,
    });
    assert_eq!(label.as_deref(), Some("Élelmiszer"));
}

#[test]
fn rendering_twice_gives_same_state() {
    let map = totals(&[("food", 1500.0), ("transport", 300.0)]);
    let chart = BarChart::default();

    let mut surface = RecordingSurface::new(WIDTH, HEIGHT);
    chart.render(&mut surface, &map);
    let first = surface.ops().to_vec();
    chart.render(&mut surface, &map);

    assert_eq!(surface.ops(), first.as_slice());
    assert_eq!(surface.clear_count(), 2);
}

#[test]
fn rendering_replaces_previous_content() {
    let chart = BarChart::default();
    let mut surface = RecordingSurface::new(WIDTH, HEIGHT);
    chart.render(&mut surface, &totals(&[("food", 1.0)]));
    chart.render(&mut surface, &CategoryTotals::new());

    assert!(surface.rects().is_empty());
    assert_eq!(surface.texts(), vec!["Nincs adat a grafikonhoz."]);
}

#[test]
fn svg_output_is_idempotent() {
    let map = totals(&[("food", 1500.0), ("transport", 300.0)]);
    let chart = BarChart::default();

    let mut svg = SvgSurface::new(WIDTH, HEIGHT);
    chart.render(&mut svg, &map);
    let first = svg.to_svg();
    chart.render(&mut svg, &map);

    assert_eq!(svg.to_svg(), first);
    assert_eq!(first.matches("<rect").count(), 2);
    assert!(first.contains("fill=\"#3498db\""));
    assert!(first.contains(">Transport</text>"));
    assert_eq!(svg.width(), WIDTH);
}
