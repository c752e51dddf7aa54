use chrono::{DateTime, Duration, Utc};
use plotters::prelude::*;

use crate::models::{parse_instant, ChartEntry, RollingWindow};

const GOLD: RGBColor = RGBColor(0xff, 0xd7, 0x00);
const BACKGROUND: RGBColor = RGBColor(0x1c, 0x1c, 0x1c);
const TEXT: RGBColor = RGBColor(0xf5, 0xf5, 0xf5);

/// Chart entries that can be placed on a time axis, in window order.
/// Entries whose label is not a valid timestamp are skipped.
pub fn plottable_points(window: &RollingWindow<ChartEntry>) -> Vec<(DateTime<Utc>, f64)> {
    window
        .iter()
        .filter_map(|e| parse_instant(&e.label).map(|t| (t, e.value)))
        .collect()
}

/// Render the chart series as a PNG line chart at `path`
pub fn render_chart(
    window: &RollingWindow<ChartEntry>,
    path: &str,
    width: u32,
    height: u32,
) -> Result<(), String> {
    if window.is_empty() {
        return Err("No price data received yet.".to_string());
    }

    let price_points = plottable_points(window);

    if price_points.len() < 2 {
        return Err("Not enough price data to generate chart (minimum 2 points required).".to_string());
    }

    let backend = BitMapBackend::new(path, (width, height));
    let root = backend.into_drawing_area();
    root.fill(&BACKGROUND)
        .map_err(|e| format!("Failed to fill canvas: {}", e))?;

    // Find price range
    let min_price = price_points.iter()
        .map(|p| p.1)
        .fold(f64::INFINITY, f64::min);
    let max_price = price_points.iter()
        .map(|p| p.1)
        .fold(f64::NEG_INFINITY, f64::max);

    let price_range = (max_price - min_price).max(1e-8);
    let padding = price_range * 0.1;
    let y_min = (min_price - padding).max(0.0);
    let y_max = max_price + padding;

    // The feed is ascending in practice, but labels are not re-sorted, so scan for bounds
    let mut x_min = price_points.iter().map(|p| p.0).min().unwrap_or_else(Utc::now);
    let mut x_max = price_points.iter().map(|p| p.0).max().unwrap_or_else(Utc::now);
    if x_min == x_max {
        x_min = x_min - Duration::minutes(1);
        x_max = x_max + Duration::minutes(1);
    }

    let mut chart = ChartBuilder::on(&root)
        .caption("Or (XAU) en XOF/oz", ("sans-serif", 32.0).into_font().color(&GOLD))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| format!("Failed to build chart: {}", e))?;

    chart
        .configure_mesh()
        .x_desc("Heure (UTC)")
        .y_desc("Prix (XOF)")
        .x_label_formatter(&|t: &DateTime<Utc>| t.format("%H:%M").to_string())
        .axis_desc_style(("sans-serif", 16).into_font().color(&GOLD))
        .label_style(("sans-serif", 13).into_font().color(&TEXT))
        .bold_line_style(GOLD.mix(0.2))
        .light_line_style(GOLD.mix(0.05))
        .axis_style(TEXT)
        .draw()
        .map_err(|e| format!("Failed to draw mesh: {}", e))?;

    chart
        .draw_series(LineSeries::new(price_points.iter().copied(), GOLD.stroke_width(2)))
        .map_err(|e| format!("Failed to draw line: {}", e))?
        .label("Valeur (mid) en XOF/oz")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GOLD.stroke_width(2)));

    chart
        .draw_series(price_points.iter().map(|p| Circle::new(*p, 3, GOLD.filled())))
        .map_err(|e| format!("Failed to draw points: {}", e))?;

    chart
        .configure_series_labels()
        .background_style(BACKGROUND)
        .border_style(GOLD)
        .label_font(("sans-serif", 13).into_font().color(&TEXT))
        .position(SeriesLabelPosition::UpperLeft)
        .draw()
        .map_err(|e| format!("Failed to draw legend: {}", e))?;

    root.present()
        .map_err(|e| format!("Failed to render chart: {}", e))?;

    Ok(())
}
