use plotters::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistogramError {
    #[error("failed to render histogram: {0}")]
    Render(String),
}

/// Writes a PNG histogram of the per-observation total cost.
pub fn write_cost_histogram_png(output_path: &str, total_costs: &[f64]) -> Result<(), HistogramError> {
    if total_costs.is_empty() {
        return Ok(());
    }

    let min_value = total_costs.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_value = total_costs
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);

    let counts = bucket_counts(total_costs, min_value, max_value);
    let bin_width = bin_width(total_costs.len(), min_value, max_value);
    let max_count = *counts.values().max().unwrap_or(&1);

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let min_bucket = *counts.keys().next().unwrap_or(&0);
    let max_bucket = *counts.keys().next_back().unwrap_or(&0) + 1;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Total cost per observation", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(min_bucket..max_bucket, 0..(max_count + 1))
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Total cost")
        .y_desc("Observations")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_label_formatter(&|bucket| format!("{:.0}", min_value + *bucket as f64 * bin_width))
        .draw()
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let bar_color = RGBColor(30, 122, 204);
    let bar_style = ShapeStyle::from(&bar_color).filled();
    chart
        .draw_series(counts.iter().map(|(bucket, count)| {
            Rectangle::new([(*bucket, 0), (*bucket + 1, *count)], bar_style)
        }))
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| HistogramError::Render(e.to_string()))?;
    Ok(())
}

/// Square-root rule; a degenerate range collapses into one bucket.
fn bin_width(samples: usize, min_value: f64, max_value: f64) -> f64 {
    let range = max_value - min_value;
    if range <= f64::EPSILON {
        return 1.0;
    }
    range / (samples as f64).sqrt().ceil()
}

fn bucket_counts(
    values: &[f64],
    min_value: f64,
    max_value: f64,
) -> std::collections::BTreeMap<i32, usize> {
    let width = bin_width(values.len(), min_value, max_value);
    let mut counts = std::collections::BTreeMap::new();
    for value in values {
        let bucket = ((*value - min_value) / width).floor() as i32;
        *counts.entry(bucket).or_insert(0usize) += 1;
    }
    counts
}
