//! Rasterizes a [`Chart`] into an in-memory RGB bitmap with plotters.

use anyhow::Context;
use image::RgbImage;
use plotters::prelude::*;
use tracing::debug;

use crate::chart::{Chart, SeriesKind};
use crate::error::{GraphNarratorError, Result};
use crate::fonts::{self, FONT_FAMILY};

const COLOR_BLUE: RGBColor = RGBColor(59, 130, 246);
const COLOR_EMERALD: RGBColor = RGBColor(16, 185, 129);
const COLOR_AMBER: RGBColor = RGBColor(245, 158, 11);
const COLOR_ROSE: RGBColor = RGBColor(244, 63, 94);
const COLOR_PURPLE: RGBColor = RGBColor(139, 92, 246);
const COLOR_TEAL: RGBColor = RGBColor(20, 184, 166);

const SERIES_COLORS: [RGBColor; 6] = [
    COLOR_BLUE,
    COLOR_EMERALD,
    COLOR_AMBER,
    COLOR_ROSE,
    COLOR_PURPLE,
    COLOR_TEAL,
];

const BACKGROUND: RGBColor = RGBColor(250, 250, 250);
const GRID: RGBColor = RGBColor(220, 220, 220);

/// Share of each x slot covered by a group of bars.
const BAR_GROUP_WIDTH: f64 = 0.8;

/// Y-axis range with 10% padding, always including zero for bar charts.
fn y_range(chart: &Chart) -> (f64, f64) {
    let Some((mut lo, mut hi)) = chart.value_range() else {
        return (0.0, 1.0);
    };
    if chart.series.iter().any(|s| s.kind == SeriesKind::Bar) {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    let span = hi - lo;
    let padding = if span > 0.0 {
        span * 0.1
    } else {
        lo.abs().max(1.0) * 0.1
    };
    (lo - padding, hi + padding)
}

pub fn render_rgb(chart: &Chart) -> Result<RgbImage> {
    if chart.width == 0 || chart.height == 0 {
        return Err(GraphNarratorError::Image {
            message: format!("cannot render a {}x{} chart", chart.width, chart.height),
        });
    }
    fonts::ensure_registered()?;

    let mut buffer = vec![0u8; chart.width as usize * chart.height as usize * 3];
    draw(chart, &mut buffer).map_err(|e| GraphNarratorError::Image {
        message: format!("{:#}", e),
    })?;

    debug!(
        "Rendered chart '{}' ({} series) at {}x{}",
        chart.title,
        chart.series.len(),
        chart.width,
        chart.height
    );

    RgbImage::from_raw(chart.width, chart.height, buffer).ok_or_else(|| GraphNarratorError::Image {
        message: "render buffer does not match chart size".to_string(),
    })
}

fn draw(chart: &Chart, buffer: &mut [u8]) -> anyhow::Result<()> {
    let root = BitMapBackend::with_buffer(buffer, (chart.width, chart.height)).into_drawing_area();
    root.fill(&BACKGROUND)?;

    let points = chart.point_count();
    let x_max = points.max(1) as f64 - 0.5;
    let (y_min, y_max) = y_range(chart);

    let mut ctx = ChartBuilder::on(&root)
        .caption(&chart.title, (FONT_FAMILY, 28).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5..x_max, y_min..y_max)
        .context("building chart coordinates")?;

    let labels = &chart.x_labels;
    ctx.configure_mesh()
        .x_labels(points.clamp(1, 10))
        .y_labels(10)
        .light_line_style(ShapeStyle::from(&GRID).stroke_width(1))
        .x_label_formatter(&|x| {
            let rounded = x.round();
            if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
                return String::new();
            }
            labels.get(rounded as usize).cloned().unwrap_or_default()
        })
        .draw()
        .context("drawing mesh")?;

    let bar_count = chart
        .series
        .iter()
        .filter(|s| s.kind == SeriesKind::Bar)
        .count();
    let bar_width = BAR_GROUP_WIDTH / bar_count.max(1) as f64;
    let baseline = 0.0_f64.clamp(y_min, y_max);
    let mut bar_slot = 0usize;

    for (idx, series) in chart.series.iter().enumerate() {
        let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
        let finite = series
            .values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .map(|(i, v)| (i as f64, *v));

        let anno = match series.kind {
            SeriesKind::Line => ctx.draw_series(LineSeries::new(
                finite,
                ShapeStyle::from(&color).stroke_width(2),
            ))?,
            SeriesKind::Scatter => {
                ctx.draw_series(finite.map(|(x, y)| Circle::new((x, y), 4, color.filled())))?
            }
            SeriesKind::Bar => {
                let offset = -BAR_GROUP_WIDTH / 2.0 + bar_width * bar_slot as f64;
                bar_slot += 1;
                ctx.draw_series(finite.map(|(x, y)| {
                    let x0 = x + offset;
                    Rectangle::new([(x0, baseline), (x0 + bar_width, y)], color.filled())
                }))?
            }
        };
        anno.label(series.name.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));
    }

    if !chart.series.is_empty() {
        ctx.configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .context("drawing legend")?;
    }

    root.present().context("flushing bitmap")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;

    #[test]
    fn output_matches_configured_size() {
        let chart = Chart::new("size", ChartConfig { width: 320, height: 200 })
            .with_series("a", SeriesKind::Line, vec![1.0, 3.0, 2.0]);
        let img = render_rgb(&chart).unwrap();
        assert_eq!(img.dimensions(), (320, 200));
    }

    #[test]
    fn empty_chart_still_renders() {
        let chart = Chart::new("empty", ChartConfig { width: 360, height: 240 });
        let img = render_rgb(&chart).unwrap();
        assert_eq!(img.get_pixel(0, 0).0, [250, 250, 250]);
    }

    #[test]
    fn bars_and_nan_values_render() {
        let chart = Chart::new("mixed", ChartConfig { width: 400, height: 300 })
            .with_series("a", SeriesKind::Bar, vec![1.0, f64::NAN, -4.0])
            .with_series("b", SeriesKind::Bar, vec![2.0, 3.0, 1.0])
            .with_series("c", SeriesKind::Scatter, vec![0.5, 1.5, 2.5]);
        assert!(render_rgb(&chart).is_ok());
    }

    #[test]
    fn title_text_is_drawn() {
        let size = ChartConfig { width: 400, height: 300 };
        let titled = Chart::new("Monthly Sales", size)
            .with_series("sales", SeriesKind::Line, vec![1.0, 2.0, 3.0]);
        let untitled = Chart::new("", size)
            .with_series("sales", SeriesKind::Line, vec![1.0, 2.0, 3.0]);
        let a = render_rgb(&titled).unwrap();
        let b = render_rgb(&untitled).unwrap();
        assert_ne!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn japanese_labels_render() {
        let mut chart = Chart::new("月次売上", ChartConfig { width: 400, height: 300 })
            .with_series("売上", SeriesKind::Line, vec![10.0, 12.0, 9.0]);
        chart.x_labels = vec!["1月".into(), "2月".into(), "3月".into()];
        assert!(render_rgb(&chart).is_ok());
    }

    #[test]
    fn zero_size_is_an_image_error() {
        let chart = Chart::new("none", ChartConfig { width: 0, height: 10 });
        assert!(matches!(
            render_rgb(&chart),
            Err(GraphNarratorError::Image { .. })
        ));
    }
}
