// src/plot_framework.rs

use plotters::backend::{BitMapBackend, DrawingBackend, SVGBackend};
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{PathElement, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::{Color, IntoFont, RGBColor};

use ndarray::Array1;
use ndarray_stats::QuantileExt;

use std::error::Error;
use std::ops::Range;
use std::path::Path;

use tracing::{info, warn};

use crate::config::ImageFormat;
use crate::constants::{FONT_SIZE_MESSAGE, LINE_WIDTH_LEGEND, PLOT_HEIGHT, PLOT_WIDTH};
use crate::font_config::{
    FONT_TUPLE_AXIS_LABEL, FONT_TUPLE_CHART_TITLE, FONT_TUPLE_LEGEND, FONT_TUPLE_MAIN_TITLE,
    FONT_TUPLE_MESSAGE,
};

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Tick label text: "k"/"M" suffixes for large magnitudes, one decimal for small
/// fractional values.
pub fn format_axis_value(value: f64) -> String {
    if value.abs() >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value.abs() >= 1000.0 {
        format!("{:.1}k", value / 1000.0)
    } else if value.abs() < 10.0 && value.fract() != 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.0}", value)
    }
}

#[derive(Clone)]
pub struct PlotSeries {
    pub data: Vec<(f64, f64)>,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
}

impl PlotSeries {
    pub fn from_arrays(
        x: &Array1<f64>,
        y: &Array1<f64>,
        label: impl Into<String>,
        color: RGBColor,
        stroke_width: u32,
    ) -> Self {
        Self {
            data: x.iter().copied().zip(y.iter().copied()).collect(),
            label: label.into(),
            color,
            stroke_width,
        }
    }
}

#[derive(Clone)]
pub struct PlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub x_label: String,
    pub y_label: String,
}

impl PlotConfig {
    /// Builds a chart whose axes cover every finite point of `series`, padded by
    /// [`calculate_range`]. Returns `None` when there is nothing finite to draw.
    pub fn fitted_to_data(
        title: impl Into<String>,
        series: Vec<PlotSeries>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Option<Self> {
        let (x_min, x_max) = finite_bounds(series.iter().flat_map(|s| s.data.iter().map(|p| p.0)))?;
        let (y_min, y_max) = finite_bounds(series.iter().flat_map(|s| s.data.iter().map(|p| p.1)))?;
        let (x_lo, x_hi) = calculate_range(x_min, x_max);
        let (y_lo, y_hi) = calculate_range(y_min, y_max);
        Some(Self {
            title: title.into(),
            x_range: x_lo..x_hi,
            y_range: y_lo..y_hi,
            series,
            x_label: x_label.into(),
            y_label: y_label.into(),
        })
    }
}

fn finite_bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let finite: Array1<f64> = values.filter(|v| v.is_finite()).collect();
    let min = *finite.min().ok()?;
    let max = *finite.max().ok()?;
    Some((min, max))
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    plot_type: &str,
    reason: &str,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    const CHAR_WIDTH_RATIO: f32 = 0.6; // Approximate character width relative to font size

    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (x_range.end - x_range.start, y_range.end - y_range.start);
    let message = format!("{plot_type} Data Unavailable: {reason}");

    let estimated_char_width = (FONT_SIZE_MESSAGE as f32 * CHAR_WIDTH_RATIO) as i32;
    let estimated_text_width = message.len() as i32 * estimated_char_width;
    let center_x = width / 2 - estimated_text_width / 2;
    let center_y = height / 2 - FONT_SIZE_MESSAGE / 2;

    let text_style = FONT_TUPLE_MESSAGE.into_font().color(&RED);
    area.draw(&Text::new(message, (center_x, center_y), text_style))?;
    Ok(())
}

/// Draws one chart from a [`PlotConfig`] into `area`.
pub fn draw_chart<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    plot_config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let mut chart = ChartBuilder::on(area)
        .caption(&plot_config.title, FONT_TUPLE_CHART_TITLE)
        .margin(5)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(plot_config.x_range.clone(), plot_config.y_range.clone())?;

    chart
        .configure_mesh()
        .x_desc(&plot_config.x_label)
        .y_desc(&plot_config.y_label)
        .x_labels(15)
        .y_labels(10)
        .x_label_formatter(&|x: &f64| format_axis_value(*x))
        .y_label_formatter(&|y: &f64| format_axis_value(*y))
        .light_line_style(WHITE.mix(0.7))
        .label_style(FONT_TUPLE_AXIS_LABEL)
        .draw()?;

    let mut legend_series_count = 0;
    for s in &plot_config.series {
        if s.data.is_empty() {
            continue;
        }
        let color = s.color;
        let series = chart.draw_series(LineSeries::new(
            s.data.iter().copied(),
            color.stroke_width(s.stroke_width),
        ))?;

        if !s.label.is_empty() {
            series.label(s.label.as_str()).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH_LEGEND))
            });
            legend_series_count += 1;
        }
    }

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(FONT_TUPLE_LEGEND)
            .draw()?;
    }

    Ok(())
}

fn draw_panels<DB: DrawingBackend>(
    root_area: DrawingArea<DB, Shift>,
    root_name: &str,
    plot_type_name: &str,
    panels: &[Option<PlotConfig>],
) -> Result<bool, Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    root_area.fill(&WHITE)?;
    root_area.draw(&Text::new(
        root_name,
        (10, 10),
        FONT_TUPLE_MAIN_TITLE.into_font().color(&BLACK),
    ))?;
    let margined_root_area = root_area.margin(50, 5, 5, 5);
    let sub_plot_areas = margined_root_area.split_evenly((panels.len().max(1), 1));
    let mut any_panel_plotted = false;

    for (area, panel) in sub_plot_areas.iter().zip(panels) {
        match panel {
            Some(plot_config) => {
                let has_data = plot_config.series.iter().any(|s| !s.data.is_empty());
                let valid_ranges = plot_config.x_range.end > plot_config.x_range.start
                    && plot_config.y_range.end > plot_config.y_range.start;
                if has_data && valid_ranges {
                    draw_chart(area, plot_config)?;
                    any_panel_plotted = true;
                } else {
                    let reason = if !has_data { "No data points" } else { "Invalid ranges" };
                    draw_unavailable_message(area, plot_type_name, reason)?;
                }
            }
            None => draw_unavailable_message(area, plot_type_name, "No finite values")?,
        }
    }

    root_area.present()?;
    Ok(any_panel_plotted)
}

/// Renders a figure made of vertically stacked panels to `output_path`.
pub fn render_figure(
    output_path: &Path,
    image_format: ImageFormat,
    root_name: &str,
    plot_type_name: &str,
    panels: &[Option<PlotConfig>],
) -> Result<(), Box<dyn Error>> {
    let size = (PLOT_WIDTH, PLOT_HEIGHT);
    let any_panel_plotted = match image_format {
        ImageFormat::Svg => draw_panels(
            SVGBackend::new(output_path, size).into_drawing_area(),
            root_name,
            plot_type_name,
            panels,
        )?,
        ImageFormat::Png => draw_panels(
            BitMapBackend::new(output_path, size).into_drawing_area(),
            root_name,
            plot_type_name,
            panels,
        )?,
    };

    if any_panel_plotted {
        info!("{plot_type_name} chart saved as '{}'", output_path.display());
    } else {
        warn!(
            "'{}' holds only placeholder messages: no data available to plot",
            output_path.display()
        );
    }
    Ok(())
}


// src/plot_framework.rs
