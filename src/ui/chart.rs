//! Line charts of time series.
//!
//! Each frame draws the chart afresh from the page state, so rendering the
//! same series twice gives the same picture.

use chrono::{Local, TimeZone};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols,
    text::Line,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph},
    Frame,
};
use sirona_types::{Bounds, Series};

use crate::data::grid::format_number;
use crate::ui::Theme;

/// What to draw in one chart area.
#[derive(Debug, Clone, Copy)]
pub struct ChartView<'a> {
    pub title: &'a str,
    pub series: &'a [Series],
    /// Failure of the last fetch, shown under the previous data.
    pub error: Option<&'a str>,
    /// Draw the time axis without labels.
    pub blank_x_labels: bool,
}

impl<'a> ChartView<'a> {
    pub fn new(title: &'a str, series: &'a [Series]) -> Self {
        Self {
            title,
            series,
            error: None,
            blank_x_labels: false,
        }
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    pub fn blank_x_labels(mut self, blank: bool) -> Self {
        self.blank_x_labels = blank;
        self
    }
}

/// Epoch milliseconds as a local date-time.
pub fn format_timestamp(ms: i64) -> String {
    match Local.timestamp_millis_opt(ms).single() {
        Some(time) => time.format("%Y-%m-%d %H:%M").to_string(),
        None => ms.to_string(),
    }
}

/// Extents of every plottable point, padded so neither axis is empty.
/// The y axis always includes zero.
pub fn plot_bounds(series: &[Series]) -> Option<Bounds> {
    let bounds = series
        .iter()
        .filter_map(Series::bounds)
        .reduce(|a, b| Bounds {
            x_min: a.x_min.min(b.x_min),
            x_max: a.x_max.max(b.x_max),
            y_min: a.y_min.min(b.y_min),
            y_max: a.y_max.max(b.y_max),
        })?;
    let y_min = bounds.y_min.min(0.0);
    // Timestamps come from the server and may sit at either end of i64
    let (x_min, x_max) = if bounds.x_max > bounds.x_min {
        (bounds.x_min, bounds.x_max)
    } else if bounds.x_min < i64::MAX {
        (bounds.x_min, bounds.x_min + 1)
    } else {
        (bounds.x_min - 1, bounds.x_min)
    };
    Some(Bounds {
        x_min,
        x_max,
        y_min,
        y_max: if bounds.y_max > y_min {
            bounds.y_max
        } else {
            y_min + 1.0
        },
    })
}

/// Start, middle and end of the time axis.
pub fn x_labels(bounds: &Bounds, blank: bool) -> Vec<String> {
    if blank {
        return vec![String::new(); 3];
    }
    let middle = ((i128::from(bounds.x_min) + i128::from(bounds.x_max)) / 2) as i64;
    [bounds.x_min, middle, bounds.x_max]
        .into_iter()
        .map(format_timestamp)
        .collect()
}

fn y_labels(bounds: &Bounds) -> Vec<String> {
    let middle = (bounds.y_min + bounds.y_max) / 2.0;
    [bounds.y_min, middle, bounds.y_max]
        .into_iter()
        .map(format_number)
        .collect()
}

/// Render `view` into `area`. Empty series show a placeholder.
pub fn render_chart(frame: &mut Frame, theme: &Theme, area: Rect, view: ChartView<'_>) {
    let mut block = Block::default()
        .title(format!(" {} ", view.title))
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border));
    if let Some(error) = view.error {
        block = block.title_bottom(Line::styled(format!(" {} ", error), theme.error_style()));
    }

    let Some(bounds) = plot_bounds(view.series) else {
        let placeholder = Paragraph::new("no data")
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    };

    let points: Vec<Vec<(f64, f64)>> = view.series.iter().map(Series::as_xy).collect();
    let datasets: Vec<Dataset> = view
        .series
        .iter()
        .zip(&points)
        .enumerate()
        .map(|(i, (series, points))| {
            Dataset::default()
                .name(series.label.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme.series_color(i)))
                .data(points)
        })
        .collect();

    let axis_style = Style::default().fg(theme.border);
    let x_axis = Axis::default()
        .style(axis_style)
        .bounds([bounds.x_min as f64, bounds.x_max as f64])
        .labels(x_labels(&bounds, view.blank_x_labels));
    let y_axis = Axis::default()
        .style(axis_style)
        .bounds([bounds.y_min, bounds.y_max])
        .labels(y_labels(&bounds));

    let legend = (view.series.len() > 1).then_some(LegendPosition::TopLeft);
    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis)
        .legend_position(legend);

    frame.render_widget(chart, area);
}
