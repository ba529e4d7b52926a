use eframe::egui::Ui;
use egui_plot::{log_grid_spacer, Corner, GridMark, Legend, Line, Plot, PlotBounds, PlotPoints};

use crate::color::SeriesColors;
use crate::data::model::{DerivedStats, ParsedTable};

const MIN_STATIC_WIDTH: f32 = 320.0;
const MIN_STATIC_HEIGHT: f32 = 220.0;
const INTERACTIVE_HEIGHT: f32 = 360.0;

// ---------------------------------------------------------------------------
// Interactive chart
// ---------------------------------------------------------------------------

/// Zoomable log-scale chart of the preferred residual columns.
pub fn interactive_chart(ui: &mut Ui, id: usize, table: &ParsedTable, colors: &SeriesColors) {
    Plot::new(("interactive_plot", id))
        .height(INTERACTIVE_HEIGHT)
        .legend(Legend::default().position(Corner::LeftTop))
        .x_axis_label("Iteration")
        .y_axis_label("Residuals")
        .y_grid_spacer(log_grid_spacer(10))
        .y_axis_formatter(decade_label)
        .label_formatter(|name, point| {
            let residual = 10f64.powf(point.y);
            if name.is_empty() {
                format!("Time={}\nResidual={residual:.6e}", point.x)
            } else {
                format!("{name}\nTime={}\nResidual={residual:.6e}", point.x)
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for column in table.chart_columns() {
                for line in residual_lines(table, column, colors) {
                    plot_ui.line(line);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Static chart
// ---------------------------------------------------------------------------

/// Size and axis ranges of the static chart. Ranges are in plot space, so
/// `y_range` is in decades.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticLayout {
    pub width: f32,
    pub height: f32,
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
}

impl StaticLayout {
    /// `figure_width` / `figure_height` are in hundreds of pixels.
    pub fn new(stats: &DerivedStats, figure_width: u32, figure_height: u32) -> Self {
        let log_min = stats.min_residual.log10();
        let y_min = if log_min.is_finite() && log_min < 0.0 {
            log_min
        } else {
            -1.0
        };

        StaticLayout {
            width: (figure_width as f32 * 100.0).max(MIN_STATIC_WIDTH),
            height: (figure_height as f32 * 100.0).max(MIN_STATIC_HEIGHT),
            x_range: [0.0, stats.max_iteration],
            y_range: [y_min, 0.0],
        }
    }
}

/// Fixed-size, non-interactive chart of every residual column.
pub fn static_chart(
    ui: &mut Ui,
    id: usize,
    table: &ParsedTable,
    colors: &SeriesColors,
    layout: StaticLayout,
) {
    Plot::new(("static_plot", id))
        .width(layout.width)
        .height(layout.height)
        .legend(Legend::default().position(Corner::RightTop))
        .x_axis_label("Iterations")
        .y_axis_label("Residuals")
        .y_grid_spacer(log_grid_spacer(10))
        .y_axis_formatter(decade_label)
        .show_x(false)
        .show_y(false)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_double_click_reset(false)
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [layout.x_range[0], layout.y_range[0]],
                [layout.x_range[1], layout.y_range[1]],
            ));
            for column in &table.columns {
                for line in residual_lines(table, column, colors) {
                    plot_ui.line(line);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn residual_lines<'a>(
    table: &'a ParsedTable,
    column: &'a str,
    colors: &'a SeriesColors,
) -> impl Iterator<Item = Line<'a>> + 'a {
    let values = table.column(column).unwrap_or_default();
    let color = colors.color_for(column);
    log_segments(&table.time_values, values)
        .into_iter()
        .map(move |points| {
            Line::new(PlotPoints::from(points))
                .name(column)
                .color(color)
                .width(2.0)
        })
}

/// Split a series into drawable runs in `(x, log10 y)` space.
///
/// A point with a non-finite x or a y that is not finite and positive has no
/// place on a log axis; it ends the current run.
pub fn log_segments(x: &[f64], y: &[f64]) -> Vec<Vec<[f64; 2]>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();

    for (&xi, &yi) in x.iter().zip(y) {
        if xi.is_finite() && yi.is_finite() && yi > 0.0 {
            current.push([xi, yi.log10()]);
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Label whole decades as `10^-3`; leave in-between marks blank.
fn decade_label(mark: GridMark, _range: &std::ops::RangeInclusive<f64>) -> String {
    let rounded = mark.value.round();
    if (mark.value - rounded).abs() < 1e-9 {
        format!("10^{}", rounded as i64)
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_segments_break_on_gaps() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0, f64::NAN, 7.0];
        let y = [1.0, 0.1, f64::NAN, 0.01, 0.0, 0.5, 0.001];

        let segments = log_segments(&x, &y);
        let shape: Vec<Vec<f64>> = segments
            .iter()
            .map(|s| s.iter().map(|p| p[0]).collect())
            .collect();

        assert_eq!(shape, vec![vec![1.0, 2.0], vec![4.0], vec![7.0]]);
        assert!((segments[0][1][1] + 1.0).abs() < 1e-12);
        assert!((segments[1][0][1] + 2.0).abs() < 1e-12);
        assert!((segments[2][0][1] + 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_log_segments_empty() {
        assert!(log_segments(&[], &[]).is_empty());
        assert!(log_segments(&[1.0], &[f64::NAN]).is_empty());
    }

    #[test]
    fn test_static_layout() {
        let stats = DerivedStats {
            min_residual: 0.001,
            max_iteration: 250.0,
        };
        let layout = StaticLayout::new(&stats, 12, 5);

        assert_eq!(layout.width, 1200.0);
        assert_eq!(layout.height, 500.0);
        assert_eq!(layout.x_range, [0.0, 250.0]);
        assert!((layout.y_range[0] + 3.0).abs() < 1e-12);
        assert_eq!(layout.y_range[1], 0.0);
    }

    #[test]
    fn test_static_layout_minimum_size_and_default_range() {
        let layout = StaticLayout::new(&DerivedStats::default(), 1, 1);

        assert_eq!(layout.width, MIN_STATIC_WIDTH);
        assert_eq!(layout.height, MIN_STATIC_HEIGHT);
        assert_eq!(layout.x_range, [0.0, 1.0]);
        // log10(1) = 0 is not below zero, so one decade is shown.
        assert_eq!(layout.y_range, [-1.0, 0.0]);
    }

    #[test]
    fn test_decade_labels() {
        let mark = |value| GridMark {
            value,
            step_size: 1.0,
        };
        assert_eq!(decade_label(mark(-3.0), &(-4.0..=0.0)), "10^-3");
        assert_eq!(decade_label(mark(0.0), &(-4.0..=0.0)), "10^0");
        assert_eq!(decade_label(mark(-2.5), &(-4.0..=0.0)), "");
    }
}
