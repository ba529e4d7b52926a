use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::ParsedTable;
use crate::data::parser::TIME_COLUMN;

const ROW_HEIGHT: f32 = 18.0;
const MAX_TABLE_HEIGHT: f32 = 320.0;

/// Render one parsed file as a scrollable table: `Time` then every column.
pub fn residual_table(ui: &mut Ui, id: usize, table: &ParsedTable) {
    let columns: Vec<&[f64]> = table
        .columns
        .iter()
        .map(|name| table.column(name).unwrap_or_default())
        .collect();

    ui.push_id(("residual_table", id), |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(MAX_TABLE_HEIGHT)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(Column::auto().at_least(72.0), table.columns.len() + 1)
            .header(ROW_HEIGHT + 4.0, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.strong(TIME_COLUMN);
                });
                for name in &table.columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, table.len(), |mut row| {
                    let index = row.index();
                    row.col(|ui: &mut Ui| {
                        ui.monospace(format_value(table.time_values[index]));
                    });
                    for values in &columns {
                        row.col(|ui: &mut Ui| {
                            ui.monospace(format_value(values[index]));
                        });
                    }
                });
            });
    });
}

/// Format a cell: blank for non-finite, exponential for very large or very
/// small magnitudes, shortest decimal otherwise.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(0.001..1000.0).contains(&magnitude) {
        // Rust writes `1.5e-4` / `1.5e3`; show an explicit exponent sign.
        let formatted = format!("{value:.6e}");
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        }
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value_plain() {
        assert_eq!(format_value(0.5), "0.5");
        assert_eq!(format_value(1.0), "1");
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(-12.25), "-12.25");
        assert_eq!(format_value(0.001), "0.001");
        assert_eq!(format_value(999.5), "999.5");
    }

    #[test]
    fn test_format_value_exponential() {
        assert_eq!(format_value(1000.0), "1.000000e+3");
        assert_eq!(format_value(123456.0), "1.234560e+5");
        assert_eq!(format_value(0.00015), "1.500000e-4");
        assert_eq!(format_value(-2.5e-7), "-2.500000e-7");
    }

    #[test]
    fn test_format_value_non_finite_is_blank() {
        assert_eq!(format_value(f64::NAN), "");
        assert_eq!(format_value(f64::INFINITY), "");
    }
}
