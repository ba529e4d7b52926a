use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::FileResult;
use crate::state::{AppState, Tab};
use crate::ui::plot::{self, StaticLayout};
use crate::ui::table::residual_table;

const NO_COLUMNS_MESSAGE: &str = "No numeric residual columns found.";

// ---------------------------------------------------------------------------
// Left side panel – figure settings and batch summary
// ---------------------------------------------------------------------------

/// Render the left settings panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Residuals");
    ui.separator();

    if ui.button("Upload residual files…").clicked() {
        open_file_dialog(state);
    }
    ui.label(state.summary());
    ui.add_space(8.0);

    ui.strong("Figure");
    egui::Grid::new("figure_settings")
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            ui.label("Width");
            ui.text_edit_singleline(&mut state.width_input);
            ui.end_row();

            ui.label("Height");
            ui.text_edit_singleline(&mut state.height_input);
            ui.end_row();
        });
    ui.checkbox(&mut state.show_filenames, "Show file names");
    ui.separator();

    // Per-file status list
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for file in &state.files {
                let (marker, color) = if file.is_ok() {
                    ("✔", Color32::DARK_GREEN)
                } else {
                    ("✘", Color32::RED)
                };
                ui.horizontal(|ui: &mut Ui| {
                    ui.label(RichText::new(marker).color(color));
                    ui.label(file.name());
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(!state.files.is_empty(), egui::Button::new("Export JSON…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
            if ui.button("Clear").clicked() {
                state.clear();
                ui.close_menu();
            }
        });

        ui.separator();

        for tab in Tab::ALL {
            if ui
                .selectable_label(state.active_tab == tab, tab.label())
                .clicked()
                && state.active_tab != tab
            {
                log::debug!("Switched to {} tab", tab.label());
                state.active_tab = tab;
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – one card per file, drawn by the active tab
// ---------------------------------------------------------------------------

/// Render every loaded file in the active tab.
pub fn results_panel(ui: &mut Ui, state: &AppState) {
    let tab = state.active_tab;
    if state.files.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(tab.empty_message());
        });
        return;
    }

    let figure_width = state.figure_width();
    let figure_height = state.figure_height();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (index, file) in state.files.iter().enumerate() {
                egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                    ui.set_width(ui.available_width());
                    if state.show_filenames {
                        ui.heading(file.name());
                    }

                    let table = match file {
                        FileResult::Ok { table, .. } => table,
                        FileResult::Error { message, .. } => {
                            error_label(ui, message);
                            return;
                        }
                    };

                    let columns: &[String] = match tab {
                        Tab::Interactive => table.chart_columns(),
                        Tab::Static | Tab::Table => &table.columns,
                    };
                    if columns.is_empty() {
                        error_label(ui, NO_COLUMNS_MESSAGE);
                        return;
                    }

                    match tab {
                        Tab::Interactive => plot::interactive_chart(ui, index, table, &state.colors),
                        Tab::Static => {
                            let layout = StaticLayout::new(&table.stats, figure_width, figure_height);
                            plot::static_chart(ui, index, table, &state.colors, layout);
                        }
                        Tab::Table => residual_table(ui, index, table),
                    }
                });
                ui.add_space(8.0);
            }
        });
}

fn error_label(ui: &mut Ui, message: &str) {
    ui.label(RichText::new(message).color(Color32::RED));
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let files = rfd::FileDialog::new()
        .set_title("Upload residual files")
        .add_filter("Residual logs", &["dat"])
        .add_filter("All files", &["*"])
        .pick_files();

    if let Some(paths) = files {
        let results = crate::data::loader::load_files(&paths);
        log::info!(
            "Loaded {} files, {} parsed",
            results.len(),
            results.iter().filter(|f| f.is_ok()).count()
        );
        state.set_files(results);
    }
}

fn export_dialog(state: &mut AppState) {
    let target = rfd::FileDialog::new()
        .set_title("Export parsed residuals")
        .add_filter("JSON", &["json"])
        .set_file_name("residuals.json")
        .save_file();

    if let Some(path) = target {
        if let Err(e) = export_json(&state.files, &path) {
            log::error!("Failed to export results: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

/// Write the loaded results to `path` as a JSON array.
pub fn export_json(files: &[FileResult], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(files).context("serializing results")?;
    std::fs::write(path, json)
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported {} files to {}", files.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parser::parse;

    #[test]
    fn test_export_json_writes_every_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        let files = vec![
            FileResult::parsed("a.dat", parse("x\nTime p\n1 0.5\n2 N/A\n").unwrap()),
            FileResult::failed("b.dat", "Could not parse header row."),
        ];

        export_json(&files, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["status"], "ok");
        assert_eq!(entries[0]["dataColumns"]["p"], serde_json::json!([0.5, null]));
        assert_eq!(entries[1]["status"], "error");
        assert_eq!(entries[1]["message"], "Could not parse header row.");
    }

    #[test]
    fn test_export_json_reports_bad_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.json");

        let err = export_json(&[], &path).unwrap_err();
        assert!(format!("{err:#}").starts_with("writing "));
    }
}
