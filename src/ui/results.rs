use eframe::egui::{self, Label, ScrollArea, TextEdit, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::{response_columns, AppState};
use crate::ui::chart;

// ---------------------------------------------------------------------------
// Central panel – count, matching rows, chart, free-text responses
// ---------------------------------------------------------------------------

/// Render everything derived from the current filter result.
pub fn results_panel(ui: &mut Ui, state: &mut AppState) {
    if state.table.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a survey file to begin  (File → Open…)");
        });
        return;
    }

    ui.heading("Survey Response Filter");
    ui.label(egui::RichText::new(format!("Number of responses: {}", state.visible_indices.len())).strong());
    ui.separator();

    ScrollArea::vertical()
        .id_salt("results_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if !state.visible_indices.is_empty() {
                rows_table(ui, state);
                ui.separator();
            }

            chart::distribution_chart(ui, state);
            ui.separator();

            responses(ui, state);
        });
}

/// The matching rows, every column of the source file.
fn rows_table(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        return;
    };
    let n_cols = table.column_names.len();

    ScrollArea::horizontal().id_salt("rows_table").show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(280.0)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(Column::initial(110.0).at_least(40.0).clip(true), n_cols)
            .header(20.0, |mut header| {
                for name in &table.column_names {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name.as_str());
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, state.visible_indices.len(), |mut row| {
                    let row_idx = state.visible_indices[row.index()];
                    for value in &table.rows[row_idx].values {
                        row.col(|ui: &mut Ui| {
                            ui.add(Label::new(value.to_string()).truncate());
                        });
                    }
                });
            });
    });
}

/// "View Responses": one toggle button per free-text question.
fn responses(ui: &mut Ui, state: &mut AppState) {
    ui.heading("View Responses");

    for &column in response_columns() {
        let open = matches!(state.shown_responses, Some((shown, _)) if shown == column);
        let caption = if open {
            format!("Hide Responses for {column}")
        } else {
            format!("Show Responses for {column}")
        };
        if ui.button(caption).clicked() {
            state.toggle_responses(column);
        }

        if let Some((shown, text)) = &state.shown_responses {
            if *shown == column {
                ui.label(format!("Responses for {column}"));
                let mut view: &str = text.as_str();
                ScrollArea::vertical()
                    .id_salt(column)
                    .max_height(300.0)
                    .show(ui, |ui: &mut Ui| {
                        ui.add(
                            TextEdit::multiline(&mut view)
                                .desired_rows(12)
                                .desired_width(f32::INFINITY),
                        );
                    });
            }
        }
    }
}
