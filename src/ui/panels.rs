use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use survey_filter::data::schema::{CategoricalField, LikertGroup, ANY, LIKERT_SCALE};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.table.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    let before = state.selections.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for field in CategoricalField::ALL {
                let labels = std::iter::once(ANY).chain(field.categories().iter().map(|c| c.label));
                let selected = state.selections.categorical.entry(field).or_insert_with(|| ANY.to_string());
                selector(ui, field.title(), field.column(), selected, labels);
            }

            for group in LikertGroup::ALL {
                ui.add_space(6.0);
                egui::CollapsingHeader::new(RichText::new(group.title()).strong())
                    .id_salt(group.title())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        for question in group.questions() {
                            let values: Vec<String> = LIKERT_SCALE.iter().map(|v| v.to_string()).collect();
                            let labels = std::iter::once(ANY).chain(values.iter().map(String::as_str));
                            let selected = state
                                .selections
                                .likert
                                .entry(question.column)
                                .or_insert_with(|| ANY.to_string());
                            selector(ui, question.label, question.column, selected, labels);
                        }
                    });
            }

            ui.add_space(8.0);
            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }
        });

    // Recompute visible indices only when a selector moved.
    if state.selections != before {
        state.refilter();
    }
}

/// A titled combo box choosing one of `labels`.
fn selector<'l>(
    ui: &mut Ui,
    title: &str,
    id: &str,
    selected: &mut String,
    labels: impl Iterator<Item = &'l str>,
) {
    ui.label(title);
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected.as_str())
        .width(ui.available_width() - 8.0)
        .show_ui(ui, |ui: &mut Ui| {
            for label in labels {
                ui.selectable_value(selected, label.to_string(), label);
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
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if state.table.is_some() {
            ui.label(format!(
                "{} responses loaded, {} matching",
                state.total_rows(),
                state.visible_indices.len()
            ));
            ui.separator();
        }

        ui.label(RichText::new(state.source.path().display().to_string()).weak());

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open survey data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.open(path);
    }
}
