use eframe::egui::{self, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};
use survey_filter::data::schema::{find_likert, LikertGroup, LIKERT_SCALE};

use crate::color::likert_colors;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Likert distribution chart
// ---------------------------------------------------------------------------

/// Bar chart of how the matching responses answered one Likert question.
pub fn distribution_chart(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Answer Distribution");

    let current = find_likert(state.chart_question)
        .map(|(_, q)| q.label)
        .unwrap_or(state.chart_question);
    let mut picked = state.chart_question;
    egui::ComboBox::from_id_salt("chart_question")
        .selected_text(format!("{}: {current}", state.chart_question))
        .width(ui.available_width().min(520.0))
        .show_ui(ui, |ui: &mut Ui| {
            for group in LikertGroup::ALL {
                for q in group.questions() {
                    ui.selectable_value(&mut picked, q.column, format!("{}: {}", q.column, q.label));
                }
            }
        });

    if picked != state.chart_question {
        state.set_chart_question(picked);
    }
    let counts = state.chart_counts;

    let colors = likert_colors();
    let bars: Vec<Bar> = LIKERT_SCALE
        .iter()
        .zip(counts)
        .zip(colors)
        .map(|((&value, n), color)| {
            Bar::new(f64::from(value), n as f64)
                .name(format!("{value}"))
                .fill(color)
                .width(0.7)
        })
        .collect();

    Plot::new("likert_distribution")
        .height(200.0)
        .legend(Legend::default())
        .x_axis_label("Answer")
        .y_axis_label("Responses")
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(state.chart_question));
        });
}
