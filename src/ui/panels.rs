use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::Tier;
use crate::predict::{Prediction, QueryInput, EXPERIENCE_RANGES};
use crate::state::AppState;

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
        });

        ui.separator();

        match state.bundle() {
            Some(bundle) => {
                ui.label(format!(
                    "{} listings trained, {} duplicates dropped",
                    bundle.training_rows(),
                    bundle.duplicates_dropped
                ));
            }
            None => match &state.config.data_path {
                Some(path) => {
                    ui.label(format!("Dataset: {} (trains on first search)", path.display()));
                }
                None => {
                    ui.label("No dataset selected");
                }
            },
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Query form
// ---------------------------------------------------------------------------

/// Render the search form; pressing Search runs the prediction.
pub fn query_form(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new("Salary Range Prediction").size(26.0).strong());
    });
    ui.add_space(8.0);

    let form = &mut state.form;
    egui::Grid::new("query_form")
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui: &mut Ui| {
            text_row(ui, "Company Name", &mut form.company);
            text_row(ui, "Job Title", &mut form.title);
            text_row(ui, "Required Skills", &mut form.skills);

            ui.label("Experience");
            egui::ComboBox::from_id_salt("experience")
                .selected_text(form.experience.as_str())
                .show_ui(ui, |ui: &mut Ui| {
                    for range in EXPERIENCE_RANGES {
                        ui.selectable_value(&mut form.experience, range.to_string(), range);
                    }
                });
            ui.end_row();

            text_row(ui, "Job Location", &mut form.location);
        });

    ui.add_space(8.0);
    let search = egui::Button::new(RichText::new("Search").size(18.0).color(Color32::WHITE))
        .fill(Color32::from_rgb(0x33, 0x66, 0xff));
    if ui.add(search).clicked() {
        state.submit();
    }
}

fn text_row(ui: &mut Ui, label: &str, value: &mut String) {
    ui.label(label);
    ui.add(egui::TextEdit::singleline(value).desired_width(280.0));
    ui.end_row();
}

// ---------------------------------------------------------------------------
// Result panel
// ---------------------------------------------------------------------------

/// Render the last prediction, if any.
pub fn result_panel(ui: &mut Ui, state: &AppState) {
    let (Some(query), Some(prediction)) = (&state.last_query, &state.prediction) else {
        return;
    };

    ui.separator();
    ui.columns(2, |cols| {
        input_summary(&mut cols[0], query, prediction);
        context_summary(&mut cols[1], prediction);
    });

    ui.add_space(12.0);
    tier_banner(ui, state, prediction.tier);
}

fn input_summary(ui: &mut Ui, query: &QueryInput, p: &Prediction) {
    info(ui, "Company", &query.company);
    info(ui, "Location", &query.location);
    info(ui, "Title", &query.title);
    info(ui, "Skills", &query.skills);
    info(
        ui,
        "Experience",
        &format!("{}-{} Years", p.min_experience, p.max_experience),
    );
}

fn context_summary(ui: &mut Ui, p: &Prediction) {
    info(ui, "Industry", &p.industry);
    info(ui, "Ratings", &optional(p.ratings));
    info(ui, "Reviews", &p.reviews.to_string());
    info(ui, "Posted", &format!("{} days ago", optional(p.job_post_days_ago)));
    info(ui, "Min Salary (est)", &format!("{} LPA", p.min_salary));
    info(ui, "Max Salary (est)", &format!("{} LPA", p.max_salary));
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "unknown".to_string(), |v| v.to_string())
}

fn info(ui: &mut Ui, label: &str, value: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui: &mut Ui| {
            ui.strong(format!("{label}:"));
            ui.label(value);
        });
    });
}

fn tier_banner(ui: &mut Ui, state: &AppState, tier: Tier) {
    egui::Frame::group(ui.style())
        .fill(state.colors.soft(tier))
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(
                    RichText::new(format!("Predicted Salary Class: {tier}"))
                        .size(24.0)
                        .strong()
                        .color(Color32::from_rgb(0x1a, 0x23, 0x7e)),
                );
            });
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open job listings")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_dataset(&path);
    }
}
