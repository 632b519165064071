use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalaryTierApp {
    pub state: AppState,
}

impl SalaryTierApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SalaryTierApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Right side panel: training distribution ----
        egui::SidePanel::right("tier_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                plot::tier_distribution(ui, &self.state);
            });

        // ---- Central panel: form and result ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                panels::query_form(ui, &mut self.state);
                panels::result_panel(ui, &self.state);
            });
        });
    }
}
