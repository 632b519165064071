use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::data::model::Tier;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Training tier distribution (side panel)
// ---------------------------------------------------------------------------

/// Render how many training listings fell into each tier.
pub fn tier_distribution(ui: &mut Ui, state: &AppState) {
    ui.heading("Training tiers");
    ui.separator();

    let Some(bundle) = state.bundle() else {
        ui.label("No model trained yet.");
        return;
    };

    for tier in Tier::ALL {
        ui.label(format!("{tier}: {}", bundle.tier_counts[tier.index()]));
    }
    ui.add_space(6.0);

    let charts: Vec<BarChart> = Tier::ALL
        .iter()
        .map(|&tier| {
            let color = state.colors.strong(tier);
            let bar = Bar::new(tier.index() as f64, bundle.tier_counts[tier.index()] as f64)
                .name(tier.as_str())
                .fill(color)
                .width(0.7);
            BarChart::new(vec![bar]).name(tier.as_str()).color(color)
        })
        .collect();

    Plot::new("tier_distribution")
        .legend(Legend::default())
        .height(220.0)
        .show_x(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .y_axis_label("Listings")
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}
