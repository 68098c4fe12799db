use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – insights
// ---------------------------------------------------------------------------

/// Render the insights list: top student, class averages, correlations.
pub fn insights_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Insights");
    ui.separator();

    let Some(insights) = &state.insights else {
        if state.loading() {
            ui.horizontal(|ui: &mut Ui| {
                ui.spinner();
                ui.label("Loading data...");
            });
        } else {
            ui.label("No dataset loaded.");
        }
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let top = &insights.top_performer;
            ui.label(format!("Top Student: {} ({})", top.name, top.assessment_score));

            for avg in &insights.class_averages {
                ui.label(format!("Class {} Avg Score: {:.2}", avg.group, avg.average));
            }

            let top_skill = insights
                .top_skill
                .map_or("n/a", |field| field.key());
            ui.label(format!("Skill most correlated with performance: {top_skill}"));

            ui.separator();
            egui::CollapsingHeader::new(RichText::new("Correlation with score").strong())
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    for corr in &insights.correlations {
                        let value = corr
                            .coefficient
                            .map_or_else(|| "n/a".to_string(), |r| format!("{r:+.3}"));
                        let mut text = RichText::new(format!("{}: {value}", corr.attribute.label()));
                        if Some(corr.attribute) == insights.top_skill {
                            text = text.strong();
                        }
                        ui.label(text);
                    }
                });
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
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} students loaded, {} visible",
                ds.len(),
                state.visible_records().len()
            ));
        }

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
        .set_title("Open student data")
        .add_filter("Supported files", &["json", "csv"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.start_loading(path);
    }
}
