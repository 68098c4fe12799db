use std::time::Duration;

use eframe::egui::{self, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{charts, panels, table};

/// Repaint interval while a background load is pending.
const LOAD_POLL_INTERVAL: Duration = Duration::from_millis(100);

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct StudentDashboardApp {
    pub state: AppState,
}

impl StudentDashboardApp {
    /// Create the app and start loading the configured data file.
    pub fn new(config: DashboardConfig) -> Self {
        let mut state = AppState::new(config);
        let path = state.config.data_path.clone();
        state.start_loading(path);
        Self { state }
    }
}

impl eframe::App for StudentDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_load();
        if self.state.loading() {
            ctx.request_repaint_after(LOAD_POLL_INTERVAL);
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: insights ----
        egui::SidePanel::left("insights_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::insights_panel(ui, &self.state);
            });

        // ---- Central panel: charts and table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.insights.is_none() {
                ui.centered_and_justified(|ui: &mut Ui| {
                    let text = if self.state.loading() {
                        "Loading data..."
                    } else {
                        "Open a student data file to begin  (File → Open…)"
                    };
                    ui.heading(text);
                });
                return;
            }

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.heading("Student Dashboard");
                    ui.add_space(8.0);
                    charts::skill_bar_chart(ui, &self.state);
                    ui.add_space(12.0);
                    charts::attention_scatter(ui, &self.state);
                    ui.add_space(12.0);
                    charts::top_student_radar(ui, &self.state);
                    ui.add_space(12.0);
                    table::student_table(ui, &mut self.state);
                });
        });
    }
}
