use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::NumericField;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 20.0;

/// Header text for a sortable column, with an arrow on the active one.
fn sortable_header(state: &AppState, column: NumericField) -> String {
    match state.sort.column {
        Some(active) if active == column => format!("{} {}", column.label(), state.sort.order.arrow()),
        _ => column.label().to_string(),
    }
}

/// Search box plus the student table. ID and Score headers sort on click.
pub fn student_table(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        return;
    }
    ui.heading("Student Table");
    ui.add(
        egui::TextEdit::singleline(&mut state.search)
            .hint_text("Search by name")
            .desired_width(240.0),
    );
    ui.add_space(6.0);

    let mut clicked = None;
    {
        let view = state.visible_records();
        let id_header = sortable_header(state, NumericField::StudentId);
        let score_header = sortable_header(state, NumericField::AssessmentScore);

        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(60.0))
            .column(Column::remainder().at_least(160.0))
            .column(Column::auto().at_least(70.0))
            .column(Column::auto().at_least(50.0))
            .header(ROW_HEIGHT + 4.0, |mut header| {
                header.col(|ui| {
                    if ui.button(id_header.as_str()).clicked() {
                        clicked = Some(NumericField::StudentId);
                    }
                });
                header.col(|ui| {
                    ui.strong("Name");
                });
                header.col(|ui| {
                    if ui.button(score_header.as_str()).clicked() {
                        clicked = Some(NumericField::AssessmentScore);
                    }
                });
                header.col(|ui| {
                    ui.strong("Class");
                });
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, view.len(), |mut row| {
                    let rec = view[row.index()];
                    row.col(|ui| {
                        ui.label(rec.student_id.to_string());
                    });
                    row.col(|ui| {
                        ui.label(rec.name.as_str());
                    });
                    row.col(|ui| {
                        ui.label(rec.assessment_score.to_string());
                    });
                    row.col(|ui| {
                        ui.label(rec.class.as_str());
                    });
                });
            });
    }

    if let Some(column) = clicked {
        state.click_sort(column);
    }
}
