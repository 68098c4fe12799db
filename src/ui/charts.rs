use std::f64::consts::TAU;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::ClassColors;
use crate::data::model::{NumericField, StudentRecord};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 300.0;
const BAR_COLOR: Color32 = Color32::from_rgb(0x88, 0x84, 0xd8);
const RADAR_COLOR: Color32 = Color32::from_rgb(0x88, 0x84, 0xd8);

// ---------------------------------------------------------------------------
// Average skill bar chart
// ---------------------------------------------------------------------------

/// One bar per predictor: its mean over all students.
pub fn skill_bar_chart(ui: &mut Ui, state: &AppState) {
    let Some(insights) = &state.insights else {
        return;
    };
    ui.heading("Average Skill vs Assessment Score");

    let labels: Vec<&'static str> = insights.skill_averages.iter().map(|(f, _)| f.key()).collect();
    let bars: Vec<Bar> = insights
        .skill_averages
        .iter()
        .enumerate()
        .map(|(i, &(field, avg))| Bar::new(i as f64, avg).name(field.label()).fill(BAR_COLOR))
        .collect();

    Plot::new("skill_bar_chart")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).map(|s| s.to_string()).unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).width(0.6).name("avg"));
        });
}

// ---------------------------------------------------------------------------
// Attention vs score scatter
// ---------------------------------------------------------------------------

/// Scatter points of one class; `class == None` gathers every label outside
/// the configured set.
#[derive(Debug, Clone, PartialEq)]
struct ScatterSeries {
    class: Option<String>,
    points: Vec<[f64; 2]>,
}

fn attention_point(rec: &StudentRecord) -> [f64; 2] {
    [
        NumericField::Attention.value(rec),
        NumericField::AssessmentScore.value(rec),
    ]
}

/// One series per configured class (kept even when empty), plus an "other"
/// series when some record's class is not configured.
fn scatter_series(records: &[StudentRecord], classes: &[String]) -> Vec<ScatterSeries> {
    let mut series: Vec<ScatterSeries> = classes
        .iter()
        .map(|class| ScatterSeries {
            class: Some(class.clone()),
            points: records
                .iter()
                .filter(|rec| &rec.class == class)
                .map(attention_point)
                .collect(),
        })
        .collect();

    let other: Vec<[f64; 2]> = records
        .iter()
        .filter(|rec| !classes.contains(&rec.class))
        .map(attention_point)
        .collect();
    if !other.is_empty() {
        series.push(ScatterSeries {
            class: None,
            points: other,
        });
    }
    series
}

/// Attention (x) against assessment score (y), one series per class.
pub fn attention_scatter(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    ui.heading("Attention vs Assessment Score");

    let colors = ClassColors::new(&state.config.classes);
    let series = scatter_series(dataset.records(), &state.config.classes);

    Plot::new("attention_scatter")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(NumericField::Attention.label())
        .y_axis_label(NumericField::AssessmentScore.label())
        .show(ui, |plot_ui| {
            for ScatterSeries { class, points } in series {
                let (name, color) = match &class {
                    Some(class) => (format!("Class {class}"), colors.color_for(class)),
                    None => ("Other".to_string(), colors.other_color()),
                };
                plot_ui.points(Points::new(points).name(name).color(color).radius(3.0));
            }
        });
}

// ---------------------------------------------------------------------------
// Top student radar
// ---------------------------------------------------------------------------

/// Position of spoke `i` of `n` at distance `r`, first spoke pointing up.
fn radar_point(i: usize, n: usize, r: f64) -> [f64; 2] {
    let angle = TAU * i as f64 / n as f64;
    [r * angle.sin(), r * angle.cos()]
}

/// The top student's predictor values drawn on a polar grid.
pub fn top_student_radar(ui: &mut Ui, state: &AppState) {
    let Some(insights) = &state.insights else {
        return;
    };
    let top = &insights.top_performer;
    ui.heading("Top Student Profile (Radar)");

    let axes = &state.config.predictors;
    let n = axes.len();
    if n < 3 {
        ui.label("A radar needs at least three attributes.");
        return;
    }
    let values: Vec<f64> = axes.iter().map(|field| field.value(top)).collect();
    let radius = values.iter().copied().fold(0.0_f64, f64::max).max(1.0);

    Plot::new("top_student_radar")
        .height(CHART_HEIGHT + 100.0)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            let grid = Stroke::new(1.0, Color32::DARK_GRAY);
            for ring in 1..=4 {
                let r = radius * f64::from(ring) / 4.0;
                let ring_points: PlotPoints = (0..=n).map(|i| radar_point(i % n, n, r)).collect();
                plot_ui.line(Line::new(ring_points).stroke(grid));
            }
            for (i, field) in axes.iter().enumerate() {
                let tip = radar_point(i, n, radius);
                plot_ui.line(Line::new(PlotPoints::from(vec![[0.0, 0.0], tip])).stroke(grid));
                let label_at = radar_point(i, n, radius * 1.15);
                plot_ui.text(Text::new(
                    PlotPoint::new(label_at[0], label_at[1]),
                    RichText::new(field.key()),
                ));
            }

            let shape: PlotPoints = values
                .iter()
                .enumerate()
                .map(|(i, &v)| radar_point(i, n, v))
                .collect();
            plot_ui.polygon(
                Polygon::new(shape)
                    .name(&top.name)
                    .stroke(Stroke::new(2.0, RADAR_COLOR))
                    .fill_color(RADAR_COLOR.gamma_multiply(0.6)),
            );
        });
}
