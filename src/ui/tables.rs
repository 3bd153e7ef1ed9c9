use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};
use iris_explorer::Feature;
use iris_explorer::stats::correlation::{CorrelationMatrix, DiagonalPolicy};
use iris_explorer::stats::descriptive::{GroupSummary, summarize_by_species};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

const STATISTIC_COLUMNS: [&str; 13] = [
    "missing", "min", "q1", "med", "q3", "p95", "max", "mean", "range", "iqr", "std", "std_pop",
    "mad",
];

/// The two report tables for the visible records.
pub fn summary_tables(ui: &mut Ui, state: &mut AppState) {
    let visible = state.visible_dataset();

    ui.strong("Pearson correlation");
    match CorrelationMatrix::compute(&visible) {
        Ok(matrix) => {
            ui.push_id("correlation_table", |ui: &mut Ui| correlation_table(ui, &matrix));
            if let Some(ext) = matrix.extreme_pairs(DiagonalPolicy::Exclude) {
                ui.label(format!("Weakest pair: {}    Strongest pair: {}", ext.min, ext.max));
            }
        }
        Err(e) => {
            ui.label(format!("Correlation unavailable: {e}"));
        }
    }

    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Statistics of");
        egui::ComboBox::from_id_salt("summary_feature")
            .selected_text(state.summary_feature.label())
            .show_ui(ui, |ui: &mut Ui| {
                for feature in Feature::ALL {
                    ui.selectable_value(&mut state.summary_feature, feature, feature.label());
                }
            });
        ui.label("by species");
    });

    match summarize_by_species(&visible, state.summary_feature) {
        Ok(rows) => {
            ui.push_id("statistics_table", |ui: &mut Ui| statistics_table(ui, &rows));
        }
        Err(e) => {
            ui.label(format!("Statistics unavailable: {e}"));
        }
    }
}

fn format_cell(value: f64) -> String {
    if value.is_nan() {
        "–".to_string()
    } else {
        format!("{value:.4}")
    }
}

fn correlation_table(ui: &mut Ui, matrix: &CorrelationMatrix) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(110.0))
        .columns(Column::auto().at_least(90.0), Feature::ALL.len())
        .header(20.0, |mut header| {
            header.col(|_ui| {});
            for feature in Feature::ALL {
                header.col(|ui| {
                    ui.strong(feature.label());
                });
            }
        })
        .body(|mut body| {
            for a in Feature::ALL {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.strong(a.label());
                    });
                    for b in Feature::ALL {
                        row.col(|ui| {
                            ui.label(format_cell(matrix.get(a, b)));
                        });
                    }
                });
            }
        });
}

fn statistics_table(ui: &mut Ui, rows: &[GroupSummary]) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(90.0))
        .columns(Column::auto().at_least(60.0), STATISTIC_COLUMNS.len())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("label");
            });
            for name in STATISTIC_COLUMNS {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| {
            for summary in rows {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.label(&summary.label);
                    });
                    row.col(|ui| {
                        ui.label(summary.missing.to_string());
                    });
                    let values = [
                        summary.min,
                        summary.q1,
                        summary.med,
                        summary.q3,
                        summary.p95,
                        summary.max,
                        summary.mean,
                        summary.range,
                        summary.iqr,
                        summary.std,
                        summary.std_pop,
                        summary.mad,
                    ];
                    for value in values {
                        row.col(|ui| {
                            ui.label(format_cell(value));
                        });
                    }
                });
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_use_four_decimals_and_dash_for_undefined() {
        assert_eq!(format_cell(0.962_865_4), "0.9629");
        assert_eq!(format_cell(f64::NAN), "–");
    }
}
