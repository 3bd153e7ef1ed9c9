use std::fmt::Display;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, MarkerShape, Plot, PlotPoint,
    PlotPoints, PlotUi, Points, Polygon, Text,
};
use iris_explorer::config::ViewAngle;
use iris_explorer::stats::Sample;
use iris_explorer::stats::histogram::{Histogram, Histogram2d};
use iris_explorer::stats::kde::GaussianKde;
use iris_explorer::stats::outliers::{BoxStats, BoxSummary2d};
use iris_explorer::{Feature, Species};

use crate::color::{ACCENT, shade};
use crate::state::{AppState, ChartKind};
use crate::ui::projection::{Bounds3, Camera, Projected, box_faces};
use crate::ui::tables;

const HISTOGRAM_FILL: Color32 = Color32::from_rgb(135, 206, 235);
const BAR_3D_FILL: Color32 = Color32::from_rgb(70, 130, 180);

// ---------------------------------------------------------------------------
// Central panel dispatch
// ---------------------------------------------------------------------------

/// Render the selected chart in the central panel.
pub fn chart_panel(ui: &mut Ui, state: &mut AppState) {
    if state.visible_indices.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No species selected  (tick one in the side panel)");
        });
        return;
    }

    ui.heading(state.chart.title());
    ui.add_space(4.0);

    match state.chart {
        ChartKind::ClassDistribution => class_distribution(ui, state),
        ChartKind::Histograms => ui.columns(2, |cols: &mut [Ui]| {
            histogram_with_density(&mut cols[0], state, Feature::PetalLength);
            histogram_with_density(&mut cols[1], state, Feature::SepalWidth);
        }),
        ChartKind::Histogram3d => histogram_3d(ui, state),
        ChartKind::BoxPlots => ui.columns(2, |cols: &mut [Ui]| {
            box_plot_by_species(&mut cols[0], state, Feature::PetalLength);
            box_plot_by_species(&mut cols[1], state, Feature::SepalWidth);
        }),
        ChartKind::OutlierBox2d => outlier_box_2d(ui, state, Feature::PetalLength, Feature::SepalWidth),
        ChartKind::QuantilePlots => ui.columns(2, |cols: &mut [Ui]| {
            quantile_plot(&mut cols[0], state, Feature::SepalWidth);
            quantile_plot(&mut cols[1], state, Feature::PetalLength);
        }),
        ChartKind::PairScatter => pair_scatter(ui, state),
        ChartKind::Scatter3d => {
            let views = state.config.scatter_3d_views;
            ui.columns(2, |cols: &mut [Ui]| {
                scatter_3d(&mut cols[0], state, views[0], "View 1", true);
                scatter_3d(&mut cols[1], state, views[1], "View 2", false);
            });
        }
        ChartKind::Density => density(ui, state, Feature::PetalLength),
        ChartKind::Summary => tables::summary_tables(ui, state),
    }
}

fn unavailable(ui: &mut Ui, reason: impl Display) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label(format!("Not enough data to draw this chart: {reason}"));
    });
}

fn subtitle(ui: &mut Ui, text: impl Into<String>) {
    ui.label(RichText::new(text).strong());
}

fn axis_label(feature: Feature) -> String {
    format!("{} (cm)", feature.label())
}

// ---------------------------------------------------------------------------
// Class distribution
// ---------------------------------------------------------------------------

fn class_distribution(ui: &mut Ui, state: &AppState) {
    Plot::new("class_distribution")
        .legend(Legend::default())
        .x_axis_label("Species")
        .y_axis_label("Count")
        .include_y(0.0)
        .show(ui, |plot_ui| {
            for species in state.visible_species() {
                let count = state.visible_indices_of(species).len();
                let bar = Bar::new(f64::from(species.code()), count as f64)
                    .width(0.6)
                    .name(species.name());
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .color(state.color_map.color_for(species))
                        .name(species.name()),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Histograms
// ---------------------------------------------------------------------------

/// Bars of the visible values with the density estimate scaled to counts.
fn histogram_with_density(ui: &mut Ui, state: &AppState, feature: Feature) {
    subtitle(ui, format!("Histogram of {}", feature.label().to_lowercase()));

    let values = state.visible_column(feature);
    let hist = match Histogram::compute(&values, state.config.histogram_bins) {
        Ok(h) => h,
        Err(e) => return unavailable(ui, e),
    };
    let width = hist.bin_width();

    let bars: Vec<Bar> = hist
        .centers()
        .into_iter()
        .zip(&hist.counts)
        .map(|(x, &count)| Bar::new(x, count as f64).width(width))
        .collect();

    let scale = hist.total() as f64 * width;
    let (lo, hi) = (hist.edges[0], hist.edges[hist.edges.len() - 1]);
    let density: Option<PlotPoints> = GaussianKde::fit(&values).ok().map(|kde| {
        kde.evaluate_grid(lo, hi, state.config.density_grid)
            .into_iter()
            .map(|[x, d]| [x, d * scale])
            .collect()
    });

    Plot::new(format!("histogram_{feature}"))
        .legend(Legend::default())
        .x_axis_label(axis_label(feature))
        .y_axis_label("Count")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(HISTOGRAM_FILL).name("Count"));
            if let Some(points) = density {
                plot_ui.line(Line::new(points).color(ACCENT).width(2.0).name("Density"));
            }
        });
}

// ---------------------------------------------------------------------------
// 3D histogram
// ---------------------------------------------------------------------------

/// Petal length × sepal length counts drawn as projected bars.
fn histogram_3d(ui: &mut Ui, state: &AppState) {
    let cfg = &state.config;
    let [x_range, y_range] = cfg.histogram_3d_range;
    let hist = match Histogram2d::compute(
        &state.visible_column(Feature::PetalLength),
        &state.visible_column(Feature::SepalLength),
        cfg.histogram_3d_bins,
        x_range,
        y_range,
    ) {
        Ok(h) => h,
        Err(e) => return unavailable(ui, e),
    };
    let max_count = hist.max_count();
    if max_count == 0 {
        return unavailable(ui, "no record inside the histogram range");
    }

    let bounds = Bounds3 {
        min: [x_range.0, y_range.0, 0.0],
        max: [x_range.1, y_range.1, max_count as f64],
    };
    let camera = Camera::new(cfg.histogram_3d_view);

    // (depth, corners, brightness) for every visible face
    let mut faces: Vec<(f64, [[f64; 2]; 4], f32)> = Vec::new();
    for (x0, x1, y0, y1, count) in hist.occupied_cells() {
        let boxes = box_faces((x0, x1), (y0, y1), (0.0, count as f64));
        for (k, face) in boxes.into_iter().enumerate() {
            let projected = face.map(|c| camera.project(bounds.normalize(c)));
            let depth = projected.iter().map(|p| p.depth).sum::<f64>() / 4.0;
            let brightness = if k == 4 { 1.0 } else { 0.55 + 0.08 * k as f32 };
            faces.push((depth, projected.map(Projected::xy), brightness));
        }
    }
    faces.sort_by(|a, b| a.0.total_cmp(&b.0));

    let text_color = ui.visuals().text_color();
    Plot::new("histogram_3d")
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .show(ui, |plot_ui| {
            draw_cube(
                plot_ui,
                &camera,
                ["Petal length", "Sepal length", "Count"],
                text_color,
            );
            for (_, corners, brightness) in faces {
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(corners.to_vec()))
                        .fill_color(shade(BAR_3D_FILL, brightness))
                        .stroke(Stroke::new(0.5, shade(BAR_3D_FILL, 0.4))),
                );
            }
        });
}

/// Edges of the unit cube plus axis names at the far end of the three
/// edges leaving the minimum corner.
fn draw_cube(plot_ui: &mut PlotUi, camera: &Camera, labels: [&str; 3], color: Color32) {
    let corner = |bits: usize| {
        [0, 1, 2].map(|axis| if bits & (1 << axis) == 0 { -0.5 } else { 0.5 })
    };
    let edge_color = color.gamma_multiply(0.3);

    for from in 0..8usize {
        for axis in 0..3 {
            if from & (1 << axis) != 0 {
                continue;
            }
            let to = from | (1 << axis);
            let points: PlotPoints = [corner(from), corner(to)]
                .into_iter()
                .map(|p| camera.project(p).xy())
                .collect();
            plot_ui.line(Line::new(points).color(edge_color).width(1.0));
        }
    }

    for (axis, label) in labels.into_iter().enumerate() {
        let mut tip = [-0.5; 3];
        tip[axis] = 0.65;
        let p = camera.project(tip);
        plot_ui.text(Text::new(PlotPoint::new(p.u, p.v), label).color(color));
    }
}

// ---------------------------------------------------------------------------
// Box plots
// ---------------------------------------------------------------------------

fn box_plot_by_species(ui: &mut Ui, state: &AppState, feature: Feature) {
    subtitle(ui, format!("Box plot of {} by species", feature.label().to_lowercase()));

    Plot::new(format!("box_{feature}"))
        .legend(Legend::default())
        .x_axis_label("Species")
        .y_axis_label(axis_label(feature))
        .show(ui, |plot_ui| {
            for species in state.visible_species() {
                let values = state
                    .dataset
                    .column_at(feature, &state.visible_indices_of(species));
                let Ok(stats) = BoxStats::compute(&values) else {
                    continue;
                };
                let color = state.color_map.color_for(species);
                let x = f64::from(species.code());

                let elem = BoxElem::new(
                    x,
                    BoxSpread::new(
                        stats.lower_whisker,
                        stats.q1,
                        stats.median,
                        stats.q3,
                        stats.upper_whisker,
                    ),
                )
                .name(species.name())
                .box_width(0.6)
                .whisker_width(0.3)
                .fill(color.gamma_multiply(0.6))
                .stroke(Stroke::new(1.5, color));
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(species.name()).color(color));

                if !stats.outliers.is_empty() {
                    let points: PlotPoints = stats.outliers.iter().map(|&v| [x, v]).collect();
                    plot_ui.points(
                        Points::new(points)
                            .color(color)
                            .radius(3.0)
                            .shape(MarkerShape::Diamond),
                    );
                }
            }
        });
}

// ---------------------------------------------------------------------------
// 2D box plot with outliers
// ---------------------------------------------------------------------------

/// Interquartile rectangle, median cross and whisker caps of two columns,
/// plus every record that is an outlier on either axis.
fn outlier_box_2d(ui: &mut Ui, state: &AppState, x_feature: Feature, y_feature: Feature) {
    subtitle(
        ui,
        format!("2D box plot for {} and {}", x_feature.label(), y_feature.label()),
    );

    let xs = state.visible_column(x_feature);
    let ys = state.visible_column(y_feature);
    let summary = match BoxSummary2d::compute(&xs, &ys) {
        Ok(s) => s,
        Err(e) => return unavailable(ui, e),
    };
    let (x, y) = (summary.x, summary.y);
    let color = state.color_map.color_for(Species::Setosa);
    let outlier_color = ui.visuals().strong_text_color();

    let rect = vec![[x.q1, y.q1], [x.q3, y.q1], [x.q3, y.q3], [x.q1, y.q3]];
    let segments = [
        [[x.lower_whisker, y.median], [x.upper_whisker, y.median]],
        [[x.median, y.lower_whisker], [x.median, y.upper_whisker]],
        [[x.lower_whisker, y.q1], [x.lower_whisker, y.q3]],
        [[x.upper_whisker, y.q1], [x.upper_whisker, y.q3]],
        [[x.q1, y.lower_whisker], [x.q3, y.lower_whisker]],
        [[x.q1, y.upper_whisker], [x.q3, y.upper_whisker]],
    ];
    let outliers: PlotPoints = summary.outliers.iter().map(|&i| [xs[i], ys[i]]).collect();

    Plot::new("box_2d")
        .legend(Legend::default())
        .x_axis_label(axis_label(x_feature))
        .y_axis_label(axis_label(y_feature))
        .show(ui, |plot_ui| {
            plot_ui.polygon(
                Polygon::new(PlotPoints::from(rect))
                    .fill_color(color.gamma_multiply(0.5))
                    .stroke(Stroke::new(1.0, color))
                    .name("Interquartile box"),
            );
            for segment in segments {
                plot_ui.line(Line::new(PlotPoints::from(segment.to_vec())).color(color).width(1.5));
            }
            plot_ui.points(
                Points::new(outliers)
                    .color(outlier_color)
                    .radius(4.0)
                    .filled(true)
                    .name("Outliers"),
            );
        });
}

// ---------------------------------------------------------------------------
// Quantile plots
// ---------------------------------------------------------------------------

fn quantile_plot(ui: &mut Ui, state: &AppState, feature: Feature) {
    subtitle(ui, format!("Quantile plot for {}", feature.label().to_lowercase()));

    let sample = match Sample::new(&state.visible_column(feature)) {
        Ok(s) => s,
        Err(e) => return unavailable(ui, e),
    };

    Plot::new(format!("quantile_{feature}"))
        .x_axis_label("Quantiles")
        .y_axis_label("Value")
        .include_x(0.0)
        .include_x(1.0)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(PlotPoints::from(sample.plotting_positions()))
                    .color(ACCENT)
                    .radius(3.0)
                    .filled(true),
            );
        });
}

// ---------------------------------------------------------------------------
// Pairwise scatter plots
// ---------------------------------------------------------------------------

/// All six feature pairs in a 2 × 3 grid.
fn pair_scatter(ui: &mut Ui, state: &AppState) {
    let pairs: Vec<(Feature, Feature)> = Feature::ALL
        .iter()
        .enumerate()
        .flat_map(|(i, &a)| Feature::ALL[i + 1..].iter().map(move |&b| (a, b)))
        .collect();

    let spacing = ui.spacing().item_spacing.y;
    // each cell also carries a one-line title
    let height = ((ui.available_height() - 4.0 * spacing) / 2.0 - 20.0).max(80.0);

    for row in pairs.chunks(3) {
        ui.columns(3, |cols: &mut [Ui]| {
            for (col, &(a, b)) in cols.iter_mut().zip(row) {
                subtitle(col, format!("{} vs {}", a.label(), b.label()));
                scatter_pair(col, state, a, b, height);
            }
        });
    }
}

fn scatter_pair(ui: &mut Ui, state: &AppState, a: Feature, b: Feature, height: f32) {
    let records = state.dataset.records();
    Plot::new(format!("scatter_{a}_{b}"))
        .height(height)
        .x_axis_label(a.label())
        .y_axis_label(b.label())
        .show(ui, |plot_ui| {
            for species in state.visible_species() {
                let points: PlotPoints = state
                    .visible_indices_of(species)
                    .into_iter()
                    .map(|i| [records[i].value(a), records[i].value(b)])
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .color(state.color_map.color_for(species))
                        .radius(2.5)
                        .filled(true)
                        .name(species.name()),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// 3D scatter
// ---------------------------------------------------------------------------

const SCATTER_3D_AXES: [Feature; 3] = [Feature::SepalLength, Feature::SepalWidth, Feature::PetalLength];

fn scatter_3d(ui: &mut Ui, state: &AppState, view: ViewAngle, title: &str, legend: bool) {
    subtitle(ui, format!("3D scatter plot - {title}"));

    let records = state.dataset.records();
    let groups: Vec<(Species, Vec<[f64; 3]>)> = state
        .visible_species()
        .into_iter()
        .map(|species| {
            let points = state
                .visible_indices_of(species)
                .into_iter()
                .map(|i| SCATTER_3D_AXES.map(|f| records[i].value(f)))
                .collect();
            (species, points)
        })
        .collect();

    let all: Vec<[f64; 3]> = groups.iter().flat_map(|(_, p)| p.iter().copied()).collect();
    let Some(bounds) = Bounds3::from_points(&all) else {
        return unavailable(ui, "no complete records");
    };
    let camera = Camera::new(view);
    let text_color = ui.visuals().text_color();

    let mut plot = Plot::new(format!("scatter_3d_{title}"))
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false);
    if legend {
        plot = plot.legend(Legend::default());
    }

    plot.show(ui, |plot_ui| {
        draw_cube(plot_ui, &camera, SCATTER_3D_AXES.map(Feature::label), text_color);
        for (species, points) in &groups {
            let projected: PlotPoints = points
                .iter()
                .map(|&p| camera.project(bounds.normalize(p)).xy())
                .collect();
            plot_ui.points(
                Points::new(projected)
                    .color(state.color_map.color_for(*species))
                    .radius(3.0)
                    .filled(true)
                    .name(species.name()),
            );
        }
    });
}

// ---------------------------------------------------------------------------
// Kernel density curves
// ---------------------------------------------------------------------------

/// One density curve per species over that species' own range.
fn density(ui: &mut Ui, state: &AppState, feature: Feature) {
    subtitle(
        ui,
        format!("Probability density of {} by species", feature.label().to_lowercase()),
    );

    Plot::new(format!("density_{feature}"))
        .legend(Legend::default())
        .x_axis_label(axis_label(feature))
        .y_axis_label("Density")
        .show(ui, |plot_ui| {
            for species in state.visible_species() {
                let values = state
                    .dataset
                    .column_at(feature, &state.visible_indices_of(species));
                let (Ok(kde), Ok(sample)) = (GaussianKde::fit(&values), Sample::new(&values)) else {
                    log::debug!("Skipping density of {species}: degenerate sample");
                    continue;
                };
                let curve = kde.evaluate_grid(sample.min(), sample.max(), state.config.density_grid);
                plot_ui.line(
                    Line::new(PlotPoints::from(curve))
                        .color(state.color_map.color_for(species))
                        .width(2.0)
                        .name(species.name()),
                );
            }
        });
}
