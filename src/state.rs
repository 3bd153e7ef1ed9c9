use iris_explorer::config::ViewerConfig;
use iris_explorer::data::filter::{FilterState, filtered_indices, init_filter_state};
use iris_explorer::{Feature, IrisDataset, Species};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Chart selection
// ---------------------------------------------------------------------------

/// The charts of the visualization suite, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    ClassDistribution,
    Histograms,
    Histogram3d,
    BoxPlots,
    OutlierBox2d,
    QuantilePlots,
    PairScatter,
    Scatter3d,
    Density,
    Summary,
}

impl ChartKind {
    pub const ALL: [ChartKind; 10] = [
        ChartKind::ClassDistribution,
        ChartKind::Histograms,
        ChartKind::Histogram3d,
        ChartKind::BoxPlots,
        ChartKind::OutlierBox2d,
        ChartKind::QuantilePlots,
        ChartKind::PairScatter,
        ChartKind::Scatter3d,
        ChartKind::Density,
        ChartKind::Summary,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::ClassDistribution => "Distribution of species",
            ChartKind::Histograms => "Histograms",
            ChartKind::Histogram3d => "3D histogram",
            ChartKind::BoxPlots => "Box plots",
            ChartKind::OutlierBox2d => "2D box plot with outliers",
            ChartKind::QuantilePlots => "Quantile plots",
            ChartKind::PairScatter => "Scatter plots",
            ChartKind::Scatter3d => "3D scatter plot",
            ChartKind::Density => "Probability density",
            ChartKind::Summary => "Summary tables",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Table currently shown; the bundled one until a file is opened.
    pub dataset: IrisDataset,

    /// Where `dataset` came from, shown in the top bar.
    pub source: String,

    /// Species selected in the side panel.
    pub filters: FilterState,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Chart shown in the central panel.
    pub chart: ChartKind,

    /// Feature summarized by the statistics table.
    pub summary_feature: Feature,

    pub color_map: ColorMap,

    pub config: ViewerConfig,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: IrisDataset, source: impl Into<String>, config: ViewerConfig) -> Self {
        let mut state = Self {
            dataset: IrisDataset::from_records(Vec::new()),
            source: String::new(),
            filters: init_filter_state(),
            visible_indices: Vec::new(),
            chart: ChartKind::ClassDistribution,
            summary_feature: Feature::SepalWidth,
            color_map: ColorMap::default(),
            config,
            status_message: None,
        };
        state.set_dataset(dataset, source);
        state
    }

    /// Ingest a newly loaded dataset and reset the filters.
    pub fn set_dataset(&mut self, dataset: IrisDataset, source: impl Into<String>) {
        self.filters = init_filter_state();
        self.visible_indices = (0..dataset.len()).collect();
        self.dataset = dataset;
        self.source = source.into();
        self.status_message = None;
    }

    /// Recompute `visible_indices` after filter change.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(&self.dataset, &self.filters);
    }

    /// Toggle one species in the filter.
    pub fn toggle_species(&mut self, species: Species) {
        if !self.filters.remove(&species) {
            self.filters.insert(species);
        }
        self.refilter();
    }

    pub fn select_all(&mut self) {
        self.filters = init_filter_state();
        self.refilter();
    }

    pub fn select_none(&mut self) {
        self.filters.clear();
        self.refilter();
    }

    /// Species that are selected and have at least one visible record.
    pub fn visible_species(&self) -> Vec<Species> {
        Species::ALL
            .into_iter()
            .filter(|sp| self.filters.contains(sp))
            .filter(|&sp| {
                self.visible_indices
                    .iter()
                    .any(|&i| self.dataset.records()[i].species == sp)
            })
            .collect()
    }

    /// One column restricted to the visible records.
    pub fn visible_column(&self, feature: Feature) -> Vec<f64> {
        self.dataset.column_at(feature, &self.visible_indices)
    }

    /// Visible record indices of one species.
    pub fn visible_indices_of(&self, species: Species) -> Vec<usize> {
        self.visible_indices
            .iter()
            .copied()
            .filter(|&i| self.dataset.records()[i].species == species)
            .collect()
    }

    /// The visible records as a table of their own.
    pub fn visible_dataset(&self) -> IrisDataset {
        IrisDataset::from_records(
            self.visible_indices
                .iter()
                .map(|&i| self.dataset.records()[i])
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iris_explorer::data::loader::load_bundled;

    fn state() -> AppState {
        AppState::new(load_bundled().unwrap(), "bundled", ViewerConfig::default())
    }

    #[test]
    fn starts_with_everything_visible() {
        let s = state();
        assert_eq!(s.visible_indices.len(), 150);
        assert_eq!(s.visible_species(), Species::ALL.to_vec());
    }

    #[test]
    fn toggling_a_species_hides_and_restores_it() {
        let mut s = state();
        s.toggle_species(Species::Setosa);
        assert_eq!(s.visible_indices.len(), 100);
        assert_eq!(s.visible_species(), vec![Species::Versicolor, Species::Virginica]);
        assert!(s.visible_indices_of(Species::Setosa).is_empty());
        s.toggle_species(Species::Setosa);
        assert_eq!(s.visible_indices.len(), 150);
    }

    #[test]
    fn visible_views_follow_the_filter() {
        let mut s = state();
        s.select_none();
        assert!(s.visible_column(Feature::PetalLength).is_empty());
        s.toggle_species(Species::Virginica);
        assert_eq!(s.visible_dataset().len(), 50);
        assert_eq!(s.visible_column(Feature::SepalLength)[0], 6.3);
        s.select_all();
        assert_eq!(s.visible_dataset(), s.dataset);
    }

    #[test]
    fn loading_a_new_table_resets_filters() {
        let mut s = state();
        s.select_none();
        s.set_dataset(load_bundled().unwrap(), "again");
        assert_eq!(s.visible_indices.len(), 150);
        assert_eq!(s.source, "again");
    }
}
