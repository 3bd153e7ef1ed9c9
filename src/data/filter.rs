use std::collections::BTreeSet;

use super::model::{IrisDataset, Species};

// ---------------------------------------------------------------------------
// Filter predicate: which species are shown
// ---------------------------------------------------------------------------

/// Set of selected species. An empty set hides every record.
pub type FilterState = BTreeSet<Species>;

/// Initialise a [`FilterState`] with every species selected.
pub fn init_filter_state() -> FilterState {
    Species::ALL.into_iter().collect()
}

/// Return indices of records whose species is selected, in record order.
pub fn filtered_indices(dataset: &IrisDataset, filters: &FilterState) -> Vec<usize> {
    if filters.len() == Species::ALL.len() {
        return (0..dataset.len()).collect();
    }
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| filters.contains(&r.species))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_bundled;

    #[test]
    fn all_selected_keeps_every_record() {
        let ds = load_bundled().unwrap();
        assert_eq!(filtered_indices(&ds, &init_filter_state()).len(), 150);
    }

    #[test]
    fn single_species_selects_its_block() {
        let ds = load_bundled().unwrap();
        let filters: FilterState = [Species::Versicolor].into_iter().collect();
        let idx = filtered_indices(&ds, &filters);
        assert_eq!(idx.len(), 50);
        assert_eq!(idx.first(), Some(&50));
        assert_eq!(idx.last(), Some(&99));
    }

    #[test]
    fn empty_selection_hides_everything() {
        let ds = load_bundled().unwrap();
        assert!(filtered_indices(&ds, &FilterState::new()).is_empty());
    }
}
