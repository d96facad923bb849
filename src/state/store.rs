use std::collections::{BTreeSet, HashMap};

use super::data::Record;
use super::filter::{self, StructuralFilters};
use crate::error::{CatalogError, Result};

/// The Store holds the loaded catalog and the views derived from it.
/// Records are never mutated after load; views are index lists into them.
pub struct Store {
    records: Vec<Record>,
    by_id: HashMap<i64, usize>,
    basins: Vec<String>,
    /// Result of the last applied text search
    searched: Vec<usize>,
    /// Search result narrowed by the structural filters
    filtered: Vec<usize>,
}

impl Store {
    /// Build the store, rejecting datasets with duplicate ids
    pub fn new(records: Vec<Record>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            if by_id.insert(record.id, idx).is_some() {
                return Err(CatalogError::DuplicateId(record.id));
            }
        }

        let basins = distinct_basins(&records);
        let all: Vec<usize> = (0..records.len()).collect();

        Ok(Store {
            records,
            by_id,
            basins,
            searched: all.clone(),
            filtered: all,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: i64) -> Option<&Record> {
        self.by_id.get(&id).map(|&idx| &self.records[idx])
    }

    /// Distinct non-blank basins, sorted ascending
    pub fn basins(&self) -> &[String] {
        &self.basins
    }

    /// Records in the current filtered view, in dataset order
    pub fn filtered(&self) -> impl Iterator<Item = &Record> + '_ {
        self.filtered.iter().map(|&idx| &self.records[idx])
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Run a text search, then re-apply the structural filters on its result
    pub fn apply_search(&mut self, query: &str, filters: &StructuralFilters) {
        self.searched = filter::search(&self.records, query);
        self.apply_filters(filters);
    }

    /// Re-apply the structural filters to the last search result
    pub fn apply_filters(&mut self, filters: &StructuralFilters) {
        self.filtered = filter::apply_structural(&self.records, &self.searched, filters);
        log::debug!(
            "Filtered view: {} of {} searched ({} total)",
            self.filtered_len(),
            self.searched.len(),
            self.records.len()
        );
    }

    /// Restore the full set as both search result and filtered view
    pub fn reset(&mut self) {
        self.searched = (0..self.records.len()).collect();
        self.filtered = self.searched.clone();
    }
}

fn distinct_basins(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| record.basin.as_deref())
        .filter(|basin| !basin.trim().is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("records", &self.records.len())
            .field("filtered", &self.filtered.len())
            .finish()
    }
}
