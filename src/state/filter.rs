/// Filter and search pipeline
///
/// The filtered view is always derived in the same order:
/// free-text search first, then basin, then host-count bucket.
/// The search result is kept so that changing a structural filter
/// only re-filters the records the search already accepted.

use super::data::Record;

/// Fixed host-fish-count ranges offered in the filter dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostBucket {
    /// 1 to 5 host fish
    Few,
    /// 6 to 15 host fish
    Moderate,
    /// 16 to 25 host fish
    Many,
    /// 26 or more host fish
    Lots,
}

impl HostBucket {
    pub const ALL: [HostBucket; 4] = [
        HostBucket::Few,
        HostBucket::Moderate,
        HostBucket::Many,
        HostBucket::Lots,
    ];

    /// Inclusive lower bound and optional inclusive upper bound
    pub fn range(self) -> (u32, Option<u32>) {
        match self {
            HostBucket::Few => (1, Some(5)),
            HostBucket::Moderate => (6, Some(15)),
            HostBucket::Many => (16, Some(25)),
            HostBucket::Lots => (26, None),
        }
    }

    pub fn contains(self, count: u32) -> bool {
        let (low, high) = self.range();
        count >= low && high.map_or(true, |high| count <= high)
    }

    /// Bucket a count falls into, if any (0 falls into none)
    pub fn for_count(count: u32) -> Option<HostBucket> {
        Self::ALL.into_iter().find(|bucket| bucket.contains(count))
    }

    pub fn label(self) -> &'static str {
        match self {
            HostBucket::Few => "1-5 hosts",
            HostBucket::Moderate => "6-15 hosts",
            HostBucket::Many => "16-25 hosts",
            HostBucket::Lots => "26+ hosts",
        }
    }
}

impl std::fmt::Display for HostBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The structured (non-text) filters; None means "any"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuralFilters {
    pub basin: Option<String>,
    pub host_bucket: Option<HostBucket>,
}

impl StructuralFilters {
    pub fn is_active(&self) -> bool {
        self.basin.is_some() || self.host_bucket.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Normalize a raw query: trimmed and lower-cased
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Case-insensitive substring match over the searchable fields.
/// `query` must already be normalized; an empty query matches everything.
pub fn matches_search(record: &Record, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    record
        .searchable_fields()
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(query))
}

/// Indices of the records matching the query, in original order
pub fn search(records: &[Record], raw_query: &str) -> Vec<usize> {
    let query = normalize_query(raw_query);

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_search(record, &query))
        .map(|(idx, _)| idx)
        .collect()
}

/// Apply basin then host-count filters to an existing search result
pub fn apply_structural(
    records: &[Record],
    searched: &[usize],
    filters: &StructuralFilters,
) -> Vec<usize> {
    let mut filtered: Vec<usize> = searched.to_vec();
    if !filters.is_active() {
        return filtered;
    }

    if let Some(basin) = &filters.basin {
        filtered.retain(|&idx| records[idx].basin.as_deref() == Some(basin.as_str()));
    }

    if let Some(bucket) = filters.host_bucket {
        filtered.retain(|&idx| HostBucket::for_count(records[idx].host_count()) == Some(bucket));
    }

    filtered
}
