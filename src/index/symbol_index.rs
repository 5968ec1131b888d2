//! In-memory symbol index
//!
//! Labels are kept in first-occurrence order; a separate permutation sorted
//! by case-folded label serves prefix queries with a binary search.

use super::error::{IndexError, IndexResult};
use super::types::*;
use crate::utils::fold_case;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::debug;

/// Entry identifier (position of the label's first occurrence)
type EntryId = u32;

/// Immutable label → destinations index
///
/// Starts unloaded; [`SymbolIndex::load`] installs a complete index or
/// leaves the previous one untouched on error.
#[derive(Debug, Default)]
pub struct SymbolIndex {
    /// Merged entries, one per distinct label, in first-occurrence order
    entries: Vec<Entry>,
    /// Lower-cased label for each entry
    folded: Vec<String>,
    /// Entry ids sorted by folded label, then by load order
    order: Vec<EntryId>,
    /// Exact label → entry id
    by_label: FxHashMap<String, EntryId>,
    loaded: bool,
}

impl SymbolIndex {
    /// Create an empty, unloaded index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a loaded index from an ordered sequence of entries
    pub fn from_entries<I>(entries: I) -> IndexResult<Self>
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut entries_in: Vec<Entry> = Vec::new();
        let mut by_label: FxHashMap<String, EntryId> = FxHashMap::default();
        let mut raw_count = 0usize;

        for (position, entry) in entries.into_iter().enumerate() {
            raw_count += 1;

            if entry.label.is_empty() {
                return Err(IndexError::MalformedEntry {
                    position,
                    reason: "missing label".to_string(),
                });
            }
            if entry.destinations.is_empty() {
                return Err(IndexError::MalformedEntry {
                    position,
                    reason: format!("'{}' has no destinations", entry.label),
                });
            }

            // Duplicate labels append to the first occurrence
            match by_label.get(&entry.label) {
                Some(&id) => entries_in[id as usize]
                    .destinations
                    .extend(entry.destinations),
                None => {
                    by_label.insert(entry.label.clone(), entries_in.len() as EntryId);
                    entries_in.push(entry);
                }
            }
        }

        let folded: Vec<String> = entries_in
            .par_iter()
            .map(|e| fold_case(&e.label))
            .collect();

        let mut order: Vec<EntryId> = (0..entries_in.len() as EntryId).collect();
        order.par_sort_unstable_by(|&a, &b| {
            folded[a as usize]
                .cmp(&folded[b as usize])
                .then(a.cmp(&b))
        });

        debug!(
            records = raw_count,
            labels = entries_in.len(),
            "symbol index built"
        );

        Ok(Self {
            entries: entries_in,
            folded,
            order,
            by_label,
            loaded: true,
        })
    }

    /// Replace the index contents with `entries`
    ///
    /// On error the index keeps whatever it held before the call.
    pub fn load<I>(&mut self, entries: I) -> IndexResult<()>
    where
        I: IntoIterator<Item = Entry>,
    {
        let built = Self::from_entries(entries)?;
        *self = built;
        Ok(())
    }

    /// Entries whose label starts with `prefix`, ignoring case
    ///
    /// An empty prefix matches every entry.
    pub fn query(&self, prefix: &str) -> Vec<&Entry> {
        self.query_with(prefix, QueryOptions::default())
    }

    /// Query with an explicit match mode and result limit
    pub fn query_with(&self, term: &str, options: QueryOptions) -> Vec<&Entry> {
        let needle = fold_case(term);
        let limit = options.limit.unwrap_or(usize::MAX);

        match options.mode {
            MatchMode::Prefix => {
                let start = self
                    .order
                    .partition_point(|&id| self.folded[id as usize].as_str() < needle.as_str());

                self.order[start..]
                    .iter()
                    .take_while(|&&id| self.folded[id as usize].starts_with(&needle))
                    .take(limit)
                    .map(|&id| &self.entries[id as usize])
                    .collect()
            }
            MatchMode::Substring => self
                .order
                .iter()
                .filter(|&&id| self.folded[id as usize].contains(&needle))
                .take(limit)
                .map(|&id| &self.entries[id as usize])
                .collect(),
        }
    }

    /// Destinations for an exact (case-sensitive) label
    pub fn exact_lookup(&self, label: &str) -> IndexResult<&[Destination]> {
        self.get(label)
            .map(|e| e.destinations.as_slice())
            .ok_or_else(|| IndexError::NotFound(label.to_string()))
    }

    /// Entry for an exact label
    pub fn get(&self, label: &str) -> Option<&Entry> {
        self.by_label
            .get(label)
            .map(|&id| &self.entries[id as usize])
    }

    /// All entries in query order
    pub fn iter(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.order.iter().map(|&id| &self.entries[id as usize])
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Total destinations across all labels
    pub fn destination_count(&self) -> usize {
        self.entries.iter().map(|e| e.destinations.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dest(path: &str, name: &str) -> Destination {
        Destination::new(path, "", name, Some("OpenMesh".to_string()))
    }

    fn entry(label: &str) -> Entry {
        Entry::new(label, vec![dest(&format!("{}.html", label), label)])
    }

    fn labels(results: &[&Entry]) -> Vec<String> {
        results.iter().map(|e| e.label.clone()).collect()
    }

    #[test]
    fn test_new_is_unloaded() {
        let index = SymbolIndex::new();
        assert!(!index.is_loaded());
        assert!(index.is_empty());
        assert!(index.query("h").is_empty());
    }

    #[test]
    fn test_prefix_query_order() {
        let index = SymbolIndex::from_entries(vec![
            entry("halfedges"),
            entry("halfedge_handle"),
            entry("halfedge"),
        ])
        .unwrap();

        let results = index.query("halfedge");
        assert_eq!(labels(&results), vec!["halfedge", "halfedge_handle", "halfedges"]);
    }

    #[test]
    fn test_prefix_query_excludes_non_matches() {
        let index = SymbolIndex::from_entries(vec![
            entry("has_edge_colors"),
            entry("halfedge"),
            entry("hl_end"),
            entry("face"),
        ])
        .unwrap();

        assert_eq!(labels(&index.query("ha")), vec!["halfedge", "has_edge_colors"]);
        assert_eq!(labels(&index.query("h")).len(), 3);
        assert!(index.query("zz").is_empty());
        assert!(index.query("halfedges").is_empty());
    }

    #[test]
    fn test_prefix_query_is_case_insensitive() {
        let index = SymbolIndex::from_entries(vec![
            entry("HalfedgeHandle"),
            entry("halfedge"),
        ])
        .unwrap();

        let lower = labels(&index.query("halfedge"));
        let upper = labels(&index.query("HALFEDGE"));
        assert_eq!(lower, upper);
        assert_eq!(lower, vec!["halfedge", "HalfedgeHandle"]);
    }

    #[test]
    fn test_non_ascii_prefix_matches_across_case() {
        let index = SymbolIndex::from_entries(vec![entry("ΟΔΟΣΑ"), entry("οδός")]).unwrap();

        assert_eq!(labels(&index.query("ΟΔΟΣ")), vec!["ΟΔΟΣΑ"]);
        assert_eq!(labels(&index.query("οδοσ")), vec!["ΟΔΟΣΑ"]);
        assert_eq!(labels(&index.query("ΟΔΟΣΑ")), vec!["ΟΔΟΣΑ"]);
        assert_eq!(labels(&index.query("Οδ")).len(), 2);
    }

    #[test]
    fn test_case_ties_keep_load_order() {
        let index = SymbolIndex::from_entries(vec![
            entry("halfedge"),
            entry("Halfedge"),
        ])
        .unwrap();
        assert_eq!(labels(&index.query("half")), vec!["halfedge", "Halfedge"]);

        let index = SymbolIndex::from_entries(vec![
            entry("Halfedge"),
            entry("halfedge"),
        ])
        .unwrap();
        assert_eq!(labels(&index.query("half")), vec!["Halfedge", "halfedge"]);
    }

    #[test]
    fn test_empty_prefix_returns_everything() {
        let index =
            SymbolIndex::from_entries(vec![entry("b"), entry("c"), entry("a")]).unwrap();
        assert_eq!(labels(&index.query("")), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_query_limit() {
        let index = SymbolIndex::from_entries(vec![
            entry("halfedge"),
            entry("halfedge_handle"),
            entry("halfedges"),
        ])
        .unwrap();

        let options = QueryOptions::default().with_limit(2);
        assert_eq!(
            labels(&index.query_with("half", options)),
            vec!["halfedge", "halfedge_handle"]
        );
    }

    #[test]
    fn test_substring_query() {
        let index = SymbolIndex::from_entries(vec![
            entry("halfedges_end"),
            entry("hl_end"),
            entry("halfedge"),
        ])
        .unwrap();

        let results = index.query_with("_END", QueryOptions::substring());
        assert_eq!(labels(&results), vec!["halfedges_end", "hl_end"]);
    }

    #[test]
    fn test_duplicate_labels_merge_in_order() {
        let d1 = dest("../a00175.html", "HalfedgeHandle");
        let d2 = dest("../a00193.html", "HalfedgeHandle");
        let index = SymbolIndex::from_entries(vec![
            Entry::new("has_edge_colors", vec![d1.clone()]),
            entry("halfedge"),
            Entry::new("has_edge_colors", vec![d2.clone()]),
        ])
        .unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.destination_count(), 3);
        assert_eq!(index.exact_lookup("has_edge_colors").unwrap(), &[d1, d2]);
    }

    #[test]
    fn test_exact_lookup_returns_destinations() {
        let entries = vec![entry("halfedge"), entry("halfedges"), entry("hl_end")];
        let index = SymbolIndex::from_entries(entries.clone()).unwrap();

        for e in &entries {
            assert_eq!(index.exact_lookup(&e.label).unwrap(), e.destinations.as_slice());
        }
    }

    #[test]
    fn test_exact_lookup_not_found() {
        let index = SymbolIndex::from_entries(vec![entry("halfedge")]).unwrap();
        assert_eq!(
            index.exact_lookup("vertex"),
            Err(IndexError::NotFound("vertex".to_string()))
        );
        // Exact lookup does not fold case
        assert!(index.exact_lookup("Halfedge").is_err());
    }

    #[test]
    fn test_empty_destinations_is_malformed() {
        let err = SymbolIndex::from_entries(vec![entry("ok"), Entry::new("empty", vec![])])
            .unwrap_err();
        assert!(matches!(err, IndexError::MalformedEntry { position: 1, .. }));
    }

    #[test]
    fn test_missing_label_is_malformed() {
        let err = SymbolIndex::from_entries(vec![Entry::new("", vec![dest("a.html", "a")])])
            .unwrap_err();
        assert!(matches!(err, IndexError::MalformedEntry { position: 0, .. }));
    }

    #[test]
    fn test_failed_load_keeps_unloaded_state() {
        let mut index = SymbolIndex::new();
        assert!(index.load(vec![Entry::new("bad", vec![])]).is_err());
        assert!(!index.is_loaded());
        assert!(index.is_empty());
    }

    #[test]
    fn test_failed_load_keeps_previous_index() {
        let mut index = SymbolIndex::new();
        index.load(vec![entry("halfedge")]).unwrap();

        let result = index.load(vec![entry("vertex"), Entry::new("bad", vec![])]);
        assert!(result.is_err());
        assert!(index.is_loaded());
        assert!(index.exact_lookup("halfedge").is_ok());
        assert!(index.exact_lookup("vertex").is_err());
    }

    #[test]
    fn test_load_replaces_previous_index() {
        let mut index = SymbolIndex::new();
        index.load(vec![entry("halfedge")]).unwrap();
        index.load(vec![entry("vertex")]).unwrap();

        assert!(index.exact_lookup("halfedge").is_err());
        assert_eq!(labels(&index.iter().collect::<Vec<_>>()), vec!["vertex"]);
    }

    #[test]
    fn test_index_is_shareable_across_threads() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<SymbolIndex>();
    }
}
