//! Index behaviour over a real Doxygen searchData file.

use std::path::PathBuf;
use symdex::index::{Entry, IndexError, SymbolIndex};
use symdex::payload::read_payload;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("all_8.js")
}

fn load_entries() -> Vec<Entry> {
    read_payload(&fixture_path()).expect("Failed to read fixture")
}

fn load_index() -> SymbolIndex {
    SymbolIndex::from_entries(load_entries()).expect("Failed to build index")
}

#[test]
fn test_fixture_record_counts() {
    let entries = load_entries();
    assert_eq!(entries.len(), 66);

    // halfedgehandle, halfedget and heapt appear twice
    let index = load_index();
    assert_eq!(index.len(), 63);
    assert_eq!(
        index.destination_count(),
        entries.iter().map(|e| e.destinations.len()).sum::<usize>()
    );
}

#[test]
fn test_duplicate_records_merge_in_file_order() {
    let index = load_index();
    let dests = index.exact_lookup("halfedgehandle").unwrap();

    assert_eq!(dests.len(), 2);
    assert_eq!(dests[0].href(), "../a00175.html");
    assert_eq!(dests[0].container_name.as_deref(), Some("OpenMesh"));
    assert_eq!(dests[1].href(), "../a00193.html#aae01fbc474377136ba93280813a8f640");
    assert_eq!(dests[1].container_name.as_deref(), Some("OpenMesh::Concepts::KernelT"));
}

#[test]
fn test_exact_lookup_matches_merged_records() {
    let entries = load_entries();
    let index = load_index();

    for entry in &entries {
        let expected: Vec<_> = entries
            .iter()
            .filter(|e| e.label == entry.label)
            .flat_map(|e| e.destinations.iter().cloned())
            .collect();
        assert_eq!(index.exact_lookup(&entry.label).unwrap(), expected.as_slice());
    }
}

#[test]
fn test_halfedge_prefix_query() {
    let index = load_index();
    let labels: Vec<_> = index
        .query("halfedge")
        .iter()
        .map(|e| e.label.as_str())
        .collect();

    assert_eq!(
        labels,
        vec![
            "halfedge",
            "halfedge_handle",
            "halfedgeattributes",
            "halfedgehandle",
            "halfedgeiter",
            "halfedgeitert",
            "halfedgeloopccwiter",
            "halfedgeloopcwiter",
            "halfedgeloopiter",
            "halfedges",
            "halfedges_begin",
            "halfedges_empty",
            "halfedges_end",
            "halfedges_sbegin",
            "halfedget",
            "halfedgetraits",
        ]
    );
}

#[test]
fn test_query_results_are_complete_and_sound() {
    let index = load_index();
    let all: Vec<&Entry> = index.iter().collect();

    for prefix in ["h", "ha", "Has_", "HALFEDGES_", "hprop", "how ", "x", ""] {
        let folded = prefix.to_lowercase();
        let results = index.query(prefix);

        assert!(
            results
                .iter()
                .all(|e| e.label.to_lowercase().starts_with(&folded)),
            "non-matching result for {prefix:?}"
        );

        let expected = all
            .iter()
            .filter(|e| e.label.to_lowercase().starts_with(&folded))
            .count();
        assert_eq!(results.len(), expected, "missing results for {prefix:?}");

        let mut sorted: Vec<String> = results.iter().map(|e| e.label.to_lowercase()).collect();
        sorted.sort();
        let actual: Vec<String> = results.iter().map(|e| e.label.to_lowercase()).collect();
        assert_eq!(actual, sorted, "unsorted results for {prefix:?}");
    }
}

#[test]
fn test_decoded_template_labels() {
    let index = load_index();
    let dests = index.exact_lookup("hprophandlet< color >").unwrap();
    assert_eq!(dests[0].display_name, "HPropHandleT< Color >");

    assert_eq!(index.query("hprophandlet<").len(), 8);
}

#[test]
fn test_unknown_label() {
    let index = load_index();
    assert_eq!(
        index.exact_lookup("vertex_handle"),
        Err(IndexError::NotFound("vertex_handle".to_string()))
    );
    assert!(index.query("vertex").is_empty());
}
