use crate::index::SymbolIndex;
use std::collections::HashMap;

/// Summary of a loaded index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexStats {
    pub labels: usize,
    pub destinations: usize,
    /// Labels with more than one destination
    pub overloaded_labels: usize,
    /// Distinct pages referenced by any destination
    pub pages: usize,
    /// Destination count per container, most frequent first
    pub containers: Vec<(String, usize)>,
}

impl IndexStats {
    pub fn collect(index: &SymbolIndex) -> Self {
        let mut containers: HashMap<&str, usize> = HashMap::new();
        let mut pages = std::collections::HashSet::new();
        let mut overloaded_labels = 0;

        for entry in index.iter() {
            if entry.destinations.len() > 1 {
                overloaded_labels += 1;
            }
            for dest in &entry.destinations {
                pages.insert(dest.anchor_path.as_str());
                let container = dest.container_name.as_deref().unwrap_or("(none)");
                *containers.entry(container).or_insert(0) += 1;
            }
        }

        let mut containers: Vec<(String, usize)> = containers
            .into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect();
        containers.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            labels: index.len(),
            destinations: index.destination_count(),
            overloaded_labels,
            pages: pages.len(),
            containers,
        }
    }
}

/// Display index statistics
pub fn show_stats(index: &SymbolIndex) {
    let stats = IndexStats::collect(index);

    println!("Index Statistics");
    println!("================");
    println!();
    println!("Labels:           {}", stats.labels);
    println!("Destinations:     {}", stats.destinations);
    println!("Overloaded:       {}", stats.overloaded_labels);
    println!("Pages:            {}", stats.pages);

    println!();
    println!("Destinations by container:");
    for (container, count) in stats.containers.iter().take(15) {
        println!("  {:40} {}", container, count);
    }

    if stats.containers.len() > 15 {
        println!("  ... and {} more", stats.containers.len() - 15);
    }
}
