use serde::{Deserialize, Serialize};

/// Where a symbol's documentation lives
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Destination {
    /// Page path relative to the documentation root (e.g. `../a00193.html`)
    pub anchor_path: String,
    /// Anchor within the page, empty when the destination is the page itself
    #[serde(default)]
    pub anchor_fragment: String,
    /// Human-readable symbol name
    pub display_name: String,
    /// Enclosing scope (namespace, class, file or page group)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_name: Option<String>,
}

impl Destination {
    pub fn new(
        anchor_path: impl Into<String>,
        anchor_fragment: impl Into<String>,
        display_name: impl Into<String>,
        container_name: Option<String>,
    ) -> Self {
        Self {
            anchor_path: anchor_path.into(),
            anchor_fragment: anchor_fragment.into(),
            display_name: display_name.into(),
            container_name,
        }
    }

    /// Rebuild the link target as `path#fragment`
    pub fn href(&self) -> String {
        if self.anchor_fragment.is_empty() {
            self.anchor_path.clone()
        } else {
            format!("{}#{}", self.anchor_path, self.anchor_fragment)
        }
    }
}

/// One labeled record of the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub label: String,
    pub destinations: Vec<Destination>,
}

impl Entry {
    pub fn new(label: impl Into<String>, destinations: Vec<Destination>) -> Self {
        Self {
            label: label.into(),
            destinations,
        }
    }
}

/// How a query term is matched against labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Label starts with the term
    #[default]
    Prefix,
    /// Label contains the term anywhere
    Substring,
}

/// Query options
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryOptions {
    pub mode: MatchMode,
    /// Maximum number of entries returned (`None` = unlimited)
    pub limit: Option<usize>,
}

impl QueryOptions {
    pub fn substring() -> Self {
        Self {
            mode: MatchMode::Substring,
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
