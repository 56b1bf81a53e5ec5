// src/domain/query.rs
//
// Query mode value type.
//
// A mode is the full parameter set a paged collection fetches under. Modes
// compare by value: Browse, Search("x") and Search("y") are pairwise
// distinct, and switching between any two of them discards every page the
// collection has accumulated.

use serde::{Deserialize, Serialize};

/// The active query driving a paged collection's fetches
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryMode {
    /// Unfiltered catalog browsing
    Browse,

    /// Full-text title search
    Search { text: String },
}

impl QueryMode {
    /// Shorthand for a search mode
    pub fn search(text: impl Into<String>) -> Self {
        QueryMode::Search { text: text.into() }
    }
}

impl Default for QueryMode {
    fn default() -> Self {
        QueryMode::Browse
    }
}

impl std::fmt::Display for QueryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryMode::Browse => write!(f, "browse"),
            QueryMode::Search { text } => write!(f, "search({:?})", text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_compare_by_value() {
        assert_eq!(QueryMode::Browse, QueryMode::Browse);
        assert_eq!(QueryMode::search("blade"), QueryMode::search("blade"));
        assert_ne!(QueryMode::Browse, QueryMode::search("blade"));
        assert_ne!(QueryMode::search("blade"), QueryMode::search("runner"));
    }

    #[test]
    fn test_display() {
        assert_eq!(QueryMode::Browse.to_string(), "browse");
        assert_eq!(QueryMode::search("heat").to_string(), "search(\"heat\")");
    }
}
