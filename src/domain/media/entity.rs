use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable server-assigned identity of a catalog entry.
///
/// The remote catalog owns id allocation; the client never mints ids.
pub type MediaId = u64;

/// A single entry of the remote movie catalog.
///
/// Descriptive fields are whatever the server sent with the page the item
/// first appeared on. Two fetches of the same id may disagree on any of them;
/// identity alone decides whether they are "the same item".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    /// Stable identity; the sole equality and dedup key
    pub id: MediaId,

    /// Display title
    pub title: String,

    /// Theatrical release date (if known)
    pub release_date: Option<NaiveDate>,

    /// Average audience rating on the source's 0-10 scale (if known)
    pub rating: Option<f32>,

    /// Short synopsis (if known)
    pub overview: Option<String>,

    /// Poster image reference, relative to the source's image host
    pub poster_path: Option<String>,
}

impl MediaItem {
    /// Create an item with the descriptive fields unset
    pub fn new(id: MediaId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            release_date: None,
            rating: None,
            overview: None,
            poster_path: None,
        }
    }
}

// Equality, and therefore dedup, is by identity only. Descriptive fields
// drift between fetches and must not affect membership checks.
impl PartialEq for MediaItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MediaItem {}

impl std::hash::Hash for MediaItem {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_descriptive_fields() {
        let a = MediaItem::new(7, "Seven");
        let b = MediaItem {
            rating: Some(8.1),
            overview: Some("Two detectives.".to_string()),
            ..MediaItem::new(7, "Se7en")
        };

        assert_eq!(a, b);
    }

    #[test]
    fn distinct_ids_are_distinct_items() {
        let a = MediaItem::new(1, "Heat");
        let b = MediaItem::new(2, "Heat");

        assert_ne!(a, b);
    }

    #[test]
    fn hash_follows_identity() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(MediaItem::new(3, "Alien"));
        set.insert(MediaItem {
            overview: Some("In space.".to_string()),
            ..MediaItem::new(3, "Alien (1979)")
        });

        assert_eq!(set.len(), 1);
    }
}
