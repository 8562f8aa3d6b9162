//! Calendar hierarchy tree (country → region → city, arbitrary depth).

use crate::locale::LocalizedText;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A node of a calendar hierarchy.
///
/// Children are keyed by child id; the map's key order is the node's native
/// (and wire) ordering. The structure is a tree, cycles cannot be expressed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarHierarchy {
    pub id: String,
    pub description: LocalizedText,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<String, CalendarHierarchy>,
}

impl CalendarHierarchy {
    pub fn new(id: impl Into<String>, description: LocalizedText) -> Self {
        Self { id: id.into(), description, children: BTreeMap::new() }
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Locale-resolved description; see [`LocalizedText::resolve`].
    #[must_use]
    pub fn description_for(&self, locale: &str) -> &str {
        self.description.resolve(locale)
    }

    /// Total number of nodes in this subtree, the root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.values().map(Self::node_count).sum::<usize>()
    }
}
