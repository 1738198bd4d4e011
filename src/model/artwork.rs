//! Artwork information buckets produced by the classifier.

use std::collections::BTreeSet;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Message carried by the degraded classification payload.
pub const MODEL_UNAVAILABLE: &str = "NLP model unavailable";

/// One of the five artwork categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Artists,
    Titles,
    Dates,
    Techniques,
    Dimensions,
}

impl Category {
    /// All categories in output order.
    pub const ALL: [Category; 5] = [
        Category::Artists,
        Category::Titles,
        Category::Dates,
        Category::Techniques,
        Category::Dimensions,
    ];

    /// Key used for this category in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Artists => "artists",
            Category::Titles => "titles",
            Category::Dates => "dates",
            Category::Techniques => "techniques",
            Category::Dimensions => "dimensions",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sets of strings found for each artwork category.
///
/// Sets deduplicate on exact, case-sensitive text. `dimensions` is part of
/// the output schema but no rule fills it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkInfo {
    pub artists: BTreeSet<String>,
    pub titles: BTreeSet<String>,
    pub dates: BTreeSet<String>,
    pub techniques: BTreeSet<String>,
    pub dimensions: BTreeSet<String>,
}

impl ArtworkInfo {
    /// Create an empty set of buckets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the set for a category.
    pub fn get(&self, category: Category) -> &BTreeSet<String> {
        match category {
            Category::Artists => &self.artists,
            Category::Titles => &self.titles,
            Category::Dates => &self.dates,
            Category::Techniques => &self.techniques,
            Category::Dimensions => &self.dimensions,
        }
    }

    /// Add a value to a category. Returns `false` if it was already present.
    pub fn insert(&mut self, category: Category, value: impl Into<String>) -> bool {
        let set = match category {
            Category::Artists => &mut self.artists,
            Category::Titles => &mut self.titles,
            Category::Dates => &mut self.dates,
            Category::Techniques => &mut self.techniques,
            Category::Dimensions => &mut self.dimensions,
        };
        set.insert(value.into())
    }

    /// Total number of entries across all categories.
    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|c| self.get(*c).len()).sum()
    }

    /// Check if every category is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of classifying a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The model ran and produced buckets.
    Info(ArtworkInfo),
    /// No model was loaded; serialized as `{"error": "NLP model unavailable"}`.
    Unavailable,
}

impl Classification {
    /// Buckets, if the model was available.
    pub fn info(&self) -> Option<&ArtworkInfo> {
        match self {
            Classification::Info(info) => Some(info),
            Classification::Unavailable => None,
        }
    }

    /// Check whether this is the degraded result.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Classification::Unavailable)
    }
}

impl Serialize for Classification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Classification::Info(info) => info.serialize(serializer),
            Classification::Unavailable => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", MODEL_UNAVAILABLE)?;
                map.end()
            }
        }
    }
}
