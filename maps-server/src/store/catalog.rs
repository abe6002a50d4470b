//! Static location catalogue.
//!
//! Loaded once at startup and never mutated afterwards.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Category, CategoryId, Location, LocationId, Tag, TagId};

/// Marker colour for locations whose category is unknown.
pub const FALLBACK_COLOR: &str = "#6b7280";

/// Built-in sample catalogue (New Delhi points of interest).
const SAMPLE_CATALOG: &str = include_str!("../../data/catalog.json");

/// Errors from loading or validating a catalogue.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalogue file could not be read
    #[error("failed to read catalogue {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Catalogue JSON is malformed
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Two entries share an id
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    /// A location refers to a category that does not exist
    #[error("location {location} refers to unknown category {category}")]
    UnknownCategory {
        location: LocationId,
        category: CategoryId,
    },

    /// A location refers to a tag that does not exist
    #[error("location {location} refers to unknown tag {tag}")]
    UnknownTag { location: LocationId, tag: TagId },
}

/// On-disk catalogue layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub locations: Vec<Location>,
}

/// Validated catalogue of categories, tags and locations.
#[derive(Debug, Clone)]
pub struct Catalog {
    data: CatalogData,
}

impl Catalog {
    /// Validate and wrap catalogue data.
    ///
    /// Ids must be unique within their kind, and every location must refer
    /// to known categories and tags.
    pub fn new(data: CatalogData) -> Result<Self, CatalogError> {
        check_unique("category", data.categories.iter().map(|c| c.id.as_str()))?;
        check_unique("tag", data.tags.iter().map(|t| t.id.as_str()))?;
        check_unique("location", data.locations.iter().map(|l| l.id.as_str()))?;

        let categories: HashSet<&CategoryId> = data.categories.iter().map(|c| &c.id).collect();
        let tags: HashSet<&TagId> = data.tags.iter().map(|t| &t.id).collect();

        for location in &data.locations {
            if !categories.contains(&location.category_id) {
                return Err(CatalogError::UnknownCategory {
                    location: location.id.clone(),
                    category: location.category_id.clone(),
                });
            }
            if let Some(tag) = location.tags.iter().find(|t| !tags.contains(t)) {
                return Err(CatalogError::UnknownTag {
                    location: location.id.clone(),
                    tag: tag.clone(),
                });
            }
        }

        Ok(Self { data })
    }

    /// Parse and validate a JSON catalogue.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json).map_err(|e| CatalogError::Json {
            message: e.to_string(),
        })?;
        Self::new(data)
    }

    /// Load a JSON catalogue from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The built-in sample catalogue.
    pub fn sample() -> Result<Self, CatalogError> {
        Self::from_json(SAMPLE_CATALOG)
    }

    /// All locations, in catalogue order.
    pub fn locations(&self) -> &[Location] {
        &self.data.locations
    }

    pub fn categories(&self) -> &[Category] {
        &self.data.categories
    }

    pub fn tags(&self) -> &[Tag] {
        &self.data.tags
    }

    /// Look up a location by id.
    pub fn location(&self, id: &LocationId) -> Option<&Location> {
        self.data.locations.iter().find(|l| &l.id == id)
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.data.categories.iter().find(|c| &c.id == id)
    }

    pub fn tag(&self, id: &TagId) -> Option<&Tag> {
        self.data.tags.iter().find(|t| &t.id == id)
    }

    /// Marker colour for a category, grey when unknown.
    pub fn category_color(&self, id: &CategoryId) -> &str {
        self.category(id)
            .map(|c| c.color.as_str())
            .unwrap_or(FALLBACK_COLOR)
    }

    /// Display name of a tag, falling back to its id.
    pub fn tag_name<'a>(&'a self, id: &'a TagId) -> &'a str {
        self.tag(id).map(|t| t.name.as_str()).unwrap_or(id.as_str())
    }
}

fn check_unique<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
