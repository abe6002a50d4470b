//! Points of interest and their classification.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::LatLng;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(
    /// Identifier of a [`Location`].
    LocationId
);
string_id!(
    /// Identifier of a [`Category`].
    CategoryId
);
string_id!(
    /// Identifier of a [`Tag`].
    TagId
);

/// A point of interest shown as a marker on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub address: String,
    pub coordinates: LatLng,
    pub category_id: CategoryId,
    #[serde(default)]
    pub tags: BTreeSet<TagId>,
    #[serde(default)]
    pub description: Option<String>,
    /// When the location was added to the catalogue.
    #[serde(default)]
    pub added_at: Option<NaiveDate>,
}

impl Location {
    /// Whether the location carries the given tag.
    pub fn has_tag(&self, tag: &TagId) -> bool {
        self.tags.contains(tag)
    }

    /// Case-insensitive match of `needle` against name and address.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.address.to_lowercase().contains(needle)
    }

    /// The added date in the marker popup format, e.g. "Mar 5, 2024".
    pub fn added_at_label(&self) -> Option<String> {
        self.added_at.map(|d| d.format("%b %-d, %Y").to_string())
    }
}

/// Marker category; only its colour affects rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub label: String,
    /// CSS colour used to tint markers.
    pub color: String,
}

/// Free-form label attached to locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> Location {
        Location {
            id: LocationId::new("india-gate"),
            name: "India Gate".to_string(),
            address: "Rajpath, New Delhi".to_string(),
            coordinates: LatLng::new(28.6129, 77.2295).unwrap(),
            category_id: CategoryId::new("landmark"),
            tags: [TagId::new("historic"), TagId::new("outdoor")]
                .into_iter()
                .collect(),
            description: None,
            added_at: NaiveDate::from_ymd_opt(2024, 3, 5),
        }
    }

    #[test]
    fn tag_lookup() {
        let loc = location();
        assert!(loc.has_tag(&TagId::new("historic")));
        assert!(!loc.has_tag(&TagId::new("food")));
    }

    #[test]
    fn text_match_covers_name_and_address() {
        let loc = location();
        assert!(loc.matches_text("india"));
        assert!(loc.matches_text("rajpath"));
        assert!(loc.matches_text("new delhi"));
        assert!(!loc.matches_text("mumbai"));
    }

    #[test]
    fn added_at_label_format() {
        assert_eq!(location().added_at_label().as_deref(), Some("Mar 5, 2024"));
    }

    #[test]
    fn id_debug_and_display() {
        let id = LocationId::new("abc");
        assert_eq!(format!("{:?}", id), "LocationId(abc)");
        assert_eq!(id.to_string(), "abc");
    }

    #[test]
    fn deserialize_camel_case() {
        let json = r##"{
            "id": "red-fort",
            "name": "Red Fort",
            "address": "Netaji Subhash Marg",
            "coordinates": {"lat": 28.6562, "lng": 77.2410},
            "categoryId": "landmark",
            "tags": ["historic"]
        }"##;
        let loc: Location = serde_json::from_str(json).unwrap();
        assert_eq!(loc.id.as_str(), "red-fort");
        assert_eq!(loc.category_id.as_str(), "landmark");
        assert!(loc.has_tag(&TagId::new("historic")));
        assert!(loc.added_at.is_none());
    }
}
