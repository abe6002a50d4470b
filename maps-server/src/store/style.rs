//! Base map styles.

use std::fmt;

use serde::{Deserialize, Serialize};

const LIGHT_STYLE_URL: &str = "https://basemaps.cartocdn.com/gl/positron-gl-style/style.json";
const DARK_STYLE_URL: &str = "https://basemaps.cartocdn.com/gl/dark-matter-gl-style/style.json";
const STREETS_STYLE_URL: &str = "https://basemaps.cartocdn.com/gl/voyager-gl-style/style.json";
const OUTDOORS_STYLE_URL: &str = "https://tiles.stadiamaps.com/styles/outdoors.json";
const SATELLITE_STYLE_URL: &str = "https://tiles.stadiamaps.com/styles/alidade_satellite.json";

/// Colour scheme of the rendering collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Base map style chosen by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapStyle {
    /// Follows the theme: light or dark basemap.
    #[default]
    Default,
    Streets,
    Outdoors,
    Satellite,
}

impl MapStyle {
    pub const ALL: [MapStyle; 4] = [
        MapStyle::Default,
        MapStyle::Streets,
        MapStyle::Outdoors,
        MapStyle::Satellite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MapStyle::Default => "default",
            MapStyle::Streets => "streets",
            MapStyle::Outdoors => "outdoors",
            MapStyle::Satellite => "satellite",
        }
    }

    /// Style document URL for this style under `theme`.
    pub fn style_url(&self, theme: Theme) -> &'static str {
        match (self, theme) {
            (MapStyle::Default, Theme::Light) => LIGHT_STYLE_URL,
            (MapStyle::Default, Theme::Dark) => DARK_STYLE_URL,
            (MapStyle::Streets, _) => STREETS_STYLE_URL,
            (MapStyle::Outdoors, _) => OUTDOORS_STYLE_URL,
            (MapStyle::Satellite, _) => SATELLITE_STYLE_URL,
        }
    }
}

impl fmt::Display for MapStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_follows_theme() {
        assert!(MapStyle::Default.style_url(Theme::Light).contains("positron"));
        assert!(MapStyle::Default.style_url(Theme::Dark).contains("dark-matter"));
    }

    #[test]
    fn explicit_styles_ignore_theme() {
        for style in [MapStyle::Streets, MapStyle::Outdoors, MapStyle::Satellite] {
            assert_eq!(style.style_url(Theme::Light), style.style_url(Theme::Dark));
        }
        assert!(MapStyle::Satellite.style_url(Theme::Dark).ends_with("alidade_satellite.json"));
    }

    #[test]
    fn serde_lowercase() {
        let json = serde_json::to_string(&MapStyle::Satellite).unwrap();
        assert_eq!(json, "\"satellite\"");
        let theme: Theme = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(theme, Theme::Dark);
    }
}
