//! Designs
//!
//! The design catalogue view: one filter-state record applied as a single pure transform, and a
//! persisted grid/list preference behind a key-value port.

use std::{fmt, str::FromStr};

use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Preference key the view mode is stored under.
pub const VIEW_MODE_KEY: &str = "designs.view_mode";

/// A design as listed in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DesignRecord {
    /// Design identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// URL slug
    pub slug: String,

    /// Whether the design is offered
    #[serde(default)]
    pub active: bool,

    /// Whether the design is promoted
    #[serde(default)]
    pub featured: bool,

    /// Sports the design is made for
    #[serde(default)]
    pub sports: Vec<String>,

    /// Mockup image references
    #[serde(default)]
    pub mockups: Vec<String>,
}

/// Everything that narrows the design list.
///
/// Filters combine with AND. Text matching is case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesignFilter {
    search: Option<String>,
    sport: Option<String>,
    active_only: bool,
    featured_only: bool,
}

impl DesignFilter {
    /// Match designs whose name or slug contains `search`. Blank text clears the search.
    #[must_use]
    pub fn with_search(self, search: impl Into<String>) -> Self {
        let search = search.into().trim().to_lowercase();

        Self {
            search: (!search.is_empty()).then_some(search),
            ..self
        }
    }

    /// Match designs tagged with `sport`.
    #[must_use]
    pub fn with_sport(self, sport: impl Into<String>) -> Self {
        let sport = sport.into().trim().to_string();

        Self {
            sport: (!sport.is_empty()).then_some(sport),
            ..self
        }
    }

    /// Only keep active designs when `active_only` is set.
    #[must_use]
    pub fn with_active_only(self, active_only: bool) -> Self {
        Self {
            active_only,
            ..self
        }
    }

    /// Only keep featured designs when `featured_only` is set.
    #[must_use]
    pub fn with_featured_only(self, featured_only: bool) -> Self {
        Self {
            featured_only,
            ..self
        }
    }

    /// Whether a single design passes every filter.
    pub fn matches(&self, design: &DesignRecord) -> bool {
        if self.active_only && !design.active {
            return false;
        }

        if self.featured_only && !design.featured {
            return false;
        }

        if let Some(sport) = self.sport.as_deref()
            && !design.sports.iter().any(|s| s.eq_ignore_ascii_case(sport))
        {
            return false;
        }

        self.search.as_deref().is_none_or(|search| {
            design.name.to_lowercase().contains(search) || design.slug.to_lowercase().contains(search)
        })
    }

    /// The designs that pass, in input order.
    pub fn apply<'d>(&self, designs: &'d [DesignRecord]) -> Vec<&'d DesignRecord> {
        designs.iter().filter(|design| self.matches(design)).collect()
    }
}

/// Key-value persistence for view preferences.
pub trait PreferenceStore {
    /// Stored value for `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`.
    fn set(&mut self, key: &str, value: String);
}

/// In-memory [`PreferenceStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: FxHashMap<String, String>,
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

/// How the design list is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Card grid
    #[default]
    Grid,

    /// Compact list
    List,
}

impl ViewMode {
    /// Stored view mode; [`ViewMode::Grid`] when missing or unreadable.
    pub fn load(store: &impl PreferenceStore) -> Self {
        store
            .get(VIEW_MODE_KEY)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Persist this view mode.
    pub fn save(self, store: &mut impl PreferenceStore) {
        store.set(VIEW_MODE_KEY, self.to_string());
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Grid => f.write_str("grid"),
            ViewMode::List => f.write_str("list"),
        }
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            other => Err(format!("unknown view mode: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn design(id: &str, name: &str, active: bool, featured: bool, sports: &[&str]) -> DesignRecord {
        DesignRecord {
            id: id.to_string(),
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            active,
            featured,
            sports: sports.iter().map(ToString::to_string).collect(),
            mockups: Vec::new(),
        }
    }

    fn catalogue() -> Vec<DesignRecord> {
        vec![
            design("1", "Thunder Stripe", true, true, &["Rugby"]),
            design("2", "Classic Hoops", true, false, &["rugby", "football"]),
            design("3", "Night Sky", false, true, &["netball"]),
        ]
    }

    fn ids<'d>(designs: &[&'d DesignRecord]) -> Vec<&'d str> {
        designs.iter().map(|design| design.id.as_str()).collect()
    }

    #[test]
    fn default_filter_keeps_everything() {
        let designs = catalogue();

        assert_eq!(ids(&DesignFilter::default().apply(&designs)), ["1", "2", "3"]);
    }

    #[test]
    fn filters_combine() {
        let designs = catalogue();

        let filter = DesignFilter::default()
            .with_sport("RUGBY")
            .with_active_only(true)
            .with_featured_only(true);

        assert_eq!(ids(&filter.apply(&designs)), ["1"]);
    }

    #[test]
    fn search_matches_name_or_slug_case_insensitively() {
        let designs = catalogue();

        assert_eq!(ids(&DesignFilter::default().with_search("hoops").apply(&designs)), ["2"]);
        assert_eq!(ids(&DesignFilter::default().with_search("night-sky").apply(&designs)), ["3"]);
    }

    #[test]
    fn blank_search_is_ignored() {
        let designs = catalogue();

        assert_eq!(DesignFilter::default().with_search("   "), DesignFilter::default());
        assert_eq!(DesignFilter::default().with_search("  ").apply(&designs).len(), 3);
    }

    #[test]
    fn applying_twice_gives_the_same_view() {
        let designs = catalogue();
        let filter = DesignFilter::default().with_featured_only(true);

        assert_eq!(filter.apply(&designs), filter.apply(&designs));
    }

    #[test]
    fn view_mode_defaults_to_grid() {
        assert_eq!(ViewMode::load(&MemoryPreferences::default()), ViewMode::Grid);
    }

    #[test]
    fn view_mode_round_trips_through_the_store() {
        let mut store = MemoryPreferences::default();

        ViewMode::List.save(&mut store);

        assert_eq!(store.get(VIEW_MODE_KEY).as_deref(), Some("list"));
        assert_eq!(ViewMode::load(&store), ViewMode::List);
    }

    #[test]
    fn unreadable_view_mode_falls_back_to_grid() {
        let mut store = MemoryPreferences::default();

        store.set(VIEW_MODE_KEY, "carousel".to_string());

        assert_eq!(ViewMode::load(&store), ViewMode::Grid);
    }
}
