//! Core types: zones, layout definitions, and authoring-time variants

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Free-form style block attached to a layout (CSS property -> value)
pub type StyleBlock = BTreeMap<String, String>;

/// The tier a layout definition comes from
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LayoutSource {
    /// Built-in layouts registered at startup
    #[default]
    System,
    /// Layouts supplied by the active theme
    Theme,
    /// Layouts declared by the deck itself
    Deck,
}

impl LayoutSource {
    /// Tiers ordered from highest to lowest precedence
    pub const BY_PRECEDENCE: [LayoutSource; 3] =
        [LayoutSource::Deck, LayoutSource::Theme, LayoutSource::System];

    /// Diagnostic priority for this tier. Precedence is decided by tier, not by this number.
    pub fn priority(self) -> i32 {
        match self {
            LayoutSource::System => 0,
            LayoutSource::Theme => 50,
            LayoutSource::Deck => 100,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutSource::System => "system",
            LayoutSource::Theme => "theme",
            LayoutSource::Deck => "deck",
        }
    }
}

impl fmt::Display for LayoutSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named placement slot within a layout
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Zone {
    /// Zone name, unique within one layout
    pub name: String,
    /// Grid area identifier; defaults to the zone name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_area: Option<String>,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Zone {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            grid_area: None,
            description: None,
        }
    }

    pub fn with_grid_area(mut self, area: impl Into<String>) -> Self {
        self.grid_area = Some(area.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The effective grid area (falls back to the zone name)
    pub fn area(&self) -> &str {
        self.grid_area.as_deref().unwrap_or(&self.name)
    }

    /// Apply a partial patch; fields the patch leaves unset are retained
    pub fn apply(&mut self, patch: &ZonePatch) {
        if let Some(area) = &patch.grid_area {
            self.grid_area = Some(area.clone());
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
    }
}

/// Partial zone update used by `modify_zones`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZonePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ZonePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid_area(mut self, area: impl Into<String>) -> Self {
        self.grid_area = Some(area.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A concrete, fully populated layout
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayoutDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Ordered zones
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_template_areas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_template_columns: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_template_rows: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleBlock>,
    #[serde(default)]
    pub source: LayoutSource,
    #[serde(default)]
    pub priority: i32,
}

impl LayoutDefinition {
    /// Create an empty system-tier layout
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            zones: Vec::new(),
            grid_template_areas: None,
            grid_template_columns: None,
            grid_template_rows: None,
            style: None,
            source: LayoutSource::System,
            priority: LayoutSource::System.priority(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zones.push(zone);
        self
    }

    pub fn with_zones(mut self, zones: impl IntoIterator<Item = Zone>) -> Self {
        self.zones.extend(zones);
        self
    }

    pub fn with_grid_areas(mut self, areas: impl Into<String>) -> Self {
        self.grid_template_areas = Some(areas.into());
        self
    }

    pub fn with_grid_columns(mut self, columns: impl Into<String>) -> Self {
        self.grid_template_columns = Some(columns.into());
        self
    }

    pub fn with_grid_rows(mut self, rows: impl Into<String>) -> Self {
        self.grid_template_rows = Some(rows.into());
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style
            .get_or_insert_with(StyleBlock::new)
            .insert(property.into(), value.into());
        self
    }

    /// Tag with a tier; priority follows the tier
    pub fn with_source(mut self, source: LayoutSource) -> Self {
        self.source = source;
        self.priority = source.priority();
        self
    }

    pub fn zone_names(&self) -> Vec<&str> {
        self.zones.iter().map(|z| z.name.as_str()).collect()
    }

    pub fn find_zone(&self, name: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.name == name)
    }

    pub fn has_zone(&self, name: &str) -> bool {
        self.find_zone(name).is_some()
    }

    /// First zone name that occurs more than once, if any
    pub fn duplicate_zone(&self) -> Option<&str> {
        self.zones.iter().enumerate().find_map(|(i, zone)| {
            self.zones[..i]
                .iter()
                .any(|earlier| earlier.name == zone.name)
                .then_some(zone.name.as_str())
        })
    }

    /// Fill grid and style fields this layout leaves unset from `fallback`
    pub(crate) fn inherit_presentation(&mut self, fallback: &LayoutDefinition) {
        if self.grid_template_areas.is_none() {
            self.grid_template_areas = fallback.grid_template_areas.clone();
        }
        if self.grid_template_columns.is_none() {
            self.grid_template_columns = fallback.grid_template_columns.clone();
        }
        if self.grid_template_rows.is_none() {
            self.grid_template_rows = fallback.grid_template_rows.clone();
        }
        if self.style.is_none() {
            self.style = fallback.style.clone();
        }
    }
}

/// An authoring-time layout: a definition plus inheritance and zone diff instructions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayoutVariant {
    #[serde(flatten)]
    pub layout: LayoutDefinition,
    /// Single base layout; exclusive with `compose_from`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    /// Ordered base layouts to union
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compose_from: Option<Vec<String>>,
    /// Layout this variant is meant to replace (advisory only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_zones: Vec<Zone>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remove_zones: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub modify_zones: BTreeMap<String, ZonePatch>,
}

impl LayoutVariant {
    pub fn new(layout: LayoutDefinition) -> Self {
        Self {
            layout,
            extends: None,
            compose_from: None,
            overrides: None,
            additional_zones: Vec::new(),
            remove_zones: Vec::new(),
            modify_zones: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.layout.name
    }

    /// Whether this variant derives its zones from other layouts
    pub fn is_derived(&self) -> bool {
        self.extends.is_some() || self.compose_from.is_some()
    }

    pub fn removes(&self, zone: &str) -> bool {
        self.remove_zones.iter().any(|r| r == zone)
    }
}

impl From<LayoutDefinition> for LayoutVariant {
    fn from(layout: LayoutDefinition) -> Self {
        Self::new(layout)
    }
}
