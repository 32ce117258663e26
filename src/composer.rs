//! Builder for authoring layout variants
//!
//! A [`LayoutComposer`] accumulates a draft [`LayoutVariant`]. Duplicate zone
//! names are rejected the moment they are added; every other structural check
//! is deferred to [`LayoutComposer::validate`] and reported together by
//! [`LayoutComposer::build`].
//!
//! # Example
//!
//! ```rust
//! use slide_layouts::{LayoutComposer, Zone};
//!
//! let variant = LayoutComposer::new("hero")
//!     .description("Big picture with a caption")
//!     .add_zone(Zone::new("image"))?
//!     .add_zone(Zone::new("caption"))?
//!     .grid_template_areas("\"image\" \"caption\"")
//!     .build()?;
//!
//! assert_eq!(variant.layout.zone_names(), vec!["image", "caption"]);
//! # Ok::<(), slide_layouts::LayoutError>(())
//! ```

use std::collections::BTreeMap;

use crate::layout::{
    LayoutDefinition, LayoutError, LayoutSource, LayoutVariant, StyleBlock, Zone, ZonePatch,
};

/// Zone add/remove/modify instructions for the one-call constructors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneDiff {
    pub add: Vec<Zone>,
    pub remove: Vec<String>,
    pub modify: BTreeMap<String, ZonePatch>,
}

impl ZoneDiff {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, zone: Zone) -> Self {
        self.add.push(zone);
        self
    }

    pub fn remove(mut self, name: impl Into<String>) -> Self {
        self.remove.push(name.into());
        self
    }

    pub fn modify(mut self, name: impl Into<String>, patch: ZonePatch) -> Self {
        self.modify.insert(name.into(), patch);
        self
    }
}

/// Incremental, checked assembly of a [`LayoutVariant`]
#[derive(Debug, Clone)]
pub struct LayoutComposer {
    draft: LayoutVariant,
}

impl LayoutComposer {
    /// Start a new deck-tier variant
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            draft: LayoutVariant::new(LayoutDefinition::new(name).with_source(LayoutSource::Deck)),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.draft.layout.description = description.into();
        self
    }

    /// Add a zone; fails immediately if a zone with this name was already added
    pub fn add_zone(mut self, zone: Zone) -> Result<Self, LayoutError> {
        self.ensure_unique(&zone.name)?;
        self.draft.layout.zones.push(zone);
        Ok(self)
    }

    /// Add a zone with default attributes
    pub fn zone(self, name: impl Into<String>) -> Result<Self, LayoutError> {
        self.add_zone(Zone::new(name))
    }

    pub fn add_zones(self, zones: impl IntoIterator<Item = Zone>) -> Result<Self, LayoutError> {
        zones.into_iter().try_fold(self, |composer, zone| composer.add_zone(zone))
    }

    /// Queue a zone to append after inherited zones
    pub fn add_additional_zone(mut self, zone: Zone) -> Result<Self, LayoutError> {
        self.ensure_unique(&zone.name)?;
        self.draft.additional_zones.push(zone);
        Ok(self)
    }

    /// Queue an inherited zone for removal
    pub fn remove_zone(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.draft.removes(&name) {
            self.draft.remove_zones.push(name);
        }
        self
    }

    /// Queue a patch for an inherited zone; a later patch for the same zone replaces it
    pub fn modify_zone(mut self, name: impl Into<String>, patch: ZonePatch) -> Self {
        self.draft.modify_zones.insert(name.into(), patch);
        self
    }

    pub fn extends(mut self, base: impl Into<String>) -> Self {
        self.draft.extends = Some(base.into());
        self
    }

    pub fn compose_from<I, S>(mut self, bases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.draft.compose_from = Some(bases.into_iter().map(Into::into).collect());
        self
    }

    pub fn overrides(mut self, name: impl Into<String>) -> Self {
        self.draft.overrides = Some(name.into());
        self
    }

    pub fn grid_template_areas(mut self, areas: impl Into<String>) -> Self {
        self.draft.layout.grid_template_areas = Some(areas.into());
        self
    }

    pub fn grid_template_columns(mut self, columns: impl Into<String>) -> Self {
        self.draft.layout.grid_template_columns = Some(columns.into());
        self
    }

    pub fn grid_template_rows(mut self, rows: impl Into<String>) -> Self {
        self.draft.layout.grid_template_rows = Some(rows.into());
        self
    }

    /// Set one style property
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.draft
            .layout
            .style
            .get_or_insert_with(StyleBlock::new)
            .insert(property.into(), value.into());
        self
    }

    /// Replace the whole style block
    pub fn style_block(mut self, style: StyleBlock) -> Self {
        self.draft.layout.style = Some(style);
        self
    }

    /// Collect every structural problem with the current draft
    pub fn validate(&self) -> Vec<String> {
        validate_variant(&self.draft)
    }

    /// Validate and return an independent copy of the draft
    pub fn build(&self) -> Result<LayoutVariant, LayoutError> {
        let problems = self.validate();
        if !problems.is_empty() {
            return Err(LayoutError::composition(self.draft.name(), problems));
        }
        Ok(self.draft.clone())
    }

    /// Build a standalone layout in one call
    pub fn simple(
        name: impl Into<String>,
        description: impl Into<String>,
        zones: impl IntoIterator<Item = Zone>,
        grid_areas: impl Into<String>,
    ) -> Result<LayoutVariant, LayoutError> {
        Self::new(name)
            .description(description)
            .add_zones(zones)?
            .grid_template_areas(grid_areas)
            .build()
    }

    /// Build a variant extending `base` with a zone diff
    pub fn extend(
        name: impl Into<String>,
        base: impl Into<String>,
        diff: ZoneDiff,
    ) -> Result<LayoutVariant, LayoutError> {
        Self::new(name).extends(base).apply_diff(diff)?.build()
    }

    /// Build a variant composed from several layouts
    pub fn compose<I, S>(
        name: impl Into<String>,
        description: impl Into<String>,
        bases: I,
        diff: ZoneDiff,
        grid_areas: Option<String>,
    ) -> Result<LayoutVariant, LayoutError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut composer = Self::new(name)
            .description(description)
            .compose_from(bases)
            .apply_diff(diff)?;
        if let Some(areas) = grid_areas {
            composer = composer.grid_template_areas(areas);
        }
        composer.build()
    }

    fn apply_diff(self, diff: ZoneDiff) -> Result<Self, LayoutError> {
        let ZoneDiff { add, remove, modify } = diff;
        let mut composer = add
            .into_iter()
            .try_fold(self, |composer, zone| composer.add_additional_zone(zone))?;
        for name in remove {
            composer = composer.remove_zone(name);
        }
        for (name, patch) in modify {
            composer = composer.modify_zone(name, patch);
        }
        Ok(composer)
    }

    fn ensure_unique(&self, zone: &str) -> Result<(), LayoutError> {
        let taken = self.draft.layout.has_zone(zone)
            || self.draft.additional_zones.iter().any(|z| z.name == zone);
        if taken {
            return Err(LayoutError::duplicate_zone(self.draft.name(), zone));
        }
        Ok(())
    }
}

/// Structural checks shared by the composer and by layout pack loading
///
/// Returns human-readable problems; an empty list means the variant is usable.
pub fn validate_variant(variant: &LayoutVariant) -> Vec<String> {
    let mut problems = Vec::new();
    let layout = &variant.layout;

    if layout.name.trim().is_empty() {
        problems.push("layout name is required".to_string());
    }

    if layout.zones.is_empty() && !variant.is_derived() {
        problems.push(
            "layout must define at least one zone unless it extends or composes other layouts"
                .to_string(),
        );
    }

    if !layout.zones.is_empty() && layout.grid_template_areas.is_none() && layout.style.is_none() {
        problems.push("layout defines zones but has no grid-template-areas or style block".to_string());
    }

    if let (Some(base), Some(sources)) = (&variant.extends, &variant.compose_from) {
        problems.push(format!(
            "layout cannot both extend '{}' and compose from [{}]",
            base,
            sources.join(", ")
        ));
    }

    if matches!(&variant.compose_from, Some(sources) if sources.is_empty()) {
        problems.push("compose_from must name at least one layout".to_string());
    }

    for zone in &variant.additional_zones {
        if variant.removes(&zone.name) {
            problems.push(format!("zone '{}' is both removed and added", zone.name));
        }
    }

    let mut seen: Vec<&str> = Vec::new();
    for zone in layout.zones.iter().chain(&variant.additional_zones) {
        if seen.contains(&zone.name.as_str()) {
            problems.push(format!("duplicate zone '{}'", zone.name));
        } else {
            seen.push(&zone.name);
        }
    }

    problems
}
