//! Standalone merge and zone-diff helpers
//!
//! These work on concrete [`LayoutDefinition`]s and never consult a catalog.
//! The resolver uses the same primitives for `extends` and `compose_from`.

use std::collections::BTreeMap;

use log::trace;

use crate::layout::{LayoutDefinition, LayoutError, StyleBlock, Zone, ZonePatch};

/// Which occurrence wins when the same zone name appears in several layouts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictResolution {
    /// Keep the first occurrence's attributes
    #[default]
    First,
    /// Take the last occurrence's attributes (position still comes from the first)
    Last,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOptions {
    pub name: Option<String>,
    pub description: Option<String>,
    pub conflict_resolution: ConflictResolution,
}

/// Grid template and style replacements; unset fields keep the base value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridOverrides {
    pub areas: Option<String>,
    pub columns: Option<String>,
    pub rows: Option<String>,
    pub style: Option<StyleBlock>,
}

impl GridOverrides {
    fn apply_to(&self, layout: &mut LayoutDefinition) {
        if let Some(areas) = &self.areas {
            layout.grid_template_areas = Some(areas.clone());
        }
        if let Some(columns) = &self.columns {
            layout.grid_template_columns = Some(columns.clone());
        }
        if let Some(rows) = &self.rows {
            layout.grid_template_rows = Some(rows.clone());
        }
        if let Some(style) = &self.style {
            layout.style = Some(style.clone());
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendOptions {
    pub name: Option<String>,
    pub description: Option<String>,
    pub add_zones: Vec<Zone>,
    pub remove_zones: Vec<String>,
    pub modify_zones: BTreeMap<String, ZonePatch>,
    pub grid: GridOverrides,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideOptions {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Zones to replace (matched by name) or insert
    pub zones: Vec<Zone>,
    pub grid: GridOverrides,
}

/// Ordered union of zones; position is always that of the first occurrence
pub(crate) fn union_zones<'a>(
    layouts: impl IntoIterator<Item = &'a LayoutDefinition>,
    policy: ConflictResolution,
) -> Vec<Zone> {
    let mut zones: Vec<Zone> = Vec::new();
    for layout in layouts {
        for zone in &layout.zones {
            match zones.iter_mut().find(|z| z.name == zone.name) {
                Some(existing) => {
                    if policy == ConflictResolution::Last {
                        *existing = zone.clone();
                    }
                }
                None => zones.push(zone.clone()),
            }
        }
    }
    zones
}

/// Drop removed zones, then patch the survivors
pub(crate) fn apply_zone_diff(
    zones: Vec<Zone>,
    remove: &[String],
    modify: &BTreeMap<String, ZonePatch>,
) -> Vec<Zone> {
    zones
        .into_iter()
        .filter(|zone| {
            let keep = !remove.contains(&zone.name);
            if !keep {
                trace!(target: "slide_layouts", "removing zone '{}'", zone.name);
            }
            keep
        })
        .map(|mut zone| {
            if let Some(patch) = modify.get(&zone.name) {
                trace!(target: "slide_layouts", "patching zone '{}'", zone.name);
                zone.apply(patch);
            }
            zone
        })
        .collect()
}

/// Merge several layouts into one
///
/// Zones form an ordered union. Grid templates and style come from the first
/// layout, or from the last when [`ConflictResolution::Last`] is chosen.
pub fn merge_layouts<'a>(
    layouts: impl IntoIterator<Item = &'a LayoutDefinition>,
    options: MergeOptions,
) -> Result<LayoutDefinition, LayoutError> {
    let layouts: Vec<&LayoutDefinition> = layouts.into_iter().collect();
    let template = match options.conflict_resolution {
        ConflictResolution::First => layouts.first(),
        ConflictResolution::Last => layouts.last(),
    }
    .ok_or(LayoutError::EmptyMerge)?;

    let names: Vec<&str> = layouts.iter().map(|l| l.name.as_str()).collect();
    let mut merged = (*template).clone();
    merged.name = options.name.unwrap_or_else(|| names.join("+"));
    merged.description = options
        .description
        .unwrap_or_else(|| format!("Merged from {}", names.join(", ")));
    merged.zones = union_zones(layouts.iter().copied(), options.conflict_resolution);
    Ok(merged)
}

/// Derive a new layout from `base` by removing, patching, and adding zones
///
/// Fails if an added zone is already present in the base, even when it is also removed.
pub fn extend_layout(
    base: &LayoutDefinition,
    options: ExtendOptions,
) -> Result<LayoutDefinition, LayoutError> {
    let mut extended = base.clone();
    if let Some(name) = options.name {
        extended.name = name;
    }
    if let Some(description) = options.description {
        extended.description = description;
    }

    if let Some(zone) = options.add_zones.iter().find(|z| base.has_zone(&z.name)) {
        return Err(LayoutError::ZoneConflict {
            layout: base.name.clone(),
            zone: zone.name.clone(),
        });
    }

    extended.zones = apply_zone_diff(
        std::mem::take(&mut extended.zones),
        &options.remove_zones,
        &options.modify_zones,
    );
    extended.zones.extend(options.add_zones);

    options.grid.apply_to(&mut extended);
    Ok(extended)
}

/// Replace zones by name (or append new ones), leaving all others untouched
pub fn override_layout(base: &LayoutDefinition, options: OverrideOptions) -> LayoutDefinition {
    let mut overridden = base.clone();
    if let Some(name) = options.name {
        overridden.name = name;
    }
    if let Some(description) = options.description {
        overridden.description = description;
    }

    for zone in options.zones {
        match overridden.zones.iter_mut().find(|z| z.name == zone.name) {
            Some(existing) => *existing = zone,
            None => overridden.zones.push(zone),
        }
    }

    options.grid.apply_to(&mut overridden);
    overridden
}

/// Copy a layout, optionally under a new name
pub fn clone_layout(layout: &LayoutDefinition, name: Option<&str>) -> LayoutDefinition {
    let mut copy = layout.clone();
    if let Some(name) = name {
        copy.name = name.to_string();
    }
    copy
}

/// Whether every required zone is present
pub fn has_required_zones(layout: &LayoutDefinition, required: &[&str]) -> bool {
    required.iter().all(|name| layout.has_zone(name))
}

pub fn zone_names(layout: &LayoutDefinition) -> Vec<&str> {
    layout.zone_names()
}

pub fn find_zone<'a>(layout: &'a LayoutDefinition, name: &str) -> Option<&'a Zone> {
    layout.find_zone(name)
}

/// A zone name present in both compared layouts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedZone {
    pub name: String,
    pub left_area: String,
    pub right_area: String,
}

impl SharedZone {
    pub fn conflicts(&self) -> bool {
        self.left_area != self.right_area
    }
}

/// Result of [`check_layout_compatibility`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompatibilityReport {
    /// Shared zones in the left layout's order
    pub shared: Vec<SharedZone>,
}

impl CompatibilityReport {
    /// True when no shared zone disagrees on its grid area
    pub fn is_compatible(&self) -> bool {
        self.conflicts().next().is_none()
    }

    pub fn conflicts(&self) -> impl Iterator<Item = &SharedZone> {
        self.shared.iter().filter(|z| z.conflicts())
    }
}

/// Compare the effective grid areas of zones both layouts declare
pub fn check_layout_compatibility(
    left: &LayoutDefinition,
    right: &LayoutDefinition,
) -> CompatibilityReport {
    let shared = left
        .zones
        .iter()
        .filter_map(|zone| {
            right.find_zone(&zone.name).map(|other| SharedZone {
                name: zone.name.clone(),
                left_area: zone.area().to_string(),
                right_area: other.area().to_string(),
            })
        })
        .collect();
    CompatibilityReport { shared }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn layout(name: &str, zones: Vec<Zone>) -> LayoutDefinition {
        LayoutDefinition::new(name).with_zones(zones)
    }

    #[test]
    fn test_merge_first_wins() {
        let a = layout("a", vec![Zone::new("x"), Zone::new("y").with_grid_area("from-a")])
            .with_grid_areas("\"x y\"");
        let b = layout("b", vec![Zone::new("y").with_grid_area("from-b"), Zone::new("z")])
            .with_grid_areas("\"y z\"");

        let merged = merge_layouts([&a, &b], MergeOptions::default()).unwrap();
        assert_eq!(merged.name, "a+b");
        assert_eq!(merged.zone_names(), vec!["x", "y", "z"]);
        assert_eq!(merged.find_zone("y").unwrap().area(), "from-a");
        assert_eq!(merged.grid_template_areas.as_deref(), Some("\"x y\""));
    }

    #[test]
    fn test_merge_last_wins() {
        let a = layout("a", vec![Zone::new("x"), Zone::new("y").with_grid_area("from-a")])
            .with_grid_areas("\"x y\"");
        let b = layout("b", vec![Zone::new("y").with_grid_area("from-b"), Zone::new("z")])
            .with_grid_areas("\"y z\"");

        let merged = merge_layouts(
            [&a, &b],
            MergeOptions {
                name: Some("ab".to_string()),
                conflict_resolution: ConflictResolution::Last,
                ..MergeOptions::default()
            },
        )
        .unwrap();
        assert_eq!(merged.name, "ab");
        assert_eq!(merged.zone_names(), vec!["x", "y", "z"]);
        assert_eq!(merged.find_zone("y").unwrap().area(), "from-b");
        assert_eq!(merged.grid_template_areas.as_deref(), Some("\"y z\""));
    }

    #[test]
    fn test_merge_empty_is_error() {
        let result = merge_layouts(std::iter::empty(), MergeOptions::default());
        assert_eq!(result.unwrap_err(), LayoutError::EmptyMerge);
    }

    #[test]
    fn test_extend_layout_diff() {
        let base = layout(
            "title",
            vec![Zone::new("title"), Zone::new("subtitle"), Zone::new("notes")],
        );
        let mut modify = BTreeMap::new();
        modify.insert("title".to_string(), ZonePatch::new().grid_area("head"));

        let extended = extend_layout(
            &base,
            ExtendOptions {
                name: Some("title-footer".to_string()),
                add_zones: vec![Zone::new("footer")],
                remove_zones: vec!["subtitle".to_string()],
                modify_zones: modify,
                grid: GridOverrides {
                    rows: Some("1fr auto".to_string()),
                    ..GridOverrides::default()
                },
                ..ExtendOptions::default()
            },
        )
        .unwrap();

        assert_eq!(extended.name, "title-footer");
        assert_eq!(extended.zone_names(), vec!["title", "notes", "footer"]);
        assert_eq!(extended.find_zone("title").unwrap().area(), "head");
        assert_eq!(extended.grid_template_rows.as_deref(), Some("1fr auto"));
        // base is untouched
        assert_eq!(base.zone_names(), vec!["title", "subtitle", "notes"]);
    }

    #[test]
    fn test_extend_layout_rejects_existing_zone() {
        let base = layout("title", vec![Zone::new("title")]);
        let err = extend_layout(
            &base,
            ExtendOptions {
                add_zones: vec![Zone::new("title")],
                ..ExtendOptions::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::ZoneConflict { ref zone, .. } if zone == "title"));
    }

    #[test]
    fn test_extend_layout_rejects_removed_then_readded_zone() {
        let base = layout("title", vec![Zone::new("title"), Zone::new("subtitle")]);
        let err = extend_layout(
            &base,
            ExtendOptions {
                remove_zones: vec!["subtitle".to_string()],
                add_zones: vec![Zone::new("subtitle").with_grid_area("moved")],
                ..ExtendOptions::default()
            },
        )
        .unwrap_err();
        assert_eq!(
            err,
            LayoutError::ZoneConflict {
                layout: "title".to_string(),
                zone: "subtitle".to_string(),
            }
        );
    }

    #[test]
    fn test_override_layout_replaces_in_place() {
        let base = layout("content", vec![Zone::new("title"), Zone::new("body")]);
        let overridden = override_layout(
            &base,
            OverrideOptions {
                zones: vec![
                    Zone::new("title").with_description("Headline"),
                    Zone::new("aside"),
                ],
                ..OverrideOptions::default()
            },
        );
        assert_eq!(overridden.zone_names(), vec!["title", "body", "aside"]);
        assert_eq!(
            overridden.find_zone("title").unwrap().description.as_deref(),
            Some("Headline")
        );
        assert_eq!(overridden.find_zone("body"), base.find_zone("body"));
    }

    #[test]
    fn test_read_helpers() {
        let base = layout("content", vec![Zone::new("title"), Zone::new("body")]);
        let copy = clone_layout(&base, Some("content-copy"));
        assert_eq!(copy.name, "content-copy");
        assert_eq!(copy.zones, base.zones);

        assert!(has_required_zones(&base, &["title", "body"]));
        assert!(!has_required_zones(&base, &["title", "image"]));
        assert_eq!(zone_names(&base), vec!["title", "body"]);
        assert!(find_zone(&base, "body").is_some());
        assert!(find_zone(&base, "image").is_none());
    }

    #[test]
    fn test_compatibility_report() {
        let a = layout(
            "a",
            vec![Zone::new("title"), Zone::new("body").with_grid_area("main"), Zone::new("x")],
        );
        let b = layout("b", vec![Zone::new("body"), Zone::new("title")]);

        let report = check_layout_compatibility(&a, &b);
        assert_eq!(report.shared.len(), 2);
        assert!(!report.is_compatible());
        let conflicts: Vec<&str> = report.conflicts().map(|z| z.name.as_str()).collect();
        assert_eq!(conflicts, vec!["body"]);

        let same = check_layout_compatibility(&b, &b);
        assert!(same.is_compatible());
    }
}
