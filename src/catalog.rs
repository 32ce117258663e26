//! Tier-partitioned catalog of named layouts

use std::collections::{BTreeSet, HashMap};

use log::{debug, warn};

use crate::layout::{LayoutDefinition, LayoutError, LayoutSource};

/// Named layouts partitioned by tier
///
/// Lookups honor tier precedence deck > theme > system. Registering a name
/// replaces only that tier's entry.
#[derive(Debug, Default, Clone)]
pub struct LayoutCatalog {
    system: HashMap<String, LayoutDefinition>,
    theme: HashMap<String, LayoutDefinition>,
    deck: HashMap<String, LayoutDefinition>,
    /// Bumped on every mutation so caches can tell the catalog changed
    generation: u64,
}

impl LayoutCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog pre-populated with the built-in layouts
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        crate::builtin::register_builtins(&mut catalog);
        catalog
    }

    fn tier(&self, tier: LayoutSource) -> &HashMap<String, LayoutDefinition> {
        match tier {
            LayoutSource::System => &self.system,
            LayoutSource::Theme => &self.theme,
            LayoutSource::Deck => &self.deck,
        }
    }

    fn tier_mut(&mut self, tier: LayoutSource) -> &mut HashMap<String, LayoutDefinition> {
        self.generation += 1;
        match tier {
            LayoutSource::System => &mut self.system,
            LayoutSource::Theme => &mut self.theme,
            LayoutSource::Deck => &mut self.deck,
        }
    }

    /// Store a definition under `name` in `tier`, replacing any previous entry there
    ///
    /// The stored definition takes `name` as its own name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        definition: LayoutDefinition,
        tier: LayoutSource,
    ) {
        let name = name.into();
        let mut definition = definition.with_source(tier);
        definition.name = name.clone();
        if self.tier_mut(tier).insert(name.clone(), definition).is_some() {
            warn!(target: "slide_layouts", "layout '{}' replaced in {} tier", name, tier);
        } else {
            debug!(target: "slide_layouts", "registered layout '{}' in {} tier", name, tier);
        }
    }

    /// Register a definition under its own name
    pub fn register_definition(&mut self, definition: LayoutDefinition, tier: LayoutSource) {
        let name = definition.name.clone();
        self.register(name, definition, tier);
    }

    /// Get the highest-precedence definition for `name`
    pub fn get(&self, name: &str) -> Result<&LayoutDefinition, LayoutError> {
        self.lookup(name)
            .ok_or_else(|| LayoutError::not_found(name, self.list_names()))
    }

    /// Get the highest-precedence definition for `name`, if any tier has it
    pub fn lookup(&self, name: &str) -> Option<&LayoutDefinition> {
        LayoutSource::BY_PRECEDENCE
            .iter()
            .find_map(|tier| self.tier(*tier).get(name))
    }

    /// Get the definition registered for `name` in one tier only
    pub fn get_in_tier(&self, name: &str, tier: LayoutSource) -> Option<&LayoutDefinition> {
        self.tier(tier).get(name)
    }

    /// Check if any tier has a layout by this name
    pub fn has(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// All known names across tiers, deduplicated and sorted
    pub fn list_names(&self) -> Vec<String> {
        self.unique_names().into_iter().map(str::to_string).collect()
    }

    /// Number of distinct names across tiers
    pub fn count_unique_names(&self) -> usize {
        self.unique_names().len()
    }

    /// Names registered in a single tier, sorted
    pub fn tier_names(&self, tier: LayoutSource) -> Vec<&str> {
        let mut names: Vec<&str> = self.tier(tier).keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    fn unique_names(&self) -> BTreeSet<&str> {
        LayoutSource::BY_PRECEDENCE
            .iter()
            .flat_map(|tier| self.tier(*tier).keys().map(|s| s.as_str()))
            .collect()
    }

    /// Remove every entry in one tier, leaving the others intact
    pub fn clear_tier(&mut self, tier: LayoutSource) {
        debug!(target: "slide_layouts", "clearing {} tier", tier);
        self.tier_mut(tier).clear();
    }

    /// Remove every entry in every tier
    pub fn clear_all(&mut self) {
        for tier in LayoutSource::BY_PRECEDENCE {
            self.tier_mut(tier).clear();
        }
    }

    /// Mutation counter; changes whenever the catalog contents may have changed
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
