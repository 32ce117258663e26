//! Layout resolution - turns a layout name into one concrete definition
//!
//! Lookup order is the deck variant list, then the theme layout list, then the
//! catalog. Deck variants may `extend` one layout or `compose_from` several;
//! bases are resolved recursively through the same three tiers.

use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeSet, HashMap};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use log::debug;

use crate::catalog::LayoutCatalog;
use crate::layout::{
    LayoutDefinition, LayoutError, LayoutSource, LayoutVariant, ResolverConfig, Zone,
};
use crate::merge::{apply_zone_diff, union_zones, ConflictResolution};

/// Cache key: requested name plus the content of everything it was resolved against
///
/// Entry names are kept alongside the content hashes so that a hash collision
/// alone cannot alias two different lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    name: String,
    deck: u64,
    theme: u64,
    deck_names: Vec<String>,
    theme_names: Vec<String>,
    generation: u64,
}

fn fingerprint<T: Hash>(items: &[T]) -> u64 {
    let mut hasher = DefaultHasher::new();
    items.hash(&mut hasher);
    hasher.finish()
}

/// State for one `resolve_layout` call
#[derive(Debug)]
pub(crate) struct ResolutionContext<'v> {
    deck: &'v [LayoutVariant],
    theme: &'v [LayoutDefinition],
    deck_fingerprint: u64,
    theme_fingerprint: u64,
    deck_names: Vec<String>,
    theme_names: Vec<String>,
    /// Layouts currently being resolved, outermost first (for cycle detection)
    resolving: Vec<String>,
}

impl<'v> ResolutionContext<'v> {
    fn new(deck: &'v [LayoutVariant], theme: &'v [LayoutDefinition]) -> Self {
        Self {
            deck,
            theme,
            deck_fingerprint: fingerprint(deck),
            theme_fingerprint: fingerprint(theme),
            deck_names: deck.iter().map(|v| v.name().to_string()).collect(),
            theme_names: theme.iter().map(|l| l.name.clone()).collect(),
            resolving: Vec::new(),
        }
    }

    /// Check if a layout is currently being resolved
    fn is_resolving(&self, name: &str) -> bool {
        self.resolving.iter().any(|n| n == name)
    }

    fn depth(&self) -> usize {
        self.resolving.len()
    }

    fn start_resolving(&mut self, name: &str) {
        self.resolving.push(name.to_string());
    }

    fn done_resolving(&mut self) {
        self.resolving.pop();
    }

    /// The resolution path from the first revisit of `name` back to `name`
    fn cycle_through(&self, name: &str) -> Vec<String> {
        let start = self
            .resolving
            .iter()
            .position(|n| n == name)
            .unwrap_or(0);
        let mut chain = self.resolving[start..].to_vec();
        chain.push(name.to_string());
        chain
    }

    fn key(&self, name: &str, generation: u64) -> CacheKey {
        CacheKey {
            name: name.to_string(),
            deck: self.deck_fingerprint,
            theme: self.theme_fingerprint,
            deck_names: self.deck_names.clone(),
            theme_names: self.theme_names.clone(),
            generation,
        }
    }
}

/// Resolves layout names against a catalog plus deck and theme lists, with caching
#[derive(Debug, Default)]
pub struct LayoutResolver {
    catalog: LayoutCatalog,
    config: ResolverConfig,
    cache: HashMap<CacheKey, Arc<LayoutDefinition>>,
}

impl LayoutResolver {
    pub fn new(catalog: LayoutCatalog) -> Self {
        Self::with_config(catalog, ResolverConfig::default())
    }

    pub fn with_config(catalog: LayoutCatalog, config: ResolverConfig) -> Self {
        Self {
            catalog,
            config,
            cache: HashMap::new(),
        }
    }

    pub fn catalog(&self) -> &LayoutCatalog {
        &self.catalog
    }

    /// Mutable access to the catalog; any change invalidates earlier cache entries
    pub fn catalog_mut(&mut self) -> &mut LayoutCatalog {
        &mut self.catalog
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve `name` against the catalog alone
    pub fn resolve(&mut self, name: &str) -> Result<Arc<LayoutDefinition>, LayoutError> {
        self.resolve_layout(name, &[], &[])
    }

    /// Resolve `name` to a concrete layout
    ///
    /// Repeated calls with unchanged inputs return the same `Arc`.
    pub fn resolve_layout(
        &mut self,
        name: &str,
        deck: &[LayoutVariant],
        theme: &[LayoutDefinition],
    ) -> Result<Arc<LayoutDefinition>, LayoutError> {
        let mut ctx = ResolutionContext::new(deck, theme);
        self.resolve_in(name, &mut ctx)
    }

    /// Discard every cached result
    pub fn clear_cache(&mut self) {
        debug!(target: "slide_layouts", "clearing {} cached layouts", self.cache.len());
        self.cache.clear();
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    fn resolve_in(
        &mut self,
        name: &str,
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<Arc<LayoutDefinition>, LayoutError> {
        if ctx.is_resolving(name) {
            return Err(LayoutError::cycle(ctx.cycle_through(name)));
        }

        let key = ctx.key(name, self.catalog.generation());
        if self.config.cache_enabled {
            if let Some(hit) = self.cache.get(&key) {
                debug!(target: "slide_layouts", "cache hit for layout '{}'", name);
                return Ok(Arc::clone(hit));
            }
        }

        if ctx.depth() >= self.config.max_depth {
            return Err(LayoutError::DepthExceeded {
                name: name.to_string(),
                limit: self.config.max_depth,
            });
        }

        ctx.start_resolving(name);
        let result = self.resolve_uncached(name, ctx);
        ctx.done_resolving();

        let resolved = result?;
        if let Some(zone) = resolved.duplicate_zone() {
            return Err(LayoutError::duplicate_zone(&resolved.name, zone));
        }

        let resolved = Arc::new(resolved);
        if self.config.cache_enabled {
            self.cache.insert(key, Arc::clone(&resolved));
        }
        Ok(resolved)
    }

    fn resolve_uncached(
        &mut self,
        name: &str,
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<LayoutDefinition, LayoutError> {
        let deck = ctx.deck;
        if let Some(variant) = deck.iter().find(|v| v.name() == name) {
            debug!(target: "slide_layouts", "resolving '{}' from deck tier", name);
            return self.resolve_variant(variant, ctx);
        }

        let theme = ctx.theme;
        if let Some(layout) = theme.iter().find(|l| l.name == name) {
            debug!(target: "slide_layouts", "resolving '{}' from theme tier", name);
            return Ok(layout.clone().with_source(LayoutSource::Theme));
        }

        match self.catalog.lookup(name) {
            Some(layout) => {
                debug!(
                    target: "slide_layouts",
                    "resolving '{}' from catalog ({} tier)", name, layout.source
                );
                Ok(layout.clone())
            }
            None => Err(LayoutError::not_found(name, self.known_names(ctx))),
        }
    }

    /// Every name visible to this resolution, sorted
    fn known_names(&self, ctx: &ResolutionContext<'_>) -> Vec<String> {
        let mut names: BTreeSet<String> = self.catalog.list_names().into_iter().collect();
        names.extend(ctx.deck.iter().map(|v| v.name().to_string()));
        names.extend(ctx.theme.iter().map(|l| l.name.clone()));
        names.into_iter().collect()
    }

    fn resolve_variant(
        &mut self,
        variant: &LayoutVariant,
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<LayoutDefinition, LayoutError> {
        let mut layout = variant.layout.clone();

        if let Some(base_name) = &variant.extends {
            let base = self.resolve_in(base_name, ctx)?;

            let mut zones =
                apply_zone_diff(base.zones.clone(), &variant.remove_zones, &variant.modify_zones);
            append_zones(&mut zones, &variant.additional_zones, variant.name())?;
            for zone in &variant.layout.zones {
                if !zones.iter().any(|z| z.name == zone.name) {
                    zones.push(zone.clone());
                }
            }

            layout.zones = zones;
            if layout.description.is_empty() {
                layout.description = base.description.clone();
            }
            layout.inherit_presentation(&base);
        } else if let Some(sources) = &variant.compose_from {
            let bases = sources
                .iter()
                .map(|source| self.resolve_in(source, ctx))
                .collect::<Result<Vec<_>, _>>()?;

            let mut zones = union_zones(bases.iter().map(|b| &**b), ConflictResolution::First);
            for zone in &variant.layout.zones {
                match zones.iter_mut().find(|z| z.name == zone.name) {
                    Some(existing) => *existing = zone.clone(),
                    None => zones.push(zone.clone()),
                }
            }
            let mut zones = apply_zone_diff(zones, &variant.remove_zones, &variant.modify_zones);
            append_zones(&mut zones, &variant.additional_zones, variant.name())?;

            layout.zones = zones;
            if let Some(first) = bases.first() {
                layout.inherit_presentation(first);
            }
        }

        Ok(layout.with_source(LayoutSource::Deck))
    }
}

/// Append zones after inherited ones; a name already present is an error
fn append_zones(zones: &mut Vec<Zone>, additions: &[Zone], layout: &str) -> Result<(), LayoutError> {
    for zone in additions {
        if zones.iter().any(|z| z.name == zone.name) {
            return Err(LayoutError::duplicate_zone(layout, &zone.name));
        }
        zones.push(zone.clone());
    }
    Ok(())
}
