//! Slide Layouts - layout resolution and composition for slide decks
//!
//! Layouts come from three tiers: built-in (system), theme, and deck. A deck
//! may declare variants that extend or compose other layouts and patch their
//! zones. [`LayoutResolver`] turns a layout name into one concrete
//! [`LayoutDefinition`], honoring tier precedence deck > theme > system.
//!
//! # Example
//!
//! ```rust
//! use slide_layouts::{LayoutCatalog, LayoutComposer, LayoutResolver, Zone, ZoneDiff};
//!
//! let variant = LayoutComposer::extend(
//!     "title-footer",
//!     "title",
//!     ZoneDiff::new().remove("subtitle").add(Zone::new("footer")),
//! )
//! .unwrap();
//!
//! let mut resolver = LayoutResolver::new(LayoutCatalog::with_builtins());
//! let layout = resolver.resolve_layout("title-footer", &[variant], &[]).unwrap();
//! assert_eq!(layout.zone_names(), vec!["title", "footer"]);
//! ```

pub mod builtin;
pub mod catalog;
pub mod composer;
pub mod layout;
pub mod merge;
pub mod pack;
pub mod resolver;

use std::sync::Arc;

pub use catalog::LayoutCatalog;
pub use composer::{validate_variant, LayoutComposer, ZoneDiff};
pub use layout::{
    LayoutDefinition, LayoutError, LayoutSource, LayoutVariant, ResolverConfig, StyleBlock,
    Zone, ZonePatch,
};
pub use merge::{
    check_layout_compatibility, clone_layout, extend_layout, find_zone, has_required_zones,
    merge_layouts, override_layout, zone_names, CompatibilityReport, ConflictResolution,
    ExtendOptions, GridOverrides, MergeOptions, OverrideOptions, SharedZone,
};
pub use pack::{LayoutPack, PackError};
pub use resolver::LayoutResolver;

/// Resolve a layout against the built-ins plus a theme pack and a deck pack
///
/// Theme pack layouts form the theme tier and deck pack variants form the
/// deck tier. For repeated lookups keep a [`LayoutResolver`] instead.
///
/// # Example
///
/// ```rust
/// use slide_layouts::{resolve_with_packs, LayoutPack, LayoutSource};
///
/// let deck = LayoutPack::from_str(r#"
///     [[variants]]
///     name = "wide"
///     extends = "two-column"
///     [variants.modify_zones.left]
///     grid_area = "main"
/// "#).unwrap();
///
/// let layout = resolve_with_packs("wide", &LayoutPack::default(), &deck).unwrap();
/// assert_eq!(layout.source, LayoutSource::Deck);
/// assert_eq!(layout.find_zone("left").unwrap().area(), "main");
/// ```
pub fn resolve_with_packs(
    name: &str,
    theme: &LayoutPack,
    deck: &LayoutPack,
) -> Result<Arc<LayoutDefinition>, LayoutError> {
    let mut resolver = LayoutResolver::new(LayoutCatalog::with_builtins());
    resolver.resolve_layout(name, &deck.variants, &theme.layouts)
}
