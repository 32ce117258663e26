//! Layout data model
//!
//! A [`LayoutDefinition`] is the concrete artifact handed to renderers: an
//! ordered list of [`Zone`]s plus optional grid templates and a style block.
//! A [`LayoutVariant`] is what authors write: a definition that may extend or
//! compose other layouts and patch their zones.

mod config;
mod error;
mod types;

pub use config::{ResolverConfig, DEFAULT_MAX_DEPTH};
pub use error::LayoutError;
pub use types::{LayoutDefinition, LayoutSource, LayoutVariant, StyleBlock, Zone, ZonePatch};
