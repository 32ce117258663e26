//! Error types for layout resolution and composition

use thiserror::Error;

/// Errors that can occur while composing or resolving layouts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Layout name absent from every tier
    #[error("layout '{name}' not found (available: {})", available.join(", "))]
    NotFound { name: String, available: Vec<String> },

    /// Structural validation failures reported together by the composer
    #[error("invalid layout '{layout}': {}", problems.join("; "))]
    Composition {
        layout: String,
        problems: Vec<String>,
    },

    /// A zone name was declared twice
    #[error("duplicate zone '{zone}' in layout '{layout}'")]
    DuplicateZone { layout: String, zone: String },

    /// Inheritance or composition revisited a layout already being resolved
    #[error("circular layout inheritance: {}", chain.join(" -> "))]
    Cycle { chain: Vec<String> },

    /// Inheritance or composition nested deeper than the configured limit
    #[error("layout '{name}' exceeds the maximum inheritance depth of {limit}")]
    DepthExceeded { name: String, limit: usize },

    /// A zone added by `extend_layout` already exists in the base
    #[error("zone '{zone}' already exists in layout '{layout}'")]
    ZoneConflict { layout: String, zone: String },

    /// Merge called without any input layouts
    #[error("at least one layout is required to merge")]
    EmptyMerge,
}

impl LayoutError {
    /// Create a not-found error listing every currently known name
    pub fn not_found(name: impl Into<String>, available: Vec<String>) -> Self {
        Self::NotFound {
            name: name.into(),
            available,
        }
    }

    pub fn composition(layout: impl Into<String>, problems: Vec<String>) -> Self {
        Self::Composition {
            layout: layout.into(),
            problems,
        }
    }

    pub fn duplicate_zone(layout: impl Into<String>, zone: impl Into<String>) -> Self {
        Self::DuplicateZone {
            layout: layout.into(),
            zone: zone.into(),
        }
    }

    pub fn cycle(chain: Vec<String>) -> Self {
        Self::Cycle { chain }
    }

    /// Names known at the time of a lookup failure
    pub fn available(&self) -> Option<&[String]> {
        match self {
            Self::NotFound { available, .. } => Some(available),
            _ => None,
        }
    }

    /// Individual problems behind a composition failure
    pub fn problems(&self) -> Option<&[String]> {
        match self {
            Self::Composition { problems, .. } => Some(problems),
            _ => None,
        }
    }
}
