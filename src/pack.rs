//! Layout packs: theme layouts and deck variants loaded from TOML
//!
//! ```toml
//! [metadata]
//! name = "Corporate"
//!
//! [[layouts]]
//! name = "title"
//! grid_template_areas = '"title" "subtitle"'
//! zones = [{ name = "title" }, { name = "subtitle" }]
//!
//! [[variants]]
//! name = "title-footer"
//! extends = "title"
//! remove_zones = ["subtitle"]
//! additional_zones = [{ name = "footer" }]
//! ```

use std::path::Path;

use ariadne::{Color, Label, Report, ReportKind, Source};
use serde::Deserialize;
use thiserror::Error;

use crate::catalog::LayoutCatalog;
use crate::composer::validate_variant;
use crate::layout::{LayoutDefinition, LayoutSource, LayoutVariant};

/// Errors that can occur when loading a layout pack
#[derive(Error, Debug)]
pub enum PackError {
    #[error("Failed to read layout pack file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse layout pack TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid layout '{name}': {}", problems.join("; "))]
    InvalidLayout { name: String, problems: Vec<String> },
}

impl PackError {
    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let span = match self {
            PackError::ParseError(err) => err.span(),
            _ => None,
        };
        let Some(span) = span else {
            return format!("{}: {}", filename, self);
        };
        let message = match self {
            PackError::ParseError(err) => err.message().to_string(),
            other => other.to_string(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(&message)
            .with_label(
                Label::new((filename, span.clone()))
                    .with_message(&message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);
        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("{}: {}", filename, self),
        }
    }
}

/// A set of layouts and variants supplied by a theme or a deck
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutPack {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Complete layouts, tagged as theme-tier
    pub layouts: Vec<LayoutDefinition>,
    /// Variants, tagged as deck-tier
    pub variants: Vec<LayoutVariant>,
}

/// TOML structure for deserializing layout packs
#[derive(Deserialize)]
struct TomlPack {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    layouts: Vec<LayoutDefinition>,
    #[serde(default)]
    variants: Vec<LayoutVariant>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

impl LayoutPack {
    /// Load a layout pack from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, PackError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a layout pack from a TOML string
    ///
    /// Every layout and variant is validated with the composer's rules.
    pub fn from_str(content: &str) -> Result<Self, PackError> {
        let parsed: TomlPack = toml::from_str(content)?;

        let layouts: Vec<LayoutDefinition> = parsed
            .layouts
            .into_iter()
            .map(|layout| layout.with_source(LayoutSource::Theme))
            .collect();
        for layout in &layouts {
            if let Some(zone) = layout.duplicate_zone() {
                return Err(PackError::InvalidLayout {
                    name: layout.name.clone(),
                    problems: vec![format!("duplicate zone '{}'", zone)],
                });
            }
        }

        let mut variants = parsed.variants;
        for variant in &mut variants {
            variant.layout = variant.layout.clone().with_source(LayoutSource::Deck);
            let problems = validate_variant(variant);
            if !problems.is_empty() {
                return Err(PackError::InvalidLayout {
                    name: variant.name().to_string(),
                    problems,
                });
            }
        }

        Ok(LayoutPack {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            layouts,
            variants,
        })
    }

    /// Register this pack's complete layouts into one catalog tier
    pub fn register_layouts(&self, catalog: &mut LayoutCatalog, tier: LayoutSource) {
        for layout in &self.layouts {
            catalog.register_definition(layout.clone(), tier);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty() && self.variants.is_empty()
    }
}
