//! Built-in slide layouts registered in the system tier

use crate::catalog::LayoutCatalog;
use crate::layout::{LayoutDefinition, LayoutSource, Zone};

/// All built-in layouts, in registration order
pub fn builtin_layouts() -> Vec<LayoutDefinition> {
    vec![
        LayoutDefinition::new("title")
            .with_description("Title slide with optional subtitle")
            .with_zone(Zone::new("title").with_description("Main title"))
            .with_zone(Zone::new("subtitle").with_description("Subtitle or author line"))
            .with_grid_areas("\"title\" \"subtitle\"")
            .with_grid_rows("2fr 1fr"),
        LayoutDefinition::new("section")
            .with_description("Section divider")
            .with_zone(Zone::new("heading").with_description("Section heading"))
            .with_zone(Zone::new("subheading"))
            .with_grid_areas("\"heading\" \"subheading\"")
            .with_grid_rows("auto auto"),
        LayoutDefinition::new("content")
            .with_description("Title with a single content area")
            .with_zone(Zone::new("title"))
            .with_zone(Zone::new("body").with_description("Main content"))
            .with_grid_areas("\"title\" \"body\"")
            .with_grid_rows("auto 1fr"),
        LayoutDefinition::new("two-column")
            .with_description("Title above two equal columns")
            .with_zone(Zone::new("title"))
            .with_zone(Zone::new("left").with_description("Left column"))
            .with_zone(Zone::new("right").with_description("Right column"))
            .with_grid_areas("\"title title\" \"left right\"")
            .with_grid_columns("1fr 1fr")
            .with_grid_rows("auto 1fr"),
        LayoutDefinition::new("image-text")
            .with_description("Image beside explanatory text")
            .with_zone(Zone::new("title"))
            .with_zone(Zone::new("image").with_grid_area("media"))
            .with_zone(Zone::new("text"))
            .with_grid_areas("\"title title\" \"media text\"")
            .with_grid_columns("3fr 2fr")
            .with_grid_rows("auto 1fr"),
        LayoutDefinition::new("quote")
            .with_description("Centered quotation")
            .with_zone(Zone::new("quote"))
            .with_zone(Zone::new("attribution"))
            .with_grid_areas("\"quote\" \"attribution\"")
            .with_grid_rows("1fr auto")
            .with_style("text-align", "center"),
        LayoutDefinition::new("code")
            .with_description("Title with a code listing")
            .with_zone(Zone::new("title"))
            .with_zone(Zone::new("code").with_description("Source listing"))
            .with_grid_areas("\"title\" \"code\"")
            .with_grid_rows("auto 1fr"),
        LayoutDefinition::new("blank")
            .with_description("Single full-bleed area")
            .with_zone(Zone::new("content"))
            .with_grid_areas("\"content\""),
    ]
}

/// Register every built-in layout in the system tier
pub fn register_builtins(catalog: &mut LayoutCatalog) {
    for layout in builtin_layouts() {
        catalog.register_definition(layout, LayoutSource::System);
    }
}
