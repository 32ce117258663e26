//! Integration tests for TOML layout packs

use pretty_assertions::assert_eq;
use slide_layouts::{
    has_required_zones, resolve_with_packs, LayoutCatalog, LayoutPack, LayoutResolver,
    LayoutSource, PackError,
};

const THEME: &str = include_str!("fixtures/theme.toml");
const DECK: &str = include_str!("fixtures/deck.toml");

fn packs() -> (LayoutPack, LayoutPack) {
    let theme = LayoutPack::from_str(THEME).expect("Theme fixture should parse");
    let deck = LayoutPack::from_str(DECK).expect("Deck fixture should parse");
    (theme, deck)
}

#[test]
fn test_fixture_metadata() {
    let (theme, deck) = packs();
    assert_eq!(theme.name.as_deref(), Some("Harbor"));
    assert_eq!(theme.layouts.len(), 2);
    assert!(theme.variants.is_empty());
    assert_eq!(deck.name.as_deref(), Some("Quarterly review"));
    assert_eq!(deck.variants.len(), 3);
    assert_eq!(deck.variants[0].overrides.as_deref(), Some("title"));
}

#[test]
fn test_deck_variant_extends_theme_layout() {
    let (theme, deck) = packs();
    let cover = resolve_with_packs("cover", &theme, &deck).unwrap();

    assert_eq!(cover.zone_names(), vec!["title", "brand", "date"]);
    assert_eq!(cover.find_zone("brand").unwrap().area(), "footer");
    assert_eq!(
        cover.find_zone("brand").unwrap().description.as_deref(),
        Some("Logo strip")
    );
    assert_eq!(cover.description, "Full-bleed title");
    assert_eq!(cover.grid_template_rows.as_deref(), Some("3fr 1fr auto"));
    assert_eq!(
        cover.style.as_ref().and_then(|s| s.get("background")).map(String::as_str),
        Some("#0b1d2a")
    );
    assert_eq!(cover.source, LayoutSource::Deck);
}

#[test]
fn test_deck_variant_composes_theme_and_builtin() {
    let (theme, deck) = packs();
    let metrics = resolve_with_packs("metrics", &theme, &deck).unwrap();

    assert_eq!(metrics.zone_names(), vec!["title", "body", "aside", "quote"]);
    assert_eq!(
        metrics.grid_template_areas.as_deref(),
        Some("\"title title\" \"body aside\" \"quote quote\"")
    );
    assert_eq!(metrics.grid_template_columns.as_deref(), Some("3fr 1fr"));
    assert!(has_required_zones(&metrics, &["body", "quote"]));
}

#[test]
fn test_standalone_deck_layout() {
    let (theme, deck) = packs();
    let agenda = resolve_with_packs("agenda", &theme, &deck).unwrap();
    assert_eq!(agenda.zone_names(), vec!["heading", "items"]);
    assert_eq!(agenda.priority, 100);
}

#[test]
fn test_theme_layout_shadows_builtin_without_deck() {
    let (theme, _) = packs();
    let title = resolve_with_packs("title", &theme, &LayoutPack::default()).unwrap();
    assert_eq!(title.zone_names(), vec!["title", "subtitle", "brand"]);
    assert_eq!(title.source, LayoutSource::Theme);
}

#[test]
fn test_unloading_deck_tier_keeps_theme() {
    let (theme, _) = packs();
    let mut catalog = LayoutCatalog::with_builtins();
    theme.register_layouts(&mut catalog, LayoutSource::Theme);
    theme.register_layouts(&mut catalog, LayoutSource::Deck);

    let mut resolver = LayoutResolver::new(catalog);
    assert_eq!(resolver.resolve("sidebar").unwrap().source, LayoutSource::Deck);

    resolver.catalog_mut().clear_tier(LayoutSource::Deck);
    assert_eq!(resolver.resolve("sidebar").unwrap().source, LayoutSource::Theme);
    assert_eq!(resolver.resolve("content").unwrap().source, LayoutSource::System);
}

#[test]
fn test_invalid_pack_reports_every_problem() {
    let source = r#"
[[variants]]
name = "broken"
extends = "title"
compose_from = ["content"]
remove_zones = ["footer"]
additional_zones = [{ name = "footer" }]
"#;
    match LayoutPack::from_str(source).unwrap_err() {
        PackError::InvalidLayout { name, problems } => {
            assert_eq!(name, "broken");
            assert_eq!(problems.len(), 2);
            assert!(problems[1].contains("'footer'"));
        }
        other => panic!("Expected InvalidLayout, got {:?}", other),
    }
}
