//! Slide Layouts CLI
//!
//! Usage:
//!   slide-layouts [OPTIONS] [NAME]
//!
//! Options:
//!   -t, --theme <FILE>     Theme layout pack (TOML)
//!   -k, --deck <FILE>      Deck layout pack (TOML)
//!   -l, --list             List every visible layout and its tier
//!   -c, --compare <OTHER>  Compare zone grid areas of NAME against OTHER
//!   -d, --debug            Enable debug logging
//!   -h, --help             Print help

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use slide_layouts::{
    check_layout_compatibility, LayoutCatalog, LayoutPack, LayoutResolver, LayoutSource,
};

#[derive(Parser)]
#[command(name = "slide-layouts")]
#[command(about = "Resolve slide layouts from built-in, theme, and deck tiers")]
struct Cli {
    /// Layout to resolve
    name: Option<String>,

    /// Theme layout pack (TOML format)
    #[arg(short, long)]
    theme: Option<PathBuf>,

    /// Deck layout pack (TOML format)
    #[arg(short = 'k', long)]
    deck: Option<PathBuf>,

    /// List every visible layout and the tier it resolves from
    #[arg(short, long)]
    list: bool,

    /// Compare the zone grid areas of NAME against another layout
    #[arg(short, long, value_name = "OTHER")]
    compare: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let theme = load_pack(cli.theme.as_deref());
    let deck = load_pack(cli.deck.as_deref());
    let mut resolver = LayoutResolver::new(LayoutCatalog::with_builtins());

    if cli.list {
        print_list(&resolver, &theme, &deck);
        return;
    }

    let Some(name) = cli.name else {
        eprintln!("Error: a layout name is required (see --help)");
        std::process::exit(2);
    };

    let layout = match resolver.resolve_layout(&name, &deck.variants, &theme.layouts) {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(other) = cli.compare {
        let other_layout = match resolver.resolve_layout(&other, &deck.variants, &theme.layouts) {
            Ok(layout) => layout,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        };
        let report = check_layout_compatibility(&layout, &other_layout);
        for zone in &report.shared {
            let status = if zone.conflicts() { "conflict" } else { "ok" };
            println!(
                "{}\t{}\t{}\t{}",
                zone.name, zone.left_area, zone.right_area, status
            );
        }
        if !report.is_compatible() {
            std::process::exit(1);
        }
        return;
    }

    match toml::to_string_pretty(&*layout) {
        Ok(text) => print!("{}", text),
        Err(e) => {
            eprintln!("Error serializing layout '{}': {}", name, e);
            std::process::exit(1);
        }
    }
}

/// Load a layout pack, exiting with a formatted report on failure
fn load_pack(path: Option<&Path>) -> LayoutPack {
    let Some(path) = path else {
        return LayoutPack::default();
    };

    let source = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading layout pack '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    };

    match LayoutPack::from_str(&source) {
        Ok(pack) => pack,
        Err(e) => {
            eprint!("{}", e.format(&source, &path.display().to_string()));
            std::process::exit(1);
        }
    }
}

fn print_list(resolver: &LayoutResolver, theme: &LayoutPack, deck: &LayoutPack) {
    let mut visible: BTreeMap<String, LayoutSource> = BTreeMap::new();
    for name in resolver.catalog().list_names() {
        if let Some(layout) = resolver.catalog().lookup(&name) {
            let source = layout.source;
            visible.insert(name, source);
        }
    }
    for layout in &theme.layouts {
        visible.insert(layout.name.clone(), LayoutSource::Theme);
    }
    for variant in &deck.variants {
        visible.insert(variant.name().to_string(), LayoutSource::Deck);
    }

    for (name, source) in visible {
        println!("{}\t{}", name, source);
    }
}
