//! Taleforge Engine - diagnostics entry point.
//!
//! Loads the configured data directory (base localization, every installed
//! mod and adventure, the race catalog) and prints what the engine resolves.

use std::collections::BTreeMap;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taleforge_domain::{Attribute, FeatureDefinition};
use taleforge_engine::infrastructure::content_dirs::discover_packages;
use taleforge_engine::infrastructure::documents::FsDocumentStore;
use taleforge_engine::infrastructure::ports::DocumentStore;
use taleforge_engine::use_cases::localization::Params;
use taleforge_engine::{ContentOverlay, EngineConfig, RaceResolver};

#[derive(Parser, Debug)]
#[command(version, about = "Inspect localization sources and the race catalog", long_about = None)]
struct Args {
    /// Language to resolve text in (overrides TALEFORGE_LANGUAGE)
    #[arg(short, long)]
    language: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List races with effective bonuses and unique subrace features
    Races,
    /// List localization keys, optionally filtered by prefix
    Keys { prefix: Option<String> },
    /// Resolve one localization key
    Get {
        key: String,
        /// Substitution parameters as name=value
        #[arg(value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Show registered localization sources
    Sources,
}

fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taleforge_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let store: Arc<dyn DocumentStore> = Arc::new(FsDocumentStore::new());
    let mut config = EngineConfig::from_env(store.as_ref());
    if let Some(language) = args.language {
        config = EngineConfig::new(config.data_dir(), language);
    }
    tracing::info!(
        data_dir = %config.data_dir().display(),
        language = %config.language(),
        "Starting Taleforge Engine"
    );

    let overlay = ContentOverlay::new(Arc::clone(&store), &config);
    for package in discover_packages(&config.mods_dir()) {
        overlay.load_mod(&package.name, &package.dir);
    }
    for package in discover_packages(&config.adventures_dir()) {
        overlay.load_adventure(&package.name, &package.dir);
    }

    match args.command {
        Commands::Races => {
            let resolver = RaceResolver::from_config(store, &config);
            print_races(&resolver, &overlay);
        }
        Commands::Keys { prefix } => {
            for key in overlay.list_keys(prefix.as_deref()) {
                println!("{key}");
            }
        }
        Commands::Get { key, params } => {
            let params: Params = params.into_iter().collect();
            println!("{}", overlay.format(&key, &params));
        }
        Commands::Sources => println!("{}", overlay.debug_info()),
    }

    Ok(())
}

fn print_races(resolver: &RaceResolver, overlay: &ContentOverlay) {
    let catalog = resolver.load_catalog();
    if catalog.is_empty() {
        println!("No races found");
        return;
    }

    for race in catalog.races() {
        let name = overlay.get_or(&format!("races.{}", race.key), &race.name);
        println!("{name} ({})", race.key);
        let summary = race.short_description();
        if !summary.is_empty() {
            println!("  {summary}");
        }
        println!("  bonuses: {}", format_bonuses(&race.effective_bonuses(None)));
        print_features("  ", &race.features);

        for subrace in race.subraces.values() {
            println!("  - {} ({})", subrace.name, subrace.key);
            println!(
                "    bonuses: {}",
                format_bonuses(&race.effective_bonuses(Some(subrace)))
            );
            print_features("    ", &subrace.features);
        }
    }
}

fn print_features(indent: &str, features: &[FeatureDefinition]) {
    for feature in features {
        println!("{indent}* {} [{}]", feature.name, feature.feature_type());
    }
}

fn format_bonuses(bonuses: &BTreeMap<Attribute, i32>) -> String {
    if bonuses.is_empty() {
        return "none".to_string();
    }
    bonuses
        .iter()
        .map(|(attribute, value)| format!("{} {:+}", attribute.abbreviation(), value))
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got `{raw}`"))
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
