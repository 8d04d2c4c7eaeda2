//! Race resolver: memoized access to the parsed race catalog.

use serde_json::Value;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, error, warn};

use taleforge_domain::{
    AttributeBonuses, FeatureDefinition, FeatureTemplate, RaceCatalog, RaceDefinition,
    SubraceDefinition,
};

use crate::infrastructure::importers::RaceCatalogImporter;
use crate::infrastructure::ports::DocumentStore;
use crate::infrastructure::settings::EngineConfig;

/// Where the catalog document comes from.
enum CatalogSource {
    File {
        store: Arc<dyn DocumentStore>,
        path: PathBuf,
    },
    Document(Value),
}

/// Parses the race catalog once and serves races, subraces and templates.
///
/// The parsed catalog is shared as `Arc<RaceCatalog>`; repeated
/// [`load_catalog`](Self::load_catalog) calls return the same instance until
/// [`clear_cache`](Self::clear_cache).
pub struct RaceResolver {
    source: CatalogSource,
    catalog: RwLock<Option<Arc<RaceCatalog>>>,
}

impl RaceResolver {
    /// Resolver reading the catalog at `path` through `store`.
    pub fn new(store: Arc<dyn DocumentStore>, path: impl Into<PathBuf>) -> Self {
        Self::with_source(CatalogSource::File {
            store,
            path: path.into(),
        })
    }

    /// Resolver reading the configured catalog path.
    pub fn from_config(store: Arc<dyn DocumentStore>, config: &EngineConfig) -> Self {
        Self::new(store, config.race_catalog_path())
    }

    /// Resolver over an already-parsed catalog document.
    pub fn from_document(document: Value) -> Self {
        Self::with_source(CatalogSource::Document(document))
    }

    fn with_source(source: CatalogSource) -> Self {
        Self {
            source,
            catalog: RwLock::new(None),
        }
    }

    /// The parsed catalog, parsing on first use.
    ///
    /// A missing or malformed document yields an empty catalog (logged), which
    /// is memoized like any other result.
    pub fn load_catalog(&self) -> Arc<RaceCatalog> {
        if let Some(catalog) = self
            .catalog
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Arc::clone(catalog);
        }

        let mut slot = self.catalog.write().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have parsed while we waited for the write lock
        if let Some(catalog) = slot.as_ref() {
            return Arc::clone(catalog);
        }
        let catalog = Arc::new(self.parse());
        *slot = Some(Arc::clone(&catalog));
        catalog
    }

    /// Drop the memoized catalog; the next access re-parses.
    pub fn clear_cache(&self) {
        *self.catalog.write().unwrap_or_else(PoisonError::into_inner) = None;
        debug!("Race catalog cache cleared");
    }

    fn parse(&self) -> RaceCatalog {
        let document = match &self.source {
            CatalogSource::Document(document) => document.clone(),
            CatalogSource::File { store, path } => match store.read_document(path) {
                Ok(Some(document)) => document,
                Ok(None) => {
                    warn!(path = %path.display(), "Race catalog not found, using empty catalog");
                    return RaceCatalog::empty();
                }
                Err(e) => {
                    error!(path = %path.display(), error = %e, "Failed to read race catalog");
                    return RaceCatalog::empty();
                }
            },
        };

        RaceCatalogImporter::import(&document).unwrap_or_else(|e| {
            error!(error = %e, "Malformed race catalog, using empty catalog");
            RaceCatalog::empty()
        })
    }

    // === Queries ===

    pub fn get_race(&self, key: &str) -> Option<RaceDefinition> {
        self.load_catalog().race(key).cloned()
    }

    pub fn get_subrace(&self, race_key: &str, subrace_key: &str) -> Option<SubraceDefinition> {
        self.load_catalog().subrace(race_key, subrace_key).cloned()
    }

    /// Race keys in catalog order.
    pub fn race_keys(&self) -> Vec<String> {
        self.load_catalog().race_keys().map(str::to_string).collect()
    }

    pub fn template(&self, name: &str) -> Option<FeatureTemplate> {
        self.load_catalog().template(name).cloned()
    }

    /// Bonuses of `race` combined with `subrace`, see
    /// [`RaceDefinition::effective_bonuses`].
    pub fn effective_bonuses(
        &self,
        race: &RaceDefinition,
        subrace: Option<&SubraceDefinition>,
    ) -> AttributeBonuses {
        race.effective_bonuses(subrace)
    }

    /// Features of `race` followed by the unique features of `subrace`.
    pub fn effective_features(
        &self,
        race: &RaceDefinition,
        subrace: Option<&SubraceDefinition>,
    ) -> Vec<FeatureDefinition> {
        race.effective_features(subrace)
    }
}
