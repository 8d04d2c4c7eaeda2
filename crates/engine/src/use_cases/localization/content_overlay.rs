//! Content overlay: prioritized localization lookup.
//!
//! Text is resolved by walking the registered sources from highest to lowest
//! priority (adventures, then mods, then the base game) under the active
//! language. The first source whose tree resolves the whole dotted key to a
//! string wins; sources are never merged below the language root.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, warn};

use taleforge_domain::{ContentSource, LocalePayload, SourceChain, SourceInfo, SourceType};

use crate::infrastructure::placeholders::interpolate;
use crate::infrastructure::ports::DocumentStore;
use crate::infrastructure::settings::{EngineConfig, LOCALIZATION_FILE};

/// Substitution parameters for [`ContentOverlay::format`].
pub type Params = HashMap<String, String>;

/// Mutable overlay state. Guarded as a unit so a lookup never observes a
/// source list and cache from different generations.
struct OverlayInner {
    language: String,
    sources: SourceChain,
    /// `(language, key)` → resolved text, parameter-free lookups only
    cache: HashMap<(String, String), String>,
}

/// Process-wide localization registry.
///
/// Constructed once and shared by reference (`Arc<ContentOverlay>`). All
/// methods take `&self`; state lives behind a single mutex that is never
/// held across document reads.
pub struct ContentOverlay {
    store: Arc<dyn DocumentStore>,
    /// Base localization file, re-read on every reload
    base_path: Option<PathBuf>,
    inner: Mutex<OverlayInner>,
}

impl ContentOverlay {
    /// Create an overlay with the base source read from the configured path.
    ///
    /// A missing or unreadable base file registers an empty base source.
    pub fn new(store: Arc<dyn DocumentStore>, config: &EngineConfig) -> Self {
        let base_path = config.base_localization_path();
        let payload = read_payload(store.as_ref(), &base_path).unwrap_or_default();

        let mut sources = SourceChain::new();
        sources.insert(ContentSource::base(payload).with_origin(&base_path));

        Self {
            store,
            base_path: Some(base_path),
            inner: Mutex::new(OverlayInner {
                language: config.language().to_string(),
                sources,
                cache: HashMap::new(),
            }),
        }
    }

    /// Create an overlay with no sources and no backing base file.
    pub fn empty(store: Arc<dyn DocumentStore>, language: impl Into<String>) -> Self {
        Self {
            store,
            base_path: None,
            inner: Mutex::new(OverlayInner {
                language: language.into(),
                sources: SourceChain::new(),
                cache: HashMap::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, OverlayInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // === Lookup ===

    /// Localized text for `key`, or `[key]` when no source defines it.
    pub fn get(&self, key: &str) -> String {
        self.resolve(key, None, None)
    }

    /// Localized text for `key`, or `default` when no source defines it.
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.resolve(key, Some(default), None)
    }

    /// Localized text for `key` with `{name}` placeholders substituted.
    ///
    /// If a placeholder has no matching parameter the unsubstituted text is
    /// returned.
    pub fn format(&self, key: &str, params: &Params) -> String {
        self.resolve(key, None, Some(params))
    }

    /// Full lookup: optional default and optional parameters.
    ///
    /// Only parameter-free hits are cached; an empty parameter map counts as
    /// no parameters.
    pub fn resolve(&self, key: &str, default: Option<&str>, params: Option<&Params>) -> String {
        let params = params.filter(|p| !p.is_empty());

        let text = {
            let mut guard = self.lock();
            let inner = &mut *guard;
            let cache_key = (inner.language.clone(), key.to_string());

            let cached = match params {
                None => inner.cache.get(&cache_key).cloned(),
                Some(_) => None,
            };

            match cached {
                Some(hit) => Some(hit),
                None => {
                    let language = inner.language.as_str();
                    let found = inner
                        .sources
                        .first_match(|source| source.payload().resolve_text(language, key))
                        .map(str::to_string);
                    if let (Some(text), None) = (&found, params) {
                        inner.cache.insert(cache_key, text.clone());
                    }
                    found
                }
            }
        };

        let Some(text) = text else {
            return default.map_or_else(|| format!("[{}]", key), str::to_string);
        };
        let Some(params) = params else {
            return text;
        };

        match interpolate(&text, |name| params.get(name).cloned()) {
            Ok(formatted) => formatted,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to format localized text");
                text
            }
        }
    }

    /// Whether any source resolves `key` to text under the active language.
    pub fn has_key(&self, key: &str) -> bool {
        let inner = self.lock();
        let language = inner.language.as_str();
        inner
            .sources
            .first_match(|source| source.payload().resolve_text(language, key))
            .is_some()
    }

    /// Sequence leaf for `key` from the highest-priority source that has one.
    pub fn get_list(&self, key: &str) -> Option<Vec<String>> {
        let inner = self.lock();
        let language = inner.language.as_str();
        inner
            .sources
            .first_match(|source| source.payload().resolve_list(language, key))
            .map(<[String]>::to_vec)
    }

    /// Every text key across all sources for the active language, sorted,
    /// optionally restricted to those starting with `prefix`.
    pub fn list_keys(&self, prefix: Option<&str>) -> BTreeSet<String> {
        let inner = self.lock();
        let prefix = prefix.unwrap_or_default();
        inner
            .sources
            .iter()
            .flat_map(|source| source.payload().text_keys(&inner.language))
            .filter(|key| key.starts_with(prefix))
            .collect()
    }

    // === Sources ===

    /// Register a source, replacing any source with the same name.
    pub fn add_source(&self, source: ContentSource) {
        let mut inner = self.lock();
        debug!(
            source = %source.name(),
            priority = source.priority(),
            "Registering content source"
        );
        inner.sources.insert(source);
        inner.cache.clear();
    }

    /// Remove a source by name. No-op (apart from the cache) if absent.
    pub fn remove_source(&self, name: &str) {
        let mut inner = self.lock();
        if inner.sources.remove(name).is_some() {
            debug!(source = %name, "Removed content source");
        }
        inner.cache.clear();
    }

    /// Load `<dir>/localization.yaml` as `mod_<name>`.
    ///
    /// Returns whether a localization document was found and parsed; a
    /// missing one still registers an empty source so a later reload can
    /// pick the file up.
    pub fn load_mod(&self, name: &str, dir: &Path) -> bool {
        self.load_package(SourceType::Mod, name, dir)
    }

    /// Load `<dir>/localization.yaml` as `adventure_<name>`.
    pub fn load_adventure(&self, name: &str, dir: &Path) -> bool {
        self.load_package(SourceType::Adventure, name, dir)
    }

    pub fn unload_mod(&self, name: &str) {
        self.remove_source(&SourceType::Mod.source_name(name));
    }

    pub fn unload_adventure(&self, name: &str) {
        self.remove_source(&SourceType::Adventure.source_name(name));
    }

    fn load_package(&self, source_type: SourceType, name: &str, dir: &Path) -> bool {
        let path = dir.join(LOCALIZATION_FILE);
        let payload = read_payload(self.store.as_ref(), &path);
        let loaded = payload.is_some();

        let source = ContentSource::new(
            source_type.source_name(name),
            source_type,
            payload.unwrap_or_default(),
        )
        .with_origin(path);
        self.add_source(source);
        loaded
    }

    // === Language & Reload ===

    /// Active language code.
    pub fn language(&self) -> String {
        self.lock().language.clone()
    }

    /// Switch the active language and re-read every file-backed source.
    ///
    /// Switching to the language already active does nothing.
    pub fn set_language(&self, language: &str) {
        if self.lock().language == language {
            debug!(language = %language, "Language unchanged, skipping reload");
            return;
        }
        self.reload_with(Some(language));
    }

    /// Re-read the base file and every file-backed mod/adventure source.
    pub fn reload(&self) {
        self.reload_with(None);
    }

    /// Files are read outside the lock; the refreshed payloads, the language
    /// change and the cache clear are then applied in one critical section.
    /// A source re-registered from another file while the reads ran keeps its
    /// new payload.
    fn reload_with(&self, language: Option<&str>) {
        let origins: Vec<(String, PathBuf)> = {
            let inner = self.lock();
            inner
                .sources
                .iter()
                .filter_map(|s| Some((s.name().to_string(), s.origin()?.to_path_buf())))
                .collect()
        };

        let refreshed: Vec<(String, PathBuf, LocalePayload)> = origins
            .into_iter()
            .map(|(name, path)| {
                let payload = read_payload(self.store.as_ref(), &path).unwrap_or_default();
                (name, path, payload)
            })
            .collect();

        // Base source comes back even if it was removed
        let base_name = SourceType::Base.source_name("");
        let restored_base = match &self.base_path {
            Some(path) if !refreshed.iter().any(|(name, _, _)| *name == base_name) => {
                let payload = read_payload(self.store.as_ref(), path).unwrap_or_default();
                Some(ContentSource::base(payload).with_origin(path))
            }
            _ => None,
        };

        let mut inner = self.lock();
        for (name, path, payload) in refreshed {
            if !inner.sources.update_payload(&name, &path, payload) {
                debug!(source = %name, "Source changed during reload, keeping current payload");
            }
        }
        if let Some(base) = restored_base {
            if inner.sources.get(&base_name).is_none() {
                inner.sources.insert(base);
            }
        }
        if let Some(language) = language {
            inner.language = language.to_string();
        }
        inner.cache.clear();
        debug!(
            language = %inner.language,
            sources = inner.sources.len(),
            "Reloaded content sources"
        );
    }

    // === Diagnostics ===

    /// Registered sources, highest priority first.
    pub fn loaded_sources(&self) -> Vec<SourceInfo> {
        let inner = self.lock();
        inner
            .sources
            .iter()
            .map(|s| SourceInfo {
                name: s.name().to_string(),
                source_type: s.source_type(),
                priority: s.priority(),
                has_active_language: s.payload().has_language(&inner.language),
            })
            .collect()
    }

    /// Union of language codes across all sources, sorted.
    pub fn available_languages(&self) -> BTreeSet<String> {
        let inner = self.lock();
        inner
            .sources
            .iter()
            .flat_map(|s| s.payload().languages().map(str::to_string))
            .collect()
    }

    /// Number of cached lookups.
    pub fn cache_len(&self) -> usize {
        self.lock().cache.len()
    }

    /// Human-readable summary of the overlay state.
    pub fn debug_info(&self) -> String {
        let inner = self.lock();
        let mut lines = vec![
            format!("Active language: {}", inner.language),
            format!("Sources loaded: {}", inner.sources.len()),
            format!("Cache size: {}", inner.cache.len()),
            String::new(),
            "Sources (by priority):".to_string(),
        ];
        for source in inner.sources.iter() {
            let languages: Vec<&str> = source.payload().languages().collect();
            lines.push(format!(
                "  - {} (type: {}, priority: {}, languages: [{}])",
                source.name(),
                source.source_type(),
                source.priority(),
                languages.join(", ")
            ));
        }
        lines.join("\n")
    }
}

/// Read and convert one localization document.
///
/// `None` for a missing, unreadable or malformed document; each case is
/// logged.
fn read_payload(store: &dyn DocumentStore, path: &Path) -> Option<LocalePayload> {
    match store.read_document(path) {
        Ok(Some(document)) => match LocalePayload::from_document(&document) {
            Ok(payload) => Some(payload),
            Err(e) => {
                error!(path = %path.display(), error = %e, "Malformed localization document");
                None
            }
        },
        Ok(None) => {
            warn!(path = %path.display(), "Localization file not found");
            None
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to read localization file");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::documents::InMemoryDocumentStore;
    use crate::infrastructure::ports::{DocumentError, MockDocumentStore};
    use crate::test_fixtures::{
        adventure_localization, base_localization, documents, mod_localization,
    };
    use mockall::Sequence;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{OnceLock, Weak};

    fn payload(document: serde_json::Value) -> LocalePayload {
        LocalePayload::from_document(&document).unwrap()
    }

    fn overlay(language: &str) -> ContentOverlay {
        ContentOverlay::new(
            Arc::new(documents::store_with_base()),
            &documents::config(language),
        )
    }

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn resolves_from_base() {
        let overlay = overlay("en");
        assert_eq!(overlay.get("menu.continue"), "Continue");
        assert!(overlay.has_key("menu.quit"));
    }

    #[test]
    fn missing_key_uses_default_or_marker() {
        let overlay = overlay("en");
        assert_eq!(overlay.get("menu.load"), "[menu.load]");
        assert_eq!(overlay.get_or("menu.load", "Load"), "Load");
        assert!(!overlay.has_key("menu.load"));
        // Branches are not text
        assert_eq!(overlay.get("menu"), "[menu]");
    }

    #[test]
    fn higher_priority_wins_regardless_of_registration_order() {
        let overlay = overlay("en");
        overlay.add_source(ContentSource::for_adventure(
            "crypt",
            payload(adventure_localization()),
        ));
        overlay.add_source(ContentSource::for_mod("orcs", payload(mod_localization())));

        assert_eq!(overlay.get("menu.continue"), "Onward, adventurer");
        // Keys the adventure lacks fall through to the mod, then the base
        assert_eq!(overlay.get("races.orc"), "Orc");
        assert_eq!(overlay.get("menu.quit"), "Quit");
    }

    #[test]
    fn sources_are_not_merged_below_the_root() {
        let overlay = overlay("en");
        overlay.add_source(ContentSource::for_mod(
            "odd",
            payload(json!({"en": {"menu": "not a branch"}})),
        ));
        assert_eq!(overlay.get("menu.continue"), "Continue");
    }

    #[test]
    fn removing_sources_restores_fallback() {
        let overlay = overlay("en");
        overlay.add_source(ContentSource::for_mod("orcs", payload(mod_localization())));
        assert_eq!(overlay.get("menu.continue"), "Resume");

        overlay.remove_source("mod_orcs");
        assert_eq!(overlay.get("menu.continue"), "Continue");
        assert_eq!(overlay.get("races.orc"), "[races.orc]");

        overlay.remove_source("mod_never_loaded");
        assert_eq!(overlay.get("menu.continue"), "Continue");
    }

    #[test]
    fn cache_is_never_stale_after_mutation() {
        let overlay = overlay("en");
        assert_eq!(overlay.get("menu.continue"), "Continue");
        assert_eq!(overlay.cache_len(), 1);

        overlay.add_source(ContentSource::for_mod("orcs", payload(mod_localization())));
        assert_eq!(overlay.cache_len(), 0);
        assert_eq!(overlay.get("menu.continue"), "Resume");

        overlay.set_language("ru");
        assert_eq!(overlay.cache_len(), 0);
        assert_eq!(overlay.get("menu.continue"), "Продолжить");
    }

    #[test]
    fn misses_and_parameterized_lookups_are_not_cached() {
        let overlay = overlay("en");
        overlay.get("nope");
        overlay.format("greeting", &params(&[("name", "Arwen")]));
        assert_eq!(overlay.cache_len(), 0);
    }

    #[test]
    fn format_substitutes_parameters() {
        let overlay = overlay("en");
        assert_eq!(
            overlay.format("greeting", &params(&[("name", "Arwen")])),
            "Hello, Arwen!"
        );
        assert_eq!(
            overlay.format("combat.hit", &params(&[("damage", "5"), ("target", "Goblin")])),
            "You deal 5 damage to Goblin"
        );
    }

    #[test]
    fn format_with_missing_parameter_returns_raw_text() {
        let overlay = overlay("en");
        assert_eq!(
            overlay.format("greeting", &params(&[("other", "x")])),
            "Hello, {name}!"
        );
        // Empty params behave like a plain lookup
        assert_eq!(overlay.format("greeting", &Params::new()), "Hello, {name}!");
        assert_eq!(overlay.cache_len(), 1);
    }

    #[test]
    fn format_of_missing_key_is_marker_or_default() {
        let overlay = overlay("en");
        assert_eq!(
            overlay.format("menu.load", &params(&[("x", "y")])),
            "[menu.load]"
        );
        assert_eq!(
            overlay.resolve("menu.load", Some("Load"), Some(&params(&[("x", "y")]))),
            "Load"
        );
    }

    #[test]
    fn list_keys_unions_sources_and_filters_prefix() {
        let overlay = overlay("en");
        overlay.add_source(ContentSource::for_mod("orcs", payload(mod_localization())));

        let menu: Vec<String> = overlay.list_keys(Some("menu.")).into_iter().collect();
        assert_eq!(menu, vec!["menu.continue", "menu.new_game", "menu.quit"]);

        let all = overlay.list_keys(None);
        assert!(all.contains("races.orc"));
        assert!(all.contains("greeting"));
        // Sequence leaves are not text keys
        assert!(!all.contains("hints"));
    }

    #[test]
    fn get_list_resolves_sequences() {
        let overlay = overlay("en");
        assert_eq!(
            overlay.get_list("hints"),
            Some(vec!["Rest to recover".to_string(), "Elves do not sleep".to_string()])
        );
        assert_eq!(overlay.get_list("menu.continue"), None);
    }

    #[test]
    fn missing_base_file_gives_empty_but_functional_overlay() {
        let overlay = ContentOverlay::new(
            Arc::new(InMemoryDocumentStore::new()),
            &documents::config("en"),
        );
        assert_eq!(overlay.get("menu.continue"), "[menu.continue]");
        let sources = overlay.loaded_sources();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].name, "base");
        assert!(!sources[0].has_active_language);
    }

    #[test]
    fn load_and_unload_packages() {
        let store = Arc::new(documents::store_with_base());
        store.insert("data/mods/orcs/localization.yaml", mod_localization());
        store.insert(
            "data/adventures/crypt/localization.yaml",
            adventure_localization(),
        );
        let overlay = ContentOverlay::new(store, &documents::config("en"));

        assert!(overlay.load_mod("orcs", Path::new("data/mods/orcs")));
        assert!(overlay.load_adventure("crypt", Path::new("data/adventures/crypt")));
        assert!(!overlay.load_mod("ghost", Path::new("data/mods/ghost")));

        let names: Vec<String> = overlay.loaded_sources().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["adventure_crypt", "mod_orcs", "mod_ghost", "base"]);
        assert_eq!(overlay.get("menu.continue"), "Onward, adventurer");

        overlay.unload_adventure("crypt");
        assert_eq!(overlay.get("menu.continue"), "Resume");
        overlay.unload_mod("orcs");
        assert_eq!(overlay.get("menu.continue"), "Continue");
    }

    #[test]
    fn set_language_rereads_package_files() {
        let store = Arc::new(documents::store_with_base());
        store.insert("data/mods/orcs/localization.yaml", mod_localization());
        let overlay = ContentOverlay::new(store.clone(), &documents::config("en"));
        overlay.load_mod("orcs", Path::new("data/mods/orcs"));

        // The mod ships a Russian translation after it was loaded
        store.insert(
            "data/mods/orcs/localization.yaml",
            json!({"ru": {"menu": {"continue": "Дальше"}}}),
        );
        overlay.set_language("ru");

        assert_eq!(overlay.language(), "ru");
        assert_eq!(overlay.get("menu.continue"), "Дальше");
        assert_eq!(overlay.get("menu.quit"), "Выход");
    }

    #[test]
    fn in_memory_sources_survive_reload() {
        let overlay = overlay("en");
        overlay.add_source(ContentSource::for_mod("orcs", payload(mod_localization())));
        overlay.reload();
        assert_eq!(overlay.get("menu.continue"), "Resume");
    }

    #[test]
    fn reload_restores_removed_base() {
        let overlay = overlay("en");
        overlay.remove_source("base");
        assert_eq!(overlay.get("menu.continue"), "[menu.continue]");
        overlay.reload();
        assert_eq!(overlay.get("menu.continue"), "Continue");
    }

    /// Re-registers `mod_orcs` from `mods/b` the first time `mods/a` is read
    /// after being armed.
    struct ReregisteringStore {
        documents: InMemoryDocumentStore,
        overlay: OnceLock<Weak<ContentOverlay>>,
        armed: AtomicBool,
    }

    impl DocumentStore for ReregisteringStore {
        fn read_document(&self, path: &Path) -> Result<Option<serde_json::Value>, DocumentError> {
            let trigger = path == Path::new("mods/a/localization.yaml")
                && self.armed.swap(false, Ordering::SeqCst);
            if trigger {
                if let Some(overlay) = self.overlay.get().and_then(Weak::upgrade) {
                    overlay.load_mod("orcs", Path::new("mods/b"));
                }
            }
            self.documents.read_document(path)
        }
    }

    #[test]
    fn reload_keeps_source_reregistered_while_reading() {
        let store = Arc::new(ReregisteringStore {
            documents: InMemoryDocumentStore::new()
                .with_document("mods/a/localization.yaml", json!({"en": {"greeting": "From A"}}))
                .with_document("mods/b/localization.yaml", json!({"en": {"greeting": "From B"}})),
            overlay: OnceLock::new(),
            armed: AtomicBool::new(false),
        });
        let overlay = Arc::new(ContentOverlay::empty(store.clone(), "en"));
        assert!(store.overlay.set(Arc::downgrade(&overlay)).is_ok());

        overlay.load_mod("orcs", Path::new("mods/a"));
        assert_eq!(overlay.get("greeting"), "From A");

        store.armed.store(true, Ordering::SeqCst);
        overlay.reload();
        assert_eq!(overlay.get("greeting"), "From B");

        // The new registration is the one later reloads refresh
        overlay.reload();
        assert_eq!(overlay.get("greeting"), "From B");
    }

    #[test]
    fn set_language_to_active_language_does_not_reload() {
        let mut store = MockDocumentStore::new();
        store
            .expect_read_document()
            .times(1)
            .returning(|_| Ok(Some(base_localization())));
        let overlay = ContentOverlay::new(Arc::new(store), &documents::config("en"));

        assert_eq!(overlay.get("menu.continue"), "Continue");
        overlay.set_language("en");
        assert_eq!(overlay.cache_len(), 1);
    }

    #[test]
    fn set_language_reads_base_again() {
        let mut seq = Sequence::new();
        let mut store = MockDocumentStore::new();
        store
            .expect_read_document()
            .withf(|path| path == Path::new("data/yaml/localization.yaml"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some(json!({"en": {"title": "Old"}}))));
        store
            .expect_read_document()
            .withf(|path| path == Path::new("data/yaml/localization.yaml"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some(json!({"de": {"title": "Neu"}}))));

        let overlay = ContentOverlay::new(Arc::new(store), &documents::config("en"));
        assert_eq!(overlay.get("title"), "Old");
        overlay.set_language("de");
        assert_eq!(overlay.get("title"), "Neu");
    }

    #[test]
    fn unreadable_document_degrades_to_empty() {
        let mut store = MockDocumentStore::new();
        store.expect_read_document().returning(|path| {
            Err(DocumentError::malformed(path, "truncated"))
        });
        let overlay = ContentOverlay::new(Arc::new(store), &documents::config("en"));
        assert_eq!(overlay.get("menu.continue"), "[menu.continue]");
        assert!(!overlay.load_mod("orcs", Path::new("data/mods/orcs")));
    }

    #[test]
    fn non_mapping_document_degrades_to_empty() {
        let store = InMemoryDocumentStore::new()
            .with_document("data/yaml/localization.yaml", json!(["en", "ru"]));
        let overlay = ContentOverlay::new(Arc::new(store), &documents::config("en"));
        assert!(overlay.list_keys(None).is_empty());
    }

    #[test]
    fn diagnostics_describe_sources() {
        let overlay = overlay("en");
        overlay.add_source(ContentSource::for_mod("orcs", payload(mod_localization())));

        let languages: Vec<String> = overlay.available_languages().into_iter().collect();
        assert_eq!(languages, vec!["en", "ru"]);

        let info = overlay.debug_info();
        assert!(info.contains("Active language: en"));
        assert!(info.contains("Sources loaded: 2"));
        assert!(info.contains("  - mod_orcs (type: mod, priority: 100, languages: [en])"));
        assert!(info.contains("  - base (type: base, priority: 0, languages: [en, ru])"));
    }

    #[test]
    fn empty_overlay_has_no_sources() {
        let overlay = ContentOverlay::empty(Arc::new(InMemoryDocumentStore::new()), "en");
        assert!(overlay.loaded_sources().is_empty());
        overlay.add_source(ContentSource::base(payload(base_localization())));
        assert_eq!(overlay.get("menu.new_game"), "New game");
        // No base file to restore from
        overlay.reload();
        assert_eq!(overlay.get("menu.new_game"), "New game");
    }

    #[test]
    fn concurrent_lookups_and_mutations() {
        let overlay = Arc::new(overlay("en"));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let overlay = Arc::clone(&overlay);
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        if i == 0 {
                            overlay.add_source(ContentSource::for_mod(
                                "orcs",
                                payload(mod_localization()),
                            ));
                            overlay.remove_source("mod_orcs");
                        } else {
                            let text = overlay.get("menu.continue");
                            assert!(text == "Continue" || text == "Resume");
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(overlay.get("menu.continue"), "Continue");
    }
}
