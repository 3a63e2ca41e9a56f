// Locale registry. The table is compiled in; translation bundles load
// lazily from disk on first use. Persisted locale ids use underscores,
// registry keys use dashes.

use crate::storage::{LocalStorage, KEY_APP_LANGUAGE};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Language {
    pub name: &'static str,
    pub emoji: &'static str,
    pub contributors: &'static [&'static str],
}

pub static LANGUAGES: Lazy<BTreeMap<&'static str, Language>> = Lazy::new(|| {
    BTreeMap::from([
        (
            "en-gb",
            Language {
                name: "English (British)",
                emoji: "\u{1F1EC}\u{1F1E7}",
                contributors: &["asterleen"],
            },
        ),
        (
            "en-us",
            Language {
                name: "English (American)",
                emoji: "\u{1F1FA}\u{1F1F8}",
                contributors: &["asterleen", "corvid"],
            },
        ),
        (
            "de-de",
            Language {
                name: "German",
                emoji: "\u{1F1E9}\u{1F1EA}",
                contributors: &["corvid"],
            },
        ),
        (
            "fr-fr",
            Language {
                name: "French",
                emoji: "\u{1F1EB}\u{1F1F7}",
                contributors: &["mlle_val"],
            },
        ),
        (
            "nl-nl",
            Language {
                name: "Dutch",
                emoji: "\u{1F1F3}\u{1F1F1}",
                contributors: &["driekus"],
            },
        ),
        (
            "pl-pl",
            Language {
                name: "Polish",
                emoji: "\u{1F1F5}\u{1F1F1}",
                contributors: &["wojtek_b", "kasia"],
            },
        ),
        (
            "pt-br",
            Language {
                name: "Brazilian Portuguese",
                emoji: "\u{1F1E7}\u{1F1F7}",
                contributors: &["lucashqz"],
            },
        ),
        (
            "tr-tr",
            Language {
                name: "Turkish",
                emoji: "\u{1F1F9}\u{1F1F7}",
                contributors: &["emir_s"],
            },
        ),
    ])
});

/// Runtime locale id: underscores, as persisted.
pub fn to_storage_key(key: &str) -> String {
    key.replace('-', "_")
}

/// Registry key: dashes, as in the table and the bundle filenames.
pub fn to_registry_key(key: &str) -> String {
    key.replace('_', "-")
}

/// Lazily loading locale bundle cache. One instance lives on the App.
pub struct LocaleRegistry {
    bundles_dir: PathBuf,
    loaded: HashMap<String, Arc<Value>>,
}

impl LocaleRegistry {
    pub fn new(bundles_dir: PathBuf) -> Self {
        Self {
            bundles_dir,
            loaded: HashMap::new(),
        }
    }

    pub fn language(key: &str) -> Option<&'static Language> {
        LANGUAGES.get(to_registry_key(key).as_str())
    }

    /// The active locale, normalized to the underscore convention.
    pub fn current_language(storage: &LocalStorage) -> Option<String> {
        storage.get_string(KEY_APP_LANGUAGE).map(|k| to_storage_key(&k))
    }

    pub fn set_current_language(storage: &mut LocalStorage, key: &str) {
        storage.set_string(KEY_APP_LANGUAGE, key);
    }

    /// Resolve a locale's translation bundle, loading it on first use.
    /// Unknown keys resolve to `None`.
    pub fn bundle(&mut self, key: &str) -> Option<Arc<Value>> {
        let registry_key = to_registry_key(key);
        if !LANGUAGES.contains_key(registry_key.as_str()) {
            return None;
        }
        if let Some(bundle) = self.loaded.get(&registry_key) {
            return Some(bundle.clone());
        }
        let path = self.bundles_dir.join(format!("{}.json", registry_key));
        let data = fs::read_to_string(&path).ok()?;
        let value: Value = serde_json::from_str(&data).ok()?;
        debug!("loaded locale bundle {}", registry_key);
        let bundle = Arc::new(value);
        self.loaded.insert(registry_key, bundle.clone());
        Some(bundle)
    }
}
