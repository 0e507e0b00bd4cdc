//! Extension to language lookup.
//!
//! The registry is an instance owned by the Scanner rather than global
//! state. Registration takes a write lock so a registry shared behind an
//! `Arc` can be extended at runtime.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

/// Name returned for extensions without a registered language.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

const DEFAULT_LANGUAGES: &[(&str, &str)] = &[
    ("rs", "rust"),
    ("py", "python"),
    ("js", "javascript"),
    ("jsx", "javascript"),
    ("mjs", "javascript"),
    ("ts", "typescript"),
    ("tsx", "typescript"),
    ("java", "java"),
    ("c", "c"),
    ("h", "c"),
    ("cpp", "cpp"),
    ("cc", "cpp"),
    ("cxx", "cpp"),
    ("hpp", "cpp"),
    ("go", "go"),
    ("rb", "ruby"),
    ("php", "php"),
    ("cs", "csharp"),
    ("kt", "kotlin"),
    ("swift", "swift"),
    ("scala", "scala"),
    ("sh", "shell"),
    ("sql", "sql"),
    ("lua", "lua"),
    ("hs", "haskell"),
    ("ex", "elixir"),
    ("exs", "elixir"),
    ("clj", "clojure"),
    ("md", "markdown"),
];

/// Thread-safe extension registry.
#[derive(Debug)]
pub struct LanguageRegistry {
    by_extension: RwLock<HashMap<String, String>>,
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageRegistry {
    /// Registry pre-loaded with the common source extensions.
    pub fn new() -> Self {
        let registry = Self::empty();
        for (ext, language) in DEFAULT_LANGUAGES {
            registry.register(ext, language);
        }
        registry
    }

    pub fn empty() -> Self {
        LanguageRegistry {
            by_extension: RwLock::new(HashMap::new()),
        }
    }

    /// Map `extension` (with or without a leading dot, any case) to `language`.
    ///
    /// Re-registering an extension replaces its language.
    pub fn register(&self, extension: &str, language: &str) {
        let key = extension.trim_start_matches('.').to_ascii_lowercase();
        let mut map = self.by_extension.write().unwrap_or_else(|e| e.into_inner());
        map.insert(key, language.to_string());
    }

    /// Language for `path`, or [`UNKNOWN_LANGUAGE`].
    pub fn classify(&self, path: &Path) -> String {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return UNKNOWN_LANGUAGE.to_string();
        };
        let map = self.by_extension.read().unwrap_or_else(|e| e.into_inner());
        map.get(&ext.to_ascii_lowercase())
            .cloned()
            .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string())
    }

    pub fn is_supported(&self, path: &Path) -> bool {
        self.classify(path) != UNKNOWN_LANGUAGE
    }

    /// Sorted list of registered languages.
    pub fn languages(&self) -> Vec<String> {
        let map = self.by_extension.read().unwrap_or_else(|e| e.into_inner());
        let mut languages: Vec<String> = map.values().cloned().collect();
        languages.sort();
        languages.dedup();
        languages
    }
}
