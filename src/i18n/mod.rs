//! Internationalization (i18n) support
//!
//! UI strings for every [`Language`] ship inside the binary; a site can
//! override individual keys with `<lang>.yml` files in its i18n directory.

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::content::Language;

const BUILTIN_EN: &str = include_str!("en.yml");
const BUILTIN_PT: &str = include_str!("pt.yml");

type Table = HashMap<String, serde_yaml::Value>;

/// Translation tables for all supported languages
#[derive(Debug, Clone)]
pub struct I18n {
    /// Language data: lang -> key -> translation
    translations: HashMap<Language, Table>,
}

impl I18n {
    /// Create a handler with the built-in string tables
    pub fn builtin() -> Result<Self> {
        let mut translations = HashMap::new();
        translations.insert(Language::En, serde_yaml::from_str(BUILTIN_EN)?);
        translations.insert(Language::Pt, serde_yaml::from_str(BUILTIN_PT)?);
        Ok(Self { translations })
    }

    /// Merge `<lang>.yml` override files from a directory over the built-in tables
    pub fn load_overrides<P: AsRef<Path>>(&mut self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Ok(());
        }

        for lang in Language::ALL {
            for ext in ["yml", "yaml"] {
                let path = dir.join(format!("{}.{}", lang.code(), ext));
                if !path.is_file() {
                    continue;
                }

                let content = fs::read_to_string(&path)?;
                match serde_yaml::from_str::<Table>(&content) {
                    Ok(data) => {
                        let table = self.translations.entry(lang).or_default();
                        for (key, value) in data {
                            merge_value(table.entry(key).or_insert(serde_yaml::Value::Null), value);
                        }
                        tracing::debug!("Loaded language file: {:?}", path);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse language file {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(())
    }

    /// Get a translation for a specific language.
    /// Key can be nested like "nav.home"; falls back to English, then to the key.
    pub fn get(&self, lang: Language, key: &str) -> String {
        self.lookup(lang, key).unwrap_or_else(|| key.to_string())
    }

    fn lookup(&self, lang: Language, key: &str) -> Option<String> {
        let found = self
            .translations
            .get(&lang)
            .and_then(|data| get_nested_value(data, key));

        let found = match found {
            Some(value) => Some(value),
            None if lang != Language::En => self
                .translations
                .get(&Language::En)
                .and_then(|data| get_nested_value(data, key)),
            None => None,
        };

        found.and_then(yaml_value_to_string)
    }

    /// Get a pluralized translation, replacing `%d` with the count.
    /// A key holding a plain string instead of plural forms is used as is.
    pub fn get_plural(&self, lang: Language, key: &str, count: usize) -> String {
        let form = match count {
            0 => self
                .lookup(lang, &format!("{}.zero", key))
                .or_else(|| self.lookup(lang, &format!("{}.other", key))),
            1 => self.lookup(lang, &format!("{}.one", key)),
            _ => self.lookup(lang, &format!("{}.other", key)),
        };

        form.unwrap_or_else(|| self.get(lang, key))
            .replace("%d", &count.to_string())
    }

    /// All translations for a language as a flat map with dot-notation keys,
    /// English filling the gaps
    pub fn get_all_translations(&self, lang: Language) -> HashMap<String, String> {
        let mut result = HashMap::new();

        if let Some(lang_data) = self.translations.get(&lang) {
            flatten_translations(lang_data, "", &mut result);
        }

        if lang != Language::En {
            if let Some(en_data) = self.translations.get(&Language::En) {
                let mut en_result = HashMap::new();
                flatten_translations(en_data, "", &mut en_result);
                for (k, v) in en_result {
                    result.entry(k).or_insert(v);
                }
            }
        }

        result
    }
}

/// Overlay `value` onto `slot`, descending into nested mappings
fn merge_value(slot: &mut serde_yaml::Value, value: serde_yaml::Value) {
    match (slot, value) {
        (serde_yaml::Value::Mapping(existing), serde_yaml::Value::Mapping(incoming)) => {
            for (k, v) in incoming {
                match existing.get_mut(&k) {
                    Some(current) => merge_value(current, v),
                    None => {
                        existing.insert(k, v);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Get a nested value from a YAML map using dot notation
fn get_nested_value<'a>(data: &'a Table, key: &str) -> Option<&'a serde_yaml::Value> {
    let mut parts = key.split('.');
    let mut current = data.get(parts.next()?);

    for part in parts {
        match current {
            Some(serde_yaml::Value::Mapping(map)) => {
                current = map.get(part);
            }
            _ => return None,
        }
    }

    current
}

/// Convert a scalar YAML value to a string
fn yaml_value_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Flatten translations into a HashMap with dot-notation keys
fn flatten_translations(data: &Table, prefix: &str, result: &mut HashMap<String, String>) {
    for (key, value) in data {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            serde_yaml::Value::Mapping(map) => {
                let nested: Table = map
                    .iter()
                    .filter_map(|(k, v)| Some((k.as_str()?.to_string(), v.clone())))
                    .collect();
                flatten_translations(&nested, &full_key, result);
            }
            other => {
                if let Some(s) = yaml_value_to_string(other) {
                    result.insert(full_key, s);
                }
            }
        }
    }
}
