//! Caption translations, read through the `config` crate so that dotted keys such as
//! `fr.albums.y2024` resolve into the nested TOML tables.

use crate::config::{ConfigError, get_translations_path};
use carousel::{Language, Translate};
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::OnceLock;

const DEFAULT_TRANSLATIONS: &str = include_str!("translations.toml");

static TABLES: OnceLock<RwLock<config::Config>> = OnceLock::new();

fn builder() -> config::ConfigBuilder<config::builder::DefaultState> {
    config::Config::builder().add_source(config::File::from_str(
        DEFAULT_TRANSLATIONS,
        config::FileFormat::Toml,
    ))
}

/// Built-in tables with the user's translations file, if any, layered on top.
pub fn load_tables(overrides: Option<PathBuf>) -> Result<config::Config, ConfigError> {
    let mut b = builder();
    if let Some(path) = overrides {
        b = b.add_source(config::File::from(path).required(false));
    }
    Ok(b.build()?)
}

/// The process-wide tables, seeded from the user's translations file on first use.
pub fn shared_tables() -> &'static RwLock<config::Config> {
    TABLES.get_or_init(|| {
        let overrides = get_translations_path().ok();
        let tables = load_tables(overrides).unwrap_or_else(|e| {
            log::error!("Failed to load translations, using built-in: {}", e);
            builder().build().unwrap_or_default()
        });
        RwLock::new(tables)
    })
}

/// Re-reads the user's translations file.
pub fn refresh_cache() -> Result<(), ConfigError> {
    let fresh = load_tables(Some(get_translations_path()?))?;
    *shared_tables().write() = fresh;
    Ok(())
}

pub fn lookup(tables: &config::Config, language: Language, key: &str) -> String {
    tables
        .get_string(&format!("{}.{}", language, key))
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| key.to_string())
}

/// Built-in tables only, never touched by the user's file.
#[cfg(test)]
pub(crate) fn builtin_tables() -> &'static RwLock<config::Config> {
    static BUILTIN: OnceLock<RwLock<config::Config>> = OnceLock::new();
    BUILTIN.get_or_init(|| RwLock::new(builder().build().unwrap()))
}

/// Translator bound to one language and one set of tables.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    pub language: Language,
    tables: &'static RwLock<config::Config>,
}

impl Catalog {
    pub fn with_tables(language: Language, tables: &'static RwLock<config::Config>) -> Self {
        Self { language, tables }
    }
}

impl Translate for Catalog {
    fn translate(&self, key: &str) -> String {
        lookup(&self.tables.read(), self.language, key)
    }
}

/// Language from the POSIX locale variables, English if none is set or supported.
pub fn system_language() -> Language {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        .map(|locale| Language::detect(&locale))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use carousel::CaptionKey;

    #[test]
    fn test_every_language_has_album_captions() {
        let tables = builder().build().unwrap();
        for lang in [
            Language::En,
            Language::Fr,
            Language::Bg,
            Language::It,
            Language::De,
        ] {
            for key in ["y2021", "y2022", "y2023", "y2024", "current_year"] {
                let key = format!("albums.{key}");
                assert_ne!(lookup(&tables, lang, &key), key, "{lang} {key}");
            }
        }
    }

    #[test]
    fn test_missing_key_echoes() {
        let tables = builder().build().unwrap();
        assert_eq!(lookup(&tables, Language::De, "albums.y1999"), "albums.y1999");
        assert_eq!(lookup(&tables, Language::De, "albums"), "albums");
    }

    #[test]
    fn test_overrides_layer_over_builtin() {
        let tables = builder()
            .add_source(config::File::from_str(
                "[fr.albums]\ny2024 = \"Hiver\"\nempty = \"\"",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        assert_eq!(lookup(&tables, Language::Fr, "albums.y2024"), "Hiver");
        assert_eq!(lookup(&tables, Language::Fr, "albums.current_year"), "Année en cours");
        assert_eq!(lookup(&tables, Language::Fr, "albums.empty"), "albums.empty");
    }

    #[test]
    fn test_catalog_resolves_through_builtin_tables() {
        let catalog = Catalog::with_tables(Language::It, builtin_tables());
        assert_eq!(
            catalog.resolve(&CaptionKey::new("albums.current_year")),
            Some(carousel::CaptionText::new("Anno corrente"))
        );
        assert_eq!(catalog.resolve(&CaptionKey::new("albums.none")), None);
    }
}
