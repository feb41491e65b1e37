use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
    Bg,
    It,
    De,
}

impl Language {
    /// Maps a locale such as `fr-FR` or `bg_BG.UTF-8` to a supported language, falling
    /// back to English.
    pub fn detect(locale: &str) -> Self {
        let code = locale
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self::iter()
            .find(|lang| lang.to_string() == code)
            .unwrap_or_default()
    }
}

/// Dotted lookup key into the translation catalog, e.g. `albums.y2024`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct CaptionKey(String);

crate::impl_string_newtype!(CaptionKey);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct CaptionText(String);

crate::impl_string_newtype!(CaptionText);

/// Translation lookup. Implementations return the key itself when it has no translation.
pub trait Translate {
    fn translate(&self, key: &str) -> String;

    /// The translation of `key`, or `None` when the lookup came back as the key.
    fn resolve(&self, key: &CaptionKey) -> Option<CaptionText> {
        let text = self.translate(key);
        (text != key.as_str()).then(|| CaptionText::new(text))
    }
}

/// Fixed key/text pairs; useful when captions are not localized.
#[derive(Debug, Clone, Default)]
pub struct Verbatim(pub Vec<(String, String)>);

impl Translate for Verbatim {
    fn translate(&self, key: &str) -> String {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_detection() {
        let cases = vec![
            ("fr-FR", Language::Fr),
            ("bg_BG.UTF-8", Language::Bg),
            ("DE", Language::De),
            ("it", Language::It),
            ("en-GB", Language::En),
            ("ja-JP", Language::En),
            ("", Language::En),
            ("C.UTF-8", Language::En),
        ];

        for (locale, expected) in cases {
            assert_eq!(Language::detect(locale), expected, "{locale}");
        }
    }

    #[test]
    fn test_language_deserialization() {
        let lang: Language = serde_json::from_str("\"BG\"").unwrap();
        assert_eq!(lang, Language::Bg);
        assert!(serde_json::from_str::<Language>("\"es\"").is_err());
    }

    #[test]
    fn test_resolve_treats_echo_as_missing() {
        let translator = Verbatim(vec![("albums.y2024".into(), "Current Year".into())]);
        assert_eq!(
            translator.resolve(&CaptionKey::new("albums.y2024")),
            Some(CaptionText::new("Current Year"))
        );
        assert_eq!(translator.resolve(&CaptionKey::new("albums.none")), None);
    }
}
