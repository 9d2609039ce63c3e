/// Fallback speech locale for languages missing from the table
pub const FALLBACK_LOCALE: &str = "en-US";

pub const DEFAULT_LANGUAGE: &str = "Spanish";

/// A selectable target language and the locale used to read it aloud
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub name: &'static str,
    pub locale: &'static str,
}

pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language { name: "Spanish", locale: "es-ES" },
    Language { name: "French", locale: "fr-FR" },
    Language { name: "German", locale: "de-DE" },
    Language { name: "Japanese", locale: "ja-JP" },
    Language { name: "Mandarin Chinese", locale: "zh-CN" },
    Language { name: "Italian", locale: "it-IT" },
    Language { name: "Korean", locale: "ko-KR" },
    Language { name: "Russian", locale: "ru-RU" },
    Language { name: "Arabic", locale: "ar-SA" },
    Language { name: "Portuguese", locale: "pt-BR" },
    Language { name: "Hindi", locale: "hi-IN" },
    Language { name: "Bengali", locale: "bn-IN" },
    Language { name: "Tamil", locale: "ta-IN" },
    Language { name: "Telugu", locale: "te-IN" },
    Language { name: "Marathi", locale: "mr-IN" },
];

/// Case-insensitive lookup by display name
pub fn find_language(name: &str) -> Option<&'static Language> {
    let name = name.trim();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|l| l.name.eq_ignore_ascii_case(name))
}

/// Locale tag for speech synthesis, `en-US` when the name is unknown
pub fn locale_for(name: &str) -> &'static str {
    find_language(name)
        .map(|l| l.locale)
        .unwrap_or(FALLBACK_LOCALE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_languages_map_to_locales() {
        assert_eq!(locale_for("Japanese"), "ja-JP");
        assert_eq!(locale_for("mandarin chinese"), "zh-CN");
        assert_eq!(locale_for(" Portuguese "), "pt-BR");
    }

    #[test]
    fn unknown_language_falls_back() {
        assert_eq!(locale_for("Klingon"), FALLBACK_LOCALE);
        assert_eq!(locale_for(""), FALLBACK_LOCALE);
    }

    #[test]
    fn table_is_consistent() {
        assert_eq!(SUPPORTED_LANGUAGES.len(), 15);
        assert!(find_language(DEFAULT_LANGUAGE).is_some());
        for language in SUPPORTED_LANGUAGES {
            assert_eq!(find_language(language.name), Some(language));
        }
    }
}
