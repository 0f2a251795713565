//! Locale negotiation.

use crate::language::accept::LocalePreference;

/// Pick the supported locale that best satisfies `preferences`.
///
/// Preferences are walked in order. A bare language (`de`) matches the first
/// supported locale starting with it (`de-ch`); anything else must equal a
/// supported locale exactly. Falls back to `fallback` when nothing matches.
pub fn negotiate_language(
    preferences: &[LocalePreference],
    supported: &[String],
    fallback: &str,
) -> String {
    for pref in preferences {
        let locale = pref.locale.as_str();

        if !locale.is_empty() && !locale.contains('-') {
            if let Some(found) = supported.iter().find(|s| s.starts_with(locale)) {
                return found.clone();
            }
        }

        if supported.iter().any(|s| s == locale) {
            return locale.to_string();
        }
    }

    fallback.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::accept::parse_accept_language;

    fn supported(locales: &[&str]) -> Vec<String> {
        locales.iter().map(|s| s.to_string()).collect()
    }

    fn negotiate(header: &str, locales: &[&str], fallback: &str) -> String {
        negotiate_language(&parse_accept_language(header), &supported(locales), fallback)
    }

    #[test]
    fn test_exact_match_beats_bare_prefix() {
        assert_eq!(
            negotiate("de-CH,de;q=0.9,en;q=0.8", &["en-us", "de-ch", "fr-fr"], "en-us"),
            "de-ch"
        );
    }

    #[test]
    fn test_bare_language_matches_region_locale() {
        assert_eq!(negotiate("de;q=1.0", &["en-us", "de-ch"], "en-us"), "de-ch");
    }

    #[test]
    fn test_bare_language_takes_first_supported_in_order() {
        assert_eq!(negotiate("en", &["de-ch", "en-gb", "en-us"], "de-ch"), "en-gb");
    }

    #[test]
    fn test_unmatched_or_empty_header_falls_back() {
        assert_eq!(negotiate("", &["en-us", "de-ch"], "en-us"), "en-us");
        assert_eq!(negotiate("zh-cn", &["en-us", "de-ch"], "en-us"), "en-us");
    }

    #[test]
    fn test_region_preference_falls_through_to_synthetic_bare_language() {
        assert_eq!(negotiate("fr-ca;q=0.9", &["en-us", "fr-fr"], "en-us"), "fr-fr");
    }

    #[test]
    fn test_higher_quality_wins() {
        assert_eq!(
            negotiate("en-us;q=0.4,fr-fr;q=0.8", &["en-us", "fr-fr"], "en-us"),
            "fr-fr"
        );
    }

    #[test]
    fn test_duplicate_languages_first_wins() {
        let prefs = vec![LocalePreference {
            locale: "de-ch".into(),
            quality: 1.0,
        }];
        let locales = supported(&["en-us", "de-ch", "de-ch"]);
        assert_eq!(negotiate_language(&prefs, &locales, "en-us"), "de-ch");
    }
}
