//! `Accept-Language` header parsing.
//!
//! Entries carrying a well-formed `;q=` suffix also contribute their bare
//! language (`en` for `en-us`) at `quality - 0.1`, unless that language was
//! already recorded. Entries with a missing or malformed quality count as 1.0.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// `<token>;q=<0|1>[.dddd]` or `<token>;q=.dddd`
static QUALITY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<locale>.*);q=(?P<quality>[0-1]?\.\d{0,4}|[0-1])$")
        .expect("quality pattern is valid")
});

const SYNTHETIC_PENALTY: f64 = 0.1;

/// One ranked locale from an `Accept-Language` header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalePreference {
    /// Lowercased tag, possibly with region (`de-ch`).
    pub locale: String,
    pub quality: f64,
}

/// Parse a raw header value into preferences ordered by quality, highest first.
///
/// Equal qualities keep header order. An empty header yields no preferences.
pub fn parse_accept_language(header: &str) -> Vec<LocalePreference> {
    let mut entries: Vec<LocalePreference> = Vec::new();

    for raw in header.split(',') {
        let entry = raw.trim().to_lowercase();
        if entry.is_empty() {
            continue;
        }

        match parse_quality(&entry) {
            Some((locale, quality)) => {
                record(&mut entries, locale, quality);

                let lang = locale.split('-').next().unwrap_or(locale);
                if !entries.iter().any(|e| e.locale == lang) {
                    entries.push(LocalePreference {
                        locale: lang.to_string(),
                        quality: quality - SYNTHETIC_PENALTY,
                    });
                }
            }
            None => record(&mut entries, &entry, 1.0),
        }
    }

    // stable: ties keep insertion order
    entries.sort_by(|a, b| b.quality.total_cmp(&a.quality));
    entries
}

/// Split `locale;q=0.8` into its parts, or `None` if the suffix is absent or malformed.
fn parse_quality(entry: &str) -> Option<(&str, f64)> {
    let caps = QUALITY_PATTERN.captures(entry)?;
    let locale = caps.name("locale")?.as_str().trim();
    let quality = caps.name("quality")?.as_str().parse::<f64>().ok()?;
    Some((locale, quality))
}

/// Insert or overwrite; an overwritten entry keeps its original position.
fn record(entries: &mut Vec<LocalePreference>, locale: &str, quality: f64) {
    match entries.iter_mut().find(|e| e.locale == locale) {
        Some(existing) => existing.quality = quality,
        None => entries.push(LocalePreference {
            locale: locale.to_string(),
            quality,
        }),
    }
}
