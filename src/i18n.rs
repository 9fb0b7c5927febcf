//! Localization tables for the two supported languages.
//!
//! Translations live in embedded `locales/*.ftl` files as flat `key = value`
//! lines. Lookup falls back from the active language to the other one, and
//! finally to the key itself — provider weather descriptions are passed
//! through as keys, so an untranslated description is displayed verbatim.

use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate, Weekday};

/// Supported display languages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Lang {
    #[default]
    Ar,
    En,
}

impl Lang {
    /// Switch to the other supported language.
    pub fn toggle(self) -> Self {
        match self {
            Lang::Ar => Lang::En,
            Lang::En => Lang::Ar,
        }
    }

    /// Language code, as accepted by `--lang`.
    pub fn id(self) -> &'static str {
        match self {
            Lang::Ar => "ar",
            Lang::En => "en",
        }
    }

    /// Parse a language code.
    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_lowercase().as_str() {
            "ar" => Some(Lang::Ar),
            "en" => Some(Lang::En),
            _ => None,
        }
    }
}

fn tables() -> &'static HashMap<Lang, HashMap<String, String>> {
    static TABLES: OnceLock<HashMap<Lang, HashMap<String, String>>> = OnceLock::new();
    TABLES.get_or_init(|| {
        let mut tables = HashMap::new();
        tables.insert(Lang::Ar, parse_ftl(include_str!("locales/ar.ftl")));
        tables.insert(Lang::En, parse_ftl(include_str!("locales/en.ftl")));
        tables
    })
}

/// Parse flat `key = value` lines, skipping comments and blanks.
fn parse_ftl(content: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            map.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    map
}

/// Translate a key for the given language.
///
/// Falls back to English, then to the key itself.
pub fn tr(lang: Lang, key: &str) -> String {
    let tables = tables();
    if let Some(value) = tables.get(&lang).and_then(|table| table.get(key)) {
        return value.clone();
    }
    if lang != Lang::En {
        if let Some(value) = tables.get(&Lang::En).and_then(|table| table.get(key)) {
            return value.clone();
        }
    }
    key.to_string()
}

/// Translate a key and substitute `{ $name }` placeholders.
pub fn tr_args(lang: Lang, key: &str, args: &[(&str, &str)]) -> String {
    let mut result = tr(lang, key);
    for (name, value) in args {
        result = result.replace(&format!("{{ ${} }}", name), value);
        result = result.replace(&format!("{{${}}}", name), value);
    }
    result
}

const MONTH_KEYS: [&str; 12] = [
    "month-january",
    "month-february",
    "month-march",
    "month-april",
    "month-may",
    "month-june",
    "month-july",
    "month-august",
    "month-september",
    "month-october",
    "month-november",
    "month-december",
];

fn weekday_key(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "weekday-monday",
        Weekday::Tue => "weekday-tuesday",
        Weekday::Wed => "weekday-wednesday",
        Weekday::Thu => "weekday-thursday",
        Weekday::Fri => "weekday-friday",
        Weekday::Sat => "weekday-saturday",
        Weekday::Sun => "weekday-sunday",
    }
}

/// Format a date through the language's `date-format` pattern.
pub fn localized_date(lang: Lang, date: NaiveDate) -> String {
    let weekday = tr(lang, weekday_key(date.weekday()));
    let month_index = (date.month0() as usize).min(MONTH_KEYS.len() - 1);
    let month = tr(lang, MONTH_KEYS[month_index]);
    tr_args(
        lang,
        "date-format",
        &[
            ("weekday", &weekday),
            ("day", &date.day().to_string()),
            ("month", &month),
            ("year", &date.year().to_string()),
        ],
    )
}
