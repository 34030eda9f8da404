//! Cardinal plural categories for toast wording.
//!
//! Covers the locales the app ships: English pluralizes on `n == 1`,
//! while Polish and Russian pick the noun form from the last digits of
//! the count (CLDR cardinal rules, integer counts only).

/// Cardinal plural class of a count in some locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralCategory {
    One,
    Few,
    Many,
    Other,
}

/// Locales the notification surface ships wording for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Pl,
    Ru,
}

impl Locale {
    /// Parse a BCP 47 language tag, matching on the primary subtag.
    /// Unknown tags fall back to English.
    pub fn parse(tag: &str) -> Self {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "pl" => Locale::Pl,
            "ru" => Locale::Ru,
            _ => Locale::En,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Pl => "pl",
            Locale::Ru => "ru",
        }
    }

    /// Cardinal category of `n` under this locale's rules.
    pub fn plural_category(&self, n: usize) -> PluralCategory {
        match self {
            Locale::En => {
                if n == 1 {
                    PluralCategory::One
                } else {
                    PluralCategory::Other
                }
            }
            Locale::Pl => {
                if n == 1 {
                    PluralCategory::One
                } else if is_slavic_few(n) {
                    PluralCategory::Few
                } else {
                    PluralCategory::Many
                }
            }
            Locale::Ru => {
                if n % 10 == 1 && n % 100 != 11 {
                    PluralCategory::One
                } else if is_slavic_few(n) {
                    PluralCategory::Few
                } else {
                    PluralCategory::Many
                }
            }
        }
    }
}

/// Shared few-rule: last digit 2..=4, except the teens 12..=14.
fn is_slavic_few(n: usize) -> bool {
    matches!(n % 10, 2..=4) && !matches!(n % 100, 12..=14)
}
