use thiserror::Error;
use time::{Month, Weekday, Weekday::*};

/// Environment variables consulted for the locale, highest precedence first
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_TIME", "LANG"];

/// Calendar conventions of a locale: the first day of the week plus the
/// abbreviated names shown in the header and title
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Locale {
    name: &'static str,
    first_weekday: Weekday,
    // Sunday first
    short_weekdays: [&'static str; 7],
    short_months: [&'static str; 12],
}

const ENGLISH_WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const ENGLISH_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub(crate) const EN_US: Locale = Locale {
    name: "en_US",
    first_weekday: Sunday,
    short_weekdays: ENGLISH_WEEKDAYS,
    short_months: ENGLISH_MONTHS,
};

static LOCALES: &[Locale] = &[
    EN_US,
    Locale {
        name: "en_GB",
        first_weekday: Monday,
        short_weekdays: ENGLISH_WEEKDAYS,
        short_months: ENGLISH_MONTHS,
    },
    Locale {
        name: "de_DE",
        first_weekday: Monday,
        short_weekdays: ["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"],
        short_months: [
            "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
        ],
    },
    Locale {
        name: "fr_FR",
        first_weekday: Monday,
        short_weekdays: ["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."],
        short_months: [
            "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.",
            "nov.", "déc.",
        ],
    },
    Locale {
        name: "es_ES",
        first_weekday: Monday,
        short_weekdays: ["dom", "lun", "mar", "mié", "jue", "vie", "sáb"],
        short_months: [
            "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
        ],
    },
    Locale {
        name: "sv_SE",
        first_weekday: Monday,
        short_weekdays: ["sön", "mån", "tis", "ons", "tors", "fre", "lör"],
        short_months: [
            "jan.", "feb.", "mars", "apr.", "maj", "juni", "juli", "aug.", "sep.", "okt.", "nov.",
            "dec.",
        ],
    },
];

impl Locale {
    /// Find a built-in locale for a POSIX-style locale string such as
    /// `sv_SE.UTF-8`.  If the territory is unknown, the first locale with the
    /// same language is used.
    pub(crate) fn lookup(spec: &str) -> Option<Locale> {
        let tag = spec
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .replace('-', "_");
        if tag.is_empty() {
            return None;
        }
        if let Some(&locale) = LOCALES.iter().find(|l| l.name.eq_ignore_ascii_case(&tag)) {
            return Some(locale);
        }
        let language = tag.split('_').next().unwrap_or_default();
        LOCALES
            .iter()
            .find(|l| l.language().eq_ignore_ascii_case(language))
            .copied()
    }

    /// Determine the locale from `LC_ALL`, `LC_TIME`, and `LANG`, falling
    /// back to `en_US`
    pub(crate) fn from_env() -> Locale {
        Locale::detect(|var| std::env::var(var).ok())
    }

    fn detect<F: Fn(&str) -> Option<String>>(getenv: F) -> Locale {
        // As with POSIX, the first non-empty variable decides, even if it
        // names a locale we do not know.
        let Some(value) = LOCALE_VARS
            .into_iter()
            .filter_map(getenv)
            .find(|v| !v.is_empty())
        else {
            return EN_US;
        };
        match Locale::lookup(&value) {
            Some(locale) => locale,
            None => {
                log::debug!("No calendar conventions for locale {value:?}; using {}", EN_US.name);
                EN_US
            }
        }
    }

    pub(crate) fn with_week_start(self, first_weekday: Weekday) -> Locale {
        Locale {
            first_weekday,
            ..self
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    fn language(&self) -> &'static str {
        self.name.split('_').next().unwrap_or(self.name)
    }

    pub(crate) fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    pub(crate) fn short_weekday(&self, wd: Weekday) -> &'static str {
        self.short_weekdays[usize::from(wd.number_days_from_sunday())]
    }

    pub(crate) fn short_month(&self, month: Month) -> &'static str {
        self.short_months[usize::from(u8::from(month) - 1)]
    }
}

/// Parse an English weekday name, either in full or as its first three
/// letters, ignoring case
pub(crate) fn parse_weekday(s: &str) -> Result<Weekday, WeekdayParseError> {
    let wd = match s.to_ascii_lowercase().as_str() {
        "sun" | "sunday" => Sunday,
        "mon" | "monday" => Monday,
        "tue" | "tuesday" => Tuesday,
        "wed" | "wednesday" => Wednesday,
        "thu" | "thursday" => Thursday,
        "fri" | "friday" => Friday,
        "sat" | "saturday" => Saturday,
        _ => return Err(WeekdayParseError),
    };
    Ok(wd)
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("expected a day of the week, such as \"monday\" or \"sun\"")]
pub(crate) struct WeekdayParseError;
