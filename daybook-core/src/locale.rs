//! Locale data for day labels: relative-day words, weekday and month names.

use chrono::{Datelike, Month, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CalendarError;

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Month of a calendar day as a `chrono::Month`.
pub fn month_of(day: NaiveDate) -> Month {
    MONTHS[day.month0() as usize]
}

/// Locale capability injected into the grouper.
///
/// Names are returned in the locale's natural casing; callers capitalize
/// labels where they start a heading.
pub trait Locale {
    fn today(&self) -> &str;
    fn yesterday(&self) -> &str;
    fn weekday_name(&self, weekday: Weekday) -> &str;
    fn month_name(&self, month: Month) -> &str;

    /// Long form used for days outside the current week.
    fn long_date(&self, day: NaiveDate) -> String;

    /// First day of the week for "this week" checks.
    fn week_start(&self) -> Weekday {
        Weekday::Mon
    }
}

/// Spanish ("Hoy", "martes 14 de marzo").
#[derive(Debug, Clone, Copy, Default)]
pub struct Spanish;

impl Locale for Spanish {
    fn today(&self) -> &str {
        "Hoy"
    }

    fn yesterday(&self) -> &str {
        "Ayer"
    }

    fn weekday_name(&self, weekday: Weekday) -> &str {
        match weekday {
            Weekday::Mon => "lunes",
            Weekday::Tue => "martes",
            Weekday::Wed => "miércoles",
            Weekday::Thu => "jueves",
            Weekday::Fri => "viernes",
            Weekday::Sat => "sábado",
            Weekday::Sun => "domingo",
        }
    }

    fn month_name(&self, month: Month) -> &str {
        match month {
            Month::January => "enero",
            Month::February => "febrero",
            Month::March => "marzo",
            Month::April => "abril",
            Month::May => "mayo",
            Month::June => "junio",
            Month::July => "julio",
            Month::August => "agosto",
            Month::September => "septiembre",
            Month::October => "octubre",
            Month::November => "noviembre",
            Month::December => "diciembre",
        }
    }

    fn long_date(&self, day: NaiveDate) -> String {
        format!(
            "{} {} de {}",
            self.weekday_name(day.weekday()),
            day.day(),
            self.month_name(month_of(day))
        )
    }
}

/// English ("Today", "Tuesday 14 of March").
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl Locale for English {
    fn today(&self) -> &str {
        "Today"
    }

    fn yesterday(&self) -> &str {
        "Yesterday"
    }

    fn weekday_name(&self, weekday: Weekday) -> &str {
        match weekday {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }

    fn month_name(&self, month: Month) -> &str {
        month.name()
    }

    fn long_date(&self, day: NaiveDate) -> String {
        format!(
            "{} {} of {}",
            self.weekday_name(day.weekday()),
            day.day(),
            self.month_name(month_of(day))
        )
    }
}

/// Built-in locale selected by config or command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleId {
    #[default]
    Es,
    En,
}

impl LocaleId {
    fn inner(self) -> &'static dyn Locale {
        match self {
            LocaleId::Es => &Spanish,
            LocaleId::En => &English,
        }
    }
}

impl Locale for LocaleId {
    fn today(&self) -> &str {
        self.inner().today()
    }

    fn yesterday(&self) -> &str {
        self.inner().yesterday()
    }

    fn weekday_name(&self, weekday: Weekday) -> &str {
        self.inner().weekday_name(weekday)
    }

    fn month_name(&self, month: Month) -> &str {
        self.inner().month_name(month)
    }

    fn long_date(&self, day: NaiveDate) -> String {
        self.inner().long_date(day)
    }

    fn week_start(&self) -> Weekday {
        self.inner().week_start()
    }
}

impl FromStr for LocaleId {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" | "es-mx" | "es-es" => Ok(LocaleId::Es),
            "en" | "en-us" | "en-gb" => Ok(LocaleId::En),
            _ => Err(CalendarError::UnknownLocale(s.to_string())),
        }
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocaleId::Es => f.write_str("es"),
            LocaleId::En => f.write_str("en"),
        }
    }
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
