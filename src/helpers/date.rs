//! Date helper functions

use chrono::{DateTime, Datelike, TimeZone};

use crate::content::Language;

const PT_MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Format a date in the long form of a language
///
/// # Examples
/// ```ignore
/// format_long_date(&date, Language::En) // -> "January 2, 2006"
/// format_long_date(&date, Language::Pt) // -> "2 de janeiro de 2006"
/// ```
pub fn format_long_date<Tz: TimeZone>(date: &DateTime<Tz>, lang: Language) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match lang {
        Language::En => date.format("%B %-d, %Y").to_string(),
        Language::Pt => format!(
            "{} de {} de {}",
            date.day(),
            PT_MONTHS[date.month0() as usize],
            date.year()
        ),
    }
}

/// Format a date in ISO 8601 / XML format
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.to_rfc3339()
}
