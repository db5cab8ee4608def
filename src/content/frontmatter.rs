//! Front-matter parsing

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};

use super::error::FrontMatterError;

/// Title used when a document does not declare one
pub const DEFAULT_TITLE: &str = "Untitled";

/// A YAML scalar of any type, kept in its textual form
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(s: Scalar) -> Self {
        match s {
            Scalar::Str(s) => s,
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

/// Accepts a string, a number or a boolean and keeps its textual form.
/// Anything else (lists, maps) is a decode error.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(String::from))
}

/// Accepts `tags: rust` as well as `tags: [rust, web]`
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a tag or a list of tags")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S: SeqAccess<'de>>(self, mut seq: S) -> Result<Self::Value, S::Error> {
            let mut tags = Vec::new();
            while let Some(tag) = seq.next_element::<Scalar>()? {
                tags.push(tag.into());
            }
            Ok(tags)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter block of a post.
///
/// Decoded once into a fixed shape. Absent fields stay `None`/empty, while a
/// field of the wrong shape (a list where a title is expected, say) fails the
/// whole decode instead of quietly turning into a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
}

/// Outcome of reading the `date` field
#[derive(Debug, Clone, PartialEq)]
pub enum DateField {
    Missing,
    Parsed(DateTime<FixedOffset>),
    Invalid(String),
}

impl FrontMatter {
    /// Split a document into its front-matter and the remaining body.
    ///
    /// A document that does not open with a `---` line has no front-matter:
    /// the default (empty) value is returned together with the whole input.
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.trim_start_matches('\u{feff}');

        let Some(rest) = strip_delimiter_line(content) else {
            return Ok((FrontMatter::default(), content));
        };

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == "---" {
                let yaml = &rest[..offset];
                let body = &rest[offset + line.len()..];

                if yaml.trim().is_empty() {
                    return Ok((FrontMatter::default(), body));
                }

                let fm: FrontMatter = serde_yaml::from_str(yaml)?;
                return Ok((fm, body));
            }
            offset += line.len();
        }

        Err(FrontMatterError::Unterminated)
    }

    /// Title, or `default` when the field is absent or blank
    pub fn title_or(&self, default: &str) -> String {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(default)
            .to_string()
    }

    /// Description, empty when absent
    pub fn description(&self) -> String {
        self.description
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string()
    }

    /// Tags in declaration order, blanks dropped
    pub fn tags(&self) -> Vec<String> {
        self.tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Interpret the `date` field; dates without an offset are read in `tz`
    pub fn date_in(&self, tz: Tz) -> DateField {
        match self.date.as_deref().map(str::trim) {
            None | Some("") => DateField::Missing,
            Some(s) => match parse_date_string(s, tz) {
                Some(dt) => DateField::Parsed(dt),
                None => DateField::Invalid(s.to_string()),
            },
        }
    }
}

/// If `s` opens with a `---` line, return what follows it
fn strip_delimiter_line(s: &str) -> Option<&str> {
    let end = s.find('\n').map(|i| i + 1).unwrap_or(s.len());
    if s[..end].trim_end() == "---" {
        Some(&s[end..])
    } else {
        None
    }
}

/// Parse a date string in the accepted layouts, tried in order
pub fn parse_date_string(s: &str, tz: Tz) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    let offset_formats = ["%Y-%m-%d %H:%M:%S %z", "%Y-%m-%d %H:%M %z"];
    for fmt in offset_formats {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return localize(naive, tz);
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return localize(d.and_hms_opt(0, 0, 0)?, tz);
        }
    }

    None
}

/// Resolve a wall-clock time in `tz`. A time skipped by a DST jump moves
/// forward by the usual one-hour gap.
fn localize(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<FixedOffset>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .map(|dt| dt.fixed_offset())
}
