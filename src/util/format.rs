//! Display helpers shared by the command-line presenters.
//!
//! Server timestamps arrive either as RFC 3339 strings or as naive ISO
//! strings without an offset. Naive values are shown as-is; offset values are
//! converted to local time.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

const MISSING_DATE: &str = "-";

/// `YYYY-MM-DD`, or `-` when the value is missing or unparsable.
#[must_use]
pub fn format_date(value: Option<&str>) -> String {
    parse_timestamp(value).map_or_else(
        || MISSING_DATE.to_string(),
        |ts| ts.format("%Y-%m-%d").to_string(),
    )
}

/// `YYYY-MM-DD HH:MM`, or `-` when the value is missing or unparsable.
#[must_use]
pub fn format_date_time(value: Option<&str>) -> String {
    parse_timestamp(value).map_or_else(
        || MISSING_DATE.to_string(),
        |ts| ts.format("%Y-%m-%d %H:%M").to_string(),
    )
}

/// `HH:MM:SS`, or an empty string when the value is missing or unparsable.
#[must_use]
pub fn format_time(value: Option<&str>) -> String {
    parse_timestamp(value)
        .map(|ts| ts.format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

/// Percentage with one decimal, e.g. `85.0%`.
#[must_use]
pub fn format_score(score: f64) -> String {
    format!("{score:.1}%")
}

fn parse_timestamp(value: Option<&str>) -> Option<NaiveDateTime> {
    let raw = value.map(str::trim).filter(|raw| !raw.is_empty())?;

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Local).naive_local());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed);
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(parsed);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Visual tone used when rendering a difficulty badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Danger,
    Info,
}

impl Tone {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Warning => "warning",
            Tone::Danger => "danger",
            Tone::Info => "info",
        }
    }
}

/// Test difficulty. Unknown values from the server are kept verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Other(String),
}

impl Difficulty {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Other(raw) => raw,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Difficulty::Easy => "简单",
            Difficulty::Medium => "中等",
            Difficulty::Hard => "困难",
            Difficulty::Other(raw) => raw,
        }
    }

    #[must_use]
    pub const fn tone(&self) -> Tone {
        match self {
            Difficulty::Easy => Tone::Success,
            Difficulty::Medium => Tone::Warning,
            Difficulty::Hard => Tone::Danger,
            Difficulty::Other(_) => Tone::Info,
        }
    }
}

impl From<&str> for Difficulty {
    fn from(value: &str) -> Self {
        match value {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            other => Difficulty::Other(other.to_string()),
        }
    }
}

impl From<String> for Difficulty {
    fn from(value: String) -> Self {
        Difficulty::from(value.as_str())
    }
}

impl From<Difficulty> for String {
    fn from(value: Difficulty) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_timestamps_are_shown_as_is() {
        let raw = Some("2024-09-01T08:05:09.123456");
        assert_eq!(format_date(raw), "2024-09-01");
        assert_eq!(format_date_time(raw), "2024-09-01 08:05");
        assert_eq!(format_time(raw), "08:05:09");
        assert_eq!(format_date(Some("2024-09-01")), "2024-09-01");
    }

    #[test]
    fn offset_timestamps_are_converted_to_local_time() {
        let raw = "2024-09-01T08:05:09Z";
        let expected = DateTime::parse_from_rfc3339(raw)
            .unwrap()
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string();
        assert_eq!(format_date_time(Some(raw)), expected);
    }

    #[test]
    fn missing_values_use_placeholders() {
        assert_eq!(format_date(None), "-");
        assert_eq!(format_date(Some("")), "-");
        assert_eq!(format_date_time(Some("not a date")), "-");
        assert_eq!(format_time(None), "");
        assert_eq!(format_time(Some("garbage")), "");
    }

    #[test]
    fn score_has_one_decimal() {
        assert_eq!(format_score(85.0), "85.0%");
        assert_eq!(format_score(66.666), "66.7%");
        assert_eq!(format_score(0.0), "0.0%");
    }

    #[test]
    fn difficulty_labels_and_tones() {
        assert_eq!(Difficulty::from("easy").label(), "简单");
        assert_eq!(Difficulty::from("medium").tone(), Tone::Warning);
        assert_eq!(Difficulty::from("hard").tone().as_str(), "danger");

        let unknown = Difficulty::from("expert");
        assert_eq!(unknown.label(), "expert");
        assert_eq!(unknown.tone(), Tone::Info);
    }

    #[test]
    fn difficulty_serializes_as_plain_string() {
        let value = serde_json::to_value(Difficulty::Hard).unwrap();
        assert_eq!(value, serde_json::json!("hard"));
        let parsed: Difficulty = serde_json::from_value(serde_json::json!("expert")).unwrap();
        assert_eq!(parsed, Difficulty::Other("expert".to_string()));
    }
}
