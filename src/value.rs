use anyhow::{Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime};

/// A raw cell as delivered by a data source, before cleaning or classification.
///
/// Sources differ in how much typing they preserve: delimited text yields only
/// `Text` and `Null`, while JSON keeps numbers, booleans, and nulls distinct.
/// A single stringify-and-trim step flattens every variant to its text form
/// before type inference runs.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Text(String),
    Number(f64),
    Boolean(bool),
    Date(NaiveDateTime),
}

impl RawValue {
    /// Renders the cell the way it would display in the source, or `None` for
    /// an absent value. Whole numbers drop the decimal point so a numeric cell
    /// holding `30` still reads as an integer literal; the integer path is
    /// taken only when the value round-trips through `i64`, otherwise the
    /// cast would saturate and corrupt the text form.
    pub fn to_text(&self) -> Option<String> {
        match self {
            RawValue::Null => None,
            RawValue::Text(s) => Some(s.clone()),
            RawValue::Number(f) => {
                if f.fract() == 0.0 && *f as i64 as f64 == *f {
                    Some((*f as i64).to_string())
                } else {
                    Some(f.to_string())
                }
            }
            RawValue::Boolean(b) => Some(b.to_string()),
            RawValue::Date(dt) => Some(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }
}

pub fn parse_naive_date(value: &str) -> Result<NaiveDate> {
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y"];
    for fmt in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(value, fmt) {
            return Ok(parsed);
        }
    }
    Err(anyhow!("Failed to parse '{value}' as date"))
}

pub fn parse_naive_datetime(value: &str) -> Result<NaiveDateTime> {
    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%d/%m/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(parsed);
        }
    }
    Err(anyhow!("Failed to parse '{value}' as datetime"))
}
