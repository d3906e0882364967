use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

//==============================================================================
// Cell Values
//==============================================================================

/// A single cell value as read from or written to the backing sheet.
///
/// Dates exist only at the store boundary; the record mapper formats them to
/// `M/D/YYYY` text before they reach callers.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// Empty cell, or a text cell containing only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Render the value for display and filter bucketing.
    ///
    /// Numbers drop trailing zeros so `2.0` buckets the same as `2`.
    pub fn display_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Bool(b) => {
                if *b {
                    "TRUE".to_string()
                } else {
                    "FALSE".to_string()
                }
            }
            CellValue::Date(d) => crate::core::dates::format_date(*d),
        }
    }

    /// Interpret untyped user input (CLI arguments) as a cell value.
    pub fn parse_input(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        if let Ok(n) = trimmed.parse::<f64>() {
            return CellValue::Number(n);
        }
        match trimmed {
            "TRUE" => CellValue::Bool(true),
            "FALSE" => CellValue::Bool(false),
            _ => CellValue::Text(trimmed.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_string())
    }
}

/// Format a number for display, removing unnecessary decimal places.
pub fn format_number(n: f64) -> String {
    let rounded = (n * 1e6).round() / 1e6;
    format!("{:.6}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

impl Serialize for CellValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            CellValue::Empty => serializer.serialize_str(""),
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Number(n) => serializer.serialize_f64(*n),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Date(d) => {
                serializer.serialize_str(&crate::core::dates::format_date(*d))
            }
        }
    }
}

struct CellValueVisitor;

impl<'de> Visitor<'de> for CellValueVisitor {
    type Value = CellValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, number, boolean, or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<CellValue, E> {
        if v.is_empty() {
            Ok(CellValue::Empty)
        } else {
            Ok(CellValue::Text(v.to_string()))
        }
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<CellValue, E> {
        Ok(CellValue::Number(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<CellValue, E> {
        Ok(CellValue::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<CellValue, E> {
        Ok(CellValue::Number(v as f64))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<CellValue, E> {
        Ok(CellValue::Bool(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<CellValue, E> {
        Ok(CellValue::Empty)
    }

    fn visit_none<E: de::Error>(self) -> Result<CellValue, E> {
        Ok(CellValue::Empty)
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(CellValueVisitor)
    }
}

//==============================================================================
// Records
//==============================================================================

/// A column header alongside its normalized field key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderBinding {
    pub original: String,
    pub normalized: String,
}

/// One logical row of tracker data plus its 1-based position in the data
/// region of the backing sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "rowIndex")]
    pub row_index: usize,
    #[serde(flatten)]
    pub fields: HashMap<String, CellValue>,
}

impl Record {
    pub fn new(row_index: usize) -> Self {
        Self {
            row_index,
            fields: HashMap::new(),
        }
    }

    /// Field value by normalized key, if present.
    pub fn field(&self, key: &str) -> Option<&CellValue> {
        self.fields.get(key)
    }

    /// Display string for a field; empty string when absent.
    pub fn field_display(&self, key: &str) -> String {
        self.fields
            .get(key)
            .map(CellValue::display_string)
            .unwrap_or_default()
    }

    /// True when the field is missing or blank.
    pub fn field_is_blank(&self, key: &str) -> bool {
        self.fields.get(key).map_or(true, CellValue::is_blank)
    }
}

/// Header bindings plus mapped records, in sheet row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetData {
    pub headers: Vec<HeaderBinding>,
    #[serde(rename = "data")]
    pub records: Vec<Record>,
}

impl SheetData {
    pub fn empty() -> Self {
        Self {
            headers: Vec::new(),
            records: Vec::new(),
        }
    }
}

//==============================================================================
// Derived Views
//==============================================================================

/// Distinct filter values per filterable field.
///
/// `help_needed` is always the fixed `Yes`/`No` pair, independent of data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub statuses: Vec<String>,
    pub owners: Vec<String>,
    pub program_owners: Vec<String>,
    pub efforts: Vec<String>,
    pub help_needed: Vec<String>,
}

/// Aggregate counts over the full record set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total: usize,
    pub by_status: HashMap<String, usize>,
    pub by_category: HashMap<String, usize>,
    pub by_effort: HashMap<String, usize>,
    pub help_needed: usize,
    pub at_risk: usize,
}

//==============================================================================
// Configuration
//==============================================================================

/// Sheet layout configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Name of the sheet holding tracker rows.
    pub sheet_name: String,
    /// 1-based column position of the Status field.
    pub status_column: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            sheet_name: "Projects".to_string(),
            status_column: 3,
        }
    }
}

/// Canonical tracker header row, used by `init` and test fixtures.
pub const CANONICAL_HEADERS: [&str; 10] = [
    "Project / Activity Name",
    "Category",
    "Status",
    "Effort",
    "Functional Owner of Deliverable",
    "Program Owner (Lead Contact)",
    "Help Needed?",
    "Start Date",
    "End Date",
    "Notes",
];
