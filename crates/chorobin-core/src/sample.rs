//! Attribute samples keyed by entity
//!
//! A [`Sample`] keeps every entity of the attribute in its original order,
//! including the ones whose value is missing or unparseable. Consumers that
//! need positional alignment with a parallel key sequence can rely on that.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token the source datasets use for "not available"
pub const NA_TOKEN: &str = "NA";

/// A raw attribute value as it arrives from ingestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Numeric cell
    Number(f64),
    /// Text cell, parsed lazily
    Text(String),
    /// Null / absent cell
    Missing,
}

impl RawValue {
    /// Interpret the raw value, returning `None` for anything invalid
    ///
    /// NaN, infinities, null, empty strings, `"NA"` and strings that do not
    /// parse as a number are all invalid.
    pub fn to_valid(&self) -> Option<f64> {
        match self {
            RawValue::Number(v) if v.is_finite() => Some(*v),
            RawValue::Number(_) => None,
            RawValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() || trimmed == NA_TOKEN {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
            }
            RawValue::Missing => None,
        }
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Number(v)
    }
}

impl From<Option<f64>> for RawValue {
    fn from(v: Option<f64>) -> Self {
        v.map_or(RawValue::Missing, RawValue::Number)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

/// One `(entityKey, rawValue)` pair with its interpreted value cached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleEntry {
    /// Primary key of the geographic entity
    pub key: String,
    /// Value as ingested
    pub raw: RawValue,
    /// Interpreted value, `None` when invalid
    pub value: Option<f64>,
}

impl SampleEntry {
    /// Create an entry, interpreting the raw value
    pub fn new(key: impl Into<String>, raw: impl Into<RawValue>) -> Self {
        let raw = raw.into();
        let value = raw.to_valid();
        Self {
            key: key.into(),
            raw,
            value,
        }
    }

    /// Whether the entry carries a usable number
    pub fn is_valid(&self) -> bool {
        self.value.is_some()
    }
}

/// Counts describing how much of a sample is usable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataShape {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

impl DataShape {
    /// Share of invalid entries, in percent
    pub fn invalid_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.invalid as f64 * 100.0 / self.total as f64
        }
    }
}

impl fmt::Display for DataShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entities ({} valid, {} invalid, {:.3}%)",
            self.total,
            self.valid,
            self.invalid,
            self.invalid_percent()
        )
    }
}

/// An ordered attribute sample for one analysis pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    entries: Vec<SampleEntry>,
}

impl Sample {
    /// Build a sample from `(key, raw)` pairs in entity order
    pub fn new<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<RawValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| SampleEntry::new(k, v))
                .collect(),
        }
    }

    /// Build a sample whose keys are the positions of the values
    pub fn from_values(values: &[f64]) -> Self {
        Self::new(values.iter().enumerate().map(|(i, &v)| (i.to_string(), v)))
    }

    /// Parse a sample from a JSON array of row objects
    ///
    /// Keys may be strings or numbers; values that are missing, null or
    /// non-numeric strings become invalid entries rather than errors.
    pub fn from_json_rows(json: &str, key_field: &str, value_field: &str) -> crate::Result<Self> {
        let rows: Vec<serde_json::Map<String, serde_json::Value>> = serde_json::from_str(json)?;
        let mut entries = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let key = match row.get(key_field) {
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(serde_json::Value::Number(n)) => n.to_string(),
                _ => {
                    return Err(crate::Error::InvalidInput(format!(
                        "row {i} has no usable '{key_field}' key"
                    )))
                }
            };
            let raw = match row.get(value_field) {
                Some(serde_json::Value::Number(n)) => n.as_f64().into(),
                Some(serde_json::Value::String(s)) => RawValue::Text(s.clone()),
                _ => RawValue::Missing,
            };
            entries.push(SampleEntry::new(key, raw));
        }
        Ok(Self { entries })
    }

    /// Number of entities, valid or not
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the sample has no entities at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in entity order
    pub fn entries(&self) -> &[SampleEntry] {
        &self.entries
    }

    /// Iterate `(key, value)` with `None` marking invalid entries
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> + '_ {
        self.entries.iter().map(|e| (e.key.as_str(), e.value))
    }

    /// Entity keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Valid values in entity order
    pub fn valid_values(&self) -> Vec<f64> {
        self.entries.iter().filter_map(|e| e.value).collect()
    }

    /// Number of valid values
    pub fn valid_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_valid()).count()
    }

    /// Number of invalid values
    pub fn invalid_count(&self) -> usize {
        self.len() - self.valid_count()
    }

    /// Keys of entities whose value is invalid
    pub fn invalid_keys(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| !e.is_valid())
            .map(|e| e.key.as_str())
            .collect()
    }

    /// Whether at least one value is valid
    pub fn has_valid(&self) -> bool {
        self.entries.iter().any(|e| e.is_valid())
    }

    /// Minimum valid value
    pub fn min(&self) -> Option<f64> {
        self.entries
            .iter()
            .filter_map(|e| e.value)
            .map(OrderedFloat)
            .min()
            .map(|v| v.0)
    }

    /// Maximum valid value
    pub fn max(&self) -> Option<f64> {
        self.entries
            .iter()
            .filter_map(|e| e.value)
            .map(OrderedFloat)
            .max()
            .map(|v| v.0)
    }

    /// `(min, max)` of valid values
    pub fn extent(&self) -> Option<(f64, f64)> {
        Some((self.min()?, self.max()?))
    }

    /// Value for an entity key
    pub fn value_of(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .and_then(|e| e.value)
    }

    /// Total/valid/invalid counts
    pub fn shape(&self) -> DataShape {
        let valid = self.valid_count();
        DataShape {
            total: self.len(),
            valid,
            invalid: self.len() - valid,
        }
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for Sample {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Sample::new(iter)
    }
}
