/// Shared data structures for the application state
///
/// These structs represent the species records that flow between
/// the dataset loader, the filter pipeline and the UI layer.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Represents a single species entry in the catalog
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Record {
    /// Unique, stable record ID (the only lookup key used by the UI)
    pub id: i64,
    /// Common name (e.g., "Threeridge")
    #[serde(default, deserialize_with = "lenient_text")]
    pub common_name: Option<String>,
    /// Scientific name
    #[serde(default, deserialize_with = "lenient_text")]
    pub species: Option<String>,
    /// River basin the species occurs in
    #[serde(default, deserialize_with = "lenient_text")]
    pub basin: Option<String>,
    /// Number of known host fish (None when absent or unparseable)
    #[serde(default, deserialize_with = "lenient_count")]
    pub host_fish_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub most_common_host: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub defining_characteristics: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub shell_description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub nacre: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub periostracum: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub other_characteristics: Option<String>,
    /// Comma-separated host fish names, parsed on demand by `host_list`
    #[serde(default, deserialize_with = "lenient_text")]
    pub reported_hosts: Option<String>,
    /// Species this one may be confused with
    #[serde(default, deserialize_with = "lenient_text")]
    pub maybe_confused: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub image_credit: Option<String>,
    /// Image filenames, relative to the images directory
    #[serde(default, deserialize_with = "lenient_images")]
    pub images: Vec<String>,
}

impl Record {
    /// Display name, empty when the dataset has none
    pub fn name(&self) -> &str {
        self.common_name.as_deref().unwrap_or("")
    }

    /// Host fish count with a missing value treated as 0
    pub fn host_count(&self) -> u32 {
        self.host_fish_count.unwrap_or(0)
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn first_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Fields consulted by the free-text search, in display order
    pub fn searchable_fields(&self) -> [Option<&str>; 8] {
        [
            self.common_name.as_deref(),
            self.species.as_deref(),
            self.basin.as_deref(),
            self.defining_characteristics.as_deref(),
            self.shell_description.as_deref(),
            self.nacre.as_deref(),
            self.periostracum.as_deref(),
            self.other_characteristics.as_deref(),
        ]
    }

    /// Parse the reported hosts into trimmed, non-empty names
    pub fn host_list(&self) -> Vec<&str> {
        parse_host_list(self.reported_hosts.as_deref().unwrap_or(""))
    }
}

/// Split a comma-separated host string, dropping blank entries
pub fn parse_host_list(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|host| !host.is_empty())
        .collect()
}

/// Empty strings count as absent
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Accepts whole numbers, written as integers, floats or numeric strings.
/// Fractional or negative counts are None.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64))
            .and_then(|v| u32::try_from(v).ok()),
        Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
        _ => None,
    })
}

/// Null or missing image lists become empty; non-string entries are skipped
fn lenient_images<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}
