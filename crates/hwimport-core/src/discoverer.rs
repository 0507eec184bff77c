//! Discoverer types describing the strategies available for importing hardware

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;

/// Unique identifier for a discoverer, assigned by the server
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiscovererId(pub String);

impl DiscovererId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DiscovererId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DiscovererId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for DiscovererId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// How a discoverer brings devices into the inventory
///
/// Serialized as the bare type tag (`"ScanDevices"`, `"FromString"`). Tags the
/// UI does not know are kept verbatim in `Unsupported` so newer servers keep
/// working against older clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DiscovererKind {
    /// Scans the network for devices
    ScanDevices,
    /// Imports devices from an operator-supplied string
    FromString,
    /// A type tag this build does not dispatch
    Unsupported(String),
}

impl DiscovererKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::ScanDevices => "ScanDevices",
            Self::FromString => "FromString",
            Self::Unsupported(raw) => raw,
        }
    }

    /// Whether the UI has an import view for this type
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }
}

impl From<String> for DiscovererKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "ScanDevices" => Self::ScanDevices,
            "FromString" => Self::FromString,
            _ => Self::Unsupported(raw),
        }
    }
}

impl Default for DiscovererKind {
    /// Records sent without a type tag
    fn default() -> Self {
        Self::Unsupported(String::new())
    }
}

/// Accept any tag value so one malformed record cannot reject the catalog
///
/// Missing or null tags become `Unsupported("")`; non-string tags keep
/// their JSON text.
fn deserialize_kind<'de, D>(deserializer: D) -> Result<DiscovererKind, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => DiscovererKind::default(),
        Some(Value::String(tag)) => DiscovererKind::from(tag),
        Some(other) => DiscovererKind::Unsupported(other.to_string()),
    })
}

impl From<&str> for DiscovererKind {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<DiscovererKind> for String {
    fn from(kind: DiscovererKind) -> Self {
        match kind {
            DiscovererKind::Unsupported(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for DiscovererKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An input the operator must (or may) fill in before the discoverer runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiField {
    /// Key the value is submitted under
    pub id: String,
    /// Short label shown next to the input
    pub label: String,
    /// Longer help text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Pre-filled value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Submission is rejected while this field is empty
    #[serde(default)]
    pub required: bool,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("missing required field: '{label}'")]
    MissingRequired { id: String, label: String },
}

/// A server-described strategy for locating or importing devices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discoverer {
    pub id: DiscovererId,
    /// Human-readable label for the selector
    pub name: String,
    /// Type tag used to pick the import view
    #[serde(rename = "type", default, deserialize_with = "deserialize_kind")]
    pub kind: DiscovererKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Instructions shown before a scan is started
    #[serde(default, alias = "pre_scan_info", skip_serializing_if = "Option::is_none")]
    pub pre_scan_info: Option<String>,
    /// Inputs collected by the import view
    #[serde(default, alias = "ui_field", skip_serializing_if = "Vec::is_empty")]
    pub ui_fields: Vec<UiField>,
    /// Strategy-specific settings, forwarded untouched to the import view
    #[serde(flatten)]
    pub config: Map<String, Value>,
}

impl Discoverer {
    /// Create a discoverer with no descriptive fields or extra config
    pub fn new(id: impl Into<DiscovererId>, name: impl Into<String>, kind: DiscovererKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            description: None,
            pre_scan_info: None,
            ui_fields: Vec::new(),
            config: Map::new(),
        }
    }

    /// Check submitted field values against the declared ui fields
    ///
    /// Discoverers that declare no fields accept any input. Otherwise the first
    /// required field that is absent or empty is reported.
    pub fn validate_fields(&self, values: &HashMap<String, String>) -> Result<(), FieldError> {
        for field in self.ui_fields.iter().filter(|f| f.required) {
            let present = values.get(&field.id).is_some_and(|v| !v.is_empty());
            if !present {
                return Err(FieldError::MissingRequired {
                    id: field.id.clone(),
                    label: field.label.clone(),
                });
            }
        }
        Ok(())
    }

    /// Initial form values, one entry per field (empty when no default is given)
    pub fn default_field_values(&self) -> HashMap<String, String> {
        self.ui_fields
            .iter()
            .map(|f| (f.id.clone(), f.default.clone().unwrap_or_default()))
            .collect()
    }
}
