use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The `bin` field: either one script named after the package, or a map of
/// command name to script.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Bin {
    Single(String),
    Map(IndexMap<String, String>),
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct PackageJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin: Option<Bin>,
    // Catch-all for other fields to preserve them
    #[serde(flatten)]
    pub other: IndexMap<String, serde_json::Value>,
}

impl PackageJson {
    /// Declared entry file, ignoring an empty `main`.
    #[must_use]
    pub fn entry_file(&self) -> Option<&str> {
        self.main.as_deref().map(str::trim).filter(|m| !m.is_empty())
    }

    /// `(command, script)` pairs from `bin`. A single-string `bin` is exposed
    /// under the unscoped package name.
    #[must_use]
    pub fn bin_entries(&self) -> Vec<(String, String)> {
        match &self.bin {
            Some(Bin::Map(map)) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            Some(Bin::Single(script)) => self
                .name
                .as_deref()
                .map(|name| name.rsplit('/').next().unwrap_or(name))
                .map(|cmd| vec![(cmd.to_string(), script.clone())])
                .unwrap_or_default(),
            None => Vec::new(),
        }
    }
}
