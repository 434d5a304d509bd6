use serde_json::{Map, Value};
use std::collections::HashMap;

use hey_constants::LATEST_TAG;
use hey_error::{HeyError, Result};

/// Tarball location for one published version.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionDist {
    pub tarball: String,
    pub integrity: Option<String>,
}

/// Registry metadata document for a single package name.
///
/// Both maps are optional: a registry may answer with a body that lacks either
/// of them, and the accessors below turn that into a typed error.
#[derive(Clone, Debug, Default)]
pub struct RegistryEntry {
    pub name: String,
    pub dist_tags: Option<HashMap<String, String>>,
    pub versions: Option<Map<String, Value>>,
}

impl RegistryEntry {
    #[must_use]
    pub fn from_json(name: &str, json: &Value) -> Self {
        let dist_tags = json.get("dist-tags").and_then(Value::as_object).map(|tags| {
            tags.iter()
                .filter_map(|(tag, v)| v.as_str().map(|v| (tag.clone(), v.to_string())))
                .collect()
        });

        Self {
            name: name.to_string(),
            dist_tags,
            versions: json.get("versions").and_then(Value::as_object).cloned(),
        }
    }

    pub fn latest_version(&self) -> Result<&str> {
        self.dist_tag(LATEST_TAG)
            .ok_or_else(|| HeyError::MissingLatestTag(self.name.clone()))
    }

    #[must_use]
    pub fn dist_tag(&self, tag: &str) -> Option<&str> {
        self.dist_tags
            .as_ref()
            .and_then(|tags| tags.get(tag))
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn version_strings(&self) -> Result<Vec<String>> {
        self.versions
            .as_ref()
            .map(|versions| versions.keys().cloned().collect())
            .ok_or_else(|| HeyError::MissingVersionData(self.name.clone()))
    }

    pub fn version_dist(&self, version: &str) -> Result<VersionDist> {
        let dist = self
            .versions
            .as_ref()
            .and_then(|versions| versions.get(version))
            .and_then(|meta| meta.get("dist"))
            .ok_or_else(|| HeyError::MissingVersionData(format!("{}@{version}", self.name)))?;

        let tarball = dist
            .get("tarball")
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| HeyError::MissingVersionData(format!("{}@{version}", self.name)))?;

        Ok(VersionDist {
            tarball: tarball.to_string(),
            integrity: dist
                .get("integrity")
                .and_then(Value::as_str)
                .map(String::from),
        })
    }
}
