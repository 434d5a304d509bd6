pub mod client;
pub mod entry;

pub use client::{HttpRegistry, RegistrySource};
pub use entry::{RegistryEntry, VersionDist};

use hey_constants::{LATEST_TAG, NPM_MIRROR_REGISTRY, NPM_REGISTRY};
use hey_error::{HeyError, Result};

/// The primary public registry, or its mirror.
#[must_use]
pub const fn registry_url(use_mirror: bool) -> &'static str {
    if use_mirror {
        NPM_MIRROR_REGISTRY
    } else {
        NPM_REGISTRY
    }
}

/// Join a registry base URL and a package name with exactly one `/` between them.
/// Scoped names are passed through unencoded.
#[must_use]
pub fn package_url(base: &str, name: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        name.trim_start_matches('/')
    )
}

pub async fn fetch_registry_entry(name: &str, registry: Option<&str>) -> Result<RegistryEntry> {
    if name.is_empty() {
        return Err(HeyError::invalid_argument("package name must not be empty"));
    }
    let client = HttpRegistry::with_default_timeouts(registry.unwrap_or(NPM_REGISTRY))?;
    client.fetch_entry(name).await
}

pub async fn list_versions<R: RegistrySource + ?Sized>(
    source: &R,
    name: &str,
) -> Result<Vec<String>> {
    source.fetch_entry(name).await?.version_strings()
}

pub async fn get_latest_version<R: RegistrySource + ?Sized>(
    source: &R,
    name: &str,
) -> Result<String> {
    let entry = source.fetch_entry(name).await?;
    entry.latest_version().map(String::from)
}

pub async fn get_tag_version<R: RegistrySource + ?Sized>(
    source: &R,
    name: &str,
    tag: &str,
) -> Result<String> {
    let entry = source.fetch_entry(name).await?;
    if tag == LATEST_TAG {
        return entry.latest_version().map(String::from);
    }
    entry
        .dist_tag(tag)
        .map(String::from)
        .ok_or_else(|| HeyError::UnknownDistTag {
            name: name.to_string(),
            tag: tag.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::BoxFuture;
    use serde_json::{Value, json};

    struct StaticRegistry(Value);

    impl RegistrySource for StaticRegistry {
        fn base_url(&self) -> &str {
            "https://registry.example.test"
        }

        fn fetch_entry<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<RegistryEntry>> {
            Box::pin(async move { Ok(RegistryEntry::from_json(name, &self.0)) })
        }
    }

    #[test]
    fn test_package_url_join() {
        assert_eq!(
            package_url("https://registry.npmjs.org", "demo-template"),
            "https://registry.npmjs.org/demo-template"
        );
        assert_eq!(
            package_url("https://registry.npmjs.org/", "/demo-template"),
            "https://registry.npmjs.org/demo-template"
        );
        assert_eq!(
            package_url("https://registry.npmmirror.org//", "@hey-cli/core"),
            "https://registry.npmmirror.org/@hey-cli/core"
        );
    }

    #[test]
    fn test_registry_url_selection() {
        assert_eq!(registry_url(false), "https://registry.npmjs.org");
        assert_eq!(registry_url(true), "https://registry.npmmirror.org");
    }

    #[tokio::test]
    async fn test_get_latest_version() {
        let registry = StaticRegistry(json!({ "dist-tags": { "latest": "1.3.0" } }));
        let version = get_latest_version(&registry, "demo-template").await.unwrap();
        assert_eq!(version, "1.3.0");
    }

    #[tokio::test]
    async fn test_get_latest_version_without_tag_fails() {
        let registry = StaticRegistry(json!({ "dist-tags": { "next": "2.0.0" } }));
        let err = get_latest_version(&registry, "demo-template").await.unwrap_err();
        assert!(matches!(err, HeyError::MissingLatestTag(_)));
    }

    #[tokio::test]
    async fn test_get_tag_version_unknown_tag() {
        let registry = StaticRegistry(json!({ "dist-tags": { "latest": "1.0.0" } }));
        let err = get_tag_version(&registry, "demo", "beta").await.unwrap_err();
        assert!(matches!(err, HeyError::UnknownDistTag { ref tag, .. } if tag == "beta"));
    }

    #[tokio::test]
    async fn test_list_versions() {
        let registry = StaticRegistry(json!({
            "versions": { "1.0.0": {}, "1.1.0": {} }
        }));
        let mut versions = list_versions(&registry, "demo").await.unwrap();
        versions.sort();
        assert_eq!(versions, vec!["1.0.0".to_string(), "1.1.0".to_string()]);
    }

    #[tokio::test]
    async fn test_list_versions_without_map_fails() {
        let registry = StaticRegistry(json!({}));
        assert!(matches!(
            list_versions(&registry, "demo").await,
            Err(HeyError::MissingVersionData(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_registry_entry_rejects_empty_name() {
        assert!(matches!(
            fetch_registry_entry("", None).await,
            Err(HeyError::InvalidArgument(_))
        ));
    }
}
