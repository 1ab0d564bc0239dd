// ─── Version Manifest ───
// Fetches and resolves the global version index.

use serde::Deserialize;
use tracing::info;

use crate::core::error::{LauncherError, LauncherResult};

pub const VERSION_MANIFEST_URL: &str =
    "https://launchermeta.mojang.com/mc/game/version_manifest.json";

/// Top-level version index: every known version id and where its
/// metadata document lives.
#[derive(Debug, Deserialize)]
pub struct VersionManifest {
    pub versions: Vec<VersionEntry>,
}

/// A single entry in the index.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionEntry {
    pub id: String,
    pub url: String,
}

impl VersionManifest {
    /// Fetch the version index. No local caching: the index is small and
    /// changes rarely, so every run re-fetches.
    pub async fn fetch(client: &reqwest::Client, url: &str) -> LauncherResult<Self> {
        info!("Fetching version manifest from {url}");

        let response = client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LauncherError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let raw = response.text().await?;
        let manifest: VersionManifest = serde_json::from_str(&raw)?;
        info!("Loaded {} versions from manifest", manifest.versions.len());
        Ok(manifest)
    }

    /// Resolve a version identifier to its index entry. Exact,
    /// case-sensitive match.
    pub fn resolve(&self, version_id: &str) -> LauncherResult<&VersionEntry> {
        self.versions
            .iter()
            .find(|v| v.id == version_id)
            .ok_or_else(|| LauncherError::VersionNotFound(version_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_index() -> VersionManifest {
        serde_json::from_str(
            r#"{
                "versions": [
                    {"id": "1.20.1", "url": "http://x/1.json"},
                    {"id": "1.19.4", "url": "http://x/2.json"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn resolve_returns_registered_url() {
        let manifest = fake_index();
        assert_eq!(manifest.resolve("1.20.1").unwrap().url, "http://x/1.json");
        assert_eq!(manifest.resolve("1.19.4").unwrap().url, "http://x/2.json");
    }

    #[test]
    fn resolve_is_case_sensitive_and_exact() {
        let manifest = fake_index();
        assert!(matches!(
            manifest.resolve("1.20"),
            Err(LauncherError::VersionNotFound(_))
        ));
        assert!(matches!(
            manifest.resolve("1.20.1 "),
            Err(LauncherError::VersionNotFound(_))
        ));
    }
}
