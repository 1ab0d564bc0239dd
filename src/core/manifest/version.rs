// ─── Version Metadata ───
// Parses a per-version metadata document: main class, client download,
// libraries with platform classifiers, and the asset index reference.

use std::collections::HashMap;

use serde::Deserialize;

use crate::core::error::{LauncherError, LauncherResult};

/// A fully parsed version metadata document. Immutable once parsed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionMetadata {
    pub main_class: String,
    pub downloads: VersionDownloads,
    #[serde(default)]
    pub libraries: Vec<LibraryEntry>,
    #[serde(default)]
    pub asset_index: Option<AssetIndexInfo>,
}

#[derive(Debug, Deserialize)]
pub struct VersionDownloads {
    pub client: DownloadArtifact,
}

/// Any single downloadable file referenced by the metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadArtifact {
    pub url: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub sha1: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetIndexInfo {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct LibraryEntry {
    #[serde(default)]
    pub downloads: Option<LibraryDownloads>,
}

#[derive(Debug, Deserialize)]
pub struct LibraryDownloads {
    #[serde(default)]
    pub artifact: Option<DownloadArtifact>,
    /// Platform-keyed native variants ("natives-windows", "natives-linux", ...).
    /// Entries for other platforms are inert.
    #[serde(default)]
    pub classifiers: Option<HashMap<String, DownloadArtifact>>,
}

impl VersionMetadata {
    /// Fetch and parse a version metadata document. Fetched fresh on every
    /// call; the install and launch phases each do their own round-trip.
    pub async fn fetch(client: &reqwest::Client, url: &str) -> LauncherResult<Self> {
        let response = client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LauncherError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let raw = response.text().await?;
        let metadata: VersionMetadata = serde_json::from_str(&raw)?;
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_metadata() {
        let metadata: VersionMetadata = serde_json::from_str(
            r#"{
                "mainClass": "net.minecraft.client.main.Main",
                "downloads": {"client": {"url": "http://x/client.jar", "sha1": "da39a3ee"}},
                "libraries": [
                    {"downloads": {"artifact": {"url": "http://x/a.jar", "path": "org/a/a.jar"}}},
                    {"downloads": {"classifiers": {
                        "natives-linux": {"url": "http://x/n.jar", "path": "org/n/n.jar"}
                    }}}
                ],
                "assetIndex": {"id": "5", "url": "http://x/5.json"}
            }"#,
        )
        .unwrap();

        assert_eq!(metadata.main_class, "net.minecraft.client.main.Main");
        assert_eq!(metadata.downloads.client.url, "http://x/client.jar");
        assert_eq!(metadata.libraries.len(), 2);
        assert_eq!(metadata.asset_index.unwrap().id, "5");
    }

    #[test]
    fn library_entry_without_downloads_parses() {
        let entry: LibraryEntry = serde_json::from_str(r#"{"name": "org:empty:1.0"}"#).unwrap();
        assert!(entry.downloads.is_none());
    }

    #[test]
    fn malformed_metadata_is_a_json_error() {
        let result: Result<VersionMetadata, _> =
            serde_json::from_str(r#"{"downloads": {"client": {"url": "http://x"}}}"#);
        assert!(result.is_err()); // mainClass missing
    }
}
