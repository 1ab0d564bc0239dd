// ─── Install Orchestrator ───
// Materializes a complete installation on disk, short-circuiting when
// the version is already installed.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::console::LogSink;
use crate::core::assets::{AssetIndex, RESOURCES_URL};
use crate::core::downloader::Downloader;
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::manifest::{VersionManifest, VersionMetadata, VERSION_MANIFEST_URL};
use crate::core::natives::extract_archive;
use crate::core::paths::InstallationPaths;
use crate::core::plan::{plan_install, DownloadTask};
use crate::core::platform::Platform;

/// Lifecycle of an installation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InstallState {
    /// Install started but has not finished; on-disk state may be partial.
    Installing,
    /// Every planned task completed.
    Completed,
}

/// Small on-disk record distinguishing a finished install from one that
/// died partway after writing `client.jar`. Persisted as `install.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallRecord {
    pub version: String,
    pub state: InstallState,
    pub updated_at: DateTime<Utc>,
}

impl InstallRecord {
    fn new(version: &str, state: InstallState) -> Self {
        Self {
            version: version.to_string(),
            state,
            updated_at: Utc::now(),
        }
    }

    /// Load the record if one exists. A missing or unreadable record is
    /// `None`: installations made before the record existed only have
    /// the `client.jar` marker.
    pub async fn load(paths: &InstallationPaths) -> Option<Self> {
        let raw = tokio::fs::read_to_string(paths.install_record()).await.ok()?;
        serde_json::from_str(&raw).ok()
    }

    async fn save(&self, paths: &InstallationPaths) -> LauncherResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        let path = paths.install_record();
        tokio::fs::write(&path, json)
            .await
            .map_err(|source| LauncherError::Io { path, source })?;
        Ok(())
    }
}

/// Drives manifest resolution, artifact planning, downloading, and
/// native extraction for one version.
pub struct InstallOrchestrator {
    client: reqwest::Client,
    downloader: Downloader,
    sink: Arc<dyn LogSink>,
    manifest_url: String,
    resources_url: String,
    /// Skip the asset wave entirely. Useful for fast debug installs.
    skip_assets: bool,
}

impl InstallOrchestrator {
    pub fn new(client: reqwest::Client, sink: Arc<dyn LogSink>) -> Self {
        let downloader = Downloader::new(client.clone(), Arc::clone(&sink));
        Self {
            client,
            downloader,
            sink,
            manifest_url: VERSION_MANIFEST_URL.to_string(),
            resources_url: RESOURCES_URL.to_string(),
            skip_assets: false,
        }
    }

    pub fn with_manifest_url(mut self, url: impl Into<String>) -> Self {
        self.manifest_url = url.into();
        self
    }

    pub fn with_resources_url(mut self, url: impl Into<String>) -> Self {
        self.resources_url = url.into();
        self
    }

    pub fn with_skip_assets(mut self, skip: bool) -> Self {
        self.skip_assets = skip;
        self
    }

    pub fn with_concurrency(mut self, n: usize) -> Self {
        self.downloader = self.downloader.with_concurrency(n);
        self
    }

    /// Whether this installation can be trusted as complete.
    ///
    /// The `client.jar` marker is the primary signal; the install record,
    /// when present, overrides it so a run that died mid-install is
    /// re-run instead of being mistaken for done.
    pub async fn is_installed(&self, paths: &InstallationPaths) -> bool {
        if !paths.client_jar().is_file() {
            return false;
        }
        match InstallRecord::load(paths).await {
            Some(record) => record.state == InstallState::Completed,
            None => true,
        }
    }

    /// Install `paths.version_id` unless it is already present.
    ///
    /// Any fetch or extraction failure aborts the whole call with the
    /// triggering error; tasks already finished stay on disk and are
    /// skipped by the next attempt.
    pub async fn ensure_installed(
        &self,
        paths: &InstallationPaths,
        platform: Platform,
        cancel: &CancellationToken,
    ) -> LauncherResult<()> {
        if self.is_installed(paths).await {
            self.sink.line(&format!(
                "Instance for version {} already exists. Skipping installation.",
                paths.version_id
            ));
            return Ok(());
        }

        paths.ensure_layout().await?;
        InstallRecord::new(&paths.version_id, InstallState::Installing)
            .save(paths)
            .await?;

        self.sink.line(&format!("manifest: {}", self.manifest_url));
        let manifest = VersionManifest::fetch(&self.client, &self.manifest_url).await?;
        let entry = manifest.resolve(&paths.version_id)?;
        let metadata = VersionMetadata::fetch(&self.client, &entry.url).await?;

        // Client binary, libraries, natives.
        let plan = plan_install(&metadata, platform, paths)?;
        info!(
            "Planned {} download tasks ({} native archives)",
            plan.tasks.len(),
            plan.native_archives.len()
        );
        self.downloader.fetch_all(&plan.tasks, cancel).await?;

        let natives_dir = paths.natives_dir();
        for archive in &plan.native_archives {
            self.sink
                .line(&format!("Extracting natives from {}", archive.display()));
            extract_archive(archive, &natives_dir).await?;
        }

        // Asset wave: the index document plus one task per object.
        if self.skip_assets {
            self.sink.line("Skipping asset download (fast install)");
        } else if let Some(asset_index) = &metadata.asset_index {
            self.download_assets(paths, &asset_index.url, &asset_index.id, cancel)
                .await?;
        }

        InstallRecord::new(&paths.version_id, InstallState::Completed)
            .save(paths)
            .await?;
        self.sink
            .line(&format!("Installed version {}", paths.version_id));
        Ok(())
    }

    async fn download_assets(
        &self,
        paths: &InstallationPaths,
        index_url: &str,
        index_id: &str,
        cancel: &CancellationToken,
    ) -> LauncherResult<()> {
        let index_path = paths.asset_indexes_dir().join(format!("{index_id}.json"));
        self.downloader
            .fetch(&DownloadTask {
                url: index_url.to_string(),
                dest: index_path.clone(),
                sha1: None,
            })
            .await?;

        let raw = tokio::fs::read_to_string(&index_path)
            .await
            .map_err(|source| LauncherError::Io {
                path: index_path,
                source,
            })?;
        let index: AssetIndex = serde_json::from_str(&raw)?;

        let tasks = index.plan_objects(&self.resources_url, paths)?;
        info!("Planned {} asset object tasks", tasks.len());
        self.downloader.fetch_all(&tasks, cancel).await
    }
}
