use std::path::{Path, PathBuf};

use crate::core::error::{LauncherError, LauncherResult};

/// On-disk layout of a single version installation.
///
/// Each version gets its own folder under `instances/<version>/` with:
/// - `libraries/`         — artifact and native jars (metadata-relative paths)
/// - `natives/`           — extracted native binaries
/// - `game/`              — working directory for the launched process
/// - `assets/`            — asset indexes and content-addressed objects
/// - `client.jar`         — the client binary, also the completion marker
/// - `install.json`       — install state record
#[derive(Debug, Clone)]
pub struct InstallationPaths {
    pub base_dir: PathBuf,
    pub version_id: String,
}

impl InstallationPaths {
    pub fn new(instances_root: &Path, version_id: &str) -> Self {
        Self {
            base_dir: instances_root.join(version_id),
            version_id: version_id.to_string(),
        }
    }

    pub fn libraries_dir(&self) -> PathBuf {
        self.base_dir.join("libraries")
    }

    pub fn natives_dir(&self) -> PathBuf {
        self.base_dir.join("natives")
    }

    pub fn game_dir(&self) -> PathBuf {
        self.base_dir.join("game")
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.base_dir.join("assets")
    }

    pub fn asset_indexes_dir(&self) -> PathBuf {
        self.assets_dir().join("indexes")
    }

    pub fn asset_objects_dir(&self) -> PathBuf {
        self.assets_dir().join("objects")
    }

    pub fn client_jar(&self) -> PathBuf {
        self.base_dir.join("client.jar")
    }

    pub fn install_record(&self) -> PathBuf {
        self.base_dir.join("install.json")
    }

    /// Create the directory skeleton eagerly to reduce first-launch failures.
    pub async fn ensure_layout(&self) -> LauncherResult<()> {
        for dir in [
            self.base_dir.clone(),
            self.libraries_dir(),
            self.natives_dir(),
            self.game_dir(),
            self.assets_dir(),
        ] {
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|source| LauncherError::Io { path: dir, source })?;
        }
        Ok(())
    }
}
