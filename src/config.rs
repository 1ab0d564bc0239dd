// ─── Configuration ───
// TOML configuration surface. Loaded once at startup and passed by
// reference into the pipeline; no process-wide globals.

use std::path::Path;

use serde::Deserialize;

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::launch::RuntimeIdentity;

#[derive(Debug, Deserialize)]
pub struct LauncherConfig {
    pub installer: InstallerConfig,
    pub java: JavaConfig,
    pub runtime: RuntimeConfig,
}

#[derive(Debug, Deserialize)]
pub struct InstallerConfig {
    /// Version identifier to install and launch.
    pub version: String,
    /// Skip the asset wave for fast debug installs.
    #[serde(default)]
    pub skip_assets: bool,
}

#[derive(Debug, Deserialize)]
pub struct JavaConfig {
    /// Max heap size passed to -Xmx, e.g. "2G".
    pub max_memory: String,
}

#[derive(Debug, Deserialize)]
pub struct RuntimeConfig {
    pub username: String,
    pub uuid: String,
    pub accesstoken: String,
    pub usertype: String,
}

impl LauncherConfig {
    pub fn load(path: &Path) -> LauncherResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| LauncherError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> LauncherResult<Self> {
        toml::from_str(raw).map_err(|e| LauncherError::Other(format!("Config error: {e}")))
    }

    pub fn identity(&self) -> RuntimeIdentity {
        RuntimeIdentity {
            username: self.runtime.username.clone(),
            uuid: self.runtime.uuid.clone(),
            access_token: self.runtime.accesstoken.clone(),
            user_type: self.runtime.usertype.clone(),
        }
    }
}
