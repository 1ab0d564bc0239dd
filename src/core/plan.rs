// ─── Artifact Planner ───
// Walks version metadata and emits the flat list of download tasks for
// the current platform.

use std::path::PathBuf;

use tracing::debug;

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::manifest::{DownloadArtifact, VersionMetadata};
use crate::core::paths::InstallationPaths;
use crate::core::platform::Platform;

/// Idempotent unit of download work. Executing a task whose destination
/// already exists is a no-op.
#[derive(Debug, Clone)]
pub struct DownloadTask {
    pub url: String,
    pub dest: PathBuf,
    /// Expected SHA-1, when the source document declares one. Verified
    /// after the streamed write.
    pub sha1: Option<String>,
}

/// Everything the install phase has to materialize for one version:
/// the download tasks in metadata order, plus which of those downloads
/// are native archives that need extraction afterwards.
#[derive(Debug, Default)]
pub struct InstallPlan {
    pub tasks: Vec<DownloadTask>,
    pub native_archives: Vec<PathBuf>,
}

/// Plan the client binary, library, and native downloads for `platform`.
///
/// Task order follows the metadata's library order; order has no
/// correctness significance but keeps logging deterministic. A library
/// entry with neither an artifact nor a classifier matching the platform
/// contributes nothing; an applicable artifact without a `path` is
/// malformed metadata, not a silent skip.
pub fn plan_install(
    metadata: &VersionMetadata,
    platform: Platform,
    paths: &InstallationPaths,
) -> LauncherResult<InstallPlan> {
    let mut plan = InstallPlan::default();
    let libs_dir = paths.libraries_dir();

    // Client binary: always one task, at the canonical marker path.
    plan.tasks.push(DownloadTask {
        url: metadata.downloads.client.url.clone(),
        dest: paths.client_jar(),
        sha1: metadata.downloads.client.sha1.clone(),
    });

    let native_key = platform.natives_classifier();

    for library in &metadata.libraries {
        let Some(downloads) = &library.downloads else {
            continue;
        };

        if let Some(artifact) = &downloads.artifact {
            plan.tasks.push(DownloadTask {
                url: artifact.url.clone(),
                dest: libs_dir.join(library_path(artifact)?),
                sha1: artifact.sha1.clone(),
            });
        }

        let Some(classifiers) = &downloads.classifiers else {
            continue;
        };
        let Some(key) = native_key else {
            debug!("Platform has no native classifier, skipping natives");
            continue;
        };
        if let Some(native) = classifiers.get(key) {
            let dest = libs_dir.join(library_path(native)?);
            plan.tasks.push(DownloadTask {
                url: native.url.clone(),
                dest: dest.clone(),
                sha1: native.sha1.clone(),
            });
            plan.native_archives.push(dest);
        }
    }

    Ok(plan)
}

/// Library artifacts and classifiers must carry the relative storage
/// path; the client download is the only artifact without one.
fn library_path(artifact: &DownloadArtifact) -> LauncherResult<&str> {
    artifact.path.as_deref().ok_or_else(|| {
        LauncherError::MalformedData(format!("library artifact {} has no path", artifact.url))
    })
}
