// ─── Native Archive Extraction ───
// Unpacks a downloaded native-library archive into the natives directory.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::error::{LauncherError, LauncherResult};

/// Unpack every entry of `archive_path` into `target_dir`, creating the
/// directory if needed and overwriting files of the same name.
///
/// The zip walk is blocking, so it runs on the blocking pool.
pub async fn extract_archive(archive_path: &Path, target_dir: &Path) -> LauncherResult<()> {
    tokio::fs::create_dir_all(target_dir)
        .await
        .map_err(|e| LauncherError::Io {
            path: target_dir.to_path_buf(),
            source: e,
        })?;

    let archive_path = archive_path.to_path_buf();
    let target_dir = target_dir.to_path_buf();

    tokio::task::spawn_blocking(move || extract_blocking(&archive_path, &target_dir))
        .await
        .map_err(|e| LauncherError::Other(format!("Task join error: {e}")))?
}

fn extract_blocking(archive_path: &Path, target_dir: &Path) -> LauncherResult<()> {
    let file = std::fs::File::open(archive_path).map_err(|e| LauncherError::Io {
        path: archive_path.to_path_buf(),
        source: e,
    })?;
    let mut archive = zip::ZipArchive::new(file)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;

        // Entry names come from the archive; refuse anything that would
        // escape the target directory.
        let Some(relative) = entry.enclosed_name() else {
            continue;
        };
        let dest: PathBuf = target_dir.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&dest).map_err(|e| LauncherError::Io {
                path: dest.clone(),
                source: e,
            })?;
            continue;
        }

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|e| LauncherError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut out = std::fs::File::create(&dest).map_err(|e| LauncherError::Io {
            path: dest.clone(),
            source: e,
        })?;
        std::io::copy(&mut entry, &mut out).map_err(|e| LauncherError::Io {
            path: dest.clone(),
            source: e,
        })?;
        debug!("Extracted native entry: {:?}", dest);
    }

    Ok(())
}
