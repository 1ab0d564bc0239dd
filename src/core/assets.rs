// ─── Asset Index ───
// Maps logical asset names to content hashes and derives the
// content-addressed download list.

use std::collections::HashMap;

use serde::Deserialize;

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::paths::InstallationPaths;
use crate::core::plan::DownloadTask;

pub const RESOURCES_URL: &str = "https://resources.download.minecraft.net";

/// Top-level asset index document.
#[derive(Debug, Deserialize)]
pub struct AssetIndex {
    pub objects: HashMap<String, AssetObject>,
}

#[derive(Debug, Deserialize)]
pub struct AssetObject {
    pub hash: String,
}

impl AssetIndex {
    /// One task per object, stored content-addressed: the first two hex
    /// characters shard the objects directory, the full hash is the file
    /// name. The hash doubles as the expected SHA-1.
    ///
    /// Hashes come from a remote document, so anything that is not hex
    /// is rejected rather than sliced into a path.
    pub fn plan_objects(
        &self,
        objects_base_url: &str,
        paths: &InstallationPaths,
    ) -> LauncherResult<Vec<DownloadTask>> {
        let objects_dir = paths.asset_objects_dir();

        self.objects
            .values()
            .map(|object| {
                let hash = &object.hash;
                if hash.len() < 2 || !hash.bytes().all(|b| b.is_ascii_hexdigit()) {
                    return Err(LauncherError::MalformedData(format!(
                        "asset object hash is not hex: {hash:?}"
                    )));
                }
                let shard = &hash[..2];
                Ok(DownloadTask {
                    url: format!("{objects_base_url}/{shard}/{hash}"),
                    dest: objects_dir.join(shard).join(hash),
                    sha1: Some(hash.clone()),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn object_path_is_sharded_by_hash_prefix() {
        let index: AssetIndex = serde_json::from_str(
            r#"{"objects": {"foo": {"hash": "ab12cd34ab12cd34ab12cd34ab12cd34ab12cd34"}}}"#,
        )
        .unwrap();

        let paths = InstallationPaths::new(Path::new("/tmp/instances"), "1.20.1");
        let tasks = index.plan_objects(RESOURCES_URL, &paths).unwrap();

        assert_eq!(tasks.len(), 1);
        assert_eq!(
            tasks[0].url,
            format!("{RESOURCES_URL}/ab/ab12cd34ab12cd34ab12cd34ab12cd34ab12cd34")
        );
        assert_eq!(
            tasks[0].dest,
            paths
                .asset_objects_dir()
                .join("ab")
                .join("ab12cd34ab12cd34ab12cd34ab12cd34ab12cd34")
        );
        assert_eq!(
            tasks[0].sha1.as_deref(),
            Some("ab12cd34ab12cd34ab12cd34ab12cd34ab12cd34")
        );
    }

    #[test]
    fn truncated_hash_is_malformed() {
        let index: AssetIndex =
            serde_json::from_str(r#"{"objects": {"bad": {"hash": "a"}}}"#).unwrap();
        let paths = InstallationPaths::new(Path::new("/tmp/instances"), "1.20.1");
        assert!(matches!(
            index.plan_objects(RESOURCES_URL, &paths),
            Err(LauncherError::MalformedData(_))
        ));
    }

    #[test]
    fn non_ascii_hash_is_malformed_not_a_panic() {
        let index: AssetIndex =
            serde_json::from_str(r#"{"objects": {"bad": {"hash": "aérest"}}}"#).unwrap();
        let paths = InstallationPaths::new(Path::new("/tmp/instances"), "1.20.1");
        assert!(matches!(
            index.plan_objects(RESOURCES_URL, &paths),
            Err(LauncherError::MalformedData(_))
        ));
    }

    #[test]
    fn non_hex_ascii_hash_is_malformed() {
        let index: AssetIndex =
            serde_json::from_str(r#"{"objects": {"bad": {"hash": "zz12cd34"}}}"#).unwrap();
        let paths = InstallationPaths::new(Path::new("/tmp/instances"), "1.20.1");
        assert!(matches!(
            index.plan_objects(RESOURCES_URL, &paths),
            Err(LauncherError::MalformedData(_))
        ));
    }
}
