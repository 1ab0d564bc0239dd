// ─── Classpath Builder ───
// Discovers installed jars and joins them into the launch classpath.

use std::path::Path;

use walkdir::WalkDir;

use crate::core::paths::InstallationPaths;
use crate::core::platform::Platform;

/// Build the classpath string: every `*.jar` under `libraries/` in
/// traversal order, then `client.jar`, joined with the platform
/// separator. Order among independent jars is not semantically
/// significant for this launch target.
pub fn build_classpath(paths: &InstallationPaths, platform: Platform) -> String {
    let mut entries: Vec<String> = Vec::new();

    for entry in WalkDir::new(paths.libraries_dir())
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
    {
        if has_jar_extension(entry.path()) {
            entries.push(entry.path().to_string_lossy().into_owned());
        }
    }
    entries.push(paths.client_jar().to_string_lossy().into_owned());

    entries.join(platform.classpath_separator())
}

fn has_jar_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "jar")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_jars_plus_client_make_four_entries() {
        let temp = tempfile::tempdir().unwrap();
        let paths = InstallationPaths::new(temp.path(), "1.20.1");

        let libs = paths.libraries_dir();
        std::fs::create_dir_all(libs.join("org/a")).unwrap();
        std::fs::create_dir_all(libs.join("org/b")).unwrap();
        std::fs::write(libs.join("org/a/a.jar"), b"a").unwrap();
        std::fs::write(libs.join("org/b/b.jar"), b"b").unwrap();
        std::fs::write(libs.join("c.jar"), b"c").unwrap();
        std::fs::write(libs.join("readme.txt"), b"not a jar").unwrap();

        let classpath = build_classpath(&paths, Platform::Linux);
        let entries: Vec<&str> = classpath.split(':').collect();

        assert_eq!(entries.len(), 4);
        assert!(entries.iter().filter(|e| e.ends_with(".jar")).count() == 4);
        assert_eq!(
            *entries.last().unwrap(),
            paths.client_jar().to_string_lossy().as_ref()
        );
        assert!(!classpath.contains("readme.txt"));
    }

    #[test]
    fn missing_library_dir_still_yields_client_jar() {
        let temp = tempfile::tempdir().unwrap();
        let paths = InstallationPaths::new(temp.path(), "1.20.1");

        let classpath = build_classpath(&paths, Platform::Linux);
        assert_eq!(classpath, paths.client_jar().to_string_lossy());
    }
}
