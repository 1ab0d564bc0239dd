pub mod index;
pub mod version;

pub use index::{VersionEntry, VersionManifest, VERSION_MANIFEST_URL};
pub use version::{
    AssetIndexInfo, DownloadArtifact, LibraryDownloads, LibraryEntry, VersionDownloads,
    VersionMetadata,
};
