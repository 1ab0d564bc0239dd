// ─── MClaunch Core ───
// Install/resolve pipeline for a single-version Minecraft installation.
//
// Architecture:
//   core/
//     manifest/   — version index resolution + per-version metadata
//     plan        — platform-filtered download task planning
//     downloader/ — idempotent, concurrent, SHA-1 validated downloads
//     natives     — native archive extraction
//     assets      — asset index + content-addressed object planning
//     install     — install orchestration + on-disk state record
//     launch      — classpath assembly + process spawn/supervision
//     platform    — enumerated OS detection
//     paths       — per-version installation layout

pub mod assets;
pub mod downloader;
pub mod error;
pub mod http;
pub mod install;
pub mod launch;
pub mod manifest;
pub mod natives;
pub mod paths;
pub mod plan;
pub mod platform;
