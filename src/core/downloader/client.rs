use std::sync::Arc;

use futures_util::stream::{self, StreamExt, TryStreamExt};
use reqwest::Client;
use sha1::{Digest, Sha1};
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::console::LogSink;
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::plan::DownloadTask;

/// Concurrent, idempotent, SHA-1 validated downloader.
///
/// A task whose destination already exists as a regular file is done:
/// no network traffic, no content re-check. Existence is the install
/// marker the whole pipeline relies on.
pub struct Downloader {
    client: Client,
    /// Maximum number of parallel downloads.
    concurrency: usize,
    /// Progress lines for the console.
    sink: Arc<dyn LogSink>,
}

impl Downloader {
    pub fn new(client: Client, sink: Arc<dyn LogSink>) -> Self {
        Self {
            client,
            concurrency: 8,
            sink,
        }
    }

    pub fn with_concurrency(mut self, n: usize) -> Self {
        self.concurrency = n;
        self
    }

    // ── Single file download ────────────────────────────

    /// Execute one task. Returns `false` when the destination already
    /// existed and nothing was fetched.
    ///
    /// The body is streamed to disk chunk by chunk so memory stays
    /// bounded regardless of artifact size, hashing incrementally when
    /// the task carries an expected SHA-1. On a hash mismatch the file
    /// is removed before erroring so a corrupt download cannot pass the
    /// existence check on the next run.
    pub async fn fetch(&self, task: &DownloadTask) -> LauncherResult<bool> {
        if task.dest.is_file() {
            debug!("Already present, skipping: {:?}", task.dest);
            return Ok(false);
        }

        self.sink
            .line(&format!("Downloading {} -> {}", task.url, task.dest.display()));

        // `create_dir_all` is race-safe: parallel tasks may share parents.
        if let Some(parent) = task.dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| LauncherError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let response = self.client.get(&task.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LauncherError::DownloadFailed {
                url: task.url.clone(),
                status: status.as_u16(),
            });
        }

        let mut file = tokio::fs::File::create(&task.dest)
            .await
            .map_err(|e| LauncherError::Io {
                path: task.dest.clone(),
                source: e,
            })?;

        let mut hasher = task.sha1.as_ref().map(|_| Sha1::new());
        let mut body = response.bytes_stream();
        while let Some(chunk) = body.try_next().await? {
            if let Some(hasher) = hasher.as_mut() {
                hasher.update(&chunk);
            }
            file.write_all(&chunk)
                .await
                .map_err(|e| LauncherError::Io {
                    path: task.dest.clone(),
                    source: e,
                })?;
        }
        file.flush().await.map_err(|e| LauncherError::Io {
            path: task.dest.clone(),
            source: e,
        })?;
        drop(file);

        if let (Some(hasher), Some(expected)) = (hasher, task.sha1.as_deref()) {
            let actual = hex::encode(hasher.finalize());
            if actual != expected {
                let _ = tokio::fs::remove_file(&task.dest).await;
                return Err(LauncherError::Sha1Mismatch {
                    path: task.dest.clone(),
                    expected: expected.to_string(),
                    actual,
                });
            }
        }

        debug!("Downloaded: {} -> {:?}", task.url, task.dest);
        Ok(true)
    }

    // ── Batch concurrent downloads ──────────────────────

    /// Execute independent tasks with bounded parallelism. The first
    /// failure aborts the batch; the cancellation token is honored
    /// between tasks.
    pub async fn fetch_all(
        &self,
        tasks: &[DownloadTask],
        cancel: &CancellationToken,
    ) -> LauncherResult<()> {
        stream::iter(tasks)
            .map(|task| async move {
                if cancel.is_cancelled() {
                    return Err(LauncherError::Cancelled);
                }
                self.fetch(task).await.map(|_| ())
            })
            .buffer_unordered(self.concurrency)
            .try_collect::<()>()
            .await
    }
}
