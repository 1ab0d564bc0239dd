// ─── Console Boundary ───
// The install/launch pipeline reports progress through an append-only
// sink instead of talking to a UI directly. The worker never blocks on
// whatever consumes the lines.

use std::io::Write;
use std::sync::Mutex;

/// Append-only, one-way channel from the pipeline to the presentation
/// surface. Implementations must tolerate concurrent writers.
pub trait LogSink: Send + Sync {
    fn line(&self, message: &str);
}

/// Sink for the CLI binary: one locked write per line so parallel
/// download workers cannot interleave output.
pub struct StdoutSink {
    lock: Mutex<()>,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self {
            lock: Mutex::new(()),
        }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for StdoutSink {
    fn line(&self, message: &str) {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{message}");
    }
}

/// In-memory sink for tests.
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(Vec::new()),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for MemorySink {
    fn line(&self, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
    }
}
