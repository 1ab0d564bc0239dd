// ─── Platform Detection ───
// Enumerated platform lookup instead of ad hoc OS-name string matching.

/// Platforms the launcher knows how to install natives for.
///
/// Anything that is not Windows or Linux is an explicit `Unsupported`
/// variant: the planner emits no native tasks for it rather than
/// silently misclassifying the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    Unsupported,
}

impl Platform {
    /// Detect the platform this process is running on.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Unsupported
        }
    }

    /// The classifier key used by version metadata for this platform's
    /// native libraries, if any.
    pub fn natives_classifier(self) -> Option<&'static str> {
        match self {
            Platform::Windows => Some("natives-windows"),
            Platform::Linux => Some("natives-linux"),
            Platform::Unsupported => None,
        }
    }

    /// Separator used when joining classpath entries.
    pub fn classpath_separator(self) -> &'static str {
        match self {
            Platform::Windows => ";",
            _ => ":",
        }
    }
}
