use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use mclaunch::config::LauncherConfig;
use mclaunch::console::{LogSink, StdoutSink};
use mclaunch::core::error::LauncherResult;
use mclaunch::core::http::build_http_client;
use mclaunch::core::install::InstallOrchestrator;
use mclaunch::core::launch;
use mclaunch::core::manifest::{VersionManifest, VersionMetadata, VERSION_MANIFEST_URL};
use mclaunch::core::paths::InstallationPaths;
use mclaunch::core::platform::Platform;

const MCLAUNCH_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    // Structured logging for diagnostics; user-facing progress goes
    // through the console sink.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let sink: Arc<dyn LogSink> = Arc::new(StdoutSink::new());

    let config = match LauncherConfig::load(Path::new("config.toml")) {
        Ok(config) => config,
        Err(e) => {
            sink.line(&format!("Error: Config Error\n{e}"));
            std::process::exit(1);
        }
    };

    // Java must be reachable on PATH before anything is downloaded.
    if which::which("java").is_err() {
        sink.line(
            "Java is required to run this launcher: either it is not installed \
             or not on your system's PATH. Check the README.md for downloads.",
        );
        std::process::exit(1);
    }

    sink.line(&format!(
        "\nMClaunch:\n  MClaunch Version: {MCLAUNCH_VERSION}\n  Minecraft Version: {}\n\n  \
         Allocated Memory: {}\n\n  USERNAME: {}\n  UUID: {}\n  USERTYPE: {}\n",
        config.installer.version,
        config.java.max_memory,
        config.runtime.username,
        config.runtime.uuid,
        config.runtime.usertype,
    ));

    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_cancel.cancel();
        }
    });

    if let Err(e) = run_pipeline(&config, Arc::clone(&sink), &cancel).await {
        sink.line(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

/// Install (if needed) then launch, relaying game output until exit.
async fn run_pipeline(
    config: &LauncherConfig,
    sink: Arc<dyn LogSink>,
    cancel: &CancellationToken,
) -> LauncherResult<()> {
    let client = build_http_client()?;
    let platform = Platform::current();
    let paths = InstallationPaths::new(Path::new("instances"), &config.installer.version);

    let orchestrator = InstallOrchestrator::new(client.clone(), Arc::clone(&sink))
        .with_skip_assets(config.installer.skip_assets);
    orchestrator
        .ensure_installed(&paths, platform, cancel)
        .await?;

    // The launch phase resolves metadata on its own rather than reusing
    // the install phase's copy.
    let manifest = VersionManifest::fetch(&client, VERSION_MANIFEST_URL).await?;
    let entry = manifest.resolve(&config.installer.version)?;
    let metadata = VersionMetadata::fetch(&client, &entry.url).await?;

    let plan = launch::build_launch_plan(
        &metadata,
        &paths,
        platform,
        &config.identity(),
        &config.java.max_memory,
    );

    sink.line("Launching Minecraft:");
    sink.line(&plan.display_command());
    launch::run(&plan, sink).await
}
