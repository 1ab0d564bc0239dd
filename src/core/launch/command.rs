// ─── Launch Command ───
// Assembles the java invocation and supervises the spawned game process.

use std::process::Stdio;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{debug, info};

use crate::console::LogSink;
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::manifest::VersionMetadata;
use crate::core::paths::InstallationPaths;
use crate::core::platform::Platform;

use super::classpath::build_classpath;

/// Identity supplied by the configuration surface; this launcher does
/// not obtain tokens itself.
#[derive(Debug, Clone)]
pub struct RuntimeIdentity {
    pub username: String,
    pub uuid: String,
    pub access_token: String,
    pub user_type: String,
}

/// Fully assembled java invocation, ready to spawn.
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    pub java_bin: String,
    pub jvm_args: Vec<String>,
    pub main_class: String,
    pub game_args: Vec<String>,
    pub game_dir: std::path::PathBuf,
}

/// Build the launch plan from installed artifacts and version metadata.
///
/// The classpath is derived fresh from disk on every launch; the game
/// argument vector uses the fixed flag names the client expects, with
/// the identity values passed through verbatim.
pub fn build_launch_plan(
    metadata: &VersionMetadata,
    paths: &InstallationPaths,
    platform: Platform,
    identity: &RuntimeIdentity,
    max_memory: &str,
) -> LaunchPlan {
    let classpath = build_classpath(paths, platform);
    let asset_index_id = metadata
        .asset_index
        .as_ref()
        .map(|ai| ai.id.as_str())
        .unwrap_or("legacy");

    let jvm_args = vec![
        format!("-Xmx{max_memory}"),
        format!("-Djava.library.path={}", paths.natives_dir().display()),
        "-cp".to_string(),
        classpath,
    ];

    let game_args = vec![
        "--username".to_string(),
        identity.username.clone(),
        "--version".to_string(),
        paths.version_id.clone(),
        "--gameDir".to_string(),
        paths.game_dir().display().to_string(),
        "--assetsDir".to_string(),
        paths.assets_dir().display().to_string(),
        "--assetIndex".to_string(),
        asset_index_id.to_string(),
        "--uuid".to_string(),
        identity.uuid.clone(),
        "--accessToken".to_string(),
        identity.access_token.clone(),
        "--userType".to_string(),
        identity.user_type.clone(),
        "--versionType".to_string(),
        "release".to_string(),
        "--userProperties".to_string(),
        "{}".to_string(),
    ];

    LaunchPlan {
        java_bin: "java".to_string(),
        jvm_args,
        main_class: metadata.main_class.clone(),
        game_args,
        game_dir: paths.game_dir(),
    }
}

impl LaunchPlan {
    /// Render the full command line for logging.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.java_bin.clone()];
        parts.extend(self.jvm_args.iter().cloned());
        parts.push(self.main_class.clone());
        parts.extend(self.game_args.iter().cloned());
        parts.join(" ")
    }
}

/// Spawn the game and relay its combined output to the sink, line by
/// line, until both streams close. Blocks the calling task for the
/// child's whole lifetime.
pub async fn run(plan: &LaunchPlan, sink: Arc<dyn LogSink>) -> LauncherResult<()> {
    info!("Launching with java binary: {}", plan.java_bin);
    debug!("Command: {}", plan.display_command());

    let mut child = tokio::process::Command::new(&plan.java_bin)
        .args(&plan.jvm_args)
        .arg(&plan.main_class)
        .args(&plan.game_args)
        .current_dir(&plan.game_dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| LauncherError::Spawn(e.to_string()))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| LauncherError::Spawn("child stdout not captured".into()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| LauncherError::Spawn("child stderr not captured".into()))?;

    // Both streams feed the same sink; lines appear in arrival order.
    let out_relay = tokio::spawn(relay_lines(stdout, Arc::clone(&sink)));
    let err_relay = tokio::spawn(relay_lines(stderr, Arc::clone(&sink)));

    let status = child.wait().await.map_err(|e| LauncherError::Spawn(e.to_string()))?;
    let _ = out_relay.await;
    let _ = err_relay.await;

    sink.line(&format!("Process exited: {status}"));
    Ok(())
}

async fn relay_lines<R: AsyncRead + Unpin>(stream: R, sink: Arc<dyn LogSink>) {
    let mut lines = BufReader::new(stream).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        sink.line(&line);
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn metadata() -> VersionMetadata {
        serde_json::from_value(serde_json::json!({
            "mainClass": "net.minecraft.client.main.Main",
            "downloads": {"client": {"url": "http://x/client.jar"}},
            "assetIndex": {"id": "5", "url": "http://x/5.json"}
        }))
        .unwrap()
    }

    fn identity() -> RuntimeIdentity {
        RuntimeIdentity {
            username: "Alex".into(),
            uuid: "0000-1111".into(),
            access_token: "token-abc".into(),
            user_type: "legacy".into(),
        }
    }

    fn flag_value<'a>(args: &'a [String], flag: &str) -> &'a str {
        let idx = args.iter().position(|a| a == flag).unwrap();
        &args[idx + 1]
    }

    #[test]
    fn identity_values_pass_through_verbatim() {
        let paths = InstallationPaths::new(Path::new("/tmp/instances"), "1.20.1");
        let plan = build_launch_plan(&metadata(), &paths, Platform::Linux, &identity(), "2G");

        assert_eq!(flag_value(&plan.game_args, "--username"), "Alex");
        assert_eq!(flag_value(&plan.game_args, "--version"), "1.20.1");
        assert_eq!(flag_value(&plan.game_args, "--uuid"), "0000-1111");
        assert_eq!(flag_value(&plan.game_args, "--accessToken"), "token-abc");
        assert_eq!(flag_value(&plan.game_args, "--userType"), "legacy");
        assert_eq!(flag_value(&plan.game_args, "--versionType"), "release");
        assert_eq!(flag_value(&plan.game_args, "--userProperties"), "{}");
        assert_eq!(flag_value(&plan.game_args, "--assetIndex"), "5");
    }

    #[test]
    fn jvm_args_carry_memory_natives_and_classpath() {
        let paths = InstallationPaths::new(Path::new("/tmp/instances"), "1.20.1");
        let plan = build_launch_plan(&metadata(), &paths, Platform::Linux, &identity(), "2G");

        assert_eq!(plan.jvm_args[0], "-Xmx2G");
        assert_eq!(
            plan.jvm_args[1],
            format!("-Djava.library.path={}", paths.natives_dir().display())
        );
        assert_eq!(plan.jvm_args[2], "-cp");
        assert!(plan.jvm_args[3].ends_with("client.jar"));
        assert_eq!(plan.main_class, "net.minecraft.client.main.Main");
    }

    #[tokio::test]
    async fn run_relays_child_output_to_sink() {
        let sink = Arc::new(crate::console::MemorySink::new());
        let plan = LaunchPlan {
            java_bin: "sh".into(),
            jvm_args: vec!["-c".into(), "echo out-line; echo err-line 1>&2".into()],
            main_class: String::new(),
            game_args: vec![],
            game_dir: std::env::temp_dir(),
        };

        // Main class / game args are empty strings here; `sh -c` ignores
        // the extra empty argument.
        run(&plan, Arc::clone(&sink) as Arc<dyn LogSink>).await.unwrap();

        let lines = sink.lines();
        assert!(lines.iter().any(|l| l == "out-line"));
        assert!(lines.iter().any(|l| l == "err-line"));
        assert!(lines.last().unwrap().starts_with("Process exited:"));
    }

    #[tokio::test]
    async fn missing_binary_is_a_spawn_error() {
        let sink = Arc::new(crate::console::MemorySink::new());
        let plan = LaunchPlan {
            java_bin: "definitely-not-a-real-binary".into(),
            jvm_args: vec![],
            main_class: "Main".into(),
            game_args: vec![],
            game_dir: std::env::temp_dir(),
        };

        let result = run(&plan, sink as Arc<dyn LogSink>).await;
        assert!(matches!(result, Err(LauncherError::Spawn(_))));
    }
}
