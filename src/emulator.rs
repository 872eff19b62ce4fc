use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tracing::{info, warn};

use crate::config::LaunchRequest;

/// Start the emulator as a detached background process.
///
/// The child's exit is never awaited: the emulator process IS the device,
/// and on success it outlives this run. Its stdout/stderr are streamed
/// into the log so boot problems stay visible in the CI output.
pub fn spawn_emulator(request: &LaunchRequest) -> Result<Child> {
    let mut cmd = Command::new(&request.launcher);
    cmd.args(request.launcher_args());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning emulator launcher {}", request.launcher.display()))?;

    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                info!(target: "emulator", "{}", line);
            }
        });
    }

    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                warn!(target: "emulator", "{}", line);
            }
        });
    }

    Ok(child)
}

/// Human-readable launch command for the config banner.
pub fn command_line(request: &LaunchRequest) -> String {
    let mut parts = vec![request.launcher.display().to_string()];
    parts.extend(request.launcher_args());
    parts.join(" ")
}
