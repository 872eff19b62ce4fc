use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::process::Command;
use tracing::debug;

/// Connection state `adb devices` reports once a device is fully
/// enumerated and accepting commands.
pub const STATE_READY: &str = "device";

/// Point-in-time snapshot of running emulator instances: serial -> state.
///
/// Rebuilt fresh on every query; callers never mutate a snapshot.
pub type DeviceRegistry = BTreeMap<String, String>;

/// Thin client around the `adb` binary.
///
/// Every device-control query goes through here, so the lifecycle logic
/// only ever sees parsed values, never raw tool output.
#[derive(Debug, Clone)]
pub struct AdbClient {
    adb: PathBuf,
}

impl AdbClient {
    pub fn new(adb: PathBuf) -> Self {
        Self { adb }
    }

    /// Start the adb server so later queries don't race its cold start.
    pub async fn start_server(&self) -> Result<()> {
        let output = Command::new(&self.adb)
            .arg("start-server")
            .output()
            .await
            .context("running adb start-server")?;

        if !output.status.success() {
            anyhow::bail!(
                "adb start-server exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(())
    }

    /// Snapshot the emulator registry via `adb devices`.
    ///
    /// A tool failure or empty output yields an empty registry; emptiness
    /// is a valid answer here, the caller's retry loop deals with it.
    pub async fn devices(&self) -> DeviceRegistry {
        let output = match Command::new(&self.adb).arg("devices").output().await {
            Ok(output) => output,
            Err(e) => {
                debug!(error = %e, "adb devices failed to execute");
                return DeviceRegistry::new();
            }
        };

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        parse_devices(&combined)
    }

    /// Read one system property from the device.
    pub async fn getprop(&self, serial: &str, name: &str) -> Result<String> {
        let output = Command::new(&self.adb)
            .args(["-s", serial, "shell", "getprop", name])
            .output()
            .await
            .with_context(|| format!("querying {} on {}", name, serial))?;

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Fire-and-forget input nudge.
    ///
    /// Failures are deliberately swallowed; these are post-boot
    /// conveniences, not part of readiness.
    pub fn keyevent(&self, serial: &str, code: u32) {
        let _ = Command::new(&self.adb)
            .args(["-s", serial, "shell", "input", "keyevent", &code.to_string()])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
    }
}

/// Parse `adb devices` output into a registry.
///
/// Only lines of the form `emulator-<digits> <state>` are kept; the
/// header line, blank lines and USB-attached serials all fall through.
pub fn parse_devices(output: &str) -> DeviceRegistry {
    let mut devices = DeviceRegistry::new();

    for line in output.lines() {
        let mut parts = line.split_whitespace();
        let (Some(serial), Some(state)) = (parts.next(), parts.next()) else {
            continue;
        };
        let Some(port) = serial.strip_prefix("emulator-") else {
            continue;
        };
        if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        devices.insert(serial.to_string(), state.to_string());
    }

    devices
}
