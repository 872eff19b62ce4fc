use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

use crate::cli::StartArgs;

/// Resolved locations of the SDK binaries this run shells out to.
///
/// Built once at startup and passed into the components that need it;
/// nothing reads the SDK location from ambient state.
#[derive(Debug, Clone)]
pub struct SdkPaths {
    pub adb: PathBuf,
    pub emulator: PathBuf,
}

impl SdkPaths {
    pub fn resolve(sdk_home: &Path) -> Self {
        Self::resolve_for_os(sdk_home, std::env::consts::OS)
    }

    // Linux SDK distributions ship the launcher as emulator64-arm.
    fn resolve_for_os(sdk_home: &Path, os: &str) -> Self {
        let launcher = if os == "linux" {
            "emulator64-arm"
        } else {
            "emulator"
        };

        Self {
            adb: sdk_home.join("platform-tools").join("adb"),
            emulator: sdk_home.join("tools").join(launcher),
        }
    }
}

/// Immutable description of the emulator launch, built once from the
/// validated inputs.
#[derive(Debug, Clone)]
pub struct LaunchRequest {
    pub image: String,
    pub skin: Option<String>,
    pub ram: Option<String>,
    pub launcher: PathBuf,
}

impl LaunchRequest {
    /// Arguments for the emulator launcher.
    ///
    /// The headless flags are always on: CI machines have no display or
    /// audio, and the boot animation only delays the readiness signals.
    /// A custom RAM size is applied only when one was actually supplied.
    pub fn launcher_args(&self) -> Vec<String> {
        let mut args = vec![
            "-avd".to_string(),
            self.image.clone(),
            "-no-boot-anim".to_string(),
            "-noaudio".to_string(),
            "-no-window".to_string(),
        ];

        match &self.skin {
            Some(skin) => {
                args.push("-skin".to_string());
                args.push(skin.clone());
            }
            None => args.push("-noskin".to_string()),
        }

        if let Some(ram) = &self.ram {
            args.push("-memory".to_string());
            args.push(ram.clone());
        }

        args
    }
}

/// Validated run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub request: LaunchRequest,
    pub sdk: SdkPaths,
}

impl Config {
    /// Validate the raw inputs.
    ///
    /// Required inputs are Options at the clap layer so a missing one
    /// fails here with exit code 1 instead of clap's usage error, and an
    /// empty string counts the same as an absent value.
    pub fn from_args(args: &StartArgs) -> Result<Self> {
        let image = non_empty(args.image.as_deref())
            .ok_or_else(|| anyhow!("missing required input: image_name"))?
            .to_string();
        let sdk_home = non_empty(args.sdk_home.as_deref())
            .ok_or_else(|| anyhow!("missing required input: platform_tools_home"))?;

        let sdk = SdkPaths::resolve(Path::new(sdk_home));
        let request = LaunchRequest {
            image,
            skin: non_empty(args.skin.as_deref()).map(str::to_string),
            ram: non_empty(args.ram.as_deref()).map(str::to_string),
            launcher: sdk.emulator.clone(),
        };

        Ok(Self { request, sdk })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
