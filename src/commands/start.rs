use anyhow::{bail, Result};
use tokio::time::{Duration, Instant};
use tracing::warn;

use crate::adb::AdbClient;
use crate::avd;
use crate::cli::StartArgs;
use crate::config::Config;
use crate::console;
use crate::detect;
use crate::emulator;
use crate::output;
use crate::readiness;

/// Hard deadline for the whole launch-to-ready sequence.
const BOOT_DEADLINE: Duration = Duration::from_secs(800);

/// Nudges for the freshly booted device: unlock (82), home (1).
const POST_BOOT_KEYEVENTS: [u32; 2] = [82, 1];

/// Launch the emulator and drive it to ready.
///
/// Sequence: validate config, snapshot the registry, launch detached,
/// detect the new serial, poll the boot signals, finalize. Detection and
/// boot polling share one deadline; expiry anywhere fails the run. The
/// launched emulator is never cleaned up on failure (accepted
/// limitation, the CI host is disposable).
pub async fn cmd_start(args: StartArgs) -> Result<()> {
    let config = Config::from_args(&args)?;

    console::info("Configs:");
    console::detail(&format!("image_name: {}", config.request.image));
    if let Some(skin) = &config.request.skin {
        console::detail(&format!("skin: {}", skin));
    }
    if let Some(ram) = &config.request.ram {
        console::detail(&format!("ram: {}", ram));
    }

    // Catalog validation is skipped when no catalog is discoverable.
    if let Some(images) = avd::list_images() {
        if !images.iter().any(|img| img.name == config.request.image) {
            let names: Vec<&str> = images.iter().map(|img| img.name.as_str()).collect();
            console::info(&format!("Available AVD images: {:?}", names));
            bail!("AVD image with name ({}) not found", config.request.image);
        }
    }

    let adb = AdbClient::new(config.sdk.adb.clone());

    // Pre-launch snapshot, taken strictly before the launcher starts so
    // the new-device diff is well-defined for this launch.
    let before = adb.devices().await;
    if !before.is_empty() {
        console::info("Running emulators:");
        for serial in before.keys() {
            console::detail(&format!("* {}", serial));
        }
    }

    if let Err(e) = adb.start_server().await {
        warn!(error = %e, "adb start-server failed");
    }

    let deadline = Instant::now() + BOOT_DEADLINE;

    console::info("Starting emulator");
    console::detail(&emulator::command_line(&config.request));
    let mut launcher = emulator::spawn_emulator(&config.request)?;

    let serial = detect::wait_for_new_device(&adb, &before, deadline).await?;
    console::done(&format!("Emulator started: ({})", serial));

    console::info("Waiting for emulator boot");
    readiness::wait_for_boot(&adb, &serial, deadline).await?;

    // The launcher process is the device; if it already exited, the
    // serial we are about to hand out will not stay usable for long.
    if let Ok(Some(status)) = launcher.try_wait() {
        warn!(%status, "emulator launcher exited during boot");
    }

    for code in POST_BOOT_KEYEVENTS {
        adb.keyevent(&serial, code);
    }

    output::publish_serial(&serial).await;

    console::done(&format!("Emulator is ready to use: ({})", serial));
    Ok(())
}
