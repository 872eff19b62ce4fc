use anyhow::{bail, Result};
use tokio::time::{sleep, timeout_at, Duration, Instant};
use tracing::debug;

use crate::adb::AdbClient;

const POLL_INTERVAL: Duration = Duration::from_secs(5);

const DEV_BOOT_PROP: &str = "dev.bootcomplete";
const SYS_BOOT_PROP: &str = "sys.boot_completed";
const BOOTANIM_PROP: &str = "init.svc.bootanim";

/// One polling round's worth of boot-completion signals.
///
/// All three are queried fresh every round; a round where they disagree
/// is discarded entirely rather than partially remembered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootProbes {
    pub dev_boot_complete: bool,
    pub sys_boot_completed: bool,
    pub bootanim_stopped: bool,
}

impl BootProbes {
    /// Boot is complete only when every signal agrees in the same round.
    pub fn all_complete(&self) -> bool {
        self.dev_boot_complete && self.sys_boot_completed && self.bootanim_stopped
    }
}

/// Query all three boot signals for `serial`.
///
/// A failed query counts as not-done for that signal this round.
pub async fn probe_boot(adb: &AdbClient, serial: &str) -> BootProbes {
    let dev_boot = adb.getprop(serial, DEV_BOOT_PROP).await;
    let sys_boot = adb.getprop(serial, SYS_BOOT_PROP).await;
    let bootanim = adb.getprop(serial, BOOTANIM_PROP).await;

    BootProbes {
        dev_boot_complete: matches!(dev_boot.as_deref(), Ok("1")),
        sys_boot_completed: matches!(sys_boot.as_deref(), Ok("1")),
        bootanim_stopped: matches!(bootanim.as_deref(), Ok("stopped")),
    }
}

/// Poll the boot signals until all three agree, bounded by `deadline`.
pub async fn wait_for_boot(adb: &AdbClient, serial: &str, deadline: Instant) -> Result<()> {
    let wait = async {
        loop {
            sleep(POLL_INTERVAL).await;

            let probes = probe_boot(adb, serial).await;
            debug!(serial = %serial, ?probes, "boot probe round");

            if probes.all_complete() {
                return;
            }
        }
    };

    match timeout_at(deadline, wait).await {
        Ok(()) => Ok(()),
        Err(_) => bail!("timed out waiting for emulator ({}) to finish booting", serial),
    }
}
