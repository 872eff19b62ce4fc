// Deadline behavior of the polling loops, driven with a client whose adb
// binary does not exist: every query fails, so neither loop can resolve
// and the shared deadline is the only way out.

use std::path::PathBuf;

use avdboot::adb::{AdbClient, DeviceRegistry};
use avdboot::{detect, readiness};
use tokio::time::{Duration, Instant};

fn unreachable_adb() -> AdbClient {
    AdbClient::new(PathBuf::from("/nonexistent/platform-tools/adb"))
}

#[tokio::test(start_paused = true)]
async fn test_detection_times_out_cleanly() {
    let adb = unreachable_adb();
    let before = DeviceRegistry::new();
    let deadline = Instant::now() + Duration::from_secs(30);

    let err = detect::wait_for_new_device(&adb, &before, deadline)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("timed out"), "got: {:#}", err);
}

#[tokio::test(start_paused = true)]
async fn test_boot_polling_times_out_cleanly() {
    let adb = unreachable_adb();
    let deadline = Instant::now() + Duration::from_secs(30);

    let err = readiness::wait_for_boot(&adb, "emulator-5554", deadline)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("timed out"), "got: {:#}", err);
}

#[tokio::test(start_paused = true)]
async fn test_expired_deadline_never_reports_success() {
    let adb = unreachable_adb();
    let before = DeviceRegistry::new();
    let deadline = Instant::now() + Duration::from_millis(1);

    assert!(detect::wait_for_new_device(&adb, &before, deadline)
        .await
        .is_err());
}
