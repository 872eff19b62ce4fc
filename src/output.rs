use tokio::process::Command;
use tracing::warn;

/// Env key later pipeline steps read the booted serial from.
pub const SERIAL_KEY: &str = "EMULATOR_SERIAL";

/// Publish the serial to the pipeline's shared env store via `envman`.
///
/// Best effort: the serial is also printed in the success line, so a
/// pipeline without envman gets a warning rather than a failed run.
pub async fn publish_serial(serial: &str) {
    let result = Command::new("envman")
        .args(["add", "--key", SERIAL_KEY, "--value", serial])
        .output()
        .await;

    match result {
        Ok(output) if output.status.success() => {}
        Ok(output) => {
            warn!(key = SERIAL_KEY, status = %output.status, "envman add failed");
        }
        Err(e) => {
            warn!(key = SERIAL_KEY, error = %e, "envman not available; serial not exported");
        }
    }
}
