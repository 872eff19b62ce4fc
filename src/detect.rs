use anyhow::{bail, Result};
use tokio::time::{sleep, timeout_at, Duration, Instant};
use tracing::{debug, warn};

use crate::adb::{AdbClient, DeviceRegistry, STATE_READY};

const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Outcome of one detection round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// Exactly one new serial, fully enumerated and accepting commands.
    New(String),
    /// Exactly one new serial, still mid-enumeration; retry next round.
    NotReady { serial: String, state: String },
    /// More than one new serial appeared; refusing to guess which one
    /// belongs to this launch.
    Ambiguous(usize),
    /// Nothing new yet.
    NoCandidate,
}

/// Diff a fresh registry snapshot against the pre-launch one.
///
/// Accepts only the exactly-one-new-serial case, and only once that
/// serial reports the ready state. A lone candidate in any other state
/// (typically `offline` while the emulator is still enumerating) is left
/// for the next round rather than accepted or rejected now.
pub fn diff_new_serial(before: &DeviceRegistry, now: &DeviceRegistry) -> Detection {
    let mut candidates = now
        .iter()
        .filter(|(serial, _)| !before.contains_key(*serial));

    let Some((serial, state)) = candidates.next() else {
        return Detection::NoCandidate;
    };

    let extra = candidates.count();
    if extra > 0 {
        return Detection::Ambiguous(extra + 1);
    }

    if state == STATE_READY {
        Detection::New(serial.clone())
    } else {
        Detection::NotReady {
            serial: serial.clone(),
            state: state.clone(),
        }
    }
}

/// Poll the registry until exactly one new ready device shows up.
///
/// There is no retry cap; the loop is bounded only by `deadline`.
/// Ambiguity is reported but not fatal -- if it never resolves, the
/// deadline fails the run.
pub async fn wait_for_new_device(
    adb: &AdbClient,
    before: &DeviceRegistry,
    deadline: Instant,
) -> Result<String> {
    let wait = async {
        loop {
            sleep(POLL_INTERVAL).await;

            match diff_new_serial(before, &adb.devices().await) {
                Detection::New(serial) => return serial,
                Detection::NotReady { serial, state } => {
                    debug!(serial = %serial, state = %state, "new emulator not ready yet");
                }
                Detection::Ambiguous(count) => {
                    warn!(
                        count,
                        "multiple new devices appeared; cannot tell which one was launched"
                    );
                }
                Detection::NoCandidate => {}
            }
        }
    };

    match timeout_at(deadline, wait).await {
        Ok(serial) => Ok(serial),
        Err(_) => bail!("timed out waiting for the started emulator to appear"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(entries: &[(&str, &str)]) -> DeviceRegistry {
        entries
            .iter()
            .map(|(serial, state)| (serial.to_string(), state.to_string()))
            .collect()
    }

    #[test]
    fn test_single_new_ready_device_is_detected() {
        let before = registry(&[]);
        let now = registry(&[("emulator-5554", "device")]);

        assert_eq!(
            diff_new_serial(&before, &now),
            Detection::New("emulator-5554".to_string())
        );
    }

    #[test]
    fn test_offline_candidate_waits_for_next_round() {
        let before = registry(&[("emulator-5554", "device")]);
        let now = registry(&[("emulator-5554", "device"), ("emulator-5556", "offline")]);

        assert_eq!(
            diff_new_serial(&before, &now),
            Detection::NotReady {
                serial: "emulator-5556".to_string(),
                state: "offline".to_string(),
            }
        );

        let next = registry(&[("emulator-5554", "device"), ("emulator-5556", "device")]);
        assert_eq!(
            diff_new_serial(&before, &next),
            Detection::New("emulator-5556".to_string())
        );
    }

    #[test]
    fn test_unauthorized_candidate_is_not_accepted() {
        let before = registry(&[]);
        let now = registry(&[("emulator-5554", "unauthorized")]);

        assert!(matches!(
            diff_new_serial(&before, &now),
            Detection::NotReady { .. }
        ));
    }

    #[test]
    fn test_two_new_devices_are_ambiguous() {
        let before = registry(&[]);
        let now = registry(&[("emulator-5554", "device"), ("emulator-5556", "device")]);

        assert_eq!(diff_new_serial(&before, &now), Detection::Ambiguous(2));
    }

    #[test]
    fn test_no_change_yields_no_candidate() {
        let before = registry(&[("emulator-5554", "device")]);
        let now = registry(&[("emulator-5554", "device")]);

        assert_eq!(diff_new_serial(&before, &now), Detection::NoCandidate);
    }

    #[test]
    fn test_disappeared_device_is_not_a_candidate() {
        // A device going away must not confuse the diff.
        let before = registry(&[("emulator-5554", "device"), ("emulator-5556", "device")]);
        let now = registry(&[("emulator-5556", "device")]);

        assert_eq!(diff_new_serial(&before, &now), Detection::NoCandidate);
    }

    #[test]
    fn test_state_change_of_known_device_is_not_a_candidate() {
        let before = registry(&[("emulator-5554", "offline")]);
        let now = registry(&[("emulator-5554", "device")]);

        assert_eq!(diff_new_serial(&before, &now), Detection::NoCandidate);
    }
}
