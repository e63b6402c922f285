//! Power, volume and clock fields.
//!
//! Each field is produced by a small provider behind a trait so the
//! scheduler can run with fakes in tests. Providers never fail: errors are
//! logged and the field degrades to a fallback string.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use dwmstatus_common::shell;
use tracing::warn;

/// Icon shown while running on battery.
pub const UNPLUGGED_SIGN: &str = "↓";
/// Icon shown while on AC power.
pub const PLUGGED_SIGN: &str = "↑";
/// Icon in front of the volume level.
pub const AUDIO_SIGN: &str = "♫";
/// Volume text when the master channel is muted.
pub const MUTE_MARKER: &str = "[mute]";

/// Inserted between the date and the time.
pub const DATE_SEPARATOR: &str = "";
/// chrono pattern for the clock field, e.g. "Mon 02 Jan 2006 15:04".
pub const DATE_FORMAT: &str = "%a %d %b %Y";
pub const TIME_FORMAT: &str = "%H:%M";

/// Prints the battery state and charge, e.g. "Discharging 87%".
pub const ACPI_CMD: &str = r#"acpi -b | awk -F '[ ,]' -vORS='' '{print $5, $7}'"#;
/// Prints the left channel volume of the master control, e.g. "55%".
pub const VOLUME_CMD: &str = r#"amixer sget Master | awk -vORS='' '/Left:/ {print($5)}' | tr -d '[]'"#;
/// Exits non-zero when no channel of the master control is switched on.
pub const UNMUTED_CMD: &str = r#"amixer sget Master | grep -c '\[on\]'"#;

#[async_trait]
pub trait PowerStatusProvider: Send + Sync {
    /// Power field: plug icon followed by the battery status text.
    async fn power(&self) -> String;
}

#[async_trait]
pub trait AudioStatusProvider: Send + Sync {
    /// Audio field: note icon followed by the volume or the mute marker.
    async fn audio(&self) -> String;
}

pub trait DateTimeProvider: Send + Sync {
    /// Clock field.
    fn datetime(&self) -> String;
}

/// Build the power field from the raw `acpi` output.
///
/// Longer output means a discharge state is reported alongside the charge,
/// which selects the unplugged icon.
pub fn power_field(level: &str) -> String {
    let icon = if level.len() > 4 {
        UNPLUGGED_SIGN
    } else {
        PLUGGED_SIGN
    };
    format!("{}{}", icon, level)
}

/// Build the audio field from the volume text and mute state.
pub fn audio_field(volume: &str, muted: bool) -> String {
    if muted {
        format!("{}{}", AUDIO_SIGN, MUTE_MARKER)
    } else {
        format!("{}{}", AUDIO_SIGN, volume)
    }
}

/// Format a timestamp as the clock field.
pub fn datetime_field<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}{} {}",
        now.format(DATE_FORMAT),
        DATE_SEPARATOR,
        now.format(TIME_FORMAT)
    )
}

/// Battery status via `acpi`.
#[derive(Debug, Clone)]
pub struct AcpiPower {
    timeout: Duration,
}

impl AcpiPower {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl PowerStatusProvider for AcpiPower {
    async fn power(&self) -> String {
        let level = match shell::exec(ACPI_CMD, self.timeout).await {
            Ok(result) => {
                if !result.success() {
                    warn!(
                        exit_code = result.exit_code,
                        stderr = %result.stderr,
                        "Battery status command failed"
                    );
                }
                result.stdout
            }
            Err(e) => {
                warn!(error = %e, "Battery status unavailable");
                String::new()
            }
        };

        power_field(&level)
    }
}

/// Master volume via `amixer`.
#[derive(Debug, Clone)]
pub struct AmixerAudio {
    timeout: Duration,
}

impl AmixerAudio {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn volume(&self) -> String {
        match shell::exec(VOLUME_CMD, self.timeout).await {
            Ok(result) => {
                if !result.success() {
                    warn!(
                        exit_code = result.exit_code,
                        stderr = %result.stderr,
                        "Volume command failed"
                    );
                }
                result.stdout
            }
            Err(e) => {
                warn!(error = %e, "Volume unavailable");
                String::new()
            }
        }
    }

    async fn muted(&self) -> bool {
        match shell::exec(UNMUTED_CMD, self.timeout).await {
            Ok(result) => !result.success(),
            Err(e) => {
                warn!(error = %e, "Mute state unavailable");
                true
            }
        }
    }
}

#[async_trait]
impl AudioStatusProvider for AmixerAudio {
    async fn audio(&self) -> String {
        let volume = self.volume().await;
        let muted = self.muted().await;
        audio_field(&volume, muted)
    }
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl DateTimeProvider for LocalClock {
    fn datetime(&self) -> String {
        datetime_field(&Local::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_power_field_plugged() {
        assert_eq!(power_field(""), "↑");
        assert_eq!(power_field("Full"), "↑Full");
    }

    #[test]
    fn test_power_field_unplugged() {
        assert_eq!(power_field("Discharging 87%"), "↓Discharging 87%");
    }

    #[test]
    fn test_audio_field() {
        assert_eq!(audio_field("55%", false), "♫55%");
        assert_eq!(audio_field("55%", true), "♫[mute]");
        assert_eq!(audio_field("", true), "♫[mute]");
    }

    #[test]
    fn test_datetime_field() {
        let ts = Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap();
        assert_eq!(datetime_field(&ts), "Mon 02 Jan 2006 15:04");
    }

    #[test]
    fn test_local_clock_shape() {
        let field = LocalClock.datetime();
        // "Www DD Mmm YYYY HH:MM"
        assert_eq!(field.len(), 21, "{:?}", field);
        assert_eq!(&field[18..19], ":");
    }
}
