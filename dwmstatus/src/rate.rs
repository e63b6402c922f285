//! Fixed-width throughput rendering.
//!
//! A rate is scaled into bytes, KiB or MiB per second and printed so the
//! magnitude keeps a stable width in the status bar:
//!
//! | rate (B/s)                | output     |
//! |---------------------------|------------|
//! | `500`                     | `↓500B`    |
//! | `1500`                    | `↓1,5kB`   |
//! | `2_000_000`               | `↓1,9MB`   |
//! | `-5`                      | `↓ ERR`    |
//! | `>= 1000 * 1024 * 1024`   | `↓ERR`     |

/// Unit suffix for bytes per second.
pub const BPS_SIGN: &str = "B";
/// Unit suffix for KiB per second.
pub const KIBPS_SIGN: &str = "kB";
/// Unit suffix for MiB per second.
pub const MIBPS_SIGN: &str = "MB";

/// Icon for the receive direction.
pub const NET_RECEIVED_SIGN: &str = "↓";
/// Icon for the transmit direction.
pub const NET_TRANSMITTED_SIGN: &str = "↑";

/// Replaces the decimal point in rendered numbers.
pub const FLOAT_SEPARATOR: &str = ",";

const KIB: f32 = 1024.0;
const MIB: f32 = 1024.0 * 1024.0;

/// Rates at or above this are not rendered (≈ 1000 MiB/s).
const OVERFLOW_THRESHOLD: f32 = 1000.0 * MIB;
const MIB_THRESHOLD: f32 = 1000.0 * KIB;
const KIB_THRESHOLD: f32 = 1000.0;

/// Display scale chosen for a rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateUnit {
    Bytes,
    Kibibytes,
    Mebibytes,
}

impl RateUnit {
    pub fn suffix(self) -> &'static str {
        match self {
            RateUnit::Bytes => BPS_SIGN,
            RateUnit::Kibibytes => KIBPS_SIGN,
            RateUnit::Mebibytes => MIBPS_SIGN,
        }
    }

    fn divisor(self) -> f32 {
        match self {
            RateUnit::Bytes => 1.0,
            RateUnit::Kibibytes => KIB,
            RateUnit::Mebibytes => MIB,
        }
    }
}

/// Outcome of scaling a raw rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scaled {
    /// Counter went backwards.
    Negative,
    /// Above the largest display bucket.
    Overflow,
    Value { value: f32, unit: RateUnit },
}

/// Pick the display bucket for `rate` and scale it.
///
/// Scaling is done in single precision; above 2^24 bytes the rate is
/// rounded to the nearest `f32` before the thresholds are compared.
pub fn scale(rate: i64) -> Scaled {
    if rate < 0 {
        return Scaled::Negative;
    }

    let spd = rate as f32;
    if spd >= OVERFLOW_THRESHOLD {
        return Scaled::Overflow;
    }

    let unit = if spd >= MIB_THRESHOLD {
        RateUnit::Mebibytes
    } else if spd >= KIB_THRESHOLD {
        RateUnit::Kibibytes
    } else {
        RateUnit::Bytes
    };

    Scaled::Value {
        value: spd / unit.divisor(),
        unit,
    }
}

/// Render a scaled magnitude: no decimals and width 3 from 10 upwards,
/// one decimal below 10. The first decimal point becomes `separator`.
pub fn render_magnitude(value: f32, separator: &str) -> String {
    let formatted = if value >= 10.0 {
        format!("{:3.0}", value)
    } else {
        format!("{:2.1}", value)
    };
    formatted.replacen('.', separator, 1)
}

/// Render `rate` behind `icon` using a custom decimal separator.
pub fn format_with_separator(icon: &str, rate: i64, separator: &str) -> String {
    match scale(rate) {
        Scaled::Negative => format!("{} ERR", icon),
        Scaled::Overflow => format!("{}ERR", icon),
        Scaled::Value { value, unit } => format!(
            "{}{}{}",
            icon,
            render_magnitude(value, separator),
            unit.suffix()
        ),
    }
}

/// Render `rate` behind `icon` with the default [`FLOAT_SEPARATOR`].
pub fn format(icon: &str, rate: i64) -> String {
    format_with_separator(icon, rate, FLOAT_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_examples() {
        assert_eq!(format("↓", 500), "↓500B");
        assert_eq!(format("↓", 1500), "↓1,5kB");
        assert_eq!(format("↓", 2_000_000), "↓1,9MB");
        assert_eq!(format("↓", -5), "↓ ERR");
        assert_eq!(format("↓", 1_100_000_000), "↓ERR");
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(scale(999), Scaled::Value { value: 999.0, unit: RateUnit::Bytes });
        assert!(matches!(
            scale(1000),
            Scaled::Value { unit: RateUnit::Kibibytes, .. }
        ));
        assert!(matches!(
            scale(1000 * 1024 - 1),
            Scaled::Value { unit: RateUnit::Kibibytes, .. }
        ));
        assert!(matches!(
            scale(1000 * 1024),
            Scaled::Value { unit: RateUnit::Mebibytes, .. }
        ));
        assert!(matches!(
            // largest f32 below the overflow threshold
            scale(1000 * 1024 * 1024 - 64),
            Scaled::Value { unit: RateUnit::Mebibytes, .. }
        ));
        assert_eq!(scale(1000 * 1024 * 1024), Scaled::Overflow);
        assert_eq!(scale(-1), Scaled::Negative);
    }

    #[test]
    fn test_small_values_have_one_decimal() {
        assert_eq!(format("↑", 0), "↑0,0B");
        assert_eq!(format("↑", 7), "↑7,0B");
        assert_eq!(format("↑", 9), "↑9,0B");
    }

    #[test]
    fn test_two_digit_values_are_padded() {
        assert_eq!(format("↑", 10), "↑ 10B");
        assert_eq!(format("↑", 42), "↑ 42B");
        // 20480 / 1024 = 20 kB
        assert_eq!(format("↑", 20480), "↑ 20kB");
    }

    #[test]
    fn test_three_digit_values() {
        assert_eq!(format("↑", 100), "↑100B");
        // 512000 / 1024 = 500 kB
        assert_eq!(format("↑", 512_000), "↑500kB");
        // 300 MiB
        assert_eq!(format("↑", 300 * 1024 * 1024), "↑300MB");
    }

    #[test]
    fn test_width_and_precision() {
        for rate in (0..1000).chain((1000..2_000_000).step_by(997)) {
            let Scaled::Value { value, unit } = scale(rate) else {
                panic!("rate {} should scale", rate);
            };
            let rendered = render_magnitude(value, ",");
            assert!(!rendered.contains('.'), "{} rendered as {}", rate, rendered);

            if value >= 10.0 {
                assert!(rendered.len() >= 3, "{} rendered as {:?}", rate, rendered);
                assert!(!rendered.contains(','));
            } else {
                let (_, decimals) = rendered.split_once(',').unwrap();
                assert_eq!(decimals.len(), 1, "{} rendered as {}", rate, rendered);
            }

            let full = format("↓", rate);
            assert!(full.ends_with(unit.suffix()));
        }
    }

    #[test]
    fn test_single_precision_rounding() {
        // 18_350_079 rounds to 18_350_080 = 17.5 MiB, which renders as 18
        assert_eq!(format("↓", 18_350_079), "↓ 18MB");
        // Rounds up onto the overflow threshold instead of printing 1000MB
        assert_eq!(format("↓", 1_048_575_999), "↓ERR");
        assert_eq!(scale(1_048_575_999), Scaled::Overflow);
    }

    #[test]
    fn test_custom_separator() {
        assert_eq!(format_with_separator("↓", 1500, "."), "↓1.5kB");
        assert_eq!(format_with_separator("↓", 1500, "'"), "↓1'5kB");
        assert_eq!(format_with_separator("↓", 500, "'"), "↓500B");
    }

    #[test]
    fn test_render_magnitude_replaces_first_point_only() {
        assert_eq!(render_magnitude(1.46, ","), "1,5");
        assert_eq!(render_magnitude(999.4, ","), "999");
    }
}
