//! Conversion of ISO-8601 style durations (`PT3M21S`) into display strings (`3:21`).

use regex::Regex;
use std::sync::LazyLock;

/// Display value used whenever a duration is missing or unparseable.
pub const DEFAULT_DURATION: &str = "0:00";

static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<sign>-)?P",
        r"(?:(?P<years>[-+]?[0-9]+(?:[.,][0-9]+)?)Y)?",
        r"(?:(?P<months>[-+]?[0-9]+(?:[.,][0-9]+)?)M)?",
        r"(?:(?P<weeks>[-+]?[0-9]+(?:[.,][0-9]+)?)W)?",
        r"(?:(?P<days>[-+]?[0-9]+(?:[.,][0-9]+)?)D)?",
        r"(?:T",
        r"(?:(?P<hours>[-+]?[0-9]+(?:[.,][0-9]+)?)H)?",
        r"(?:(?P<minutes>[-+]?[0-9]+(?:[.,][0-9]+)?)M)?",
        r"(?:(?P<seconds>[-+]?[0-9]+(?:[.,][0-9]+)?)S)?",
        r")?$",
    ))
    .unwrap()
});

/// Units in the order they are rendered, largest first.
const UNITS: [&str; 7] = [
    "years", "months", "weeks", "days", "hours", "minutes", "seconds",
];

/// Normalize a designated-units duration into a colon separated display string.
///
/// Leading units that are absent are dropped, but the last two (minutes and
/// seconds) are always kept so a bare seconds value renders as `0:05`. The first
/// kept unit is unpadded, every later one is zero-padded to two digits.
///
/// # Examples
///
/// ```rust
/// use applemusic_meta::duration::normalize;
///
/// assert_eq!(normalize("PT1H2M3S"), "1:02:03");
/// assert_eq!(normalize("PT5S"), "0:05");
/// assert_eq!(normalize("garbage"), "0:00");
/// ```
pub fn normalize(duration: &str) -> String {
    let Some(captures) = DURATION_PATTERN.captures(duration.trim()) else {
        return DEFAULT_DURATION.to_string();
    };

    let values: Vec<Option<&str>> = UNITS
        .iter()
        .map(|unit| {
            captures
                .name(unit)
                .map(|m| m.as_str())
                .filter(|s| !s.is_empty())
        })
        .collect();

    if values.iter().all(Option::is_none) {
        return DEFAULT_DURATION.to_string();
    }

    let first_kept = values
        .iter()
        .position(Option::is_some)
        .unwrap_or(UNITS.len())
        .min(UNITS.len() - 2);

    values[first_kept..]
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let value = value.unwrap_or("0");
            if i == 0 {
                value.to_string()
            } else {
                format!("{value:0>2}")
            }
        })
        .collect::<Vec<_>>()
        .join(":")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_minutes_seconds() {
        assert_eq!(normalize("PT1H2M3S"), "1:02:03");
        assert_eq!(normalize("PT3M21S"), "3:21");
    }

    #[test]
    fn test_bare_seconds_keeps_minutes_column() {
        assert_eq!(normalize("PT5S"), "0:05");
        assert_eq!(normalize("PT0S"), "0:00");
        assert_eq!(normalize("PT45S"), "0:45");
    }

    #[test]
    fn test_missing_middle_units_default_to_zero() {
        assert_eq!(normalize("PT1H5S"), "1:00:05");
        assert_eq!(normalize("PT2H"), "2:00:00");
        assert_eq!(normalize("PT4M"), "4:00");
    }

    #[test]
    fn test_date_units_are_rendered_in_order() {
        assert_eq!(normalize("P1DT2H3M4S"), "1:02:03:04");
        assert_eq!(normalize("P1Y"), "1:00:00:00:00:00:00");
    }

    #[test]
    fn test_unparseable_input_yields_default() {
        assert_eq!(normalize("not-a-duration"), DEFAULT_DURATION);
        assert_eq!(normalize(""), DEFAULT_DURATION);
        assert_eq!(normalize("P"), DEFAULT_DURATION);
        assert_eq!(normalize("PT"), DEFAULT_DURATION);
        assert_eq!(normalize("3:21"), DEFAULT_DURATION);
    }

    #[test]
    fn test_units_without_digits_yield_default() {
        assert_eq!(normalize("PT.S"), DEFAULT_DURATION);
        assert_eq!(normalize("PT,M5S"), DEFAULT_DURATION);
        assert_eq!(normalize("PT-S"), DEFAULT_DURATION);
    }

    #[test]
    fn test_negative_sign_is_accepted() {
        assert_eq!(normalize("-PT1M2S"), "1:02");
    }
}
