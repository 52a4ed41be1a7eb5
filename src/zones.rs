//! Secondary text clocks pinned to other timezones.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::OffsetDateTime;
use time_tz::timezones;
use time_tz::OffsetDateTimeExt;

const TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]:[second]");

/// A labelled clock in an IANA timezone, e.g. `Asia/Tokyo`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ZoneClock {
    pub label: String,
    pub timezone: String,
}

/// The zones shown when the configuration does not name any.
pub fn default_zones() -> Vec<ZoneClock> {
    [
        ("UTC Time", "UTC"),
        ("West Coast (PT)", "America/Los_Angeles"),
        ("Tokyo Time", "Asia/Tokyo"),
    ]
    .into_iter()
    .map(|(label, timezone)| ZoneClock {
        label: label.to_string(),
        timezone: timezone.to_string(),
    })
    .collect()
}

/// Formats `now` as `HH:MM:SS` in the clock's zone. Unknown zone names and
/// formatting failures yield the literal string `Error`.
pub fn format_in_zone(clock: &ZoneClock, now: OffsetDateTime) -> String {
    let Some(zone) = timezones::get_by_name(&clock.timezone) else {
        tracing::warn!(zone = %clock.timezone, "Unknown timezone");
        return String::from("Error");
    };

    match now.to_timezone(zone).format(TIME_FORMAT) {
        Ok(text) => text,
        Err(error) => {
            tracing::warn!(?error, zone = %clock.timezone, "Failed to format zone time");
            String::from("Error")
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn clock(timezone: &str) -> ZoneClock {
        ZoneClock {
            label: String::from("test"),
            timezone: timezone.to_string(),
        }
    }

    #[test]
    fn formats_utc_verbatim() {
        let formatted = format_in_zone(&clock("UTC"), datetime!(2024-01-01 09:05:07.123 UTC));
        assert_eq!(formatted, "09:05:07");
    }

    #[test]
    fn converts_into_the_zone_offset() {
        let now = datetime!(2024-01-01 09:05:07 UTC);

        assert_eq!(format_in_zone(&clock("Asia/Tokyo"), now), "18:05:07");
        assert_eq!(format_in_zone(&clock("America/Los_Angeles"), now), "01:05:07");
    }

    #[test]
    fn unknown_zones_degrade_to_error_text() {
        let formatted = format_in_zone(&clock("Mars/Olympus_Mons"), OffsetDateTime::UNIX_EPOCH);
        assert_eq!(formatted, "Error");
    }

    #[test]
    fn default_zones_all_resolve() {
        for zone in default_zones() {
            assert_ne!(
                format_in_zone(&zone, OffsetDateTime::UNIX_EPOCH),
                "Error",
                "{}",
                zone.timezone
            );
        }
    }
}
