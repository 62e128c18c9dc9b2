use jiff::{Timestamp, Zoned, tz};

/// Localize a timestamp to the browser's timezone.
pub fn localize_timestamp(timestamp: Timestamp) -> Zoned {
    timestamp.to_zoned(tz::TimeZone::system())
}

/// Short date and time for product listings, e.g. "Mon, 19 Oct 2026 14:05".
pub fn format_listing_time(zoned: &Zoned) -> String {
    zoned.strftime("%a, %d %b %Y %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_listing_time() {
        let zoned = Timestamp::UNIX_EPOCH.to_zoned(tz::TimeZone::UTC);
        assert_eq!(format_listing_time(&zoned), "Thu, 01 Jan 1970 00:00");
    }
}
