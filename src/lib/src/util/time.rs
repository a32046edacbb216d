use chrono::{DateTime, Local, NaiveDateTime, Utc};

use crate::constants::{COMMIT_DATE_FORMAT, LOCAL_TIME_FORMAT};

/// UTC timestamp recorded as the `eol` of tombstones
pub fn commit_date() -> String {
    format_commit_date(&Utc::now())
}

pub fn format_commit_date(date: &DateTime<Utc>) -> String {
    date.format(COMMIT_DATE_FORMAT).to_string()
}

/// Local time in `ctime` form, ex: `Mon Oct 19 09:03:12 2026`
pub fn local_time() -> String {
    Local::now().format(LOCAL_TIME_FORMAT).to_string()
}

/// Parse a locker timestamp. Accepts the commit date format, with or
/// without fractional seconds, and RFC 3339.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::util;

    #[test]
    fn test_commit_date_round_trips() {
        let date = Utc.with_ymd_and_hms(2020, 3, 4, 5, 6, 7).unwrap();
        let formatted = util::time::format_commit_date(&date);
        assert_eq!(formatted, "2020-03-04T05:06:07.000000");
        assert_eq!(util::time::parse_timestamp(&formatted), Some(date));
    }

    #[test]
    fn test_parse_timestamp() {
        let date = Utc.with_ymd_and_hms(2020, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(
            util::time::parse_timestamp("2020-03-04T05:06:07"),
            Some(date)
        );
        assert_eq!(
            util::time::parse_timestamp("2020-03-04T05:06:07+00:00"),
            Some(date)
        );
        assert_eq!(util::time::parse_timestamp("a long time ago"), None);
    }
}
