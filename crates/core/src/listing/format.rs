//! Display formatting for dates and times in list rows.

use chrono::{NaiveDate, NaiveTime};

/// Formats a date as `MMM DD YYYY`, e.g. `Mar 05 2024`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %d %Y").to_string()
}

/// Formats a time as `hh:mm AM`, e.g. `09:30 AM`.
#[must_use]
pub fn format_time(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_format_date() {
        assert_eq!(
            format_date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()),
            "Mar 05 2024"
        );
    }

    #[rstest]
    #[case(9, 30, "09:30 AM")]
    #[case(0, 5, "12:05 AM")]
    #[case(12, 0, "12:00 PM")]
    #[case(18, 45, "06:45 PM")]
    fn test_format_time(#[case] hour: u32, #[case] minute: u32, #[case] expected: &str) {
        assert_eq!(
            format_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap()),
            expected
        );
    }
}
