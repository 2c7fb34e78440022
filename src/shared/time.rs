use chrono::{DateTime, Datelike, Utc};

/// Human-readable distance between `then` and `now`, e.g. "5 minutes ago".
///
/// Buckets follow the usual "time ago" conventions: sub-minute values collapse
/// to "less than a minute", hours and months are approximate ("about ...").
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    let distance = describe_distance(seconds.unsigned_abs());

    if seconds < 0 {
        format!("in {}", distance)
    } else {
        format!("{} ago", distance)
    }
}

fn describe_distance(seconds: u64) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;
    const MONTH: u64 = 30 * DAY;
    const YEAR: u64 = 365 * DAY;

    let minutes = (seconds + MINUTE / 2) / MINUTE;

    match seconds {
        s if s < 30 => "less than a minute".to_string(),
        s if s < 90 => "1 minute".to_string(),
        s if s < 45 * MINUTE => format!("{} minutes", minutes),
        s if s < 90 * MINUTE => "about 1 hour".to_string(),
        s if s < DAY => format!("about {} hours", (s + HOUR / 2) / HOUR),
        s if s < 42 * HOUR => "1 day".to_string(),
        s if s < MONTH => format!("{} days", (s + DAY / 2) / DAY),
        s if s < 45 * DAY => "about 1 month".to_string(),
        s if s < 60 * DAY => "about 2 months".to_string(),
        s if s < YEAR => format!("{} months", (s + MONTH / 2) / MONTH),
        s => {
            let years = s / YEAR;
            if years == 1 {
                "about 1 year".to_string()
            } else {
                format!("about {} years", years)
            }
        }
    }
}

/// Long absolute form, e.g. "May 1st, 2024 8:30 AM"
pub fn format_long(at: DateTime<Utc>) -> String {
    let day = at.day();
    format!(
        "{} {}{}, {} {}",
        at.format("%B"),
        day,
        ordinal_suffix(day),
        at.year(),
        at.format("%-I:%M %p")
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_format_relative_buckets() {
        let now = now();
        let cases = [
            (Duration::seconds(5), "less than a minute ago"),
            (Duration::seconds(70), "1 minute ago"),
            (Duration::minutes(5), "5 minutes ago"),
            (Duration::minutes(60), "about 1 hour ago"),
            (Duration::hours(5), "about 5 hours ago"),
            (Duration::hours(30), "1 day ago"),
            (Duration::days(3), "3 days ago"),
            (Duration::days(35), "about 1 month ago"),
            (Duration::days(120), "4 months ago"),
            (Duration::days(800), "about 2 years ago"),
        ];

        for (ago, expected) in cases {
            assert_eq!(format_relative(now - ago, now), expected);
        }
    }

    #[test]
    fn test_format_relative_future() {
        let now = now();
        assert_eq!(format_relative(now + Duration::minutes(5), now), "in 5 minutes");
    }

    #[test]
    fn test_format_long() {
        assert_eq!(format_long(now()), "May 1st, 2024 8:30 AM");

        let teen = Utc.with_ymd_and_hms(2024, 10, 12, 15, 4, 0).unwrap();
        assert_eq!(format_long(teen), "October 12th, 2024 3:04 PM");

        let twenty_second = Utc.with_ymd_and_hms(2024, 1, 22, 0, 5, 0).unwrap();
        assert_eq!(format_long(twenty_second), "January 22nd, 2024 12:05 AM");
    }
}
