use chrono::{DateTime, Utc};

/// Formats the span between two instants the way the meeting UI shows
/// recording lengths: `1:05:09` past an hour, `5:09` past a minute,
/// `42 seconds` below that.
pub fn format_duration(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let total_seconds = (end - start).num_seconds().max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}:{:02}", minutes, seconds)
    } else {
        format!("{} seconds", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn spans_over_an_hour_include_padded_minutes_and_seconds() {
        assert_eq!(format_duration(at(0), at(3909)), "1:05:09");
        assert_eq!(format_duration(at(0), at(7200)), "2:00:00");
    }

    #[test]
    fn spans_over_a_minute_drop_the_hour_field() {
        assert_eq!(format_duration(at(0), at(309)), "5:09");
        assert_eq!(format_duration(at(0), at(60)), "1:00");
    }

    #[test]
    fn short_spans_read_as_seconds() {
        assert_eq!(format_duration(at(0), at(42)), "42 seconds");
        assert_eq!(format_duration(at(0), at(0)), "0 seconds");
    }

    #[test]
    fn reversed_inputs_clamp_to_zero() {
        assert_eq!(format_duration(at(100), at(40)), "0 seconds");
    }
}
