//! Display formatting for countdown and elapsed times

/// Format a countdown as `mm:ss`, switching to `hh:mm` at one hour
pub fn format_time(seconds: u32) -> String {
    if seconds < 3600 {
        format!("{:02}:{:02}", seconds / 60, seconds % 60)
    } else {
        format!("{:02}:{:02}", seconds / 3600, (seconds % 3600) / 60)
    }
}

/// Format a total elapsed time as `m:ss`, or `h:mm:ss` from one hour up
pub fn format_total_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_uses_minutes_and_seconds_under_an_hour() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(5), "00:05");
        assert_eq!(format_time(125), "02:05");
        assert_eq!(format_time(3599), "59:59");
    }

    #[test]
    fn countdown_switches_to_hours_and_minutes_at_an_hour() {
        assert_eq!(format_time(3600), "01:00");
        assert_eq!(format_time(3725), "01:02");
    }

    #[test]
    fn total_time_drops_the_hour_field_under_an_hour() {
        assert_eq!(format_total_time(0), "0:00");
        assert_eq!(format_total_time(125), "2:05");
        assert_eq!(format_total_time(3725), "1:02:05");
    }
}
