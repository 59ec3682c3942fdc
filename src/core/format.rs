//! Human-readable formatting for progress and video details
//!
//! Output matches what the download page shows: byte sizes with up to two
//! decimals ("1.5 KB", "1 MB"), ETAs as "45s"/"2m 5s", durations as "m:ss" or
//! "h:mm:ss", and view counts abbreviated to "K"/"M".

const BYTE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Formats a byte count using 1024-based units, rounded to two decimals.
///
/// # Example
///
/// ```
/// use vidfetch::core::format::format_bytes;
///
/// assert_eq!(format_bytes(1536), "1.5 KB");
/// assert_eq!(format_bytes(1_048_576), "1 MB");
/// assert_eq!(format_bytes(0), "0 B");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, BYTE_UNITS[unit])
}

/// Formats a transfer rate given in bytes per second.
pub fn format_speed(bytes_per_sec: f64) -> String {
    format!("{}/s", format_bytes(bytes_per_sec.max(0.0).round() as u64))
}

/// Formats remaining seconds as "45s" or "2m 5s"; zero is "Unknown".
pub fn format_eta(seconds: u64) -> String {
    if seconds == 0 {
        return "Unknown".to_string();
    }
    if seconds < 60 {
        return format!("{}s", seconds);
    }
    format!("{}m {}s", seconds / 60, seconds % 60)
}

/// Formats a video duration as "m:ss", or "h:mm:ss" from one hour up.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Abbreviates large counts: 1234 -> "1.2K", 2_500_000 -> "2.5M".
pub fn format_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// Formats a completion percentage, dropping a trailing ".0".
pub fn format_percent(percent: f64) -> String {
    format!("{}%", percent.clamp(0.0, 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        let cases = vec![
            (0, "0 B"),
            (1, "1 B"),
            (512, "512 B"),
            (1024, "1 KB"),
            (1536, "1.5 KB"),
            (1_048_576, "1 MB"),
            (1_572_864, "1.5 MB"),
            (1_073_741_824, "1 GB"),
            (1_288_490_189, "1.2 GB"),
            (1_099_511_627_776, "1 TB"),
        ];

        for (input, expected) in cases {
            assert_eq!(format_bytes(input), expected, "Failed for: {}", input);
        }
    }

    #[test]
    fn test_format_bytes_two_decimals() {
        // 1234567 / 1024^2 = 1.1773...
        assert_eq!(format_bytes(1_234_567), "1.18 MB");
    }

    #[test]
    fn test_format_speed() {
        assert_eq!(format_speed(1536.0), "1.5 KB/s");
        assert_eq!(format_speed(2_097_152.4), "2 MB/s");
    }

    #[test]
    fn test_format_eta() {
        assert_eq!(format_eta(0), "Unknown");
        assert_eq!(format_eta(30), "30s");
        assert_eq!(format_eta(59), "59s");
        assert_eq!(format_eta(60), "1m 0s");
        assert_eq!(format_eta(125), "2m 5s");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(5), "0:05");
        assert_eq!(format_duration(212), "3:32");
        assert_eq!(format_duration(3600), "1:00:00");
        assert_eq!(format_duration(3725), "1:02:05");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1.0K");
        assert_eq!(format_count(1_234), "1.2K");
        assert_eq!(format_count(2_500_000), "2.5M");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(42.0), "42%");
        assert_eq!(format_percent(42.5), "42.5%");
        assert_eq!(format_percent(140.0), "100%");
    }
}
