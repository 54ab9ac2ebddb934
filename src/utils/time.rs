//! Time parsing and formatting utilities
//!
//! Clip boundaries use one canonical notation, `HH:MM:SS` with an optional
//! fractional part (`HH:MM:SS.fff`). Tool output is parsed as a bare number
//! of seconds, always with a period as decimal separator.

use std::time::Duration;

/// Time parser for clip boundaries and tool output
pub struct TimeParser;

impl TimeParser {
    /// Parse `HH:MM:SS` or `HH:MM:SS.fff` into a duration.
    ///
    /// Hours may have any number of digits; minutes and seconds must be
    /// below 60. At most three fractional digits are accepted, matching the
    /// millisecond precision of the transcoder arguments.
    pub fn parse_clip_time(time_str: &str) -> Result<Duration, String> {
        let trimmed = time_str.trim();
        let parts: Vec<&str> = trimmed.split(':').collect();
        if parts.len() != 3 {
            return Err(format!(
                "'{}' is not in HH:MM:SS or HH:MM:SS.fff format",
                trimmed
            ));
        }

        let hours = Self::parse_digits(parts[0], "hours", trimmed)?;
        let minutes = Self::parse_digits(parts[1], "minutes", trimmed)?;
        if minutes >= 60 {
            return Err(format!("'{}': minutes must be less than 60", trimmed));
        }

        let (whole, fraction) = match parts[2].split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (parts[2], None),
        };
        let seconds = Self::parse_digits(whole, "seconds", trimmed)?;
        if seconds >= 60 {
            return Err(format!("'{}': seconds must be less than 60", trimmed));
        }

        let nanos = match fraction {
            Some(digits) => Self::parse_fraction(digits, trimmed)?,
            None => 0,
        };

        let total = hours
            .checked_mul(3600)
            .and_then(|h| h.checked_add(minutes * 60 + seconds))
            .ok_or_else(|| format!("'{}' is out of range", trimmed))?;
        Ok(Duration::new(total, nanos))
    }

    /// Parse a bare number of seconds as printed by yt-dlp and ffprobe.
    ///
    /// Only the first line is considered, even when it is blank. Returns
    /// `None` for blank input,
    /// unparseable text, and negative or non-finite values.
    pub fn parse_seconds(output: &str) -> Option<Duration> {
        let first = output.lines().next()?.trim();
        let seconds: f64 = first.parse().ok()?;
        if !seconds.is_finite() || seconds < 0.0 {
            return None;
        }
        Duration::try_from_secs_f64(seconds).ok()
    }

    /// Format a duration as `HH:MM:SS.fff` for transcoder arguments
    pub fn format_time(duration: Duration) -> String {
        let total_ms = duration.as_millis();
        let hours = total_ms / 3_600_000;
        let minutes = (total_ms % 3_600_000) / 60_000;
        let seconds = (total_ms % 60_000) / 1000;
        let milliseconds = total_ms % 1000;
        format!(
            "{:02}:{:02}:{:02}.{:03}",
            hours, minutes, seconds, milliseconds
        )
    }

    fn parse_digits(part: &str, unit: &str, whole: &str) -> Result<u64, String> {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("'{}': invalid {}", whole, unit));
        }
        part.parse::<u64>()
            .map_err(|_| format!("'{}': {} out of range", whole, unit))
    }

    fn parse_fraction(digits: &str, whole: &str) -> Result<u32, String> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("'{}': invalid fractional seconds", whole));
        }
        if digits.len() > 3 {
            return Err(format!(
                "'{}': fractional seconds are limited to milliseconds",
                whole
            ));
        }
        let millis = format!("{:0<3}", digits)
            .parse::<u32>()
            .map_err(|_| format!("'{}': invalid fractional seconds", whole))?;
        Ok(millis * 1_000_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hh_mm_ss() {
        let time = TimeParser::parse_clip_time("01:02:03").unwrap();
        assert_eq!(time, Duration::from_secs(3723));
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let time = TimeParser::parse_clip_time("00:00:10.5").unwrap();
        assert_eq!(time, Duration::from_millis(10_500));

        let time = TimeParser::parse_clip_time(" 00:01:30.250 ").unwrap();
        assert_eq!(time, Duration::from_millis(90_250));
    }

    #[test]
    fn test_parse_long_hours() {
        let time = TimeParser::parse_clip_time("100:00:00").unwrap();
        assert_eq!(time, Duration::from_secs(360_000));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(TimeParser::parse_clip_time("").is_err());
        assert!(TimeParser::parse_clip_time("10").is_err());
        assert!(TimeParser::parse_clip_time("01:30").is_err());
        assert!(TimeParser::parse_clip_time("00:60:00").is_err());
        assert!(TimeParser::parse_clip_time("00:00:60").is_err());
        assert!(TimeParser::parse_clip_time("-1:00:00").is_err());
        assert!(TimeParser::parse_clip_time("aa:bb:cc").is_err());
        assert!(TimeParser::parse_clip_time("00:00:10,5").is_err());
        assert!(TimeParser::parse_clip_time("00:00:10.").is_err());
    }

    #[test]
    fn test_fraction_limited_to_milliseconds() {
        let time = TimeParser::parse_clip_time("00:00:01.999").unwrap();
        assert_eq!(time, Duration::from_millis(1_999));
        assert_eq!(TimeParser::format_time(time), "00:00:01.999");

        let err = TimeParser::parse_clip_time("00:00:01.0001").unwrap_err();
        assert!(err.contains("milliseconds"));
    }

    #[test]
    fn test_parse_seconds_output() {
        assert_eq!(
            TimeParser::parse_seconds("123.456\n"),
            Some(Duration::from_secs_f64(123.456))
        );
        assert_eq!(TimeParser::parse_seconds(" 42 \nextra"), Some(Duration::from_secs(42)));
        assert_eq!(TimeParser::parse_seconds("\n42\n"), None);
        assert_eq!(TimeParser::parse_seconds(""), None);
        assert_eq!(TimeParser::parse_seconds("   \n"), None);
        assert_eq!(TimeParser::parse_seconds("N/A"), None);
        assert_eq!(TimeParser::parse_seconds("12,5"), None);
        assert_eq!(TimeParser::parse_seconds("-3.0"), None);
        assert_eq!(TimeParser::parse_seconds("inf"), None);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(TimeParser::format_time(Duration::from_millis(10_500)), "00:00:10.500");
        assert_eq!(TimeParser::format_time(Duration::from_secs(3723)), "01:02:03.000");
        assert_eq!(TimeParser::format_time(Duration::ZERO), "00:00:00.000");
    }
}
