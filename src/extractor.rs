//! Record extraction from classified log lines.
//!
//! Each data line is parsed into a [`Record`] or rejected with a
//! [`SkipReason`]. Only successes reach the [`TimeSeries`]; a timestamp and
//! its value are always appended together.

use crate::constants::LOG_DATETIME_FORMAT;
use crate::models::{ExtractionStats, Record, SkipReason, TimeSeries};
use chrono::NaiveDateTime;
use tracing::debug;

/// Parse one data line of the form `MM/DD/YYYY HH:MM value [ignored...]`
pub fn parse_record(line: &str) -> Result<Record, SkipReason> {
    let mut tokens = line.split_whitespace();

    let date = tokens.next().ok_or(SkipReason::Empty)?;
    let time = tokens.next().ok_or(SkipReason::MissingTime)?;

    let joined = format!("{} {}", date, time);
    if !has_log_timestamp_shape(date, time) {
        return Err(SkipReason::InvalidTimestamp(joined));
    }
    let timestamp = NaiveDateTime::parse_from_str(&joined, LOG_DATETIME_FORMAT)
        .map_err(|_| SkipReason::InvalidTimestamp(joined.clone()))?;

    let value_str = tokens.next().ok_or(SkipReason::MissingValue)?;
    let value = value_str
        .parse::<f64>()
        .map_err(|_| SkipReason::InvalidValue(value_str.to_string()))?;

    Ok(Record { timestamp, value })
}

/// Check the digit layout of `MM/DD/YYYY` and `HH:MM` tokens.
///
/// chrono's `%Y` takes any number of digits and a sign, so `03/01/24` would
/// parse as year 24. Month, day, hour and minute take one or two digits; the
/// year takes exactly four.
fn has_log_timestamp_shape(date: &str, time: &str) -> bool {
    fn digits(part: &str, min: usize, max: usize) -> bool {
        (min..=max).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    }

    let date_parts: Vec<&str> = date.split('/').collect();
    let time_parts: Vec<&str> = time.split(':').collect();

    matches!(date_parts.as_slice(), [month, day, year]
        if digits(month, 1, 2) && digits(day, 1, 2) && digits(year, 4, 4))
        && matches!(time_parts.as_slice(), [hour, minute]
            if digits(hour, 1, 2) && digits(minute, 1, 2))
}

/// Convert one section's raw lines into a time series.
///
/// Malformed lines are dropped and recorded in the returned statistics;
/// nothing here fails.
pub fn extract_series<S: AsRef<str>>(lines: &[S]) -> (TimeSeries, ExtractionStats) {
    let mut series = TimeSeries::new();
    let mut stats = ExtractionStats::new();

    for (index, line) in lines.iter().enumerate() {
        stats.lines_seen += 1;

        match parse_record(line.as_ref().trim()) {
            Ok(record) => {
                series.push(record);
                stats.records_parsed += 1;
            }
            Err(reason) => {
                debug!("Skipped line {}: {}", index, reason);
                stats.skipped.push((index, reason));
            }
        }
    }

    (series, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_valid_record() {
        let record = parse_record("03/14/2024 13:05 141.5").unwrap();
        assert_eq!(record.timestamp, ts(3, 14, 13, 5));
        assert_eq!(record.value, 141.5);
    }

    #[test]
    fn test_extra_tokens_are_ignored() {
        let record = parse_record("03/14/2024 13:05 250 mL voided").unwrap();
        assert_eq!(record.value, 250.0);
    }

    #[test]
    fn test_integer_values_parse_as_float() {
        assert_eq!(parse_record("03/01/2024 08:15 120").unwrap().value, 120.0);
    }

    #[test]
    fn test_impossible_date_is_skipped() {
        assert_eq!(
            parse_record("13/45/2024 99:99 5.0"),
            Err(SkipReason::InvalidTimestamp("13/45/2024 99:99".to_string()))
        );
        assert!(matches!(
            parse_record("02/30/2024 08:00 5.0"),
            Err(SkipReason::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_wrong_date_layout_is_skipped() {
        assert!(matches!(
            parse_record("2024-03-01 08:00 5.0"),
            Err(SkipReason::InvalidTimestamp(_))
        ));
        assert!(matches!(
            parse_record("Given by nurse at bedside"),
            Err(SkipReason::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_year_must_have_four_digits() {
        assert_eq!(
            parse_record("03/01/24 08:00 1"),
            Err(SkipReason::InvalidTimestamp("03/01/24 08:00".to_string()))
        );
        assert_eq!(
            parse_record("03/01/+2024 08:00 1"),
            Err(SkipReason::InvalidTimestamp("03/01/+2024 08:00".to_string()))
        );
        assert!(matches!(
            parse_record("03/01/20245 08:00 1"),
            Err(SkipReason::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_unpadded_fields_are_accepted() {
        let record = parse_record("3/1/2024 8:05 140").unwrap();
        assert_eq!(record.timestamp, ts(3, 1, 8, 5));
    }

    #[test]
    fn test_signed_time_fields_are_skipped() {
        assert!(matches!(
            parse_record("03/01/2024 +8:00 1"),
            Err(SkipReason::InvalidTimestamp(_))
        ));
        assert!(matches!(
            parse_record("03/01/2024 08:00:00 1"),
            Err(SkipReason::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_missing_tokens() {
        assert_eq!(parse_record(""), Err(SkipReason::Empty));
        assert_eq!(parse_record("03/01/2024"), Err(SkipReason::MissingTime));
        assert_eq!(
            parse_record("03/01/2024 08:00"),
            Err(SkipReason::MissingValue)
        );
    }

    #[test]
    fn test_non_numeric_value_is_skipped() {
        assert_eq!(
            parse_record("03/01/2024 08:00 refused"),
            Err(SkipReason::InvalidValue("refused".to_string()))
        );
    }

    #[test]
    fn test_extract_series_skips_bad_lines_without_disturbing_neighbours() {
        let lines = vec![
            "03/01/2024 08:00 138.5",
            "13/45/2024 99:99 5.0",
            "03/01/2024 12:00 n/a",
            "",
            "03/01/2024 16:00 140",
        ];

        let (series, stats) = extract_series(&lines);

        assert_eq!(series.timestamps(), &[ts(3, 1, 8, 0), ts(3, 1, 16, 0)]);
        assert_eq!(series.values(), &[138.5, 140.0]);
        assert_eq!(stats.lines_seen, 5);
        assert_eq!(stats.records_parsed, 2);
        assert_eq!(stats.records_skipped(), 3);
        assert_eq!(
            stats.skipped.iter().map(|(i, _)| *i).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_extract_series_preserves_encounter_order() {
        let lines = vec!["03/02/2024 08:00 2", "03/01/2024 08:00 1"];
        let (series, _) = extract_series(&lines);
        assert_eq!(series.timestamps(), &[ts(3, 2, 8, 0), ts(3, 1, 8, 0)]);
    }

    #[test]
    fn test_extract_empty_section() {
        let lines: Vec<String> = Vec::new();
        let (series, stats) = extract_series(&lines);
        assert!(series.is_empty());
        assert_eq!(stats, ExtractionStats::new());
    }
}
