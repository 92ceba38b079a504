/// Formats a seconds value as `MM:SS.mmm`, with an `HH:` prefix only when
/// the value reaches a full hour. Absent or non-finite values render as `-`.
pub fn format_seconds(value: Option<f64>) -> String {
    let value = match value {
        Some(v) if v.is_finite() => v,
        _ => return "-".to_string(),
    };

    let total_ms = (value * 1000.0).round() as i64;
    let hours = total_ms / 3_600_000;
    let rem = total_ms % 3_600_000;
    let minutes = rem / 60_000;
    let rem = rem % 60_000;
    let seconds = rem / 1000;
    let millis = rem % 1000;

    if hours != 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
    } else {
        format!("{minutes:02}:{seconds:02}.{millis:03}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, "-")]
    #[case(Some(f64::NAN), "-")]
    #[case(Some(f64::INFINITY), "-")]
    #[case(Some(0.0), "00:00.000")]
    #[case(Some(0.0005), "00:00.001")]
    #[case(Some(65.4321), "01:05.432")]
    #[case(Some(59.9996), "01:00.000")]
    #[case(Some(3725.0), "01:02:05.000")]
    #[case(Some(3600.0), "01:00:00.000")]
    #[case(Some(3599.999), "59:59.999")]
    fn test_format_seconds(#[case] value: Option<f64>, #[case] expected: &str) {
        assert_eq!(format_seconds(value), expected);
    }
}
