//! Duration arithmetic and "MM:SS" rendering

/// Render a second count as `MM:SS`.
///
/// Negative input renders as `00:00`. Minutes never roll over into hours, so
/// 3665 seconds renders as `61:05`.
pub fn format_time(total_seconds: impl Into<i64>) -> String {
    let safe_seconds = total_seconds.into().max(0);
    format!("{:02}:{:02}", safe_seconds / 60, safe_seconds % 60)
}

/// Total duration in seconds for a minutes/seconds pair.
///
/// No range checks happen here; callers pass values that already went
/// through the parser.
pub fn calculate_total_seconds(minutes: u32, seconds: u32) -> u32 {
    minutes.saturating_mul(60).saturating_add(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn formats_zero_padded() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(5), "00:05");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(3599), "59:59");
    }

    #[test]
    fn no_hour_rollover() {
        assert_eq!(format_time(3665), "61:05");
        assert_eq!(format_time(6000), "100:00");
    }

    #[test]
    fn negative_clamps_to_zero() {
        assert_eq!(format_time(-1), "00:00");
        assert_eq!(format_time(i64::MIN), "00:00");
    }

    #[test]
    fn total_seconds() {
        assert_eq!(calculate_total_seconds(0, 0), 0);
        assert_eq!(calculate_total_seconds(2, 45), 165);
        assert_eq!(calculate_total_seconds(5, 30), 330);
    }

    proptest! {
        #[test]
        fn total_and_format_agree(m in 0u32..=59, s in 0u32..=59) {
            let total = calculate_total_seconds(m, s);
            prop_assert_eq!(total, m * 60 + s);
            prop_assert_eq!(format_time(total), format!("{:02}:{:02}", m, s));
        }
    }
}
