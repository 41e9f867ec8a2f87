//! Validation and clamping of raw minute/second input
//!
//! Validation is advisory: it produces a message for the user. Parsing is
//! total: it always yields a value in `0..=59` that can be forwarded to the
//! timer, even while the field shows an error.

use serde::{Deserialize, Serialize};

/// Largest value accepted for a minutes or seconds component
pub const MAX_COMPONENT_VALUE: u32 = 59;

/// Raw input for a single time component, before any validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    /// Nothing entered yet
    Missing,
    /// Text as typed by the user
    Text(&'a str),
    /// Numeric input that never went through text
    Number(i64),
    /// Numeric input with a fractional part
    Decimal(f64),
}

impl<'a> RawValue<'a> {
    /// Numeric interpretation of the input.
    ///
    /// `Ok(None)` means "not specified" (treated as zero), `Err(())` means the
    /// input is present but not a number.
    fn numeric(self) -> Result<Option<f64>, ()> {
        match self {
            RawValue::Missing | RawValue::Text("") => Ok(None),
            RawValue::Text(text) => parse_int(text).map(|n| Some(n as f64)).ok_or(()),
            RawValue::Number(n) => Ok(Some(n as f64)),
            RawValue::Decimal(n) if n.is_nan() => Err(()),
            RawValue::Decimal(n) => Ok(Some(n)),
        }
    }
}

impl<'a> From<&'a str> for RawValue<'a> {
    fn from(value: &'a str) -> Self {
        RawValue::Text(value)
    }
}

impl<'a> From<&'a String> for RawValue<'a> {
    fn from(value: &'a String) -> Self {
        RawValue::Text(value.as_str())
    }
}

impl<'a> From<Option<&'a str>> for RawValue<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(RawValue::Missing, RawValue::Text)
    }
}

impl From<i32> for RawValue<'_> {
    fn from(value: i32) -> Self {
        RawValue::Number(i64::from(value))
    }
}

impl From<i64> for RawValue<'_> {
    fn from(value: i64) -> Self {
        RawValue::Number(value)
    }
}

impl From<u32> for RawValue<'_> {
    fn from(value: u32) -> Self {
        RawValue::Number(i64::from(value))
    }
}

impl From<f64> for RawValue<'_> {
    fn from(value: f64) -> Self {
        RawValue::Decimal(value)
    }
}

/// Which component of the duration a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeField {
    Minutes,
    Seconds,
}

impl TimeField {
    /// Label used in user-facing messages
    pub fn label(self) -> &'static str {
        match self {
            TimeField::Minutes => "分",
            TimeField::Seconds => "秒",
        }
    }
}

/// Outcome of validating one input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ValidationResult {
    /// A passing result with no message
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error_message: None,
        }
    }

    /// A failing result carrying the message to show next to the field
    pub fn invalid(message: String) -> Self {
        Self {
            is_valid: false,
            error_message: Some(message),
        }
    }
}

/// Validate a raw component against the 0..=59 policy, labelling messages
/// with `field_label`
pub fn validate_component<'a>(value: impl Into<RawValue<'a>>, field_label: &str) -> ValidationResult {
    match value.into().numeric() {
        Ok(None) => ValidationResult::valid(),
        Err(()) => ValidationResult::invalid(format!("{field_label}は数値で入力してください")),
        Ok(Some(n)) if n < 0.0 => {
            ValidationResult::invalid(format!("{field_label}は0以上の値を入力してください"))
        }
        Ok(Some(n)) if n > f64::from(MAX_COMPONENT_VALUE) => ValidationResult::invalid(format!(
            "{field_label}は{MAX_COMPONENT_VALUE}以下の値を入力してください"
        )),
        Ok(Some(_)) => ValidationResult::valid(),
    }
}

/// Validate a minutes field
pub fn validate_minutes<'a>(value: impl Into<RawValue<'a>>) -> ValidationResult {
    validate_component(value, TimeField::Minutes.label())
}

/// Validate a seconds field
pub fn validate_seconds<'a>(value: impl Into<RawValue<'a>>) -> ValidationResult {
    validate_component(value, TimeField::Seconds.label())
}

/// Convert raw input into a safe component value in `0..=59`.
///
/// Never fails: missing or non-numeric input becomes 0, out-of-range input is
/// clamped, fractions are truncated.
pub fn parse_time_value<'a>(value: impl Into<RawValue<'a>>) -> u32 {
    match value.into().numeric() {
        Ok(Some(n)) => n.clamp(0.0, f64::from(MAX_COMPONENT_VALUE)).floor() as u32,
        Ok(None) | Err(()) => 0,
    }
}

/// Base-10 integer prefix parsing with the leniency browsers apply to form
/// input: leading whitespace and a sign are accepted, trailing garbage is
/// ignored, no digits at all is not a number.
fn parse_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        seen_digit = true;
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(byte - b'0'));
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_and_missing_input_is_valid() {
        assert_eq!(validate_minutes(""), ValidationResult::valid());
        assert_eq!(validate_minutes(None::<&str>), ValidationResult::valid());
        assert_eq!(validate_seconds(RawValue::Missing), ValidationResult::valid());
    }

    #[test]
    fn minutes_messages() {
        assert_eq!(
            validate_minutes(-1).error_message.as_deref(),
            Some("分は0以上の値を入力してください")
        );
        assert_eq!(
            validate_minutes(60).error_message.as_deref(),
            Some("分は59以下の値を入力してください")
        );
        assert_eq!(
            validate_minutes("abc").error_message.as_deref(),
            Some("分は数値で入力してください")
        );
        assert!(!validate_minutes("abc").is_valid);
    }

    #[test]
    fn seconds_messages_use_seconds_label() {
        assert_eq!(
            validate_seconds("99").error_message.as_deref(),
            Some("秒は59以下の値を入力してください")
        );
        assert_eq!(
            validate_seconds("-5").error_message.as_deref(),
            Some("秒は0以上の値を入力してください")
        );
        assert_eq!(
            validate_seconds(" ").error_message.as_deref(),
            Some("秒は数値で入力してください")
        );
    }

    #[test]
    fn boundaries_are_valid() {
        assert!(validate_minutes(0).is_valid);
        assert!(validate_minutes("59").is_valid);
        assert!(validate_seconds(59).is_valid);
    }

    #[test]
    fn custom_labels() {
        let result = validate_component("x", "時間");
        assert_eq!(result.error_message.as_deref(), Some("時間は数値で入力してください"));
    }

    #[test]
    fn text_parsing_is_prefix_based() {
        assert_eq!(parse_int("12abc"), Some(12));
        assert_eq!(parse_int("  7"), Some(7));
        assert_eq!(parse_int("+5"), Some(5));
        assert_eq!(parse_int("-0"), Some(0));
        assert_eq!(parse_int("1e3"), Some(1));
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn parse_clamps_and_defaults() {
        assert_eq!(parse_time_value(""), 0);
        assert_eq!(parse_time_value(None::<&str>), 0);
        assert_eq!(parse_time_value("abc"), 0);
        assert_eq!(parse_time_value(-3), 0);
        assert_eq!(parse_time_value("99"), 59);
        assert_eq!(parse_time_value(42), 42);
        assert_eq!(parse_time_value("08"), 8);
    }

    #[test]
    fn fractional_numbers_validate_on_their_value() {
        assert!(validate_minutes(5.5).is_valid);
        assert_eq!(parse_time_value(5.5), 5);

        assert!(!validate_seconds(59.5).is_valid);
        assert_eq!(parse_time_value(59.5), 59);

        assert_eq!(
            validate_seconds(-0.5).error_message.as_deref(),
            Some("秒は0以上の値を入力してください")
        );
        assert_eq!(parse_time_value(-0.5), 0);

        assert_eq!(parse_time_value(1e20), 59);
        assert!(!validate_minutes(f64::NAN).is_valid);
        assert_eq!(parse_time_value(f64::NAN), 0);
    }

    #[test]
    fn invalid_input_still_yields_safe_value() {
        let raw = "99";
        assert!(!validate_minutes(raw).is_valid);
        assert_eq!(parse_time_value(raw), 59);
    }

    #[test]
    fn validation_result_serializes_camel_case() {
        let json = serde_json::to_value(validate_minutes(60)).unwrap();
        assert_eq!(json["isValid"], false);
        assert_eq!(json["errorMessage"], "分は59以下の値を入力してください");

        let json = serde_json::to_value(ValidationResult::valid()).unwrap();
        assert!(json.get("errorMessage").is_none());
    }

    proptest! {
        #[test]
        fn parse_is_bounded_and_idempotent_for_text(text in ".{0,12}") {
            let parsed = parse_time_value(text.as_str());
            prop_assert!(parsed <= MAX_COMPONENT_VALUE);
            prop_assert_eq!(parse_time_value(parsed), parsed);
        }

        #[test]
        fn parse_is_bounded_and_idempotent_for_numbers(n in any::<i64>()) {
            let parsed = parse_time_value(n);
            prop_assert!(parsed <= MAX_COMPONENT_VALUE);
            prop_assert_eq!(parse_time_value(parsed), parsed);
        }

        #[test]
        fn in_range_numbers_validate_and_survive_parsing(n in 0i64..=59) {
            prop_assert!(validate_seconds(n).is_valid);
            prop_assert_eq!(i64::from(parse_time_value(n)), n);
        }
    }
}
