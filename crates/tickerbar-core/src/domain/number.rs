use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Numeric field that upstreams encode either as a JSON number or as a
/// locale-formatted string such as `"1.234,56"`.
///
/// Any other JSON value lands in `Other` so that one odd field does not fail
/// the whole payload; it is rejected by [`LooseNumber::to_f64`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl LooseNumber {
    pub fn to_f64(&self) -> Result<f64, ValidationError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(text) => parse_decimal(text),
            Self::Other(value) => Err(ValidationError::InvalidNumber {
                value: value.to_string(),
            }),
        }
    }
}

impl From<f64> for LooseNumber {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for LooseNumber {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Parses a decimal string that may use `,` as the decimal separator.
///
/// With both separators present `.` is a thousands separator; a lone `,`
/// is the decimal separator.
pub fn parse_decimal(input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    let normalized = if trimmed.contains(',') && trimmed.contains('.') {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        trimmed.replace(',', ".")
    };

    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ValidationError::InvalidNumber {
            value: input.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_locale_formats() {
        assert_eq!(parse_decimal("1.234,56"), Ok(1234.56));
        assert_eq!(parse_decimal("1234,56"), Ok(1234.56));
        assert_eq!(parse_decimal("1234.56"), Ok(1234.56));
        assert_eq!(parse_decimal(" 980 "), Ok(980.0));
    }

    #[test]
    fn rejects_garbage_and_non_finite() {
        assert!(matches!(
            parse_decimal("n/a"),
            Err(ValidationError::InvalidNumber { .. })
        ));
        assert!(parse_decimal("NaN").is_err());
        assert!(parse_decimal("inf").is_err());
        assert!(parse_decimal("").is_err());
    }

    #[test]
    fn deserializes_number_or_string() {
        let values: Vec<LooseNumber> =
            serde_json::from_str(r#"[1015.5, "1.015,50"]"#).expect("valid json");
        assert_eq!(values[0].to_f64(), Ok(1015.5));
        assert_eq!(values[1].to_f64(), Ok(1015.5));
    }

    #[test]
    fn other_json_types_deserialize_but_do_not_convert() {
        let values: Vec<LooseNumber> =
            serde_json::from_str(r#"[true, {"amount": 1}, [1]]"#).expect("valid json");
        for value in &values {
            assert!(matches!(value, LooseNumber::Other(_)));
            assert!(matches!(
                value.to_f64(),
                Err(ValidationError::InvalidNumber { .. })
            ));
        }
    }
}
