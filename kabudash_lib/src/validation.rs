use crate::error::KabudashError;
use crate::normalize::normalize;

pub const MAX_CODE_LENGTH: usize = 20;

/// Price history windows accepted by the chart endpoint.
pub const VALID_PERIODS: &[&str] = &["1mo", "3mo", "6mo", "1y"];

/// Bar intervals accepted by the chart endpoint.
pub const VALID_INTERVALS: &[&str] = &["1d", "1wk", "1mo"];

/// Normalize a ticker code and check it is usable as a lookup key.
///
/// Full-width input is folded first, so `"７６１１．Ｔ"` is accepted as `"7611.T"`.
pub fn validate_code(input: &str) -> Result<String, KabudashError> {
    let code = normalize(input);
    if code.is_empty() {
        return Err(KabudashError::InvalidInput(
            "ticker code must not be empty".to_string(),
        ));
    }
    if code.chars().count() > MAX_CODE_LENGTH {
        return Err(KabudashError::InvalidInput(format!(
            "ticker code exceeds maximum length of {} characters",
            MAX_CODE_LENGTH
        )));
    }
    if let Some(bad) = code
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=')))
    {
        return Err(KabudashError::InvalidInput(format!(
            "ticker code '{}' contains invalid character '{}'",
            code, bad
        )));
    }
    Ok(code)
}

pub fn validate_days(days: u32) -> Result<u32, KabudashError> {
    if !(1..=365).contains(&days) {
        return Err(KabudashError::InvalidInput(format!(
            "days must be between 1 and 365, got {}",
            days
        )));
    }
    Ok(days)
}

pub fn validate_max_items(max_items: usize) -> Result<usize, KabudashError> {
    if !(1..=100).contains(&max_items) {
        return Err(KabudashError::InvalidInput(format!(
            "max items must be between 1 and 100, got {}",
            max_items
        )));
    }
    Ok(max_items)
}

pub fn validate_period(input: &str) -> Result<&'static str, KabudashError> {
    let lower = input.trim().to_lowercase();
    VALID_PERIODS
        .iter()
        .find(|p| **p == lower)
        .copied()
        .ok_or_else(|| {
            KabudashError::InvalidInput(format!(
                "unknown period '{}'. Valid: {}",
                input,
                VALID_PERIODS.join(", ")
            ))
        })
}

pub fn validate_interval(input: &str) -> Result<&'static str, KabudashError> {
    let lower = input.trim().to_lowercase();
    VALID_INTERVALS
        .iter()
        .find(|i| **i == lower)
        .copied()
        .ok_or_else(|| {
            KabudashError::InvalidInput(format!(
                "unknown interval '{}'. Valid: {}",
                input,
                VALID_INTERVALS.join(", ")
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_valid() {
        assert_eq!(validate_code("7611.T").unwrap(), "7611.T");
        assert_eq!(validate_code(" AAPL ").unwrap(), "AAPL");
        assert_eq!(validate_code("^N225").unwrap(), "^N225");
    }

    #[test]
    fn code_fullwidth_is_folded() {
        assert_eq!(validate_code("７６１１．Ｔ").unwrap(), "7611.T");
    }

    #[test]
    fn code_empty() {
        assert!(validate_code("").is_err());
        assert!(validate_code("   ").is_err());
    }

    #[test]
    fn code_invalid_chars() {
        assert!(validate_code("76 11").is_err());
        assert!(validate_code("日高屋").is_err());
        assert!(validate_code("AAPL;rm").is_err());
    }

    #[test]
    fn code_too_long() {
        assert!(validate_code(&"A".repeat(21)).is_err());
        assert!(validate_code(&"A".repeat(20)).is_ok());
    }

    #[test]
    fn days_bounds() {
        assert!(validate_days(0).is_err());
        assert_eq!(validate_days(1).unwrap(), 1);
        assert_eq!(validate_days(365).unwrap(), 365);
        assert!(validate_days(366).is_err());
    }

    #[test]
    fn max_items_bounds() {
        assert!(validate_max_items(0).is_err());
        assert_eq!(validate_max_items(8).unwrap(), 8);
        assert!(validate_max_items(101).is_err());
    }

    #[test]
    fn period_and_interval() {
        assert_eq!(validate_period("3MO").unwrap(), "3mo");
        assert!(validate_period("5y").is_err());
        assert_eq!(validate_interval("1wk").unwrap(), "1wk");
        assert!(validate_interval("1h").is_err());
    }
}
