//! Input validation for console commands.
//!
//! Numeric arguments arrive as whitespace-separated tokens. Every parser
//! here either returns a value already known to satisfy its range or a
//! [`ValidationError`] whose `Display` text is shown to the user. Nothing is
//! mutated on failure, so callers can simply report and re-prompt.

use std::num::NonZeroUsize;

use thiserror::Error;

/// A rejected command or argument.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Token is not an integer at all.
    #[error("{field} must be an integer, got `{value}`")]
    NotANumber { field: &'static str, value: String },
    /// Token is not an integer greater than zero.
    #[error("{field} must be a positive integer, got `{value}`")]
    NotPositive { field: &'static str, value: String },
    /// Token is a negative integer where only `>= 0` is accepted.
    #[error("{field} must not be negative, got `{value}`")]
    Negative { field: &'static str, value: String },
    /// A required argument is absent.
    #[error("usage: {usage}")]
    MissingArgument { usage: &'static str },
    /// First token names no known command.
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    /// The ticket counter has issued its last number.
    #[error("no ticket numbers left")]
    TicketsExhausted,
}

/// Validation result.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Parses an integer `> 0` that fits in `u32`.
///
/// Non-numeric, zero, negative, and overflowing tokens are all reported as
/// [`ValidationError::NotPositive`].
pub fn parse_positive(field: &'static str, token: &str) -> ValidationResult<u32> {
    match token.parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ValidationError::NotPositive {
            field,
            value: token.to_string(),
        }),
    }
}

/// Parses the number of service windows.
pub fn parse_window_count(token: &str) -> ValidationResult<NonZeroUsize> {
    token
        .parse::<NonZeroUsize>()
        .map_err(|_| ValidationError::NotPositive {
            field: "window count",
            value: token.to_string(),
        })
}

/// Parses an integer `>= 0`.
pub fn parse_count(field: &'static str, token: &str) -> ValidationResult<u32> {
    let value = parse_signed(field, token)?;
    if value < 0 {
        return Err(ValidationError::Negative {
            field,
            value: token.to_string(),
        });
    }
    u32::try_from(value).map_err(|_| ValidationError::NotANumber {
        field,
        value: token.to_string(),
    })
}

/// Parses any `i64`.
pub fn parse_signed(field: &'static str, token: &str) -> ValidationResult<i64> {
    token.parse::<i64>().map_err(|_| ValidationError::NotANumber {
        field,
        value: token.to_string(),
    })
}

/// Returns the argument at `idx` or a usage error.
pub fn require_arg<'a>(
    args: &[&'a str],
    idx: usize,
    usage: &'static str,
) -> ValidationResult<&'a str> {
    args.get(idx)
        .copied()
        .ok_or(ValidationError::MissingArgument { usage })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("duration", "15"), Ok(15));
        for bad in ["0", "-5", "abc", "1.5", "", "99999999999"] {
            let err = parse_positive("duration", bad).unwrap_err();
            assert!(matches!(err, ValidationError::NotPositive { .. }), "{bad}");
        }
    }

    #[test]
    fn test_parse_window_count() {
        assert_eq!(parse_window_count("3").unwrap().get(), 3);
        assert!(parse_window_count("0").is_err());
        assert!(parse_window_count("-2").is_err());
        assert!(parse_window_count("two").is_err());
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("commands", "0"), Ok(0));
        assert_eq!(parse_count("commands", "12"), Ok(12));
        assert!(matches!(
            parse_count("commands", "-1"),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            parse_count("commands", "x"),
            Err(ValidationError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = parse_positive("duration", "abc").unwrap_err();
        assert_eq!(err.to_string(), "duration must be a positive integer, got `abc`");

        let err = require_arg(&["ENQUEUE"], 1, "ENQUEUE <minutes>").unwrap_err();
        assert_eq!(err.to_string(), "usage: ENQUEUE <minutes>");

        let err = ValidationError::UnknownCommand("FOO".into());
        assert_eq!(err.to_string(), "unknown command `FOO`");
    }

    #[test]
    fn test_require_arg() {
        let args = ["ADD", "apple", "3"];
        assert_eq!(require_arg(&args, 1, "x"), Ok("apple"));
        assert!(require_arg(&args, 3, "x").is_err());
    }
}
