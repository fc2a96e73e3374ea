use std::time::Duration;

use super::types::{PositiveU64, PositiveUsize};
use crate::error::ValidationError;

pub(super) fn parse_positive_u64(s: &str) -> Result<PositiveU64, ValidationError> {
    s.parse::<PositiveU64>()
}

pub(super) fn parse_positive_usize(s: &str) -> Result<PositiveUsize, ValidationError> {
    s.parse::<PositiveUsize>()
}

/// Parses a redirect limit: `-1` disables following, any value `>= 0` caps the hops.
pub(crate) fn parse_redirect_limit(s: &str) -> Result<i64, ValidationError> {
    let value: i64 = s
        .trim()
        .parse()
        .map_err(|err| ValidationError::InvalidNumber { source: err })?;
    ensure_redirect_limit(value)
}

pub(crate) const fn ensure_redirect_limit(value: i64) -> Result<i64, ValidationError> {
    if value < -1 {
        return Err(ValidationError::RedirectLimitOutOfRange { value });
    }
    Ok(value)
}

/// Parses durations such as `250ms`, `30s`, `2m` or compound `1m30s`.
/// A bare number is read as seconds.
pub(crate) fn parse_duration_arg(s: &str) -> Result<Duration, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    let mut total = Duration::ZERO;
    let mut rest = value;
    while !rest.is_empty() {
        let digits_len = rest.chars().take_while(char::is_ascii_digit).count();
        if digits_len == 0 {
            return Err(ValidationError::InvalidDurationFormat {
                value: value.to_owned(),
            });
        }
        let (num_part, after_num) = rest.split_at(digits_len);
        let number: u64 =
            num_part
                .parse()
                .map_err(|err| ValidationError::InvalidDurationNumber {
                    value: value.to_owned(),
                    source: err,
                })?;

        let unit_len = after_num
            .chars()
            .take_while(char::is_ascii_alphabetic)
            .count();
        let (unit_part, remaining) = after_num.split_at(unit_len);
        if unit_part.is_empty() && !remaining.is_empty() {
            return Err(ValidationError::InvalidDurationFormat {
                value: value.to_owned(),
            });
        }
        let unit = if unit_part.is_empty() { "s" } else { unit_part };

        let segment = duration_segment(number, unit)?;
        total = total
            .checked_add(segment)
            .ok_or(ValidationError::DurationOverflow)?;
        rest = remaining;
    }

    if total.is_zero() {
        return Err(ValidationError::DurationZero);
    }

    Ok(total)
}

fn duration_segment(number: u64, unit: &str) -> Result<Duration, ValidationError> {
    let duration = match unit {
        "ms" => Duration::from_millis(number),
        "s" => Duration::from_secs(number),
        "m" => {
            let secs = number
                .checked_mul(60)
                .ok_or(ValidationError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        "h" => {
            let secs = number
                .checked_mul(60)
                .and_then(|seconds| seconds.checked_mul(60))
                .ok_or(ValidationError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        _ => {
            return Err(ValidationError::InvalidDurationUnit {
                unit: unit.to_owned(),
            });
        }
    };
    Ok(duration)
}
