//! Field validation shared by the appointment and patient forms.

use chrono::{NaiveDate, NaiveTime};
use hopespring_core::{AppError, AppResult};

/// Parses a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format. Use YYYY-MM-DD".to_owned()))
}

/// Parses a slot start time in `HH:MM` form.
pub fn parse_time(value: &str) -> AppResult<NaiveTime> {
    let value = value.trim();
    if value.len() != 5 {
        return Err(AppError::Validation(
            "Invalid time format. Use HH:MM".to_owned(),
        ));
    }

    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| AppError::Validation("Invalid time format. Use HH:MM".to_owned()))
}

/// Validates a phone number: optional `+`, optional leading `1`, then 9 to 15
/// digits.
pub fn validate_phone(value: &str) -> AppResult<()> {
    let rest = value.strip_prefix('+').unwrap_or(value);
    let accepts = |digits: &str| {
        (9..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
    };

    // The leading `1` is optional, so either reading may match.
    let valid = accepts(rest) || rest.strip_prefix('1').is_some_and(accepts);
    if !valid {
        return Err(AppError::Validation("Invalid phone number format".to_owned()));
    }

    Ok(())
}

/// Validates the structure of an email address.
pub fn validate_email(value: &str) -> AppResult<()> {
    let invalid = || AppError::Validation("Invalid email format".to_owned());

    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return Err(invalid());
    };
    let host_ok = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || ".-".contains(c));
    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());

    if local_ok && host_ok && tld_ok {
        Ok(())
    } else {
        Err(invalid())
    }
}
