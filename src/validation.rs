//! Input validation for the liaison engine
//!
//! Checks run before any mutation. Every failure is a
//! [`LiaisonError::Validation`] naming the offending field.

use crate::constants::system::{MAX_OUTCOME_RATING, MIN_OUTCOME_RATING};
use crate::error::{validation_error, LiaisonResult};
use crate::models::{NewGrantApplication, RecordOutcome, ScheduleCall};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;

/// Maximum length for single-line text fields such as titles and reasons
const MAX_TEXT_LENGTH: usize = 500;

/// Maximum length for free-form fields such as summaries and agendas
const MAX_LONG_TEXT_LENGTH: usize = 10_000;

/// Reject empty or whitespace-only values
pub fn require_non_empty(field: &str, value: &str) -> LiaisonResult<()> {
    if value.trim().is_empty() {
        return Err(validation_error(format!("{field} is required")));
    }
    Ok(())
}

fn check_length(field: &str, value: &str, max: usize) -> LiaisonResult<()> {
    let length = value.chars().count();
    if length > max {
        return Err(validation_error(format!(
            "{field} too long: {length} chars (max: {max})"
        )));
    }
    Ok(())
}

/// Required single-line text
pub fn validate_text(field: &str, value: &str) -> LiaisonResult<()> {
    require_non_empty(field, value)?;
    check_length(field, value, MAX_TEXT_LENGTH)
}

/// Optional free-form text; only the length is checked
pub fn validate_long_text(field: &str, value: &str) -> LiaisonResult<()> {
    check_length(field, value, MAX_LONG_TEXT_LENGTH)
}

/// Outcome ratings are whole numbers in `1..=5`
pub fn validate_rating(rating: u8) -> LiaisonResult<()> {
    if !(MIN_OUTCOME_RATING..=MAX_OUTCOME_RATING).contains(&rating) {
        return Err(validation_error(format!(
            "rating must be between {MIN_OUTCOME_RATING} and {MAX_OUTCOME_RATING}, got {rating}"
        )));
    }
    Ok(())
}

/// Grant amounts are never negative
pub fn validate_grant_amount(amount: Decimal) -> LiaisonResult<()> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(validation_error(format!(
            "grant_amount must not be negative, got {amount}"
        )));
    }
    Ok(())
}

/// Loose shape check; empty is allowed because the contact may be unknown
pub fn validate_email(email: &str) -> LiaisonResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Ok(());
    }
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && domain.contains('.') && !domain.starts_with('.') =>
        {
            Ok(())
        }
        _ => Err(validation_error(format!("contact_email is malformed: '{email}'"))),
    }
}

/// Parse an ISO-8601 timestamp coming from the UI or API layer
///
/// Accepts RFC 3339 (`2026-05-01T14:00:00Z`, with any offset) and naive local
/// forms (`2026-05-01T14:00[:00]`, `2026-05-01 14:00`) which are taken as UTC.
pub fn parse_timestamp(field: &str, value: &str) -> LiaisonResult<DateTime<Utc>> {
    let value = value.trim();
    require_non_empty(field, value)?;

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| validation_error(format!("{field} is not an ISO-8601 timestamp: '{value}'")))
}

/// Parse an ISO-8601 calendar date (`2026-05-01`)
pub fn parse_date(field: &str, value: &str) -> LiaisonResult<NaiveDate> {
    let value = value.trim();
    require_non_empty(field, value)?;
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| validation_error(format!("{field} is not an ISO-8601 date: '{value}'")))
}

pub fn validate_new_application(fields: &NewGrantApplication) -> LiaisonResult<()> {
    validate_text("proposal_title", &fields.proposal_title)?;
    validate_text("funder_name", &fields.funder_name)?;
    check_length("contact_person", &fields.contact_person, MAX_TEXT_LENGTH)?;
    validate_email(&fields.contact_email)?;
    validate_grant_amount(fields.grant_amount)?;
    if let Some(notes) = &fields.notes {
        validate_long_text("notes", notes)?;
    }
    Ok(())
}

pub fn validate_schedule_request(request: &ScheduleCall) -> LiaisonResult<()> {
    validate_text("title", &request.title)?;
    validate_text("call_type", &request.call_type)?;
    if request.duration_minutes == Some(0) {
        return Err(validation_error("duration must be at least one minute"));
    }
    validate_long_text("agenda", &request.agenda)?;
    validate_long_text("notes", &request.notes)?;
    if request
        .participants
        .iter()
        .any(|participant| participant.trim().is_empty())
    {
        return Err(validation_error("participants must not contain blank names"));
    }
    Ok(())
}

pub fn validate_outcome_request(request: &RecordOutcome) -> LiaisonResult<()> {
    require_non_empty("summary", &request.summary)?;
    validate_long_text("summary", &request.summary)?;
    validate_rating(request.rating)?;
    if let Some(follow_up_type) = &request.follow_up_type {
        if request.follow_up_date.is_some() {
            validate_text("follow_up_type", follow_up_type)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LiaisonError;
    use crate::models::{FunderType, OutcomeStatus};
    use chrono::TimeZone;

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("reason", "submitted").is_ok());
        assert!(matches!(
            require_non_empty("reason", "   "),
            Err(LiaisonError::Validation(msg)) if msg == "reason is required"
        ));
    }

    #[test]
    fn test_rating_bounds() {
        for rating in 1..=5 {
            assert!(validate_rating(rating).is_ok());
        }
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_parse_timestamp_forms() {
        let expected = Utc.with_ymd_and_hms(2026, 5, 1, 14, 0, 0).unwrap();
        assert_eq!(parse_timestamp("at", "2026-05-01T14:00:00Z").unwrap(), expected);
        assert_eq!(
            parse_timestamp("at", "2026-05-01T16:00:00+02:00").unwrap(),
            expected
        );
        assert_eq!(parse_timestamp("at", "2026-05-01T14:00").unwrap(), expected);
        assert_eq!(parse_timestamp("at", "2026-05-01 14:00:00").unwrap(), expected);
        assert!(parse_timestamp("at", "next tuesday").is_err());
        assert!(parse_timestamp("at", "").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("expected_date", "2026-07-15").unwrap(),
            NaiveDate::from_ymd_opt(2026, 7, 15).unwrap()
        );
        assert!(parse_date("expected_date", "15/07/2026").is_err());
    }

    #[test]
    fn test_email_shape() {
        assert!(validate_email("").is_ok());
        assert!(validate_email("officer@funder.org").is_ok());
        assert!(validate_email("officer").is_err());
        assert!(validate_email("@funder.org").is_err());
        assert!(validate_email("officer@localhost").is_err());
    }

    #[test]
    fn test_new_application_rules() {
        let valid = NewGrantApplication::new(
            "Soil Carbon Mapping",
            "National Science Agency",
            FunderType::Federal,
            Decimal::new(250_000, 0),
        );
        assert!(validate_new_application(&valid).is_ok());

        let mut missing_title = valid.clone();
        missing_title.proposal_title = String::new();
        assert!(validate_new_application(&missing_title).is_err());

        let mut negative = valid;
        negative.grant_amount = Decimal::new(-1, 0);
        assert!(validate_new_application(&negative).is_err());
    }

    #[test]
    fn test_outcome_request_rules() {
        let ok = RecordOutcome::new(OutcomeStatus::Successful, "Went well", 4);
        assert!(validate_outcome_request(&ok).is_ok());

        let blank = RecordOutcome::new(OutcomeStatus::Successful, " ", 4);
        assert!(validate_outcome_request(&blank).is_err());

        let bad_rating = RecordOutcome::new(OutcomeStatus::Successful, "Went well", 9);
        assert!(validate_outcome_request(&bad_rating).is_err());
    }

    #[test]
    fn test_schedule_request_rules() {
        let at = Utc.with_ymd_and_hms(2026, 5, 1, 14, 0, 0).unwrap();
        assert!(validate_schedule_request(&ScheduleCall::new("Kickoff", at, "Introduction")).is_ok());
        assert!(validate_schedule_request(&ScheduleCall::new("", at, "Introduction")).is_err());
        assert!(
            validate_schedule_request(&ScheduleCall::new("Kickoff", at, "Introduction").with_duration(0))
                .is_err()
        );
        assert!(validate_schedule_request(
            &ScheduleCall::new("Kickoff", at, "Introduction").with_participants(["PI", " "])
        )
        .is_err());
    }
}
