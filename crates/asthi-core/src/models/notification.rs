use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{9,14}$").expect("valid phone pattern"));

static PHONE_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-()]").expect("valid separator pattern"));

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
});

/// Appointment reminder to be delivered by SMS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SmsRequest {
    pub phone: String,
    pub patient_name: String,
    pub appointment_date: String,
}

/// Appointment reminder to be delivered by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EmailRequest {
    pub email: String,
    pub patient_name: String,
    pub appointment_date: String,
}

/// Either kind of reminder. The shapes are disjoint on `phone` / `email`,
/// so an untagged representation is unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum NotificationRequest {
    Sms(SmsRequest),
    Email(EmailRequest),
}

impl SmsRequest {
    /// Validate the request and return the phone number in E.164 form.
    pub fn validate(&self) -> Result<String, CoreError> {
        require(&self.patient_name, "patient_name")?;
        require(&self.appointment_date, "appointment_date")?;
        validate_phone_number(&self.phone)?;
        Ok(normalize_phone_number(&self.phone))
    }
}

impl EmailRequest {
    pub fn validate(&self) -> Result<(), CoreError> {
        require(&self.patient_name, "patient_name")?;
        require(&self.appointment_date, "appointment_date")?;
        if !is_valid_email(&self.email) {
            return Err(CoreError::InvalidEmail);
        }
        Ok(())
    }
}

fn require(value: &str, field: &'static str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::MissingField(field));
    }
    Ok(())
}

/// Strip separators and prefix `+` if absent.
pub fn normalize_phone_number(phone: &str) -> String {
    if phone.is_empty() {
        return String::new();
    }
    let cleaned = PHONE_SEPARATORS.replace_all(phone, "");
    if cleaned.starts_with('+') {
        cleaned.into_owned()
    } else {
        format!("+{cleaned}")
    }
}

/// Check an international phone number, with country-specific length
/// rules for Saudi Arabia (966), India (91) and US/Canada (1).
///
/// Error messages are patient-facing.
pub fn validate_phone_number(phone: &str) -> Result<(), CoreError> {
    if phone.is_empty() {
        return Err(CoreError::InvalidPhone("Phone number is required".to_string()));
    }

    let cleaned = PHONE_SEPARATORS.replace_all(phone, "");
    let digits = cleaned.trim_start_matches('+');

    if !PHONE_PATTERN.is_match(&cleaned) {
        return Err(CoreError::InvalidPhone(
            "Phone number must be in international format with country code (10-15 digits)"
                .to_string(),
        ));
    }

    if digits.starts_with("966") {
        if digits.len() != 12 {
            return Err(CoreError::InvalidPhone(format!(
                "Saudi Arabian numbers require 9 digits after country code (966). \
                 Your number has {} digits. Example: +966501234567",
                digits.len() - 3
            )));
        }
        if !matches!(digits.as_bytes()[3], b'5' | b'1') {
            return Err(CoreError::InvalidPhone(
                "Saudi Arabian numbers should start with 5 (mobile) or 1 (landline) after country code"
                    .to_string(),
            ));
        }
    } else if digits.starts_with("91") {
        if digits.len() != 12 {
            return Err(CoreError::InvalidPhone(format!(
                "Indian numbers require 10 digits after country code (91). \
                 Your number has {} digits. Example: +919876543210",
                digits.len() - 2
            )));
        }
    } else if digits.starts_with('1') && digits.len() != 11 {
        return Err(CoreError::InvalidPhone(format!(
            "US/Canadian numbers require 10 digits after country code (1). \
             Your number has {} digits. Example: +14155551234",
            digits.len() - 1
        )));
    }

    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && EMAIL_PATTERN.is_match(email)
}
