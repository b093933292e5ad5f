//! Request validation. Every check here runs before the database is touched,
//! and nothing is rewritten: values that pass are stored as submitted.

use chrono::NaiveDate;
use lostfound_types::api::{
    CONTACT, DATELOST, DESCRIPTION, Fields, FULLNAME, ITEMNAME, LOCATION, PASSWORD, REG_NUMBER,
};
use lostfound_types::models::{ContactKind, Credentials, NewReport};

/// Upper bound on any submitted value, in characters, after trimming.
pub const MAX_FIELD_CHARS: usize = 1000;
pub const MIN_PASSWORD_CHARS: usize = 8;

const MAX_EMAIL_CHARS: usize = 254;
const MAX_EMAIL_LOCAL_CHARS: usize = 64;
const MAX_DOMAIN_CHARS: usize = 253;
const MAX_LABEL_CHARS: usize = 63;
const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid {0}")]
    InvalidField(String),
    #[error("Invalid contact format. Please enter a valid email or phone number.")]
    InvalidContact,
    #[error("Invalid date format")]
    InvalidDate,
    #[error("Password must be at least 8 characters")]
    PasswordTooShort,
    #[error("Invalid registration number format")]
    InvalidRegNumber,
}

/// Applies the length rule to every submitted field, in order.
pub fn check_fields(fields: &Fields) -> Result<(), ValidationError> {
    match fields.iter().find(|(_, value)| !within_limits(value)) {
        Some((name, _)) => Err(ValidationError::InvalidField(name.to_string())),
        None => Ok(()),
    }
}

pub fn report(fields: &Fields) -> Result<(NewReport, ContactKind), ValidationError> {
    check_fields(fields)?;

    let fullname = required(fields, FULLNAME)?;
    let itemname = required(fields, ITEMNAME)?;
    let location = required(fields, LOCATION)?;
    let datelost = required(fields, DATELOST)?;
    let contact = required(fields, CONTACT)?;

    let kind = contact_kind(contact).ok_or(ValidationError::InvalidContact)?;
    let date_lost = parse_date(datelost).ok_or(ValidationError::InvalidDate)?;

    let report = NewReport {
        fullname: fullname.to_string(),
        itemname: itemname.to_string(),
        location: location.to_string(),
        date_lost,
        description: fields.get(DESCRIPTION).map(str::to_string),
        contact: contact.to_string(),
    };
    Ok((report, kind))
}

pub fn registration(fields: &Fields) -> Result<Credentials, ValidationError> {
    check_fields(fields)?;

    let reg_number = required(fields, REG_NUMBER)?;
    let password = required(fields, PASSWORD)?;

    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ValidationError::PasswordTooShort);
    }
    if !is_alphanumeric(reg_number) {
        return Err(ValidationError::InvalidRegNumber);
    }

    Ok(Credentials {
        reg_number: reg_number.to_string(),
        password: password.to_string(),
    })
}

pub fn login(fields: &Fields) -> Result<Credentials, ValidationError> {
    check_fields(fields)?;

    let reg_number = required(fields, REG_NUMBER)?;
    let password = required(fields, PASSWORD)?;

    if !is_alphanumeric(reg_number) {
        return Err(ValidationError::InvalidRegNumber);
    }

    Ok(Credentials {
        reg_number: reg_number.to_string(),
        password: password.to_string(),
    })
}

fn required<'a>(fields: &'a Fields, name: &str) -> Result<&'a str, ValidationError> {
    fields
        .get(name)
        .ok_or_else(|| ValidationError::InvalidField(name.to_string()))
}

fn within_limits(value: &str) -> bool {
    let n = value.trim().chars().count();
    (1..=MAX_FIELD_CHARS).contains(&n)
}

pub fn is_alphanumeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}

pub fn contact_kind(value: &str) -> Option<ContactKind> {
    if is_email(value) {
        Some(ContactKind::Email)
    } else if is_phone(value) {
        Some(ContactKind::Phone)
    } else {
        None
    }
}

/// Accepts `YYYY-MM-DD` or `YYYY/MM/DD`, zero-padded, nothing around it.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 {
        return None;
    }

    // chrono alone would take unpadded parts and leading whitespace
    let sep = bytes[4];
    if !matches!(sep, b'-' | b'/') || bytes[7] != sep {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }

    let fmt = if sep == b'-' { "%Y-%m-%d" } else { "%Y/%m/%d" };
    NaiveDate::parse_from_str(value, fmt).ok()
}

pub fn is_email(value: &str) -> bool {
    if value.chars().count() > MAX_EMAIL_CHARS {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }
    is_email_local(local) && is_email_domain(domain)
}

fn is_email_local(local: &str) -> bool {
    const ATEXT_SPECIALS: &str = "!#$%&'*+-/=?^_`{|}~";

    if local.is_empty() || local.len() > MAX_EMAIL_LOCAL_CHARS {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || ATEXT_SPECIALS.contains(c))
}

fn is_email_domain(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > MAX_DOMAIN_CHARS {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_CHARS
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    let tld = labels[labels.len() - 1];
    labels_ok && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// Optional leading `+`, then digits with single space or hyphen separators.
pub fn is_phone(value: &str) -> bool {
    let body = value.strip_prefix('+').unwrap_or(value);
    if body.is_empty() {
        return false;
    }

    let mut digits = 0;
    let mut prev_separator = true; // rejects a leading separator
    for c in body.chars() {
        match c {
            '0'..='9' => {
                digits += 1;
                prev_separator = false;
            }
            ' ' | '-' if !prev_separator => prev_separator = true,
            _ => return false,
        }
    }

    !prev_separator && (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}
