//! Field validation for raw registration submissions.
//!
//! Every rule runs independently of the others, so one response can flag
//! all failing fields at once. Nothing here performs I/O or panics; the
//! outcome is always a value.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{
    AcademicYear, Email, FullName, NewRegistration, Phone, TicketType, COLLEGE_MAX, DEPARTMENT_MAX,
};

/// A raw submission exactly as the transport layer received it.
///
/// All fields are optional strings; requiredness is a validation rule, not a
/// shape constraint, so a missing `name` still lets the other checks run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub college: Option<String>,
    pub year: Option<String>,
    pub department: Option<String>,
    pub ticket_type: Option<String>,
}

/// Per-field validation failures keyed by the submitted field name.
///
/// Keys use the wire-level spelling (`ticketType`, not `ticket_type`) so the
/// caller can attach each message to the input it came from. At most one
/// message is recorded per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    /// True when no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value.map(|raw| raw.trim().to_owned()).filter(|v| !v.is_empty())
}

/// Check a raw submission against the field rules.
///
/// Returns the normalized registration (email lowercased and trimmed, all
/// text fields trimmed, empty optionals dropped) or the full error map.
pub fn validate(draft: RegistrationDraft) -> Result<NewRegistration, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = match FullName::new(draft.name.unwrap_or_default()) {
        Ok(name) => Some(name),
        Err(err) => {
            errors.insert("name", err.to_string());
            None
        }
    };

    let email = match Email::new(draft.email.unwrap_or_default()) {
        Ok(email) => Some(email),
        Err(err) => {
            errors.insert("email", err.to_string());
            None
        }
    };

    let phone = match normalize_optional(draft.phone).map(Phone::new).transpose() {
        Ok(phone) => phone,
        Err(err) => {
            errors.insert("phone", err.to_string());
            None
        }
    };

    let college = normalize_optional(draft.college);
    if college.as_ref().is_some_and(|v| v.chars().count() > COLLEGE_MAX) {
        errors.insert(
            "college",
            format!("college must be at most {COLLEGE_MAX} characters"),
        );
    }

    let year = match normalize_optional(draft.year) {
        None => None,
        Some(raw) => match AcademicYear::from_input(&raw) {
            Some(year) => Some(year),
            None => {
                errors.insert("year", format!("year must be one of: {}", year_choices()));
                None
            }
        },
    };

    let department = normalize_optional(draft.department);
    if department
        .as_ref()
        .is_some_and(|v| v.chars().count() > DEPARTMENT_MAX)
    {
        errors.insert(
            "department",
            format!("department must be at most {DEPARTMENT_MAX} characters"),
        );
    }

    let ticket_type = draft
        .ticket_type
        .as_deref()
        .and_then(TicketType::from_input);
    if ticket_type.is_none() {
        errors.insert(
            "ticketType",
            format!("ticketType must be one of: {}", ticket_choices()),
        );
    }

    match (name, email, ticket_type) {
        (Some(name), Some(email), Some(ticket_type)) if errors.is_empty() => Ok(
            NewRegistration::new(name, email, phone, college, year, department, ticket_type),
        ),
        _ => Err(errors),
    }
}

fn ticket_choices() -> String {
    TicketType::ALL
        .iter()
        .map(|tier| tier.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn year_choices() -> String {
    AcademicYear::ALL
        .iter()
        .map(|year| year.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
