//! Registration aggregate and its validated value types.
//!
//! Every field that reaches the store has passed through one of the
//! constructors here; the raw-input side lives in [`validation`].

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod validation;

pub use validation::{validate, FieldErrors, RegistrationDraft};

/// Minimum allowed length for an attendee name.
pub const NAME_MIN: usize = 2;
/// Maximum allowed length for an attendee name.
pub const NAME_MAX: usize = 100;
/// Maximum allowed length for an email address.
pub const EMAIL_MAX: usize = 254;
/// Maximum allowed length for a phone number.
pub const PHONE_MAX: usize = 20;
/// Maximum allowed length for a college name.
pub const COLLEGE_MAX: usize = 200;
/// Maximum allowed length for a department name.
pub const DEPARTMENT_MAX: usize = 100;

static NAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn name_regex() -> &'static Regex {
    NAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        let pattern = "^[A-Za-z\\s.'\"-]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("name regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Deliberately shallow local@domain.tld shape check; deliverability is
        // not this layer's problem.
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        let pattern = r"^[0-9+()\s-]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

/// Validation errors returned by [`FullName::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FullNameError {
    Empty,
    TooShort { min: usize },
    TooLong { max: usize },
    InvalidCharacters,
}

impl fmt::Display for FullNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "name is required"),
            Self::TooShort { min } => write!(f, "name must be at least {min} characters"),
            Self::TooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::InvalidCharacters => {
                write!(f, "name may only contain letters, spaces, and . ' \" -")
            }
        }
    }
}

impl std::error::Error for FullNameError {}

/// Attendee name, trimmed and restricted to a conservative character set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FullName(String);

impl FullName {
    /// Validate and construct a [`FullName`], trimming surrounding whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, FullNameError> {
        Self::from_owned(name.into())
    }

    fn from_owned(name: String) -> Result<Self, FullNameError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(FullNameError::Empty);
        }

        let length = trimmed.chars().count();
        if length < NAME_MIN {
            return Err(FullNameError::TooShort { min: NAME_MIN });
        }
        if length > NAME_MAX {
            return Err(FullNameError::TooLong { max: NAME_MAX });
        }

        if !name_regex().is_match(trimmed) {
            return Err(FullNameError::InvalidCharacters);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// The normalized name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<FullName> for String {
    fn from(value: FullName) -> Self {
        value.0
    }
}

impl TryFrom<String> for FullName {
    type Error = FullNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Validation errors returned by [`Email::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    Empty,
    TooLong { max: usize },
    InvalidFormat,
}

impl fmt::Display for EmailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "email is required"),
            Self::TooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::InvalidFormat => write!(f, "email must be a valid email address"),
        }
    }
}

impl std::error::Error for EmailError {}

/// Email address, trimmed and lowercased before validation.
///
/// ## Invariants
/// - Always stored in its normalized form; equality on this type is the
///   duplicate-detection equality used by the store's unique index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Normalize (trim + lowercase) and validate an email address.
    pub fn new(email: impl Into<String>) -> Result<Self, EmailError> {
        Self::from_owned(email.into())
    }

    fn from_owned(email: String) -> Result<Self, EmailError> {
        let normalized = email.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(EmailError::Empty);
        }
        if normalized.chars().count() > EMAIL_MAX {
            return Err(EmailError::TooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(&normalized) {
            return Err(EmailError::InvalidFormat);
        }
        Ok(Self(normalized))
    }

    /// The normalized address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Validation errors returned by [`Phone::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    TooLong { max: usize },
    InvalidCharacters,
}

impl fmt::Display for PhoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong { max } => write!(f, "phone must be at most {max} characters"),
            Self::InvalidCharacters => {
                write!(f, "phone may only contain digits, spaces, and + ( ) -")
            }
        }
    }
}

impl std::error::Error for PhoneError {}

/// Optional contact number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    /// Validate and construct a [`Phone`], trimming surrounding whitespace.
    pub fn new(phone: impl Into<String>) -> Result<Self, PhoneError> {
        Self::from_owned(phone.into())
    }

    fn from_owned(phone: String) -> Result<Self, PhoneError> {
        let trimmed = phone.trim();
        if trimmed.chars().count() > PHONE_MAX {
            return Err(PhoneError::TooLong { max: PHONE_MAX });
        }
        if !phone_regex().is_match(trimmed) {
            return Err(PhoneError::InvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The normalized number.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Phone> for String {
    fn from(value: Phone) -> Self {
        value.0
    }
}

impl TryFrom<String> for Phone {
    type Error = PhoneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Ticket tier selected at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketType {
    Standard,
    Vip,
    Student,
}

impl TicketType {
    /// Every accepted ticket tier, in submission-form order.
    pub const ALL: [Self; 3] = [Self::Standard, Self::Vip, Self::Student];

    /// Wire and storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Vip => "vip",
            Self::Student => "student",
        }
    }

    /// Parse the exact wire representation; anything else is rejected.
    pub fn from_input(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.as_str() == value)
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Year-of-study bracket offered on the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcademicYear {
    First,
    Second,
    Third,
    Fourth,
    Faculty,
    Other,
}

impl AcademicYear {
    /// Every accepted bracket, in submission-form order.
    pub const ALL: [Self; 6] = [
        Self::First,
        Self::Second,
        Self::Third,
        Self::Fourth,
        Self::Faculty,
        Self::Other,
    ];

    /// Wire and storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "1st Year",
            Self::Second => "2nd Year",
            Self::Third => "3rd Year",
            Self::Fourth => "4th Year",
            Self::Faculty => "Faculty",
            Self::Other => "Other",
        }
    }

    /// Parse the exact wire representation; anything else is rejected.
    pub fn from_input(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|year| year.as_str() == value)
    }
}

impl fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server-assigned registration identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationId(Uuid);

impl RegistrationId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier produced by the store.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registration that passed field validation and is ready to insert.
///
/// ## Invariants
/// - Constructible only from validated components; the store never sees a
///   value that violates the field rules.
/// - `created_at` and `id` are assigned by the store, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    name: FullName,
    email: Email,
    phone: Option<Phone>,
    college: Option<String>,
    year: Option<AcademicYear>,
    department: Option<String>,
    ticket_type: TicketType,
}

impl NewRegistration {
    /// Build a registration from validated components.
    pub fn new(
        name: FullName,
        email: Email,
        phone: Option<Phone>,
        college: Option<String>,
        year: Option<AcademicYear>,
        department: Option<String>,
        ticket_type: TicketType,
    ) -> Self {
        Self {
            name,
            email,
            phone,
            college,
            year,
            department,
            ticket_type,
        }
    }

    /// Attendee name.
    pub fn name(&self) -> &FullName {
        &self.name
    }

    /// Normalized email address; the duplicate-detection key.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Optional contact number.
    pub fn phone(&self) -> Option<&Phone> {
        self.phone.as_ref()
    }

    /// Optional college name.
    pub fn college(&self) -> Option<&str> {
        self.college.as_deref()
    }

    /// Optional year-of-study bracket.
    pub fn year(&self) -> Option<AcademicYear> {
        self.year
    }

    /// Optional department name.
    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    /// Selected ticket tier.
    pub fn ticket_type(&self) -> TicketType {
        self.ticket_type
    }
}

#[cfg(test)]
mod tests;
