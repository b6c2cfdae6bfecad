//! Regression coverage for registration types and field validation.

use rstest::rstest;

use super::*;

fn full_draft() -> RegistrationDraft {
    RegistrationDraft {
        name: Some("Mary-Jane O'Brien".into()),
        email: Some(" USER@Example.com ".into()),
        phone: Some("+1 (555) 010-2030".into()),
        college: Some("Riverside Institute of Technology".into()),
        year: Some("2nd Year".into()),
        department: Some("Computer Science".into()),
        ticket_type: Some("student".into()),
    }
}

#[rstest]
#[case("Mary-Jane O'Brien")]
#[case("J. R. \"Bob\" Dobbs")]
#[case("Al")]
fn full_name_accepts_allowed_characters(#[case] input: &str) {
    let name = FullName::new(input).expect("name should validate");
    assert_eq!(name.as_str(), input);
}

#[rstest]
#[case("John123", FullNameError::InvalidCharacters)]
#[case("", FullNameError::Empty)]
#[case("   ", FullNameError::Empty)]
#[case("J", FullNameError::TooShort { min: NAME_MIN })]
fn full_name_rejects_invalid_input(#[case] input: &str, #[case] expected: FullNameError) {
    assert_eq!(FullName::new(input), Err(expected));
}

#[rstest]
fn full_name_rejects_over_length_input() {
    let long = "a".repeat(NAME_MAX + 1);
    assert_eq!(
        FullName::new(long),
        Err(FullNameError::TooLong { max: NAME_MAX })
    );
}

#[rstest]
fn full_name_trims_surrounding_whitespace() {
    let name = FullName::new("  Ada Lovelace  ").expect("name should validate");
    assert_eq!(name.as_str(), "Ada Lovelace");
}

#[rstest]
fn email_normalizes_case_and_whitespace() {
    let email = Email::new(" USER@Example.com ").expect("email should validate");
    assert_eq!(email.as_str(), "user@example.com");
}

#[rstest]
#[case("not-an-email")]
#[case("user@nodot")]
#[case("two words@example.com")]
#[case("user@@example.com")]
fn email_rejects_malformed_addresses(#[case] input: &str) {
    assert_eq!(Email::new(input), Err(EmailError::InvalidFormat));
}

#[rstest]
fn email_rejects_over_length_addresses() {
    let local = "a".repeat(EMAIL_MAX);
    assert_eq!(
        Email::new(format!("{local}@example.com")),
        Err(EmailError::TooLong { max: EMAIL_MAX })
    );
}

#[rstest]
#[case("+1 (555) 010-2030")]
#[case("5550102030")]
fn phone_accepts_allowed_characters(#[case] input: &str) {
    assert!(Phone::new(input).is_ok());
}

#[rstest]
fn phone_rejects_letters() {
    assert_eq!(
        Phone::new("call me maybe"),
        Err(PhoneError::InvalidCharacters)
    );
}

#[rstest]
fn phone_rejects_over_length_numbers() {
    let long = "9".repeat(PHONE_MAX + 1);
    assert_eq!(Phone::new(long), Err(PhoneError::TooLong { max: PHONE_MAX }));
}

#[rstest]
#[case("standard", TicketType::Standard)]
#[case("vip", TicketType::Vip)]
#[case("student", TicketType::Student)]
fn ticket_type_parses_exact_values(#[case] input: &str, #[case] expected: TicketType) {
    assert_eq!(TicketType::from_input(input), Some(expected));
}

#[rstest]
#[case("Standard")]
#[case("premium")]
#[case("")]
fn ticket_type_rejects_anything_else(#[case] input: &str) {
    assert_eq!(TicketType::from_input(input), None);
}

#[rstest]
#[case("1st Year", AcademicYear::First)]
#[case("Faculty", AcademicYear::Faculty)]
#[case("Other", AcademicYear::Other)]
fn academic_year_parses_exact_values(#[case] input: &str, #[case] expected: AcademicYear) {
    assert_eq!(AcademicYear::from_input(input), Some(expected));
}

#[rstest]
fn validate_accepts_a_full_draft_and_normalizes() {
    let registration = validate(full_draft()).expect("draft should validate");

    assert_eq!(registration.name().as_str(), "Mary-Jane O'Brien");
    assert_eq!(registration.email().as_str(), "user@example.com");
    assert_eq!(
        registration.phone().map(Phone::as_str),
        Some("+1 (555) 010-2030")
    );
    assert_eq!(
        registration.college(),
        Some("Riverside Institute of Technology")
    );
    assert_eq!(registration.year(), Some(AcademicYear::Second));
    assert_eq!(registration.department(), Some("Computer Science"));
    assert_eq!(registration.ticket_type(), TicketType::Student);
}

#[rstest]
fn validate_accepts_a_minimal_draft() {
    let draft = RegistrationDraft {
        name: Some("Ada Lovelace".into()),
        email: Some("ada@example.com".into()),
        ticket_type: Some("standard".into()),
        ..RegistrationDraft::default()
    };

    let registration = validate(draft).expect("draft should validate");
    assert!(registration.phone().is_none());
    assert!(registration.year().is_none());
}

#[rstest]
fn validate_flags_every_missing_required_field_at_once() {
    let errors = validate(RegistrationDraft::default()).expect_err("empty draft must fail");

    assert_eq!(errors.len(), 3);
    assert_eq!(errors.get("name"), Some("name is required"));
    assert_eq!(errors.get("email"), Some("email is required"));
    assert!(errors.get("ticketType").is_some());
}

#[rstest]
fn validate_rejects_invalid_ticket_type_regardless_of_other_fields() {
    let mut draft = full_draft();
    draft.ticket_type = Some("premium".into());

    let errors = validate(draft).expect_err("bad ticket type must fail");
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.get("ticketType"),
        Some("ticketType must be one of: standard, vip, student")
    );
}

#[rstest]
fn validate_rejects_unenumerated_year() {
    let mut draft = full_draft();
    draft.year = Some("5th Year".into());

    let errors = validate(draft).expect_err("bad year must fail");
    assert!(errors.get("year").is_some());
}

#[rstest]
fn validate_treats_blank_optionals_as_absent() {
    let mut draft = full_draft();
    draft.phone = Some("   ".into());
    draft.college = Some(String::new());

    let registration = validate(draft).expect("draft should validate");
    assert!(registration.phone().is_none());
    assert!(registration.college().is_none());
}

#[rstest]
fn validate_rejects_over_length_college_and_department() {
    let mut draft = full_draft();
    draft.college = Some("c".repeat(COLLEGE_MAX + 1));
    draft.department = Some("d".repeat(DEPARTMENT_MAX + 1));

    let errors = validate(draft).expect_err("over-length optionals must fail");
    assert_eq!(errors.len(), 2);
    assert!(errors.get("college").is_some());
    assert!(errors.get("department").is_some());
}

#[rstest]
fn field_errors_serialize_as_a_flat_map() {
    let errors = validate(RegistrationDraft::default()).expect_err("empty draft must fail");
    let json = serde_json::to_value(&errors).expect("errors serialize");

    assert!(json.get("name").is_some());
    assert!(json.get("ticketType").is_some());
}
