//! Declarative field validation.
//!
//! Validation is all-fields-at-once: every rule is evaluated independently
//! and the caller receives the complete set of violations, keyed by wire
//! field name, so a submitter sees everything wrong in one pass. Pure
//! predicate evaluation, no side effects.

use std::collections::BTreeMap;

use crate::constants::{ALLOWED_PHOTO_TYPES, MAX_PHOTO_BYTES};
use crate::form::derive::parse_dob;
use crate::form::districts::talukas_for;
use crate::form::state::FormState;

/// Wire field name → human-readable violation message.
pub type Violations = BTreeMap<&'static str, String>;

/// Registration form input, validated separately from admission records.
#[derive(Debug, Clone, Default)]
pub struct RegistrationInput {
    pub username: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub photo: Option<PhotoUpload>,
}

/// Metadata of an uploaded registration photo, as seen by the transport.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub content_type: String,
    pub size: u64,
}

/// ## Summary
/// Validates a candidate admission record against the full rule set.
///
/// ## Errors
/// Returns the complete violations map when any rule fails.
pub fn validate_record(state: &FormState) -> Result<(), Violations> {
    let mut violations = Violations::new();

    require(&mut violations, "title", &state.title, "Title is required");
    name_field(
        &mut violations,
        "firstName",
        &state.first_name,
        "First Name",
    );
    name_field(
        &mut violations,
        "middleName",
        &state.middle_name,
        "Middle Name",
    );
    name_field(&mut violations, "lastName", &state.last_name, "Last Name");
    name_field(
        &mut violations,
        "motherName",
        &state.mother_name,
        "Mother Name",
    );
    require(&mut violations, "gender", &state.gender, "Gender is required");
    require(
        &mut violations,
        "address",
        &state.address,
        "Address is required",
    );
    require(&mut violations, "taluka", &state.taluka, "Taluka is required");
    require(
        &mut violations,
        "district",
        &state.district,
        "District is required",
    );

    // A chosen taluka must belong to the selected district when the district
    // is in the reference table; free-text districts only need a non-empty
    // taluka.
    if !state.taluka.is_empty() {
        if let Some(talukas) = talukas_for(&state.district) {
            if !talukas.contains(&state.taluka.as_str()) {
                violations.insert("taluka", "Please select an option".into());
            }
        }
    }
    require(&mut violations, "state", &state.state, "State is required");
    require(
        &mut violations,
        "religion",
        &state.religion,
        "Religion is required",
    );
    require(
        &mut violations,
        "casteCategory",
        &state.caste_category,
        "Caste Category is required",
    );
    require(&mut violations, "caste", &state.caste, "Caste is required");
    require(
        &mut violations,
        "physicallyHandicapped",
        &state.physically_handicapped,
        "Please select an option",
    );

    if state.pin_code.is_empty() {
        violations.insert("pinCode", "Pin Code is required".into());
    } else if !is_digits(&state.pin_code, 6) {
        violations.insert("pinCode", "Invalid Pin Code".into());
    }

    if state.mobile_number.is_empty() {
        violations.insert("mobileNumber", "Mobile Number is required".into());
    } else if !is_valid_mobile(&state.mobile_number) {
        violations.insert("mobileNumber", "Invalid Mobile Number".into());
    }

    if state.email_id.is_empty() {
        violations.insert("emailId", "Email is required".into());
    } else if !is_valid_email(&state.email_id) {
        violations.insert("emailId", "Invalid Email Address".into());
    }

    if state.aadhaar_number.is_empty() {
        violations.insert("aadhaarNumber", "Aadhaar Number is required".into());
    } else if !is_digits(&state.aadhaar_number, 12) {
        violations.insert("aadhaarNumber", "Invalid Aadhaar Number".into());
    }

    if state.dob.is_empty() {
        violations.insert("dob", "Date of Birth is required".into());
    } else if parse_dob(&state.dob).is_none() {
        violations.insert("dob", "Invalid Date of Birth".into());
    }

    if state.caste_certificate.is_none() {
        violations.insert("casteCertificate", "Caste certificate is required".into());
    }
    if state.marksheet.is_none() {
        violations.insert("marksheet", "Marksheet is required".into());
    }
    if state.photo.is_none() {
        violations.insert("photo", "Photo is required".into());
    }
    if state.signature.is_none() {
        violations.insert("signature", "Signature is required".into());
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// ## Summary
/// Validates a registration submission: required fields, mobile/email
/// formats, password confirmation, and the photo type/size limits.
///
/// ## Errors
/// Returns the complete violations map when any rule fails.
pub fn validate_registration(input: &RegistrationInput) -> Result<(), Violations> {
    let mut violations = Violations::new();

    require(
        &mut violations,
        "username",
        &input.username,
        "Username is required",
    );
    require(
        &mut violations,
        "firstName",
        &input.first_name,
        "First Name is required",
    );
    require(
        &mut violations,
        "lastName",
        &input.last_name,
        "Last Name is required",
    );

    if input.mobile_number.is_empty() {
        violations.insert("mobileNumber", "Mobile number is required".into());
    } else if !is_valid_mobile(&input.mobile_number) {
        violations.insert("mobileNumber", "Invalid Mobile Number".into());
    }

    if input.email.is_empty() {
        violations.insert("email", "Email is required".into());
    } else if !is_valid_email(&input.email) {
        violations.insert("email", "Invalid email format".into());
    }

    if input.password.is_empty() {
        violations.insert("password", "Password is required".into());
    } else if input.password.len() < 6 {
        violations.insert("password", "Password must be at least 6 characters".into());
    }

    if input.confirm_password.is_empty() {
        violations.insert("confirmPassword", "Confirm Password is required".into());
    } else if input.confirm_password != input.password {
        violations.insert("confirmPassword", "Passwords must match".into());
    }

    // Photo presence is only enforceable on the multipart path; the JSON
    // registration flow carries no upload. Type and size are checked
    // whenever one is supplied.
    if let Some(photo) = &input.photo {
        if let Some(message) = photo_violation(&photo.content_type, photo.size) {
            violations.insert("photo", message);
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// ## Summary
/// Checks a registration photo's MIME type and size; `None` when acceptable.
#[must_use]
pub fn photo_violation(content_type: &str, size: u64) -> Option<String> {
    if !ALLOWED_PHOTO_TYPES.contains(&content_type) {
        return Some("Only JPEG, JPG, PNG formats allowed".into());
    }
    if size > MAX_PHOTO_BYTES {
        return Some("File size must be less than 1MB".into());
    }
    None
}

fn require(violations: &mut Violations, field: &'static str, value: &str, message: &str) {
    if value.is_empty() {
        violations.insert(field, message.into());
    }
}

fn name_field(violations: &mut Violations, field: &'static str, value: &str, label: &str) {
    if value.is_empty() {
        violations.insert(field, format!("{label} is required"));
    } else if !is_letters_and_spaces(value) {
        violations.insert(
            field,
            format!("{label} should contain only letters and spaces"),
        );
    }
}

fn is_letters_and_spaces(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_alphabetic() || c == ' ')
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn is_valid_mobile(value: &str) -> bool {
    is_digits(value, 10) && matches!(value.as_bytes()[0], b'6'..=b'9')
}

fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !value.chars().any(char::is_whitespace)
        && !domain.contains('@')
}
