//! Field rules shared by the server and the registration form.

use std::sync::OnceLock;

use regex::Regex;

use super::error::{FieldError, ValidationError};
use super::image::{ImageUpload, UploadPolicy};
use super::school::{Field, NewSchool, SchoolForm};

pub const NAME_MIN_LEN: usize = 3;
pub const ADDRESS_MIN_LEN: usize = 10;
pub const CITY_MIN_LEN: usize = 2;
pub const STATE_MIN_LEN: usize = 2;

fn contact_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("contact pattern compiles"))
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern compiles")
    })
}

/// Fail when any required text field is blank.
pub fn require_all(form: &SchoolForm) -> Result<(), ValidationError> {
    let fields = form.missing();
    if fields.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields { fields })
    }
}

/// Format rule violations for a form whose fields are all present.
///
/// Blank fields are skipped here; [`require_all`] reports them.
#[must_use]
pub fn check_rules(form: &SchoolForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let min_len = |field: Field, min: usize, label: &str, errors: &mut Vec<FieldError>| {
        let value = form.get(field).trim();
        if !value.is_empty() && value.chars().count() < min {
            errors.push(FieldError::new(
                field,
                format!("{label} must be at least {min} characters"),
            ));
        }
    };

    min_len(Field::Name, NAME_MIN_LEN, "Name", &mut errors);

    let email = form.email_id.trim();
    if !email.is_empty() && !email_pattern().is_match(email) {
        errors.push(FieldError::new(Field::EmailId, "Invalid email address"));
    }

    min_len(Field::Address, ADDRESS_MIN_LEN, "Address", &mut errors);
    min_len(Field::City, CITY_MIN_LEN, "City", &mut errors);
    min_len(Field::State, STATE_MIN_LEN, "State", &mut errors);

    let contact = form.contact.trim();
    if !contact.is_empty() && !contact_pattern().is_match(contact) {
        errors.push(FieldError::new(
            Field::Contact,
            "Contact number must be exactly 10 digits",
        ));
    }

    errors
}

/// Server-side validation: presence first, then format rules.
pub fn validate(form: &SchoolForm) -> Result<NewSchool, ValidationError> {
    require_all(form)?;

    let trimmed = form.trimmed();
    let errors = check_rules(&trimmed);
    if !errors.is_empty() {
        return Err(ValidationError::InvalidFields(errors));
    }

    Ok(NewSchool::from_trimmed(trimmed))
}

/// Client-side validation of a draft, reporting every field at once.
///
/// Runs before anything reaches the network. Covers required-ness, format
/// rules, and the optional image against the upload policy.
#[must_use]
pub fn validate_draft(
    form: &SchoolForm,
    image: Option<&ImageUpload>,
    policy: &UploadPolicy,
) -> Vec<FieldError> {
    let mut errors: Vec<FieldError> = form
        .missing()
        .into_iter()
        .map(|field| FieldError::new(field, field.required_message()))
        .collect();

    errors.extend(check_rules(form));

    if let Some(image) = image {
        if let Err(err) = policy.check(image) {
            errors.push(FieldError::new(Field::Image, err.to_string()));
        }
    }

    errors
}
