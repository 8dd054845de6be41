use std::sync::LazyLock;

use regex::Regex;
use strum::VariantArray;
use validator::Validate;

use crate::{Field, InquiryDraft, ValidationError};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Checks required fields, then the email shape, then field maxima.
pub fn validate(draft: &InquiryDraft) -> Result<(), ValidationError> {
    if let Some(field) = Field::REQUIRED
        .into_iter()
        .find(|field| draft.get(*field).trim().is_empty())
    {
        return Err(ValidationError::MissingRequiredField(field));
    }

    if !is_valid_email(draft.email.trim()) {
        return Err(ValidationError::InvalidEmailFormat);
    }

    if let Err(errors) = Validate::validate(draft) {
        let field_errors = errors.field_errors();
        let field = Field::VARIANTS
            .iter()
            .copied()
            .find(|field| field_errors.contains_key(field.form_name()))
            .unwrap_or(Field::Message);

        return Err(ValidationError::FieldTooLong(field));
    }

    Ok(())
}

/// Inline check of a single field, independent of the others.
pub fn validate_field(draft: &InquiryDraft, field: Field) -> Result<(), ValidationError> {
    let value = draft.get(field).trim();

    if field.is_required() && value.is_empty() {
        return Err(ValidationError::MissingRequiredField(field));
    }

    if field == Field::Email && !is_valid_email(value) {
        return Err(ValidationError::InvalidEmailFormat);
    }

    match Validate::validate(draft) {
        Err(errors) if errors.field_errors().contains_key(field.form_name()) => {
            Err(ValidationError::FieldTooLong(field))
        }
        _ => Ok(()),
    }
}
