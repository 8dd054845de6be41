use crate::Field;

/// Local, synchronous failures. Never reach delivery.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields.")]
    MissingRequiredField(Field),

    #[error("Please enter a valid email address.")]
    InvalidEmailFormat,

    #[error("{} is too long.", .0.label())]
    FieldTooLong(Field),
}

impl ValidationError {
    /// The field the inline prompt should be attached to.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::MissingRequiredField(field) | ValidationError::FieldTooLong(field) => {
                *field
            }
            ValidationError::InvalidEmailFormat => Field::Email,
        }
    }
}

/// Remote failures. The only retryable class.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryFailure {
    #[error("delivery rejected: {0}")]
    Rejected(String),

    #[error("delivery timed out")]
    Timeout,

    #[error("delivery cancelled before completion")]
    Cancelled,
}

impl DeliveryFailure {
    /// Banner text pointing the visitor at the phone line.
    pub fn user_message(&self, phone: &str) -> String {
        match self {
            DeliveryFailure::Timeout => format!(
                "Our mailbox took too long to answer. Please try again or call us directly at {phone}."
            ),
            DeliveryFailure::Rejected(_) | DeliveryFailure::Cancelled => format!(
                "Something went wrong. Please try again or call us directly at {phone}."
            ),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("an inquiry is currently being sent")]
    Busy,
}

pub type Result<T> = std::result::Result<T, Error>;
