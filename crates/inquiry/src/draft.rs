use std::str::FromStr;

use serde::Serialize;
use validator::Validate;

use crate::{Accommodation, Field};

/// In-progress contact inquiry. Field maxima are enforced by [`crate::validate`].
#[derive(Validate, Serialize, Default, Clone, Debug, PartialEq)]
pub struct InquiryDraft {
    #[validate(length(max = 100))]
    pub name: String,
    #[validate(length(max = 254))]
    pub email: String,
    #[validate(length(max = 32))]
    pub phone: String,
    #[validate(length(max = 100))]
    pub preferred_dates: String,
    pub accommodation: Option<Accommodation>,
    #[validate(length(max = 2000))]
    pub message: String,
}

impl InquiryDraft {
    /// Sets a field from its raw form value. An accommodation label outside
    /// the offering list clears the preference.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();

        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::PreferredDates => self.preferred_dates = value,
            Field::Message => self.message = value,
            Field::Accommodation => {
                self.accommodation = Accommodation::from_str(value.trim()).ok();
            }
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::PreferredDates => &self.preferred_dates,
            Field::Message => &self.message,
            Field::Accommodation => self.accommodation.as_ref().map_or("", |a| a.as_ref()),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
