use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr, VariantArray};

/// Offerings a visitor can express a preference for.
#[derive(
    EnumString,
    Display,
    VariantArray,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    AsRefStr,
)]
pub enum Accommodation {
    #[serde(rename = "Lakefront 2-Bedroom Cottage")]
    #[strum(serialize = "Lakefront 2-Bedroom Cottage")]
    LakefrontTwoBedroomCottage,
    #[serde(rename = "Lakefront 3-4 Bedroom Cottage")]
    #[strum(serialize = "Lakefront 3-4 Bedroom Cottage")]
    LakefrontLargeCottage,
    #[serde(rename = "Non-Lakefront Cottage")]
    #[strum(serialize = "Non-Lakefront Cottage")]
    NonLakefrontCottage,
    #[serde(rename = "Camping Cabin")]
    #[strum(serialize = "Camping Cabin")]
    CampingCabin,
    #[serde(rename = "RV Site")]
    #[strum(serialize = "RV Site")]
    RvSite,
    #[serde(rename = "Tent Camping")]
    #[strum(serialize = "Tent Camping")]
    TentCamping,
    #[serde(rename = "Boat Rental Only")]
    #[strum(serialize = "Boat Rental Only")]
    BoatRentalOnly,
    #[serde(rename = "Not Sure Yet")]
    #[strum(serialize = "Not Sure Yet")]
    NotSureYet,
}

/// Draft fields, addressed by their form input names.
#[derive(
    EnumString,
    Display,
    VariantArray,
    IntoStaticStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Phone,
    PreferredDates,
    Accommodation,
    Message,
}

impl Field {
    pub const REQUIRED: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    /// Name of the form input, also the key used by `validator`.
    pub fn form_name(&self) -> &'static str {
        (*self).into()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::PreferredDates => "Preferred Dates",
            Field::Accommodation => "Accommodation Preference",
            Field::Message => "Message",
        }
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }
}
