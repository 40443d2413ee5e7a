//! Profiles posted by institutions: coaching centres and schools.

use serde::{Deserialize, Serialize};
use taxonomy::TaxonomyFamily;
use utoipa::ToSchema;

use super::{
    ListingProfile, optional_email, optional_pincode, validate_cascade, validate_location,
};
use crate::domain::Facets;
use crate::domain::fields::{FieldError, PhoneNumber, StringList, optional_text, required_text};

/// A coaching institute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CoachingProfile {
    /// Registered institute name.
    pub institute_name: String,
    /// Person to ask for.
    pub contact_person: Option<String>,
    /// Ten digit mobile number.
    pub phone: String,
    /// Contact email.
    pub email: Option<String>,
    /// Categories from the coaching taxonomy.
    #[serde(default)]
    pub categories: StringList,
    /// Exams coached for.
    #[serde(default)]
    pub exams: StringList,
    /// Subjects taught.
    #[serde(default)]
    pub subjects: StringList,
    /// Street address.
    pub address: Option<String>,
    /// State.
    pub state: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Postal code.
    pub pincode: Option<String>,
    /// Year the institute opened.
    pub established_year: Option<u16>,
    /// Website URL.
    pub website: Option<String>,
    /// Batch timings, e.g. "7-9 AM".
    #[serde(default)]
    pub batch_timings: StringList,
    /// Fee range as entered.
    pub fees_range: Option<String>,
    /// Free-form description.
    pub about: Option<String>,
}

impl ListingProfile for CoachingProfile {
    fn normalize(self) -> Result<Self, FieldError> {
        let cascade = validate_cascade(
            TaxonomyFamily::Coaching,
            "categories",
            self.categories.as_slice(),
            &self.exams,
            &self.subjects,
        )?;
        let (state, city) = validate_location(self.state, self.city)?;
        let categories = if cascade.categories.is_empty() {
            self.categories
        } else {
            StringList::from_items(cascade.categories)
        };
        Ok(Self {
            institute_name: required_text("instituteName", &self.institute_name)?,
            contact_person: optional_text(self.contact_person),
            phone: PhoneNumber::parse("phone", &self.phone)?.into(),
            email: optional_email("email", self.email)?,
            categories,
            exams: cascade.exams,
            subjects: cascade.subjects,
            address: optional_text(self.address),
            state,
            city,
            pincode: optional_pincode("pincode", self.pincode)?,
            established_year: self.established_year,
            website: optional_text(self.website),
            batch_timings: self.batch_timings,
            fees_range: optional_text(self.fees_range),
            about: optional_text(self.about),
        })
    }

    fn display_name(&self) -> &str {
        &self.institute_name
    }

    fn facets(&self) -> Facets {
        Facets {
            categories: self.categories.as_slice().to_vec(),
            exams: self.exams.as_slice().to_vec(),
            subjects: self.subjects.as_slice().to_vec(),
            state: self.state.clone(),
            city: self.city.clone(),
        }
    }
}

/// A school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SchoolProfile {
    /// Registered school name.
    pub school_name: String,
    /// Affiliation board, e.g. CBSE.
    pub board: Option<String>,
    /// Ten digit mobile number.
    pub phone: String,
    /// Contact email.
    pub email: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// State.
    pub state: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Postal code.
    pub pincode: Option<String>,
    /// Lowest class taught.
    pub classes_from: Option<String>,
    /// Highest class taught.
    pub classes_to: Option<String>,
    /// Facilities such as "Library" or "Transport".
    #[serde(default)]
    pub facilities: StringList,
    /// Website URL.
    pub website: Option<String>,
    /// Free-form description.
    pub about: Option<String>,
}

impl ListingProfile for SchoolProfile {
    fn normalize(self) -> Result<Self, FieldError> {
        let (state, city) = validate_location(self.state, self.city)?;
        Ok(Self {
            school_name: required_text("schoolName", &self.school_name)?,
            board: optional_text(self.board),
            phone: PhoneNumber::parse("phone", &self.phone)?.into(),
            email: optional_email("email", self.email)?,
            address: optional_text(self.address),
            state,
            city,
            pincode: optional_pincode("pincode", self.pincode)?,
            classes_from: optional_text(self.classes_from),
            classes_to: optional_text(self.classes_to),
            facilities: self.facilities,
            website: optional_text(self.website),
            about: optional_text(self.about),
        })
    }

    fn display_name(&self) -> &str {
        &self.school_name
    }

    fn facets(&self) -> Facets {
        Facets {
            categories: self.board.iter().cloned().collect(),
            state: self.state.clone(),
            city: self.city.clone(),
            ..Facets::default()
        }
    }
}
