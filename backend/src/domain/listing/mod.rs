//! Marketplace listings: kinds, typed profiles, facets and stored records.

mod facets;
mod kind;
mod profiles;
mod record;

pub use facets::{Facets, ListingFilter};
pub use kind::{ListingKind, UnknownListingKind};
pub use profiles::{
    CoachingProfile, ListingProfile, NonTeacherProfile, NormalizedBody, ParentProfile,
    SchoolProfile, StudentProfile, TeacherProfile, VacancyProfile,
};
pub use record::ListingRecord;
