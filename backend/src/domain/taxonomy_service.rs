//! Read access to the category taxonomy and location directory.

use taxonomy::{
    CascadeView, Category, LocationDirectory, Selection, SelectionAction, Taxonomy,
    TaxonomyFamily,
};

use crate::domain::Error;

/// Taxonomy lookups for the registration and search forms.
///
/// # Examples
/// ```
/// use marketplace::domain::TaxonomyService;
/// use taxonomy::{Selection, SelectionAction, TaxonomyFamily};
///
/// let service = TaxonomyService::builtin();
/// let (selection, view) = service.apply(
///     TaxonomyFamily::Teaching,
///     &Selection::default(),
///     SelectionAction::SelectCategory("science".to_owned()),
/// );
/// assert_eq!(selection.category.as_deref(), Some("Science"));
/// assert!(view.exams.iter().any(|exam| exam == "NEET"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TaxonomyService {
    teaching: &'static Taxonomy,
    coaching: &'static Taxonomy,
    locations: &'static LocationDirectory,
}

impl Default for TaxonomyService {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TaxonomyService {
    /// Service over the tables bundled with the `taxonomy` crate.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            teaching: Taxonomy::builtin(TaxonomyFamily::Teaching),
            coaching: Taxonomy::builtin(TaxonomyFamily::Coaching),
            locations: LocationDirectory::builtin(),
        }
    }

    /// Parse a family path segment; unknown families are `not_found`.
    pub fn family(&self, raw: &str) -> Result<TaxonomyFamily, Error> {
        raw.parse::<TaxonomyFamily>()
            .map_err(|_| Error::not_found(format!("unknown taxonomy family: {raw}")))
    }

    /// The table for `family`.
    #[must_use]
    pub const fn taxonomy(&self, family: TaxonomyFamily) -> &'static Taxonomy {
        match family {
            TaxonomyFamily::Teaching => self.teaching,
            TaxonomyFamily::Coaching => self.coaching,
        }
    }

    /// Look up a category by name, ignoring case.
    pub fn category(&self, family: TaxonomyFamily, name: &str) -> Result<&'static Category, Error> {
        self.taxonomy(family)
            .category(name)
            .ok_or_else(|| Error::not_found(format!("unknown {family} category: {name}")))
    }

    /// Apply `action` to a client-held selection.
    ///
    /// The incoming selection is reconciled first so stale or tampered
    /// state cannot smuggle in exams or subjects the category does not offer.
    #[must_use]
    pub fn apply(
        &self,
        family: TaxonomyFamily,
        selection: &Selection,
        action: SelectionAction,
    ) -> (Selection, CascadeView) {
        let taxonomy = self.taxonomy(family);
        let next = selection.reconcile(taxonomy).apply(taxonomy, action);
        let view = next.view(taxonomy);
        (next, view)
    }

    /// Bundled states and cities.
    #[must_use]
    pub const fn locations(&self) -> &'static LocationDirectory {
        self.locations
    }
}
