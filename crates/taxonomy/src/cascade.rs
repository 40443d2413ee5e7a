//! Cascading category → exam → subject selection.
//!
//! [`Selection`] is the form state behind the dependent dropdowns. Every
//! transition is a pure function of the current state, the taxonomy and a
//! [`SelectionAction`]; the result never holds an exam the category does not
//! declare or a subject that the selected exams cannot reach.

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Taxonomy, find_ignore_case};

/// A user's current category, exam and subject choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// Chosen category name, if any.
    #[serde(default)]
    pub category: Option<String>,
    /// Chosen exams, in the order they were picked.
    #[serde(default)]
    pub exams: Vec<String>,
    /// Chosen subjects, in the order they were picked.
    #[serde(default)]
    pub subjects: Vec<String>,
}

/// A single user interaction with the cascade.
///
/// Serialised adjacently tagged, e.g. `{"type": "selectExam", "value": "NEET"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum SelectionAction {
    /// Pick a category, discarding exam and subject choices.
    SelectCategory(String),
    /// Reset the whole selection.
    ClearCategory,
    /// Add an exam.
    SelectExam(String),
    /// Remove an exam and any subjects it alone made reachable.
    DeselectExam(String),
    /// Select the exam when absent, deselect it when present.
    ToggleExam(String),
    /// Add a subject currently on offer.
    SelectSubject(String),
    /// Remove a subject.
    DeselectSubject(String),
    /// Select the subject when absent, deselect it when present.
    ToggleSubject(String),
}

/// What the dropdowns should show for a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeView {
    /// Resolved category name, if the selection names a known category.
    pub category: Option<String>,
    /// Exams the category offers.
    pub exams: Vec<String>,
    /// Subjects on offer for the selected exams.
    pub available_subjects: Vec<String>,
    /// Whether subject availability follows the exam choice.
    pub exam_driven: bool,
}

fn contains_ignore_case(values: &[String], wanted: &str) -> bool {
    find_ignore_case(values, wanted).is_some()
}

fn without(values: &[String], unwanted: &str) -> Vec<String> {
    values
        .iter()
        .filter(|value| !value.eq_ignore_ascii_case(unwanted.trim()))
        .cloned()
        .collect()
}

impl Selection {
    /// Resolve the selected category in `taxonomy`.
    #[must_use]
    pub fn resolve_category<'t>(&self, taxonomy: &'t Taxonomy) -> Option<&'t Category> {
        self.category
            .as_deref()
            .and_then(|name| taxonomy.category(name))
    }

    /// Exams the selected category offers; empty for unknown categories.
    #[must_use]
    pub fn available_exams(&self, taxonomy: &Taxonomy) -> Vec<String> {
        self.resolve_category(taxonomy)
            .map(|category| category.exams().to_vec())
            .unwrap_or_default()
    }

    /// Subjects on offer for the selected exams; empty for unknown categories.
    #[must_use]
    pub fn available_subjects(&self, taxonomy: &Taxonomy) -> Vec<String> {
        self.resolve_category(taxonomy)
            .map(|category| category.available_subjects(&self.exams))
            .unwrap_or_default()
    }

    /// Describe what the dropdowns should display for this selection.
    #[must_use]
    pub fn view(&self, taxonomy: &Taxonomy) -> CascadeView {
        match self.resolve_category(taxonomy) {
            Some(category) => CascadeView {
                category: Some(category.name().to_owned()),
                exams: category.exams().to_vec(),
                available_subjects: category.available_subjects(&self.exams),
                exam_driven: category.is_exam_driven(),
            },
            None => CascadeView {
                category: None,
                exams: Vec::new(),
                available_subjects: Vec::new(),
                exam_driven: false,
            },
        }
    }

    /// Apply `action` and return the resulting selection.
    #[must_use]
    pub fn apply(&self, taxonomy: &Taxonomy, action: SelectionAction) -> Self {
        match action {
            SelectionAction::SelectCategory(name) => Self::for_category(taxonomy, &name),
            SelectionAction::ClearCategory => Self::default(),
            SelectionAction::SelectExam(exam) => self.select_exam(taxonomy, &exam),
            SelectionAction::DeselectExam(exam) => self.deselect_exam(taxonomy, &exam),
            SelectionAction::ToggleExam(exam) => {
                if contains_ignore_case(&self.exams, &exam) {
                    self.deselect_exam(taxonomy, &exam)
                } else {
                    self.select_exam(taxonomy, &exam)
                }
            }
            SelectionAction::SelectSubject(subject) => self.select_subject(taxonomy, &subject),
            SelectionAction::DeselectSubject(subject) => self.deselect_subject(&subject),
            SelectionAction::ToggleSubject(subject) => {
                if contains_ignore_case(&self.subjects, &subject) {
                    self.deselect_subject(&subject)
                } else {
                    self.select_subject(taxonomy, &subject)
                }
            }
        }
    }

    /// Drop any exam or subject the taxonomy does not allow for the current
    /// category, canonicalising spelling and removing duplicates.
    ///
    /// Use this on states that arrive from storage or from a client.
    #[must_use]
    pub fn reconcile(&self, taxonomy: &Taxonomy) -> Self {
        let Some(category) = self.resolve_category(taxonomy) else {
            return Self {
                category: self.category.clone(),
                exams: Vec::new(),
                subjects: Vec::new(),
            };
        };

        let mut exams: Vec<String> = Vec::new();
        for exam in &self.exams {
            if let Some(canonical) = category.find_exam(exam) {
                if !contains_ignore_case(&exams, canonical) {
                    exams.push(canonical.to_owned());
                }
            }
        }

        let available = category.available_subjects(&exams);
        let mut subjects: Vec<String> = Vec::new();
        for subject in &self.subjects {
            if let Some(canonical) = find_ignore_case(&available, subject) {
                if !contains_ignore_case(&subjects, canonical) {
                    subjects.push(canonical.to_owned());
                }
            }
        }

        Self {
            category: Some(category.name().to_owned()),
            exams,
            subjects,
        }
    }

    fn for_category(taxonomy: &Taxonomy, name: &str) -> Self {
        if name.trim().is_empty() {
            return Self::default();
        }
        let category = taxonomy
            .category(name)
            .map_or_else(|| name.trim().to_owned(), |found| found.name().to_owned());
        Self {
            category: Some(category),
            exams: Vec::new(),
            subjects: Vec::new(),
        }
    }

    fn select_exam(&self, taxonomy: &Taxonomy, exam: &str) -> Self {
        let Some(canonical) = self
            .resolve_category(taxonomy)
            .and_then(|category| category.find_exam(exam))
        else {
            return self.clone();
        };
        if contains_ignore_case(&self.exams, canonical) {
            return self.clone();
        }

        let mut next = self.clone();
        next.exams.push(canonical.to_owned());
        next
    }

    fn deselect_exam(&self, taxonomy: &Taxonomy, exam: &str) -> Self {
        let exams = without(&self.exams, exam);
        let subjects = match self.resolve_category(taxonomy) {
            Some(category) if !category.is_exam_driven() => self.subjects.clone(),
            Some(category) => {
                let reachable = category.subjects_for_exams(&exams);
                self.subjects
                    .iter()
                    .filter(|subject| contains_ignore_case(&reachable, subject))
                    .cloned()
                    .collect()
            }
            None => Vec::new(),
        };

        Self {
            category: self.category.clone(),
            exams,
            subjects,
        }
    }

    fn select_subject(&self, taxonomy: &Taxonomy, subject: &str) -> Self {
        let available = self.available_subjects(taxonomy);
        let Some(canonical) = find_ignore_case(&available, subject) else {
            return self.clone();
        };
        if contains_ignore_case(&self.subjects, canonical) {
            return self.clone();
        }

        let mut next = self.clone();
        next.subjects.push(canonical.to_owned());
        next
    }

    fn deselect_subject(&self, subject: &str) -> Self {
        Self {
            category: self.category.clone(),
            exams: self.exams.clone(),
            subjects: without(&self.subjects, subject),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TaxonomyFamily;
    use rstest::{fixture, rstest};

    #[fixture]
    fn teaching() -> &'static Taxonomy {
        Taxonomy::builtin(TaxonomyFamily::Teaching)
    }

    fn science_with(taxonomy: &Taxonomy, exams: &[&str], subjects: &[&str]) -> Selection {
        let mut selection = Selection::default()
            .apply(taxonomy, SelectionAction::SelectCategory("Science".to_owned()));
        for exam in exams {
            selection = selection.apply(taxonomy, SelectionAction::SelectExam((*exam).to_owned()));
        }
        for subject in subjects {
            selection =
                selection.apply(taxonomy, SelectionAction::SelectSubject((*subject).to_owned()));
        }
        selection
    }

    #[rstest]
    fn selecting_category_resets_exams_and_subjects(teaching: &'static Taxonomy) {
        let selection = science_with(teaching, &["NEET"], &["Biology"]);
        let next = selection.apply(teaching, SelectionAction::SelectCategory("commerce".to_owned()));

        assert_eq!(next.category.as_deref(), Some("Commerce"));
        assert!(next.exams.is_empty());
        assert!(next.subjects.is_empty());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_category_clears_the_selection(teaching: &'static Taxonomy, #[case] name: &str) {
        let selection = science_with(teaching, &["NEET"], &["Biology"]);
        let next = selection.apply(teaching, SelectionAction::SelectCategory(name.to_owned()));

        assert_eq!(next, Selection::default());
    }

    #[rstest]
    fn unknown_category_offers_nothing(teaching: &'static Taxonomy) {
        let selection = Selection::default()
            .apply(teaching, SelectionAction::SelectCategory("Astrology".to_owned()));

        assert_eq!(selection.category.as_deref(), Some("Astrology"));
        assert!(selection.available_exams(teaching).is_empty());
        assert!(selection.available_subjects(teaching).is_empty());
        let next = selection.apply(teaching, SelectionAction::SelectExam("NEET".to_owned()));
        assert!(next.exams.is_empty());
    }

    #[rstest]
    fn exams_outside_category_are_ignored(teaching: &'static Taxonomy) {
        let selection = science_with(teaching, &["IELTS"], &[]);
        assert!(selection.exams.is_empty());
    }

    #[rstest]
    fn exam_names_are_canonicalised(teaching: &'static Taxonomy) {
        let selection = science_with(teaching, &["jee main", "JEE MAIN"], &[]);
        assert_eq!(selection.exams, vec!["JEE Main"]);
    }

    #[rstest]
    fn deselecting_exam_prunes_unreachable_subjects(teaching: &'static Taxonomy) {
        let selection = science_with(teaching, &["NEET", "JEE Main"], &["Biology", "Mathematics", "Physics"]);
        let next = selection.apply(teaching, SelectionAction::DeselectExam("NEET".to_owned()));

        assert_eq!(next.exams, vec!["JEE Main"]);
        assert_eq!(next.subjects, vec!["Mathematics", "Physics"]);
    }

    #[rstest]
    fn deselecting_last_exam_clears_subjects(teaching: &'static Taxonomy) {
        let selection = science_with(teaching, &["NEET"], &["Biology", "Physics"]);
        let next = selection.apply(teaching, SelectionAction::ToggleExam("NEET".to_owned()));

        assert!(next.exams.is_empty());
        assert!(next.subjects.is_empty());
    }

    #[rstest]
    fn subjects_require_a_reaching_exam(teaching: &'static Taxonomy) {
        let selection = science_with(teaching, &["JEE Main"], &["Biology"]);
        assert!(selection.subjects.is_empty());
    }

    #[rstest]
    fn non_exam_driven_categories_keep_subjects(teaching: &'static Taxonomy) {
        let selection = Selection::default()
            .apply(teaching, SelectionAction::SelectCategory("Music".to_owned()))
            .apply(teaching, SelectionAction::SelectSubject("guitar".to_owned()))
            .apply(teaching, SelectionAction::DeselectExam("Anything".to_owned()));

        assert_eq!(selection.subjects, vec!["Guitar"]);
    }

    #[rstest]
    fn toggle_subject_round_trips(teaching: &'static Taxonomy) {
        let selection = science_with(teaching, &["NEET"], &[]);
        let on = selection.apply(teaching, SelectionAction::ToggleSubject("Biology".to_owned()));
        let off = on.apply(teaching, SelectionAction::ToggleSubject("biology".to_owned()));

        assert_eq!(on.subjects, vec!["Biology"]);
        assert!(off.subjects.is_empty());
    }

    #[rstest]
    fn reconcile_drops_invalid_entries(teaching: &'static Taxonomy) {
        let raw = Selection {
            category: Some("science".to_owned()),
            exams: vec!["neet".to_owned(), "GATE".to_owned(), "NEET".to_owned()],
            subjects: vec!["biology".to_owned(), "Mathematics".to_owned()],
        };

        let reconciled = raw.reconcile(teaching);
        assert_eq!(reconciled.category.as_deref(), Some("Science"));
        assert_eq!(reconciled.exams, vec!["NEET"]);
        assert_eq!(reconciled.subjects, vec!["Biology"]);
    }

    #[rstest]
    fn view_lists_exams_and_available_subjects(teaching: &'static Taxonomy) {
        let selection = science_with(teaching, &["JEE Main"], &[]);
        let view = selection.view(teaching);

        assert_eq!(view.category.as_deref(), Some("Science"));
        assert_eq!(view.exams.len(), 4);
        assert_eq!(view.available_subjects, vec!["Physics", "Chemistry", "Mathematics"]);
        assert!(view.exam_driven);
    }

    #[rstest]
    fn actions_use_adjacent_tagging() {
        let action: SelectionAction =
            serde_json::from_str(r#"{"type": "deselectExam", "value": "NEET"}"#)
                .expect("action JSON");
        assert_eq!(action, SelectionAction::DeselectExam("NEET".to_owned()));

        let clear: SelectionAction =
            serde_json::from_str(r#"{"type": "clearCategory"}"#).expect("clear JSON");
        assert_eq!(clear, SelectionAction::ClearCategory);
    }
}
