//! Per-slot deferred text buffer for filter expression input.
//!
//! The schema round trip echoes back a normalized `expr2`, and "SFO, LAX"
//! and "SFO LAX" both commit as `["SFO","LAX"]`; re-rendering the input
//! from that canonical form would clobber what the user is mid-way through
//! typing. The draft therefore owns the displayed text and only yields to
//! a committed value whose canonical form actually differs.

use vf_patch::Updater;
use vf_spec::{FilterValue, SlotKey, is_membership};

use crate::updates;

#[derive(Debug, Clone, PartialEq)]
pub struct FilterDraft {
    slot: SlotKey,
    draft: String,
}

impl FilterDraft {
    pub fn new(slot: SlotKey) -> Self {
        FilterDraft {
            slot,
            draft: String::new(),
        }
    }

    /// Seed the draft from an already-committed value, e.g. when the spec
    /// arrived through the query string.
    pub fn seeded(slot: SlotKey, committed: Option<&FilterValue>) -> Self {
        FilterDraft {
            slot,
            draft: committed.map(FilterValue::display).unwrap_or_default(),
        }
    }

    pub fn slot(&self) -> SlotKey {
        self.slot
    }

    /// The text to display in the input field.
    pub fn text(&self) -> &str {
        &self.draft
    }

    /// Record a keystroke and produce the updater committing its canonical
    /// form to the spec.
    pub fn on_user_edit(&mut self, raw: &str, pred: Option<&str>) -> Updater {
        self.draft = raw.to_owned();
        updates::set_filter_value(self.slot, to_filter_value(raw, pred))
    }

    /// Reconcile against the committed value after a round trip. The draft
    /// is replaced only when its canonical form differs from the committed
    /// one, so active keystrokes survive the echo.
    pub fn on_external_update(&mut self, committed: Option<&FilterValue>, pred: Option<&str>) {
        match committed {
            Some(value) => {
                if to_filter_value(&self.draft, pred) != *value {
                    self.draft = value.display();
                }
            }
            None => self.draft.clear(),
        }
    }
}

/// Canonical committed form of raw filter text: membership predicates get
/// the text split on commas and spaces with empty tokens dropped, anything
/// else passes through as a scalar.
pub fn to_filter_value(text: &str, pred: Option<&str>) -> FilterValue {
    if pred.is_some_and(is_membership) {
        FilterValue::List(
            text.split([',', ' '])
                .filter(|token| !token.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    } else {
        FilterValue::Scalar(text.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> FilterValue {
        FilterValue::List(items.iter().map(|s| (*s).to_owned()).collect())
    }

    #[test]
    fn membership_input_canonicalizes_on_commas_and_spaces() {
        assert_eq!(to_filter_value("SFO LAX", Some("in")), list(&["SFO", "LAX"]));
        assert_eq!(to_filter_value("SFO, LAX", Some("in")), list(&["SFO", "LAX"]));
        assert_eq!(to_filter_value("SFO,,LAX", Some("not-in")), list(&["SFO", "LAX"]));
        assert_eq!(to_filter_value("", Some("in")), list(&[]));
    }

    #[test]
    fn scalar_input_passes_through_verbatim() {
        assert_eq!(
            to_filter_value("SFO LAX", Some("=")),
            FilterValue::Scalar("SFO LAX".to_owned())
        );
        assert_eq!(
            to_filter_value("True", None),
            FilterValue::Scalar("True".to_owned())
        );
    }

    #[test]
    fn echoed_back_value_does_not_clobber_typing() {
        let mut draft = FilterDraft::new(SlotKey::A);
        draft.on_user_edit("SFO, LAX", Some("in"));
        draft.on_external_update(Some(&list(&["SFO", "LAX"])), Some("in"));
        assert_eq!(draft.text(), "SFO, LAX");

        draft.on_user_edit("SFO LAX", Some("in"));
        draft.on_external_update(Some(&list(&["SFO", "LAX"])), Some("in"));
        assert_eq!(draft.text(), "SFO LAX");
    }

    #[test]
    fn changed_committed_value_replaces_the_draft() {
        let mut draft = FilterDraft::new(SlotKey::A);
        draft.on_user_edit("SFO", Some("in"));
        draft.on_external_update(Some(&list(&["SFO", "LAX"])), Some("in"));
        assert_eq!(draft.text(), "SFO,LAX");
    }

    #[test]
    fn cleared_committed_value_empties_the_draft() {
        let mut draft = FilterDraft::new(SlotKey::A);
        draft.on_user_edit("True", Some("="));
        draft.on_external_update(None, Some("="));
        assert_eq!(draft.text(), "");
    }

    #[test]
    fn seeded_draft_shows_the_display_form() {
        let draft = FilterDraft::seeded(SlotKey::B, Some(&list(&["SFO", "LAX"])));
        assert_eq!(draft.text(), "SFO,LAX");
        assert_eq!(draft.slot(), SlotKey::B);
    }

    #[test]
    fn user_edit_emits_the_committing_updater() {
        let mut draft = FilterDraft::new(SlotKey::A);
        let updater = draft.on_user_edit("SFO LAX", Some("in"));
        assert_eq!(updater, updates::set_filter_value(SlotKey::A, list(&["SFO", "LAX"])));
        assert!(crate::controller::is_deferred_only(&updater));
    }
}
