//! Edit session state for the add/update article editor.

use domains::{ArticleDraft, NotificationId};

/// What the editor was opened for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Add,
    Update {
        id: String,
    },
}

/// Form validity. `Pristine` is the state before the first check of an
/// add form; it is neither reported as an error nor submittable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validity {
    #[default]
    Pristine,
    Valid,
    Invalid,
}

/// Edge crossed by a re-validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidityEdge {
    BecameInvalid,
    BecameValid,
    Unchanged,
}

/// One open editor. At most one exists per client; opening a new one
/// replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    pub mode: EditMode,
    /// Row index of the record in the list it was opened from.
    pub index: Option<usize>,
    pub draft: ArticleDraft,
    pub validity: Validity,
    pub is_loading: bool,
    pub is_applying: bool,
    pub is_visible: bool,
    /// Bumped on every open so late responses for a replaced session are
    /// discarded.
    pub generation: u64,
    pub(crate) notice: Option<NotificationId>,
}

impl EditSession {
    pub(crate) fn open(mode: EditMode, index: Option<usize>, generation: u64) -> Self {
        let (draft, is_loading) = match &mode {
            EditMode::Add => (ArticleDraft::default(), false),
            EditMode::Update { id } => (
                ArticleDraft {
                    id: Some(id.clone()),
                    ..Default::default()
                },
                true,
            ),
        };

        Self {
            mode,
            index,
            draft,
            validity: Validity::Pristine,
            is_loading,
            is_applying: false,
            is_visible: true,
            generation,
            notice: None,
        }
    }

    pub(crate) fn closed(generation: u64) -> Self {
        Self {
            generation,
            ..Default::default()
        }
    }

    /// Identifier of the record being edited; `None` for an add.
    pub fn target_id(&self) -> Option<&str> {
        match &self.mode {
            EditMode::Add => None,
            EditMode::Update { id } => Some(id.as_str()),
        }
    }

    pub fn is_update(&self) -> bool {
        matches!(self.mode, EditMode::Update { .. })
    }

    pub fn is_valid(&self) -> bool {
        self.validity == Validity::Valid
    }

    pub fn can_submit(&self) -> bool {
        self.is_visible && self.is_valid() && !self.is_loading && !self.is_applying
    }

    /// Draft edits are accepted only while the editor is open and no load
    /// is about to overwrite the draft.
    pub fn is_editable(&self) -> bool {
        self.is_visible && !self.is_loading
    }

    pub fn has_validation_notice(&self) -> bool {
        self.notice.is_some()
    }

    /// Re-checks the draft and reports which edge, if any, was crossed.
    /// Only entering `Invalid` or leaving it for `Valid` count as edges.
    pub(crate) fn revalidate(&mut self) -> ValidityEdge {
        let ok = self.draft.is_submittable();
        match (self.validity, ok) {
            (Validity::Invalid, true) => {
                self.validity = Validity::Valid;
                ValidityEdge::BecameValid
            }
            (Validity::Invalid, false) => ValidityEdge::Unchanged,
            (_, false) => {
                self.validity = Validity::Invalid;
                ValidityEdge::BecameInvalid
            }
            (_, true) => {
                self.validity = Validity::Valid;
                ValidityEdge::Unchanged
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_session_starts_loading_with_target_id() {
        let session = EditSession::open(EditMode::Update { id: "7".into() }, Some(2), 1);
        assert!(session.is_loading);
        assert_eq!(session.target_id(), Some("7"));
        assert_eq!(session.draft.id.as_deref(), Some("7"));
        assert!(!session.can_submit());
    }

    #[test]
    fn add_session_has_no_target() {
        let session = EditSession::open(EditMode::Add, None, 1);
        assert!(!session.is_loading);
        assert_eq!(session.target_id(), None);
        assert_eq!(session.validity, Validity::Pristine);
    }

    #[test]
    fn revalidate_reports_edges_once() {
        let mut session = EditSession::open(EditMode::Add, None, 1);

        session.draft.title = " ".into();
        assert_eq!(session.revalidate(), ValidityEdge::BecameInvalid);
        assert_eq!(session.revalidate(), ValidityEdge::Unchanged);

        session.draft.title = "T".into();
        session.draft.markdown = "M".into();
        assert_eq!(session.revalidate(), ValidityEdge::BecameValid);
        assert_eq!(session.revalidate(), ValidityEdge::Unchanged);
        assert!(session.can_submit());
    }

    #[test]
    fn pristine_to_valid_is_not_an_edge() {
        let mut session = EditSession::open(EditMode::Add, None, 1);
        session.draft.title = "T".into();
        session.draft.markdown = "M".into();
        assert_eq!(session.revalidate(), ValidityEdge::Unchanged);
        assert!(session.is_valid());
    }
}
