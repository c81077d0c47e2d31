use crate::roster::DeckKey;

/// What an inline edit writes back to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum EditTarget {
    DeckName(DeckKey),
    /// User login.
    UserRole(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct EditSession {
    pub target: EditTarget,
    pub draft: String,
    original: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Commit {
    pub target: EditTarget,
    pub value: String,
}

/// At most one field is in edit mode at any time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct EditorState {
    active: Option<EditSession>,
}

impl EditorState {
    pub fn active(&self) -> Option<&EditSession> {
        self.active.as_ref()
    }

    pub fn is_editing(&self, target: &EditTarget) -> bool {
        self.active.as_ref().is_some_and(|s| &s.target == target)
    }

    /// Start editing `target`. A session already open elsewhere is committed
    /// first and returned so the caller can persist it.
    pub fn begin(&mut self, target: EditTarget, current: &str) -> Option<Commit> {
        if self.is_editing(&target) {
            return None;
        }
        let previous = self.commit();
        self.active = Some(EditSession {
            target,
            draft: current.to_string(),
            original: current.to_string(),
        });
        previous
    }

    pub fn set_draft(&mut self, draft: String) {
        if let Some(session) = self.active.as_mut() {
            session.draft = draft;
        }
    }

    /// Close the session. Blank drafts fall back to the original value.
    pub fn commit(&mut self) -> Option<Commit> {
        let session = self.active.take()?;
        let trimmed = session.draft.trim();
        let value = if trimmed.is_empty() {
            session.original
        } else {
            trimmed.to_string()
        };
        Some(Commit {
            target: session.target,
            value,
        })
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Drop the open session, uncommitted, if its target no longer exists.
    pub fn retain(&mut self, exists: impl FnOnce(&EditTarget) -> bool) {
        if self.active.as_ref().is_some_and(|s| !exists(&s.target)) {
            self.active = None;
        }
    }
}

/// Whether a document click on an element with this tag commits the open edit.
pub(crate) fn click_commits(tag_name: &str) -> bool {
    !matches!(
        tag_name.to_ascii_lowercase().as_str(),
        "input" | "select" | "textarea" | "option"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(player: &str) -> EditTarget {
        EditTarget::DeckName(DeckKey {
            player: player.to_string(),
            link: format!("https://x/{player}"),
        })
    }

    #[test]
    fn commit_without_session_is_noop() {
        let mut ed = EditorState::default();
        assert!(ed.commit().is_none());
        assert!(ed.active().is_none());
    }

    #[test]
    fn enter_commits_trimmed_draft() {
        let mut ed = EditorState::default();
        assert!(ed.begin(deck("A"), "Old").is_none());
        ed.set_draft("  New Deck ".to_string());
        let c = ed.commit().expect("session was open");
        assert_eq!(c.target, deck("A"));
        assert_eq!(c.value, "New Deck");
        assert!(ed.active().is_none());
    }

    #[test]
    fn blank_draft_keeps_original() {
        let mut ed = EditorState::default();
        ed.begin(EditTarget::UserRole("bob".to_string()), "admin");
        ed.set_draft("   ".to_string());
        assert_eq!(ed.commit().map(|c| c.value).as_deref(), Some("admin"));
    }

    #[test]
    fn begin_elsewhere_commits_previous() {
        let mut ed = EditorState::default();
        ed.begin(deck("A"), "A");
        ed.set_draft("A2".to_string());
        let prev = ed.begin(deck("B"), "B").expect("previous session");
        assert_eq!(prev.target, deck("A"));
        assert_eq!(prev.value, "A2");
        assert!(ed.is_editing(&deck("B")));
    }

    #[test]
    fn begin_same_target_keeps_draft() {
        let mut ed = EditorState::default();
        ed.begin(deck("A"), "A");
        ed.set_draft("typed".to_string());
        assert!(ed.begin(deck("A"), "A").is_none());
        assert_eq!(ed.active().map(|s| s.draft.as_str()), Some("typed"));
    }

    #[test]
    fn cancel_drops_session_without_commit() {
        let mut ed = EditorState::default();
        ed.begin(deck("C"), "A");
        ed.cancel();
        assert!(ed.commit().is_none());
    }

    #[test]
    fn retain_drops_session_for_vanished_target() {
        let mut ed = EditorState::default();
        ed.begin(deck("A"), "Deck A");
        ed.set_draft("Renamed A".to_string());
        ed.retain(|t| t == &deck("B"));
        assert!(ed.commit().is_none());

        ed.begin(EditTarget::UserRole("bob".to_string()), "admin");
        ed.retain(|t| matches!(t, EditTarget::UserRole(_)));
        assert!(ed.is_editing(&EditTarget::UserRole("bob".to_string())));
    }

    #[test]
    fn clicks_on_form_controls_do_not_commit() {
        assert!(!click_commits("INPUT"));
        assert!(!click_commits("select"));
        assert!(click_commits("DIV"));
        assert!(click_commits("button"));
    }
}
