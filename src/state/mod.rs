use crate::api::ApiClient;
use crate::editor::{Commit, EditTarget, EditorState};
use crate::models::{EcqPlayerRow, Opponent, PageData, Registration, UserRow};
use crate::roster::Roster;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Read `window.PAGE_DATA`, the JSON the host page embeds for us.
pub(crate) fn load_page_data() -> PageData {
    let Some(raw) = web_sys::window().and_then(|w| w.get("PAGE_DATA")) else {
        return PageData::default();
    };

    let json = match js_sys::JSON::stringify(&raw) {
        Ok(s) => String::from(s),
        Err(_) => return PageData::default(),
    };

    serde_json::from_str(&json).unwrap_or_else(|e| {
        log::warn!("ignoring malformed PAGE_DATA: {e}");
        PageData::default()
    })
}

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,

    /// Stream page decks; download links and the side panel derive from it.
    pub roster: RwSignal<Roster>,

    /// The single open inline edit, if any.
    pub editor: RwSignal<EditorState>,

    pub users: RwSignal<Vec<UserRow>>,
    pub ecq_players: RwSignal<Vec<EcqPlayerRow>>,
    pub registrations: RwSignal<Vec<Registration>>,

    /// Page-level status line for failures that have no row of their own.
    pub status: RwSignal<Option<String>>,
}

impl AppState {
    pub fn new() -> Self {
        let page = load_page_data();
        Self {
            api_client: RwSignal::new(ApiClient::from_env()),
            roster: RwSignal::new(Roster::from_seeds(page.decks)),
            editor: RwSignal::new(EditorState::default()),
            users: RwSignal::new(page.users),
            ecq_players: RwSignal::new(page.ecq_players),
            registrations: RwSignal::new(page.registrations),
            status: RwSignal::new(None),
        }
    }

    pub fn begin_edit(&self, target: EditTarget, current: &str) {
        let previous = self
            .editor
            .try_update(|e| e.begin(target, current))
            .flatten();
        if let Some(commit) = previous {
            self.apply_commit(commit);
        }
    }

    /// Typing must not re-render the field being edited.
    pub fn set_draft(&self, draft: String) {
        self.editor.update_untracked(|e| e.set_draft(draft));
    }

    pub fn commit_edit(&self) {
        if self.editor.with_untracked(|e| e.active().is_none()) {
            return;
        }
        if let Some(commit) = self.editor.try_update(|e| e.commit()).flatten() {
            self.apply_commit(commit);
        }
    }

    pub fn cancel_edit(&self) {
        if self.editor.with_untracked(|e| e.active().is_some()) {
            self.editor.update(|e| e.cancel());
        }
    }

    /// Swap in a fresh opponent lookup. An open rename of a deck that is no
    /// longer listed is discarded rather than committed onto another card.
    pub fn replace_opponents(&self, opponents: Vec<Opponent>) {
        if self
            .roster
            .try_update(|r| r.replace_with_opponents(opponents))
            .is_none()
        {
            return;
        }
        let roster = self.roster;
        let _ = self.editor.try_update(|e| {
            e.retain(|target| match target {
                EditTarget::DeckName(key) => roster.with_untracked(|r| r.contains_deck(key)),
                EditTarget::UserRole(_) => true,
            })
        });
    }

    /// Forget a deleted user, including a role edit still open on its row.
    pub fn remove_user(&self, login: &str) {
        let _ = self.users.try_update(|rows| rows.retain(|r| r.login != login));
        let editing = EditTarget::UserRole(login.to_string());
        let _ = self
            .editor
            .try_update(|e| e.retain(|target| target != &editing));
    }

    fn apply_commit(&self, commit: Commit) {
        let api_client = self.api_client.get_untracked();
        match commit.target {
            EditTarget::DeckName(key) => {
                let cached = self
                    .roster
                    .try_update(|r| r.set_deck_name(&key, commit.value))
                    .flatten();
                if let Some((link, name)) = cached {
                    spawn_local(async move {
                        if let Err(e) = api_client.cache_deck_name(&link, &name).await {
                            log::warn!("could not cache deck name for {link}: {e}");
                        }
                    });
                }
            }
            EditTarget::UserRole(login) => {
                let role = commit.value;
                let found = self
                    .users
                    .try_update(|rows| match rows.iter_mut().find(|r| r.login == login) {
                        Some(row) => {
                            row.role = role.clone();
                            true
                        }
                        None => false,
                    })
                    .unwrap_or(false);
                if !found {
                    log::warn!("dropping role edit for removed user {login}");
                    return;
                }
                let status = self.status;
                spawn_local(async move {
                    match api_client.edit_user_role(&login, &role).await {
                        Ok(()) => log::info!("role of {login} set to {role}"),
                        Err(e) => {
                            let _ = status.try_set(Some(e.to_string()));
                        }
                    }
                });
            }
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);
