use crate::domain::ticket::{Ticket, TicketDraft};
use crate::store::EntityStore;

/// Ephemeral per-session state: which ticket is open for detail view, whether
/// the creation form is visible, and the unsubmitted draft. None of this is
/// persisted, and none of it touches the entity store until a submission
/// succeeds.
#[derive(Debug, Default)]
pub struct SessionState {
    selection: Option<String>,
    form_open: bool,
    pub draft: TicketDraft,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection holds an id, not a copy, so merges landing in the store are
    /// reflected live in the open detail view.
    pub fn open_detail(&mut self, id: &str) {
        self.selection = Some(id.to_string());
    }

    pub fn close_detail(&mut self) {
        self.selection = None;
    }

    /// The selected id, dropped if the referenced ticket has left the store.
    pub fn selected<'a>(&self, store: &'a EntityStore) -> Option<&'a Ticket> {
        self.selection.as_deref().and_then(|id| store.ticket(id))
    }

    pub fn form_open(&self) -> bool {
        self.form_open
    }

    /// Toggling visibility clears no other state.
    pub fn toggle_form(&mut self) {
        self.form_open = !self.form_open;
    }

    /// Called by the controller after a successful submission.
    pub fn finish_submission(&mut self) {
        self.draft.clear();
        self.form_open = false;
    }
}
