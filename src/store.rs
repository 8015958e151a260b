use tokio::sync::watch;

use crate::domain::employer::Employer;
use crate::domain::ticket::{Ticket, TicketPatch};
use crate::error::{AppError, AppResult};

/// In-memory state for the current load cycle: the known tickets and
/// employers, in server order. No network calls happen here. Every mutation
/// bumps a revision counter observable through [`EntityStore::subscribe`] so
/// presentation can recompute derived facts without the merge path knowing
/// about rendering.
pub struct EntityStore {
    tickets: Vec<Ticket>,
    employers: Vec<Employer>,
    revision: watch::Sender<u64>,
}

impl EntityStore {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            tickets: Vec::new(),
            employers: Vec::new(),
            revision,
        }
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn employers(&self) -> &[Employer] {
        &self.employers
    }

    pub fn ticket(&self, id: &str) -> Option<&Ticket> {
        self.tickets.iter().find(|ticket| ticket.id == id)
    }

    /// Install a full ticket collection, discarding entries not in `list`.
    pub fn replace_tickets(&mut self, list: Vec<Ticket>) {
        self.tickets = list;
        self.bump();
    }

    /// Full replace only; employers are read-only reference data.
    pub fn replace_employers(&mut self, list: Vec<Employer>) {
        self.employers = list;
        self.bump();
    }

    /// Add a freshly created ticket. Replaces any existing record with the
    /// same id so the one-record-per-id invariant holds.
    pub fn insert_ticket(&mut self, ticket: Ticket) {
        self.tickets.retain(|existing| existing.id != ticket.id);
        self.tickets.push(ticket);
        self.bump();
    }

    /// Merge a partial representation into the existing record at `id`.
    /// Triage only ever targets tickets we already hold, so a miss signals a
    /// store/server desync rather than a normal condition.
    pub fn upsert_ticket(&mut self, id: &str, patch: &TicketPatch) -> AppResult<()> {
        let ticket = self
            .tickets
            .iter_mut()
            .find(|ticket| ticket.id == id)
            .ok_or_else(|| AppError::UnknownEntity(id.to_string()))?;
        patch.apply_to(ticket);
        self.bump();
        Ok(())
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn bump(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(id: &str) -> Ticket {
        let now = "2026-08-01T10:00:00".parse().unwrap();
        Ticket {
            id: id.to_string(),
            user_id: "u1".to_string(),
            title: format!("ticket {id}"),
            description: "a description".to_string(),
            status: "open".to_string(),
            priority: None,
            priority_score: None,
            rationale: None,
            assignee: None,
            assignee_reason: None,
            first_reply: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn replace_discards_prior_entries() {
        let mut store = EntityStore::new();
        store.replace_tickets(vec![ticket("1"), ticket("2")]);
        store.replace_tickets(vec![ticket("3")]);
        assert_eq!(store.tickets().len(), 1);
        assert!(store.ticket("1").is_none());
        assert!(store.ticket("3").is_some());
    }

    #[test]
    fn upsert_rejects_unknown_id() {
        let mut store = EntityStore::new();
        store.replace_tickets(vec![ticket("1")]);
        let err = store
            .upsert_ticket("missing", &TicketPatch::default())
            .unwrap_err();
        assert!(matches!(err, AppError::UnknownEntity(id) if id == "missing"));
    }

    #[test]
    fn merging_one_id_never_touches_another() {
        let mut store = EntityStore::new();
        store.replace_tickets(vec![ticket("x"), ticket("y")]);
        let before = store.ticket("y").unwrap().clone();

        let patch = TicketPatch {
            priority: Some("P0".to_string()),
            ..TicketPatch::default()
        };
        store.upsert_ticket("x", &patch).unwrap();

        assert_eq!(store.ticket("y").unwrap(), &before);
        assert_eq!(store.ticket("x").unwrap().priority.as_deref(), Some("P0"));
    }

    #[test]
    fn insert_keeps_one_record_per_id() {
        let mut store = EntityStore::new();
        store.insert_ticket(ticket("1"));
        let mut updated = ticket("1");
        updated.status = "closed".to_string();
        store.insert_ticket(updated);
        assert_eq!(store.tickets().len(), 1);
        assert_eq!(store.ticket("1").unwrap().status, "closed");
    }

    #[test]
    fn mutations_bump_the_revision() {
        let mut store = EntityStore::new();
        let watch = store.subscribe();
        assert_eq!(*watch.borrow(), 0);
        store.replace_tickets(vec![ticket("1")]);
        assert_eq!(*watch.borrow(), 1);
        store
            .upsert_ticket("1", &TicketPatch::default())
            .unwrap();
        assert_eq!(*watch.borrow(), 2);
    }

    #[test]
    fn overlapping_merges_apply_in_completion_order() {
        let mut store = EntityStore::new();
        store.replace_tickets(vec![ticket("3")]);

        let first_completing = TicketPatch {
            priority: Some("P2".to_string()),
            rationale: Some("second issued, first back".to_string()),
            ..TicketPatch::default()
        };
        let last_completing = TicketPatch {
            priority: Some("P1".to_string()),
            first_reply: Some("first issued, last back".to_string()),
            ..TicketPatch::default()
        };

        store.upsert_ticket("3", &first_completing).unwrap();
        store.upsert_ticket("3", &last_completing).unwrap();

        let merged = store.ticket("3").unwrap();
        assert_eq!(merged.priority.as_deref(), Some("P1"));
        assert_eq!(
            merged.rationale.as_deref(),
            Some("second issued, first back")
        );
        assert_eq!(
            merged.first_reply.as_deref(),
            Some("first issued, last back")
        );
    }
}
