use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::domain::ticket::TicketPatch;
use crate::error::{AppError, AppResult};
use crate::services::HelpdeskService;
use crate::session::SessionState;
use crate::store::EntityStore;

/// What became of a completed triage response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriageOutcome {
    /// The partial was merged into the store.
    Applied,
    /// A later-issued request for the same id made this response stale.
    Superseded,
    /// The store holds no ticket with this id; a desync defect, logged and
    /// not surfaced as an operation failure.
    NotInStore,
}

/// Drives the four remote operations and applies their results to the entity
/// store. Failures never clobber state the store already holds: a failed load
/// keeps the stale collection, a failed create keeps the draft, a failed
/// triage leaves the ticket untouched.
pub struct SyncController {
    service: Arc<dyn HelpdeskService>,
    triage_seq: HashMap<String, u64>,
}

impl SyncController {
    pub fn new(service: Arc<dyn HelpdeskService>) -> Self {
        Self {
            service,
            triage_seq: HashMap::new(),
        }
    }

    pub async fn load_tickets(&self, store: &mut EntityStore) -> AppResult<()> {
        match self.service.list_tickets().await {
            Ok(tickets) => {
                store.replace_tickets(tickets);
                Ok(())
            }
            Err(err) => {
                warn!(%err, "ticket load failed; keeping previous collection");
                Err(err)
            }
        }
    }

    pub async fn load_employers(&self, store: &mut EntityStore) -> AppResult<()> {
        match self.service.list_employers().await {
            Ok(employers) => {
                store.replace_employers(employers);
                Ok(())
            }
            Err(err) => {
                warn!(%err, "employer load failed; keeping previous collection");
                Err(err)
            }
        }
    }

    /// Submit the session draft for create-and-triage. On success the
    /// returned full ticket joins the store and the draft/form reset; on
    /// failure the draft is preserved so the user can retry.
    pub async fn create_ticket(
        &self,
        store: &mut EntityStore,
        session: &mut SessionState,
    ) -> AppResult<String> {
        match self.service.create_ticket_with_triage(&session.draft).await {
            Ok(ticket) => {
                let id = ticket.id.clone();
                store.insert_ticket(ticket);
                session.finish_submission();
                Ok(id)
            }
            Err(err) => {
                warn!(%err, "ticket creation failed; draft kept for retry");
                Err(err)
            }
        }
    }

    /// Request triage for an existing ticket and merge the partial result.
    pub async fn triage_ticket(
        &mut self,
        store: &mut EntityStore,
        id: &str,
    ) -> AppResult<TriageOutcome> {
        let seq = self.begin_triage(id);
        match self.service.triage_ticket(id).await {
            Ok(patch) => self.complete_triage(store, id, seq, patch),
            Err(err) => {
                warn!(ticket = id, %err, "triage failed; ticket left untouched");
                Err(err)
            }
        }
    }

    /// Tag an outgoing triage request with a per-id monotonic sequence
    /// number. The latest-issued number is the only one whose completion
    /// will be applied.
    pub fn begin_triage(&mut self, id: &str) -> u64 {
        let seq = self.triage_seq.entry(id.to_string()).or_insert(0);
        *seq += 1;
        *seq
    }

    /// Apply a completed triage response unless a later request for the same
    /// id has been issued in the meantime.
    pub fn complete_triage(
        &mut self,
        store: &mut EntityStore,
        id: &str,
        seq: u64,
        patch: TicketPatch,
    ) -> AppResult<TriageOutcome> {
        let latest = self.triage_seq.get(id).copied().unwrap_or(0);
        if seq < latest {
            debug!(ticket = id, seq, latest, "discarding superseded triage response");
            return Ok(TriageOutcome::Superseded);
        }
        match store.upsert_ticket(id, &patch) {
            Ok(()) => Ok(TriageOutcome::Applied),
            Err(AppError::UnknownEntity(id)) => {
                // Store/server desync; a defect signal, not a user-facing
                // condition.
                error!(ticket = %id, "triage response for a ticket the store does not hold");
                Ok(TriageOutcome::NotInStore)
            }
            Err(err) => Err(err),
        }
    }
}
