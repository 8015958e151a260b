use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A support ticket as known to the remote helpdesk service. Exactly one
/// record per id lives in the store at any time. The six triage fields stay
/// `None` until the service has triaged the ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: Option<String>,
    pub priority_score: Option<f64>,
    pub rationale: Option<String>,
    pub assignee: Option<String>,
    pub assignee_reason: Option<String>,
    pub first_reply: Option<String>,
    // The service emits offset-less ISO timestamps (`datetime.isoformat()`),
    // so these are naive by contract.
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Ticket {
    pub fn is_triaged(&self) -> bool {
        self.priority.is_some()
    }
}

/// The required fields of a not-yet-created ticket. No identity; owned by the
/// session until submission succeeds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TicketDraft {
    pub user_id: String,
    pub title: String,
    pub description: String,
}

impl TicketDraft {
    pub fn is_complete(&self) -> bool {
        !self.user_id.trim().is_empty()
            && !self.title.trim().is_empty()
            && !self.description.trim().is_empty()
    }

    pub fn clear(&mut self) {
        *self = TicketDraft::default();
    }
}

/// A partial ticket representation returned by the triage endpoint. Fields
/// absent from the response deserialize to `None` and leave the stored value
/// untouched; fields the server added since this client was built are
/// ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketPatch {
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub priority_score: Option<f64>,
    pub rationale: Option<String>,
    pub assignee: Option<String>,
    pub assignee_reason: Option<String>,
    pub first_reply: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
}

impl TicketPatch {
    /// Merge by field name: present fields overwrite, absent fields are
    /// retained. A patch carrying every field degenerates to full
    /// replacement.
    pub fn apply_to(&self, ticket: &mut Ticket) {
        if let Some(user_id) = &self.user_id {
            ticket.user_id = user_id.clone();
        }
        if let Some(title) = &self.title {
            ticket.title = title.clone();
        }
        if let Some(description) = &self.description {
            ticket.description = description.clone();
        }
        if let Some(status) = &self.status {
            ticket.status = status.clone();
        }
        if let Some(priority) = &self.priority {
            ticket.priority = Some(priority.clone());
        }
        if let Some(score) = self.priority_score {
            ticket.priority_score = Some(score);
        }
        if let Some(rationale) = &self.rationale {
            ticket.rationale = Some(rationale.clone());
        }
        if let Some(assignee) = &self.assignee {
            ticket.assignee = Some(assignee.clone());
        }
        if let Some(reason) = &self.assignee_reason {
            ticket.assignee_reason = Some(reason.clone());
        }
        if let Some(reply) = &self.first_reply {
            ticket.first_reply = Some(reply.clone());
        }
        if let Some(updated_at) = self.updated_at {
            ticket.updated_at = updated_at;
        }
    }
}
