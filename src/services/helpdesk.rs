use async_trait::async_trait;

use crate::domain::employer::Employer;
use crate::domain::ticket::{Ticket, TicketDraft, TicketPatch};
use crate::error::AppResult;

/// The remote helpdesk boundary. List operations return full
/// representations; triage returns a partial one to be merged by id.
#[async_trait]
pub trait HelpdeskService: Send + Sync {
    async fn list_tickets(&self) -> AppResult<Vec<Ticket>>;
    async fn list_employers(&self) -> AppResult<Vec<Employer>>;
    async fn create_ticket_with_triage(&self, draft: &TicketDraft) -> AppResult<Ticket>;
    async fn triage_ticket(&self, id: &str) -> AppResult<TicketPatch>;
}
