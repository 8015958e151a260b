use async_trait::async_trait;
use reqwest::{Client, Response, header::ACCEPT};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::employer::Employer;
use crate::domain::ticket::{Ticket, TicketDraft, TicketPatch};
use crate::error::{AppError, AppResult};
use crate::services::HelpdeskService;

/// HTTP/JSON client for the helpdesk triage service.
pub struct HelpdeskClient {
    http: Client,
    base_url: String,
}

impl HelpdeskClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Remote(format!(
                "helpdesk responded with {status}: {body}"
            )));
        }
        response.json().await.map_err(|err| {
            AppError::Remote(format!("failed to parse helpdesk response: {err}"))
        })
    }

    fn transport(err: reqwest::Error) -> AppError {
        AppError::Transport(format!("failed to reach helpdesk: {err}"))
    }
}

#[async_trait]
impl HelpdeskService for HelpdeskClient {
    async fn list_tickets(&self) -> AppResult<Vec<Ticket>> {
        let response = self
            .http
            .get(self.endpoint("/tickets"))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(Self::transport)?;
        Self::decode(response).await
    }

    async fn list_employers(&self) -> AppResult<Vec<Employer>> {
        let response = self
            .http
            .get(self.endpoint("/employers"))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(Self::transport)?;
        Self::decode(response).await
    }

    async fn create_ticket_with_triage(&self, draft: &TicketDraft) -> AppResult<Ticket> {
        let response = self
            .http
            .post(self.endpoint("/tickets-with-triage"))
            .header(ACCEPT, "application/json")
            .json(draft)
            .send()
            .await
            .map_err(Self::transport)?;
        let payload: CreateWithTriageResponse = Self::decode(response).await?;
        Ok(payload.ticket)
    }

    async fn triage_ticket(&self, id: &str) -> AppResult<TicketPatch> {
        let response = self
            .http
            .post(self.endpoint(&format!("/tickets/{id}/triage")))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(Self::transport)?;
        Self::decode(response).await
    }
}

/// The create endpoint wraps the authoritative ticket representation; the
/// sibling `triage_result` key duplicates fields already on the ticket and is
/// dropped here.
#[derive(Deserialize)]
struct CreateWithTriageResponse {
    ticket: Ticket,
}
