use crate::context::AppContext;
use crate::derive;
use crate::domain::ticket::{Ticket, TicketDraft};
use crate::error::{AppError, AppResult};
use crate::session::SessionState;
use crate::store::EntityStore;
use crate::workflow::{SyncController, TriageOutcome};

pub async fn list(ctx: &AppContext) -> AppResult<()> {
    let controller = SyncController::new(ctx.helpdesk.clone());
    let mut store = EntityStore::new();
    controller.load_tickets(&mut store).await?;
    controller.load_employers(&mut store).await?;
    render_ticket_table(&store);
    Ok(())
}

pub async fn show(ctx: &AppContext, id: &str) -> AppResult<()> {
    let controller = SyncController::new(ctx.helpdesk.clone());
    let mut store = EntityStore::new();
    controller.load_tickets(&mut store).await?;
    controller.load_employers(&mut store).await?;
    let ticket = store
        .ticket(id)
        .ok_or_else(|| AppError::UnknownEntity(id.to_string()))?;
    render_ticket_detail(ticket, &store);
    Ok(())
}

pub async fn employers(ctx: &AppContext) -> AppResult<()> {
    let controller = SyncController::new(ctx.helpdesk.clone());
    let mut store = EntityStore::new();
    controller.load_employers(&mut store).await?;
    for employer in store.employers() {
        println!(
            "{:<8} {:<12} {}",
            employer.id,
            employer.name,
            employer.skills.join(", ")
        );
    }
    Ok(())
}

pub async fn create(
    ctx: &AppContext,
    user_id: Option<String>,
    title: String,
    description: String,
) -> AppResult<()> {
    let user_id = user_id
        .or_else(|| ctx.config.default_user_id.clone())
        .ok_or_else(|| {
            AppError::Configuration(
                "no user id given and no default configured; pass --user-id or run 'config init'"
                    .to_string(),
            )
        })?;

    let mut session = SessionState::new();
    session.draft = TicketDraft {
        user_id,
        title,
        description,
    };
    if !session.draft.is_complete() {
        return Err(AppError::Configuration(
            "user id, title and description must all be non-empty".to_string(),
        ));
    }

    let controller = SyncController::new(ctx.helpdesk.clone());
    let mut store = EntityStore::new();
    controller.load_employers(&mut store).await.ok();
    let id = controller.create_ticket(&mut store, &mut session).await?;

    println!("Ticket {id} created and triaged.");
    if let Some(ticket) = store.ticket(&id) {
        render_ticket_detail(ticket, &store);
    }
    Ok(())
}

pub async fn triage(ctx: &AppContext, id: &str) -> AppResult<()> {
    let mut controller = SyncController::new(ctx.helpdesk.clone());
    let mut store = EntityStore::new();
    controller.load_tickets(&mut store).await?;
    controller.load_employers(&mut store).await?;

    let ticket = store
        .ticket(id)
        .ok_or_else(|| AppError::UnknownEntity(id.to_string()))?;
    if ticket.is_triaged() {
        println!("Ticket {id} is already triaged; nothing to do.");
        return Ok(());
    }

    match controller.triage_ticket(&mut store, id).await? {
        TriageOutcome::Applied => {
            println!("Ticket {id} triaged.");
            if let Some(ticket) = store.ticket(id) {
                render_ticket_detail(ticket, &store);
            }
        }
        TriageOutcome::Superseded => {
            println!("Triage result for {id} was superseded and discarded.");
        }
        TriageOutcome::NotInStore => {
            println!("Triage result for {id} could not be applied.");
        }
    }
    Ok(())
}

pub fn render_ticket_table(store: &EntityStore) {
    if store.tickets().is_empty() {
        println!("No tickets.");
        return;
    }
    println!(
        "{:<38} {:<12} {:<12} {:<14} TITLE",
        "ID", "STATUS", "PRIORITY", "ASSIGNEE"
    );
    for ticket in store.tickets() {
        println!(
            "{:<38} {:<12} {:<12} {:<14} {}",
            ticket.id,
            ticket.status,
            derive::priority_tier(ticket).as_str(),
            derive::assignee_name(ticket, store.employers()),
            ticket.title
        );
    }
}

pub fn render_ticket_detail(ticket: &Ticket, store: &EntityStore) {
    println!("Ticket {}", ticket.id);
    println!("  Title:       {}", ticket.title);
    println!("  Reporter:    {}", ticket.user_id);
    println!("  Status:      {}", ticket.status);
    println!("  Created:     {}", ticket.created_at);
    println!("  Updated:     {}", ticket.updated_at);
    println!("  Description: {}", ticket.description);

    // Untriaged tickets carry no trustworthy triage-derived fields.
    if !ticket.is_triaged() {
        println!("  Priority:    not triaged yet");
        return;
    }

    println!(
        "  Priority:    {} ({})",
        ticket.priority.as_deref().unwrap_or_default(),
        derive::priority_tier(ticket).as_str()
    );
    if let Some(score) = ticket.priority_score {
        println!("  Score:       {score:.1}/100");
    }
    println!(
        "  Assignee:    {}",
        derive::assignee_name(ticket, store.employers())
    );
    if let Some(reason) = &ticket.assignee_reason {
        println!("  Why them:    {reason}");
    }
    if let Some(rationale) = &ticket.rationale {
        println!("  Rationale:   {rationale}");
    }
    if let Some(reply) = &ticket.first_reply {
        println!("  First reply: {reply}");
    }
}
