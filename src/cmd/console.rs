use std::io::{self, BufRead, Write};

use crate::cmd::ticket::{render_ticket_detail, render_ticket_table};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::session::SessionState;
use crate::store::EntityStore;
use crate::workflow::{SyncController, TriageOutcome};

/// Interactive session: one store and one draft live for the whole loop, so
/// triage results merge into whatever view is open.
pub async fn run(ctx: &AppContext) -> AppResult<()> {
    let mut controller = SyncController::new(ctx.helpdesk.clone());
    let mut store = EntityStore::new();
    let mut session = SessionState::new();
    let mut revision = store.subscribe();

    if let Err(err) = controller.load_tickets(&mut store).await {
        println!("Could not load tickets: {err}");
    }
    if let Err(err) = controller.load_employers(&mut store).await {
        println!("Could not load employers: {err}");
    }
    render_ticket_table(&store);
    println!("Type 'help' for commands.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or("");
        let argument = parts.next();

        match (command, argument) {
            ("help", _) => print_help(),
            ("list", _) => render_ticket_table(&store),
            ("refresh", _) => {
                if let Err(err) = controller.load_tickets(&mut store).await {
                    println!("Refresh failed, showing previous data: {err}");
                }
                render_ticket_table(&store);
            }
            ("employers", _) => {
                for employer in store.employers() {
                    println!("{:<8} {}", employer.id, employer.name);
                }
            }
            ("open", Some(id)) => {
                if store.ticket(id).is_some() {
                    session.open_detail(id);
                } else {
                    println!("No ticket with id '{id}'.");
                }
            }
            ("close", _) => session.close_detail(),
            ("new", _) => {
                session.toggle_form();
                if session.form_open() {
                    edit_draft(ctx, &mut session)?;
                } else {
                    println!("Creation form hidden; draft kept.");
                }
            }
            ("submit", _) => {
                if !session.draft.is_complete() {
                    println!("Draft incomplete: user id, title and description are required.");
                } else {
                    match controller.create_ticket(&mut store, &mut session).await {
                        Ok(id) => println!("Ticket {id} created."),
                        Err(err) => println!("Creation failed, draft kept: {err}"),
                    }
                }
            }
            ("triage", Some(id)) => match store.ticket(id) {
                None => println!("No ticket with id '{id}'."),
                Some(ticket) if ticket.is_triaged() => {
                    println!("Ticket {id} already has a priority.");
                }
                Some(_) => match controller.triage_ticket(&mut store, id).await {
                    Ok(TriageOutcome::Applied) => println!("Ticket {id} triaged."),
                    Ok(TriageOutcome::Superseded) => {
                        println!("Triage result discarded (superseded).")
                    }
                    Ok(TriageOutcome::NotInStore) => {
                        println!("Triage result could not be applied.")
                    }
                    Err(err) => println!("Triage failed: {err}"),
                },
            },
            ("quit" | "exit", _) => break,
            ("", _) => {}
            _ => println!("Unknown command; type 'help'."),
        }

        // Redraw the open detail view whenever the store changed underneath
        // it, so merged triage fields never go stale on screen.
        let store_changed = revision.has_changed().unwrap_or(false);
        if store_changed {
            revision.borrow_and_update();
        }
        if store_changed || command == "open" {
            if let Some(ticket) = session.selected(&store) {
                render_ticket_detail(ticket, &store);
            }
        }
    }

    Ok(())
}

fn edit_draft(ctx: &AppContext, session: &mut SessionState) -> AppResult<()> {
    println!("New ticket draft. Press Enter to keep the current value.");
    if session.draft.user_id.is_empty() {
        session.draft.user_id = ctx.config.default_user_id.clone().unwrap_or_default();
    }
    prompt_field("Reporter user id", &mut session.draft.user_id)?;
    prompt_field("Title", &mut session.draft.title)?;
    prompt_field("Description", &mut session.draft.description)?;
    println!("Draft ready; 'submit' to create the ticket.");
    Ok(())
}

fn prompt_field(label: &str, target: &mut String) -> AppResult<()> {
    let mut stdout = io::stdout();
    if target.is_empty() {
        write!(stdout, "{label}: ")?;
    } else {
        write!(stdout, "{label} [{target}]: ")?;
    }
    stdout.flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let trimmed = input.trim();
    if !trimmed.is_empty() {
        *target = trimmed.to_string();
    }
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  list             show all tickets");
    println!("  refresh          reload tickets from the service");
    println!("  employers        show the assignable employers");
    println!("  open <id>        open a ticket in detail view");
    println!("  close            close the detail view");
    println!("  new              toggle the creation form and edit the draft");
    println!("  submit           submit the draft for create-and-triage");
    println!("  triage <id>      request triage for an untriaged ticket");
    println!("  quit             leave the console");
}
