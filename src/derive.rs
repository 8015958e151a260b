//! Pure presentation facts recomputed from store state on every render.

use crate::domain::employer::Employer;
use crate::domain::priority::PriorityTier;
use crate::domain::ticket::Ticket;

pub fn priority_tier(ticket: &Ticket) -> PriorityTier {
    PriorityTier::from_label(ticket.priority.as_deref())
}

/// Resolve the assignee id to a display name. Absence of an assignee or of a
/// matching employer is a valid outcome, not an error.
pub fn assignee_name<'a>(ticket: &Ticket, employers: &'a [Employer]) -> &'a str {
    ticket
        .assignee
        .as_deref()
        .and_then(|id| employers.iter().find(|employer| employer.id == id))
        .map(|employer| employer.name.as_str())
        .unwrap_or("Unassigned")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(assignee: Option<&str>, priority: Option<&str>) -> Ticket {
        let now = "2026-08-01T10:00:00".parse().unwrap();
        Ticket {
            id: "1".to_string(),
            user_id: "u1".to_string(),
            title: "t".to_string(),
            description: "d".to_string(),
            status: "open".to_string(),
            priority: priority.map(str::to_string),
            priority_score: None,
            rationale: None,
            assignee: assignee.map(str::to_string),
            assignee_reason: None,
            first_reply: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn employers() -> Vec<Employer> {
        vec![Employer {
            id: "emp1".to_string(),
            name: "Alice".to_string(),
            skills: vec!["Python".to_string()],
        }]
    }

    #[test]
    fn resolves_known_assignee() {
        let ticket = ticket(Some("emp1"), Some("P1"));
        assert_eq!(assignee_name(&ticket, &employers()), "Alice");
    }

    #[test]
    fn falls_back_to_unassigned() {
        assert_eq!(assignee_name(&ticket(None, None), &employers()), "Unassigned");
        assert_eq!(
            assignee_name(&ticket(Some("emp99"), None), &employers()),
            "Unassigned"
        );
        assert_eq!(assignee_name(&ticket(Some("emp1"), None), &[]), "Unassigned");
    }

    #[test]
    fn tier_tracks_the_priority_label() {
        assert_eq!(
            priority_tier(&ticket(None, Some("P0"))),
            PriorityTier::Urgent
        );
        assert_eq!(priority_tier(&ticket(None, None)), PriorityTier::Untriaged);
    }
}
