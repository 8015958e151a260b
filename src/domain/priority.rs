/// Severity tier derived from the server-assigned priority label. Total over
/// the label space: absent or unrecognized labels classify as `Untriaged`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityTier {
    Urgent,
    High,
    Medium,
    Low,
    Untriaged,
}

impl PriorityTier {
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            Some("P0") => PriorityTier::Urgent,
            Some("P1") => PriorityTier::High,
            Some("P2") => PriorityTier::Medium,
            Some("P3") => PriorityTier::Low,
            _ => PriorityTier::Untriaged,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityTier::Urgent => "urgent",
            PriorityTier::High => "high",
            PriorityTier::Medium => "medium",
            PriorityTier::Low => "low",
            PriorityTier::Untriaged => "not triaged",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_labels() {
        assert_eq!(PriorityTier::from_label(Some("P0")), PriorityTier::Urgent);
        assert_eq!(PriorityTier::from_label(Some("P1")), PriorityTier::High);
        assert_eq!(PriorityTier::from_label(Some("P2")), PriorityTier::Medium);
        assert_eq!(PriorityTier::from_label(Some("P3")), PriorityTier::Low);
    }

    #[test]
    fn classification_is_total() {
        assert_eq!(PriorityTier::from_label(None), PriorityTier::Untriaged);
        assert_eq!(
            PriorityTier::from_label(Some("P9")),
            PriorityTier::Untriaged
        );
        assert_eq!(PriorityTier::from_label(Some("")), PriorityTier::Untriaged);
        assert_eq!(
            PriorityTier::from_label(Some("urgent critical")),
            PriorityTier::Untriaged
        );
    }

    #[test]
    fn trims_label_whitespace() {
        assert_eq!(PriorityTier::from_label(Some(" P1 ")), PriorityTier::High);
    }
}
