use serde::{Deserialize, Serialize};

/// Read-only reference data: the people tickets get assigned to. Populated
/// once per load cycle and never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
}
