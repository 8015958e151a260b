pub mod sync;

pub use sync::{SyncController, TriageOutcome};
