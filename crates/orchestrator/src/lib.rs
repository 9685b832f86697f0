//! Generation orchestration for the studio.
//!
//! The orchestrator owns the newest-first list of generation requests.
//! Each accepted submission starts exactly one producer: a call to the
//! triage dispatcher for `triage` requests, a timed placeholder generator
//! for everything else. Producers report back over a channel and the owner
//! merges each result into the list by request id, producing a new list
//! every time so observers can tell something changed.

pub mod backend;
pub mod mock;
pub mod orchestrator;
pub mod store;

pub use backend::{HttpTriageClient, TriageBackend};
pub use mock::MockTiming;
pub use orchestrator::Orchestrator;
pub use store::GenerationStore;
