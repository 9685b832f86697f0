//! Immutable request list with pure update functions.

use std::sync::Arc;
use studio_common::{GenerationOutput, GenerationRequest, RequestId};

/// Snapshot of all requests in a session, newest first.
///
/// Updates never mutate a snapshot: they return a new one that shares every
/// untouched request with the old one.
#[derive(Debug, Clone, Default)]
pub struct GenerationStore {
    requests: Arc<Vec<Arc<GenerationRequest>>>,
}

impl GenerationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// New snapshot with `request` prepended.
    pub fn add_request(&self, request: GenerationRequest) -> Self {
        let mut requests = Vec::with_capacity(self.requests.len() + 1);
        requests.push(Arc::new(request));
        requests.extend(self.requests.iter().cloned());
        Self {
            requests: Arc::new(requests),
        }
    }

    /// New snapshot with the request `id` settled with `output`.
    ///
    /// Returns `None` if no such request exists or it has already settled;
    /// a request settles exactly once.
    pub fn settle_request(&self, id: &RequestId, output: GenerationOutput) -> Option<Self> {
        let index = self
            .requests
            .iter()
            .position(|request| &request.id == id && request.is_generating)?;

        let mut requests = self.requests.as_ref().clone();
        requests[index] = Arc::new(requests[index].settled(output));
        Some(Self {
            requests: Arc::new(requests),
        })
    }

    pub fn get(&self, id: &RequestId) -> Option<&Arc<GenerationRequest>> {
        self.requests.iter().find(|request| &request.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<GenerationRequest>> {
        self.requests.iter()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Number of requests still generating.
    pub fn generating(&self) -> usize {
        self.requests.iter().filter(|r| r.is_generating).count()
    }

    /// Whether two snapshots are the same list, not merely equal contents.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.requests, &other.requests)
    }
}
