//! The generation orchestrator.

use chrono::Utc;
use std::sync::Arc;
use studio_common::{GenerationOutput, GenerationRequest, GenerationType, RequestId};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::backend::TriageBackend;
use crate::mock::{self, MockTiming};
use crate::store::GenerationStore;

/// A producer's result, addressed to the request it belongs to.
#[derive(Debug)]
struct Settlement {
    id: RequestId,
    output: GenerationOutput,
}

/// Owns the session's request list and the producers feeding it.
///
/// Producers run as spawned tasks and only ever send a [`Settlement`]; the
/// list itself is touched solely through `&mut self`, so settlements are
/// applied one at a time in whatever order producers finish.
pub struct Orchestrator {
    store: GenerationStore,
    triage: Arc<dyn TriageBackend>,
    timing: MockTiming,
    next_seq: u64,
    accepting: bool,
    in_flight: usize,
    settlements_tx: mpsc::UnboundedSender<Settlement>,
    settlements_rx: mpsc::UnboundedReceiver<Settlement>,
    snapshots: watch::Sender<GenerationStore>,
}

impl Orchestrator {
    pub fn new(triage: Arc<dyn TriageBackend>) -> Self {
        let (settlements_tx, settlements_rx) = mpsc::unbounded_channel();
        let (snapshots, _) = watch::channel(GenerationStore::new());
        Self {
            store: GenerationStore::new(),
            triage,
            timing: MockTiming::default(),
            next_seq: 0,
            accepting: true,
            in_flight: 0,
            settlements_tx,
            settlements_rx,
            snapshots,
        }
    }

    pub fn with_timing(mut self, timing: MockTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Current snapshot of all requests, newest first.
    pub fn requests(&self) -> &GenerationStore {
        &self.store
    }

    /// Receive a new snapshot whenever a request is added or settles.
    pub fn subscribe(&self) -> watch::Receiver<GenerationStore> {
        self.snapshots.subscribe()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Refuse further submissions. Producers already running are not
    /// interrupted and still settle.
    pub fn stop(&mut self) {
        if self.accepting {
            info!(in_flight = self.in_flight, "Generation stopped; in-flight requests will still settle");
        }
        self.accepting = false;
    }

    pub fn resume(&mut self) {
        self.accepting = true;
    }

    /// Submit a generation.
    ///
    /// Returns `None` without touching the list when the model is empty,
    /// the user prompt is blank, or submissions are stopped. Otherwise the
    /// new request is prepended in the generating state, its producer is
    /// started, and its id is returned.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(
        &mut self,
        kind: GenerationType,
        model: &str,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Option<RequestId> {
        if !self.accepting {
            debug!(%kind, "Submission ignored: generation is stopped");
            return None;
        }
        if model.trim().is_empty() || user_prompt.trim().is_empty() {
            debug!(%kind, "Submission ignored: model and prompt are required");
            return None;
        }

        let now = Utc::now();
        let id = RequestId::new(now, self.next_seq);
        self.next_seq += 1;

        let request = GenerationRequest::new(id.clone(), kind, model, system_prompt, user_prompt, now);
        self.spawn_producer(&request);
        self.publish(self.store.add_request(request));
        self.in_flight += 1;

        info!(
            request_id = %id,
            %kind,
            model = %model,
            in_flight = self.in_flight,
            "Generation submitted"
        );

        Some(id)
    }

    fn spawn_producer(&self, request: &GenerationRequest) {
        let id = request.id.clone();
        let tx = self.settlements_tx.clone();

        match request.kind {
            GenerationType::Triage => {
                let backend = self.triage.clone();
                let system_prompt = request.system_prompt.clone();
                let message = request.user_prompt.clone();
                tokio::spawn(async move {
                    let instructions = (!system_prompt.trim().is_empty()).then_some(system_prompt.as_str());
                    let output = match backend.triage(instructions, &message).await {
                        Ok(decision) => GenerationOutput::Triage(decision),
                        Err(e) => {
                            warn!(request_id = %id, error = %e, "Triage producer failed");
                            GenerationOutput::failed(e.to_string())
                        }
                    };
                    let _ = tx.send(Settlement { id, output });
                });
            }
            GenerationType::Script => {
                let output = mock::script(&request.model, &request.user_prompt);
                self.spawn_delayed(id, output, tx);
            }
            GenerationType::Image => self.spawn_delayed(id, mock::images(), tx),
            GenerationType::Video => self.spawn_delayed(id, mock::video(), tx),
            GenerationType::Voice => self.spawn_delayed(id, mock::voice(), tx),
        }
    }

    fn spawn_delayed(
        &self,
        id: RequestId,
        output: GenerationOutput,
        tx: mpsc::UnboundedSender<Settlement>,
    ) {
        let delay = self.timing.sample();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Settlement { id, output });
        });
    }

    /// Wait for the next producer to finish and merge its result.
    ///
    /// Returns the settled request's id, or `None` when nothing is in flight.
    pub async fn settle_next(&mut self) -> Option<RequestId> {
        while self.in_flight > 0 {
            let settlement = self.settlements_rx.recv().await?;
            if let Some(id) = self.apply(settlement) {
                return Some(id);
            }
        }
        None
    }

    /// Settle everything currently in flight. Returns how many settled.
    pub async fn settle_all(&mut self) -> usize {
        let mut settled = 0;
        while self.settle_next().await.is_some() {
            settled += 1;
        }
        settled
    }

    fn apply(&mut self, settlement: Settlement) -> Option<RequestId> {
        let Settlement { id, output } = settlement;
        let failed = output.is_failure();

        match self.store.settle_request(&id, output) {
            Some(next) => {
                self.in_flight -= 1;
                self.publish(next);
                info!(request_id = %id, failed, in_flight = self.in_flight, "Generation settled");
                Some(id)
            }
            None => {
                warn!(request_id = %id, "Ignoring settlement for unknown or settled request");
                None
            }
        }
    }

    fn publish(&mut self, next: GenerationStore) {
        self.store = next;
        self.snapshots.send_replace(self.store.clone());
    }
}
