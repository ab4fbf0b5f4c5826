//! Background analysis requests for the interactive view.
//!
//! Each submission runs on its own thread and is tagged with a monotonically
//! increasing id. Only the outcome of the most recent submission is ever
//! delivered; results of superseded requests are dropped on arrival.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use log::debug;

use crate::ai::client::{AnalysisRequest, AnalysisService};
use crate::ai::errors::AnalysisError;

pub type AnalysisOutcome = Result<String, AnalysisError>;

pub struct AnalysisJobs {
    service: Arc<dyn AnalysisService>,
    tx: Sender<(u64, AnalysisOutcome)>,
    rx: Receiver<(u64, AnalysisOutcome)>,
    latest: u64,
    pending: bool,
}

impl AnalysisJobs {
    pub fn new(service: Arc<dyn AnalysisService>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            service,
            tx,
            rx,
            latest: 0,
            pending: false,
        }
    }

    /// Start a request. Any request still in flight is superseded.
    pub fn submit(&mut self, request: AnalysisRequest) -> u64 {
        self.latest += 1;
        self.pending = true;
        let id = self.latest;
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let outcome = service.analyze(&request);
            // The receiver is gone once the app exits; nothing to report then.
            let _ = tx.send((id, outcome));
        });
        debug!("analysis request {id} submitted");
        id
    }

    /// Non-blocking check for the outcome of the latest request.
    pub fn poll(&mut self) -> Option<AnalysisOutcome> {
        while let Ok((id, outcome)) = self.rx.try_recv() {
            if let Some(outcome) = self.accept(id, outcome) {
                return Some(outcome);
            }
        }
        None
    }

    /// Block up to `timeout` for the latest outcome.
    pub fn wait(&mut self, timeout: Duration) -> Option<AnalysisOutcome> {
        let deadline = Instant::now() + timeout;
        while self.pending {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                return None;
            }
            match self.rx.recv_timeout(left) {
                Ok((id, outcome)) => {
                    if let Some(outcome) = self.accept(id, outcome) {
                        return Some(outcome);
                    }
                }
                Err(_) => return None,
            }
        }
        None
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    fn accept(&mut self, id: u64, outcome: AnalysisOutcome) -> Option<AnalysisOutcome> {
        if id != self.latest {
            debug!("dropping stale analysis result {id} (latest {})", self.latest);
            return None;
        }
        self.pending = false;
        Some(outcome)
    }
}
