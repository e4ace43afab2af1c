//! Threaded round-trip transport: one thread per request against a
//! blocking [`SchemaService`], completions delivered over a channel.
//!
//! The channel preserves network arrival order, not issuance order; the
//! host drains it on its event loop and feeds each completion to
//! [`FormController::handle_response`]. In-flight requests are never
//! cancelled: a slow response still arrives and still merges.
//!
//! [`FormController::handle_response`]: crate::FormController::handle_response

use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

use crate::controller::SchemaRequest;
use crate::service::{SchemaResponse, SchemaService, ServiceError};

/// One completed round trip, tagged with the generation of the request
/// that produced it.
#[derive(Debug)]
pub struct Completion {
    pub generation: u64,
    pub outcome: Result<SchemaResponse, ServiceError>,
}

pub struct ServiceWorker {
    service: Arc<dyn SchemaService>,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl ServiceWorker {
    pub fn new(service: Arc<dyn SchemaService>) -> Self {
        let (tx, rx) = channel();
        ServiceWorker { service, tx, rx }
    }

    /// Issue a round trip. Returns immediately; the completion shows up in
    /// [`drain`](Self::drain) once the service answers.
    pub fn submit(&self, request: SchemaRequest) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let outcome = service.fetch_schema(&request.spec);
            // A closed receiver means the form is being torn down.
            let _ = tx.send(Completion {
                generation: request.generation,
                outcome,
            });
        });
    }

    /// Completions that have arrived since the last drain, arrival order.
    pub fn drain(&self) -> Vec<Completion> {
        self.rx.try_iter().collect()
    }

    /// Block for the next completion. Only meaningful while a request is
    /// in flight.
    pub fn recv(&self) -> Option<Completion> {
        self.rx.recv().ok()
    }
}
