//! # integration-tests
//!
//! Shared fixtures for the cross-crate scenarios under `tests/`: a scripted
//! transport and a notifier that records.

use async_trait::async_trait;
use domains::{
    ApiError, GraphqlRequest, GraphqlResponse, GraphqlTransport, Notification, NotificationId,
    Notifier, TransportError,
};
use serde_json::{Map, Value};
use services::AppStores;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use storage_adapters::MemoryStorage;
use tokio::sync::Semaphore;

pub enum Reply {
    Data(Value),
    Errors(Vec<ApiError>),
    Fail(TransportError),
}

/// Answers each operation from a per-operation queue and records every
/// request it receives. A gated transport holds each request until
/// [`ScriptedTransport::release`] is called.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    requests: Mutex<Vec<GraphqlRequest>>,
    gate: Option<Semaphore>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn gated() -> Arc<Self> {
        Arc::new(Self {
            gate: Some(Semaphore::new(0)),
            ..Self::default()
        })
    }

    fn push(&self, operation: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry(operation.to_string())
            .or_default()
            .push_back(reply);
    }

    /// Queues `data` as the root field of `operation`.
    pub fn reply(&self, operation: &str, data: Value) {
        self.push(operation, Reply::Data(data));
    }

    pub fn reply_errors(&self, operation: &str, errors: Vec<ApiError>) {
        self.push(operation, Reply::Errors(errors));
    }

    pub fn fail(&self, operation: &str, err: TransportError) {
        self.push(operation, Reply::Fail(err));
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub fn requests(&self) -> Vec<GraphqlRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_for(&self, operation: &str) -> Vec<GraphqlRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.operation_name == operation)
            .collect()
    }

    /// Yields until at least `n` requests have arrived.
    pub async fn wait_for_requests(&self, n: usize) {
        while self.requests.lock().unwrap().len() < n {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl GraphqlTransport for ScriptedTransport {
    async fn execute(&self, request: GraphqlRequest) -> Result<GraphqlResponse, TransportError> {
        let operation = request.operation_name.clone();
        self.requests.lock().unwrap().push(request);

        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .map_err(|e| TransportError::Request(e.to_string()))?
                .forget();
        }

        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&operation)
            .and_then(VecDeque::pop_front);

        match reply {
            Some(Reply::Data(data)) => {
                let mut root = Map::new();
                root.insert(operation, data);
                Ok(GraphqlResponse::with_data(Value::Object(root)))
            }
            Some(Reply::Errors(errors)) => Ok(GraphqlResponse::with_errors(errors)),
            Some(Reply::Fail(err)) => Err(err),
            None => Err(TransportError::Request(format!(
                "no scripted reply for {operation}"
            ))),
        }
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    next_id: AtomicU64,
    shown: Mutex<Vec<(NotificationId, Notification)>>,
    dismissed: Mutex<Vec<NotificationId>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn titles(&self) -> Vec<String> {
        self.shown
            .lock()
            .unwrap()
            .iter()
            .map(|(_, n)| n.title.clone())
            .collect()
    }

    pub fn count_titled(&self, title: &str) -> usize {
        self.titles().iter().filter(|t| *t == title).count()
    }

    pub fn id_of(&self, title: &str) -> Option<NotificationId> {
        self.shown
            .lock()
            .unwrap()
            .iter()
            .find(|(_, n)| n.title == title)
            .map(|(id, _)| *id)
    }

    pub fn dismissed(&self) -> Vec<NotificationId> {
        self.dismissed.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) -> NotificationId {
        let id = NotificationId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        self.shown.lock().unwrap().push((id, notification));
        id
    }

    fn dismiss(&self, id: NotificationId) {
        self.dismissed.lock().unwrap().push(id);
    }
}

/// Stores over in-memory storage.
pub fn stores(transport: Arc<ScriptedTransport>, notifier: Arc<RecordingNotifier>) -> AppStores {
    AppStores::new(transport, Arc::new(MemoryStorage::new()), notifier)
}
