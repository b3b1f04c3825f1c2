use std::collections::{HashSet, VecDeque};

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};

use keytui::api::{KeyApiClient, KeyInfo, KeyRecord};
use keytui::model::LoadTicket;

/// Priority level for API requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    High,   // User-initiated actions (reload, delete, rename)
    Medium, // Detail of the focused key
    Low,    // Health checks
}

/// API request types
#[derive(Debug, Clone)]
pub enum ApiRequest {
    /// Fetch the whole inventory
    LoadKeys {
        ticket: LoadTicket,
        pattern: String,
        limit: usize,
    },

    /// Fetch type, TTL, size and value of one key
    FetchKeyDetail { key: String },

    DeleteKeys { keys: Vec<String> },

    RenameKey { old_name: String, new_name: String },

    SetTtl { key: String, seconds: i64 },

    /// Remove the expiry of a key
    PersistKey { key: String },

    Ping,
}

impl ApiRequest {
    fn priority(&self) -> Priority {
        match self {
            ApiRequest::FetchKeyDetail { .. } => Priority::Medium,
            ApiRequest::Ping => Priority::Low,
            _ => Priority::High,
        }
    }
}

/// API response types
#[derive(Debug)]
pub enum ApiResponse {
    KeysLoaded {
        ticket: LoadTicket,
        keys: Result<Vec<KeyRecord>>,
    },

    KeyDetail {
        key: String,
        info: Result<KeyInfo>,
    },

    KeysDeleted {
        keys: Vec<String>,
        deleted: Result<u64>,
    },

    KeyRenamed {
        old_name: String,
        new_name: String,
        success: Result<bool>,
    },

    TtlSet {
        key: String,
        seconds: i64,
        success: Result<bool>,
    },

    KeyPersisted {
        key: String,
        success: Result<bool>,
    },

    Pong {
        result: Result<()>,
    },
}

/// Internal message for tracking completed requests
enum InternalMessage {
    Completed(u64),
}

/// API service worker that processes requests in the background
pub struct ApiService {
    client: KeyApiClient,
    request_queue: VecDeque<(ApiRequest, Priority)>,
    in_flight: HashSet<u64>,
    next_request_id: u64,
    response_tx: mpsc::UnboundedSender<ApiResponse>,
    completion_tx: mpsc::UnboundedSender<InternalMessage>,
    max_concurrent: usize,
}

impl ApiService {
    fn new(
        client: KeyApiClient,
        response_tx: mpsc::UnboundedSender<ApiResponse>,
        completion_tx: mpsc::UnboundedSender<InternalMessage>,
    ) -> Self {
        Self {
            client,
            request_queue: VecDeque::new(),
            in_flight: HashSet::new(),
            next_request_id: 0,
            response_tx,
            completion_tx,
            max_concurrent: 4,
        }
    }

    /// Add a request to the queue
    fn enqueue(&mut self, request: ApiRequest) {
        let priority = request.priority();

        // Insert based on priority (high priority at front)
        let insert_pos = self
            .request_queue
            .iter()
            .position(|(_, p)| *p > priority)
            .unwrap_or(self.request_queue.len());

        self.request_queue.insert(insert_pos, (request, priority));
    }

    /// Process the next request from the queue
    fn process_next(&mut self) {
        if self.in_flight.len() >= self.max_concurrent {
            return; // At capacity, wait for some to complete
        }

        let Some((request, _)) = self.request_queue.pop_front() else {
            return;
        };

        self.next_request_id += 1;
        let id = self.next_request_id;
        self.in_flight.insert(id);

        let client = self.client.clone();
        let response_tx = self.response_tx.clone();
        let completion_tx = self.completion_tx.clone();

        // No per-request retries; the periodic ping reports reachability
        tokio::spawn(async move {
            let response = Self::execute_request(&client, request).await;

            if response_tx.send(response).is_err() {
                tracing::debug!("response receiver dropped");
            }
            let _ = completion_tx.send(InternalMessage::Completed(id));
        });
    }

    /// Execute an API request and return the response
    async fn execute_request(client: &KeyApiClient, request: ApiRequest) -> ApiResponse {
        match request {
            ApiRequest::LoadKeys {
                ticket,
                pattern,
                limit,
            } => {
                tracing::debug!(ticket = ticket.seq(), pattern = %pattern, limit, "loading keys");
                let keys = client.list_keys(&pattern, limit).await;
                if let Ok(keys) = &keys {
                    tracing::debug!(ticket = ticket.seq(), count = keys.len(), "keys loaded");
                }
                ApiResponse::KeysLoaded { ticket, keys }
            }

            ApiRequest::FetchKeyDetail { key } => {
                let info = client.get_key_info(&key).await;
                ApiResponse::KeyDetail { key, info }
            }

            ApiRequest::DeleteKeys { keys } => {
                let deleted = client.delete_keys(&keys).await;
                ApiResponse::KeysDeleted { keys, deleted }
            }

            ApiRequest::RenameKey { old_name, new_name } => {
                let success = client.rename_key(&old_name, &new_name).await;
                ApiResponse::KeyRenamed {
                    old_name,
                    new_name,
                    success,
                }
            }

            ApiRequest::SetTtl { key, seconds } => {
                let success = client.set_ttl(&key, seconds).await;
                ApiResponse::TtlSet {
                    key,
                    seconds,
                    success,
                }
            }

            ApiRequest::PersistKey { key } => {
                let success = client.persist_key(&key).await;
                ApiResponse::KeyPersisted { key, success }
            }

            ApiRequest::Ping => ApiResponse::Pong {
                result: client.ping().await,
            },
        }
    }
}

/// Spawn the API service worker
pub fn spawn_api_service(
    client: KeyApiClient,
) -> (
    mpsc::UnboundedSender<ApiRequest>,
    mpsc::UnboundedReceiver<ApiResponse>,
) {
    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<ApiRequest>();
    let (response_tx, response_rx) = mpsc::unbounded_channel::<ApiResponse>();
    let (completion_tx, mut completion_rx) = mpsc::unbounded_channel::<InternalMessage>();

    tokio::spawn(async move {
        let mut service = ApiService::new(client, response_tx, completion_tx);

        // Ticker for processing queue
        let mut tick = interval(Duration::from_millis(10));

        loop {
            tokio::select! {
                request = request_rx.recv() => {
                    match request {
                        Some(request) => service.enqueue(request),
                        // UI dropped its sender, shut down
                        None => break,
                    }
                }

                Some(InternalMessage::Completed(id)) = completion_rx.recv() => {
                    service.in_flight.remove(&id);
                }

                _ = tick.tick() => {
                    for _ in 0..service.max_concurrent {
                        if service.request_queue.is_empty() {
                            break;
                        }
                        service.process_next();
                    }
                }
            }
        }

        tracing::debug!("API service stopped");
    });

    (request_tx, response_rx)
}
