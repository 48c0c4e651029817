//! Request/response bridge between the panel and the page it analyzes.
//!
//! The content side owns the page and runs extractions on request; the panel
//! side asks for a record and falls back to the cached one when the round
//! trip fails.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::error::{Result, ScoutError};
use crate::models::PropertyRecord;
use crate::scrapers::{Extractor, PageSource};
use crate::store::LocalStore;

const CHANNEL_CAPACITY: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    ScrapePropertyData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    #[serde(default)]
    pub data: Option<PropertyRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn ok(record: PropertyRecord) -> Self {
        Self {
            success: true,
            data: Some(record),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

struct Envelope {
    request: Request,
    reply: oneshot::Sender<Response>,
}

/// Content side: answers requests against one page.
pub struct ContentAgent {
    extractor: Arc<Extractor>,
    page: Arc<dyn PageSource>,
    store: Arc<LocalStore>,
}

impl ContentAgent {
    pub fn new(extractor: Arc<Extractor>, page: Arc<dyn PageSource>, store: Arc<LocalStore>) -> Self {
        Self {
            extractor,
            page,
            store,
        }
    }

    /// Run the agent on its own task. It stops once every handle is dropped.
    pub fn spawn(self, request_timeout: Duration) -> AgentHandle {
        let (tx, mut rx) = mpsc::channel::<Envelope>(CHANNEL_CAPACITY);

        tokio::spawn(async move {
            while let Some(Envelope { request, reply }) = rx.recv().await {
                let response = self.handle(request).await;
                if reply.send(response).is_err() {
                    debug!("Requester went away before the reply");
                }
            }
            debug!("Content agent for {} stopped", self.page.url());
        });

        AgentHandle {
            tx,
            timeout: request_timeout,
        }
    }

    pub async fn handle(&self, request: Request) -> Response {
        match request {
            Request::ScrapePropertyData => self.scrape().await,
        }
    }

    async fn scrape(&self) -> Response {
        match self.extractor.extract(self.page.as_ref()).await {
            Ok(record) => {
                if let Err(e) = self.store.cache_record(&record).await {
                    warn!("Failed to cache scraped record: {}", e);
                }
                Response::ok(record)
            }
            Err(e) => {
                warn!("Scrape failed: {}", e);
                Response::failed(e.to_string())
            }
        }
    }
}

/// Panel side of the bridge.
#[derive(Clone)]
pub struct AgentHandle {
    tx: mpsc::Sender<Envelope>,
    timeout: Duration,
}

impl AgentHandle {
    /// One round trip. Fails with [`ScoutError::Messaging`] when the agent is
    /// gone or does not answer within the request timeout.
    pub async fn send(&self, request: Request) -> Result<Response> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Envelope { request, reply })
            .await
            .map_err(|_| ScoutError::Messaging("content agent is not running".to_string()))?;

        match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(_)) => Err(ScoutError::Messaging(
                "content agent dropped the request".to_string(),
            )),
            Err(_) => Err(ScoutError::Messaging(format!(
                "no response within {}ms",
                self.timeout.as_millis()
            ))),
        }
    }

    /// A live record if the agent produces one, else the cached record.
    pub async fn load_record(&self, store: &LocalStore) -> Result<PropertyRecord> {
        match self.send(Request::ScrapePropertyData).await {
            Ok(Response {
                success: true,
                data: Some(record),
                ..
            }) => return Ok(record),
            Ok(response) => warn!(
                "Scrape unsuccessful: {}",
                response.error.as_deref().unwrap_or("no data returned")
            ),
            Err(e) => warn!("{}", e),
        }

        match store.cached_record().await {
            Ok(Some(record)) => {
                info!("Using cached {} record from {}", record.source, record.timestamp);
                Ok(record)
            }
            Ok(None) => Err(ScoutError::NoPropertyData),
            Err(e) => {
                warn!("Cached record unreadable: {}", e);
                Err(ScoutError::NoPropertyData)
            }
        }
    }
}
