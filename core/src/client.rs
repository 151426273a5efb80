//! Async topic client over a borrowed HTTP session.
//!
//! # Design
//! `TopicClient` pairs a `TopicApi` with a reference to the host's shared
//! session. The read path propagates transport and format errors. The
//! write paths are fire-and-forget: they never return an error, and report
//! what happened through `WriteOutcome` so callers and tests can still tell
//! a skipped write from a swallowed failure.

use tracing::{debug, warn};

use crate::api::TopicApi;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::session::HttpSession;
use crate::types::TopicMap;

/// Result of a create/rename/delete call.
///
/// Writes are never retried and never surface as `Err`. The broker's reply
/// is not inspected, so `Sent` only means a response came back.
#[derive(Debug)]
pub enum WriteOutcome {
    /// The topic is outside the configured prefix; nothing was sent.
    Skipped,
    /// The request completed with this HTTP status.
    Sent { status: u16 },
    /// The request failed in transit. Already logged, otherwise ignored.
    Failed(ApiError),
}

impl WriteOutcome {
    pub fn was_sent(&self) -> bool {
        matches!(self, WriteOutcome::Sent { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, WriteOutcome::Skipped)
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            WriteOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Client for one broker account.
///
/// The session is owned by the host and must outlive the client. No
/// locking happens here; concurrent calls rely on the session being safe
/// to share and are not ordered relative to each other.
pub struct TopicClient<'s, S: HttpSession + ?Sized> {
    api: TopicApi,
    session: &'s S,
}

impl<'s, S: HttpSession + ?Sized> TopicClient<'s, S> {
    pub fn new(session: &'s S, user_id: &str, config: ClientConfig) -> Self {
        Self {
            api: TopicApi::new(user_id, config),
            session,
        }
    }

    pub fn user_id(&self) -> &str {
        self.api.user_id()
    }

    pub fn api(&self) -> &TopicApi {
        &self.api
    }

    /// Fetch every topic under our prefix.
    pub async fn fetch_all_topics(&self) -> Result<TopicMap, ApiError> {
        let request = self.api.build_fetch_topics();
        debug!(url = %request.url, uid = %self.user_id(), "fetching topics");
        let response = self.session.execute(&request).await?;
        self.api.parse_fetch_topics(response)
    }

    pub async fn create_topic(&self, topic: &str, name: &str) -> WriteOutcome {
        self.send_write("create", topic, self.api.build_create_topic(topic, name))
            .await
    }

    pub async fn rename_topic(&self, topic: &str, name: &str) -> WriteOutcome {
        self.send_write("rename", topic, self.api.build_rename_topic(topic, name))
            .await
    }

    pub async fn delete_topic(&self, topic: &str) -> WriteOutcome {
        self.send_write("delete", topic, self.api.build_delete_topic(topic))
            .await
    }

    async fn send_write(&self, op: &str, topic: &str, request: Option<HttpRequest>) -> WriteOutcome {
        let Some(request) = request else {
            debug!(op, topic, "topic outside prefix, skipping");
            return WriteOutcome::Skipped;
        };
        match self.session.execute(&request).await {
            Ok(response) => {
                debug!(op, topic, status = response.status, "topic write sent");
                WriteOutcome::Sent {
                    status: response.status,
                }
            }
            Err(err) => {
                warn!(op, topic, error = %err, "topic write failed, ignoring");
                WriteOutcome::Failed(err)
            }
        }
    }
}
