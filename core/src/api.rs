//! Stateless request builder and response parser for the Bemfa topic API.
//!
//! # Design
//! `TopicApi` holds the user id and endpoint configuration and carries no
//! mutable state between calls. Each operation has a `build_*` method that
//! produces an `HttpRequest`; only the fetch has a `parse_*` counterpart,
//! since write responses are never inspected. Write builders return `None`
//! for topics outside our prefix, which is how the prefix guard keeps
//! foreign topics from ever reaching the wire.

use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{TopicListResponse, TopicMap, TOPIC_TYPE};

/// Synchronous, deterministic half of the topic client.
#[derive(Debug, Clone)]
pub struct TopicApi {
    user_id: String,
    config: ClientConfig,
}

impl TopicApi {
    pub fn new(user_id: &str, config: ClientConfig) -> Self {
        Self {
            user_id: user_id.to_string(),
            config,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether `topic` falls under the configured prefix.
    pub fn owns_topic(&self, topic: &str) -> bool {
        topic.starts_with(&self.config.topic_prefix)
    }

    pub fn build_fetch_topics(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.config.fetch_url(),
            query: vec![
                ("uid".to_string(), self.user_id.clone()),
                ("type".to_string(), TOPIC_TYPE.to_string()),
            ],
            form: Vec::new(),
        }
    }

    pub fn build_create_topic(&self, topic: &str, name: &str) -> Option<HttpRequest> {
        self.build_write(self.config.create_url(), topic, Some(name))
    }

    pub fn build_rename_topic(&self, topic: &str, name: &str) -> Option<HttpRequest> {
        self.build_write(self.config.rename_url(), topic, Some(name))
    }

    pub fn build_delete_topic(&self, topic: &str) -> Option<HttpRequest> {
        self.build_write(self.config.delete_url(), topic, None)
    }

    /// Turn a fetch response into the topics we own.
    ///
    /// Non-2xx is an error whatever the body says. A well-formed envelope
    /// that is not `0` / `"OK"` / non-null `data` means "no topics".
    pub fn parse_fetch_topics(&self, response: HttpResponse) -> Result<TopicMap, ApiError> {
        check_status(&response)?;
        check_content_type(&response)?;

        let envelope: TopicListResponse = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::ResponseFormat(e.to_string()))?;
        if !envelope.is_ok() {
            debug!(
                code = envelope.code,
                message = %envelope.message,
                has_data = envelope.data.is_some(),
                "broker reported no topics"
            );
            return Ok(TopicMap::new());
        }

        envelope
            .data
            .unwrap_or_default()
            .into_iter()
            .filter(|entry| self.owns_topic(&entry.topic))
            .map(|entry| match entry.name {
                Some(name) => Ok((entry.topic, name)),
                None => Err(ApiError::ResponseFormat(format!(
                    "topic {} has no name",
                    entry.topic
                ))),
            })
            .collect()
    }

    fn build_write(&self, url: String, topic: &str, name: Option<&str>) -> Option<HttpRequest> {
        if !self.owns_topic(topic) {
            return None;
        }
        let mut form = vec![
            ("uid".to_string(), self.user_id.clone()),
            ("topic".to_string(), topic.to_string()),
            ("type".to_string(), TOPIC_TYPE.to_string()),
        ];
        if let Some(name) = name {
            form.push(("name".to_string(), name.to_string()));
        }
        Some(HttpRequest {
            method: HttpMethod::Post,
            url,
            query: Vec::new(),
            form,
        })
    }
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpStatus {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Reject bodies explicitly labelled as something other than JSON.
///
/// A missing header is let through so bare test doubles and proxies that
/// strip it still work; see the content type decision in DESIGN.md.
fn check_content_type(response: &HttpResponse) -> Result<(), ApiError> {
    let Some(content_type) = response.header("content-type") else {
        return Ok(());
    };
    let mime = content_type.split(';').next().unwrap_or_default().trim();
    if mime.eq_ignore_ascii_case("application/json") {
        Ok(())
    } else {
        Err(ApiError::ResponseFormat(format!(
            "unexpected content type: {content_type}"
        )))
    }
}
