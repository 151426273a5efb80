//! Async client core for syncing topics with the Bemfa cloud broker.
//!
//! # Overview
//! Four remote calls (fetch/create/rename/delete) over a shared HTTP session
//! owned by the host. Only topics under a configured prefix are ever read or
//! written; everything else on the account is left alone.
//!
//! # Design
//! - `TopicApi` builds `HttpRequest` values and parses `HttpResponse` values
//!   without touching the network, so the wire contract is testable as data.
//! - `HttpSession` is the injected I/O seam, implemented for
//!   `reqwest::Client` (feature `reqwest`, on by default).
//! - `TopicClient` borrows a session and runs the round-trips. Fetch errors
//!   propagate; writes are fire-and-forget and report a `WriteOutcome`.
//! - `SyncPlan` / `TopicClient::sync_topics` reconcile a desired topic set
//!   with what the broker holds.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod session;
pub mod sync;
pub mod types;

pub use api::TopicApi;
pub use client::{TopicClient, WriteOutcome};
pub use config::{load_config, ClientConfig};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::HttpSession;
pub use sync::{SyncPlan, SyncReport};
pub use types::{TopicEntry, TopicListResponse, TopicMap, TOPIC_TYPE};
