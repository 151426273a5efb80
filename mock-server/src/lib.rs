//! In-memory stand-in for the Bemfa topic API.
//!
//! Every endpoint answers `200` with the broker's `{code, message, data}`
//! envelope; failures are reported through `code`, the way the real
//! service does it.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const CODE_OK: i64 = 0;
pub const CODE_UID_ERROR: i64 = 40004;
pub const CODE_TOPIC_NOT_FOUND: i64 = 40005;
pub const CODE_TOPIC_EXISTS: i64 = 40006;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Topic {
    pub topic: String,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope {
    pub code: i64,
    pub message: String,
    pub data: Option<Vec<Topic>>,
}

impl Envelope {
    fn ok(data: Option<Vec<Topic>>) -> Self {
        Self {
            code: CODE_OK,
            message: "OK".to_string(),
            data,
        }
    }

    fn error(code: i64, message: &str) -> Self {
        Self {
            code,
            message: message.to_string(),
            data: None,
        }
    }
}

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub uid: String,
}

#[derive(Deserialize)]
pub struct TopicForm {
    #[serde(default)]
    pub uid: String,
    pub topic: String,
    #[serde(rename = "type")]
    pub kind: u8,
    pub name: Option<String>,
}

/// uid -> topic -> display name
pub type Db = Arc<RwLock<HashMap<String, BTreeMap<String, String>>>>;

pub fn app() -> Router {
    app_with_state(Db::default())
}

/// Router over caller-provided state, so tests can seed or inspect it.
pub fn app_with_state(db: Db) -> Router {
    Router::new()
        .route("/va/alltopic", get(list_topics))
        .route("/va/addtopic", post(create_topic))
        .route("/va/setName", post(rename_topic))
        .route("/va/deltopic", post(delete_topic))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_topics(State(db): State<Db>, Query(query): Query<ListQuery>) -> Json<Envelope> {
    if query.uid.is_empty() {
        return Json(Envelope::error(CODE_UID_ERROR, "uid error"));
    }
    let db = db.read().await;
    let topics = db
        .get(&query.uid)
        .map(|topics| {
            topics
                .iter()
                .map(|(topic, name)| Topic {
                    topic: topic.clone(),
                    name: name.clone(),
                })
                .collect()
        })
        .unwrap_or_default();
    Json(Envelope::ok(Some(topics)))
}

async fn create_topic(State(db): State<Db>, Form(form): Form<TopicForm>) -> Json<Envelope> {
    if form.uid.is_empty() {
        return Json(Envelope::error(CODE_UID_ERROR, "uid error"));
    }
    let mut db = db.write().await;
    let topics = db.entry(form.uid).or_default();
    if topics.contains_key(&form.topic) {
        return Json(Envelope::error(CODE_TOPIC_EXISTS, "topic exists"));
    }
    tracing::debug!(topic = %form.topic, kind = form.kind, "topic created");
    topics.insert(form.topic, form.name.unwrap_or_default());
    Json(Envelope::ok(None))
}

async fn rename_topic(State(db): State<Db>, Form(form): Form<TopicForm>) -> Json<Envelope> {
    let mut db = db.write().await;
    let Some(name) = db
        .get_mut(&form.uid)
        .and_then(|topics| topics.get_mut(&form.topic))
    else {
        return Json(Envelope::error(CODE_TOPIC_NOT_FOUND, "topic not found"));
    };
    *name = form.name.unwrap_or_default();
    Json(Envelope::ok(None))
}

async fn delete_topic(State(db): State<Db>, Form(form): Form<TopicForm>) -> Json<Envelope> {
    let mut db = db.write().await;
    match db.get_mut(&form.uid).and_then(|topics| topics.remove(&form.topic)) {
        Some(_) => Json(Envelope::ok(None)),
        None => Json(Envelope::error(CODE_TOPIC_NOT_FOUND, "topic not found")),
    }
}
