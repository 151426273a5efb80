//! Wire DTOs for the Bemfa topic API.
//!
//! # Design
//! These mirror the broker's JSON envelope but are defined independently
//! from the mock-server crate. Integration tests catch schema drift.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Topic key to display name. Ordered so logs and test output are stable.
pub type TopicMap = BTreeMap<String, String>;

/// Topic type sent with every request. `1` selects MQTT device topics.
pub const TOPIC_TYPE: u8 = 1;

/// Envelope returned by the fetch endpoint.
///
/// `code` and `message` are mandatory; a body without them is malformed.
/// `data` is `null` when the broker has nothing to report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopicListResponse {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Vec<TopicEntry>>,
}

impl TopicListResponse {
    /// The broker only vouches for `data` when it says `0` / `"OK"`.
    pub fn is_ok(&self) -> bool {
        self.code == 0 && self.message == "OK" && self.data.is_some()
    }
}

/// A single topic as listed by the broker. Extra fields are ignored.
///
/// `name` is only required for topics under our prefix, so a foreign entry
/// with a null or missing name cannot spoil the whole listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopicEntry {
    pub topic: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_with_null_data_is_not_ok() {
        let res: TopicListResponse =
            serde_json::from_str(r#"{"code":0,"message":"OK","data":null}"#).unwrap();
        assert!(res.data.is_none());
        assert!(!res.is_ok());
    }

    #[test]
    fn envelope_without_data_field_parses() {
        let res: TopicListResponse =
            serde_json::from_str(r#"{"code":40004,"message":"uid error"}"#).unwrap();
        assert_eq!(res.code, 40004);
        assert!(!res.is_ok());
    }

    #[test]
    fn envelope_requires_code() {
        let result: Result<TopicListResponse, _> =
            serde_json::from_str(r#"{"message":"OK","data":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn entry_ignores_unknown_fields() {
        let entry: TopicEntry = serde_json::from_str(
            r#"{"topic":"hass001","name":"Lamp","online":true,"unit":1}"#,
        )
        .unwrap();
        assert_eq!(entry.topic, "hass001");
        assert_eq!(entry.name.as_deref(), Some("Lamp"));
    }

    #[test]
    fn entry_name_may_be_null_or_missing() {
        let null: TopicEntry = serde_json::from_str(r#"{"topic":"Q.y","name":null}"#).unwrap();
        let missing: TopicEntry = serde_json::from_str(r#"{"topic":"Q.y"}"#).unwrap();
        assert!(null.name.is_none());
        assert!(missing.name.is_none());
    }

    #[test]
    fn ok_requires_code_message_and_data() {
        let ok = TopicListResponse {
            code: 0,
            message: "OK".to_string(),
            data: Some(Vec::new()),
        };
        assert!(ok.is_ok());
        assert!(!TopicListResponse { code: 1, ..ok.clone() }.is_ok());
        assert!(!TopicListResponse {
            message: "ok".to_string(),
            ..ok
        }
        .is_ok());
    }
}
