//! xAPI statements emitted by the accordion.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Verb IRI for "consumed".
pub const VERB_CONSUMED: &str = "http://activitystrea.ms/schema/1.0/consume";

/// A minimal xAPI statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XapiStatement {
    pub id: Uuid,
    pub verb: Verb,
    pub object: Activity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<XapiResult>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verb {
    pub id: String,
    /// Display names keyed by language tag.
    pub display: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "objectType")]
    pub object_type: String,
    pub id: String,
}

impl Activity {
    /// Activity identifying one piece of content.
    pub fn for_content(content_id: &str) -> Self {
        Self {
            object_type: "Activity".into(),
            id: format!("urn:h5p:content:{}", content_id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct XapiResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion: Option<bool>,
}

impl XapiStatement {
    /// Statement recording that the content was consumed (viewed to
    /// completion).
    pub fn consumed(content_id: &str) -> Self {
        let mut display = BTreeMap::new();
        display.insert("en-US".to_string(), "consumed".to_string());
        Self {
            id: Uuid::new_v4(),
            verb: Verb {
                id: VERB_CONSUMED.to_string(),
                display,
            },
            object: Activity::for_content(content_id),
            result: Some(XapiResult {
                completion: Some(true),
            }),
            timestamp: Utc::now(),
        }
    }

    pub fn verb_id(&self) -> &str {
        &self.verb.id
    }

    pub fn is_completed(&self) -> bool {
        self.result
            .and_then(|result| result.completion)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consumed_statement() {
        let statement = XapiStatement::consumed("42");
        assert_eq!(statement.verb_id(), VERB_CONSUMED);
        assert_eq!(statement.verb.display.get("en-US").map(String::as_str), Some("consumed"));
        assert_eq!(statement.object.id, "urn:h5p:content:42");
        assert!(statement.is_completed());
    }

    #[test]
    fn test_consumed_statement_json_shape() {
        let statement = XapiStatement::consumed("7");
        let json = serde_json::to_value(&statement).unwrap();
        assert_eq!(json["verb"]["id"], VERB_CONSUMED);
        assert_eq!(json["object"]["objectType"], "Activity");
        assert_eq!(json["result"]["completion"], true);
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_statement_ids_are_unique() {
        let a = XapiStatement::consumed("1");
        let b = XapiStatement::consumed("1");
        assert_ne!(a.id, b.id);
    }
}
