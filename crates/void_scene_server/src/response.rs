//! Structured responses

use crate::error::ApiError;
use serde::{Deserialize, Serialize};

/// Body of every reply: `{success, message?, error?, data?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl SceneResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn failure(err: &ApiError) -> Self {
        Self {
            success: false,
            message: Some(err.to_string()),
            error: Some(err.code().to_string()),
            data: None,
        }
    }

    /// Get a field of `data`
    pub fn data_field(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.as_ref().and_then(|d| d.get(key))
    }
}

impl From<ApiError> for SceneResponse {
    fn from(err: ApiError) -> Self {
        Self::failure(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_skips_empty_fields() {
        let text = serde_json::to_value(SceneResponse::ok("done")).unwrap();
        assert_eq!(text, json!({"success": true, "message": "done"}));
    }

    #[test]
    fn test_failure() {
        let response = SceneResponse::from(ApiError::NotFound("Node not found: A".into()));
        let text = serde_json::to_value(&response).unwrap();
        assert_eq!(
            text,
            json!({"success": false, "error": "NotFound", "message": "Node not found: A"})
        );
    }
}
