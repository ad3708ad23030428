use crate::error::AccountError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uniform response wrapper of every operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub id: u64,
    pub result: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Envelope {
    pub fn success(id: u64, message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            id,
            result: true,
            message: message.into(),
            data,
        }
    }

    pub fn failure(id: u64, err: &AccountError) -> Self {
        Self {
            id,
            result: false,
            message: err.to_string(),
            data: None,
        }
    }
}

/// An envelope paired with the HTTP status it is served with.
#[derive(Debug)]
pub(crate) struct Reply {
    status: StatusCode,
    envelope: Envelope,
}

impl Reply {
    pub(crate) fn new(id: u64, outcome: Result<Envelope, AccountError>) -> Self {
        match outcome {
            Ok(envelope) => Self {
                status: StatusCode::OK,
                envelope,
            },
            Err(err) => {
                tracing::warn!("request {id} rejected: {err}");
                Self {
                    status: err.status_code(),
                    envelope: Envelope::failure(id, &err),
                }
            }
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_is_omitted_when_absent() {
        let envelope = Envelope::success(3, "done", None);

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"id": 3, "result": true, "message": "done"})
        );
    }

    #[test]
    fn test_failure_carries_error_message() {
        let envelope = Envelope::failure(9, &AccountError::NotFound("42".into()));

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"id": 9, "result": false, "message": "account 42 doesn't exist"})
        );
    }

    #[test]
    fn test_reply_status_follows_error_kind() {
        let reply = Reply::new(1, Err(AccountError::AlreadyExists("42".into())));
        assert_eq!(reply.status, StatusCode::CONFLICT);
        assert!(!reply.envelope.result);
        assert_eq!(reply.envelope.id, 1);

        let reply = Reply::new(2, Ok(Envelope::success(2, "ok", Some(json!([])))));
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.envelope.data, Some(json!([])));
    }
}
