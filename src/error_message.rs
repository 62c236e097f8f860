//! The JSON body returned to clients when a request fails.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// A single error shown to the client.
///
/// Responses always carry a list of these, even when there is only one error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    /// Message intended for display, in the client's locale.
    pub msg_view: String,
    /// Diagnostic text describing the underlying error.
    pub msg_stack_trace: String,
}

impl ErrorMessage {
    pub fn new(msg_view: &str, cause: &impl std::fmt::Display) -> Self {
        Self {
            msg_view: msg_view.to_owned(),
            msg_stack_trace: cause.to_string(),
        }
    }

    /// A 400 response listing a single error.
    pub fn bad_request(msg_view: &str, cause: &impl std::fmt::Display) -> Response {
        (StatusCode::BAD_REQUEST, Json(vec![Self::new(msg_view, cause)])).into_response()
    }

    /// A 500 response listing a single error.
    pub fn internal_server_error(msg_view: &str, cause: &impl std::fmt::Display) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(vec![Self::new(msg_view, cause)]),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::ErrorMessage;

    #[test]
    fn serializes_with_camel_case_names() {
        let message = ErrorMessage::new("Mensagem inválida", &"expected value at line 1");

        let got = serde_json::to_value(vec![message]).unwrap();

        assert_eq!(
            got,
            json!([{
                "msgView": "Mensagem inválida",
                "msgStackTrace": "expected value at line 1",
            }])
        );
    }
}
