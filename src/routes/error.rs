//! The one place where failures become HTTP responses.
//!
//! Every error body has the shape `{"error": {"message": ..., "description": ...}}`,
//! `description` being present only when there is detail worth sending.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use validator::ValidationErrors;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    description: Option<Value>,
}

/// A single validation problem, pointing at the offending field.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Issue {
    pub path: String,
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            description: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn with_issues(mut self, issues: Vec<Issue>) -> Self {
        self.description = serde_json::to_value(issues).ok();
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

pub fn issues_from(errors: &ValidationErrors) -> Vec<Issue> {
    let mut issues: Vec<Issue> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let path = field.to_string();
            errs.iter().map(move |e| Issue {
                path: path.clone(),
                code: e.code.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("invalid value for `{}`", path)),
            })
        })
        .collect();
    issues.sort_by(|a, b| a.path.cmp(&b.path));
    issues
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, message = %self.message, "request failed");
        } else {
            tracing::debug!(status = %self.status, message = %self.message, "request rejected");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                message: &self.message,
                description: self.description.as_ref(),
            },
        };

        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "required"))]
        content: String,
    }

    #[test]
    fn test_issues_from_validation_errors() {
        let errors = Probe { content: String::new() }.validate().unwrap_err();
        let issues = issues_from(&errors);

        assert_eq!(
            issues,
            vec![Issue {
                path: "content".into(),
                code: "length".into(),
                message: "required".into(),
            }]
        );
    }

    #[test]
    fn test_with_issues_sets_description() {
        let err = ApiError::bad_request("bad").with_issues(vec![Issue {
            path: "content".into(),
            code: "invalid_type".into(),
            message: "expected string".into(),
        }]);

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        let description = err.description.unwrap();
        assert_eq!(description[0]["path"], "content");
    }
}
