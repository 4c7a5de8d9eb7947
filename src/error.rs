/*
 * Responsibility
 * - Application-wide AppError
 * - IntoResponse: HTTP status + JSON body {status_code, message}
 * - Conversions from service errors (credentials, token issuance)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::TokenIssueError;
use crate::services::credentials::CredentialError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status_code: u16,
    pub message: String,
}

/// One failed constraint on a request body field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Field-level validation failures in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&FieldError> {
        self.0.first()
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    MalformedRequest(String),

    #[error("{0}")]
    EntityNotFound(String),

    #[error("{0}")]
    PasswordMismatch(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    LoginFailed(String),

    #[error("{}", .0.first().map(|e| e.message.as_str()).unwrap_or("invalid request body"))]
    InvalidBody(FieldErrors),

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedRequest(_)
            | AppError::EntityNotFound(_)
            | AppError::PasswordMismatch(_)
            | AppError::Validation(_)
            | AppError::LoginFailed(_)
            | AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            status_code: status.as_u16(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<CredentialError> for AppError {
    fn from(e: CredentialError) -> Self {
        match e {
            CredentialError::UnknownUser(username) => {
                AppError::EntityNotFound(format!("user '{username}' not found"))
            }
            CredentialError::PasswordMismatch => {
                AppError::PasswordMismatch("password does not match".into())
            }
            CredentialError::Rejected(reason) => AppError::LoginFailed(reason),
        }
    }
}

impl From<TokenIssueError> for AppError {
    fn from(_: TokenIssueError) -> Self {
        AppError::Internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn bad_request_family_maps_to_400_with_message() {
        let cases = [
            AppError::MalformedRequest("bad json".into()),
            AppError::EntityNotFound("no such user".into()),
            AppError::PasswordMismatch("wrong password".into()),
            AppError::Validation("invalid".into()),
            AppError::LoginFailed("login failed".into()),
        ];

        for err in cases {
            let expected = err.to_string();
            let (status, body) = body_json(err).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["status_code"], 400);
            assert_eq!(body["message"], expected);
        }
    }

    #[tokio::test]
    async fn invalid_body_uses_first_field_message() {
        let mut errors = FieldErrors::new();
        errors.add("username", "username is required");
        errors.add("password", "password is required");

        let (status, body) = body_json(AppError::InvalidBody(errors)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "username is required");
    }

    #[tokio::test]
    async fn auth_errors_keep_their_status() {
        let (status, body) = body_json(AppError::Unauthorized).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["status_code"], 401);

        let (status, _) = body_json(AppError::Forbidden).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = body_json(AppError::Internal).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn credential_errors_map_to_bad_request_variants() {
        let err: AppError = CredentialError::UnknownUser("bob".into()).into();
        assert!(matches!(err, AppError::EntityNotFound(ref m) if m.contains("bob")));

        let err: AppError = CredentialError::PasswordMismatch.into();
        assert!(matches!(err, AppError::PasswordMismatch(_)));

        let err: AppError = CredentialError::Rejected("account locked".into()).into();
        assert_eq!(err.to_string(), "account locked");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn field_errors_into_result() {
        assert!(FieldErrors::new().into_result().is_ok());

        let mut errors = FieldErrors::new();
        errors.add("password", "too short");
        assert_eq!(errors.clone().into_result(), Err(errors));
    }
}
