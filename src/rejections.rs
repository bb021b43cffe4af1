use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::sheets::SheetError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Internal(&'static str),

    #[error("{0}")]
    Input(&'static str),

    #[error("UNAUTHORIZED")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    UpgradeRequired(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Input(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::UpgradeRequired(_) => StatusCode::UPGRADE_REQUIRED,
        };

        (status, self.to_string()).into_response()
    }
}

impl From<SheetError> for AppError {
    fn from(err: SheetError) -> Self {
        match err {
            SheetError::Format(_) => {
                tracing::warn!("{err}");
                AppError::UnsupportedFormat(err.to_string())
            }
            SheetError::Permission(_) => {
                tracing::warn!("{err}");
                AppError::Forbidden(err.to_string())
            }
            SheetError::NeedsUpdate { .. } => {
                tracing::info!("{err}");
                AppError::UpgradeRequired(err.to_string())
            }
            SheetError::Submission(message) => {
                tracing::warn!("{err}");
                AppError::Input(message)
            }
            SheetError::Encoding(e) => {
                tracing::error!("could not encode response: {e}");
                AppError::Internal("INTERNAL_SERVER_ERROR")
            }
            SheetError::Store(report) => {
                tracing::error!("spreadsheet store failed: {report:?}");
                AppError::Internal("INTERNAL_SERVER_ERROR")
            }
        }
    }
}

/// Logs an error and turns it into an [`AppError`] carrying `message`.
pub trait ResultExt<T> {
    fn reject(self, message: &'static str) -> Result<T, AppError>;

    fn reject_input(self, message: &'static str) -> Result<T, AppError>;
}

impl<T, E: Display> ResultExt<T> for Result<T, E> {
    fn reject(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{message}: {e}");
            AppError::Internal(message)
        })
    }

    fn reject_input(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::warn!("{message}: {e}");
            AppError::Input(message)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_errors_map_to_status_codes() {
        let cases = [
            (SheetError::Format("bad"), StatusCode::UNSUPPORTED_MEDIA_TYPE),
            (
                SheetError::Permission("document x".to_string()),
                StatusCode::FORBIDDEN,
            ),
            (
                SheetError::NeedsUpdate {
                    client: 1,
                    minimal: 2,
                },
                StatusCode::UPGRADE_REQUIRED,
            ),
            (
                SheetError::Submission("question number out of range"),
                StatusCode::BAD_REQUEST,
            ),
            (
                SheetError::Encoding(serde_json::from_str::<i64>("x").unwrap_err()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                SheetError::Store(color_eyre::eyre::eyre!("disk full")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn reject_input_is_bad_request() {
        let parsed: Result<i64, AppError> = "x".parse::<i64>().reject_input("not a number");
        let err = parsed.unwrap_err();
        assert!(matches!(err, AppError::Input("not a number")));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
