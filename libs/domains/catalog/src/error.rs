use axum::{
    extract::rejection::QueryRejection,
    response::{IntoResponse, Response},
};
use axum_helpers::AppError;
use database::DatabaseError;
use std::borrow::Cow;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid query: {0}")]
    Query(#[from] QueryRejection),

    #[error("{0}")]
    Storage(#[from] DatabaseError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// A `limit` below 1, reported like any other field violation
    pub fn invalid_limit(limit: i64) -> Self {
        let mut error = ValidationError::new("range")
            .with_message(Cow::Borrowed("must be greater than or equal to 1"));
        error.add_param(Cow::Borrowed("min"), &1);
        error.add_param(Cow::Borrowed("value"), &limit);

        let mut errors = ValidationErrors::new();
        errors.add("limit", error);
        CatalogError::Validation(errors)
    }
}

/// Convert CatalogError to AppError for standardized error responses
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(errors) => AppError::ValidationError(errors),
            CatalogError::Query(rejection) => AppError::QueryRejection(rejection),
            CatalogError::Storage(e @ DatabaseError::Unavailable(_)) => {
                AppError::DatabaseUnavailable(e.to_string())
            }
            CatalogError::Storage(e) => AppError::Database(e.to_string()),
            CatalogError::Serialization(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
