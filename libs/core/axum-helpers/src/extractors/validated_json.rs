//! JSON extractor that validates the body against a [`Schema`].

use crate::errors::AppError;
use crate::schema::Schema;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// JSON extractor with total schema validation.
///
/// The body is parsed as untyped JSON first, then handed to
/// [`Schema::from_value`] so every bad field is reported in one 422 response.
/// Malformed JSON or a wrong content type is rejected before validation.
///
/// # Example
/// ```ignore
/// use axum::{Router, routing::post};
/// use axum_helpers::extractors::ValidatedJson;
///
/// async fn create_inquiry(ValidatedJson(payload): ValidatedJson<Inquiry>) -> String {
///     format!("Inquiry from {}", payload.name)
/// }
///
/// let app = Router::new().route("/inquiries", post(create_inquiry));
/// ```
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: Schema,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        T::from_value(&raw)
            .map(ValidatedJson)
            .map_err(|e| AppError::ValidationError(e).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldReader;
    use axum::{
        Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode, header},
        routing::post,
    };
    use http_body_util::BodyExt;
    use serde_json::{Map, json};
    use tower::ServiceExt;
    use validator::ValidationErrors;

    struct Greeting {
        name: String,
    }

    impl Schema for Greeting {
        fn from_object(raw: &Map<String, Value>) -> Result<Self, ValidationErrors> {
            let mut r = FieldReader::new(raw);
            let name = r.required_text("name");
            r.finish(|| Some(Greeting { name: name? }))
        }
    }

    async fn greet(ValidatedJson(greeting): ValidatedJson<Greeting>) -> String {
        format!("hello {}", greeting.name)
    }

    fn app() -> Router {
        Router::new().route("/greet", post(greet))
    }

    fn json_request(body: &str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method("POST")
            .uri("/greet")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_reaches_handler() {
        let response = app()
            .oneshot(json_request(r#"{"name":"Sari"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"hello Sari");
    }

    #[tokio::test]
    async fn test_invalid_body_is_unprocessable() {
        let response = app().oneshot(json_request(r#"{"name":""}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["details"]["name"][0]["code"], json!("length"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected_before_validation() {
        let response = app().oneshot(json_request("{not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
