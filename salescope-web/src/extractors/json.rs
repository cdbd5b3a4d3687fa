use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::errors::WebError;

/// JSON body extractor whose rejections are `VALIDATION_ERROR` responses.
///
/// An empty body is read as `{}` so that endpoints whose fields are all
/// optional accept bodiless POSTs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| WebError::bad_request(rejection.body_text()))?;

        let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        serde_json::from_slice(body).map(ValidatedJson).map_err(|err| {
            tracing::debug!(error = %err, "Rejected malformed JSON body");
            WebError::validation(None, format!("Invalid request body: {err}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, response::IntoResponse, routing::post, Router};
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Payload {
        #[serde(default)]
        page: i64,
    }

    async fn echo(ValidatedJson(payload): ValidatedJson<Payload>) -> impl IntoResponse {
        payload.page.to_string()
    }

    async fn send(body: &'static str) -> StatusCode {
        let app = Router::new().route("/", post(echo));
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        app.oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_valid_and_empty_bodies() {
        assert_eq!(send(r#"{"page": 3}"#).await, StatusCode::OK);
        assert_eq!(send("").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_body_is_validation_error() {
        assert_eq!(send("{not json").await, StatusCode::BAD_REQUEST);
        assert_eq!(send(r#"{"page": "x"}"#).await, StatusCode::BAD_REQUEST);
        assert_eq!(send(r#"{"unexpected": 1}"#).await, StatusCode::BAD_REQUEST);
    }
}
