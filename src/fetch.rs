//! Bounded HTTP body reads shared by feed fetching and image resolution.
//!
//! Reading a body without a cap lets one hostile or broken server buffer
//! arbitrary data into the run; every response body goes through
//! [`read_limited_bytes`] instead of `bytes()`/`text()`.

use futures::StreamExt;
use thiserror::Error;

/// Maximum bytes accepted for any response body (10MB).
pub const MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum BodyError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("response too large")]
    TooLarge,
}

/// Stream a response body into memory, failing once it exceeds `limit`.
///
/// A truthful `Content-Length` header fails fast; a chunked or lying
/// response is cut off as soon as the running total passes the limit.
pub async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, BodyError> {
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(BodyError::TooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(BodyError::TooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve(body: Vec<u8>) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn body_within_limit_is_read() {
        let server = serve(vec![b'a'; 1024]).await;
        let response = reqwest::get(server.uri()).await.unwrap();

        let bytes = read_limited_bytes(response, 2048).await.unwrap();
        assert_eq!(bytes.len(), 1024);
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let server = serve(vec![b'a'; 4096]).await;
        let response = reqwest::get(server.uri()).await.unwrap();

        let result = read_limited_bytes(response, 1024).await;
        assert!(matches!(result, Err(BodyError::TooLarge)));
    }

    #[tokio::test]
    async fn body_exactly_at_limit_is_read() {
        let server = serve(vec![b'a'; 1024]).await;
        let response = reqwest::get(server.uri()).await.unwrap();

        let bytes = read_limited_bytes(response, 1024).await.unwrap();
        assert_eq!(bytes.len(), 1024);
    }
}
