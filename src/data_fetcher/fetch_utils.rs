//! Request sending and response classification shared by every endpoint.
//!
//! Requests are sent once. Failures are mapped to `AppError` and returned to
//! the caller; nothing is retried or cached.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument};

use crate::error::AppError;

/// Sends `request` and returns the response body as text.
///
/// Transport failures and non-2xx statuses become the matching `AppError`
/// variant. `url` is only used for logging and error context.
#[instrument(skip(request))]
pub(crate) async fn send_request(request: RequestBuilder, url: &str) -> Result<String, AppError> {
    info!("Requesting {url}");

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            error!("Request failed for URL {}: {}", url, e);
            return if e.is_timeout() {
                Err(AppError::network_timeout(url))
            } else if e.is_connect() {
                Err(AppError::network_connection(url, e.to_string()))
            } else {
                Err(AppError::ApiFetch(e))
            };
        }
    };

    let status = response.status();
    debug!("Response status: {status}");
    debug!("Response headers: {:?}", response.headers());

    if !status.is_success() {
        let status_code = status.as_u16();
        let reason = status.canonical_reason().unwrap_or("Unknown error");

        error!("HTTP {} - {} (URL: {})", status_code, reason, url);

        return Err(error_for_status(status_code, reason, url));
    }

    let response_text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read response text from URL {}: {}", url, e);
            return Err(AppError::ApiFetch(e));
        }
    };

    debug!("Response length: {} bytes", response_text.len());
    let preview: String = response_text.chars().take(1024).collect();
    debug!("Response text (first 1024 chars): {preview}");

    Ok(response_text)
}

/// Maps a non-success HTTP status to its error variant.
pub(crate) fn error_for_status(status_code: u16, reason: &str, url: &str) -> AppError {
    match status_code {
        401 | 403 => AppError::api_unauthorized(status_code, reason, url),
        404 => AppError::api_not_found(url),
        429 => AppError::api_rate_limit(reason, url),
        400..=499 => AppError::api_client_error(status_code, reason, url),
        502 | 503 => AppError::api_service_unavailable(status_code, reason, url),
        _ => AppError::api_server_error(status_code, reason, url),
    }
}

/// Parses a JSON body, telling apart empty bodies, non-JSON bodies and JSON
/// with the wrong shape.
pub(crate) fn parse_json<T: DeserializeOwned>(response_text: &str, url: &str) -> Result<T, AppError> {
    match serde_json::from_str::<T>(response_text) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            error!("Failed to parse API response: {} (URL: {})", e, url);
            error!(
                "Response text (first 200 chars): {}",
                &response_text.chars().take(200).collect::<String>()
            );

            let trimmed = response_text.trim_start();
            if trimmed.is_empty() {
                Err(AppError::api_no_data("Response body is empty", url))
            } else if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
                Err(AppError::api_malformed_json(
                    "Response is not valid JSON",
                    url,
                ))
            } else {
                Err(AppError::api_unexpected_structure(e.to_string(), url))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::http_client::create_test_http_client;
    use serde::Deserialize;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    #[derive(Debug, Deserialize)]
    struct Probe {
        value: i32,
    }

    #[test]
    fn test_error_for_status_mapping() {
        let url = "https://api.example.com";
        assert!(matches!(error_for_status(401, "Unauthorized", url), AppError::ApiUnauthorized { .. }));
        assert!(matches!(error_for_status(403, "Forbidden", url), AppError::ApiUnauthorized { .. }));
        assert!(matches!(error_for_status(404, "Not Found", url), AppError::ApiNotFound { .. }));
        assert!(matches!(error_for_status(429, "Too Many Requests", url), AppError::ApiRateLimit { .. }));
        assert!(matches!(error_for_status(400, "Bad Request", url), AppError::ApiClientError { .. }));
        assert!(matches!(error_for_status(503, "Service Unavailable", url), AppError::ApiServiceUnavailable { .. }));
        assert!(matches!(error_for_status(500, "Internal Server Error", url), AppError::ApiServerError { .. }));
    }

    #[test]
    fn test_parse_json_classifies_failures() {
        let url = "https://api.example.com";
        assert_eq!(parse_json::<Probe>(r#"{"value": 7}"#, url).unwrap().value, 7);
        assert!(matches!(parse_json::<Probe>("", url), Err(AppError::ApiNoData { .. })));
        assert!(matches!(parse_json::<Probe>("<html></html>", url), Err(AppError::ApiMalformedJson { .. })));
        assert!(matches!(parse_json::<Probe>(r#"{"other": 1}"#, url), Err(AppError::ApiUnexpectedStructure { .. })));
    }

    #[tokio::test]
    async fn test_send_request_returns_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&mock_server)
            .await;

        let client = create_test_http_client();
        let url = format!("{}/ok", mock_server.uri());
        let body = send_request(client.get(&url), &url).await.unwrap();

        assert_eq!(body, "hello");
    }

    #[tokio::test]
    async fn test_send_request_does_not_retry_server_errors() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_http_client();
        let url = format!("{}/broken", mock_server.uri());
        let result = send_request(client.get(&url), &url).await;

        assert!(matches!(result, Err(AppError::ApiServerError { status: 500, .. })));
    }
}
