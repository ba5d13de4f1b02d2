//! Status classification shared by the reqwest transports.

use reqwest::{Response, StatusCode};
use serde::Deserialize;

use crate::ProviderError;

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Pulls `error.message` out of a provider error body.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ApiErrorEnvelope>(body).ok()?;
    Some(parsed.error.message)
}

pub(crate) fn classify_status(status: StatusCode, message: String) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::authentication(message),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ProviderError::timeout(message)
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ProviderError::invalid_request(message)
        }
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
            ProviderError::unavailable(message)
        }
        _ => ProviderError::transport(message),
    }
}

pub(crate) async fn parse_error(provider: &str, response: Response) -> ProviderError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(&body)
        .unwrap_or_else(|| format!("{provider} request failed with status {status}"));

    classify_status(status, message)
}

pub(crate) fn map_send_error(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::timeout(error.to_string())
    } else {
        ProviderError::transport(error.to_string())
    }
}

/// Reads a success body, treating undecodable payloads as protocol errors.
pub(crate) async fn decode_body<T>(response: Response) -> Result<T, ProviderError>
where
    T: serde::de::DeserializeOwned,
{
    let bytes = response.bytes().await.map_err(map_send_error)?;
    serde_json::from_slice(&bytes).map_err(|error| {
        ProviderError::protocol(format!("response body could not be decoded: {error}"))
    })
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::{classify_status, extract_error_message};
    use crate::ProviderErrorKind;

    #[test]
    fn statuses_map_to_error_kinds() {
        let cases = [
            (StatusCode::UNAUTHORIZED, ProviderErrorKind::Authentication),
            (StatusCode::FORBIDDEN, ProviderErrorKind::Authentication),
            (StatusCode::TOO_MANY_REQUESTS, ProviderErrorKind::RateLimited),
            (StatusCode::GATEWAY_TIMEOUT, ProviderErrorKind::Timeout),
            (StatusCode::UNPROCESSABLE_ENTITY, ProviderErrorKind::InvalidRequest),
            (StatusCode::BAD_GATEWAY, ProviderErrorKind::Unavailable),
            (StatusCode::INTERNAL_SERVER_ERROR, ProviderErrorKind::Transport),
        ];

        for (status, kind) in cases {
            assert_eq!(classify_status(status, "boom".to_string()).kind, kind);
        }
    }

    #[test]
    fn error_message_is_read_from_envelope() {
        assert_eq!(
            extract_error_message(r#"{"error":{"message":"quota exceeded","code":429}}"#),
            Some("quota exceeded".to_string())
        );
        assert_eq!(extract_error_message("not json"), None);
    }
}
