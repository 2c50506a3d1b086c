use reqwest::{Response, StatusCode};

/// Failure of a call to an external generation, synthesis or transcription service.
///
/// None of these are retried; callers turn them into a generic failure response.
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("{service} is not configured: missing API key")]
    NotConfigured { service: &'static str },
    #[error("request to {service} failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        service: &'static str,
        status: StatusCode,
        body: String,
    },
    #[error("{service} returned an unexpected body: {reason}")]
    InvalidBody {
        service: &'static str,
        reason: String,
    },
}

impl CollaboratorError {
    pub(crate) fn transport(service: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| Self::Transport { service, source }
    }

    pub(crate) fn invalid_body(service: &'static str, reason: impl ToString) -> Self {
        Self::InvalidBody {
            service,
            reason: reason.to_string(),
        }
    }
}

/// Passes 2xx responses through and turns anything else into [`CollaboratorError::Status`].
pub(crate) async fn ensure_success(
    service: &'static str,
    response: Response,
) -> Result<Response, CollaboratorError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(CollaboratorError::Status {
        service,
        status,
        body,
    })
}
