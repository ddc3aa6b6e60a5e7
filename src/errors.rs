use crate::source::LookupError;
use axum::http::StatusCode;

pub const LOOKUP_FAILED_MESSAGE: &str = "Couldn't find that user. Check the username?";
pub const LOOKUP_TIMEOUT_MESSAGE: &str = "The contributions service took too long to answer. Try again?";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

/// What the page shows for a failed lookup. Only timeouts get their own wording.
pub fn user_message(err: &LookupError) -> &'static str {
    match err {
        LookupError::Timeout(_) => LOOKUP_TIMEOUT_MESSAGE,
        LookupError::NotFound(_) | LookupError::Malformed(_) | LookupError::Network(_) => {
            LOOKUP_FAILED_MESSAGE
        }
    }
}

pub fn lookup_status(err: &LookupError) -> StatusCode {
    match err {
        LookupError::NotFound(_) => StatusCode::NOT_FOUND,
        LookupError::Malformed(_) | LookupError::Network(_) => StatusCode::BAD_GATEWAY,
        LookupError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
    }
}

impl From<LookupError> for AppError {
    fn from(err: LookupError) -> Self {
        Self {
            status: lookup_status(&err),
            message: user_message(&err).to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn lookup_errors_map_to_statuses() {
        let cases = [
            (LookupError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (LookupError::Malformed("x".into()), StatusCode::BAD_GATEWAY),
            (LookupError::Network("x".into()), StatusCode::BAD_GATEWAY),
            (LookupError::Timeout(Duration::from_secs(1)), StatusCode::GATEWAY_TIMEOUT),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status, status);
        }
    }

    #[test]
    fn only_timeouts_get_distinct_wording() {
        assert_eq!(user_message(&LookupError::Malformed("x".into())), LOOKUP_FAILED_MESSAGE);
        assert_eq!(user_message(&LookupError::Network("x".into())), LOOKUP_FAILED_MESSAGE);
        assert_eq!(
            user_message(&LookupError::Timeout(Duration::from_secs(10))),
            LOOKUP_TIMEOUT_MESSAGE
        );
    }
}
