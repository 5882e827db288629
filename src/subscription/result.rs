use actix_web::http::StatusCode;

/// Failure taxonomy of a forwarded subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    InvalidInput,
    Config,
    Auth,
    UpstreamUnavailable,
    Timeout,
    AlreadySubscribed,
    InvalidEmailUpstream,
    Internal,
}

/// The normalized outcome returned to the caller.
///
/// Failure messages are fixed per category; raw upstream text is logged
/// but never surfaced for auth-related failures.
#[derive(Clone, Debug, PartialEq)]
pub enum SubscriptionResult {
    Success,
    Failure { kind: FailureKind, message: String },
}

const SUCCESS_MESSAGE: &str = "Subscription successful! Please check your inbox.";

impl SubscriptionResult {
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        SubscriptionResult::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubscriptionResult::Success)
    }

    pub fn message(&self) -> &str {
        match self {
            SubscriptionResult::Success => SUCCESS_MESSAGE,
            SubscriptionResult::Failure { message, .. } => message,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            SubscriptionResult::Success => StatusCode::OK,
            SubscriptionResult::Failure { kind, .. } => match kind {
                FailureKind::InvalidInput
                | FailureKind::AlreadySubscribed
                | FailureKind::InvalidEmailUpstream => StatusCode::BAD_REQUEST,
                FailureKind::Config | FailureKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
                FailureKind::Auth | FailureKind::UpstreamUnavailable => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                FailureKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
            },
        }
    }
}
