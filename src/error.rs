use thiserror::Error;

/// Failures surfaced to the visitor as a toast. None of them are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InteractionError {
    #[error("form action `{0}` is not an http(s) URL")]
    InvalidAction(String),
    #[error("request failed: {0}")]
    Network(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("clipboard unavailable")]
    ClipboardUnavailable,
    #[error("clipboard write rejected: {0}")]
    ClipboardRejected(String),
}

impl InteractionError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidAction(_) | Self::Network(_) | Self::Status(_) => {
                "Sorry, your message could not be sent. Please try again."
            }
            Self::ClipboardUnavailable | Self::ClipboardRejected(_) => {
                "Copy failed. Please copy the text manually."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status_code() {
        assert_eq!(
            InteractionError::Status(503).to_string(),
            "server responded with status 503"
        );
    }

    #[test]
    fn clipboard_failures_share_a_message() {
        assert_eq!(
            InteractionError::ClipboardUnavailable.user_message(),
            InteractionError::ClipboardRejected("denied".into()).user_message()
        );
    }
}
