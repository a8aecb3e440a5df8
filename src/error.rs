use std::{fmt, str::Utf8Error};

use thiserror::Error;

/// Which of the two authentication predicates rejected the packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    BadCode,
    DisallowedHost,
    /// Both predicates failed. Kept distinct so the listener log shows the
    /// full picture instead of whichever check happened to run first.
    BadCodeAndHost,
}

impl AuthFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthFailure::BadCode => "bad_code",
            AuthFailure::DisallowedHost => "disallowed_host",
            AuthFailure::BadCodeAndHost => "bad_code_and_host",
        }
    }
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything that can stop a packet between the socket and the scene queue.
///
/// All variants are terminal for the packet and harmless for the process:
/// the listener logs them and keeps accepting. None of them ever reach the
/// rendering boundary.
#[derive(Debug, Error)]
pub enum AlertError {
    #[error("packet rejected by authenticator: {reason}")]
    Authentication { reason: AuthFailure },

    #[error("payload is not valid UTF-8: {0}")]
    Decode(#[from] Utf8Error),

    #[error("payload decoded to an empty alert text")]
    EmptyAlert,

    #[error("scene queue receiver is gone; display task has stopped")]
    QueueClosed,
}

impl AlertError {
    pub fn kind(&self) -> &'static str {
        match self {
            AlertError::Authentication { .. } => "authentication",
            AlertError::Decode(_) => "decode",
            AlertError::EmptyAlert => "empty_alert",
            AlertError::QueueClosed => "queue_closed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AlertError, AuthFailure};

    #[test]
    fn authentication_errors_name_the_failed_check() {
        let err = AlertError::Authentication {
            reason: AuthFailure::DisallowedHost,
        };
        assert_eq!(
            err.to_string(),
            "packet rejected by authenticator: disallowed_host"
        );
        assert_eq!(err.kind(), "authentication");
    }

    #[test]
    fn each_failure_reason_has_a_stable_label() {
        assert_eq!(AuthFailure::BadCode.as_str(), "bad_code");
        assert_eq!(AuthFailure::DisallowedHost.as_str(), "disallowed_host");
        assert_eq!(AuthFailure::BadCodeAndHost.as_str(), "bad_code_and_host");
    }
}
