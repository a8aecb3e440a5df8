use std::net::IpAddr;

use crate::error::{AlertError, AuthFailure};

/// Length of the authentication prefix on every inbound packet.
pub const AUTH_CODE_LEN: usize = 4;

/// Gate in front of the pipeline: a packet is accepted only if its 4-byte
/// prefix matches the configured secret AND the sender host is on the
/// allow-list. The two predicates are independent and both are always
/// evaluated, so the log can name the check that failed.
#[derive(Debug, Clone)]
pub struct Authenticator {
    secret: [u8; AUTH_CODE_LEN],
    allowed_hosts: Vec<IpAddr>,
}

impl Authenticator {
    pub fn new(secret: [u8; AUTH_CODE_LEN], allowed_hosts: Vec<IpAddr>) -> Self {
        Self {
            secret,
            allowed_hosts,
        }
    }

    /// Byte-exact comparison of the packet prefix against the secret.
    /// Packets shorter than the prefix fail.
    fn code_matches(&self, raw: &[u8]) -> bool {
        raw.len() >= AUTH_CODE_LEN && raw[..AUTH_CODE_LEN] == self.secret
    }

    fn host_allowed(&self, peer: IpAddr) -> bool {
        self.allowed_hosts.contains(&peer)
    }

    /// Full check, reporting which predicate rejected the packet.
    pub fn verify(&self, raw: &[u8], peer: IpAddr) -> Result<(), AlertError> {
        let code_ok = self.code_matches(raw);
        let host_ok = self.host_allowed(peer);
        let reason = match (code_ok, host_ok) {
            (true, true) => return Ok(()),
            (false, true) => AuthFailure::BadCode,
            (true, false) => AuthFailure::DisallowedHost,
            (false, false) => AuthFailure::BadCodeAndHost,
        };
        Err(AlertError::Authentication { reason })
    }

    pub fn authenticate(&self, raw: &[u8], peer: IpAddr) -> bool {
        self.verify(raw, peer).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use crate::error::{AlertError, AuthFailure};

    use super::Authenticator;

    fn localhost() -> IpAddr {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    }

    fn authenticator() -> Authenticator {
        Authenticator::new(*b"1111", vec![localhost()])
    }

    #[test]
    fn accepts_matching_code_from_allowed_host() {
        assert!(authenticator().authenticate(b"1111payload", localhost()));
    }

    #[test]
    fn rejects_wrong_code() {
        let err = authenticator()
            .verify(b"ABCDpayload", localhost())
            .expect_err("wrong code must be rejected");
        match err {
            AlertError::Authentication { reason } => assert_eq!(reason, AuthFailure::BadCode),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_disallowed_host_even_with_correct_code() {
        let stranger = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5));
        let err = authenticator()
            .verify(b"1111payload", stranger)
            .expect_err("unknown host must be rejected");
        match err {
            AlertError::Authentication { reason } => {
                assert_eq!(reason, AuthFailure::DisallowedHost);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reports_both_failures_when_both_checks_fail() {
        let stranger = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5));
        let err = authenticator()
            .verify(b"ABCDpayload", stranger)
            .expect_err("must be rejected");
        match err {
            AlertError::Authentication { reason } => {
                assert_eq!(reason, AuthFailure::BadCodeAndHost);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_packet_shorter_than_the_prefix() {
        assert!(!authenticator().authenticate(b"11", localhost()));
    }
}
