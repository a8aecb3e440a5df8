use crate::{auth::AUTH_CODE_LEN, error::AlertError};

/// Strips the authentication prefix and decodes the remainder as UTF-8.
///
/// Precondition: the packet already passed [`crate::auth::Authenticator`].
/// The transport pads packets with spaces to a fixed size; that padding is
/// preserved verbatim here and tolerated downstream by the classifier.
pub fn extract(raw: &[u8]) -> Result<String, AlertError> {
    let body = raw.get(AUTH_CODE_LEN..).unwrap_or_default();
    let text = std::str::from_utf8(body)?;
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::extract;
    use crate::error::AlertError;

    #[test]
    fn drops_the_auth_prefix() {
        let text = extract(b"1111Flood warning").expect("valid packet");
        assert_eq!(text, "Flood warning");
    }

    #[test]
    fn preserves_transport_padding() {
        let mut packet = b"1111Flood warning".to_vec();
        packet.resize(64, b' ');
        let text = extract(&packet).expect("valid packet");
        assert!(text.starts_with("Flood warning"));
        assert_eq!(text.len(), 64 - 4);
        assert!(text.ends_with(' '));
    }

    #[test]
    fn rejects_invalid_utf8() {
        let packet = [b'1', b'1', b'1', b'1', 0xff, 0xfe];
        match extract(&packet) {
            Err(AlertError::Decode(_)) => {}
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn prefix_only_packet_decodes_to_empty_text() {
        let text = extract(b"1111").expect("valid packet");
        assert!(text.is_empty());
    }
}
