//! `Authorization` header encoding for token bundles.

use crate::{BundleError, BundleResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use kliento_core::AUTHORIZATION_SCHEME;

/// Encode a serialised bundle as `Kliento <base64>`.
pub(crate) fn encode(serialisation: &[u8]) -> String {
    format!("{AUTHORIZATION_SCHEME} {}", BASE64.encode(serialisation))
}

/// Decode the bundle bytes from an `Authorization` header value.
///
/// The scheme is matched case-insensitively. Values whose base64 text could
/// only decode to more than `max_octets` are rejected without decoding.
pub(crate) fn decode(header_value: &str, max_octets: usize) -> BundleResult<Vec<u8>> {
    let (scheme, encoded) = header_value.split_once(' ').unwrap_or((header_value, ""));

    if !scheme.eq_ignore_ascii_case(AUTHORIZATION_SCHEME) {
        return Err(BundleError::UnsupportedScheme(scheme.to_string()));
    }

    let max_encoded = max_octets.div_ceil(3).saturating_mul(4);
    if encoded.len() > max_encoded {
        return Err(BundleError::TooLarge {
            actual: decoded_len(encoded),
            max: max_octets,
        });
    }

    BASE64.decode(encoded).map_err(BundleError::malformed)
}

/// Length `encoded` decodes to, given valid padded base64.
fn decoded_len(encoded: &str) -> usize {
    let padding = encoded.bytes().rev().take_while(|&b| b == b'=').take(2).count();
    (encoded.len() / 4 * 3).saturating_sub(padding)
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use test_case::test_case;

    #[test_case("Kliento" ; "canonical")]
    #[test_case("kliento" ; "lowercase")]
    #[test_case("KLIENTO" ; "uppercase")]
    #[test_case("KlIeNtO" ; "mixed case")]
    fn decode___scheme_case___is_accepted(scheme: &str) {
        let header = format!("{scheme} {}", BASE64.encode(b"bundle"));

        let decoded = decode(&header, 1024).unwrap();

        assert_eq!(decoded, b"bundle");
    }

    #[test_case("Bearer abc=" ; "bearer")]
    #[test_case("Basic dXNlcjpwYXNz" ; "basic")]
    #[test_case("Klient abc=" ; "prefix of scheme")]
    #[test_case("" ; "empty header")]
    fn decode___other_scheme___returns_unsupported_scheme(header: &str) {
        let result = decode(header, 1024);

        assert!(matches!(result, Err(BundleError::UnsupportedScheme(_))));
    }

    #[test]
    fn decode___unsupported_scheme___reports_scheme() {
        let result = decode("Bearer abc=", 1024);

        match result {
            Err(BundleError::UnsupportedScheme(scheme)) => assert_eq!(scheme, "Bearer"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn decode___invalid_base64___returns_malformed() {
        let result = decode("Kliento not*base64!", 1024);

        assert!(matches!(result, Err(BundleError::Malformed(_))));
    }

    #[test]
    fn decode___double_space___returns_malformed() {
        let header = format!("Kliento  {}", BASE64.encode(b"bundle"));

        let result = decode(&header, 1024);

        assert!(matches!(result, Err(BundleError::Malformed(_))));
    }

    #[test]
    fn decode___missing_value___returns_empty_bytes() {
        let decoded = decode("Kliento", 1024).unwrap();

        assert!(decoded.is_empty());
    }

    #[test]
    fn decode___encoded_value_at_limit___is_decoded() {
        let header = encode(&[7u8; 30]);

        let decoded = decode(&header, 30).unwrap();

        assert_eq!(decoded.len(), 30);
    }

    #[test]
    fn decode___encoded_value_over_limit___returns_too_large() {
        let header = encode(&[7u8; 31]);

        let result = decode(&header, 30);

        assert!(matches!(
            result,
            Err(BundleError::TooLarge { actual: 31, max: 30 })
        ));
    }

    #[test_case(0 ; "empty")]
    #[test_case(31 ; "two padding characters")]
    #[test_case(32 ; "one padding character")]
    #[test_case(33 ; "no padding")]
    fn decoded_len___padded_base64___is_exact(len: usize) {
        let encoded = BASE64.encode(vec![0u8; len]);

        assert_eq!(decoded_len(&encoded), len);
    }

    #[test]
    fn encode___bytes___uses_kliento_scheme_and_padded_base64() {
        let header = encode(b"ab");

        assert_eq!(header, "Kliento YWI=");
    }
}
