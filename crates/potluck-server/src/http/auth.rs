//! Slack request-signature verification.
//!
//! The signature base string is `v0:<timestamp>:<raw body>`; its HMAC-SHA256
//! under the app's signing secret, hex-encoded and prefixed with `v0=`, must
//! match the `x-slack-signature` header. Verification failure is a boolean,
//! never a panic, and callers must short-circuit the request with 401 on
//! `false` before any further processing.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_PREFIX: &str = "v0=";

/// Reject requests whose timestamp strays more than this from server time,
/// bounding the replay window.
pub const MAX_TIMESTAMP_SKEW_SECS: i64 = 300;

/// Constant-time verification of a signature header against the raw body.
/// A missing/empty secret, malformed header, or bad hex all verify as
/// `false`.
pub fn verify(timestamp: &str, body: &[u8], signature_header: &str, secret: &[u8]) -> bool {
    if secret.is_empty() {
        return false;
    }

    let Some(signature_hex) = signature_header.strip_prefix(SIGNATURE_PREFIX) else {
        return false;
    };
    let Ok(signature) = hex::decode(signature_hex) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return false;
    };
    mac.update(b"v0:");
    mac.update(timestamp.as_bytes());
    mac.update(b":");
    mac.update(body);

    mac.verify_slice(&signature).is_ok()
}

/// Whether a timestamp header is parseable and within the replay window.
pub fn fresh(timestamp: &str, now_unix: i64) -> bool {
    match timestamp.parse::<i64>() {
        Ok(ts) => (now_unix - ts).abs() <= MAX_TIMESTAMP_SKEW_SECS,
        Err(_) => false,
    }
}

/// Produce the signature header value for a timestamp + body. The inverse of
/// [`verify`]; used by tests to build authentic requests.
#[cfg(test)]
pub fn sign(timestamp: &str, body: &[u8], secret: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(b"v0:");
    mac.update(timestamp.as_bytes());
    mac.update(b":");
    mac.update(body);
    format!("{}{}", SIGNATURE_PREFIX, hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"8f742231b10e8888abcd99yyyzzz85a5";
    const TS: &str = "1531420618";
    const BODY: &[u8] = b"token=xyzz0WbapA4vBCDEFasx0q6G&channel_id=C2147483705";

    #[test]
    fn signed_request_verifies() {
        let header = sign(TS, BODY, SECRET);
        assert!(verify(TS, BODY, &header, SECRET));
    }

    #[test]
    fn single_byte_body_mutation_fails() {
        let header = sign(TS, BODY, SECRET);
        let mut tampered = BODY.to_vec();
        tampered[0] ^= 1;
        assert!(!verify(TS, &tampered, &header, SECRET));
    }

    #[test]
    fn timestamp_mismatch_fails() {
        let header = sign(TS, BODY, SECRET);
        assert!(!verify("1531420619", BODY, &header, SECRET));
    }

    #[test]
    fn wrong_secret_fails() {
        let header = sign(TS, BODY, SECRET);
        assert!(!verify(TS, BODY, &header, b"another-secret"));
    }

    #[test]
    fn missing_version_prefix_fails() {
        let header = sign(TS, BODY, SECRET);
        assert!(!verify(TS, BODY, header.trim_start_matches("v0="), SECRET));
    }

    #[test]
    fn malformed_hex_fails_without_panicking() {
        assert!(!verify(TS, BODY, "v0=not-hex-at-all", SECRET));
    }

    #[test]
    fn empty_secret_or_header_fails() {
        let header = sign(TS, BODY, SECRET);
        assert!(!verify(TS, BODY, &header, b""));
        assert!(!verify(TS, BODY, "", SECRET));
    }

    #[test]
    fn freshness_window() {
        assert!(fresh("1000000000", 1_000_000_000));
        assert!(fresh("1000000000", 1_000_000_000 + MAX_TIMESTAMP_SKEW_SECS));
        assert!(!fresh("1000000000", 1_000_000_000 + MAX_TIMESTAMP_SKEW_SECS + 1));
        assert!(!fresh("yesterday", 1_000_000_000));
    }
}
