//! Request signature and shared-secret checks.
//!
//! Instagram signs webhook deliveries with HMAC-SHA256 over the raw body
//! using the app secret, sent as `X-Hub-Signature-256: sha256=<hex>`. The
//! admin API compares bearer tokens against a configured secret. Both
//! comparisons are constant-time.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Prefix Instagram puts in front of the hex digest.
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Fixed key for hashing both sides of a shared-secret comparison.
const COMPARE_KEY: &[u8] = b"pasos-secret-compare";

fn hmac_sha256(key: &[u8], payload: &[u8]) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(payload);
    mac
}

/// Compute the hex-encoded HMAC-SHA256 of `payload` keyed with `secret`.
pub fn hmac_sha256_hex(secret: &str, payload: &[u8]) -> String {
    hex::encode(hmac_sha256(secret.as_bytes(), payload).finalize().into_bytes())
}

/// Verify an `X-Hub-Signature-256` header value against the raw body.
///
/// Returns `false` for a missing prefix, malformed hex, or mismatch.
pub fn verify_hub_signature(secret: &str, body: &[u8], header_value: &str) -> bool {
    let Some(provided) = header_value.trim().strip_prefix(SIGNATURE_PREFIX) else {
        return false;
    };
    let Ok(provided) = hex::decode(provided) else {
        return false;
    };
    hmac_sha256(secret.as_bytes(), body)
        .verify_slice(&provided)
        .is_ok()
}

/// Compare two secrets in constant time.
///
/// Both inputs are MACed first so the comparison length does not leak the
/// length of the configured secret.
pub fn secrets_match(provided: &str, configured: &str) -> bool {
    let expected = hmac_sha256(COMPARE_KEY, configured.as_bytes())
        .finalize()
        .into_bytes();
    hmac_sha256(COMPARE_KEY, provided.as_bytes())
        .verify_slice(&expected)
        .is_ok()
}
