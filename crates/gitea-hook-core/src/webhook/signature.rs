//! HMAC-SHA256 signatures as used in the `X-Gitea-Signature` header.
//!
//! Gitea signs the raw request body with the shared secret and sends the
//! digest as bare lowercase hex, without a `sha256=` prefix.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::debug;

pub use hmac::digest::InvalidLength;

type HmacSha256 = Hmac<Sha256>;

/// Compute the signature Gitea would send for `body`.
///
/// # Examples
///
/// ```rust
/// use gitea_hook_core::webhook::signature::compute_signature;
///
/// let signature = compute_signature(b"Jefe", b"what do ya want for nothing?")?;
/// assert_eq!(
///     signature,
///     "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
/// );
/// # Ok::<(), gitea_hook_core::webhook::signature::InvalidLength>(())
/// ```
///
/// # Errors
///
/// Returns [`InvalidLength`] if `secret` cannot be used as an HMAC key.
pub fn compute_signature(secret: &[u8], body: &[u8]) -> Result<String, InvalidLength> {
    let mut mac = HmacSha256::new_from_slice(secret)?;
    mac.update(body);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Check `signature` against the expected signature for `body`.
///
/// The hex text is compared as-is in constant time, so an uppercase or
/// otherwise re-encoded digest does not match. A secret that cannot key the
/// MAC never verifies.
pub fn verify_signature(secret: &[u8], body: &[u8], signature: &str) -> bool {
    match compute_signature(secret, body) {
        Ok(expected) => constant_time_eq(expected.as_bytes(), signature.as_bytes()),
        Err(e) => {
            debug!(error = %e, "Secret cannot be used as HMAC key");
            false
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && bool::from(a.ct_eq(b))
}

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;
