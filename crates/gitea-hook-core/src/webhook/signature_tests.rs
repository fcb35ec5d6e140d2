//! Tests for signature computation and comparison.

use super::*;

/// Reference computation straight from the primitives.
fn reference_signature(secret: &[u8], body: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret).unwrap();
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

#[test]
fn test_known_vector() {
    // RFC 4231 test case 2.
    assert_eq!(
        compute_signature(b"Jefe", b"what do ya want for nothing?").unwrap(),
        "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
    );
}

#[test]
fn test_round_trip_for_secrets_and_bodies() {
    let secrets: [&[u8]; 4] = [b"s", b"a much longer shared secret value", &[0u8; 100], b""];
    let bodies: [&[u8]; 3] = [b"{}", b"{\"ref\":\"refs/heads/main\"}", &[0xff; 4096]];

    for secret in secrets {
        for body in bodies {
            let signature = compute_signature(secret, body).unwrap();
            assert_eq!(signature, reference_signature(secret, body));
            assert_eq!(signature.len(), 64);
            assert!(verify_signature(secret, body, &signature));
        }
    }
}

#[test]
fn test_flipping_any_hex_character_fails() {
    let secret = b"webhook-secret";
    let body = b"{\"action\":\"published\"}";
    let signature = compute_signature(secret, body).unwrap();

    for i in 0..signature.len() {
        let mut chars: Vec<char> = signature.chars().collect();
        chars[i] = if chars[i] == '0' { '1' } else { '0' };
        let tampered: String = chars.into_iter().collect();
        assert!(
            !verify_signature(secret, body, &tampered),
            "tampered position {i} still verified"
        );
    }
}

#[test]
fn test_uppercase_hex_does_not_match() {
    let signature = compute_signature(b"k", b"body").unwrap();
    assert!(signature.chars().any(|c| c.is_ascii_alphabetic()));
    assert!(!verify_signature(b"k", b"body", &signature.to_uppercase()));
}

#[test]
fn test_length_mismatch_and_prefix_fail() {
    let signature = compute_signature(b"k", b"body").unwrap();

    assert!(!verify_signature(b"k", b"body", ""));
    assert!(!verify_signature(b"k", b"body", &signature[..63]));
    assert!(!verify_signature(b"k", b"body", &format!("sha256={signature}")));
}

#[test]
fn test_wrong_secret_or_body_fails() {
    let signature = compute_signature(b"right", b"body").unwrap();
    assert!(!verify_signature(b"wrong", b"body", &signature));
    assert!(!verify_signature(b"right", b"body ", &signature));
}

#[test]
fn test_keys_of_any_length_compute() {
    for len in [0usize, 1, 32, 64, 65, 1024] {
        let secret = vec![0x5a; len];
        let signature = compute_signature(&secret, b"{}");
        assert!(signature.is_ok(), "key length {len} rejected");
        assert!(verify_signature(&secret, b"{}", &signature.unwrap()));
    }
}
