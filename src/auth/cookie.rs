//! HMAC-signed session cookie tokens.
//!
//! A token is `base64(email).base64(hmac-sha256(base64(email)))`. Anything
//! that fails to verify reads as anonymous.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct SessionSigner {
    secret: Vec<u8>,
}

impl SessionSigner {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Seal an email into a signed token.
    pub fn seal(&self, email: &str) -> String {
        let payload = URL_SAFE_NO_PAD.encode(email.as_bytes());
        let tag = self.tag(payload.as_bytes());
        format!("{payload}.{tag}")
    }

    /// Open a token, returning the email when the signature verifies.
    pub fn open(&self, token: &str) -> Option<String> {
        let (payload, tag) = token.split_once('.')?;
        let signature = URL_SAFE_NO_PAD.decode(tag).ok()?;

        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).ok()?;

        let email = URL_SAFE_NO_PAD.decode(payload).ok()?;
        String::from_utf8(email).ok()
    }

    fn tag(&self, payload: &[u8]) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(payload);
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_and_open() {
        let signer = SessionSigner::new(b"test-secret".to_vec());
        let token = signer.seal("ada@example.org");
        assert_eq!(signer.open(&token).as_deref(), Some("ada@example.org"));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let signer = SessionSigner::new(b"test-secret".to_vec());
        let token = signer.seal("ada@example.org");
        let (_, tag) = token.split_once('.').unwrap();
        let forged = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(b"mallory@example.org"),
            tag
        );
        assert!(signer.open(&forged).is_none());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let signer = SessionSigner::new(b"test-secret".to_vec());
        let other = SessionSigner::new(b"other-secret".to_vec());
        let token = signer.seal("ada@example.org");
        assert!(other.open(&token).is_none());
    }

    #[test]
    fn test_garbage_tokens_rejected() {
        let signer = SessionSigner::new(b"test-secret".to_vec());
        assert!(signer.open("").is_none());
        assert!(signer.open("no-dot-here").is_none());
        assert!(signer.open("not!base64.also!not").is_none());
    }
}
