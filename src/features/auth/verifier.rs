use base64::prelude::*;
use sha2::{Digest, Sha256};

/// Decides whether a username/password pair may access the admin area
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Verifies against a single operator-configured credential pair.
///
/// Only SHA-256 digests are kept in memory and compared.
pub struct StaticCredentialVerifier {
    username_digest: [u8; 32],
    password_digest: [u8; 32],
}

impl StaticCredentialVerifier {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username_digest: digest(username),
            password_digest: digest(password),
        }
    }
}

impl CredentialVerifier for StaticCredentialVerifier {
    fn verify(&self, username: &str, password: &str) -> bool {
        // Non-short-circuiting so both digests are always compared
        (digest(username) == self.username_digest) & (digest(password) == self.password_digest)
    }
}

/// Rejects every credential pair. Used when no admin credentials are configured.
pub struct DenyAllVerifier;

impl CredentialVerifier for DenyAllVerifier {
    fn verify(&self, _username: &str, _password: &str) -> bool {
        false
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

/// Credentials decoded from an `Authorization: Basic ...` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

/// Parse a Basic authorization header value.
///
/// Returns `None` for any other scheme, undecodable base64, non-UTF-8 payloads
/// and payloads without a colon. The password is everything after the first
/// colon, so it may itself contain colons.
pub fn parse_basic_auth(header_value: &str) -> Option<BasicCredentials> {
    let (scheme, encoded) = header_value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Basic") {
        return None;
    }

    let decoded = BASE64_STANDARD.decode(encoded.trim()).ok()?;
    let creds = String::from_utf8(decoded).ok()?;
    let (username, password) = creds.split_once(':')?;

    Some(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}
