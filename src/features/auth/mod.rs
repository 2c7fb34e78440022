pub mod handler;
pub mod routes;
pub mod verifier;

pub use verifier::{
    parse_basic_auth, CredentialVerifier, DenyAllVerifier, StaticCredentialVerifier,
};
