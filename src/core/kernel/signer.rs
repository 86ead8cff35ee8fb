use crate::core::credentials::CredentialPair;
use crate::core::types::{FormBody, KEY_FIELD, SIGN_FIELD};
use md5::{Digest, Md5};
use std::fmt::Debug;

/// Text used for a credential that has not been configured
pub const UNSET_CREDENTIAL: &str = "null";

/// Signer trait for request authentication
///
/// Implementations turn the current credentials into the authentication
/// fields that lead every outgoing body.
pub trait Signer: Debug + Send + Sync {
    /// Derive the signature from the two secrets
    fn sign(&self, api_id: Option<&str>, api_key: Option<&str>) -> String;

    /// Authentication fields (`key`, `sign`) for a request body
    fn auth_fields(&self, credentials: &CredentialPair) -> FormBody {
        let api_key = credentials.api_key();
        FormBody::new()
            .with(KEY_FIELD, api_key.unwrap_or(UNSET_CREDENTIAL))
            .with(SIGN_FIELD, self.sign(credentials.api_id(), api_key))
    }
}

/// Lowercase hex MD5 over `api_id + api_key`
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5Signer;

impl Md5Signer {
    pub const fn new() -> Self {
        Self
    }
}

impl Signer for Md5Signer {
    fn sign(&self, api_id: Option<&str>, api_key: Option<&str>) -> String {
        sign(api_id, api_key)
    }
}

/// Compute the request signature.
///
/// Unset credentials are hashed as the text `null`, so the result is always
/// deterministic; the remote service rejects it rather than this client.
pub fn sign(api_id: Option<&str>, api_key: Option<&str>) -> String {
    let mut hasher = Md5::new();
    hasher.update(api_id.unwrap_or(UNSET_CREDENTIAL).as_bytes());
    hasher.update(api_key.unwrap_or(UNSET_CREDENTIAL).as_bytes());
    hex::encode(hasher.finalize())
}
