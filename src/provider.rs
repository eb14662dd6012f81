//! # Provider
//!
//! Holder agents supply signing through the [`Signer`] trait. The proof
//! builder never sees private key material: it asks the signer which key and
//! algorithm it is bound to, and for a signature over the encoded proof.
//!
//! Implementations may keep keys in software, in a hardware keystore or
//! behind a remote signing service. The builder treats them all the same.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::jose::jwa::Algorithm;
use crate::jose::jwk::PublicKeyJwk;

/// Signer is used by implementers to provide signing functionality for
/// key proofs.
pub trait Signer: Send + Sync {
    /// The algorithm the signer signs with.
    fn algorithm(&self) -> Algorithm;

    /// The public key the signer's proofs are bound to, along with its
    /// algorithm. Must be side-effect free and return the same binding for
    /// the lifetime of a build.
    fn binding_key(&self) -> impl Future<Output = anyhow::Result<SigningKeyBinding>> + Send;

    /// Sign the message using the signer's private key.
    fn try_sign(&self, msg: &[u8]) -> impl Future<Output = anyhow::Result<Vec<u8>>> + Send;
}

/// The holder's public key as provided by a [`Signer`].
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SigningKeyBinding {
    /// The algorithm the key signs with.
    pub algorithm: Algorithm,

    /// How the key is referenced in a proof.
    pub key: BindingKey,
}

impl SigningKeyBinding {
    /// Create a new binding.
    #[must_use]
    pub const fn new(algorithm: Algorithm, key: BindingKey) -> Self {
        Self { algorithm, key }
    }
}

/// The public key material the proof is bound to.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum BindingKey {
    /// The public key embedded in the proof.
    #[serde(rename = "jwk")]
    Jwk(PublicKeyJwk),

    /// A DID URL identifying a key in the holder's DID document.
    #[serde(rename = "kid")]
    Did(String),

    /// A base64 (standard) encoded DER certificate chain, leaf first.
    #[serde(rename = "x5c")]
    X509(Vec<String>),
}

impl BindingKey {
    /// The cryptographic binding method names (as used in issuer metadata's
    /// `cryptographic_binding_methods_supported`) that accept this key, most
    /// specific first.
    #[must_use]
    pub fn binding_methods(&self) -> Vec<String> {
        match self {
            Self::Jwk(_) => vec!["jwk".to_string(), "cose_key".to_string()],
            Self::Did(url) => {
                let mut methods = vec![];
                if let Some(method) = url.strip_prefix("did:").and_then(|s| s.split(':').next()) {
                    methods.push(format!("did:{method}"));
                }
                methods.push("did".to_string());
                methods
            }
            Self::X509(_) => vec!["x5c".to_string()],
        }
    }
}
