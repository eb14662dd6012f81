//! # JSON Web Signature (JWS)
//!
//! JWS ([RFC7515]) represents content secured with digital signatures using
//! JSON-based data structures. A JWT proof of possession is a JWS in compact
//! serialization: `BASE64URL(header) || '.' || BASE64URL(claims) || '.' ||
//! BASE64URL(signature)`.
//!
//! [RFC7515]: https://www.rfc-editor.org/rfc/rfc7515

use std::fmt::{self, Display};

use base64ct::{Base64UrlUnpadded, Encoding};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::jose::jwa::Algorithm;
use crate::provider::BindingKey;

/// The JWS `typ` header parameter.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum Type {
    /// JWT `typ` for Wallet's Proof of possession of key material.
    #[default]
    #[serde(rename = "openid4vci-proof+jwt")]
    Openid4VciProofJwt,
}

impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Openid4VciProofJwt => f.write_str("openid4vci-proof+jwt"),
        }
    }
}

/// Represents the JWT header of a proof of possession.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Header {
    /// Digital signature algorithm identifier as per IANA "JSON Web Signature
    /// and Encryption Algorithms" registry.
    pub alg: Algorithm,

    /// Used to declare the media type of the JWS.
    pub typ: Type,

    /// The key the proof is bound to: one of `jwk`, `kid` or `x5c`.
    #[serde(flatten)]
    pub key: BindingKey,
}

/// Encode header and claims as the JWS signing input
/// (`BASE64URL(header).BASE64URL(claims)`).
///
/// # Errors
///
/// Returns an `Error::Encoding` if either part cannot be serialized to JSON.
pub fn signing_input<T: Serialize>(header: &Header, claims: &T) -> Result<String> {
    let header = Base64UrlUnpadded::encode_string(&serde_json::to_vec(header)?);
    let claims = Base64UrlUnpadded::encode_string(&serde_json::to_vec(claims)?);
    Ok(format!("{header}.{claims}"))
}

/// Append the signature to the signing input to form a compact JWS.
#[must_use]
pub fn compact(signing_input: &str, signature: &[u8]) -> String {
    let sig_enc = Base64UrlUnpadded::encode_string(signature);
    format!("{signing_input}.{sig_enc}")
}
