//! # JSON Web Key (JWK)
//!
//! A JWK ([RFC7517]) is a JSON representation of a cryptographic key. A proof
//! of possession may embed the holder's public key as a JWK in the proof
//! header, so the type only models public key parameters: there is no field
//! for private key material.
//!
//! [RFC7517]: https://www.rfc-editor.org/rfc/rfc7517

use serde::{Deserialize, Serialize};

use crate::jose::jwa::Algorithm;

/// Simplified public JSON Web Key (JWK) structure.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub struct PublicKeyJwk {
    /// Key identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,

    /// Key type.
    pub kty: KeyType,

    /// Cryptographic curve type. Not used for RSA keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crv: Option<Curve>,

    /// X coordinate (OKP and EC keys), base64url encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,

    /// Y coordinate. Only used by EC keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,

    /// RSA modulus, base64url encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,

    /// RSA public exponent, base64url encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,

    /// Algorithm intended for use with the key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alg: Option<Algorithm>,

    /// Use of the key.
    #[serde(rename = "use")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_: Option<KeyUse>,
}

impl PublicKeyJwk {
    /// An Ed25519 public key (`kty` OKP) from its base64url encoded bytes.
    #[must_use]
    pub fn okp(x: impl Into<String>) -> Self {
        Self {
            kty: KeyType::Okp,
            crv: Some(Curve::Ed25519),
            x: Some(x.into()),
            ..Self::default()
        }
    }

    /// An elliptic curve public key (`kty` EC) from its base64url encoded
    /// coordinates.
    #[must_use]
    pub fn ec(crv: Curve, x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            kty: KeyType::Ec,
            crv: Some(crv),
            x: Some(x.into()),
            y: Some(y.into()),
            ..Self::default()
        }
    }

    /// An RSA public key (`kty` RSA) from its base64url encoded modulus and
    /// exponent.
    #[must_use]
    pub fn rsa(n: impl Into<String>, e: impl Into<String>) -> Self {
        Self {
            kty: KeyType::Rsa,
            n: Some(n.into()),
            e: Some(e.into()),
            ..Self::default()
        }
    }
}

/// Cryptographic key type.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
pub enum KeyType {
    /// Octet key pair (Edwards curve)
    #[default]
    #[serde(rename = "OKP")]
    Okp,

    /// Elliptic curve key pair
    #[serde(rename = "EC")]
    Ec,

    /// RSA key pair
    #[serde(rename = "RSA")]
    Rsa,
}

/// Cryptographic curve type.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
pub enum Curve {
    /// Ed25519 curve
    #[default]
    Ed25519,

    /// NIST P-256 curve
    #[serde(rename = "P-256")]
    P256,

    /// NIST P-384 curve
    #[serde(rename = "P-384")]
    P384,

    /// NIST P-521 curve
    #[serde(rename = "P-521")]
    P521,

    /// secp256k1 curve
    #[serde(rename = "secp256k1", alias = "ES256K")]
    Secp256k1,
}

/// The intended usage of the public `KeyType`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum KeyUse {
    /// Public key is to be used for signature verification
    #[default]
    #[serde(rename = "sig")]
    Signature,

    /// Public key is to be used for encryption
    #[serde(rename = "enc")]
    Encryption,
}
