//! # JSON Web Algorithms (JWA)
//!
//! JWA [RFC7518] defines a set of cryptographic algorithms for use with
//! JWS ([RFC7515]), JWE ([RFC7516]), and JWK ([RFC7517]).
//!
//! Issuers advertise the algorithms they accept for key proofs by their IANA
//! names, so any name can be represented. Names outside the registered
//! asymmetric signature algorithms are kept as [`Algorithm::Other`].
//!
//! See associated [IANA] registries for more information
//!
//! [RFC7515]: https://www.rfc-editor.org/rfc/rfc7515
//! [RFC7516]: https://www.rfc-editor.org/rfc/rfc7516
//! [RFC7517]: https://www.rfc-editor.org/rfc/rfc7517
//! [RFC7518]: https://www.rfc-editor.org/rfc/rfc7518
//! [IANA]: https://www.iana.org/assignments/jose/jose.xhtml

use std::convert::Infallible;
use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Algorithm is used to specify the signing algorithm used by the signer.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum Algorithm {
    /// Algorithm for the Ed25519 curve
    #[default]
    EdDSA,

    /// ECDSA using P-256 and SHA-256
    ES256,

    /// ECDSA using secp256k1 and SHA-256
    ES256K,

    /// ECDSA using P-384 and SHA-384
    ES384,

    /// ECDSA using P-521 and SHA-512
    ES512,

    /// RSASSA-PKCS1-v1_5 using SHA-256
    RS256,

    /// RSASSA-PKCS1-v1_5 using SHA-384
    RS384,

    /// RSASSA-PKCS1-v1_5 using SHA-512
    RS512,

    /// RSASSA-PSS using SHA-256 and MGF1 with SHA-256
    PS256,

    /// RSASSA-PSS using SHA-384 and MGF1 with SHA-384
    PS384,

    /// RSASSA-PSS using SHA-512 and MGF1 with SHA-512
    PS512,

    /// Any other algorithm name, kept verbatim.
    Other(String),
}

impl Algorithm {
    /// The IANA name of the algorithm.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::EdDSA => "EdDSA",
            Self::ES256 => "ES256",
            Self::ES256K => "ES256K",
            Self::ES384 => "ES384",
            Self::ES512 => "ES512",
            Self::RS256 => "RS256",
            Self::RS384 => "RS384",
            Self::RS512 => "RS512",
            Self::PS256 => "PS256",
            Self::PS384 => "PS384",
            Self::PS512 => "PS512",
            Self::Other(name) => name,
        }
    }

    /// Whether the algorithm produces an asymmetric digital signature.
    ///
    /// A key proof must never use `none` or a MAC algorithm, even when an
    /// issuer lists one.
    #[must_use]
    pub fn is_asymmetric(&self) -> bool {
        match self {
            Self::Other(name) => !(name == "none" || name.starts_with("HS")),
            _ => true,
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let alg = match s {
            "EdDSA" => Self::EdDSA,
            "ES256" => Self::ES256,
            "ES256K" => Self::ES256K,
            "ES384" => Self::ES384,
            "ES512" => Self::ES512,
            "RS256" => Self::RS256,
            "RS384" => Self::RS384,
            "RS512" => Self::RS512,
            "PS256" => Self::PS256,
            "PS384" => Self::PS384,
            "PS512" => Self::PS512,
            other => Self::Other(other.to_string()),
        };
        Ok(alg)
    }
}

impl From<String> for Algorithm {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(alg) => alg,
            Err(e) => match e {},
        }
    }
}

impl From<&str> for Algorithm {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<Algorithm> for String {
    fn from(alg: Algorithm) -> Self {
        alg.to_string()
    }
}
