//! # Issuer Metadata
//!
//! The proof-related subset of a Credential Issuer's
//! `credential_configurations_supported` metadata. A holder reads the
//! `proof_types_supported` table to learn which key proof formats, and which
//! signing algorithms for each, the issuer will accept for a credential.
//!
//! ```json
//! "proof_types_supported": {
//!     "jwt": {
//!         "proof_signing_alg_values_supported": ["RS256", "ES256"]
//!     }
//! }
//! ```

use std::collections::HashMap;
use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::jose::jwa::Algorithm;
use crate::provider::BindingKey;

/// The format of a key proof.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum ProofType {
    /// A JWT ([RFC7519]) is used as proof of possession.
    ///
    /// [RFC7519]: https://www.rfc-editor.org/rfc/rfc7519
    #[serde(rename = "jwt")]
    Jwt,

    /// A CWT ([RFC8392]) is used as proof of possession.
    ///
    /// [RFC8392]: https://www.rfc-editor.org/rfc/rfc8392
    #[serde(rename = "cwt")]
    Cwt,
}

impl ProofType {
    /// The proof type identifier used in metadata and credential requests.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Jwt => "jwt",
            Self::Cwt => "cwt",
        }
    }
}

impl Display for ProofType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProofType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jwt" => Ok(Self::Jwt),
            "cwt" => Ok(Self::Cwt),
            other => Err(format!("unknown proof type: {other}")),
        }
    }
}

/// Metadata about a single supported key proof type.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ProofTypeMetadata {
    /// Algorithms the issuer accepts for this proof type, in the issuer's
    /// order of preference.
    pub proof_signing_alg_values_supported: Vec<Algorithm>,
}

/// The proof types an issuer supports for a credential configuration and,
/// for each, the signing algorithms it accepts.
///
/// Immutable once constructed.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(try_from = "HashMap<String, serde_json::Value>")]
pub struct ProofTypesSupported(HashMap<ProofType, ProofTypeMetadata>);

impl ProofTypesSupported {
    /// Build a table from proof types and their supported algorithms.
    #[must_use]
    pub fn new<I, A>(entries: I) -> Self
    where
        I: IntoIterator<Item = (ProofType, A)>,
        A: IntoIterator<Item = Algorithm>,
    {
        let table = entries
            .into_iter()
            .map(|(proof_type, algs)| {
                let metadata = ProofTypeMetadata {
                    proof_signing_alg_values_supported: algs.into_iter().collect(),
                };
                (proof_type, metadata)
            })
            .collect();
        Self(table)
    }

    /// Whether the issuer declares the proof type at all.
    #[must_use]
    pub fn contains(&self, proof_type: ProofType) -> bool {
        self.0.contains_key(&proof_type)
    }

    /// The algorithms supported for the proof type. A proof type the issuer
    /// does not declare has no supported algorithms.
    #[must_use]
    pub fn algorithms(&self, proof_type: ProofType) -> &[Algorithm] {
        self.0
            .get(&proof_type)
            .map(|metadata| metadata.proof_signing_alg_values_supported.as_slice())
            .unwrap_or_default()
    }

    /// Whether `alg` may be used to sign a proof of `proof_type`.
    #[must_use]
    pub fn supports(&self, proof_type: ProofType, alg: &Algorithm) -> bool {
        self.algorithms(proof_type).contains(alg)
    }

    /// The declared proof types.
    pub fn proof_types(&self) -> impl Iterator<Item = ProofType> + '_ {
        self.0.keys().copied()
    }

    /// Whether no proof types are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Proof types this crate cannot produce (e.g. `ldp_vp`) are dropped rather
// than rejecting the whole configuration.
impl TryFrom<HashMap<String, serde_json::Value>> for ProofTypesSupported {
    type Error = serde_json::Error;

    fn try_from(raw: HashMap<String, serde_json::Value>) -> Result<Self, Self::Error> {
        let mut table = HashMap::new();
        for (name, value) in raw {
            let Ok(proof_type) = name.parse::<ProofType>() else {
                tracing::debug!("skipping unsupported proof type {name}");
                continue;
            };
            table.insert(proof_type, serde_json::from_value(value)?);
        }
        Ok(Self(table))
    }
}

/// The proof-related parameters of a credential configuration.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct CredentialConfiguration {
    /// The credential format, e.g. `jwt_vc_json`.
    pub format: String,

    /// The OAuth scope used to request the credential.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// How the credential may be bound to the holder: `jwk`, `cose_key`,
    /// `did` or `did:<method>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cryptographic_binding_methods_supported: Option<Vec<String>>,

    /// Algorithms the issuer uses to sign the credential.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_signing_alg_values_supported: Option<Vec<String>>,

    /// Key proofs the issuer accepts. Empty when the issuer does not declare
    /// any.
    #[serde(default, skip_serializing_if = "ProofTypesSupported::is_empty")]
    pub proof_types_supported: ProofTypesSupported,
}

impl CredentialConfiguration {
    /// Whether the issuer accepts a key referenced using any of `methods`.
    /// An issuer that does not restrict binding methods accepts all of them.
    #[must_use]
    pub fn supports_binding(&self, methods: &[String]) -> bool {
        match &self.cryptographic_binding_methods_supported {
            Some(supported) if !supported.is_empty() => {
                methods.iter().any(|m| supported.contains(m))
            }
            _ => true,
        }
    }

    /// Check the issuer accepts the way `key` is referenced. Holders run
    /// this when choosing a key for a credential; proof building does not.
    ///
    /// # Errors
    ///
    /// Returns an `Error::CryptographicBindingMethodNotSupported` naming the
    /// key's most specific binding method when none of its methods are
    /// accepted.
    pub fn verify_binding(&self, key: &BindingKey) -> Result<()> {
        let methods = key.binding_methods();
        if self.supports_binding(&methods) {
            return Ok(());
        }
        let method = methods.into_iter().next().unwrap_or_default();
        tracing::debug!("binding method {method} not supported");
        Err(Error::CryptographicBindingMethodNotSupported(method))
    }
}
