//! # Errors
//!
//! Errors returned when building a proof of possession. Each variant is a
//! distinct kind of failure so callers can tell a misconfigured builder apart
//! from an issuer that will not accept the holder's key, or a signer backend
//! that failed.

use thiserror::Error;

use crate::jose::jwa::Algorithm;
use crate::metadata::ProofType;

/// Result type for proof building.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while building a proof of possession.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A required builder field was not set, or the configured binding key
    /// is inconsistent with the signer. Always a caller bug.
    #[error("invalid proof configuration: {0}")]
    Configuration(String),

    /// The issuer does not support the requested proof type.
    #[error("proof type {0} is not supported by the issuer")]
    ProofTypeNotSupported(ProofType),

    /// The issuer supports the proof type, but not the algorithm the signer
    /// would use.
    #[error("signing algorithm {alg} is not supported for proof type {proof_type}")]
    ProofTypeSigningAlgorithmNotSupported {
        /// The requested proof type.
        proof_type: ProofType,

        /// The algorithm the signer is bound to.
        alg: Algorithm,
    },

    /// The issuer does not accept the way the binding key is referenced
    /// (`jwk`, `did:...`, `x5c`) for the credential configuration.
    #[error("cryptographic binding method {0} is not supported by the issuer")]
    CryptographicBindingMethodNotSupported(String),

    /// The signer failed to provide its binding key or a signature.
    #[error("signing failed: {0}")]
    Signing(#[source] anyhow::Error),

    /// The proof header or claims could not be encoded.
    #[error("issue encoding proof: {0}")]
    Encoding(String),
}

impl Error {
    /// Returns `true` when the error is caused by the issuer's declared
    /// capabilities rather than the holder's configuration or signer.
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(
            self,
            Self::ProofTypeNotSupported(_)
                | Self::ProofTypeSigningAlgorithmNotSupported { .. }
                | Self::CryptographicBindingMethodNotSupported(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Encoding(e.to_string())
    }
}

impl From<coset::CoseError> for Error {
    fn from(e: coset::CoseError) -> Self {
        Self::Encoding(e.to_string())
    }
}
