//! # Proof Builder
//!
//! Builds a key proof for a single credential request. The builder is
//! created for a proof type, configured with chained setters (the last value
//! set wins), then consumed by [`ProofBuilder::build`].
//!
//! The issuer's declared capabilities are checked before the signer is asked
//! for a signature: a proof is never signed with an algorithm the issuer has
//! not advertised for the proof type.
//!
//! ```rust,ignore
//! let proof = ProofBuilder::of_type(ProofType::Jwt)
//!     .iss("https://wallet")
//!     .aud("https://issuer")
//!     .public_key(signer.binding_key().await?)
//!     .credential_spec(&configuration)
//!     .nonce(c_nonce)
//!     .build(&signer)
//!     .await?;
//! ```

use base64ct::{Base64UrlUnpadded, Encoding};
use chrono::{DateTime, Utc};
use coset::TaggedCborSerializable;

use crate::cose;
use crate::error::{Error, Result};
use crate::jose::jwa::Algorithm;
use crate::jose::jws::{self, Header, Type};
use crate::metadata::{CredentialConfiguration, ProofType};
use crate::proof::{Proof, ProofClaims};
use crate::provider::{BindingKey, Signer, SigningKeyBinding};

/// Builds a [`Proof`] of possession of the holder's key.
#[derive(Clone, Debug)]
pub struct ProofBuilder<'a> {
    proof_type: ProofType,
    iss: Option<String>,
    aud: Option<String>,
    nonce: Option<String>,
    public_key: Option<SigningKeyBinding>,
    credential_spec: Option<&'a CredentialConfiguration>,
}

impl<'a> ProofBuilder<'a> {
    /// Create a builder for a proof of the given type.
    #[must_use]
    pub const fn of_type(proof_type: ProofType) -> Self {
        Self {
            proof_type,
            iss: None,
            aud: None,
            nonce: None,
            public_key: None,
            credential_spec: None,
        }
    }

    /// The `client_id` of the wallet making the credential request.
    #[must_use]
    pub fn iss(mut self, iss: impl Into<String>) -> Self {
        self.iss = Some(iss.into());
        self
    }

    /// The Credential Issuer Identifier.
    #[must_use]
    pub fn aud(mut self, aud: impl Into<String>) -> Self {
        self.aud = Some(aud.into());
        self
    }

    /// The `c_nonce` provided by the issuer.
    #[must_use]
    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// The holder's public key the credential is to be bound to. Must be the
    /// binding key of the signer passed to `build`.
    #[must_use]
    pub fn public_key(mut self, public_key: SigningKeyBinding) -> Self {
        self.public_key = Some(public_key);
        self
    }

    /// The issuer's configuration for the credential being requested.
    #[must_use]
    pub fn credential_spec(mut self, credential_spec: &'a CredentialConfiguration) -> Self {
        self.credential_spec = Some(credential_spec);
        self
    }

    /// Sign and return the proof, issued now.
    ///
    /// # Errors
    ///
    /// Returns an `Error::Configuration` if a required field has not been
    /// set or the public key does not belong to the signer, an
    /// `Error::ProofTypeNotSupported` or
    /// `Error::ProofTypeSigningAlgorithmNotSupported` if the issuer does not
    /// accept the proof type or the signer's algorithm, and an
    /// `Error::Signing` if the signer fails.
    pub async fn build(self, signer: &impl Signer) -> Result<Proof> {
        self.build_at(signer, Utc::now()).await
    }

    /// Sign and return the proof with `issued_at` as its `iat` claim.
    ///
    /// # Errors
    ///
    /// See [`ProofBuilder::build`].
    pub async fn build_at(self, signer: &impl Signer, issued_at: DateTime<Utc>) -> Result<Proof> {
        tracing::debug!("proof::build_at");

        let proof_type = self.proof_type;
        let Some(iss) = self.iss else {
            return Err(missing("iss"));
        };
        let Some(aud) = self.aud else {
            return Err(missing("aud"));
        };
        let Some(nonce) = self.nonce else {
            return Err(missing("nonce"));
        };
        let Some(public_key) = self.public_key else {
            return Err(missing("public_key"));
        };
        let Some(credential_spec) = self.credential_spec else {
            return Err(missing("credential_spec"));
        };

        // resolve the key and algorithm the signer will actually use
        let binding = signer.binding_key().await.map_err(Error::Signing)?;
        let alg = signer.algorithm();
        if binding.algorithm != alg {
            return Err(Error::Configuration(format!(
                "signer binding key algorithm {} does not match signing algorithm {alg}",
                binding.algorithm
            )));
        }
        if binding != public_key {
            return Err(Error::Configuration(
                "public key is not the signer's binding key".to_string(),
            ));
        }

        verify_supported(credential_spec, proof_type, &alg)?;

        let claims = ProofClaims {
            iss,
            aud,
            iat: issued_at.timestamp(),
            nonce,
        };

        let (signature, encoded) = match proof_type {
            ProofType::Jwt => jwt(signer, &alg, &public_key.key, &claims).await?,
            ProofType::Cwt => cwt(signer, &alg, &public_key.key, &claims).await?,
        };

        Ok(Proof {
            proof_type,
            algorithm: alg,
            key: public_key.key,
            claims,
            signature,
            encoded,
        })
    }
}

fn missing(field: &str) -> Error {
    Error::Configuration(format!("`{field}` is not set"))
}

// An issuer that does not list the proof type at all does not support it.
// One that lists it with no algorithms supports none of them.
fn verify_supported(
    credential_spec: &CredentialConfiguration, proof_type: ProofType, alg: &Algorithm,
) -> Result<()> {
    let supported = &credential_spec.proof_types_supported;
    if !supported.contains(proof_type) {
        tracing::debug!("proof type {proof_type} not supported");
        return Err(Error::ProofTypeNotSupported(proof_type));
    }

    let cose_compatible = proof_type != ProofType::Cwt || cose::algorithm(alg).is_some();
    if !alg.is_asymmetric() || !cose_compatible || !supported.supports(proof_type, alg) {
        tracing::debug!("algorithm {alg} not supported for proof type {proof_type}");
        return Err(Error::ProofTypeSigningAlgorithmNotSupported {
            proof_type,
            alg: alg.clone(),
        });
    }

    Ok(())
}

async fn jwt(
    signer: &impl Signer, alg: &Algorithm, key: &BindingKey, claims: &ProofClaims,
) -> Result<(Vec<u8>, String)> {
    let header = Header {
        alg: alg.clone(),
        typ: Type::Openid4VciProofJwt,
        key: key.clone(),
    };
    let input = jws::signing_input(&header, claims)?;
    let signature = signer.try_sign(input.as_bytes()).await.map_err(Error::Signing)?;
    let encoded = jws::compact(&input, &signature);

    Ok((signature, encoded))
}

async fn cwt(
    signer: &impl Signer, alg: &Algorithm, key: &BindingKey, claims: &ProofClaims,
) -> Result<(Vec<u8>, String)> {
    let Some(cose_alg) = cose::algorithm(alg) else {
        return Err(Error::ProofTypeSigningAlgorithmNotSupported {
            proof_type: ProofType::Cwt,
            alg: alg.clone(),
        });
    };

    let protected = cose::protected_header(cose_alg, key)?;
    let mut sign1 = cose::sign1(protected, cose::claims(claims)?);
    let signature = signer.try_sign(&sign1.tbs_data(&[])).await.map_err(Error::Signing)?;
    sign1.signature.clone_from(&signature);

    let bytes = sign1.to_tagged_vec()?;
    Ok((signature, Base64UrlUnpadded::encode_string(&bytes)))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::metadata::ProofTypesSupported;

    struct Fixed {
        binding: SigningKeyBinding,
        signs: AtomicUsize,
    }

    impl Fixed {
        fn new(alg: Algorithm) -> Self {
            Self {
                binding: SigningKeyBinding::new(alg, BindingKey::Did("did:example:w#k".into())),
                signs: AtomicUsize::new(0),
            }
        }
    }

    impl Signer for Fixed {
        fn algorithm(&self) -> Algorithm {
            self.binding.algorithm.clone()
        }

        async fn binding_key(&self) -> anyhow::Result<SigningKeyBinding> {
            Ok(self.binding.clone())
        }

        async fn try_sign(&self, _msg: &[u8]) -> anyhow::Result<Vec<u8>> {
            self.signs.fetch_add(1, Ordering::SeqCst);
            Ok(vec![0; 64])
        }
    }

    fn config(proof_types_supported: ProofTypesSupported) -> CredentialConfiguration {
        CredentialConfiguration {
            format: "jwt_vc_json".into(),
            proof_types_supported,
            ..CredentialConfiguration::default()
        }
    }

    #[tokio::test]
    async fn empty_set_is_algorithm_error() {
        let config = config(ProofTypesSupported::new([(ProofType::Jwt, vec![])]));
        let signer = Fixed::new(Algorithm::ES256);

        let err = ProofBuilder::of_type(ProofType::Jwt)
            .iss("https://wallet")
            .aud("https://issuer")
            .nonce("nonce")
            .public_key(signer.binding.clone())
            .credential_spec(&config)
            .build(&signer)
            .await
            .expect_err("should fail");

        assert!(matches!(err, Error::ProofTypeSigningAlgorithmNotSupported { .. }));
        assert_eq!(signer.signs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn cwt_needs_cose_algorithm() {
        let alg = Algorithm::Other("Ed448".into());
        let config = config(ProofTypesSupported::new([(ProofType::Cwt, vec![alg.clone()])]));
        let signer = Fixed::new(alg);

        let err = ProofBuilder::of_type(ProofType::Cwt)
            .iss("https://wallet")
            .aud("https://issuer")
            .nonce("nonce")
            .public_key(signer.binding.clone())
            .credential_spec(&config)
            .build(&signer)
            .await
            .expect_err("should fail");

        assert!(matches!(err, Error::ProofTypeSigningAlgorithmNotSupported { .. }));
        assert_eq!(signer.signs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn advertised_mac_rejected() {
        let alg = Algorithm::from("HS256");
        let config = config(ProofTypesSupported::new([(ProofType::Jwt, vec![alg.clone()])]));
        let signer = Fixed::new(alg);

        let err = ProofBuilder::of_type(ProofType::Jwt)
            .iss("https://wallet")
            .aud("https://issuer")
            .nonce("nonce")
            .public_key(signer.binding.clone())
            .credential_spec(&config)
            .build(&signer)
            .await
            .expect_err("should fail");

        assert!(matches!(err, Error::ProofTypeSigningAlgorithmNotSupported { .. }));
        assert_eq!(signer.signs.load(Ordering::SeqCst), 0);
    }
}
