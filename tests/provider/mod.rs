//! Test signers standing in for a wallet's key store.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::anyhow;
use base64ct::{Base64UrlUnpadded, Encoding};
use credibil_keyproof::jose::jwk::PublicKeyJwk;
use credibil_keyproof::{
    Algorithm, BindingKey, CredentialConfiguration, ProofType, ProofTypesSupported, Signer,
    SigningKeyBinding,
};
use ed25519_dalek::Signer as _;
use rsa::RsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::signature::{SignatureEncoding, Signer as _};
use rsa::traits::PublicKeyParts;
use serde_json::json;
use sha2::{Sha256, Sha384, Sha512};
use tracing_subscriber::EnvFilter;

pub const CLIENT_ID: &str = "https://wallet";
pub const CREDENTIAL_ISSUER: &str = "https://issuer";
pub const NONCE: &str = "nonce";
pub const HOLDER_KID: &str = "did:example:wallet#key-0";

const RSA_KEY: &str = include_str!("../fixtures/rsa-2048.pem");
const ED25519_SECRET: [u8; 32] = [
    0x9d, 0x61, 0xb1, 0x9d, 0xef, 0xfd, 0x5a, 0x60, 0xba, 0x84, 0x4a, 0xf4, 0x92, 0xec, 0x2c,
    0xc4, 0x44, 0x49, 0xc5, 0x69, 0x7b, 0x32, 0x69, 0x19, 0x70, 0x3b, 0xac, 0x03, 0x1c, 0xae,
    0x7f, 0x60,
];

/// Log builder steps when `RUST_LOG` is set.
pub fn init_tracer() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// The university degree credential configuration: JWT proofs signed with
/// RS256 only.
pub fn university_degree_jwt() -> CredentialConfiguration {
    serde_json::from_value(json!({
        "format": "jwt_vc_json",
        "scope": "UniversityDegree",
        "cryptographic_binding_methods_supported": ["did:example"],
        "credential_signing_alg_values_supported": ["ES256"],
        "credential_definition": {
            "type": ["VerifiableCredential", "UniversityDegreeCredential"]
        },
        "proof_types_supported": {
            "jwt": {
                "proof_signing_alg_values_supported": ["RS256"]
            }
        }
    }))
    .expect("should deserialize")
}

/// A configuration accepting the given proof types and algorithms.
pub fn configuration(
    proof_types: impl IntoIterator<Item = (ProofType, Vec<Algorithm>)>,
) -> CredentialConfiguration {
    CredentialConfiguration {
        format: "jwt_vc_json".into(),
        proof_types_supported: ProofTypesSupported::new(proof_types),
        ..CredentialConfiguration::default()
    }
}

/// Software RSA signer (RSASSA-PKCS1-v1_5) bound to a JWK.
pub struct RsaSigner {
    algorithm: Algorithm,
    binding_algorithm: Algorithm,
    key: RsaPrivateKey,
}

impl RsaSigner {
    pub fn new(algorithm: Algorithm) -> Self {
        Self::misreporting(algorithm.clone(), algorithm)
    }

    /// A signer whose binding key reports a different algorithm from the
    /// one it signs with.
    pub fn misreporting(algorithm: Algorithm, binding_algorithm: Algorithm) -> Self {
        let key = RsaPrivateKey::from_pkcs8_pem(RSA_KEY).expect("should load RSA key");
        Self {
            algorithm,
            binding_algorithm,
            key,
        }
    }

    pub fn public_key(&self) -> rsa::RsaPublicKey {
        self.key.to_public_key()
    }

    fn jwk(&self) -> PublicKeyJwk {
        let n = Base64UrlUnpadded::encode_string(&self.key.n().to_bytes_be());
        let e = Base64UrlUnpadded::encode_string(&self.key.e().to_bytes_be());
        PublicKeyJwk::rsa(n, e)
    }
}

impl Signer for RsaSigner {
    fn algorithm(&self) -> Algorithm {
        self.algorithm.clone()
    }

    async fn binding_key(&self) -> anyhow::Result<SigningKeyBinding> {
        Ok(SigningKeyBinding::new(self.binding_algorithm.clone(), BindingKey::Jwk(self.jwk())))
    }

    async fn try_sign(&self, msg: &[u8]) -> anyhow::Result<Vec<u8>> {
        use rsa::pkcs1v15::SigningKey;

        let signature = match self.algorithm {
            Algorithm::RS256 => SigningKey::<Sha256>::new(self.key.clone()).sign(msg).to_vec(),
            Algorithm::RS384 => SigningKey::<Sha384>::new(self.key.clone()).sign(msg).to_vec(),
            Algorithm::RS512 => SigningKey::<Sha512>::new(self.key.clone()).sign(msg).to_vec(),
            _ => return Err(anyhow!("unsupported RSA algorithm {}", self.algorithm)),
        };
        Ok(signature)
    }
}

/// Software Ed25519 signer, bound either to an embedded JWK or a DID URL.
pub struct Ed25519Signer {
    signing_key: ed25519_dalek::SigningKey,
    use_did: bool,
}

impl Ed25519Signer {
    pub fn with_jwk() -> Self {
        Self {
            signing_key: ed25519_dalek::SigningKey::from_bytes(&ED25519_SECRET),
            use_did: false,
        }
    }

    pub fn with_did() -> Self {
        Self {
            use_did: true,
            ..Self::with_jwk()
        }
    }

    pub fn verifying_key(&self) -> ed25519_dalek::VerifyingKey {
        self.signing_key.verifying_key()
    }
}

impl Signer for Ed25519Signer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::EdDSA
    }

    async fn binding_key(&self) -> anyhow::Result<SigningKeyBinding> {
        let key = if self.use_did {
            BindingKey::Did(HOLDER_KID.to_string())
        } else {
            let x = Base64UrlUnpadded::encode_string(self.verifying_key().as_bytes());
            BindingKey::Jwk(PublicKeyJwk::okp(x))
        };
        Ok(SigningKeyBinding::new(Algorithm::EdDSA, key))
    }

    async fn try_sign(&self, msg: &[u8]) -> anyhow::Result<Vec<u8>> {
        Ok(self.signing_key.sign(msg).to_vec())
    }
}

/// Wraps a signer and counts calls to each capability.
pub struct Counting<S> {
    inner: S,
    binding_calls: AtomicUsize,
    sign_calls: AtomicUsize,
}

impl<S: Signer> Counting<S> {
    pub const fn new(inner: S) -> Self {
        Self {
            inner,
            binding_calls: AtomicUsize::new(0),
            sign_calls: AtomicUsize::new(0),
        }
    }

    pub fn binding_calls(&self) -> usize {
        self.binding_calls.load(Ordering::SeqCst)
    }

    pub fn sign_calls(&self) -> usize {
        self.sign_calls.load(Ordering::SeqCst)
    }

    pub const fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Signer> Signer for Counting<S> {
    fn algorithm(&self) -> Algorithm {
        self.inner.algorithm()
    }

    async fn binding_key(&self) -> anyhow::Result<SigningKeyBinding> {
        self.binding_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.binding_key().await
    }

    async fn try_sign(&self, msg: &[u8]) -> anyhow::Result<Vec<u8>> {
        self.sign_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.try_sign(msg).await
    }
}

/// A hardware-backed signer whose key store is unavailable when signing.
pub struct UnavailableSigner;

impl Signer for UnavailableSigner {
    fn algorithm(&self) -> Algorithm {
        Algorithm::ES256
    }

    async fn binding_key(&self) -> anyhow::Result<SigningKeyBinding> {
        Ok(SigningKeyBinding::new(Algorithm::ES256, BindingKey::Did(HOLDER_KID.to_string())))
    }

    async fn try_sign(&self, _msg: &[u8]) -> anyhow::Result<Vec<u8>> {
        Err(anyhow!("secure enclave unavailable"))
    }
}
