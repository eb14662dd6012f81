//! # Credibil Key Proof
//!
//! Proof of possession of key material for holder agents (such as wallets)
//! using `OpenID` for Verifiable Credential Issuance. A Credential Request
//! carries a key proof showing the issuer that the holder controls the key
//! the credential will be bound to.
//!
//! The crate does not send requests to an issuer or store keys - that is the
//! job of an application implementer. It reads the issuer's declared proof
//! capabilities, checks them against the holder's signer and produces the
//! signed proof.
//!
//! # Design
//!
//! ** Builder **
//!
//! A [`ProofBuilder`] is created for each credential request, configured
//! with the wallet's `client_id`, the Credential Issuer, the issuer's
//! `c_nonce`, the holder's public key and the credential configuration, then
//! consumed by `build`. Configuration errors, an unsupported proof type and
//! an unsupported signing algorithm are all reported before anything is
//! signed.
//!
//! ** Provider **
//!
//! In a similar style to `credibil-vc`, implementors make use of a 'Provider'
//! trait, [`Signer`], that is responsible for signing. The builder only asks
//! the signer for its binding key and for a signature, so keys may live in
//! software, hardware or a remote service.
//!
//! ** Proof Types **
//!
//! JWT proofs (`openid4vci-proof+jwt`) and CWT proofs
//! (`openid4vci-proof+cwt`) are supported.
//!
//! # Example
//!
//! ```rust,ignore
//! use credibil_keyproof::{ProofBuilder, ProofType};
//!
//! let proof = ProofBuilder::of_type(ProofType::Jwt)
//!     .iss(CLIENT_ID)
//!     .aud(credential_issuer)
//!     .public_key(signer.binding_key().await?)
//!     .credential_spec(&credential_configuration)
//!     .nonce(c_nonce)
//!     .build(&signer)
//!     .await?;
//!
//! let request_proof = serde_json::to_value(&proof)?;
//! ```

pub mod cose;
pub mod error;
pub mod jose;
pub mod metadata;
pub mod proof;
pub mod provider;

pub use crate::error::{Error, Result};
pub use crate::jose::{Algorithm, PublicKeyJwk};
pub use crate::metadata::{CredentialConfiguration, ProofType, ProofTypesSupported};
pub use crate::proof::{Proof, ProofBuilder, ProofClaims};
pub use crate::provider::{BindingKey, Signer, SigningKeyBinding};
