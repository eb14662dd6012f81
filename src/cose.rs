//! # CBOR Object Signing and Encryption (COSE)
//!
//! Encoding for CWT ([RFC8392]) key proofs. The proof is a tagged
//! `COSE_Sign1` ([RFC9052]) whose protected header carries the algorithm,
//! the `openid4vci-proof+cwt` content type and the holder's key, and whose
//! payload is a CBOR map of the proof claims.
//!
//! [RFC8392]: https://www.rfc-editor.org/rfc/rfc8392
//! [RFC9052]: https://www.rfc-editor.org/rfc/rfc9052

use base64ct::{Base64, Base64UrlUnpadded, Encoding};
use ciborium::Value;
use coset::{CoseSign1, CoseSign1Builder, Header, HeaderBuilder, Label, iana};

use crate::error::{Error, Result};
use crate::jose::jwa::Algorithm;
use crate::jose::jwk::{Curve, KeyType, PublicKeyJwk};
use crate::proof::ProofClaims;
use crate::provider::BindingKey;

/// Content type of a CWT proof of possession.
pub const CONTENT_TYPE: &str = "openid4vci-proof+cwt";

/// Protected header label for an embedded `COSE_Key`.
pub const COSE_KEY_LABEL: &str = "COSE_Key";

// CWT claim keys
const ISS: i64 = 1;
const AUD: i64 = 3;
const IAT: i64 = 6;
const NONCE: i64 = 10;

// x5chain header parameter (RFC 9360)
const X5CHAIN: i64 = 33;

/// The COSE algorithm for a JOSE algorithm. Algorithms without a registered
/// COSE identifier return `None`.
#[must_use]
pub const fn algorithm(alg: &Algorithm) -> Option<iana::Algorithm> {
    let cose_alg = match alg {
        Algorithm::EdDSA => iana::Algorithm::EdDSA,
        Algorithm::ES256 => iana::Algorithm::ES256,
        Algorithm::ES256K => iana::Algorithm::ES256K,
        Algorithm::ES384 => iana::Algorithm::ES384,
        Algorithm::ES512 => iana::Algorithm::ES512,
        Algorithm::RS256 => iana::Algorithm::RS256,
        Algorithm::RS384 => iana::Algorithm::RS384,
        Algorithm::RS512 => iana::Algorithm::RS512,
        Algorithm::PS256 => iana::Algorithm::PS256,
        Algorithm::PS384 => iana::Algorithm::PS384,
        Algorithm::PS512 => iana::Algorithm::PS512,
        Algorithm::Other(_) => return None,
    };
    Some(cose_alg)
}

/// Convert a public JWK to a `COSE_Key`.
///
/// # Errors
///
/// Returns an `Error::Encoding` if a required key parameter is missing or is
/// not valid base64url.
pub fn cose_key(jwk: &PublicKeyJwk) -> Result<Value> {
    let mut cbor = vec![];
    match jwk.kty {
        // kty: 1, Okp: 1, crv: -1, x: -2
        KeyType::Okp => {
            cbor.push((Value::from(1), Value::from(1)));
            cbor.push((Value::from(-1), Value::from(curve(jwk.crv.as_ref())?)));
            cbor.push((Value::from(-2), Value::Bytes(decode_param(jwk.x.as_ref(), "x")?)));
        }
        // kty: 1, Ec2: 2, crv: -1, x: -2, y: -3
        KeyType::Ec => {
            cbor.push((Value::from(1), Value::from(2)));
            cbor.push((Value::from(-1), Value::from(curve(jwk.crv.as_ref())?)));
            cbor.push((Value::from(-2), Value::Bytes(decode_param(jwk.x.as_ref(), "x")?)));
            cbor.push((Value::from(-3), Value::Bytes(decode_param(jwk.y.as_ref(), "y")?)));
        }
        // kty: 1, Rsa: 3, n: -1, e: -2
        KeyType::Rsa => {
            cbor.push((Value::from(1), Value::from(3)));
            cbor.push((Value::from(-1), Value::Bytes(decode_param(jwk.n.as_ref(), "n")?)));
            cbor.push((Value::from(-2), Value::Bytes(decode_param(jwk.e.as_ref(), "e")?)));
        }
    }
    Ok(Value::Map(cbor))
}

fn curve(crv: Option<&Curve>) -> Result<i64> {
    let Some(crv) = crv else {
        return Err(Error::Encoding("JWK 'crv' is missing".to_string()));
    };
    let value = match crv {
        Curve::P256 => 1,
        Curve::P384 => 2,
        Curve::P521 => 3,
        Curve::Ed25519 => 6,
        Curve::Secp256k1 => 8,
    };
    Ok(value)
}

fn decode_param(param: Option<&String>, name: &str) -> Result<Vec<u8>> {
    let Some(param) = param else {
        return Err(Error::Encoding(format!("JWK '{name}' is missing")));
    };
    Base64UrlUnpadded::decode_vec(param)
        .map_err(|e| Error::Encoding(format!("issue decoding JWK '{name}': {e}")))
}

/// Build the protected header for a CWT proof.
///
/// # Errors
///
/// Returns an `Error::Encoding` if the binding key cannot be represented in
/// COSE.
pub fn protected_header(alg: iana::Algorithm, key: &BindingKey) -> Result<Header> {
    let builder = HeaderBuilder::new().algorithm(alg).content_type(CONTENT_TYPE.to_string());

    let header = match key {
        BindingKey::Jwk(jwk) => {
            let mut header = builder.build();
            header.rest.push((Label::Text(COSE_KEY_LABEL.to_string()), cose_key(jwk)?));
            header
        }
        BindingKey::Did(url) => builder.key_id(url.as_bytes().to_vec()).build(),
        BindingKey::X509(chain) => {
            let mut certs = chain
                .iter()
                .map(|cert| {
                    Base64::decode_vec(cert)
                        .map(Value::Bytes)
                        .map_err(|e| Error::Encoding(format!("issue decoding x5c: {e}")))
                })
                .collect::<Result<Vec<_>>>()?;
            let value = if certs.len() == 1 { certs.remove(0) } else { Value::Array(certs) };

            let mut header = builder.build();
            header.rest.push((Label::Int(X5CHAIN), value));
            header
        }
    };

    Ok(header)
}

/// Encode proof claims as a CBOR CWT claims map.
///
/// # Errors
///
/// Returns an `Error::Encoding` if the claims cannot be serialized.
pub fn claims(claims: &ProofClaims) -> Result<Vec<u8>> {
    let map = vec![
        (Value::from(ISS), Value::Text(claims.iss.clone())),
        (Value::from(AUD), Value::Text(claims.aud.clone())),
        (Value::from(IAT), Value::from(claims.iat)),
        (Value::from(NONCE), Value::Text(claims.nonce.clone())),
    ];

    let mut buf = vec![];
    ciborium::into_writer(&Value::Map(map), &mut buf)
        .map_err(|e| Error::Encoding(format!("issue encoding CWT claims: {e}")))?;
    Ok(buf)
}

/// An unsigned `COSE_Sign1` over the claims. The signature is added once the
/// signer has signed [`CoseSign1::tbs_data`].
#[must_use]
pub fn sign1(protected: Header, payload: Vec<u8>) -> CoseSign1 {
    CoseSign1Builder::new().protected(protected).payload(payload).build()
}
