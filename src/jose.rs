//! # JSON Object Signing and Encryption (JOSE)
//!
//! The subset of JOSE a holder needs to produce a JWT proof of possession:
//! algorithm identifiers (JWA [RFC7518]), public keys (JWK [RFC7517]) and
//! compact JWS [RFC7515] encoding of the proof header and claims.
//!
//! [RFC7515]: https://www.rfc-editor.org/rfc/rfc7515
//! [RFC7517]: https://www.rfc-editor.org/rfc/rfc7517
//! [RFC7518]: https://www.rfc-editor.org/rfc/rfc7518

pub mod jwa;
pub mod jwk;
pub mod jws;

pub use jwa::Algorithm;
pub use jwk::PublicKeyJwk;
pub use jws::{Header, Type};
