// Copyright (C) 2020-2026  The Blockhouse Technology Limited (TBTL).
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or (at your
// option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public
// License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::result::Result as StdResult;

use bherror::{
    traits::{ErrorContext, ForeignError, PropagateError as _},
    Error, Result,
};
use openssl::{
    bn::{BigNum, BigNumContext},
    ec::{EcGroup, EcGroupRef, EcKey, EcPointRef},
    ecdsa::EcdsaSig,
    nid::Nid,
    pkey::{Private, Public},
    sha::sha256,
};

use crate::{
    error::{CryptoError, FormatError},
    secp256k1_public_affine_coords_to_jwk, utils, BoxError, Coordinate, HasJwkKid, JwkPublic,
    SignatureVerifier, Signer, SigningAlgorithm, JWK_CRV_SECP256K1, JWK_KTY_EC,
};

type EcPrivate = EcKey<Private>;
type EcPublic = EcKey<Public>;

/// Length in bytes of a single `r` or `s` signature component.
const COMPONENT_LEN: usize = 32;

pub(crate) const ELLIPTIC_CURVE_NID: Nid = Nid::SECP256K1;

fn secp256k1_group() -> Result<EcGroup, CryptoError> {
    EcGroup::from_curve_name(ELLIPTIC_CURVE_NID).foreign_err(|| CryptoError::CryptoBackend)
}

fn to_coordinate(value: &BigNum) -> Result<Coordinate, CryptoError> {
    let bytes = value
        .to_vec_padded(COMPONENT_LEN as i32)
        .foreign_err(|| CryptoError::CryptoBackend)?;

    Coordinate::try_from(bytes.as_slice())
        .foreign_err(|| CryptoError::CryptoBackend)
        .ctx(|| format!("coordinate has {} bytes", bytes.len()))
}

/// Returns the affine coordinates of the public key.
fn to_affine_coords(
    point: &EcPointRef,
    group: &EcGroupRef,
) -> Result<(Coordinate, Coordinate), CryptoError> {
    let mut x = BigNum::new().foreign_err(|| CryptoError::CryptoBackend)?;
    let mut y = BigNum::new().foreign_err(|| CryptoError::CryptoBackend)?;
    let mut ctx = BigNumContext::new().foreign_err(|| CryptoError::CryptoBackend)?;
    point
        .affine_coordinates(group, &mut x, &mut y, &mut ctx)
        .foreign_err(|| CryptoError::CryptoBackend)?;

    Ok((to_coordinate(&x)?, to_coordinate(&y)?))
}

/// [`Signer`] implementation supporting the `ES256K` algorithm (ECDSA using
/// the secp256k1 curve and the SHA-256 hash function).
pub struct Es256kSigner {
    private_key: EcPrivate,
    kid: String,
}

impl Es256kSigner {
    /// Generate a fresh `ES256K` key with the given `kid` field when presented as a JWK.
    pub fn generate(kid: String) -> Result<Self, CryptoError> {
        let ec_group = secp256k1_group()?;
        let private_key = EcPrivate::generate(ec_group.as_ref())
            .foreign_err(|| CryptoError::KeyGenerationFailed)?;

        Ok(Self { private_key, kid })
    }

    /// Create a `ES256K` signer from private key in the PEM format.
    ///
    /// Keys on any curve other than secp256k1 are rejected.
    pub fn from_private_key_pem(kid: String, private_key_pem: &[u8]) -> Result<Self, CryptoError> {
        let private_key = EcPrivate::private_key_from_pem(private_key_pem)
            .foreign_err(|| CryptoError::CryptoBackend)?;

        if private_key.group().curve_name() != Some(ELLIPTIC_CURVE_NID) {
            return Err(Error::root(CryptoError::InvalidPublicKey))
                .ctx(|| format!("expected key on {JWK_CRV_SECP256K1}"));
        }

        Ok(Self { private_key, kid })
    }

    /// Serialize the private key to the PEM format.
    pub fn private_key_pem(&self) -> Result<Vec<u8>, CryptoError> {
        self.private_key
            .private_key_to_pem()
            .foreign_err(|| CryptoError::CryptoBackend)
    }

    /// Construct a JWK JSON object for the public counterpart of this key. It
    /// will use the `kid` field set at construction.
    pub fn public_jwk(&self) -> Result<JwkPublic, CryptoError> {
        let (x_bytes, y_bytes) =
            to_affine_coords(self.private_key.public_key(), self.private_key.group())?;

        Ok(secp256k1_public_affine_coords_to_jwk(
            &x_bytes,
            &y_bytes,
            Some(&self.kid),
        ))
    }
}

impl std::fmt::Debug for Es256kSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Es256kSigner")
            .field("kid", &self.kid)
            .finish_non_exhaustive()
    }
}

impl Signer for Es256kSigner {
    fn algorithm(&self) -> SigningAlgorithm {
        SigningAlgorithm::Es256k
    }

    fn sign(&self, message: &[u8]) -> StdResult<Vec<u8>, BoxError> {
        let digest = sha256(message);
        let signature = EcdsaSig::sign(&digest, self.private_key.as_ref())?;

        // JWS signatures are the fixed-width concatenation `r || s`
        let mut jws = signature.r().to_vec_padded(COMPONENT_LEN as i32)?;
        jws.extend(signature.s().to_vec_padded(COMPONENT_LEN as i32)?);
        Ok(jws)
    }
}

impl HasJwkKid for Es256kSigner {
    fn jwk_kid(&self) -> &str {
        &self.kid
    }
}

/// [`SignatureVerifier`] implementation supporting the `ES256K` algorithm
/// (ECDSA using the secp256k1 curve and the SHA-256 hash function).
#[derive(Debug, Default, Clone, Copy)]
pub struct Es256kVerifier;

impl SignatureVerifier for Es256kVerifier {
    fn algorithm(&self) -> SigningAlgorithm {
        SigningAlgorithm::Es256k
    }

    fn verify(
        &self,
        message: &[u8],
        signature: &[u8],
        public_key: &JwkPublic,
    ) -> StdResult<bool, BoxError> {
        let public_key = public_key_from_jwk_es256k(public_key)?;

        if signature.len() != 2 * COMPONENT_LEN {
            tracing::debug!(len = signature.len(), "ES256K signature has wrong length");
            return Ok(false);
        }
        let (r, s) = signature.split_at(COMPONENT_LEN);
        let r = BigNum::from_slice(r)?;
        let s = BigNum::from_slice(s)?;
        let ecdsa_sig = EcdsaSig::from_private_components(r, s)?;

        let digest = sha256(message);

        Ok(ecdsa_sig.verify(&digest, public_key.as_ref())?)
    }
}

/// Reconstruct a secp256k1 public key from its JWK representation.
pub(crate) fn public_key_from_jwk_es256k(public_key: &JwkPublic) -> Result<EcPublic, FormatError> {
    check_jwk_field(public_key, "kty", JWK_KTY_EC)?;
    check_jwk_field(public_key, "crv", JWK_CRV_SECP256K1)?;

    let x = parse_coord(public_key, "x")?;
    let y = parse_coord(public_key, "y")?;

    let group = secp256k1_group()
        .with_err(|| FormatError::JwkParsingFailed("curve construction failed".to_string()))?;
    EcPublic::from_public_key_affine_coordinates(group.as_ref(), x.as_ref(), y.as_ref())
        .foreign_err(|| FormatError::JwkParsingFailed("coordinate construction failed".to_string()))
}

fn check_jwk_field(
    public_key: &JwkPublic,
    field: &str,
    expected_value: &str,
) -> Result<(), FormatError> {
    let error = |message| Error::root(FormatError::JwkParsingFailed(message));

    let value = public_key
        .get(field)
        .ok_or_else(|| error(format!("missing \"{}\" field", field)))?;

    if value == expected_value {
        return Ok(());
    }

    Err(error(format!("incorrect value on \"{}\" field", field))).ctx(|| {
        format!(
            "value on field \"{}\" was {}, expected {}",
            field, value, expected_value
        )
    })
}

fn parse_coord(public_key: &JwkPublic, coord: &str) -> Result<BigNum, FormatError> {
    let error = |message| Error::root(FormatError::JwkParsingFailed(message));

    let base64_coord = public_key
        .get(coord)
        .and_then(|value| value.as_str())
        .ok_or_else(|| error(format!("fetching coordinate {} failed", coord)))?;
    let bytes = utils::base64_url_decode(base64_coord)
        .foreign_err(|| FormatError::JwkParsingFailed("decoding coord failed".to_string()))
        .ctx(|| format!("decoding coord {0} failed", base64_coord))?;

    if bytes.len() != COMPONENT_LEN {
        return Err(error("parsing coord failed".to_string()))
            .ctx(|| format!("coord {} has {} bytes", coord, bytes.len()));
    }

    BigNum::from_slice(&bytes)
        .foreign_err(|| FormatError::JwkParsingFailed("Failed to construct BigNum".to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    fn simple_verify_setup() -> (JwkPublic, [u8; 25], Vec<u8>) {
        let signer = Es256kSigner::generate("test key id".to_owned()).unwrap();
        let public_jwk = signer.public_jwk().unwrap();

        let message = b"Test message to be signed";
        let signature = signer.sign(message).unwrap();

        (public_jwk, *message, signature)
    }

    #[test]
    fn sign_verify_bytes() {
        let (public_jwk, message, signature) = simple_verify_setup();

        assert_eq!(signature.len(), 64);
        assert!(Es256kVerifier
            .verify(&message, &signature, &public_jwk)
            .unwrap());
    }

    #[test]
    fn public_jwk_uses_secp256k1() {
        let signer = Es256kSigner::generate("did:example:123#key-1".to_owned()).unwrap();
        let public_jwk = signer.public_jwk().unwrap();

        assert_eq!(public_jwk["crv"], "secp256k1");
        assert_eq!(public_jwk["alg"], "ES256K");
        assert_eq!(public_jwk["kid"], "did:example:123#key-1");
        assert_eq!(signer.jwk_kid(), "did:example:123#key-1");
    }

    #[test]
    fn tampered_message_is_rejected() {
        let (public_jwk, mut message, signature) = simple_verify_setup();

        message[0] ^= 1;

        assert!(!Es256kVerifier
            .verify(&message, &signature, &public_jwk)
            .unwrap());
    }

    #[test]
    fn signature_of_wrong_length_is_rejected() {
        let (public_jwk, message, mut signature) = simple_verify_setup();

        signature.pop();

        assert!(!Es256kVerifier
            .verify(&message, &signature, &public_jwk)
            .unwrap());
    }

    #[test]
    fn signature_from_other_key_is_rejected() {
        let (_, message, signature) = simple_verify_setup();
        let other_jwk = Es256kSigner::generate("other".to_owned())
            .unwrap()
            .public_jwk()
            .unwrap();

        assert!(!Es256kVerifier
            .verify(&message, &signature, &other_jwk)
            .unwrap());
    }

    #[test]
    fn private_key_pem_round_trip_keeps_public_key() {
        let signer = Es256kSigner::generate("kid".to_owned()).unwrap();
        let pem = signer.private_key_pem().unwrap();

        let restored = Es256kSigner::from_private_key_pem("kid".to_owned(), &pem).unwrap();

        assert_eq!(signer.public_jwk().unwrap(), restored.public_jwk().unwrap());
    }

    #[test]
    fn p256_private_key_is_rejected() {
        let group = EcGroup::from_curve_name(Nid::X9_62_PRIME256V1).unwrap();
        let pem = EcPrivate::generate(&group)
            .unwrap()
            .private_key_to_pem()
            .unwrap();

        let error = Es256kSigner::from_private_key_pem("kid".to_owned(), &pem).unwrap_err();

        assert_eq!(error.error, CryptoError::InvalidPublicKey);
    }

    #[test]
    fn es256k_verifier_invalid_jwk_missing_kty_field() {
        let (mut public_jwk, message, signature) = simple_verify_setup();

        public_jwk.remove("kty");

        let error = Es256kVerifier
            .verify(&message, &signature, &public_jwk)
            .unwrap_err();

        assert_eq!(
            error.downcast::<Error<FormatError>>().unwrap().error,
            FormatError::JwkParsingFailed("missing \"kty\" field".to_string())
        );
    }

    #[test]
    fn es256k_verifier_rejects_p256_jwk() {
        let (mut public_jwk, message, signature) = simple_verify_setup();

        public_jwk.insert("crv".to_string(), Value::String("P-256".to_string()));

        let error = Es256kVerifier
            .verify(&message, &signature, &public_jwk)
            .unwrap_err();

        assert_eq!(
            error.downcast::<Error<FormatError>>().unwrap().error,
            FormatError::JwkParsingFailed("incorrect value on \"crv\" field".to_string())
        );
    }

    #[test]
    fn es256k_verifier_rejects_short_coordinate() {
        let (mut public_jwk, message, signature) = simple_verify_setup();

        public_jwk.insert("x".to_string(), Value::String("AAAA".to_string()));

        let error = Es256kVerifier
            .verify(&message, &signature, &public_jwk)
            .unwrap_err();

        assert_eq!(
            error.downcast::<Error<FormatError>>().unwrap().error,
            FormatError::JwkParsingFailed("parsing coord failed".to_string())
        );
    }
}
