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

use std::str::FromStr;

use bherror::Error;
use serde::{Deserialize, Serialize};

use crate::{error::SignatureError, utils::BoxError, JwkPublic};

/// JOSE asymmetric signature algorithms which may appear in the `alg` header
/// of a signed Verifiable Credential or Presentation.
///
/// The default is [`SigningAlgorithm::Es256k`], the algorithm used by DID
/// methods anchored on secp256k1 ledgers.
///
/// For more details see [RFC7518] and [RFC8812].
///
/// [RFC7518]: https://datatracker.ietf.org/doc/html/rfc7518#section-3.1
/// [RFC8812]: https://datatracker.ietf.org/doc/html/rfc8812#section-3.2
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SigningAlgorithm {
    /// ECDSA over secp256k1 with SHA-256
    #[default]
    #[serde(rename = "ES256K")]
    Es256k,
    /// ECDSA over P-256 with SHA-256
    #[serde(rename = "ES256")]
    Es256,
    /// ECDSA over P-384 with SHA-384
    #[serde(rename = "ES384")]
    Es384,
    /// ECDSA over P-521 with SHA-512
    #[serde(rename = "ES512")]
    Es512,
}

/// JWS `"alg"` header parameter value for digital signature algorithm
/// **ECDSA using secp256k1 and SHA-256**, as specified in [RFC8812].
///
/// [RFC8812]: https://datatracker.ietf.org/doc/html/rfc8812#section-3.2
pub const SIGNING_ALG_ES256K: &str = "ES256K";
/// JWS `"alg"` header parameter value for digital signature algorithm
/// **ECDSA using P-256 and SHA-256**, as specified in [RFC7518].
///
/// [RFC7518]: https://datatracker.ietf.org/doc/html/rfc7518#section-3.1
pub const SIGNING_ALG_ES256: &str = "ES256";
/// JWS `"alg"` header parameter value for digital signature algorithm
/// **ECDSA using P-384 and SHA-384**, as specified in [RFC7518].
///
/// [RFC7518]: https://datatracker.ietf.org/doc/html/rfc7518#section-3.1
pub const SIGNING_ALG_ES384: &str = "ES384";
/// JWS `"alg"` header parameter value for digital signature algorithm
/// **ECDSA using P-521 and SHA-512**, as specified in [RFC7518].
///
/// [RFC7518]: https://datatracker.ietf.org/doc/html/rfc7518#section-3.1
pub const SIGNING_ALG_ES512: &str = "ES512";

impl FromStr for SigningAlgorithm {
    type Err = Error<SignatureError>;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            SIGNING_ALG_ES256K => Ok(SigningAlgorithm::Es256k),
            SIGNING_ALG_ES256 => Ok(SigningAlgorithm::Es256),
            SIGNING_ALG_ES384 => Ok(SigningAlgorithm::Es384),
            SIGNING_ALG_ES512 => Ok(SigningAlgorithm::Es512),
            _ => Err(Error::root(SignatureError::InvalidSigningAlgorithm(
                value.to_string(),
            ))),
        }
    }
}

impl SigningAlgorithm {
    /// The `alg` header parameter value of the algorithm.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Es256k => SIGNING_ALG_ES256K,
            Self::Es256 => SIGNING_ALG_ES256,
            Self::Es384 => SIGNING_ALG_ES384,
            Self::Es512 => SIGNING_ALG_ES512,
        }
    }
}

impl std::fmt::Display for SigningAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An external signing backend, to be used for computing a JWS signature.
///
/// The output of the signer, regardless of the algorithm, must be a valid **JWS signature**.
/// See step 5 in [section 5.1 of RFC7515](https://www.rfc-editor.org/rfc/rfc7515.html#section-5.1)
/// for more information.
pub trait Signer {
    /// The algorithm this signer uses. Must be a constant function.
    fn algorithm(&self) -> SigningAlgorithm;

    /// Produce a JWS signature as a byte array, not yet base64url-encoded.
    ///
    /// The `message` is guaranteed to be a valid JWS signing input, i.e.
    /// `<header>.<payload>`.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, BoxError>;
}

/// Subtrait for [`Signer`]-s which have an associated JWK `kid` (Key ID) parameter.
/// This is used to set the `kid` header parameter when signing.
pub trait HasJwkKid: Signer {
    /// Return the `kid` parameter of the associated JWK.
    ///
    /// See [section 4.5 of RFC7517](https://datatracker.ietf.org/doc/html/rfc7517#section-4.5)
    /// for more details.
    fn jwk_kid(&self) -> &str;
}

/// An external backend for signature verification, to be used for verifying
/// JWS signatures.
pub trait SignatureVerifier {
    /// The algorithm used for the signature verification.
    fn algorithm(&self) -> SigningAlgorithm;

    /// Verifies the signature of the message, against the provided public key.
    ///
    /// The algorithm used to verify the signature must be the one returned by
    /// [`SignatureVerifier::algorithm`].
    ///
    /// # Return
    /// Method returns `Ok(true)` if the signature is valid for the given
    /// message, `Ok(false)` if it isn't (but there was no issue with the
    /// verifier itself), and `Err(_)` when the verifier itself encounters an
    /// error for any other reason.
    fn verify(
        &self,
        message: &[u8],
        signature: &[u8],
        public_key: &JwkPublic,
    ) -> Result<bool, BoxError>;
}
