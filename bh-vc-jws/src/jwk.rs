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

use serde_json::{Map, Value};

use crate::{json_object, utils, SIGNING_ALG_ES256K};

/// A JSON object meant to represent a public JWK.
///
/// Since this is a type alias, no aspects of the schema are enforced; this is
/// left to any end-consumers of the public key, such as
/// [`SignatureVerifier`](crate::SignatureVerifier).
pub type JwkPublic = Map<String, Value>;

/// A 32-byte coordinate for the secp256k1 curve.
pub type Coordinate = [u8; 32];

/// JWK `"kty"` value of elliptic curve keys.
pub const JWK_KTY_EC: &str = "EC";

/// JWK `"crv"` value of the secp256k1 curve, as registered by [RFC8812].
///
/// [RFC8812]: https://datatracker.ietf.org/doc/html/rfc8812#section-3.1
pub const JWK_CRV_SECP256K1: &str = "secp256k1";

/// Constructs the JWK from the coordinates of a public ECDSA key on the
/// secp256k1 curve.
///
/// **Note**: this function **DOES NOT** check that the coordinates are valid.
pub fn secp256k1_public_affine_coords_to_jwk(
    x_bytes: &Coordinate,
    y_bytes: &Coordinate,
    kid: Option<&str>,
) -> JwkPublic {
    let x = utils::base64_url_encode(x_bytes);
    let y = utils::base64_url_encode(y_bytes);

    let mut jwk = json_object!({
        "kty": JWK_KTY_EC,
        "alg": SIGNING_ALG_ES256K,
        "use": "sig",
        "crv": JWK_CRV_SECP256K1,
        "x": x,
        "y": y,
    });

    if let Some(kid) = kid {
        jwk.insert("kid".to_owned(), Value::String(kid.to_owned()));
    }

    jwk
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jwk_carries_secp256k1_parameters() {
        let jwk = secp256k1_public_affine_coords_to_jwk(&[0u8; 32], &[1u8; 32], None);

        assert_eq!(jwk["kty"], JWK_KTY_EC);
        assert_eq!(jwk["crv"], JWK_CRV_SECP256K1);
        assert_eq!(jwk["alg"], SIGNING_ALG_ES256K);
        assert_eq!(jwk["x"], "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA");
        assert!(!jwk.contains_key("kid"));
    }

    #[test]
    fn jwk_kid_is_optional() {
        let jwk = secp256k1_public_affine_coords_to_jwk(&[0u8; 32], &[1u8; 32], Some("key-1"));

        assert_eq!(jwk["kid"], "key-1");
    }
}
