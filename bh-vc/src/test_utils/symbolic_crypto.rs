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

use std::{borrow::Cow, str::FromStr};

use bh_vc_jws::{BoxError, HasJwkKid, JwkPublic, SignatureVerifier, Signer, SigningAlgorithm};
use serde::{Deserialize, Serialize};

use crate::{json_object, JsonObject};

pub(crate) struct StubSigner {
    pub(crate) public_jwk: JwkPublic,
}

/// Symbolic signature over the given message with the would-be private key
/// corresponding to the given public key, in lieu of a real signature algorithm.
///
/// Bulky, but tests the important thing: over which message and using which
/// key pair was the signature produced, regardless of the (correctness of
/// the) implementation of the signature algorithm.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct StubSignature<'m, 'k>(Cow<'m, [u8]>, Cow<'k, JwkPublic>);

impl StubSignature<'_, '_> {
    pub(crate) fn verify(&self, message: &[u8], public_key: &JwkPublic) -> bool {
        self == &StubSignature(message.into(), Cow::Borrowed(public_key))
    }
}

fn jwk_algorithm(public_jwk: &JwkPublic) -> SigningAlgorithm {
    SigningAlgorithm::from_str(public_jwk.get("alg").unwrap().as_str().unwrap()).unwrap()
}

impl Signer for StubSigner {
    fn algorithm(&self) -> SigningAlgorithm {
        jwk_algorithm(&self.public_jwk)
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, BoxError> {
        Ok(serde_json::to_string(&StubSignature(
            message.into(),
            Cow::Borrowed(&self.public_jwk),
        ))?
        .into_bytes())
    }
}

impl HasJwkKid for StubSigner {
    fn jwk_kid(&self) -> &str {
        self.public_jwk.get("kid").unwrap().as_str().unwrap()
    }
}

impl Default for StubSigner {
    fn default() -> Self {
        Self {
            public_jwk: dummy_public_jwk(),
        }
    }
}

#[derive(Clone)]
pub(crate) struct StubVerifier {
    pub(crate) public_jwk: JwkPublic,
}

impl Default for StubVerifier {
    fn default() -> Self {
        Self {
            public_jwk: dummy_public_jwk(),
        }
    }
}

impl SignatureVerifier for StubVerifier {
    fn algorithm(&self) -> SigningAlgorithm {
        jwk_algorithm(&self.public_jwk)
    }

    fn verify(
        &self,
        message: &[u8],
        signature: &[u8],
        public_key: &JwkPublic,
    ) -> Result<bool, BoxError> {
        let Ok(symbolic_signature) = serde_json::from_slice::<StubSignature>(signature) else {
            return Ok(false);
        };
        Ok(symbolic_signature.verify(message, public_key))
    }
}

pub(crate) fn dummy_public_jwk() -> JsonObject {
    json_object!({
        "kid": "did:example:abc#key-1",
        "alg": "ES256K",
    })
}

pub(crate) fn other_public_jwk() -> JsonObject {
    json_object!({
        "kid": "did:example:other#key-1",
        "alg": "ES256K",
    })
}
