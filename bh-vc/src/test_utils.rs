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

use bh_vc_jws::{BoxError, JwkPublic, SignatureVerifier, Signer, SigningAlgorithm};
use chrono::{TimeZone as _, Utc};
use serde_json::json;

use crate::{Credential, Presentation};

pub(crate) mod symbolic_crypto;

/// The credential used throughout the tests, with every promotable member set.
pub(crate) fn dummy_credential() -> Credential {
    let mut credential = Credential::new();
    credential.set_id("urn:1");
    credential.set_issuer("did:example:abc");
    credential.set_issuance_date(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    credential.set_expiration_date(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
    credential.set_credential_subject(json!({ "id": "did:example:subj", "name": "A" }));
    credential
}

/// A presentation holding the same compact credential twice.
pub(crate) fn dummy_presentation() -> Presentation {
    let mut presentation = Presentation::new();
    presentation.set_id("urn:vp:1");
    presentation.set_holder("did:example:holder");
    presentation.add_verifiable_credential("a.b.c");
    presentation.add_verifiable_credential("a.b.c");
    presentation
}

#[derive(Debug)]
pub(crate) struct BackendUnavailable;

impl std::fmt::Display for BackendUnavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("backend unavailable")
    }
}

impl std::error::Error for BackendUnavailable {}

/// A backend which errors out on every operation, for the given algorithm.
pub(crate) struct FailingBackend(pub(crate) SigningAlgorithm);

impl Signer for FailingBackend {
    fn algorithm(&self) -> SigningAlgorithm {
        self.0
    }

    fn sign(&self, _message: &[u8]) -> Result<Vec<u8>, BoxError> {
        Err(Box::new(BackendUnavailable))
    }
}

impl SignatureVerifier for FailingBackend {
    fn algorithm(&self) -> SigningAlgorithm {
        self.0
    }

    fn verify(
        &self,
        _message: &[u8],
        _signature: &[u8],
        _public_key: &JwkPublic,
    ) -> Result<bool, BoxError> {
        Err(Box::new(BackendUnavailable))
    }
}
