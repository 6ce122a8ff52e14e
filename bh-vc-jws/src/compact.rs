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

use bherror::{
    traits::{ErrorContext as _, ForeignBoxed as _, ForeignError as _},
    Error, Result,
};
use jwt::{FromBase64 as _, ToBase64 as _};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    error::{FormatError, SignatureError},
    utils, JwkPublic, SignatureVerifier, Signer, SigningAlgorithm, JWS_SEGMENT_SEPARATOR,
};

/// The `typ` header value of JWT-encoded Verifiable Credentials and
/// Presentations.
pub const JWT_TYP: &str = "JWT";

/// The JOSE header of a compact JWS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwsHeader {
    /// The `alg` header parameter.
    pub alg: SigningAlgorithm,
    /// The `kid` header parameter, identifying the signing key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    /// The `typ` header parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
}

impl JwsHeader {
    /// Create a header for the given algorithm and key ID, with `typ` set to
    /// [`JWT_TYP`].
    pub fn new(alg: SigningAlgorithm, kid: Option<&str>) -> Self {
        Self {
            alg,
            kid: kid.map(str::to_owned),
            typ: Some(JWT_TYP.to_owned()),
        }
    }
}

/// A JWS in the [compact serialization], i.e.
/// `<header>.<payload>.<signature>` with every segment `base64url`-encoded.
///
/// A value of this type always has a well-formed [`JwsHeader`] and a
/// decodable signature; the payload is only decoded on demand through
/// [`CompactJws::claims`].
///
/// [compact serialization]: https://www.rfc-editor.org/rfc/rfc7515.html#section-7.1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactJws {
    raw: String,
    header: JwsHeader,
    header_len: usize,
    signing_input_len: usize,
    signature: Vec<u8>,
}

impl CompactJws {
    /// Sign the `claims` with the `signer`, producing a compact JWS.
    ///
    /// The algorithm of the `header` must be the one of the `signer`,
    /// otherwise [`SignatureError::AlgorithmMismatch`] is returned.
    pub fn sign<C, S>(header: &JwsHeader, claims: &C, signer: &S) -> Result<Self, SignatureError>
    where
        C: Serialize,
        S: Signer + ?Sized,
    {
        let signer_alg = signer.algorithm();
        if header.alg != signer_alg {
            return Err(Error::root(SignatureError::AlgorithmMismatch(
                header.alg, signer_alg,
            )));
        }

        let header_segment = header
            .to_base64()
            .foreign_err(|| SignatureError::SigningFailed)
            .ctx(|| "unable to encode the header")?;
        let claims_segment = claims
            .to_base64()
            .foreign_err(|| SignatureError::SigningFailed)
            .ctx(|| "unable to encode the claims")?;

        let signing_input = utils::construct_jws_payload(&header_segment, &claims_segment);

        let signature = signer
            .sign(signing_input.as_bytes())
            .foreign_boxed_err(|| SignatureError::SigningFailed)?;

        let header_len = header_segment.len();
        let signing_input_len = signing_input.len();
        let raw = format!(
            "{signing_input}{JWS_SEGMENT_SEPARATOR}{}",
            utils::base64_url_encode(&signature)
        );

        Ok(Self {
            raw,
            header: header.clone(),
            header_len,
            signing_input_len,
            signature,
        })
    }

    /// Parse a compact JWS, without verifying its signature.
    ///
    /// Fails with [`FormatError::InvalidSegmentCount`] unless the token
    /// consists of exactly three segments, and with
    /// [`FormatError::UndecodableSegment`] when the header or the signature
    /// cannot be decoded.
    pub fn parse(token: &str) -> Result<Self, FormatError> {
        let segments: Vec<&str> = token.split(JWS_SEGMENT_SEPARATOR).collect();
        let [header_segment, _, signature_segment] = segments[..] else {
            return Err(Error::root(FormatError::InvalidSegmentCount(
                segments.len(),
            )));
        };

        let header = JwsHeader::from_base64(header_segment)
            .foreign_err(|| FormatError::UndecodableSegment("header"))?;
        let signature = utils::base64_url_decode(signature_segment)
            .foreign_err(|| FormatError::UndecodableSegment("signature"))?;

        Ok(Self {
            raw: token.to_owned(),
            header,
            header_len: header_segment.len(),
            signing_input_len: token.len() - signature_segment.len() - 1,
            signature,
        })
    }

    /// The decoded JOSE header.
    pub fn header(&self) -> &JwsHeader {
        &self.header
    }

    /// Decode the payload into the claims type `C`.
    pub fn claims<C: DeserializeOwned>(&self) -> Result<C, FormatError> {
        let payload_segment = &self.raw[self.header_len + 1..self.signing_input_len];

        C::from_base64(payload_segment)
            .foreign_err(|| FormatError::UndecodableSegment("payload"))
    }

    /// The JWS signing input, i.e. `<header>.<payload>`.
    pub fn signing_input(&self) -> &str {
        &self.raw[..self.signing_input_len]
    }

    /// The raw signature bytes.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Verify the signature of this JWS with the given `verifier` and
    /// `public_key`.
    ///
    /// Returns `Ok(false)` when the signature is simply invalid. Fails with
    /// [`SignatureError::AlgorithmMismatch`] when the header names another
    /// algorithm than the verifier's, and with
    /// [`SignatureError::VerificationFailed`] when the verifier itself fails.
    pub fn verify_signature<V>(
        &self,
        verifier: &V,
        public_key: &JwkPublic,
    ) -> Result<bool, SignatureError>
    where
        V: SignatureVerifier + ?Sized,
    {
        let verifier_alg = verifier.algorithm();
        if self.header.alg != verifier_alg {
            return Err(Error::root(SignatureError::AlgorithmMismatch(
                self.header.alg,
                verifier_alg,
            )));
        }

        let valid = verifier
            .verify(
                self.signing_input().as_bytes(),
                &self.signature,
                public_key,
            )
            .foreign_boxed_err(|| SignatureError::VerificationFailed)?;

        tracing::debug!(alg = %verifier_alg, valid, "JWS signature checked");

        Ok(valid)
    }

    /// The compact serialization as a string slice.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Consume the JWS, returning its compact serialization.
    pub fn into_string(self) -> String {
        self.raw
    }
}

impl std::fmt::Display for CompactJws {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
