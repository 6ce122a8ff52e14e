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

use bh_vc_jws::SigningAlgorithm;

/// Top-level error type for the Verifiable Credentials crate.
#[derive(strum_macros::Display, Debug, PartialEq, Clone)]
pub enum Error {
    /// The input is not valid JSON.
    #[strum(to_string = "Malformed JSON")]
    MalformedJson,

    /// The input is valid JSON, but not a JSON object.
    #[strum(to_string = "JSON value is not an object")]
    NotAnObject,

    /// The `issuer` or `holder` of a document is not a valid URI.
    #[strum(to_string = "Invalid URI: {0}")]
    InvalidUri(String),

    /// The claims set does not carry an object-shaped `vc` claim.
    #[strum(to_string = "Invalid credential")]
    InvalidCredential,

    /// The claims set does not carry an object-shaped `vp` claim.
    #[strum(to_string = "Invalid presentation")]
    InvalidPresentation,

    /// The requested signing algorithm differs from the one of the signing or
    /// verifying backend.
    #[strum(to_string = "Algorithm mismatch: expected {0}, backend uses {1}")]
    AlgorithmMismatch(SigningAlgorithm, SigningAlgorithm),

    /// The signing backend failed to produce a signature.
    #[strum(to_string = "Signing failed")]
    SigningFailed,

    /// The claims set could not be serialized.
    #[strum(to_string = "Claims serialization failed")]
    ClaimsSerialization,

    /// The compact token is malformed or its payload is not a claims set.
    #[strum(to_string = "Token parsing failed")]
    TokenParsingFailed,

    /// The verifying backend failed, as opposed to rejecting the signature.
    #[strum(to_string = "Signature verification failed")]
    SignatureVerificationFailed,
}

impl bherror::BhError for Error {}

/// Result type used across the crate.
pub type Result<T> = bherror::Result<T, Error>;
