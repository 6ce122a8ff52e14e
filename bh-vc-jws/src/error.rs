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

use crate::SigningAlgorithm;

/// Error in the format of a JWK or a compact JWS
#[derive(strum_macros::Display, Debug, PartialEq, Clone)]
pub enum FormatError {
    /// Error that occurs when JWK parsing failed
    #[strum(to_string = "JWK parsing failed: {0}")]
    JwkParsingFailed(String),
    /// Error that occurs when a compact JWS does not consist of exactly three
    /// `.`-separated segments
    #[strum(to_string = "Malformed compact JWS: expected 3 segments, found {0}")]
    InvalidSegmentCount(usize),
    /// Error that occurs when a segment of a compact JWS cannot be decoded
    #[strum(to_string = "Malformed compact JWS: undecodable {0} segment")]
    UndecodableSegment(&'static str),
}

impl bherror::BhError for FormatError {}

/// Error in JWS signature
#[derive(strum_macros::Display, Debug, PartialEq, Clone)]
pub enum SignatureError {
    /// Error that occurs when the signing algorithm is invalid
    #[strum(to_string = "Invalid signing algorithm {0}")]
    InvalidSigningAlgorithm(String),
    /// Error that occurs when the algorithm in the JWS header differs from
    /// the one used by the signing or verifying backend
    #[strum(to_string = "Algorithm mismatch: header uses {0}, backend uses {1}")]
    AlgorithmMismatch(SigningAlgorithm, SigningAlgorithm),
    /// Error that occurs when the header or claims cannot be encoded, or the
    /// signing backend fails
    #[strum(to_string = "Signing failed")]
    SigningFailed,
    /// Error that occurs when the verifying backend itself fails, as opposed to
    /// reporting an invalid signature
    #[strum(to_string = "Signature verification failed")]
    VerificationFailed,
}

impl bherror::BhError for SignatureError {}

/// Cryptographic error
#[derive(strum_macros::Display, Debug, PartialEq, Clone)]
pub enum CryptoError {
    /// Error that occurs when key generation failed
    #[strum(to_string = "Key generation failed")]
    KeyGenerationFailed,
    /// Error that occurs when the cryptographic backend
    /// unexpectedly failed
    #[strum(to_string = "Crypto backend failed")]
    CryptoBackend,
    /// Error that occurs when a public key is incorrectly formatted or
    /// otherwise not valid.
    #[strum(to_string = "Invalid public key")]
    InvalidPublicKey,
}

impl bherror::BhError for CryptoError {}
