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

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! This crate implements [W3C Verifiable Credentials][1] and Verifiable
//! Presentations encoded as [JSON Web Tokens][2].
//!
//! [1]: <https://www.w3.org/TR/vc-data-model/>
//! [2]: <https://www.w3.org/TR/vc-data-model/#json-web-token>
//!
//! # Details
//!
//! The main components of this crate are the following.
//!
//! * [`ClaimDocument`] -- An ordered JSON-LD document, the base of
//!   [`Credential`] and [`Presentation`].
//! * [`JwtClaims`] -- The JWT claims set a document is projected to, through
//!   [`Credential::to_claims`], [`Presentation::to_claims`] and their
//!   `from_claims` counterparts.
//! * [`SigningEnvelope`] -- Signs documents as compact JWTs, while
//!   [`verify`] and friends check the signature and reconstruct the document.
//!
//! The cryptography is provided by any [`Signer`](bh_vc_jws::Signer) and
//! [`SignatureVerifier`](bh_vc_jws::SignatureVerifier) implementation; the
//! `bh-vc-jws` crate ships an `ES256K` one under the default `openssl`
//! feature.
//!
//! # Examples
//!
//! ```
//! # #[cfg(feature = "openssl")]
//! # {
//! use bh_vc::{
//!     bh_vc_jws::{Es256kSigner, Es256kVerifier},
//!     verify_credential, Credential, SigningEnvelope, Verification,
//! };
//! use serde_json::json;
//!
//! let signer = Es256kSigner::generate("did:example:abc#key-1".to_string()).unwrap();
//! let public_jwk = signer.public_jwk().unwrap();
//!
//! let mut credential = Credential::new();
//! credential.set_id("urn:uuid:3978344f-8596-4c3a-a978-8fcaba3903c5");
//! credential.set_issuer("did:example:abc");
//! credential.set_credential_subject(json!({
//!     "id": "did:example:ebfeb1f712ebc6f1c276e12ec21",
//!     "degree": "BachelorDegree",
//! }));
//!
//! let token = SigningEnvelope::for_signer(&signer)
//!     .with_nonce("0d8mf03")
//!     .sign_credential(&credential)
//!     .unwrap();
//!
//! let verification = verify_credential(&token, &Es256kVerifier, &public_jwk).unwrap();
//! assert_eq!(verification, Verification::Verified(credential));
//! # }
//! ```

// Re-export the `bh-vc-jws` crate
pub use bh_vc_jws;
pub(crate) use bh_vc_jws::json_object;

mod claims;
mod credential;
mod date;
mod document;
mod envelope;
mod error;
mod presentation;
mod projector;
#[cfg(test)]
mod test_utils;

pub use claims::{Audience, JwtClaims, NumericDate};
pub use credential::{Credential, CREDENTIAL_TYPE};
pub use document::{ClaimDocument, CANONICAL_CONTEXT};
pub use envelope::{
    verify, verify_claims, verify_credential, verify_presentation, SigningEnvelope, Verification,
};
pub use error::{Error, Result};
pub use presentation::{Presentation, PRESENTATION_TYPE};
pub use projector::Verifiable;

/// A JSON object, with its members in insertion order.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;
