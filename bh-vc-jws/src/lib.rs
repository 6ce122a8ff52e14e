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

//! This crate provides functions and types for producing and consuming
//! [JSON Web Signatures (JWS)][1] in the compact serialization, as used for
//! JWT-encoded Verifiable Credentials and Presentations.
//!
//! [1]: https://datatracker.ietf.org/doc/html/rfc7515
//!
//! # Details
//!
//! The cryptography is injected through the [`Signer`] and
//! [`SignatureVerifier`] traits. [`CompactJws`] takes care of assembling the
//! `<header>.<payload>.<signature>` form and of handing the exact JWS signing
//! input to the backend.
//!
//! A default [`openssl`] backed implementation for `ES256K` (ECDSA using the
//! secp256k1 curve and SHA-256) is available as [`Es256kSigner`] and
//! [`Es256kVerifier`], under the default feature `openssl`.
//!
//! # Examples
//!
//! ```
//! # #[cfg(feature = "openssl")]
//! # {
//! use bh_vc_jws::{json_object, CompactJws, Es256kSigner, Es256kVerifier, JwsHeader, Signer};
//!
//! let signer = Es256kSigner::generate("did:example:issuer#key-1".to_string()).unwrap();
//! let header = JwsHeader::new(signer.algorithm(), Some("did:example:issuer#key-1"));
//!
//! let claims = json_object!({
//!     "iss": "did:example:issuer",
//!     "nonce": "0d8mf03",
//! });
//!
//! let token = CompactJws::sign(&header, &claims, &signer).unwrap();
//!
//! let public_jwk = signer.public_jwk().unwrap();
//! let parsed = CompactJws::parse(token.as_str()).unwrap();
//! assert!(parsed.verify_signature(&Es256kVerifier, &public_jwk).unwrap());
//! # }
//! ```

#[cfg(feature = "openssl")]
mod openssl_impl;

mod compact;
mod error;
mod jwk;
mod traits;
mod utils;

pub use compact::*;
pub use error::*;
pub use jwk::*;
// Re-export the `jwt` crate
pub use jwt;
#[cfg(feature = "openssl")]
pub use openssl_impl::*;
pub use traits::*;
pub use utils::*;

/// Helper macro with the same syntax as [`serde_json::json`] specialized for
/// constructing JSON objects.
///
/// It will construct a more specific type ([`serde_json::Map<String,Value>`])
/// than just [`serde_json::Value`] when constructing an object, and panic if
/// the syntax is valid JSON but not an object.
#[macro_export]
macro_rules! json_object {
    ($stuff:tt) => {
        match ::serde_json::json!($stuff) {
            ::serde_json::Value::Object(o) => o,
            _ => unreachable!("JSON literal wasn't an object"),
        }
    };
}
