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

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

/// Type alias for a boxed error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Separator of the segments of a compact JWS.
pub const JWS_SEGMENT_SEPARATOR: char = '.';

/// Create payload for a `JWS`, given its header and claims.
///
/// The payload is constructed by concatenating the header and claims by `.`
/// character, i.e. `<header>.<claims>`, as defined [here].
///
/// [here]: https://www.rfc-editor.org/rfc/rfc7515.html#section-5.1
pub fn construct_jws_payload(header: &str, claims: &str) -> String {
    format!("{header}{JWS_SEGMENT_SEPARATOR}{claims}")
}

/// Returns the `base64url`-encoded string of the given `input`.
pub fn base64_url_encode<T: AsRef<[u8]>>(input: T) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decodes the given `payload` as the `base64url`-encoded string **without
/// padding** into bytes.
pub fn base64_url_decode<T: AsRef<[u8]>>(payload: T) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(payload)
}
