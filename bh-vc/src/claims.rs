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

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

use crate::JsonObject;

/// Seconds since the UNIX epoch, ignoring leap seconds.
///
/// Non-integer values are accepted when deserializing and truncated towards
/// zero.
pub type NumericDate = i64;

fn deserialize_numeric_date<'de, D>(deserializer: D) -> Result<Option<NumericDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<Number>::deserialize(deserializer)? else {
        return Ok(None);
    };

    number
        .as_i64()
        .or_else(|| number.as_f64().map(|seconds| seconds.trunc() as NumericDate))
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("{number} is not a NumericDate")))
}

/// The `aud` claim, which is either a single value or an array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    /// A single audience.
    One(String),
    /// Several audiences.
    Many(Vec<String>),
}

impl Audience {
    /// Whether `audience` is one of the audiences.
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Self::One(one) => one == audience,
            Self::Many(many) => many.iter().any(|candidate| candidate == audience),
        }
    }
}

impl From<String> for Audience {
    fn from(audience: String) -> Self {
        Self::One(audience)
    }
}

impl From<Vec<String>> for Audience {
    fn from(audiences: Vec<String>) -> Self {
        Self::Many(audiences)
    }
}

/// A JWT claims set carrying a Verifiable Credential or Presentation.
///
/// The registered claims are defined in [RFC7519]; `vc` and `vp` hold the
/// embedded document and `nonce` a replay-protection value. Any other claim
/// ends up in [`JwtClaims::private_claims`].
///
/// [RFC7519]: https://datatracker.ietf.org/doc/html/rfc7519#section-4.1
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// The `jti` claim.
    #[serde(rename = "jti", default, skip_serializing_if = "Option::is_none")]
    pub jwt_id: Option<String>,
    /// The `iss` claim.
    #[serde(rename = "iss", default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    /// The `sub` claim.
    #[serde(rename = "sub", default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// The `aud` claim.
    #[serde(rename = "aud", default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<Audience>,
    /// The `exp` claim.
    #[serde(
        rename = "exp",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_numeric_date"
    )]
    pub expiration_time: Option<NumericDate>,
    /// The `nbf` claim.
    #[serde(
        rename = "nbf",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_numeric_date"
    )]
    pub not_before: Option<NumericDate>,
    /// The `iat` claim.
    #[serde(
        rename = "iat",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_numeric_date"
    )]
    pub issued_at: Option<NumericDate>,
    /// The `nonce` claim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    /// The `vc` claim, holding the credential with its promoted members
    /// removed.
    #[serde(rename = "vc", default, skip_serializing_if = "Option::is_none")]
    pub verifiable_credential: Option<Value>,
    /// The `vp` claim, holding the presentation with its promoted members
    /// removed.
    #[serde(rename = "vp", default, skip_serializing_if = "Option::is_none")]
    pub verifiable_presentation: Option<Value>,
    /// Every other claim.
    #[serde(flatten)]
    pub private_claims: JsonObject,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_claims_serialize_to_empty_object() {
        assert_eq!(serde_json::to_value(JwtClaims::default()).unwrap(), json!({}));
    }

    #[test]
    fn registered_claims_use_their_short_names() {
        let claims = JwtClaims {
            jwt_id: Some("urn:1".to_owned()),
            issuer: Some("did:example:abc".to_owned()),
            expiration_time: Some(1_706_745_600),
            not_before: Some(1_704_067_200),
            audience: Some(Audience::One("https://verifier.example.com".to_owned())),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(claims).unwrap(),
            json!({
                "jti": "urn:1",
                "iss": "did:example:abc",
                "aud": "https://verifier.example.com",
                "exp": 1_706_745_600,
                "nbf": 1_704_067_200,
            })
        );
    }

    #[test]
    fn unknown_claims_are_kept_as_private_claims() {
        let claims: JwtClaims = serde_json::from_value(json!({
            "iss": "did:example:abc",
            "vp": { "type": ["VerifiablePresentation"] },
            "azp": "client-1",
        }))
        .unwrap();

        assert_eq!(claims.issuer.as_deref(), Some("did:example:abc"));
        assert_eq!(
            claims.verifiable_presentation,
            Some(json!({ "type": ["VerifiablePresentation"] }))
        );
        assert_eq!(claims.private_claims, crate::json_object!({ "azp": "client-1" }));
    }

    #[test]
    fn fractional_numeric_dates_are_truncated() {
        let claims: JwtClaims = serde_json::from_value(json!({
            "exp": 1_706_745_600.0,
            "nbf": 1_704_067_200.75,
            "iat": 1_704_067_100,
        }))
        .unwrap();

        assert_eq!(claims.expiration_time, Some(1_706_745_600));
        assert_eq!(claims.not_before, Some(1_704_067_200));
        assert_eq!(claims.issued_at, Some(1_704_067_100));
        assert!(claims.private_claims.is_empty());
    }

    #[test]
    fn non_numeric_date_is_rejected() {
        let result = serde_json::from_value::<JwtClaims>(json!({ "exp": "tomorrow" }));

        assert!(result.is_err());
    }

    #[test]
    fn audience_is_one_or_many() {
        let one: Audience = serde_json::from_value(json!("a")).unwrap();
        let many: Audience = serde_json::from_value(json!(["a", "b"])).unwrap();

        assert_eq!(one, Audience::One("a".to_owned()));
        assert!(many.contains("b"));
        assert!(!one.contains("b"));
    }
}
