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

//! Projection of credentials and presentations to and from JWT claims sets.
//!
//! A few document members have a registered JWT claim counterpart. When
//! projecting to claims, each of them is removed from the embedded copy of the
//! document and set as the claim instead, so that no value is carried twice:
//!
//! | member                    | claim | kind         |
//! |---------------------------|-------|--------------|
//! | `id`                      | `jti` | both         |
//! | `issuer`                  | `iss` | credential   |
//! | `expirationDate`          | `exp` | credential   |
//! | `issuanceDate`            | `nbf` | credential   |
//! | `credentialSubject.id`    | `sub` | credential   |
//! | `holder`                  | `iss` | presentation |
//!
//! The reverse projection moves the claims back into the document.

use serde_json::Value;

use crate::{
    credential::{
        CREDENTIAL_SUBJECT_KEY, EXPIRATION_DATE_KEY, ISSUANCE_DATE_KEY, ISSUER_KEY,
    },
    date::{from_numeric_date, to_numeric_date},
    document::ID_KEY,
    presentation::HOLDER_KEY,
    ClaimDocument, Credential, Error, JsonObject, JwtClaims, Presentation, Result,
};

/// Either kind of signable document.
#[derive(Debug, Clone, PartialEq)]
pub enum Verifiable {
    /// A Verifiable Credential, embedded under the `vc` claim.
    Credential(Credential),
    /// A Verifiable Presentation, embedded under the `vp` claim.
    Presentation(Presentation),
}

impl Verifiable {
    /// Project the document to a JWT claims set.
    ///
    /// The projected claims are set on top of `base_claims`, when given,
    /// replacing any colliding claim. The document itself is left untouched.
    pub fn to_claims(&self, nonce: Option<&str>, base_claims: Option<JwtClaims>) -> Result<JwtClaims> {
        match self {
            Self::Credential(credential) => credential.to_claims(nonce, base_claims),
            Self::Presentation(presentation) => presentation.to_claims(nonce, base_claims),
        }
    }

    /// Reconstruct a document from a JWT claims set.
    ///
    /// A `vc` claim makes the result a credential, otherwise a `vp` claim
    /// makes it a presentation. Without either, this fails with
    /// [`Error::InvalidCredential`].
    pub fn from_claims(claims: JwtClaims) -> Result<Self> {
        if claims.verifiable_credential.is_some() {
            Credential::from_claims(claims).map(Self::Credential)
        } else if claims.verifiable_presentation.is_some() {
            Presentation::from_claims(claims).map(Self::Presentation)
        } else {
            Err(bherror::Error::root(Error::InvalidCredential)
                .ctx("claims carry neither `vc` nor `vp`"))
        }
    }

    /// The underlying document.
    pub fn document(&self) -> &ClaimDocument {
        match self {
            Self::Credential(credential) => credential.document(),
            Self::Presentation(presentation) => presentation.document(),
        }
    }

    /// The credential, if this is one.
    pub fn into_credential(self) -> Option<Credential> {
        match self {
            Self::Credential(credential) => Some(credential),
            Self::Presentation(_) => None,
        }
    }

    /// The presentation, if this is one.
    pub fn into_presentation(self) -> Option<Presentation> {
        match self {
            Self::Presentation(presentation) => Some(presentation),
            Self::Credential(_) => None,
        }
    }
}

impl From<Credential> for Verifiable {
    fn from(credential: Credential) -> Self {
        Self::Credential(credential)
    }
}

impl From<Presentation> for Verifiable {
    fn from(presentation: Presentation) -> Self {
        Self::Presentation(presentation)
    }
}

impl Credential {
    /// Project the credential to a JWT claims set, embedding it under `vc`.
    ///
    /// Fails with [`Error::InvalidUri`] when the `issuer` is not a URI.
    pub fn to_claims(&self, nonce: Option<&str>, base_claims: Option<JwtClaims>) -> Result<JwtClaims> {
        let mut claims = base_claims.unwrap_or_default();
        let mut embedded = self.as_object().clone();

        promote_id(&mut embedded, &mut claims);

        if let Some(issuer) = self.issuer() {
            claims.issuer = Some(parse_uri(issuer)?);
            embedded.shift_remove(ISSUER_KEY);
        }

        if let Some(expiration_date) = self.expiration_date() {
            claims.expiration_time = Some(to_numeric_date(&expiration_date));
            embedded.shift_remove(EXPIRATION_DATE_KEY);
        }

        if let Some(issuance_date) = self.issuance_date() {
            claims.not_before = Some(to_numeric_date(&issuance_date));
            embedded.shift_remove(ISSUANCE_DATE_KEY);
        }

        if let Some(Value::Object(subject)) = embedded.get_mut(CREDENTIAL_SUBJECT_KEY) {
            if let Some(Value::String(id)) = subject.get(ID_KEY) {
                claims.subject = Some(id.clone());
                subject.shift_remove(ID_KEY);
            }
        }

        set_nonce(&mut claims, nonce);
        claims.verifiable_credential = Some(Value::Object(embedded));

        Ok(claims)
    }

    /// Reconstruct a credential from the `vc` claim of a JWT claims set.
    ///
    /// Fails with [`Error::InvalidCredential`] unless `vc` is a JSON object.
    pub fn from_claims(claims: JwtClaims) -> Result<Self> {
        let Some(Value::Object(embedded)) = claims.verifiable_credential else {
            return Err(bherror::Error::root(Error::InvalidCredential)
                .ctx("`vc` claim is missing or not an object"));
        };

        let mut credential = Credential::from_object(embedded);

        if let Some(jwt_id) = claims.jwt_id {
            credential.set_id(jwt_id);
        }

        if let Some(expiration_date) = claims.expiration_time.and_then(from_numeric_date) {
            credential.set_expiration_date(expiration_date);
        }

        if let Some(issuer) = claims.issuer {
            credential.set_issuer(issuer);
        }

        if let Some(issuance_date) = claims.not_before.and_then(from_numeric_date) {
            credential.set_issuance_date(issuance_date);
        }

        if let Some(subject_id) = claims.subject {
            if let Some(Value::Object(subject)) = credential.get_mut(CREDENTIAL_SUBJECT_KEY) {
                subject.insert(ID_KEY.to_owned(), Value::String(subject_id));
            }
        }

        Ok(credential)
    }
}

impl Presentation {
    /// Project the presentation to a JWT claims set, embedding it under `vp`.
    ///
    /// Only `id` and `holder` are promoted; any time-related claims must come
    /// with `base_claims`. Fails with [`Error::InvalidUri`] when the `holder`
    /// is not a URI.
    pub fn to_claims(&self, nonce: Option<&str>, base_claims: Option<JwtClaims>) -> Result<JwtClaims> {
        let mut claims = base_claims.unwrap_or_default();
        let mut embedded = self.as_object().clone();

        promote_id(&mut embedded, &mut claims);

        if let Some(holder) = self.holder() {
            claims.issuer = Some(parse_uri(holder)?);
            embedded.shift_remove(HOLDER_KEY);
        }

        set_nonce(&mut claims, nonce);
        claims.verifiable_presentation = Some(Value::Object(embedded));

        Ok(claims)
    }

    /// Reconstruct a presentation from the `vp` claim of a JWT claims set.
    ///
    /// Fails with [`Error::InvalidPresentation`] unless `vp` is a JSON object.
    pub fn from_claims(claims: JwtClaims) -> Result<Self> {
        let Some(Value::Object(embedded)) = claims.verifiable_presentation else {
            return Err(bherror::Error::root(Error::InvalidPresentation)
                .ctx("`vp` claim is missing or not an object"));
        };

        let mut presentation = Presentation::from_object(embedded);

        if let Some(jwt_id) = claims.jwt_id {
            presentation.set_id(jwt_id);
        }

        if let Some(holder) = claims.issuer {
            presentation.set_holder(holder);
        }

        Ok(presentation)
    }
}

fn promote_id(embedded: &mut JsonObject, claims: &mut JwtClaims) {
    let Some(Value::String(id)) = embedded.get(ID_KEY) else {
        return;
    };

    claims.jwt_id = Some(id.clone());
    embedded.shift_remove(ID_KEY);
}

fn set_nonce(claims: &mut JwtClaims, nonce: Option<&str>) {
    if let Some(nonce) = nonce {
        claims.nonce = Some(nonce.to_owned());
    }
}

fn parse_uri(value: &str) -> Result<String> {
    if iref::Uri::new(value).is_err() {
        return Err(bherror::Error::root(Error::InvalidUri(value.to_owned())));
    }

    Ok(value.to_owned())
}
