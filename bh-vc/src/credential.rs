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

use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::{
    date::{format_date, parse_date},
    json_object, ClaimDocument, JsonObject, Result,
};

/// The `type` tag of every Verifiable Credential.
pub const CREDENTIAL_TYPE: &str = "VerifiableCredential";

pub(crate) const ISSUER_KEY: &str = "issuer";
pub(crate) const ISSUANCE_DATE_KEY: &str = "issuanceDate";
pub(crate) const EXPIRATION_DATE_KEY: &str = "expirationDate";
pub(crate) const CREDENTIAL_SUBJECT_KEY: &str = "credentialSubject";
pub(crate) const CREDENTIAL_STATUS_KEY: &str = "credentialStatus";

/// A W3C Verifiable Credential.
///
/// All the [`ClaimDocument`] accessors are available through [`Deref`].
///
/// ```
/// use bh_vc::{Credential, CANONICAL_CONTEXT};
///
/// let mut credential = Credential::new();
/// credential.set_issuer("did:example:abc");
/// credential.add_types(["UniversityDegreeCredential"]);
///
/// assert_eq!(credential.contexts().unwrap(), vec![CANONICAL_CONTEXT]);
/// assert_eq!(
///     credential.types().unwrap(),
///     vec!["VerifiableCredential", "UniversityDegreeCredential"]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential {
    document: ClaimDocument,
}

impl Credential {
    /// A new credential holding only the canonical `@context` and `type`.
    pub fn new() -> Self {
        Self {
            document: ClaimDocument::with_type_tag(CREDENTIAL_TYPE),
        }
    }

    /// Parse a credential from a JSON string, taken as is.
    pub fn from_json(json: &str) -> Result<Self> {
        ClaimDocument::from_json(json).map(Self::from)
    }

    /// Wrap the given JSON object as a credential, taken as is.
    pub fn from_object(object: JsonObject) -> Self {
        ClaimDocument::from_object(object).into()
    }

    /// The `issuer` of the credential.
    pub fn issuer(&self) -> Option<&str> {
        self.get_str(ISSUER_KEY)
    }

    /// Set the `issuer` of the credential.
    ///
    /// The value is validated as a URI only when the credential is signed.
    pub fn set_issuer(&mut self, issuer: impl Into<String>) {
        self.insert(ISSUER_KEY, issuer.into());
    }

    /// The `issuanceDate` of the credential, when it is a valid date.
    pub fn issuance_date(&self) -> Option<DateTime<Utc>> {
        self.get_str(ISSUANCE_DATE_KEY).and_then(parse_date)
    }

    /// Set the `issuanceDate` of the credential, truncated to whole seconds.
    ///
    /// Returns `false` and leaves the credential unchanged when the date
    /// cannot be represented.
    pub fn set_issuance_date(&mut self, date: DateTime<Utc>) -> bool {
        self.set_date(ISSUANCE_DATE_KEY, &date)
    }

    /// The `expirationDate` of the credential, when it is a valid date.
    pub fn expiration_date(&self) -> Option<DateTime<Utc>> {
        self.get_str(EXPIRATION_DATE_KEY).and_then(parse_date)
    }

    /// Set the `expirationDate` of the credential, truncated to whole seconds.
    ///
    /// Returns `false` and leaves the credential unchanged when the date
    /// cannot be represented.
    pub fn set_expiration_date(&mut self, date: DateTime<Utc>) -> bool {
        self.set_date(EXPIRATION_DATE_KEY, &date)
    }

    /// The `credentialSubject` of the credential.
    pub fn credential_subject(&self) -> Option<&Value> {
        self.get(CREDENTIAL_SUBJECT_KEY)
    }

    /// Set the `credentialSubject` of the credential.
    pub fn set_credential_subject(&mut self, subject: impl Into<Value>) {
        self.insert(CREDENTIAL_SUBJECT_KEY, subject);
    }

    /// Deserialize the `credentialSubject` into `T`.
    ///
    /// Returns [`None`] when the subject is absent or not shaped as `T`.
    pub fn credential_subject_as<T: DeserializeOwned>(&self) -> Option<T> {
        let subject = self.credential_subject()?.clone();

        serde_json::from_value(subject)
            .inspect_err(|error| {
                tracing::debug!(%error, "credentialSubject does not match the requested type")
            })
            .ok()
    }

    /// Set the `credentialStatus` to an object with the given `id` and
    /// `type`.
    pub fn set_credential_status(&mut self, id: impl Into<String>, status_type: impl Into<String>) {
        let status = json_object!({
            "id": id.into(),
            "type": status_type.into(),
        });
        self.insert(CREDENTIAL_STATUS_KEY, status);
    }

    /// The `id` of the `credentialStatus`.
    ///
    /// A bare string status is its own `id`; otherwise the `id` member of the
    /// status object is returned.
    pub fn credential_status_id(&self) -> Option<&str> {
        match self.get(CREDENTIAL_STATUS_KEY)? {
            Value::String(id) => Some(id.as_str()),
            Value::Object(status) => status.get("id").and_then(Value::as_str),
            _ => None,
        }
    }

    /// The `type` of the `credentialStatus`, only set in the object form.
    pub fn credential_status_type(&self) -> Option<&str> {
        self.get(CREDENTIAL_STATUS_KEY)?
            .as_object()?
            .get("type")
            .and_then(Value::as_str)
    }

    /// The underlying document.
    pub fn document(&self) -> &ClaimDocument {
        &self.document
    }

    /// Consume the credential, returning the underlying document.
    pub fn into_document(self) -> ClaimDocument {
        self.document
    }

    fn set_date(&mut self, key: &'static str, date: &DateTime<Utc>) -> bool {
        let Some(formatted) = format_date(date) else {
            tracing::warn!(key, %date, "date is not representable, leaving it unchanged");
            return false;
        };

        self.insert(key, formatted);
        true
    }
}

impl Default for Credential {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ClaimDocument> for Credential {
    fn from(document: ClaimDocument) -> Self {
        Self { document }
    }
}

impl Deref for Credential {
    type Target = ClaimDocument;

    fn deref(&self) -> &Self::Target {
        &self.document
    }
}

impl DerefMut for Credential {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.document
    }
}

impl std::fmt::Display for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.document, f)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use serde_json::json;

    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Subject {
        id: String,
        name: String,
    }

    #[test]
    fn types_are_appended_without_dedup() {
        let mut credential = Credential::new();

        credential.add_types(["X"]);
        credential.add_types(["X"]);

        assert_eq!(
            credential.types().unwrap(),
            vec![CREDENTIAL_TYPE, "X", "X"]
        );
    }

    #[test]
    fn dates_are_stored_in_the_strict_format() {
        let mut credential = Credential::new();
        let issued = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        assert!(credential.set_issuance_date(issued));

        assert_eq!(
            credential.get(ISSUANCE_DATE_KEY),
            Some(&json!("2024-01-01T00:00:00Z"))
        );
        assert_eq!(credential.issuance_date(), Some(issued));
    }

    #[test]
    fn unrepresentable_date_is_a_reported_no_op() {
        let mut credential = Credential::new();
        let valid = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let far_future = Utc.with_ymd_and_hms(12_024, 2, 1, 0, 0, 0).unwrap();
        assert!(credential.set_expiration_date(valid));

        assert!(!credential.set_expiration_date(far_future));

        assert_eq!(credential.expiration_date(), Some(valid));
    }

    #[test]
    fn malformed_date_string_reads_as_absent() {
        let mut credential = Credential::new();
        credential.insert(EXPIRATION_DATE_KEY, "2024-02-01");

        assert_eq!(credential.expiration_date(), None);
    }

    #[test]
    fn credential_status_string_form_is_its_id() {
        let credential = Credential::from_object(json_object!({
            "credentialStatus": "https://example.com/status/24",
        }));

        assert_eq!(
            credential.credential_status_id(),
            Some("https://example.com/status/24")
        );
        assert_eq!(credential.credential_status_type(), None);
    }

    #[test]
    fn credential_status_object_form() {
        let mut credential = Credential::new();

        credential.set_credential_status("https://example.com/status/24", "CredentialStatusList2017");

        assert_eq!(
            credential.get(CREDENTIAL_STATUS_KEY),
            Some(&json!({
                "id": "https://example.com/status/24",
                "type": "CredentialStatusList2017",
            }))
        );
        assert_eq!(
            credential.credential_status_id(),
            Some("https://example.com/status/24")
        );
        assert_eq!(
            credential.credential_status_type(),
            Some("CredentialStatusList2017")
        );
    }

    #[test]
    fn credential_subject_deserializes_into_caller_type() {
        let mut credential = Credential::new();
        credential.set_credential_subject(json!({ "id": "did:example:subj", "name": "A" }));

        assert_eq!(
            credential.credential_subject_as::<Subject>(),
            Some(Subject {
                id: "did:example:subj".to_owned(),
                name: "A".to_owned(),
            })
        );
    }

    #[test]
    fn mismatched_credential_subject_is_none() {
        let mut credential = Credential::new();
        credential.set_credential_subject("did:example:subj");

        assert_eq!(credential.credential_subject_as::<Subject>(), None);
        assert_eq!(
            credential.credential_subject_as::<String>().as_deref(),
            Some("did:example:subj")
        );
    }

    #[test]
    fn serializes_as_the_plain_document() {
        let mut credential = Credential::new();
        credential.set_id("urn:1");

        assert_eq!(
            serde_json::to_value(&credential).unwrap(),
            json!({
                "@context": ["http://w3id.org/credentials/v1"],
                "type": ["VerifiableCredential"],
                "id": "urn:1",
            })
        );
    }
}
