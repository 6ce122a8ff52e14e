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

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ClaimDocument, JsonObject, Result};

/// The `type` tag of every Verifiable Presentation.
pub const PRESENTATION_TYPE: &str = "VerifiablePresentation";

pub(crate) const HOLDER_KEY: &str = "holder";
pub(crate) const VERIFIABLE_CREDENTIAL_KEY: &str = "verifiableCredential";

/// A W3C Verifiable Presentation.
///
/// All the [`ClaimDocument`] accessors are available through [`Deref`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Presentation {
    document: ClaimDocument,
}

impl Presentation {
    /// A new presentation holding only the canonical `@context` and `type`.
    pub fn new() -> Self {
        Self {
            document: ClaimDocument::with_type_tag(PRESENTATION_TYPE),
        }
    }

    /// Parse a presentation from a JSON string, taken as is.
    pub fn from_json(json: &str) -> Result<Self> {
        ClaimDocument::from_json(json).map(Self::from)
    }

    /// Wrap the given JSON object as a presentation, taken as is.
    pub fn from_object(object: JsonObject) -> Self {
        ClaimDocument::from_object(object).into()
    }

    /// The `holder` of the presentation.
    pub fn holder(&self) -> Option<&str> {
        self.get_str(HOLDER_KEY)
    }

    /// Set the `holder` of the presentation.
    pub fn set_holder(&mut self, holder: impl Into<String>) {
        self.insert(HOLDER_KEY, holder.into());
    }

    /// Append a credential, usually its compact JWT, to
    /// `verifiableCredential`.
    ///
    /// Credentials are kept in insertion order and never deduplicated.
    pub fn add_verifiable_credential(&mut self, credential: impl Into<Value>) {
        let credential = credential.into();

        match self.document.get_mut(VERIFIABLE_CREDENTIAL_KEY) {
            Some(Value::Array(credentials)) => credentials.push(credential),
            Some(single) => {
                let first = single.take();
                *single = Value::Array(vec![first, credential]);
            }
            None => {
                self.insert(VERIFIABLE_CREDENTIAL_KEY, vec![credential]);
            }
        }
    }

    /// The embedded credentials, or [`None`] when none were ever added.
    pub fn verifiable_credentials(&self) -> Option<&[Value]> {
        self.get(VERIFIABLE_CREDENTIAL_KEY)?
            .as_array()
            .map(Vec::as_slice)
    }

    /// The underlying document.
    pub fn document(&self) -> &ClaimDocument {
        &self.document
    }

    /// Consume the presentation, returning the underlying document.
    pub fn into_document(self) -> ClaimDocument {
        self.document
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ClaimDocument> for Presentation {
    fn from(document: ClaimDocument) -> Self {
        Self { document }
    }
}

impl Deref for Presentation {
    type Target = ClaimDocument;

    fn deref(&self) -> &Self::Target {
        &self.document
    }
}

impl DerefMut for Presentation {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.document
    }
}

impl std::fmt::Display for Presentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.document, f)
    }
}
