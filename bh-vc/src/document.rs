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

use bherror::traits::{ErrorContext as _, ForeignError as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, JsonObject, Result};

/// The canonical JSON-LD context every freshly constructed document starts
/// with.
pub const CANONICAL_CONTEXT: &str = "http://w3id.org/credentials/v1";

pub(crate) const CONTEXT_KEY: &str = "@context";
pub(crate) const TYPE_KEY: &str = "type";
pub(crate) const ID_KEY: &str = "id";
pub(crate) const PROOF_KEY: &str = "proof";

/// An ordered JSON-LD document, the common base of [`Credential`] and
/// [`Presentation`].
///
/// The document is an open JSON object; only `@context`, `type`, `id` and
/// `proof` have dedicated accessors, every other member is kept verbatim and
/// in insertion order.
///
/// [`Credential`]: crate::Credential
/// [`Presentation`]: crate::Presentation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimDocument {
    object: JsonObject,
}

impl ClaimDocument {
    /// A document with the canonical context and the given `type` tag, and no
    /// other members.
    pub(crate) fn with_type_tag(type_tag: &str) -> Self {
        let mut object = JsonObject::new();
        object.insert(CONTEXT_KEY.to_owned(), vec![CANONICAL_CONTEXT].into());
        object.insert(TYPE_KEY.to_owned(), vec![type_tag].into());

        Self { object }
    }

    /// Wrap the given JSON object as is.
    pub fn from_object(object: JsonObject) -> Self {
        Self { object }
    }

    /// Parse a document from a JSON string.
    ///
    /// The string is taken as is: no default `@context` or `type` is added.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .foreign_err(|| Error::MalformedJson)
            .ctx(|| "unable to parse the document")?;

        match value {
            Value::Object(object) => Ok(Self { object }),
            other => Err(bherror::Error::root(Error::NotAnObject)
                .ctx(format!("document is a JSON {}", json_kind(&other)))),
        }
    }

    /// The `@context` URIs, if present and an array of strings.
    pub fn contexts(&self) -> Option<Vec<&str>> {
        self.string_array(CONTEXT_KEY)
    }

    /// Append the given URIs to `@context`.
    ///
    /// Duplicates are kept, and the existing entries are never reordered.
    pub fn add_contexts<I, S>(&mut self, contexts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.append(CONTEXT_KEY, contexts);
    }

    /// The `type` tags, if present and an array of strings.
    pub fn types(&self) -> Option<Vec<&str>> {
        self.string_array(TYPE_KEY)
    }

    /// Append the given tags to `type`.
    ///
    /// Duplicates are kept, and the existing entries are never reordered.
    pub fn add_types<I, S>(&mut self, types: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.append(TYPE_KEY, types);
    }

    /// The `id` of the document.
    pub fn id(&self) -> Option<&str> {
        self.get_str(ID_KEY)
    }

    /// Set the `id` of the document.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.insert(ID_KEY, id.into());
    }

    /// The `proof` of the document, when it is a string.
    pub fn proof(&self) -> Option<&str> {
        self.get_str(PROOF_KEY)
    }

    /// Set the `proof` of the document.
    pub fn set_proof(&mut self, proof: impl Into<String>) {
        self.insert(PROOF_KEY, proof.into());
    }

    /// The member under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.object.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.object.get_mut(key)
    }

    /// Insert a member, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.object.insert(key.into(), value.into())
    }

    /// Remove a member, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.object.shift_remove(key)
    }

    /// The underlying JSON object.
    pub fn as_object(&self) -> &JsonObject {
        &self.object
    }

    /// Consume the document, returning the underlying JSON object.
    pub fn into_object(self) -> JsonObject {
        self.object
    }

    /// Serialize the document to a compact JSON string.
    pub fn to_json_string(&self) -> String {
        self.to_string()
    }

    pub(crate) fn get_str(&self, key: &str) -> Option<&str> {
        self.object.get(key).and_then(Value::as_str)
    }

    fn string_array(&self, key: &str) -> Option<Vec<&str>> {
        self.object
            .get(key)?
            .as_array()?
            .iter()
            .map(Value::as_str)
            .collect()
    }

    fn append<I, S>(&mut self, key: &str, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = items.into_iter().map(|item| Value::String(item.into()));

        match self.object.get_mut(key) {
            Some(Value::Array(existing)) => existing.extend(items),
            // A single value is promoted to the first element of an array
            Some(single) => {
                let first = single.take();
                *single = Value::Array(std::iter::once(first).chain(items).collect());
            }
            None => {
                self.object
                    .insert(key.to_owned(), Value::Array(items.collect()));
            }
        }
    }
}

impl std::fmt::Display for ClaimDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string(&self.object).map_err(|_| std::fmt::Error)?;
        f.write_str(&json)
    }
}

impl From<JsonObject> for ClaimDocument {
    fn from(object: JsonObject) -> Self {
        Self::from_object(object)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
