//! Client record and the request representations decoded from HTTP bodies.
//!
//! # Design
//! The persisted record (`Client`) always carries an id. Request bodies are
//! decoded into separate types so the two HTTP verbs that accept a body can
//! apply different rules: `ClientInput` (POST) may mention an id only to be
//! rejected, `ClientPatch` (PUT) has no id at all and every field is optional.
//! An absent field and an explicit `null` decode identically to `None`, which
//! is what makes "missing means keep" hold for both spellings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Store-assigned identifier of a client record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub i64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The mutable fields of a client, without identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientFields {
    pub name: String,
    pub email: Option<String>,
    pub tax_id: Option<String>,
}

impl ClientFields {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
            tax_id: None,
        }
    }

    /// `name` must be non-empty once surrounding whitespace is ignored.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        Ok(())
    }
}

/// A persisted client record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub email: Option<String>,
    pub tax_id: Option<String>,
}

impl Client {
    pub fn from_parts(id: ClientId, fields: ClientFields) -> Self {
        Self {
            id,
            name: fields.name,
            email: fields.email,
            tax_id: fields.tax_id,
        }
    }

    pub fn into_parts(self) -> (ClientId, ClientFields) {
        (
            self.id,
            ClientFields {
                name: self.name,
                email: self.email,
                tax_id: self.tax_id,
            },
        )
    }
}

/// POST body. Every field is optional at the decoding layer so that a missing
/// name surfaces as a `ValidationError` instead of a generic JSON rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInput {
    #[serde(default)]
    pub id: Option<ClientId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
}

impl ClientInput {
    /// Converts the body into fields for a brand-new record.
    ///
    /// A caller-supplied id is refused rather than silently dropped: identity
    /// belongs to the store.
    pub fn into_fields(self) -> Result<ClientFields, ValidationError> {
        if let Some(id) = self.id {
            return Err(ValidationError::IdNotAllowed(id));
        }
        let fields = ClientFields {
            name: self.name.ok_or(ValidationError::MissingName)?,
            email: self.email,
            tax_id: self.tax_id,
        };
        fields.validate()?;
        Ok(fields)
    }
}

/// PUT body. Unknown keys (including `id`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
}

impl ClientPatch {
    /// Field-level merge: every `Some` overwrites, every `None` keeps the
    /// stored value. The id of `current` is carried over untouched.
    pub fn merge_into(&self, current: Client) -> Result<Client, ValidationError> {
        let (id, mut fields) = current.into_parts();
        if let Some(name) = &self.name {
            fields.name = name.clone();
        }
        if let Some(email) = &self.email {
            fields.email = Some(email.clone());
        }
        if let Some(tax_id) = &self.tax_id {
            fields.tax_id = Some(tax_id.clone());
        }
        fields.validate()?;
        Ok(Client::from_parts(id, fields))
    }
}
