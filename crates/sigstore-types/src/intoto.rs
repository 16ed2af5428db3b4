//! in-toto attestation statements
//!
//! Only the statement envelope layer is modeled here. The predicate is kept as
//! arbitrary JSON; interpreting it is up to the caller.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Media type of a DSSE payload carrying an in-toto statement
pub const INTOTO_MEDIA_TYPE: &str = "application/vnd.in-toto+json";

/// `_type` of an in-toto v1 statement
pub const STATEMENT_TYPE_V1: &str = "https://in-toto.io/Statement/v1";

/// An in-toto statement binding subjects to a predicate
///
/// Missing members decode to empty values, matching how statements are read
/// elsewhere in the ecosystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
    #[serde(rename = "_type", default)]
    pub statement_type: String,
    #[serde(default)]
    pub subject: Vec<Subject>,
    #[serde(default)]
    pub predicate_type: String,
    #[serde(default)]
    pub predicate: serde_json::Value,
}

/// An artifact the statement is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(default)]
    pub name: String,
    /// Algorithm name (e.g. `sha256`) to hex digest
    #[serde(default)]
    pub digest: BTreeMap<String, String>,
}

impl Statement {
    /// Parse a statement from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
