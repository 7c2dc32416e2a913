//! Describe types.
//!
//! Only the parts of the describe payload callers commonly need are modelled.
//! Flags missing from a response decode as `false`.

use serde::{Deserialize, Serialize};

/// Schema of one SObject type.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DescribeSObjectResult {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub custom: bool,
    /// Fields in the order the platform lists them.
    #[serde(default)]
    pub fields: Vec<FieldDescribe>,
}

impl DescribeSObjectResult {
    /// Find a field by API name (case-insensitive, as the platform treats them).
    pub fn field(&self, name: &str) -> Option<&FieldDescribe> {
        self.fields.iter().find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Fields that accept a value on create.
    pub fn createable_fields(&self) -> impl Iterator<Item = &FieldDescribe> {
        self.fields.iter().filter(|f| f.createable && !f.calculated)
    }
}

/// Metadata for one field.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FieldDescribe {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub calculated: bool,
    #[serde(default)]
    pub createable: bool,
    #[serde(default)]
    pub updateable: bool,
    #[serde(default)]
    pub nillable: bool,
    #[serde(default)]
    pub custom: bool,
    #[serde(default)]
    pub length: Option<u32>,
}
