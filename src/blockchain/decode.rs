// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Decoding of dev-inspect return values against versioned record schemas.
//!
//! A Move function returns its values positionally. Each read declares the
//! exact field list it expects together with a schema version; a response
//! whose arity or reported Move types disagree with the schema is rejected as
//! a whole instead of being decoded by position into the wrong fields.

use serde::de::DeserializeOwned;

use super::rpc::DevInspectResults;
use super::types::SuiAddress;

/// Declared type of a returned value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    U64,
    U8,
    Bool,
    Address,
    AddressVec,
}

impl FieldType {
    /// Whether the Move type reported by the node is this field type.
    fn matches(self, move_type: &str) -> bool {
        let move_type = move_type.trim();
        match self {
            FieldType::String => move_type.ends_with("::string::String"),
            FieldType::U64 => move_type == "u64",
            FieldType::U8 => move_type == "u8",
            FieldType::Bool => move_type == "bool",
            FieldType::Address => move_type == "address" || move_type.ends_with("::object::ID"),
            FieldType::AddressVec => {
                move_type == "vector<address>" || move_type.ends_with("::object::ID>")
            }
        }
    }

    fn expected(self) -> &'static str {
        match self {
            FieldType::String => "0x1::string::String",
            FieldType::U64 => "u64",
            FieldType::U8 => "u8",
            FieldType::Bool => "bool",
            FieldType::Address => "address",
            FieldType::AddressVec => "vector<address>",
        }
    }
}

/// One named, typed field of a record schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
}

impl FieldSpec {
    pub const fn new(name: &'static str, ty: FieldType) -> Self {
        Self { name, ty }
    }
}

/// The return layout of one contract read function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSchema {
    pub name: &'static str,
    pub version: u16,
    pub fields: &'static [FieldSpec],
}

/// A decoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedValue {
    String(String),
    U64(u64),
    U8(u8),
    Bool(bool),
    Address(SuiAddress),
    Addresses(Vec<SuiAddress>),
}

/// A fully decoded record. Fields keep schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecord {
    schema: RecordSchema,
    values: Vec<DecodedValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("no result returned")]
    NoResult,

    #[error("call aborted during inspection: {0}")]
    Aborted(String),

    #[error("{schema} v{version} expects {expected} values, node returned {actual}")]
    ArityMismatch {
        schema: &'static str,
        version: u16,
        expected: usize,
        actual: usize,
    },

    #[error("field `{field}` expects {expected}, node returned {actual}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        actual: String,
    },

    #[error("field `{field}` has a malformed payload: {reason}")]
    Malformed { field: &'static str, reason: String },

    #[error("field `{0}` is not part of the record")]
    UnknownField(&'static str),
}

impl DecodedRecord {
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    pub fn get(&self, name: &'static str) -> Result<&DecodedValue, DecodeError> {
        self.schema
            .fields
            .iter()
            .position(|field| field.name == name)
            .map(|index| &self.values[index])
            .ok_or(DecodeError::UnknownField(name))
    }

    pub fn string(&self, name: &'static str) -> Result<String, DecodeError> {
        match self.get(name)? {
            DecodedValue::String(value) => Ok(value.clone()),
            other => Err(self.wrong_type(name, other)),
        }
    }

    pub fn u64(&self, name: &'static str) -> Result<u64, DecodeError> {
        match self.get(name)? {
            DecodedValue::U64(value) => Ok(*value),
            other => Err(self.wrong_type(name, other)),
        }
    }

    pub fn u8(&self, name: &'static str) -> Result<u8, DecodeError> {
        match self.get(name)? {
            DecodedValue::U8(value) => Ok(*value),
            other => Err(self.wrong_type(name, other)),
        }
    }

    pub fn bool(&self, name: &'static str) -> Result<bool, DecodeError> {
        match self.get(name)? {
            DecodedValue::Bool(value) => Ok(*value),
            other => Err(self.wrong_type(name, other)),
        }
    }

    pub fn address(&self, name: &'static str) -> Result<SuiAddress, DecodeError> {
        match self.get(name)? {
            DecodedValue::Address(value) => Ok(*value),
            other => Err(self.wrong_type(name, other)),
        }
    }

    pub fn addresses(&self, name: &'static str) -> Result<Vec<SuiAddress>, DecodeError> {
        match self.get(name)? {
            DecodedValue::Addresses(value) => Ok(value.clone()),
            other => Err(self.wrong_type(name, other)),
        }
    }

    fn wrong_type(&self, field: &'static str, actual: &DecodedValue) -> DecodeError {
        let expected = self
            .schema
            .fields
            .iter()
            .find(|spec| spec.name == field)
            .map(|spec| spec.ty.expected())
            .unwrap_or("unknown");
        DecodeError::TypeMismatch {
            field,
            expected,
            actual: format!("{actual:?}"),
        }
    }
}

/// Decode the return values of the first command against `schema`.
pub fn decode_record(
    results: &DevInspectResults,
    schema: &RecordSchema,
) -> Result<DecodedRecord, DecodeError> {
    if let Some(error) = &results.error {
        return Err(DecodeError::Aborted(error.clone()));
    }

    let entry = results
        .results
        .as_deref()
        .and_then(|entries| entries.first())
        .ok_or(DecodeError::NoResult)?;

    let returned = &entry.return_values;
    if returned.is_empty() {
        return Err(DecodeError::NoResult);
    }
    if returned.len() != schema.fields.len() {
        return Err(DecodeError::ArityMismatch {
            schema: schema.name,
            version: schema.version,
            expected: schema.fields.len(),
            actual: returned.len(),
        });
    }

    let values = schema
        .fields
        .iter()
        .zip(returned)
        .map(|(spec, (bytes, move_type))| decode_field(spec, bytes, move_type))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DecodedRecord {
        schema: *schema,
        values,
    })
}

fn decode_field(spec: &FieldSpec, bytes: &[u8], move_type: &str) -> Result<DecodedValue, DecodeError> {
    if !spec.ty.matches(move_type) {
        return Err(DecodeError::TypeMismatch {
            field: spec.name,
            expected: spec.ty.expected(),
            actual: move_type.to_string(),
        });
    }

    let value = match spec.ty {
        FieldType::String => DecodedValue::String(parse(spec, bytes)?),
        FieldType::U64 => DecodedValue::U64(parse(spec, bytes)?),
        FieldType::U8 => DecodedValue::U8(parse(spec, bytes)?),
        FieldType::Bool => DecodedValue::Bool(parse(spec, bytes)?),
        FieldType::Address => DecodedValue::Address(parse(spec, bytes)?),
        FieldType::AddressVec => DecodedValue::Addresses(parse(spec, bytes)?),
    };
    Ok(value)
}

fn parse<T: DeserializeOwned>(spec: &FieldSpec, bytes: &[u8]) -> Result<T, DecodeError> {
    bcs::from_bytes(bytes).map_err(|e| DecodeError::Malformed {
        field: spec.name,
        reason: e.to_string(),
    })
}
