// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Move call building and BCS transaction encoding.
//!
//! A [`MoveCall`] is the local description of one contract invocation: a
//! fully-qualified target plus an ordered list of explicitly typed arguments.
//! The argument type is never inferred from the value, since the same number
//! can be a `u8` or a `u64` and the Move function only accepts one of them.
//!
//! The wire structs at the bottom of this module mirror the Sui BCS layout of
//! `TransactionData` closely enough to sign programmable transactions made of a
//! single Move call.

use std::fmt;

use serde::Serialize;

use super::types::{ObjectId, ObjectRef, SuiAddress};

/// Errors detected before anything is sent to the node.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("invalid Move target `{0}`, expected <package>::<module>::<function>")]
    InvalidTarget(String),

    #[error("invalid Move identifier `{0}`")]
    InvalidIdentifier(String),

    #[error("argument {index} is not a valid address: {reason}")]
    InvalidAddress { index: usize, reason: String },
}

/// `package::module::function` reference to a Move entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTarget {
    pub package: ObjectId,
    pub module: String,
    pub function: String,
}

impl MoveTarget {
    pub fn new(package: ObjectId, module: &str, function: &str) -> Result<Self, BuildError> {
        validate_identifier(module)?;
        validate_identifier(function)?;
        Ok(Self {
            package,
            module: module.to_string(),
            function: function.to_string(),
        })
    }

    /// Parse the textual `0x...::module::function` form.
    pub fn parse(raw: &str) -> Result<Self, BuildError> {
        let parts: Vec<&str> = raw.trim().split("::").collect();
        let [package, module, function] = parts.as_slice() else {
            return Err(BuildError::InvalidTarget(raw.to_string()));
        };
        let package = package
            .parse()
            .map_err(|_| BuildError::InvalidTarget(raw.to_string()))?;
        Self::new(package, module, function)
    }
}

impl fmt::Display for MoveTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.package, self.module, self.function)
    }
}

fn validate_identifier(ident: &str) -> Result<(), BuildError> {
    let mut chars = ident.chars();
    let valid_start = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => true,
        Some('_') => ident.len() > 1,
        _ => false,
    };
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(BuildError::InvalidIdentifier(ident.to_string()))
    }
}

/// Wire type of a call argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    String,
    Address,
    U8,
    U64,
    Object,
}

/// One typed argument of a Move call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveArg {
    String(String),
    Address(SuiAddress),
    U8(u8),
    U64(u64),
    /// Reference to an on-chain object, resolved to its current version at submission.
    Object(ObjectId),
}

impl MoveArg {
    pub fn kind(&self) -> ArgKind {
        match self {
            MoveArg::String(_) => ArgKind::String,
            MoveArg::Address(_) => ArgKind::Address,
            MoveArg::U8(_) => ArgKind::U8,
            MoveArg::U64(_) => ArgKind::U64,
            MoveArg::Object(_) => ArgKind::Object,
        }
    }

    /// BCS bytes of the value when passed as a pure input.
    ///
    /// Object arguments encode as their raw id; the submission client passes
    /// them as object inputs instead.
    pub fn pure_bytes(&self) -> Result<Vec<u8>, bcs::Error> {
        match self {
            MoveArg::String(value) => bcs::to_bytes(value),
            MoveArg::Address(value) | MoveArg::Object(value) => bcs::to_bytes(value),
            MoveArg::U8(value) => bcs::to_bytes(value),
            MoveArg::U64(value) => bcs::to_bytes(value),
        }
    }
}

/// A fully built, immutable contract invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCall {
    target: MoveTarget,
    arguments: Vec<MoveArg>,
}

impl MoveCall {
    pub fn builder(target: MoveTarget) -> MoveCallBuilder {
        MoveCallBuilder {
            target,
            arguments: Vec::new(),
            error: None,
        }
    }

    pub fn target(&self) -> &MoveTarget {
        &self.target
    }

    pub fn arguments(&self) -> &[MoveArg] {
        &self.arguments
    }
}

/// Accumulates typed arguments in call order.
///
/// The first malformed argument is remembered and reported by [`build`](Self::build),
/// so a half-valid call can never be submitted.
#[derive(Debug)]
pub struct MoveCallBuilder {
    target: MoveTarget,
    arguments: Vec<MoveArg>,
    error: Option<BuildError>,
}

impl MoveCallBuilder {
    pub fn string(mut self, value: impl Into<String>) -> Self {
        self.arguments.push(MoveArg::String(value.into()));
        self
    }

    /// Append an address argument parsed from its `0x` form.
    pub fn address(mut self, value: &str) -> Self {
        match value.parse::<SuiAddress>() {
            Ok(address) => self.arguments.push(MoveArg::Address(address)),
            Err(e) => self.fail(BuildError::InvalidAddress {
                index: self.arguments.len(),
                reason: e.to_string(),
            }),
        }
        self
    }

    pub fn u8(mut self, value: u8) -> Self {
        self.arguments.push(MoveArg::U8(value));
        self
    }

    pub fn u64(mut self, value: u64) -> Self {
        self.arguments.push(MoveArg::U64(value));
        self
    }

    /// Append an object argument by id.
    pub fn object(mut self, id: ObjectId) -> Self {
        self.arguments.push(MoveArg::Object(id));
        self
    }

    pub fn arg(mut self, arg: MoveArg) -> Self {
        self.arguments.push(arg);
        self
    }

    pub fn build(self) -> Result<MoveCall, BuildError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        Ok(MoveCall {
            target: self.target,
            arguments: self.arguments,
        })
    }

    fn fail(&mut self, error: BuildError) {
        // Keep indices stable for later arguments.
        self.arguments.push(MoveArg::U8(0));
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

// =============================================================================
// BCS wire format
// =============================================================================

/// Transaction input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CallArg {
    Pure(Vec<u8>),
    Object(ObjectArg),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ObjectArg {
    ImmOrOwnedObject(ObjectRef),
    SharedObject {
        id: ObjectId,
        initial_shared_version: u64,
        mutable: bool,
    },
}

/// Move type tag. None of the eduverse entry points are generic, so only the
/// leading variants are declared to keep the variant indices aligned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TypeTag {
    Bool,
    U8,
    U64,
    U128,
    Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Argument {
    GasCoin,
    Input(u16),
    Result(u16),
    NestedResult(u16, u16),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgrammableMoveCall {
    pub package: ObjectId,
    pub module: String,
    pub function: String,
    pub type_arguments: Vec<TypeTag>,
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Command {
    MoveCall(Box<ProgrammableMoveCall>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgrammableTransaction {
    pub inputs: Vec<CallArg>,
    pub commands: Vec<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TransactionKind {
    ProgrammableTransaction(ProgrammableTransaction),
}

impl TransactionKind {
    /// Wrap a Move call whose inputs have already been resolved, one per argument.
    pub fn single_call(call: &MoveCall, inputs: Vec<CallArg>) -> Self {
        let arguments = (0..inputs.len() as u16).map(Argument::Input).collect();
        let command = ProgrammableMoveCall {
            package: call.target.package,
            module: call.target.module.clone(),
            function: call.target.function.clone(),
            type_arguments: Vec::new(),
            arguments,
        };
        TransactionKind::ProgrammableTransaction(ProgrammableTransaction {
            inputs,
            commands: vec![Command::MoveCall(Box::new(command))],
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GasData {
    pub payment: Vec<ObjectRef>,
    pub owner: SuiAddress,
    pub price: u64,
    pub budget: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TransactionExpiration {
    None,
    Epoch(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionDataV1 {
    pub kind: TransactionKind,
    pub sender: SuiAddress,
    pub gas_data: GasData,
    pub expiration: TransactionExpiration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TransactionData {
    V1(TransactionDataV1),
}

impl TransactionData {
    pub fn new(kind: TransactionKind, sender: SuiAddress, gas_data: GasData) -> Self {
        TransactionData::V1(TransactionDataV1 {
            kind,
            sender,
            gas_data,
            expiration: TransactionExpiration::None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package() -> ObjectId {
        "0xabc".parse().unwrap()
    }

    #[test]
    fn parses_move_target() {
        let target = MoveTarget::parse("0xabc::eduversex_database::add_user").unwrap();
        assert_eq!(target.package, package());
        assert_eq!(target.module, "eduversex_database");
        assert_eq!(target.function, "add_user");
    }

    #[test]
    fn malformed_targets_fail_at_build_time() {
        for raw in [
            "0xabc::add_user",
            "add_user",
            "0xabc::courses::create_course::extra",
            "abc::courses::create_course",
            "0xabc::1courses::create_course",
            "0xabc::courses::",
            "0xabc::courses::create-course",
        ] {
            assert!(MoveTarget::parse(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn builder_preserves_argument_order_and_kinds() {
        let call = MoveCall::builder(MoveTarget::new(package(), "courses", "create_course").unwrap())
            .string("Rust 101")
            .string("Ownership and borrowing")
            .address("0x42")
            .u64(250)
            .u8(3)
            .build()
            .unwrap();

        let kinds: Vec<ArgKind> = call.arguments().iter().map(MoveArg::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ArgKind::String,
                ArgKind::String,
                ArgKind::Address,
                ArgKind::U64,
                ArgKind::U8
            ]
        );
        assert_eq!(call.arguments()[0], MoveArg::String("Rust 101".into()));
        assert_eq!(call.arguments()[3], MoveArg::U64(250));
    }

    #[test]
    fn invalid_address_fails_build_with_index() {
        let err = MoveCall::builder(MoveTarget::new(package(), "courses", "enroll").unwrap())
            .object(package())
            .address("not-an-address")
            .address("0x1")
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidAddress { index: 1, .. }));
    }

    #[test]
    fn same_value_encodes_per_declared_width() {
        assert_eq!(MoveArg::U8(5).pure_bytes().unwrap(), vec![5]);
        assert_eq!(
            MoveArg::U64(5).pure_bytes().unwrap(),
            vec![5, 0, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(
            MoveArg::String("ab".into()).pure_bytes().unwrap(),
            vec![2, b'a', b'b']
        );
        assert_eq!(MoveArg::Address(package()).pure_bytes().unwrap().len(), 32);
    }

    #[test]
    fn single_call_kind_has_one_input_per_argument() {
        let call = MoveCall::builder(MoveTarget::new(package(), "users", "update_xp").unwrap())
            .object(package())
            .u64(10)
            .build()
            .unwrap();
        let inputs = vec![
            CallArg::Object(ObjectArg::SharedObject {
                id: package(),
                initial_shared_version: 7,
                mutable: true,
            }),
            CallArg::Pure(vec![10, 0, 0, 0, 0, 0, 0, 0]),
        ];
        let kind = TransactionKind::single_call(&call, inputs);

        let TransactionKind::ProgrammableTransaction(ptb) = &kind;
        let Command::MoveCall(move_call) = &ptb.commands[0];
        assert_eq!(move_call.arguments, vec![Argument::Input(0), Argument::Input(1)]);

        let bytes = bcs::to_bytes(&kind).unwrap();
        // kind variant, input count, first input is CallArg::Object(SharedObject)
        assert_eq!(&bytes[..4], &[0, 2, 1, 1]);
    }
}
