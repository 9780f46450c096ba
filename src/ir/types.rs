//! Typed IR data model
//!
//! The intermediate representation the AST lowers into: machine
//! independent, explicitly typed, with stack slots, loads and stores,
//! and straight-line instruction lists inside basic blocks. Everything
//! is plain data so tests and the printer can walk the emitted stream.

use std::fmt;
use thiserror::Error;

/// Identifies a struct layout registered with the [`super::Context`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StructId(pub(crate) usize);

/// Identifies a function inside a [`super::Module`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionId(pub(crate) usize);

/// Handle to a value in the module's value arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueId(pub(crate) usize);

/// IR-level types. Integer types are signless; signedness lives in the
/// front end's `VariableType` and picks the instruction variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IrType {
    I1,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Ptr,
    Void,
    Struct(StructId),
}

impl IrType {
    /// Integer types other than the single-bit bool carrier.
    pub fn is_integer(self) -> bool {
        matches!(self, IrType::I8 | IrType::I16 | IrType::I32 | IrType::I64)
    }

    pub fn is_float(self) -> bool {
        matches!(self, IrType::F32 | IrType::F64)
    }

    pub fn bit_width(self) -> u32 {
        match self {
            IrType::I1 => 1,
            IrType::I8 => 8,
            IrType::I16 => 16,
            IrType::I32 => 32,
            IrType::F32 => 32,
            IrType::I64 => 64,
            IrType::F64 => 64,
            IrType::Ptr => 64,
            IrType::Void => 0,
            IrType::Struct(_) => 0,
        }
    }
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrType::I1 => write!(f, "i1"),
            IrType::I8 => write!(f, "i8"),
            IrType::I16 => write!(f, "i16"),
            IrType::I32 => write!(f, "i32"),
            IrType::I64 => write!(f, "i64"),
            IrType::F32 => write!(f, "float"),
            IrType::F64 => write!(f, "double"),
            IrType::Ptr => write!(f, "ptr"),
            IrType::Void => write!(f, "void"),
            IrType::Struct(id) => write!(f, "%struct.{}", id.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Int { ty: IrType, value: i64 },
    Float { ty: IrType, value: f64 },
    Bool(bool),
    Str(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryIrOp {
    Add,
    Sub,
    Mul,
    SDiv,
    SRem,
    FAdd,
    FSub,
    FMul,
    FDiv,
}

impl fmt::Display for BinaryIrOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BinaryIrOp::Add => "add",
            BinaryIrOp::Sub => "sub",
            BinaryIrOp::Mul => "mul",
            BinaryIrOp::SDiv => "sdiv",
            BinaryIrOp::SRem => "srem",
            BinaryIrOp::FAdd => "fadd",
            BinaryIrOp::FSub => "fsub",
            BinaryIrOp::FMul => "fmul",
            BinaryIrOp::FDiv => "fdiv",
        };
        write!(f, "{name}")
    }
}

/// Comparison predicates: signed integer compares and their ordered
/// float counterparts. `INe`/`FOne` back the bool truthiness casts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    IEq,
    INe,
    ISlt,
    ISle,
    ISgt,
    ISge,
    FOeq,
    FOne,
    FOlt,
    FOle,
    FOgt,
    FOge,
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CmpOp::IEq => "icmp eq",
            CmpOp::INe => "icmp ne",
            CmpOp::ISlt => "icmp slt",
            CmpOp::ISle => "icmp sle",
            CmpOp::ISgt => "icmp sgt",
            CmpOp::ISge => "icmp sge",
            CmpOp::FOeq => "fcmp oeq",
            CmpOp::FOne => "fcmp one",
            CmpOp::FOlt => "fcmp olt",
            CmpOp::FOle => "fcmp ole",
            CmpOp::FOgt => "fcmp ogt",
            CmpOp::FOge => "fcmp oge",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastOp {
    Trunc,
    ZExt,
    SExt,
    FpTrunc,
    FpExt,
    SiToFp,
    UiToFp,
    FpToSi,
}

impl fmt::Display for CastOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CastOp::Trunc => "trunc",
            CastOp::ZExt => "zext",
            CastOp::SExt => "sext",
            CastOp::FpTrunc => "fptrunc",
            CastOp::FpExt => "fpext",
            CastOp::SiToFp => "sitofp",
            CastOp::UiToFp => "uitofp",
            CastOp::FpToSi => "fptosi",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Alloca {
        name: String,
        allocated_ty: IrType,
    },
    Load {
        result_ty: IrType,
        slot: ValueId,
    },
    Store {
        value: ValueId,
        slot: ValueId,
    },
    Binary {
        op: BinaryIrOp,
        lhs: ValueId,
        rhs: ValueId,
    },
    Cmp {
        op: CmpOp,
        lhs: ValueId,
        rhs: ValueId,
    },
    Cast {
        op: CastOp,
        value: ValueId,
        to: IrType,
    },
    Call {
        callee: FunctionId,
        args: Vec<ValueId>,
    },
    Ret {
        value: Option<ValueId>,
    },
}

impl Instruction {
    pub fn is_terminator(&self) -> bool {
        matches!(self, Instruction::Ret { .. })
    }
}

/// One emitted instruction plus the value it produced, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct InstructionRecord {
    pub result: Option<ValueId>,
    pub instruction: Instruction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BasicBlock {
    pub label: String,
    pub instructions: Vec<InstructionRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub param_names: Vec<String>,
    pub param_types: Vec<IrType>,
    pub return_type: IrType,
    pub blocks: Vec<BasicBlock>,
    /// Incoming argument values, one per parameter.
    pub args: Vec<ValueId>,
    /// True for symbols declared but not defined here (externally
    /// linked routines).
    pub is_declaration: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueData {
    pub ty: IrType,
    pub kind: ValueKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    Constant(Constant),
    Argument { function: FunctionId, index: usize },
    /// Result of an alloca; the handle is the slot's address.
    StackSlot { allocated_ty: IrType },
    /// Result of any other instruction.
    Instruction,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LowerError {
    #[error("variable `{0}` is already declared")]
    Redeclaration(String),
    #[error("no variable of name `{0}` exists")]
    UnknownVariable(String),
    #[error("struct `{0}` has not been declared")]
    UnknownRecord(String),
    #[error("`{0}` is not a known function")]
    UnknownFunction(String),
    #[error("function `{0}` is already defined")]
    FunctionAlreadyDefined(String),
    #[error("call to `{function}` expects {expected} arguments, found {found}")]
    ArityMismatch {
        function: String,
        expected: usize,
        found: usize,
    },
    #[error("left-hand side of assignment is not an addressable location")]
    NonAddressableAssignment,
    #[error("malformed expression: {0}")]
    MalformedExpression(String),
    #[error("invalid literal `{text}` for type {ty}")]
    InvalidLiteral { text: String, ty: String },
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
    #[error("cannot cast a value to void")]
    VoidCast,
    #[error("cannot cast to type {0}")]
    UncastableType(String),
    #[error("unsupported cast from {from} to {to}")]
    UnsupportedCast { from: IrType, to: IrType },
    #[error("operand produced no value")]
    MissingValue,
    #[error("cannot declare a value of type void")]
    VoidDeclaration(String),
    #[error("no insertion point is set")]
    NoInsertPoint,
    #[error("value is not a stack slot")]
    NotAStackSlot,
}

pub type LowerResult<T> = Result<T, LowerError>;
