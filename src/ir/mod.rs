//! Intermediate representation and AST lowering
//!
//! The typed IR model, the context/module/builder triple the lowering
//! emits through, and the lowering pass itself.

mod builder;
mod printer;
mod types;

pub mod lowering;

pub use builder::{Builder, Context, InsertPoint, Module, StructTypeDef};
pub use lowering::{LowerCtx, ObjectReferenceInfo};
pub use printer::print_module;
pub use types::{
    BasicBlock, BinaryIrOp, CastOp, CmpOp, Constant, Function, FunctionId, Instruction,
    InstructionRecord, IrType, LowerError, LowerResult, StructId, ValueData, ValueId, ValueKind,
};
