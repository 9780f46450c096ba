//! Core type definitions for the Slate compiler
//!
//! `VariableType` is the closed set of primitive type tags plus the
//! marker for user-defined record types. `AbstractType` pairs a tag
//! with an addressability kind and, for records, the declared type
//! name.

use crate::ir::{Builder, CastOp, CmpOp, IrType, LowerError, LowerResult, Module, ValueId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableType {
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    Bool,
    /// Pointer-to-byte semantics.
    String,
    /// The void type.
    None,
    UserDefinedType,
}

impl VariableType {
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            VariableType::Int8
                | VariableType::Int16
                | VariableType::Int32
                | VariableType::Int64
                | VariableType::Uint8
                | VariableType::Uint16
                | VariableType::Uint32
                | VariableType::Uint64
        )
    }

    pub fn is_unsigned(self) -> bool {
        matches!(
            self,
            VariableType::Uint8 | VariableType::Uint16 | VariableType::Uint32 | VariableType::Uint64
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, VariableType::Float32 | VariableType::Float64)
    }

    /// True for the types binary expressions coerce their operands to.
    pub fn is_coercible(self) -> bool {
        self.is_integer() || self.is_float() || self == VariableType::Bool
    }

    /// The IR type a primitive lowers to. `None` for user-defined
    /// records, whose layout lives in the lowering context.
    pub fn ir_type(self) -> Option<IrType> {
        match self {
            VariableType::Int8 | VariableType::Uint8 => Some(IrType::I8),
            VariableType::Int16 | VariableType::Uint16 => Some(IrType::I16),
            VariableType::Int32 | VariableType::Uint32 => Some(IrType::I32),
            VariableType::Int64 | VariableType::Uint64 => Some(IrType::I64),
            VariableType::Float32 => Some(IrType::F32),
            VariableType::Float64 => Some(IrType::F64),
            VariableType::Bool => Some(IrType::I1),
            VariableType::String => Some(IrType::Ptr),
            VariableType::None => Some(IrType::Void),
            VariableType::UserDefinedType => None,
        }
    }
}

/// Whether a value names an addressable location or a computed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    LValue,
    RValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AbstractType {
    ty: VariableType,
    kind: TypeKind,
    user_type: Option<String>,
}

impl AbstractType {
    pub fn new(ty: VariableType) -> Self {
        Self {
            ty,
            kind: TypeKind::RValue,
            user_type: None,
        }
    }

    pub fn user_defined(name: impl Into<String>) -> Self {
        Self {
            ty: VariableType::UserDefinedType,
            kind: TypeKind::RValue,
            user_type: Some(name.into()),
        }
    }

    pub fn with_kind(mut self, kind: TypeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn get(&self) -> VariableType {
        self.ty
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn user_type_name(&self) -> Option<&str> {
        self.user_type.as_deref()
    }

    pub fn ir_type(&self) -> Option<IrType> {
        self.ty.ir_type()
    }

    /// Convert `value` to this crate's IR representation of `target`.
    ///
    /// Covers every pair among the integer, float, and bool primitives:
    /// integer widths convert by extension (zero-extension when the
    /// target is unsigned) or truncation, integers and floats convert
    /// through the signed paths, bool zero-extends outward and inward
    /// conversion is a compare against zero. Casting to void is a
    /// program error.
    pub fn cast_value(
        builder: &mut Builder,
        module: &mut Module,
        value: ValueId,
        target: &AbstractType,
    ) -> LowerResult<ValueId> {
        if target.get() == VariableType::None {
            return Err(LowerError::VoidCast);
        }
        let to = target
            .ir_type()
            .ok_or_else(|| LowerError::UncastableType(format!("{:?}", target.get())))?;
        let from = module.value_type(value);
        if from == to {
            return Ok(value);
        }

        match (from, to) {
            (IrType::I1, t) if t.is_integer() => builder.create_cast(module, CastOp::ZExt, value, t),
            (IrType::I1, t) if t.is_float() => builder.create_cast(module, CastOp::UiToFp, value, t),
            (f, IrType::I1) if f.is_integer() => {
                let zero = module.const_int(f, 0);
                builder.create_cmp(module, CmpOp::INe, value, zero)
            }
            (f, IrType::I1) if f.is_float() => {
                let zero = module.const_float(f, 0.0);
                builder.create_cmp(module, CmpOp::FOne, value, zero)
            }
            (f, t) if f.is_integer() && t.is_integer() => {
                let op = if t.bit_width() > f.bit_width() {
                    if target.get().is_unsigned() {
                        CastOp::ZExt
                    } else {
                        CastOp::SExt
                    }
                } else {
                    CastOp::Trunc
                };
                builder.create_cast(module, op, value, t)
            }
            (f, t) if f.is_integer() && t.is_float() => {
                // Integer sources convert as signed; only a bool source
                // takes the unsigned path.
                builder.create_cast(module, CastOp::SiToFp, value, t)
            }
            (f, t) if f.is_float() && t.is_integer() => {
                builder.create_cast(module, CastOp::FpToSi, value, t)
            }
            (f, t) if f.is_float() && t.is_float() => {
                let op = if t.bit_width() > f.bit_width() {
                    CastOp::FpExt
                } else {
                    CastOp::FpTrunc
                };
                builder.create_cast(module, op, value, t)
            }
            (from, to) => Err(LowerError::UnsupportedCast { from, to }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub name: String,
    pub ty: AbstractType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_ir_mapping() {
        assert_eq!(VariableType::Int32.ir_type(), Some(IrType::I32));
        assert_eq!(VariableType::Uint32.ir_type(), Some(IrType::I32));
        assert_eq!(VariableType::Bool.ir_type(), Some(IrType::I1));
        assert_eq!(VariableType::String.ir_type(), Some(IrType::Ptr));
        assert_eq!(VariableType::None.ir_type(), Some(IrType::Void));
        assert_eq!(VariableType::UserDefinedType.ir_type(), None);
    }

    #[test]
    fn kind_defaults_to_rvalue() {
        let ty = AbstractType::new(VariableType::Int8);
        assert_eq!(ty.kind(), TypeKind::RValue);
        assert_eq!(
            ty.with_kind(TypeKind::LValue).kind(),
            TypeKind::LValue
        );
    }
}
