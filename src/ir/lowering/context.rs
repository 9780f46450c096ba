//! Lowering context
//!
//! `LowerCtx` bundles the context/module/builder triple with the state
//! the lowering pass threads through every node: declared variable
//! slots, record layouts, registered function signatures, and the
//! saved-insertion-point stack. Nothing here is process-wide; a fresh
//! context is a fresh compilation.

use std::collections::HashMap;

use crate::ir::builder::{Builder, Context, InsertPoint, Module};
use crate::ir::types::{IrType, LowerError, LowerResult, StructId, ValueId};
use crate::types::{AbstractType, Parameter, VariableType};

/// Layout and field ordering of a declared record type.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectReferenceInfo {
    pub layout: StructId,
    pub field_index: HashMap<String, u32>,
}

pub struct LowerCtx {
    pub context: Context,
    pub module: Module,
    pub builder: Builder,
    pub(crate) variables: HashMap<String, ValueId>,
    pub(crate) records: HashMap<String, ObjectReferenceInfo>,
    pub(crate) function_signatures: HashMap<String, Vec<Parameter>>,
    pub(crate) saved_insertion_points: Vec<Option<InsertPoint>>,
    pub(crate) externals: HashMap<String, (Vec<IrType>, IrType)>,
}

impl LowerCtx {
    pub fn new() -> Self {
        let mut ctx = Self {
            context: Context::new(),
            module: Module::new(),
            builder: Builder::new(),
            variables: HashMap::new(),
            records: HashMap::new(),
            function_signatures: HashMap::new(),
            saved_insertion_points: Vec::new(),
            externals: HashMap::new(),
        };
        // Externally linked timing routines, callable without a source
        // level declaration.
        for name in ["sleep", "_sleep", "nanosleep"] {
            ctx.register_external(
                name,
                vec![Parameter {
                    name: "time".to_string(),
                    ty: AbstractType::new(VariableType::Int32),
                }],
                VariableType::Int32,
            );
        }
        ctx
    }

    /// Register an externally linked routine. Its symbol is materialised
    /// on first call through `get_or_insert_function`.
    pub fn register_external(
        &mut self,
        name: &str,
        params: Vec<Parameter>,
        return_type: VariableType,
    ) {
        let param_types = params
            .iter()
            .map(|p| p.ty.ir_type().unwrap_or(IrType::Ptr))
            .collect();
        let ret = return_type.ir_type().unwrap_or(IrType::Void);
        self.externals.insert(name.to_string(), (param_types, ret));
        self.function_signatures.insert(name.to_string(), params);
    }

    pub fn variable_slot(&self, name: &str) -> Option<ValueId> {
        self.variables.get(name).copied()
    }

    pub fn record(&self, name: &str) -> Option<&ObjectReferenceInfo> {
        self.records.get(name)
    }

    pub fn function_signature(&self, name: &str) -> Option<&[Parameter]> {
        self.function_signatures.get(name).map(|p| p.as_slice())
    }

    /// IR type of a declared parameter or member. Record types must be
    /// declared before use.
    pub(crate) fn field_ir_type(&self, ty: &AbstractType) -> LowerResult<IrType> {
        match ty.get() {
            VariableType::UserDefinedType => {
                let name = ty
                    .user_type_name()
                    .ok_or_else(|| LowerError::UnknownRecord(String::new()))?;
                let info = self
                    .records
                    .get(name)
                    .ok_or_else(|| LowerError::UnknownRecord(name.to_string()))?;
                Ok(IrType::Struct(info.layout))
            }
            VariableType::None => Err(LowerError::VoidDeclaration(String::new())),
            other => other
                .ir_type()
                .ok_or_else(|| LowerError::UncastableType(format!("{other:?}"))),
        }
    }
}

impl Default for LowerCtx {
    fn default() -> Self {
        Self::new()
    }
}
