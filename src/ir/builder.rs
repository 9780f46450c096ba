//! The context / module / builder triple
//!
//! `Context` interns aggregate type layouts, `Module` owns functions
//! and the value arena, and `Builder` is the insertion-point cursor all
//! instructions are emitted through. Lowering drives these three; the
//! machine back end consumes the resulting module.

use std::collections::HashMap;

use super::types::{
    BasicBlock, BinaryIrOp, CastOp, CmpOp, Constant, Function, FunctionId, Instruction,
    InstructionRecord, IrType, LowerError, LowerResult, StructId, ValueData, ValueId, ValueKind,
};

#[derive(Debug, Clone, PartialEq)]
pub struct StructTypeDef {
    pub field_types: Vec<IrType>,
}

/// Owns struct type layouts.
#[derive(Debug, Default)]
pub struct Context {
    struct_types: Vec<StructTypeDef>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_struct_type(&mut self, field_types: Vec<IrType>) -> StructId {
        self.struct_types.push(StructTypeDef { field_types });
        StructId(self.struct_types.len() - 1)
    }

    pub fn struct_type(&self, id: StructId) -> &StructTypeDef {
        &self.struct_types[id.0]
    }

    pub fn struct_types(&self) -> impl Iterator<Item = (StructId, &StructTypeDef)> {
        self.struct_types
            .iter()
            .enumerate()
            .map(|(i, def)| (StructId(i), def))
    }
}

/// Owns functions, their blocks, and every value.
#[derive(Debug, Default)]
pub struct Module {
    functions: Vec<Function>,
    symbols: HashMap<String, FunctionId>,
    values: Vec<ValueData>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_function(&self, name: &str) -> Option<FunctionId> {
        self.symbols.get(name).copied()
    }

    pub fn function(&self, id: FunctionId) -> &Function {
        &self.functions[id.0]
    }

    pub fn functions(&self) -> impl Iterator<Item = (FunctionId, &Function)> {
        self.functions
            .iter()
            .enumerate()
            .map(|(i, f)| (FunctionId(i), f))
    }

    /// Create a function definition with externally visible linkage.
    /// Any previous symbol of the same name is shadowed; callers that
    /// need the duplicate check do it through [`Module::get_function`].
    pub fn declare_function(
        &mut self,
        name: &str,
        param_names: Vec<String>,
        param_types: Vec<IrType>,
        return_type: IrType,
    ) -> FunctionId {
        self.insert_function(name, param_names, param_types, return_type, false)
    }

    /// Fetch a symbol, materialising a body-less declaration when it
    /// does not exist yet. Used for externally linked routines.
    pub fn get_or_insert_function(
        &mut self,
        name: &str,
        param_types: Vec<IrType>,
        return_type: IrType,
    ) -> FunctionId {
        if let Some(id) = self.get_function(name) {
            return id;
        }
        self.insert_function(name, Vec::new(), param_types, return_type, true)
    }

    fn insert_function(
        &mut self,
        name: &str,
        param_names: Vec<String>,
        param_types: Vec<IrType>,
        return_type: IrType,
        is_declaration: bool,
    ) -> FunctionId {
        let id = FunctionId(self.functions.len());
        let args = param_types
            .iter()
            .enumerate()
            .map(|(index, &ty)| {
                self.add_value(
                    ty,
                    ValueKind::Argument {
                        function: id,
                        index,
                    },
                )
            })
            .collect();
        self.functions.push(Function {
            name: name.to_string(),
            param_names,
            param_types,
            return_type,
            blocks: Vec::new(),
            args,
            is_declaration,
        });
        self.symbols.insert(name.to_string(), id);
        id
    }

    pub fn append_basic_block(&mut self, function: FunctionId, label: &str) -> usize {
        let blocks = &mut self.functions[function.0].blocks;
        blocks.push(BasicBlock {
            label: label.to_string(),
            instructions: Vec::new(),
        });
        blocks.len() - 1
    }

    pub(crate) fn add_value(&mut self, ty: IrType, kind: ValueKind) -> ValueId {
        self.values.push(ValueData { ty, kind });
        ValueId(self.values.len() - 1)
    }

    pub fn value(&self, id: ValueId) -> &ValueData {
        &self.values[id.0]
    }

    pub fn value_type(&self, id: ValueId) -> IrType {
        self.values[id.0].ty
    }

    /// True when the value is the address of a stack allocation.
    pub fn is_stack_slot(&self, id: ValueId) -> bool {
        matches!(self.values[id.0].kind, ValueKind::StackSlot { .. })
    }

    /// The element type of a stack slot, if the value is one.
    pub fn allocated_type(&self, id: ValueId) -> Option<IrType> {
        match self.values[id.0].kind {
            ValueKind::StackSlot { allocated_ty } => Some(allocated_ty),
            _ => None,
        }
    }

    pub fn const_int(&mut self, ty: IrType, value: i64) -> ValueId {
        self.add_value(ty, ValueKind::Constant(Constant::Int { ty, value }))
    }

    pub fn const_float(&mut self, ty: IrType, value: f64) -> ValueId {
        self.add_value(ty, ValueKind::Constant(Constant::Float { ty, value }))
    }

    pub fn const_bool(&mut self, value: bool) -> ValueId {
        self.add_value(IrType::I1, ValueKind::Constant(Constant::Bool(value)))
    }

    pub fn const_str(&mut self, value: impl Into<String>) -> ValueId {
        self.add_value(IrType::Ptr, ValueKind::Constant(Constant::Str(value.into())))
    }
}

/// Where the next instruction is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertPoint {
    pub function: FunctionId,
    pub block: usize,
}

/// Emits instructions at an insertion point.
#[derive(Debug, Default)]
pub struct Builder {
    insert_point: Option<InsertPoint>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_insert_point(&mut self, ip: InsertPoint) {
        self.insert_point = Some(ip);
    }

    /// Save the current insertion point so it can be restored after a
    /// nested definition is finished.
    pub fn save_ip(&self) -> Option<InsertPoint> {
        self.insert_point
    }

    pub fn restore_ip(&mut self, ip: Option<InsertPoint>) {
        self.insert_point = ip;
    }

    fn emit(
        &self,
        module: &mut Module,
        instruction: Instruction,
        result: Option<(IrType, ValueKind)>,
    ) -> LowerResult<Option<ValueId>> {
        let ip = self.insert_point.ok_or(LowerError::NoInsertPoint)?;
        let value = result.map(|(ty, kind)| module.add_value(ty, kind));
        module.functions[ip.function.0].blocks[ip.block]
            .instructions
            .push(InstructionRecord {
                result: value,
                instruction,
            });
        Ok(value)
    }

    fn emit_value(
        &self,
        module: &mut Module,
        instruction: Instruction,
        ty: IrType,
        kind: ValueKind,
    ) -> LowerResult<ValueId> {
        // emit() always yields a value when a result type is supplied
        match self.emit(module, instruction, Some((ty, kind)))? {
            Some(v) => Ok(v),
            None => Err(LowerError::MissingValue),
        }
    }

    pub fn create_alloca(
        &mut self,
        module: &mut Module,
        name: &str,
        allocated_ty: IrType,
    ) -> LowerResult<ValueId> {
        self.emit_value(
            module,
            Instruction::Alloca {
                name: name.to_string(),
                allocated_ty,
            },
            IrType::Ptr,
            ValueKind::StackSlot { allocated_ty },
        )
    }

    pub fn create_load(&mut self, module: &mut Module, slot: ValueId) -> LowerResult<ValueId> {
        let result_ty = module.allocated_type(slot).ok_or(LowerError::NotAStackSlot)?;
        self.emit_value(
            module,
            Instruction::Load { result_ty, slot },
            result_ty,
            ValueKind::Instruction,
        )
    }

    pub fn create_store(
        &mut self,
        module: &mut Module,
        value: ValueId,
        slot: ValueId,
    ) -> LowerResult<()> {
        self.emit(module, Instruction::Store { value, slot }, None)?;
        Ok(())
    }

    pub fn create_binary(
        &mut self,
        module: &mut Module,
        op: BinaryIrOp,
        lhs: ValueId,
        rhs: ValueId,
    ) -> LowerResult<ValueId> {
        let ty = module.value_type(lhs);
        self.emit_value(
            module,
            Instruction::Binary { op, lhs, rhs },
            ty,
            ValueKind::Instruction,
        )
    }

    pub fn create_cmp(
        &mut self,
        module: &mut Module,
        op: CmpOp,
        lhs: ValueId,
        rhs: ValueId,
    ) -> LowerResult<ValueId> {
        self.emit_value(
            module,
            Instruction::Cmp { op, lhs, rhs },
            IrType::I1,
            ValueKind::Instruction,
        )
    }

    pub fn create_cast(
        &mut self,
        module: &mut Module,
        op: CastOp,
        value: ValueId,
        to: IrType,
    ) -> LowerResult<ValueId> {
        self.emit_value(
            module,
            Instruction::Cast { op, value, to },
            to,
            ValueKind::Instruction,
        )
    }

    pub fn create_call(
        &mut self,
        module: &mut Module,
        callee: FunctionId,
        args: Vec<ValueId>,
    ) -> LowerResult<ValueId> {
        let return_type = module.function(callee).return_type;
        self.emit_value(
            module,
            Instruction::Call { callee, args },
            return_type,
            ValueKind::Instruction,
        )
    }

    pub fn create_ret(&mut self, module: &mut Module, value: Option<ValueId>) -> LowerResult<()> {
        self.emit(module, Instruction::Ret { value }, None)?;
        Ok(())
    }

    /// Whether the block at the insertion point already ends in a
    /// terminator.
    pub fn block_has_terminator(&self, module: &Module) -> bool {
        let Some(ip) = self.insert_point else {
            return false;
        };
        module.functions[ip.function.0].blocks[ip.block]
            .instructions
            .last()
            .is_some_and(|record| record.instruction.is_terminator())
    }
}
