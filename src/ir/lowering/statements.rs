//! Statement lowering

use std::collections::HashMap;

use crate::ast::{Argument, AstNode, AstNodeKind, Member};
use crate::ir::builder::InsertPoint;
use crate::ir::types::{IrType, LowerError, LowerResult, ValueId};
use crate::types::{AbstractType, Parameter, TypeKind, VariableType};

use super::context::ObjectReferenceInfo;

impl super::context::LowerCtx {
    /// Allocate a stack slot for a new variable and record it.
    pub(super) fn lower_variable_declaration(
        &mut self,
        name: &str,
        ty: &AbstractType,
    ) -> LowerResult<ValueId> {
        if self.variables.contains_key(name) {
            return Err(LowerError::Redeclaration(name.to_string()));
        }
        if ty.get() == VariableType::None {
            return Err(LowerError::VoidDeclaration(name.to_string()));
        }
        let allocated = self.field_ir_type(ty)?;
        let slot = self.builder.create_alloca(&mut self.module, name, allocated)?;
        self.variables.insert(name.to_string(), slot);
        Ok(slot)
    }

    pub(super) fn lower_return(&mut self, children: &[AstNode]) -> LowerResult<Option<ValueId>> {
        match children.first() {
            Some(child) => {
                let value = self.lower_node(child)?.ok_or(LowerError::MissingValue)?;
                let value = if self.module.is_stack_slot(value) {
                    self.builder.create_load(&mut self.module, value)?
                } else {
                    value
                };
                self.builder.create_ret(&mut self.module, Some(value))?;
            }
            None => self.builder.create_ret(&mut self.module, None)?,
        }
        Ok(None)
    }

    /// Record a struct declaration: build the layout from the member
    /// types (nested records must already be declared) and remember the
    /// field ordering.
    pub(super) fn lower_struct(
        &mut self,
        name: &str,
        members: &[Member],
    ) -> LowerResult<Option<ValueId>> {
        let mut field_types = Vec::with_capacity(members.len());
        let mut field_index = HashMap::new();
        for (k, member) in members.iter().enumerate() {
            field_types.push(self.field_ir_type(&member.ty)?);
            field_index.insert(member.name.clone(), k as u32);
        }
        let layout = self.context.create_struct_type(field_types);
        self.records
            .insert(name.to_string(), ObjectReferenceInfo { layout, field_index });
        Ok(None)
    }

    pub(super) fn lower_function_declaration(
        &mut self,
        name: &str,
        return_type: VariableType,
        params: &[Parameter],
        children: &[AstNode],
    ) -> LowerResult<Option<ValueId>> {
        self.saved_insertion_points.push(self.builder.save_ip());
        self.function_signatures
            .insert(name.to_string(), params.to_vec());

        let return_ir = return_type.ir_type().ok_or_else(|| {
            LowerError::UnsupportedOperation(format!(
                "function `{name}` has a non-primitive return type"
            ))
        })?;
        let mut param_types = Vec::with_capacity(params.len());
        let mut param_names = Vec::with_capacity(params.len());
        for param in params {
            param_types.push(self.field_ir_type(&param.ty)?);
            param_names.push(param.name.clone());
        }

        if self.module.get_function(name).is_some() {
            return Err(LowerError::FunctionAlreadyDefined(name.to_string()));
        }
        let function =
            self.module
                .declare_function(name, param_names, param_types.clone(), return_ir);
        let entry = self.module.append_basic_block(function, "entry");
        self.builder.set_insert_point(InsertPoint {
            function,
            block: entry,
        });

        // Spill incoming arguments into named slots so parameters read
        // like ordinary variables. The entries are scoped to this body.
        for (k, param) in params.iter().enumerate() {
            let slot = self
                .builder
                .create_alloca(&mut self.module, &param.name, param_types[k])?;
            let arg = self.module.function(function).args[k];
            self.builder.create_store(&mut self.module, arg, slot)?;
            self.variables.insert(format!("{name}::{}", param.name), slot);
        }

        for child in children {
            self.lower_node(child)?;
            if matches!(child.kind, AstNodeKind::ReturnStatement) {
                break;
            }
        }

        for param in params {
            self.variables.remove(&format!("{name}::{}", param.name));
        }

        if return_ir == IrType::Void && !self.builder.block_has_terminator(&self.module) {
            self.builder.create_ret(&mut self.module, None)?;
        }

        let restored = self.saved_insertion_points.pop().unwrap_or(None);
        self.builder.restore_ip(restored);
        Ok(None)
    }

    pub(super) fn lower_function_call(
        &mut self,
        name: &str,
        arguments: &[Argument],
    ) -> LowerResult<Option<ValueId>> {
        // Externally linked routines get their symbol materialised on
        // first use.
        if let Some((param_types, return_type)) = self.externals.get(name).cloned() {
            self.module
                .get_or_insert_function(name, param_types, return_type);
        }

        let expected = self
            .function_signatures
            .get(name)
            .cloned()
            .ok_or_else(|| LowerError::UnknownFunction(name.to_string()))?;
        if arguments.len() != expected.len() {
            return Err(LowerError::ArityMismatch {
                function: name.to_string(),
                expected: expected.len(),
                found: arguments.len(),
            });
        }

        let mut args = Vec::with_capacity(arguments.len());
        for (argument, parameter) in arguments.iter().zip(&expected) {
            let value = if argument.field.kind() == TypeKind::RValue {
                let constant = self.lower_literal(&argument.data, &argument.field)?;
                self.coerce_argument(constant, argument, parameter)?
            } else {
                let slot = *self
                    .variables
                    .get(&argument.data)
                    .ok_or_else(|| LowerError::UnknownVariable(argument.data.clone()))?;
                let loaded = self.builder.create_load(&mut self.module, slot)?;
                self.coerce_argument(loaded, argument, parameter)?
            };
            args.push(value);
        }

        let callee = self
            .module
            .get_function(name)
            .ok_or_else(|| LowerError::UnknownFunction(name.to_string()))?;
        let call = self.builder.create_call(&mut self.module, callee, args)?;
        Ok(Some(call))
    }

    fn coerce_argument(
        &mut self,
        value: ValueId,
        argument: &Argument,
        parameter: &Parameter,
    ) -> LowerResult<ValueId> {
        if argument.field.get() != parameter.ty.get() {
            AbstractType::cast_value(&mut self.builder, &mut self.module, value, &parameter.ty)
        } else {
            Ok(value)
        }
    }
}
