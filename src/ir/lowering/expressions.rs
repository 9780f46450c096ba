//! Expression lowering

use crate::ast::{AstNode, AstNodeKind, BinaryExpressionType};
use crate::ir::types::{BinaryIrOp, CmpOp, LowerError, LowerResult, ValueId};
use crate::types::{AbstractType, VariableType};

impl super::context::LowerCtx {
    /// Emit an IR constant for a literal of a primitive type.
    pub(super) fn lower_literal(
        &mut self,
        data: &str,
        ty: &AbstractType,
    ) -> LowerResult<ValueId> {
        let invalid = || LowerError::InvalidLiteral {
            text: data.to_string(),
            ty: format!("{:?}", ty.get()),
        };
        match ty.get() {
            VariableType::Int8 | VariableType::Int16 | VariableType::Int32 | VariableType::Int64 => {
                let value: i64 = data.parse().map_err(|_| invalid())?;
                let ir = ty.ir_type().ok_or_else(invalid)?;
                Ok(self.module.const_int(ir, value))
            }
            VariableType::Uint8
            | VariableType::Uint16
            | VariableType::Uint32
            | VariableType::Uint64 => {
                let value: u64 = data.parse().map_err(|_| invalid())?;
                let ir = ty.ir_type().ok_or_else(invalid)?;
                Ok(self.module.const_int(ir, value as i64))
            }
            VariableType::Float32 | VariableType::Float64 => {
                let value: f64 = data.parse().map_err(|_| invalid())?;
                let ir = ty.ir_type().ok_or_else(invalid)?;
                Ok(self.module.const_float(ir, value))
            }
            VariableType::Bool => match data {
                "true" | "1" => Ok(self.module.const_bool(true)),
                "false" | "0" => Ok(self.module.const_bool(false)),
                _ => Err(invalid()),
            },
            VariableType::String => Ok(self.module.const_str(data)),
            VariableType::None | VariableType::UserDefinedType => Err(invalid()),
        }
    }

    /// A variable reference resolves to its slot address, never the
    /// loaded value.
    pub(super) fn lower_variable_expression(&mut self, name: &str) -> LowerResult<ValueId> {
        self.variables
            .get(name)
            .copied()
            .ok_or_else(|| LowerError::UnknownVariable(name.to_string()))
    }

    /// Binary expressions hold their operands in reversed order: child 1
    /// is the left operand, child 0 the right (the RPN assembler's
    /// attachment order).
    pub(super) fn lower_binary(
        &mut self,
        op: BinaryExpressionType,
        expected_type: &AbstractType,
        children: &[AstNode],
    ) -> LowerResult<Option<ValueId>> {
        if children.len() != 2 {
            return Err(LowerError::MalformedExpression(
                "binary expression requires exactly two operands".to_string(),
            ));
        }
        let lhs = self.lower_node(&children[1])?.ok_or(LowerError::MissingValue)?;
        let rhs = self.lower_node(&children[0])?.ok_or(LowerError::MissingValue)?;

        let mut rhs_raw = rhs;
        if self.module.is_stack_slot(rhs) {
            rhs_raw = self.builder.create_load(&mut self.module, rhs)?;
        }

        if op == BinaryExpressionType::Assignment {
            // The slot itself is the store target; it is not loaded.
            if !self.module.is_stack_slot(lhs) {
                return Err(LowerError::NonAddressableAssignment);
            }
            self.builder.create_store(&mut self.module, rhs_raw, lhs)?;
            return Ok(None);
        }

        let mut lhs_raw = lhs;
        if self.module.is_stack_slot(lhs) {
            lhs_raw = self.builder.create_load(&mut self.module, lhs)?;
        }

        if expected_type.get().is_coercible() {
            if let Some(target) = expected_type.ir_type() {
                if self.module.value_type(lhs_raw) != target {
                    lhs_raw =
                        AbstractType::cast_value(&mut self.builder, &mut self.module, lhs_raw, expected_type)?;
                }
                if self.module.value_type(rhs_raw) != target {
                    rhs_raw =
                        AbstractType::cast_value(&mut self.builder, &mut self.module, rhs_raw, expected_type)?;
                }
            }
        }

        if op.is_math() {
            self.lower_math(op, lhs_raw, rhs_raw).map(Some)
        } else {
            self.lower_comparison(op, lhs_raw, rhs_raw).map(Some)
        }
    }

    fn lower_math(
        &mut self,
        op: BinaryExpressionType,
        lhs: ValueId,
        rhs: ValueId,
    ) -> LowerResult<ValueId> {
        let is_float = self.module.value_type(lhs).is_float();
        let ir_op = match op {
            BinaryExpressionType::Add => {
                if is_float {
                    BinaryIrOp::FAdd
                } else {
                    BinaryIrOp::Add
                }
            }
            BinaryExpressionType::Sub => {
                if is_float {
                    BinaryIrOp::FSub
                } else {
                    BinaryIrOp::Sub
                }
            }
            BinaryExpressionType::Mul => {
                if is_float {
                    BinaryIrOp::FMul
                } else {
                    BinaryIrOp::Mul
                }
            }
            BinaryExpressionType::Div => {
                if is_float {
                    BinaryIrOp::FDiv
                } else {
                    BinaryIrOp::SDiv
                }
            }
            BinaryExpressionType::Mod => {
                if is_float {
                    return Err(LowerError::UnsupportedOperation(
                        "modulo is only defined for integer types".to_string(),
                    ));
                }
                BinaryIrOp::SRem
            }
            other => {
                return Err(LowerError::UnsupportedOperation(format!(
                    "{other:?} is not a math operator"
                )))
            }
        };
        self.builder.create_binary(&mut self.module, ir_op, lhs, rhs)
    }

    fn lower_comparison(
        &mut self,
        op: BinaryExpressionType,
        lhs: ValueId,
        rhs: ValueId,
    ) -> LowerResult<ValueId> {
        let is_float = self.module.value_type(lhs).is_float();
        let cmp = match op {
            BinaryExpressionType::Less => {
                if is_float {
                    CmpOp::FOlt
                } else {
                    CmpOp::ISlt
                }
            }
            BinaryExpressionType::LessEq => {
                if is_float {
                    CmpOp::FOle
                } else {
                    CmpOp::ISle
                }
            }
            BinaryExpressionType::Greater => {
                if is_float {
                    CmpOp::FOgt
                } else {
                    CmpOp::ISgt
                }
            }
            BinaryExpressionType::GreaterEq => {
                if is_float {
                    CmpOp::FOge
                } else {
                    CmpOp::ISge
                }
            }
            BinaryExpressionType::Eq => {
                if is_float {
                    CmpOp::FOeq
                } else {
                    CmpOp::IEq
                }
            }
            other => {
                return Err(LowerError::UnsupportedOperation(format!(
                    "{other:?} is not a comparison operator"
                )))
            }
        };
        self.builder.create_cmp(&mut self.module, cmp, lhs, rhs)
    }

    /// Rebuild the flat reverse-polish child sequence into a tree with
    /// an explicit operand stack, then lower the root.
    pub(super) fn lower_expression(&mut self, children: &[AstNode]) -> LowerResult<Option<ValueId>> {
        let mut stack: Vec<AstNode> = Vec::new();
        for child in children {
            match child.kind {
                AstNodeKind::Literal { .. } | AstNodeKind::VariableExpression { .. } => {
                    stack.push(child.clone());
                }
                AstNodeKind::BinaryExpression { .. } => {
                    let right = stack.pop().ok_or_else(|| {
                        LowerError::MalformedExpression(
                            "operator is missing its right operand".to_string(),
                        )
                    })?;
                    let left = stack.pop().ok_or_else(|| {
                        LowerError::MalformedExpression(
                            "operator is missing its left operand".to_string(),
                        )
                    })?;
                    let mut node = child.clone();
                    node.push_child(right);
                    node.push_child(left);
                    stack.push(node);
                }
                _ => {
                    return Err(LowerError::MalformedExpression(
                        "only literals, variables and binary operators may appear".to_string(),
                    ))
                }
            }
        }
        match stack.pop() {
            Some(root) if stack.is_empty() => self.lower_node(&root),
            _ => Err(LowerError::MalformedExpression(
                "expression did not reduce to a single value".to_string(),
            )),
        }
    }
}
