//! Textual rendering of a module
//!
//! Human-readable listing of the emitted IR for driver output and
//! debugging. Instruction results and arguments are numbered per
//! function; constants print inline.

use std::collections::HashMap;
use std::fmt::Write;

use super::builder::{Context, Module};
use super::types::{Constant, Function, Instruction, ValueId, ValueKind};

pub fn print_module(context: &Context, module: &Module) -> String {
    let mut out = String::new();

    for (id, def) in context.struct_types() {
        let fields: Vec<String> = def.field_types.iter().map(|t| t.to_string()).collect();
        let _ = writeln!(out, "%struct.{} = type {{ {} }}", id.0, fields.join(", "));
    }
    if context.struct_types().next().is_some() {
        out.push('\n');
    }

    for (_, function) in module.functions() {
        if function.is_declaration {
            let params: Vec<String> = function.param_types.iter().map(|t| t.to_string()).collect();
            let _ = writeln!(
                out,
                "declare {} @{}({})",
                function.return_type,
                function.name,
                params.join(", ")
            );
        } else {
            print_function(&mut out, module, function);
        }
        out.push('\n');
    }

    out
}

fn print_function(out: &mut String, module: &Module, function: &Function) {
    let mut names: HashMap<ValueId, String> = HashMap::new();
    let mut counter = 0usize;
    for &arg in &function.args {
        names.insert(arg, format!("%{counter}"));
        counter += 1;
    }
    for block in &function.blocks {
        for record in &block.instructions {
            if let Some(result) = record.result {
                names.insert(result, format!("%{counter}"));
                counter += 1;
            }
        }
    }

    let params: Vec<String> = function
        .param_types
        .iter()
        .zip(&function.args)
        .map(|(ty, arg)| format!("{} {}", ty, names[arg]))
        .collect();
    let _ = writeln!(
        out,
        "define {} @{}({}) {{",
        function.return_type,
        function.name,
        params.join(", ")
    );

    for block in &function.blocks {
        let _ = writeln!(out, "{}:", block.label);
        for record in &block.instructions {
            let text = render_instruction(module, &names, &record.instruction);
            match record.result {
                Some(result) => {
                    let _ = writeln!(out, "  {} = {}", names[&result], text);
                }
                None => {
                    let _ = writeln!(out, "  {text}");
                }
            }
        }
    }
    let _ = writeln!(out, "}}");
}

fn render_instruction(
    module: &Module,
    names: &HashMap<ValueId, String>,
    instruction: &Instruction,
) -> String {
    match instruction {
        Instruction::Alloca { name, allocated_ty } => {
            format!("alloca {allocated_ty} ; {name}")
        }
        Instruction::Load { result_ty, slot } => {
            format!("load {result_ty}, ptr {}", operand(module, names, *slot))
        }
        Instruction::Store { value, slot } => format!(
            "store {}, ptr {}",
            typed_operand(module, names, *value),
            operand(module, names, *slot)
        ),
        Instruction::Binary { op, lhs, rhs } => format!(
            "{op} {}, {}",
            typed_operand(module, names, *lhs),
            operand(module, names, *rhs)
        ),
        Instruction::Cmp { op, lhs, rhs } => format!(
            "{op} {}, {}",
            typed_operand(module, names, *lhs),
            operand(module, names, *rhs)
        ),
        Instruction::Cast { op, value, to } => format!(
            "{op} {} to {to}",
            typed_operand(module, names, *value)
        ),
        Instruction::Call { callee, args } => {
            let function = module.function(*callee);
            let rendered: Vec<String> = args
                .iter()
                .map(|&a| typed_operand(module, names, a))
                .collect();
            format!(
                "call {} @{}({})",
                function.return_type,
                function.name,
                rendered.join(", ")
            )
        }
        Instruction::Ret { value: Some(value) } => {
            format!("ret {}", typed_operand(module, names, *value))
        }
        Instruction::Ret { value: None } => "ret void".to_string(),
    }
}

fn typed_operand(module: &Module, names: &HashMap<ValueId, String>, value: ValueId) -> String {
    format!(
        "{} {}",
        module.value_type(value),
        operand(module, names, value)
    )
}

fn operand(module: &Module, names: &HashMap<ValueId, String>, value: ValueId) -> String {
    match &module.value(value).kind {
        ValueKind::Constant(constant) => render_constant(constant),
        _ => names
            .get(&value)
            .cloned()
            .unwrap_or_else(|| "%?".to_string()),
    }
}

fn render_constant(constant: &Constant) -> String {
    match constant {
        Constant::Int { value, .. } => value.to_string(),
        Constant::Float { value, .. } => format!("{value:?}"),
        Constant::Bool(value) => value.to_string(),
        Constant::Str(value) => format!("c{value:?}"),
    }
}
