use std::any::Any;

use crate::{
    ast::Node,
    interpreter::{
        evaluator::{core::EvalResult, function::core::invalid_params},
        value::core::Value,
    },
};

/// Renders the arguments of a `print` call: each value in textual form,
/// separated by `, `.
///
/// Ints, floats and vectors are printable; void and quaternion arguments
/// are invalid parameters. Shared so a host overriding `print` can keep the
/// stock formatting.
pub fn format_values(args: &[Value], node: &Node) -> EvalResult<String> {
    let mut out = String::new();

    for (i, value) in args.iter().enumerate() {
        match value {
            Value::Int(_) | Value::Float(_) | Value::Vec2(_) | Value::Vec3(_) | Value::Vec4(_) => {},
            Value::Void | Value::Quaternion(_) => return Err(invalid_params(node)),
        }

        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&value.to_string());
    }

    Ok(out)
}

/// Writes the formatted arguments to standard output, followed by a
/// newline. Produces void.
pub fn print(args: &[Value], node: &Node, _user_data: Option<&mut dyn Any>) -> EvalResult<Value> {
    println!("{}", format_values(args, node)?);
    Ok(Value::Void)
}
