use std::any::Any;

use glam::Vec2;

use crate::{
    ast::Node,
    interpreter::{
        evaluator::{core::EvalResult, function::core::invalid_params},
        value::core::Value,
    },
};

/// Builds the iteration bounds of a `for` loop from two int arguments,
/// packed as a vec2 `{min, max}`.
#[allow(clippy::cast_precision_loss)]
pub fn range(args: &[Value], node: &Node, _user_data: Option<&mut dyn Any>) -> EvalResult<Value> {
    let [Value::Int(min), Value::Int(max)] = args else {
        return Err(invalid_params(node));
    };

    Ok(Value::Vec2(Vec2::new(*min as f32, *max as f32)))
}
