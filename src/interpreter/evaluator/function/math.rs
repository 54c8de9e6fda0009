use std::any::Any;

use crate::{
    ast::Node,
    interpreter::{
        evaluator::{core::EvalResult, function::core::invalid_params},
        value::core::Value,
    },
};

/// Applies a unary float function to a single scalar argument.
fn unary(args: &[Value], node: &Node, f: fn(f32) -> f32) -> EvalResult<Value> {
    let [value] = args else {
        return Err(invalid_params(node));
    };

    Ok(Value::Float(f(value.scalar_or(invalid_params(node))?)))
}

/// Square root of a scalar.
pub fn sqrt(args: &[Value], node: &Node, _user_data: Option<&mut dyn Any>) -> EvalResult<Value> {
    unary(args, node, f32::sqrt)
}

/// `base` raised to `exponent`, both scalars.
pub fn pow(args: &[Value], node: &Node, _user_data: Option<&mut dyn Any>) -> EvalResult<Value> {
    let [base, exponent] = args else {
        return Err(invalid_params(node));
    };

    Ok(Value::Float(base.scalar_or(invalid_params(node))?
                        .powf(exponent.scalar_or(invalid_params(node))?)))
}

/// Sine of an angle in radians.
pub fn sin(args: &[Value], node: &Node, _user_data: Option<&mut dyn Any>) -> EvalResult<Value> {
    unary(args, node, f32::sin)
}

/// Cosine of an angle in radians.
pub fn cos(args: &[Value], node: &Node, _user_data: Option<&mut dyn Any>) -> EvalResult<Value> {
    unary(args, node, f32::cos)
}

/// Tangent of an angle in radians.
pub fn tan(args: &[Value], node: &Node, _user_data: Option<&mut dyn Any>) -> EvalResult<Value> {
    unary(args, node, f32::tan)
}

/// Arcsine, in radians.
pub fn asin(args: &[Value], node: &Node, _user_data: Option<&mut dyn Any>) -> EvalResult<Value> {
    unary(args, node, f32::asin)
}

/// Arccosine, in radians.
pub fn acos(args: &[Value], node: &Node, _user_data: Option<&mut dyn Any>) -> EvalResult<Value> {
    unary(args, node, f32::acos)
}

/// Arctangent, in radians.
pub fn atan(args: &[Value], node: &Node, _user_data: Option<&mut dyn Any>) -> EvalResult<Value> {
    unary(args, node, f32::atan)
}
