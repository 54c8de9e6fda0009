use std::any::Any;

use glam::{Vec2, Vec3, Vec4};
use rand::Rng;

use crate::{
    ast::Node,
    interpreter::{
        evaluator::{core::EvalResult, function::core::invalid_params},
        value::core::Value,
    },
};

/// Uniform random values between two same-shape bounds.
///
/// - int bounds: a uniform int in `[min, max)`; an empty range is an
///   invalid parameter.
/// - vector bounds: per-component `min + u * (max - min)` with
///   `u ∈ [0, 1)`.
/// - any other scalar mix: a float by the same formula.
pub fn rand(args: &[Value], node: &Node, _user_data: Option<&mut dyn Any>) -> EvalResult<Value> {
    let [a, b] = args else {
        return Err(invalid_params(node));
    };

    let mut rng = rand::thread_rng();

    match (a, b) {
        (Value::Int(min), Value::Int(max)) => {
            if max <= min {
                return Err(invalid_params(node));
            }
            Ok(Value::Int(rng.gen_range(*min..*max)))
        },
        (Value::Vec2(min), Value::Vec2(max)) => {
            Ok(Value::Vec2(Vec2::new(scalar_rand(&mut rng, min.x, max.x),
                                     scalar_rand(&mut rng, min.y, max.y))))
        },
        (Value::Vec3(min), Value::Vec3(max)) => {
            Ok(Value::Vec3(Vec3::new(scalar_rand(&mut rng, min.x, max.x),
                                     scalar_rand(&mut rng, min.y, max.y),
                                     scalar_rand(&mut rng, min.z, max.z))))
        },
        (Value::Vec4(min), Value::Vec4(max)) => {
            Ok(Value::Vec4(Vec4::new(scalar_rand(&mut rng, min.x, max.x),
                                     scalar_rand(&mut rng, min.y, max.y),
                                     scalar_rand(&mut rng, min.z, max.z),
                                     scalar_rand(&mut rng, min.w, max.w))))
        },
        _ => {
            let min = a.scalar_or(invalid_params(node))?;
            let max = b.scalar_or(invalid_params(node))?;
            Ok(Value::Float(scalar_rand(&mut rng, min, max)))
        },
    }
}

fn scalar_rand<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.gen_range(0.0f32..1.0) * (max - min)
}
