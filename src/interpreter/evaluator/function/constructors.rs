use std::any::Any;

use glam::{EulerRot, Quat, Vec2, Vec3, Vec4};

use crate::{
    ast::Node,
    interpreter::{
        evaluator::{core::EvalResult, function::core::invalid_params},
        value::core::Value,
    },
};

/// Truncates a scalar toward zero into an int.
#[allow(clippy::cast_possible_truncation)]
pub fn int(args: &[Value], node: &Node, _user_data: Option<&mut dyn Any>) -> EvalResult<Value> {
    let [value] = args else {
        return Err(invalid_params(node));
    };

    Ok(Value::Int(value.scalar_or(invalid_params(node))? as i32))
}

/// Constructs a vec2: zero, a splat of one scalar, or `(x, y)`.
pub fn vec2(args: &[Value], node: &Node, _user_data: Option<&mut dyn Any>) -> EvalResult<Value> {
    let v = match args {
        [] => Vec2::ZERO,
        [value] => Vec2::splat(value.scalar_or(invalid_params(node))?),
        [x, y] => Vec2::new(x.scalar_or(invalid_params(node))?,
                            y.scalar_or(invalid_params(node))?),
        _ => return Err(invalid_params(node)),
    };

    Ok(Value::Vec2(v))
}

/// Constructs a vec3: zero, a splat, `(vec2, z)`, or `(x, y, z)`.
pub fn vec3(args: &[Value], node: &Node, _user_data: Option<&mut dyn Any>) -> EvalResult<Value> {
    let v = match args {
        [] => Vec3::ZERO,
        [value] => Vec3::splat(value.scalar_or(invalid_params(node))?),
        [Value::Vec2(xy), z] => Vec3::new(xy.x, xy.y, z.scalar_or(invalid_params(node))?),
        [x, y, z] => Vec3::new(x.scalar_or(invalid_params(node))?,
                               y.scalar_or(invalid_params(node))?,
                               z.scalar_or(invalid_params(node))?),
        _ => return Err(invalid_params(node)),
    };

    Ok(Value::Vec3(v))
}

/// Constructs a vec4: zero, a splat, `(vec3, w)`, or all four components.
/// Three scalar arguments are rejected.
pub fn vec4(args: &[Value], node: &Node, _user_data: Option<&mut dyn Any>) -> EvalResult<Value> {
    let v = match args {
        [] => Vec4::ZERO,
        [value] => Vec4::splat(value.scalar_or(invalid_params(node))?),
        [Value::Vec3(xyz), w] => {
            Vec4::new(xyz.x, xyz.y, xyz.z, w.scalar_or(invalid_params(node))?)
        },
        [x, y, z, w] => Vec4::new(x.scalar_or(invalid_params(node))?,
                                  y.scalar_or(invalid_params(node))?,
                                  z.scalar_or(invalid_params(node))?,
                                  w.scalar_or(invalid_params(node))?),
        _ => return Err(invalid_params(node)),
    };

    Ok(Value::Vec4(v))
}

/// Constructs a quaternion: the identity, from Euler angles (a vec3 of
/// radians, applied X then Y then Z), or from an axis and an angle in
/// radians.
pub fn quaternion(args: &[Value],
                  node: &Node,
                  _user_data: Option<&mut dyn Any>)
                  -> EvalResult<Value> {
    let q = match args {
        [] => Quat::IDENTITY,
        [Value::Vec3(angles)] => {
            Quat::from_euler(EulerRot::XYZ, angles.x, angles.y, angles.z)
        },
        [Value::Vec3(axis), angle] => {
            Quat::from_axis_angle(*axis, angle.scalar_or(invalid_params(node))?)
        },
        _ => return Err(invalid_params(node)),
    };

    Ok(Value::Quaternion(q))
}
