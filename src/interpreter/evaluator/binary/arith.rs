use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{binary::core::scalar, core::EvalResult},
        value::core::Value,
    },
};

/// Multiplication.
///
/// Same-shape values multiply element-wise (quaternions use the host
/// quaternion product); int/float mixes promote to float; vectors and
/// quaternions scale by a scalar on either side.
pub(crate) fn mul(left: &Value, right: &Value, line: u32) -> EvalResult<Value> {
    use Value::{Float, Int, Quaternion, Vec2, Vec3, Vec4};

    Ok(match (left, right) {
        (Int(a), Int(b)) => Int(a.wrapping_mul(*b)),
        (Float(a), Float(b)) => Float(a * b),
        (Int(_), Float(_)) | (Float(_), Int(_)) => {
            Float(scalar(left, line)? * scalar(right, line)?)
        },
        (Vec2(a), Vec2(b)) => Vec2(*a * *b),
        (Vec3(a), Vec3(b)) => Vec3(*a * *b),
        (Vec4(a), Vec4(b)) => Vec4(*a * *b),
        (Quaternion(a), Quaternion(b)) => Quaternion(*a * *b),
        (Vec2(v), s) | (s, Vec2(v)) if s.is_scalar() => Vec2(*v * scalar(s, line)?),
        (Vec3(v), s) | (s, Vec3(v)) if s.is_scalar() => Vec3(*v * scalar(s, line)?),
        (Vec4(v), s) | (s, Vec4(v)) if s.is_scalar() => Vec4(*v * scalar(s, line)?),
        (Quaternion(q), s) | (s, Quaternion(q)) if s.is_scalar() => {
            Quaternion(*q * scalar(s, line)?)
        },
        _ => return Err(RuntimeError::InvalidOp { line }),
    })
}

/// Division.
///
/// Same-shape vectors divide element-wise; quaternion÷quaternion is not
/// defined. `scalar / vector` divides the scalar by each component, while
/// either scalar/quaternion order scales the quaternion by the reciprocal.
/// Integer division by zero is an invalid operation.
pub(crate) fn div(left: &Value, right: &Value, line: u32) -> EvalResult<Value> {
    use Value::{Float, Int, Quaternion, Vec2, Vec3, Vec4};

    Ok(match (left, right) {
        (Int(a), Int(b)) => {
            if *b == 0 {
                return Err(RuntimeError::InvalidOp { line });
            }
            Int(a.wrapping_div(*b))
        },
        (Float(a), Float(b)) => Float(a / b),
        (Int(_), Float(_)) | (Float(_), Int(_)) => {
            Float(scalar(left, line)? / scalar(right, line)?)
        },
        (Vec2(a), Vec2(b)) => Vec2(*a / *b),
        (Vec3(a), Vec3(b)) => Vec3(*a / *b),
        (Vec4(a), Vec4(b)) => Vec4(*a / *b),
        (Vec2(v), s) if s.is_scalar() => Vec2(*v / scalar(s, line)?),
        (s, Vec2(v)) if s.is_scalar() => Vec2(scalar(s, line)? / *v),
        (Vec3(v), s) if s.is_scalar() => Vec3(*v / scalar(s, line)?),
        (s, Vec3(v)) if s.is_scalar() => Vec3(scalar(s, line)? / *v),
        (Vec4(v), s) if s.is_scalar() => Vec4(*v / scalar(s, line)?),
        (s, Vec4(v)) if s.is_scalar() => Vec4(scalar(s, line)? / *v),
        (Quaternion(q), s) | (s, Quaternion(q)) if s.is_scalar() => {
            Quaternion(*q / scalar(s, line)?)
        },
        _ => return Err(RuntimeError::InvalidOp { line }),
    })
}

/// Modulo, defined for int∘int only. Zero divisors are an invalid
/// operation.
pub(crate) fn modulo(left: &Value, right: &Value, line: u32) -> EvalResult<Value> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => {
            if *b == 0 {
                return Err(RuntimeError::InvalidOp { line });
            }
            Ok(Value::Int(a.wrapping_rem(*b)))
        },
        _ => Err(RuntimeError::InvalidOp { line }),
    }
}

/// Addition over same-shape values, with int/float promotion. There is no
/// vector + scalar form.
pub(crate) fn add(left: &Value, right: &Value, line: u32) -> EvalResult<Value> {
    use Value::{Float, Int, Quaternion, Vec2, Vec3, Vec4};

    Ok(match (left, right) {
        (Int(a), Int(b)) => Int(a.wrapping_add(*b)),
        (Float(a), Float(b)) => Float(a + b),
        (Int(_), Float(_)) | (Float(_), Int(_)) => {
            Float(scalar(left, line)? + scalar(right, line)?)
        },
        (Vec2(a), Vec2(b)) => Vec2(*a + *b),
        (Vec3(a), Vec3(b)) => Vec3(*a + *b),
        (Vec4(a), Vec4(b)) => Vec4(*a + *b),
        (Quaternion(a), Quaternion(b)) => Quaternion(*a + *b),
        _ => return Err(RuntimeError::InvalidOp { line }),
    })
}

/// Subtraction over same-shape values, with int/float promotion.
pub(crate) fn sub(left: &Value, right: &Value, line: u32) -> EvalResult<Value> {
    use Value::{Float, Int, Quaternion, Vec2, Vec3, Vec4};

    Ok(match (left, right) {
        (Int(a), Int(b)) => Int(a.wrapping_sub(*b)),
        (Float(a), Float(b)) => Float(a - b),
        (Int(_), Float(_)) | (Float(_), Int(_)) => {
            Float(scalar(left, line)? - scalar(right, line)?)
        },
        (Vec2(a), Vec2(b)) => Vec2(*a - *b),
        (Vec3(a), Vec3(b)) => Vec3(*a - *b),
        (Vec4(a), Vec4(b)) => Vec4(*a - *b),
        (Quaternion(a), Quaternion(b)) => Quaternion(*a - *b),
        _ => return Err(RuntimeError::InvalidOp { line }),
    })
}
