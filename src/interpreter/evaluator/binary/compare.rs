use crate::{
    ast::OpKind,
    error::RuntimeError,
    interpreter::{
        evaluator::{binary::core::scalar, core::EvalResult},
        value::core::Value,
    },
};

/// Ordering comparisons: scalar-only, producing int 0/1.
pub(crate) fn comparison(op: OpKind,
                         left: &Value,
                         right: &Value,
                         line: u32)
                         -> EvalResult<Value> {
    let a = scalar(left, line)?;
    let b = scalar(right, line)?;

    let result = match op {
        OpKind::Less => a < b,
        OpKind::Greater => a > b,
        OpKind::LessEqual => a <= b,
        OpKind::GreaterEqual => a >= b,
        _ => return Err(RuntimeError::InvalidOp { line }),
    };

    Ok(Value::Int(i32::from(result)))
}

/// Equality: scalar pairs compare as floats, same-shape vectors compare
/// element-wise, and every other combination (quaternions included) is an
/// invalid operation.
#[allow(clippy::float_cmp)]
pub(crate) fn equality(left: &Value, right: &Value, line: u32) -> EvalResult<bool> {
    use Value::{Float, Int, Vec2, Vec3, Vec4};

    match (left, right) {
        (Int(_) | Float(_), Int(_) | Float(_)) => {
            Ok(scalar(left, line)? == scalar(right, line)?)
        },
        (Vec2(a), Vec2(b)) => Ok(a == b),
        (Vec3(a), Vec3(b)) => Ok(a == b),
        (Vec4(a), Vec4(b)) => Ok(a == b),
        _ => Err(RuntimeError::InvalidOp { line }),
    }
}
