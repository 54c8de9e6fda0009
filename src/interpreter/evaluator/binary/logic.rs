use crate::{
    ast::OpKind,
    error::RuntimeError,
    interpreter::{
        evaluator::{binary::core::scalar, core::EvalResult},
        value::core::Value,
    },
};

/// Logical `and`/`or` over scalar truthiness (nonzero is true), producing
/// int 0/1.
///
/// Both operands were already evaluated by the caller, so there is no
/// short-circuiting: the right side's effects always happen.
pub(crate) fn logic(op: OpKind, left: &Value, right: &Value, line: u32) -> EvalResult<Value> {
    let a = scalar(left, line)? != 0.0;
    let b = scalar(right, line)? != 0.0;

    let result = match op {
        OpKind::And => a && b,
        OpKind::Or => a || b,
        _ => return Err(RuntimeError::InvalidOp { line }),
    };

    Ok(Value::Int(i32::from(result)))
}
