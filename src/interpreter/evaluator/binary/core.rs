use crate::{
    ast::OpKind,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::{arith, compare, logic},
            core::EvalResult,
        },
        value::core::Value,
    },
};

/// Evaluates a non-assigning binary operator over two values.
///
/// Arithmetic routes to the element-wise table, comparisons and equality to
/// their scalar/vector rules, and `and`/`or` to scalar logic. Assignment
/// operators and `in` never reach this function through normal execution
/// and report an invalid operation.
///
/// # Parameters
/// - `op`: The operator.
/// - `left`: Left operand.
/// - `right`: Right operand.
/// - `line`: Line number for error reporting.
pub(crate) fn eval_binary(op: OpKind,
                          left: &Value,
                          right: &Value,
                          line: u32)
                          -> EvalResult<Value> {
    match op {
        OpKind::Mul => arith::mul(left, right, line),
        OpKind::Div => arith::div(left, right, line),
        OpKind::Mod => arith::modulo(left, right, line),
        OpKind::Add => arith::add(left, right, line),
        OpKind::Sub => arith::sub(left, right, line),

        OpKind::Less | OpKind::Greater | OpKind::LessEqual | OpKind::GreaterEqual => {
            compare::comparison(op, left, right, line)
        },
        OpKind::Equal => Ok(Value::Int(i32::from(compare::equality(left, right, line)?))),
        OpKind::NotEqual => Ok(Value::Int(i32::from(!compare::equality(left, right, line)?))),

        OpKind::And | OpKind::Or => logic::logic(op, left, right, line),

        OpKind::In
        | OpKind::Assign
        | OpKind::MulAssign
        | OpKind::DivAssign
        | OpKind::ModAssign
        | OpKind::AddAssign
        | OpKind::SubAssign => Err(RuntimeError::InvalidOp { line }),
    }
}

/// Coerces an operand to a scalar, raising the invalid-operation error for
/// anything that is not an int or float.
pub(in crate::interpreter::evaluator::binary) fn scalar(value: &Value,
                                                        line: u32)
                                                        -> EvalResult<f32> {
    value.scalar_or(RuntimeError::InvalidOp { line })
}
