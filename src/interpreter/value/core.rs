use glam::{Quat, Vec2, Vec3, Vec4};

use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Represents a runtime value in the interpreter.
///
/// Every value the language can compute fits in this enum, and all variants
/// are plain `Copy` data: there is no heap ownership behind a value.
/// Vectors and quaternions use the host algebra types from [`glam`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// The absence of a value, produced by statements and void returns.
    /// Void cannot be stored in a variable.
    Void,
    /// A 32-bit signed integer.
    Int(i32),
    /// A 32-bit float.
    Float(f32),
    /// A two-component float vector.
    Vec2(Vec2),
    /// A three-component float vector.
    Vec3(Vec3),
    /// A four-component float vector.
    Vec4(Vec4),
    /// An orientation with the host quaternion algebra.
    Quaternion(Quat),
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<Vec2> for Value {
    fn from(v: Vec2) -> Self {
        Self::Vec2(v)
    }
}

impl From<Vec3> for Value {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v)
    }
}

impl From<Vec4> for Value {
    fn from(v: Vec4) -> Self {
        Self::Vec4(v)
    }
}

impl From<Quat> for Value {
    fn from(v: Quat) -> Self {
        Self::Quaternion(v)
    }
}

impl Value {
    /// Converts the value to `f32` if it is a scalar, or raises the given
    /// error.
    ///
    /// Only ints and floats are scalars; the caller picks which error a
    /// non-scalar operand should raise, since that depends on the position
    /// the value appeared in.
    ///
    /// # Parameters
    /// - `error`: The error to return if the value is not a scalar.
    ///
    /// # Example
    /// ```
    /// use propscript::{error::RuntimeError, interpreter::value::core::Value};
    ///
    /// let x = Value::Int(10);
    /// let scalar = x.scalar_or(RuntimeError::InvalidOp { line: 1 }).unwrap();
    ///
    /// assert_eq!(scalar, 10.0);
    /// ```
    #[allow(clippy::cast_precision_loss)]
    pub fn scalar_or(&self, error: RuntimeError) -> EvalResult<f32> {
        match self {
            Self::Int(n) => Ok(*n as f32),
            Self::Float(x) => Ok(*x),
            _ => Err(error),
        }
    }

    /// Returns `true` if the value is a scalar (int or float).
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Int(..) | Self::Float(..))
    }

    /// Returns `true` if the value is [`Void`](Self::Void).
    #[must_use]
    pub const fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    /// Returns `true` when both values carry the same variant.
    #[must_use]
    pub fn same_type(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Reads one vector component.
    ///
    /// Defined only for vec2/vec3/vec4 with `0 <= index <= dim - 1`;
    /// everything else is an invalid index.
    ///
    /// # Parameters
    /// - `index`: Component index.
    /// - `line`: Source line for error reporting.
    pub fn component(&self, index: i32, line: u32) -> EvalResult<f32> {
        let Ok(i) = usize::try_from(index) else {
            return Err(RuntimeError::InvalidIndex { line });
        };

        match self {
            Self::Vec2(v) if i < 2 => Ok(v[i]),
            Self::Vec3(v) if i < 3 => Ok(v[i]),
            Self::Vec4(v) if i < 4 => Ok(v[i]),
            _ => Err(RuntimeError::InvalidIndex { line }),
        }
    }

    /// Overwrites one vector component, with the same domain as
    /// [`component`](Self::component).
    pub fn set_component(&mut self, index: i32, value: f32, line: u32) -> EvalResult<()> {
        let Ok(i) = usize::try_from(index) else {
            return Err(RuntimeError::InvalidIndex { line });
        };

        match self {
            Self::Vec2(v) if i < 2 => v[i] = value,
            Self::Vec3(v) if i < 3 => v[i] = value,
            Self::Vec4(v) if i < 4 => v[i] = value,
            _ => return Err(RuntimeError::InvalidIndex { line }),
        }
        Ok(())
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Void => write!(f, "void"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Vec2(v) => write!(f, "({}, {})", v.x, v.y),
            Self::Vec3(v) => write!(f, "({}, {}, {})", v.x, v.y, v.z),
            Self::Vec4(v) => write!(f, "({}, {}, {}, {})", v.x, v.y, v.z, v.w),
            Self::Quaternion(q) => write!(f, "({}, {}, {}, {})", q.x, q.y, q.z, q.w),
        }
    }
}
