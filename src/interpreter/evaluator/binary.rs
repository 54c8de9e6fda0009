/// Element-wise arithmetic over scalars, vectors and quaternions.
pub mod arith;
/// Ordering comparisons and equality.
pub mod compare;
/// The operator dispatcher.
pub mod core;
/// Logical `and`/`or`.
pub mod logic;
