/// Assignment evaluation.
///
/// Implements the ordered assignment rules: void rejection, the float←int
/// widening case, indexed component writes, type-stable overwrites, and
/// creation of new variables in the innermost scope.
pub mod assign;
/// Binary operator evaluation.
///
/// Dispatches arithmetic, comparison, equality, and logic over every
/// supported operand shape: scalars, mixed scalars, vectors, and
/// quaternions.
pub mod binary;
/// The execution context and statement evaluation.
///
/// Owns all interpreter state (scopes, user functions, the native library,
/// constants, user data, loop depth) and walks the tree, threading
/// control-flow outcomes out of blocks.
pub mod core;
/// Function calls and the builtin library.
///
/// Resolves call names against the native registry and user declarations,
/// runs user functions in a swapped-in environment, and provides the
/// default builtins.
pub mod function;
