/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code. Parse errors include syntax mistakes, unexpected tokens, invalid
/// literals, and any other issues detected before execution.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during execution: invalid
/// operations or assignments, undefined names, bad indices, and misuse of
/// control flow. Every runtime error is fatal to the `execute` call that
/// raised it.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
