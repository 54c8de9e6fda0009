/// The parser driver and its shared state.
///
/// Declares the cursor type that walks the token stream, tracks open
/// parentheses, and owns the tree being built.
pub mod core;
/// Expression parsing.
///
/// Builds operator trees with the numeric-tag precedence scheme and handles
/// every non-operator form: parenthesized statements, calls, indexed and
/// plain variables, and literals.
pub mod expr;
/// Statement parsing.
///
/// Dispatches on the leading token to control flow, function declarations,
/// `ret`, `break`/`continue`, or a plain expression statement.
pub mod statement;

pub use self::core::parse;
