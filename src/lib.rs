//! # propscript
//!
//! PropScript is a small embeddable scripting language for procedural and
//! numerical content generation. Programs operate on scalars, fixed-width
//! vectors and quaternions, with ranged loops, conditionals, user-defined
//! functions, and a host-extensible library of native functions and
//! constants. Parsed scripts can be saved to and loaded from a compact
//! binary form.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Ast,
    error::ParseError,
    interpreter::{evaluator::core::Context, lexer::lex, parser::parse},
};

/// Defines the structure of parsed code.
///
/// This module declares the node pool, the handle type that addresses it,
/// and the tagged node variants the parser produces and the evaluator
/// walks. Operator tags carry their precedence in their numeric value.
///
/// # Responsibilities
/// - Defines node and operator types for all language constructs.
/// - Attaches source lines to nodes for error reporting.
/// - Keeps handles stable by only ever appending to the pool.
pub mod ast;
/// Provides unified error types for parsing and execution.
///
/// This module defines all errors that can be raised while lexing, parsing,
/// or executing code. Every error carries the 1-based line it was detected
/// on and renders as a single human-readable message.
///
/// # Responsibilities
/// - Defines error enums for all failure modes.
/// - Attaches line numbers and offending tokens or names.
/// - Integrates with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, and error handling to provide a complete runtime for
/// script execution. It exposes the public API for interpreting programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, values.
/// - Provides entry points for parsing and executing user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// Binary serialization of syntax trees.
///
/// Saving a parsed tree lets hosts ship precompiled scripts and skip the
/// lexer and parser at load time. The format is little-endian with fixed
/// integer widths, so it is portable across platforms.
///
/// # Responsibilities
/// - Writes the node pool and parent list to any writer.
/// - Reads them back, validating tags and string data.
pub mod serialize;

/// Lexes and parses a source string into a syntax tree.
///
/// # Errors
/// Returns the first [`ParseError`] the lexer or parser encounters.
///
/// # Examples
/// ```
/// use propscript::compile_source;
///
/// let ast = compile_source("x = 1\ny = x * 2").unwrap();
/// assert_eq!(ast.parents.len(), 2);
///
/// // '@' is not part of the language.
/// assert!(compile_source("x = 1 @ 2").is_err());
/// ```
pub fn compile_source(source: &str) -> Result<Ast, ParseError> {
    let tokens = lex(source)?;
    parse(&tokens)
}

/// Compiles and executes a source string with a default context.
///
/// This is the one-call entry point for hosts that do not register their
/// own functions, constants, or user data.
///
/// # Errors
/// Returns an error if parsing or execution fails.
///
/// # Examples
/// ```
/// use propscript::run_source;
///
/// // Simple program: no error should occur.
/// assert!(run_source("x = 3 + 4 * 2").is_ok());
///
/// // 'y' is not defined, so execution fails.
/// assert!(run_source("x = y + 1").is_err());
/// ```
pub fn run_source(source: &str) -> Result<(), Box<dyn std::error::Error>> {
    let ast = compile_source(source)?;

    let mut context = Context::new();
    context.execute(&ast)?;

    Ok(())
}
