use std::{any::Any, collections::HashMap};

use crate::{
    ast::{Ast, Node, NodeHandle, NodeKind},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Flow, Scope},
            function::{constructors, math, print, random, range},
        },
        value::core::Value,
    },
};

/// Type alias for native (library) function handlers.
///
/// A native function receives the evaluated argument values, the call-site
/// node for error reporting, and the host's user data. It returns a value
/// or raises a runtime error.
pub type LibraryFn = fn(&[Value], &Node, Option<&mut dyn Any>) -> EvalResult<Value>;

/// Builds the invalid-parameters error for a call-site node.
///
/// Native functions call this when the argument list they received is not
/// acceptable.
///
/// # Example
/// ```
/// use propscript::{
///     ast::Node,
///     interpreter::{
///         evaluator::{core::EvalResult, function::core::invalid_params},
///         value::core::Value,
///     },
/// };
///
/// fn only_ints(args: &[Value], node: &Node) -> EvalResult<Value> {
///     match args {
///         [Value::Int(n)] => Ok(Value::Int(n * 2)),
///         _ => Err(invalid_params(node)),
///     }
/// }
/// ```
#[must_use]
pub fn invalid_params(node: &Node) -> RuntimeError {
    RuntimeError::InvalidParams { line: node.line }
}

/// The default native library. `set_functions` seeds these before merging
/// the host's own entries, so hosts can override any of them by name.
pub(crate) const DEFAULT_FUNCTIONS: &[(&str, LibraryFn)] = &[
    ("range", range::range),
    ("print", print::print),
    ("rand", random::rand),
    ("int", constructors::int),
    ("vec2", constructors::vec2),
    ("vec3", constructors::vec3),
    ("vec4", constructors::vec4),
    ("quaternion", constructors::quaternion),
    ("sqrt", math::sqrt),
    ("pow", math::pow),
    ("sin", math::sin),
    ("cos", math::cos),
    ("tan", math::tan),
    ("asin", math::asin),
    ("acos", math::acos),
    ("atan", math::atan),
];

/// The default constants.
pub(crate) const DEFAULT_CONSTANTS: &[(&str, Value)] = &[
    ("M_PI", Value::Float(std::f32::consts::PI)),
    ("M_TAU", Value::Float(std::f32::consts::TAU)),
    ("M_E", Value::Float(std::f32::consts::E)),
];

impl Context {
    /// Evaluates a function call.
    ///
    /// The name resolves against the native library first, then against
    /// user declarations. Arguments are evaluated once, in order, in the
    /// caller's scope.
    pub(crate) fn eval_call(&mut self,
                            ast: &Ast,
                            node: &Node,
                            name: &str,
                            args: &[NodeHandle])
                            -> EvalResult<Value> {
        if let Some(func) = self.lib_functions.get(name).copied() {
            let mut values = Vec::with_capacity(args.len());
            for &arg in args {
                values.push(self.eval(ast, arg)?);
            }
            return func(&values, node, self.user_data.as_deref_mut());
        }

        let Some(declaration) = self.functions.get(name).copied() else {
            return Err(RuntimeError::UndefinedFunction { name: name.to_string(),
                                                         line: node.line, });
        };

        self.call_user_function(ast, declaration, node, args)
    }

    /// Executes a user-defined function.
    ///
    /// The argument count must match the declaration. Arguments are bound
    /// to parameter names in a fresh environment that replaces the caller's
    /// scope stack for the duration of the body, so the body sees only its
    /// parameters and its own locals. The loop depth is parked as well:
    /// `break` cannot cross a call boundary.
    fn call_user_function(&mut self,
                          ast: &Ast,
                          declaration: NodeHandle,
                          call: &Node,
                          args: &[NodeHandle])
                          -> EvalResult<Value> {
        let decl_node = ast.node(declaration);
        let NodeKind::Func { params, code, .. } = &decl_node.kind else {
            return Err(RuntimeError::UnsupportedNodeType { line: call.line });
        };

        if params.len() != args.len() {
            return Err(RuntimeError::InvalidParams { line: call.line });
        }

        let mut locals = HashMap::new();
        for (param, &arg) in params.iter().zip(args) {
            if locals.contains_key(param) {
                return Err(RuntimeError::ArgumentNameRedefinition { name: param.clone(),
                                                                    line: decl_node.line, });
            }
            let value = self.eval(ast, arg)?;
            locals.insert(param.clone(), value);
        }

        let saved_scopes = std::mem::replace(&mut self.scopes, vec![Scope::with_vars(locals)]);
        let saved_depth = std::mem::take(&mut self.loop_depth);

        let result = self.run_block(ast, code);

        self.scopes = saved_scopes;
        self.loop_depth = saved_depth;

        match result? {
            Flow::Return(value) => Ok(value),
            Flow::Value(_) => Ok(Value::Void),
            Flow::Break | Flow::Continue => {
                Err(RuntimeError::InvalidBreakContinue { line: call.line })
            },
        }
    }
}
