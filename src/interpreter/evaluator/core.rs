use std::{any::Any, collections::HashMap};

use crate::{
    ast::{Ast, Node, NodeHandle, NodeKind, OpKind},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary,
            function::core::{DEFAULT_CONSTANTS, DEFAULT_FUNCTIONS, LibraryFn},
        },
        value::core::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// [`RuntimeError`] describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The outcome of executing one statement.
///
/// `Return`, `Break` and `Continue` signal non-local exit from the
/// enclosing blocks; `Value` is ordinary completion (statements that
/// produce nothing complete with [`Value::Void`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flow {
    /// Ordinary completion with the statement's value.
    Value(Value),
    /// A `ret` statement unwinding to the enclosing call.
    Return(Value),
    /// A `break` statement unwinding to the enclosing loop.
    Break,
    /// A `continue` statement skipping to the next iteration.
    Continue,
}

/// One frame of the scope stack: the variables it owns, plus the names of
/// functions declared in it, which are deregistered when the frame is
/// popped.
#[derive(Default)]
pub(crate) struct Scope {
    pub(crate) vars:  HashMap<String, Value>,
    pub(crate) funcs: Vec<String>,
}

impl Scope {
    pub(crate) fn with_vars(vars: HashMap<String, Value>) -> Self {
        Self { vars,
               funcs: Vec::new() }
    }
}

/// Stores the runtime execution context.
///
/// This struct holds all interpreter state: the scope stack, user-defined
/// functions, the native function library, constants, the host's user data,
/// and the loop nesting depth. A context is independent of any other, so
/// separate contexts may execute separate trees concurrently; a single
/// `execute` call owns its context until it returns.
///
/// ## Usage
///
/// Create a context, optionally register host functions, constants and user
/// data, then call [`execute`](Self::execute) with a parsed tree.
pub struct Context {
    pub(crate) scopes:        Vec<Scope>,
    /// User function declarations, `name → Func node handle`.
    pub(crate) functions:     HashMap<String, NodeHandle>,
    /// Native functions, `name → callable`. Seeded with the defaults on
    /// first execution when the host has not called `set_functions`.
    pub(crate) lib_functions: HashMap<String, LibraryFn>,
    /// Named constants. Constants win over variables on reads.
    pub(crate) constants:     HashMap<String, Value>,
    pub(crate) user_data:     Option<Box<dyn Any>>,
    pub(crate) loop_depth:    u32,
}

#[allow(clippy::new_without_default)]
impl Context {
    /// Creates a context with no registered functions or constants; the
    /// defaults are seeded when execution first needs them.
    #[must_use]
    pub fn new() -> Self {
        Self { scopes:        vec![Scope::default()],
               functions:     HashMap::new(),
               lib_functions: HashMap::new(),
               constants:     HashMap::new(),
               user_data:     None,
               loop_depth:    0, }
    }

    /// Replaces the native function registry with the defaults merged with
    /// the given entries. Later entries win, so a host can override a
    /// default such as `print`.
    pub fn set_functions(&mut self, functions: &[(&str, LibraryFn)]) {
        self.lib_functions.clear();
        for (name, func) in DEFAULT_FUNCTIONS.iter().chain(functions) {
            self.lib_functions.insert((*name).to_string(), *func);
        }
    }

    /// Replaces the constant registry with the defaults merged with the
    /// given entries. Later entries win.
    pub fn set_constants(&mut self, constants: &[(&str, Value)]) {
        self.constants.clear();
        for (name, value) in DEFAULT_CONSTANTS.iter().chain(constants) {
            self.constants.insert((*name).to_string(), *value);
        }
    }

    /// Stores an opaque host value that is handed to every native function
    /// call.
    pub fn set_user_data(&mut self, user_data: Box<dyn Any>) {
        self.user_data = Some(user_data);
    }

    /// Returns the host's user data, if any was set.
    pub fn user_data_mut(&mut self) -> Option<&mut dyn Any> {
        self.user_data.as_deref_mut()
    }

    /// Executes a parsed program.
    ///
    /// The native and constant registries are seeded with their defaults if
    /// the host has not populated them. The top-level statements run as one
    /// block, so every variable and function the program declares is
    /// removed again before this returns; on error the remaining state is
    /// cleared wholesale.
    ///
    /// # Errors
    /// Returns the first [`RuntimeError`] raised by the program.
    ///
    /// # Example
    /// ```
    /// use propscript::{compile_source, interpreter::evaluator::core::Context};
    ///
    /// let ast = compile_source("x = 2\nx = x * 3").unwrap();
    ///
    /// let mut context = Context::new();
    /// assert!(context.execute(&ast).is_ok());
    ///
    /// // 'y' is never defined, so execution fails.
    /// let bad = compile_source("x = y + 1").unwrap();
    /// assert!(context.execute(&bad).is_err());
    /// ```
    pub fn execute(&mut self, ast: &Ast) -> Result<(), RuntimeError> {
        if self.lib_functions.is_empty() {
            self.set_functions(&[]);
        }
        if self.constants.is_empty() {
            self.set_constants(&[]);
        }

        match self.run_block(ast, &ast.parents) {
            Ok(_) => Ok(()),
            Err(error) => {
                // Blocks unwind their own names, but an error may leave
                // deeper frames behind.
                self.scopes.clear();
                self.scopes.push(Scope::default());
                self.functions.clear();
                self.loop_depth = 0;
                Err(error)
            },
        }
    }

    /// Runs statements inside a fresh scope frame. The frame is popped on
    /// every exit path, removing the names the block introduced.
    pub(crate) fn run_block(&mut self, ast: &Ast, code: &[NodeHandle]) -> EvalResult<Flow> {
        self.push_scope();
        let result = self.run_statements(ast, code);
        self.pop_scope();
        result
    }

    fn run_statements(&mut self, ast: &Ast, code: &[NodeHandle]) -> EvalResult<Flow> {
        for &statement in code {
            match self.exec(ast, statement)? {
                Flow::Value(_) => {},
                flow => return Ok(flow),
            }
        }
        Ok(Flow::Value(Value::Void))
    }

    /// Executes a single node and reports how control continues.
    fn exec(&mut self, ast: &Ast, handle: NodeHandle) -> EvalResult<Flow> {
        let node = ast.node(handle);
        match &node.kind {
            NodeKind::Op { op, left, right, .. } => self.exec_op(ast, node, *op, *left, *right),
            NodeKind::Int(value) => Ok(Flow::Value(Value::Int(*value))),
            NodeKind::Float(value) => Ok(Flow::Value(Value::Float(*value))),
            NodeKind::Var { name, index } => {
                Ok(Flow::Value(self.eval_var(ast, node, name, *index)?))
            },
            NodeKind::Call { name, args } => {
                Ok(Flow::Value(self.eval_call(ast, node, name, args)?))
            },
            NodeKind::If { condition,
                           code,
                           else_code, } => {
                self.exec_if(ast, node, *condition, code, else_code.as_deref())
            },
            NodeKind::For { condition, code } => self.exec_for(ast, node, *condition, code),
            NodeKind::Func { name, .. } => {
                self.register_function(name, handle, node.line)?;
                Ok(Flow::Value(Value::Void))
            },
            NodeKind::Return { value } => {
                let value = match value {
                    Some(handle) => self.eval(ast, *handle)?,
                    None => Value::Void,
                };
                Ok(Flow::Return(value))
            },
            NodeKind::Break => {
                if self.loop_depth == 0 {
                    return Err(RuntimeError::InvalidBreakContinue { line: node.line });
                }
                Ok(Flow::Break)
            },
            NodeKind::Continue => {
                if self.loop_depth == 0 {
                    return Err(RuntimeError::InvalidBreakContinue { line: node.line });
                }
                Ok(Flow::Continue)
            },
        }
    }

    /// Evaluates a node that must produce a value. A control-flow signal in
    /// a value position is an unsupported node.
    pub(crate) fn eval(&mut self, ast: &Ast, handle: NodeHandle) -> EvalResult<Value> {
        match self.exec(ast, handle)? {
            Flow::Value(value) => Ok(value),
            _ => Err(RuntimeError::UnsupportedNodeType { line: ast.node(handle).line }),
        }
    }

    /// Executes an operator node: assignments route through the assignment
    /// rules, everything else evaluates both operands and dispatches on the
    /// operator.
    fn exec_op(&mut self,
               ast: &Ast,
               node: &Node,
               op: OpKind,
               left: NodeHandle,
               right: NodeHandle)
               -> EvalResult<Flow> {
        match op {
            OpKind::Assign => {
                let value = self.eval(ast, right)?;
                let stored = self.assign(ast, left, value)?;
                Ok(Flow::Value(stored))
            },
            OpKind::MulAssign => self.compound_assign(ast, node, OpKind::Mul, left, right),
            OpKind::DivAssign => self.compound_assign(ast, node, OpKind::Div, left, right),
            OpKind::ModAssign => self.compound_assign(ast, node, OpKind::Mod, left, right),
            OpKind::AddAssign => self.compound_assign(ast, node, OpKind::Add, left, right),
            OpKind::SubAssign => self.compound_assign(ast, node, OpKind::Sub, left, right),
            OpKind::In => Err(RuntimeError::UnsupportedNodeType { line: node.line }),
            _ => {
                let lhs = self.eval(ast, left)?;
                let rhs = self.eval(ast, right)?;
                Ok(Flow::Value(binary::core::eval_binary(op, &lhs, &rhs, node.line)?))
            },
        }
    }

    /// Evaluates `lhs op rhs` and assigns the result back to the left-hand
    /// node.
    fn compound_assign(&mut self,
                       ast: &Ast,
                       node: &Node,
                       base: OpKind,
                       left: NodeHandle,
                       right: NodeHandle)
                       -> EvalResult<Flow> {
        let lhs = self.eval(ast, left)?;
        let rhs = self.eval(ast, right)?;
        let combined = binary::core::eval_binary(base, &lhs, &rhs, node.line)?;
        let stored = self.assign(ast, left, combined)?;
        Ok(Flow::Value(stored))
    }

    /// Reads an identifier: constant first, then variable, with an optional
    /// component index. Constants ignore an index.
    fn eval_var(&mut self,
                ast: &Ast,
                node: &Node,
                name: &str,
                index: Option<NodeHandle>)
                -> EvalResult<Value> {
        let line = node.line;

        if let Some(constant) = self.constants.get(name) {
            return Ok(*constant);
        }

        let Some(value) = self.get_var(name) else {
            return Err(RuntimeError::UndefinedVariable { name: name.to_string(),
                                                         line });
        };
        let value = *value;

        let Some(index_handle) = index else {
            return Ok(value);
        };

        if value.is_scalar() {
            return Err(RuntimeError::InvalidIndex { line });
        }
        let Value::Int(component) = self.eval(ast, index_handle)? else {
            return Err(RuntimeError::InvalidIndex { line });
        };

        Ok(Value::Float(value.component(component, line)?))
    }

    fn exec_if(&mut self,
               ast: &Ast,
               node: &Node,
               condition: NodeHandle,
               code: &[NodeHandle],
               else_code: Option<&[NodeHandle]>)
               -> EvalResult<Flow> {
        let condition = self.eval(ast, condition)?;
        let truth = condition.scalar_or(RuntimeError::InvalidCondition { line: node.line })?;

        if truth != 0.0 {
            self.run_block(ast, code)
        } else if let Some(else_code) = else_code {
            self.run_block(ast, else_code)
        } else {
            Ok(Flow::Value(Value::Void))
        }
    }

    /// Executes a `for` loop.
    ///
    /// The condition must be `var in bounds` where `var` is not yet bound
    /// and `bounds` evaluates to a vec2. The loop variable is an int,
    /// scoped to the loop, running from `ceil(x)` to `floor(y)` inclusive.
    fn exec_for(&mut self,
                ast: &Ast,
                node: &Node,
                condition: NodeHandle,
                code: &[NodeHandle])
                -> EvalResult<Flow> {
        let line = node.line;

        let NodeKind::Op { op: OpKind::In,
                           left,
                           right,
                           .. } = &ast.node(condition).kind
        else {
            return Err(RuntimeError::InvalidCondition { line });
        };
        let NodeKind::Var { name, .. } = &ast.node(*left).kind else {
            return Err(RuntimeError::InvalidCondition { line });
        };
        if self.find_var_scope(name).is_some() {
            return Err(RuntimeError::InvalidCondition { line });
        }

        self.push_scope();
        self.loop_depth += 1;
        let result = self.run_iterations(ast, name, *right, code, line);
        self.loop_depth -= 1;
        self.pop_scope();
        result
    }

    #[allow(clippy::cast_possible_truncation)]
    fn run_iterations(&mut self,
                      ast: &Ast,
                      name: &str,
                      bounds: NodeHandle,
                      code: &[NodeHandle],
                      line: u32)
                      -> EvalResult<Flow> {
        let Value::Vec2(bounds) = self.eval(ast, bounds)? else {
            return Err(RuntimeError::InvalidCondition { line });
        };

        let min = bounds.x.ceil() as i32;
        let max = bounds.y.floor() as i32;

        for i in min..=max {
            self.define_local(name, Value::Int(i));

            match self.run_block(ast, code)? {
                Flow::Break => break,
                Flow::Continue | Flow::Value(_) => {},
                flow @ Flow::Return(_) => return Ok(flow),
            }
        }

        Ok(Flow::Value(Value::Void))
    }

    /// Registers a user function declaration, rejecting duplicates. The
    /// name is recorded in the current frame so it is deregistered when the
    /// declaring block exits.
    fn register_function(&mut self, name: &str, handle: NodeHandle, line: u32) -> EvalResult<()> {
        if self.functions.contains_key(name) {
            return Err(RuntimeError::FunctionRedefinition { name: name.to_string(),
                                                            line });
        }

        self.functions.insert(name.to_string(), handle);
        if let Some(scope) = self.scopes.last_mut() {
            scope.funcs.push(name.to_string());
        }
        Ok(())
    }

    fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    fn pop_scope(&mut self) {
        if let Some(scope) = self.scopes.pop() {
            for name in scope.funcs {
                self.functions.remove(&name);
            }
        }
    }

    /// Looks a variable up from the innermost scope outward.
    pub(crate) fn get_var(&self, name: &str) -> Option<&Value> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.vars.get(name))
    }

    /// Returns the index of the innermost scope holding `name`.
    pub(crate) fn find_var_scope(&self, name: &str) -> Option<usize> {
        self.scopes
            .iter()
            .rposition(|scope| scope.vars.contains_key(name))
    }

    /// Defines a variable in the innermost scope.
    ///
    /// # Panics
    /// Panics if no scope exists, which indicates an internal error.
    pub(crate) fn define_local(&mut self, name: &str, value: Value) {
        self.scopes
            .last_mut()
            .expect("at least one scope")
            .vars
            .insert(name.to_string(), value);
    }
}
