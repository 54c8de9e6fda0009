use crate::{
    ast::{Ast, NodeHandle, NodeKind},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Assigns a value to the variable named by `target`.
    ///
    /// The rules apply in order:
    /// 1. `target` must be a variable node.
    /// 2. A void value cannot be stored.
    /// 3. An existing float variable taking an int stores the int widened
    ///    to float, the only implicit type change.
    /// 4. An indexed target writes a single vector component, coerced to
    ///    float, and yields the written float.
    /// 5. An existing variable of a different type rejects the value; the
    ///    same type overwrites.
    /// 6. An unbound name creates the variable in the innermost scope
    ///    (indexing an unbound name is an error).
    ///
    /// # Returns
    /// The stored value, which is also the value of the assignment
    /// expression.
    pub(crate) fn assign(&mut self,
                         ast: &Ast,
                         target: NodeHandle,
                         value: Value)
                         -> EvalResult<Value> {
        let node = ast.node(target);
        let line = node.line;

        let NodeKind::Var { name, index } = &node.kind else {
            return Err(RuntimeError::InvalidAssignment { line });
        };
        if value.is_void() {
            return Err(RuntimeError::InvalidAssignment { line });
        }

        let Some(scope) = self.find_var_scope(name) else {
            if index.is_some() {
                return Err(RuntimeError::InvalidIndex { line });
            }
            self.define_local(name, value);
            return Ok(value);
        };

        let existing = self.scopes[scope].vars[name.as_str()];

        if let (Value::Float(_), Value::Int(n)) = (&existing, &value) {
            #[allow(clippy::cast_precision_loss)]
            let widened = Value::Float(*n as f32);
            self.scopes[scope].vars.insert(name.clone(), widened);
            return Ok(widened);
        }

        if let Some(index_handle) = index {
            let Value::Int(component) = self.eval(ast, *index_handle)? else {
                return Err(RuntimeError::InvalidIndex { line });
            };
            let scalar = value.scalar_or(RuntimeError::InvalidAssignment { line })?;

            let Some(variable) = self.scopes[scope].vars.get_mut(name.as_str()) else {
                return Err(RuntimeError::UndefinedVariable { name: name.clone(),
                                                             line });
            };
            variable.set_component(component, scalar, line)?;
            return Ok(Value::Float(scalar));
        }

        if !existing.same_type(&value) {
            return Err(RuntimeError::InvalidAssignment { line });
        }
        self.scopes[scope].vars.insert(name.clone(), value);
        Ok(value)
    }
}
