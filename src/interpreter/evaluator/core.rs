use std::{
    collections::HashMap,
    io::{self, Write},
    rc::Rc,
};

use crate::{
    ast::{AssignOperator, ElseBranch, Node},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            function::core::BuiltinFn,
            scope::{ScopeStack, VariableScope},
        },
        value::core::{Value, truthy},
    },
    util::{num::is_numeric, stack::ensure_sufficient_stack},
};

/// A non-local exit in flight.
///
/// Signals travel up the evaluation as the `Err` side of [`EvalResult`] until
/// a construct that understands them consumes them: loops take `Break` and
/// `Continue`, function calls take `Return`, and only the top level takes
/// `Export`.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// `return` with its result, if any.
    Return {
        /// The returned value.
        value: Option<Value>,
        /// The source line of the `return`.
        line:  usize,
    },
    /// `break;`
    Break {
        /// The source line of the `break`.
        line: usize,
    },
    /// `continue;`
    Continue {
        /// The source line of the `continue`.
        line: usize,
    },
    /// `export(...)`, which ends the whole program.
    Export {
        /// The exported value.
        value: Option<Value>,
    },
}

/// Why evaluation stopped early: a control signal or a runtime error.
#[derive(Debug, Clone, PartialEq)]
pub enum Unwind {
    /// A control signal looking for its handler.
    Flow(Flow),
    /// A fatal error.
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Self::Error(error)
    }
}

impl From<Flow> for Unwind {
    fn from(flow: Flow) -> Self {
        Self::Flow(flow)
    }
}

/// Result type used by the evaluator.
///
/// Evaluating a node yields `Some(value)`, or `None` for nodes without a
/// result; the error side carries control signals as well as runtime errors.
pub type EvalResult<T> = Result<T, Unwind>;

/// Maximum number of nested user function calls.
pub const MAX_CALL_DEPTH: usize = 128;

/// Stores the runtime evaluation context.
///
/// Holds the scope chain, the builtins registered by the embedder, the sink
/// `print` writes to and the current user call depth.
///
/// ## Usage
///
/// A `Context` runs one or more programs with [`Context::run`]. Variables and
/// functions persist between runs; [`Context::into_scope`] hands the global
/// scope back to the embedder.
///
/// ```
/// use ember::{interpreter::{evaluator::core::Context, value::core::Value}, parse};
///
/// let mut context = Context::new();
/// context.run(&parse("x = 2;").unwrap()).unwrap();
/// let result = context.run(&parse("x * 21").unwrap()).unwrap();
///
/// assert_eq!(result, Some(Value::Number(42.0)));
/// ```
pub struct Context {
    /// The scope chain.
    pub scopes:          ScopeStack,
    pub(crate) builtins: HashMap<String, BuiltinFn>,
    pub(crate) out:      Box<dyn Write>,
    pub(crate) depth:    usize,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a context with an empty global scope that prints to standard
    /// output.
    #[must_use]
    pub fn new() -> Self {
        Self::with_scope(VariableScope::default())
    }

    /// Creates a context whose global scope is `scope`.
    #[must_use]
    pub fn with_scope(scope: VariableScope) -> Self {
        Self { scopes:   ScopeStack::new(scope),
               builtins: HashMap::new(),
               out:      Box::new(io::stdout()),
               depth:    0, }
    }

    /// Redirects the output of `print` to `out`.
    #[must_use]
    pub fn with_output(mut self, out: impl Write + 'static) -> Self {
        self.out = Box::new(out);
        self
    }

    /// Consumes the context and returns its global scope.
    #[must_use]
    pub fn into_scope(self) -> VariableScope {
        self.scopes.into_global()
    }

    /// Runs a program in the global scope.
    ///
    /// # Returns
    /// The value passed to `export`, or else the value of the last
    /// statement.
    ///
    /// # Errors
    /// The first runtime error, or a `return`, `break` or `continue` that
    /// escaped every handler.
    pub fn run(&mut self, program: &[Node]) -> Result<Option<Value>, RuntimeError> {
        match self.eval_statements(program) {
            Ok(value) | Err(Unwind::Flow(Flow::Export { value })) => Ok(value),
            Err(Unwind::Flow(Flow::Return { line, .. })) => {
                Err(RuntimeError::ReturnOutsideFunction { line })
            },
            Err(Unwind::Flow(Flow::Break { line })) => Err(RuntimeError::BreakOutsideLoop { line }),
            Err(Unwind::Flow(Flow::Continue { line })) => {
                Err(RuntimeError::ContinueOutsideLoop { line })
            },
            Err(Unwind::Error(error)) => Err(error),
        }
    }

    /// Evaluates statements in order in the current scope.
    ///
    /// # Returns
    /// The value of the last statement, `None` for an empty sequence.
    pub fn eval_statements(&mut self, statements: &[Node]) -> EvalResult<Option<Value>> {
        let mut last = None;
        for statement in statements {
            last = self.eval(statement)?;
        }
        Ok(last)
    }

    /// Evaluates a node and returns the resulting value.
    ///
    /// This is the main entry point for evaluation. The evaluator dispatches
    /// on the node variant: literals, variables, collections, operators,
    /// assignments, calls, subscripts, control flow and function
    /// declarations.
    ///
    /// # Parameters
    /// - `node`: Node to evaluate.
    ///
    /// # Returns
    /// `Some(Value)` for nodes that produce a value, or `None` for constructs
    /// that do not yield one, such as an unbound variable or a loop.
    pub fn eval(&mut self, node: &Node) -> EvalResult<Option<Value>> {
        ensure_sufficient_stack(|| self.eval_node(node))
    }

    fn eval_node(&mut self, node: &Node) -> EvalResult<Option<Value>> {
        match node {
            Node::Literal { value, .. } => Ok(Some(Value::from(value))),
            Node::Variable { name, .. } => Ok(self.scopes.lookup(name).cloned()),
            Node::List { elements, line } => self.eval_list(elements, *line),
            Node::Map { entries, line } => self.eval_map(entries, *line),
            Node::BinaryOp { left,
                             op,
                             right,
                             line, } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Ok(Some(Self::eval_binary(*op, left.as_ref(), right.as_ref(), *line)?))
            },
            Node::UnaryOp { op, expr, .. } => self.eval_unary_op(*op, expr),
            Node::Assign { name,
                           op,
                           value,
                           line, } => self.eval_assign(name, *op, value, *line),
            Node::FunctionCall { name,
                                 arguments,
                                 line, } => self.eval_function_call(name, arguments, *line),
            Node::Index { base, index, line } => self.eval_index(base, index, *line),
            Node::If { condition,
                       body,
                       else_branch,
                       .. } => self.eval_if(condition, body, else_branch.as_ref()),
            Node::While { condition, body, .. } => self.eval_while(condition, body),
            Node::Break { line } => Err(Flow::Break { line: *line }.into()),
            Node::Continue { line } => Err(Flow::Continue { line: *line }.into()),
            Node::Return { values, line } => self.eval_return(values, *line),
            Node::Function(def) => {
                self.scopes.register_function(Rc::new(def.clone()));
                Ok(None)
            },
        }
    }

    /// Evaluates `node` and requires it to produce a value.
    ///
    /// # Errors
    /// `MissingValue` on `line` when the node yields nothing.
    pub fn eval_value(&mut self, node: &Node, line: usize) -> EvalResult<Value> {
        self.eval(node)?
            .ok_or_else(|| RuntimeError::MissingValue { line }.into())
    }

    fn eval_list(&mut self, elements: &[Node], line: usize) -> EvalResult<Option<Value>> {
        let items = elements.iter()
                            .map(|element| self.eval_value(element, line))
                            .collect::<EvalResult<Vec<_>>>()?;
        Ok(Some(Value::List(items)))
    }

    /// Evaluates a map literal. Keys are stored by their string form, so
    /// `[1: "a"]` and `["1": "a"]` are the same map.
    fn eval_map(&mut self, entries: &[(Node, Node)], line: usize) -> EvalResult<Option<Value>> {
        let mut map = HashMap::with_capacity(entries.len());
        for (key, value) in entries {
            let key = self.eval(key)?.map(|key| key.to_text()).unwrap_or_default();
            let value = self.eval_value(value, line)?;
            map.insert(key, value);
        }
        Ok(Some(Value::Map(map)))
    }

    /// Evaluates plain and compound assignment.
    ///
    /// A compound assignment to an unbound name starts from `0`, or from the
    /// empty string for `+=` with a non-numeric right side, so `s += "a"`
    /// builds a string and `n += 1` counts.
    fn eval_assign(&mut self,
                   name: &str,
                   op: AssignOperator,
                   value: &Node,
                   line: usize)
                   -> EvalResult<Option<Value>> {
        let value = self.eval_value(value, line)?;

        let result = match op.binary() {
            None => value,
            Some(binary) => {
                let current = match self.scopes.lookup(name) {
                    Some(current) => current.clone(),
                    None if op == AssignOperator::Add && !is_numeric(&value.to_text()) => {
                        Value::String(String::new())
                    },
                    None => Value::Number(0.0),
                };
                Self::eval_binary(binary, Some(&current), Some(&value), line)?
            },
        };

        self.scopes.assign(name, result.clone());
        Ok(Some(result))
    }

    /// Evaluates `base[index]`.
    ///
    /// Indexing nothing, or a boolean, yields nothing. Indexing past the end
    /// of a string or list, or with a key a map lacks, is an error.
    fn eval_index(&mut self, base: &Node, index: &Node, line: usize) -> EvalResult<Option<Value>> {
        let Some(base) = self.eval(base)? else {
            return Ok(None);
        };
        let index = self.eval_value(index, line)?;

        if matches!(base, Value::Bool(_)) {
            return Ok(None);
        }

        match base.element(&index) {
            Some(element) => Ok(Some(element)),
            None => Err(RuntimeError::UndefinedOffset { offset: index.to_text(),
                                                        line }.into()),
        }
    }

    fn eval_if(&mut self,
               condition: &Node,
               body: &[Node],
               else_branch: Option<&ElseBranch>)
               -> EvalResult<Option<Value>> {
        if truthy(self.eval(condition)?.as_ref()) {
            return self.eval_statements(body);
        }

        match else_branch {
            Some(ElseBranch::If(node)) => self.eval(node),
            Some(ElseBranch::Block(statements)) => self.eval_statements(statements),
            None => Ok(None),
        }
    }

    /// Runs a `while` loop, consuming the `break` and `continue` signals of
    /// its own body. A loop yields no value.
    fn eval_while(&mut self, condition: &Node, body: &[Node]) -> EvalResult<Option<Value>> {
        while truthy(self.eval(condition)?.as_ref()) {
            match self.eval_statements(body) {
                Ok(_) | Err(Unwind::Flow(Flow::Continue { .. })) => {},
                Err(Unwind::Flow(Flow::Break { .. })) => break,
                Err(other) => return Err(other),
            }
        }
        Ok(None)
    }

    /// Raises the `return` signal. Two or more values are returned as a
    /// list.
    fn eval_return(&mut self, values: &[Node], line: usize) -> EvalResult<Option<Value>> {
        let value = match values {
            [] => None,
            [single] => self.eval(single)?,
            several => {
                let items = several.iter()
                                   .map(|value| self.eval_value(value, line))
                                   .collect::<EvalResult<Vec<_>>>()?;
                Some(Value::List(items))
            },
        };

        Err(Flow::Return { value, line }.into())
    }
}
