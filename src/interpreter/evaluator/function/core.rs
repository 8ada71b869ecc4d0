use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::{FunctionDef, Node},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Flow, MAX_CALL_DEPTH, Unwind},
            function::{del, exist, export, len, print},
        },
        value::core::Value,
    },
};

/// Type alias for builtin function handlers, including those registered with
/// [`Context::register_builtin`].
///
/// A builtin receives the context, the unevaluated argument nodes and the line
/// number of the call. It decides itself when and whether to evaluate each
/// argument.
pub type BuiltinFn = fn(&mut Context, &[Node], usize) -> EvalResult<Option<Value>>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `AtLeast(n)` means the builtin needs `n` or more arguments.
/// - `Any` accepts every argument count, including none.
#[derive(Clone, Copy)]
enum Arity {
    Exact(usize),
    AtLeast(usize),
    Any,
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of all builtin functions.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "export" => { arity: Arity::Exact(1),   func: export::export },
    "len"    => { arity: Arity::Exact(1),   func: len::len },
    "exist"  => { arity: Arity::Exact(1),   func: exist::exist },
    "del"    => { arity: Arity::AtLeast(1), func: del::del },
    "print"  => { arity: Arity::Any,        func: print::print },
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    ///
    /// Returns `true` if the count is permitted, `false` otherwise.
    const fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::AtLeast(m) => n >= m,
            Self::Any => true,
        }
    }

    fn describe(self) -> String {
        match self {
            Self::Exact(m) => m.to_string(),
            Self::AtLeast(m) => format!("at least {m}"),
            Self::Any => "any number of".to_string(),
        }
    }
}

impl Context {
    /// Registers `func` as a builtin called `name`.
    ///
    /// Registered builtins are looked up after user functions and before the
    /// standard ones, so they can replace `print` or `len`. They receive the
    /// argument nodes unevaluated and check their own argument count.
    /// Registering a name again replaces the earlier handler.
    ///
    /// # Example
    /// ```
    /// use ember::{
    ///     ast::Node,
    ///     interpreter::{
    ///         evaluator::core::{Context, EvalResult},
    ///         value::core::Value,
    ///     },
    ///     parse,
    /// };
    ///
    /// fn twice(context: &mut Context, arguments: &[Node], line: usize)
    ///          -> EvalResult<Option<Value>> {
    ///     let value = context.eval_value(&arguments[0], line)?;
    ///     Ok(Some(Value::Number(value.to_number() * 2.0)))
    /// }
    ///
    /// let mut context = Context::new();
    /// context.register_builtin("twice", twice);
    ///
    /// let result = context.run(&parse("twice(21)").unwrap()).unwrap();
    /// assert_eq!(result, Some(Value::Number(42.0)));
    /// ```
    pub fn register_builtin(&mut self, name: impl Into<String>, func: BuiltinFn) {
        self.builtins.insert(name.into(), func);
    }

    /// Evaluates a function call.
    ///
    /// A user-defined function visible from the current scope takes
    /// precedence, then a registered builtin, then a standard one. Builtins
    /// receive the argument nodes unevaluated.
    ///
    /// # Parameters
    /// - `name`: Function name.
    /// - `arguments`: Argument expressions.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The function result or an error if lookup or arity fails.
    pub(crate) fn eval_function_call(&mut self,
                                     name: &str,
                                     arguments: &[Node],
                                     line: usize)
                                     -> EvalResult<Option<Value>> {
        if let Some((def, owner)) = self.scopes.find_function(name) {
            return self.call_user_defined_function(&def, owner, arguments, line);
        }
        if let Some(&func) = self.builtins.get(name) {
            return func(self, arguments, line);
        }

        let Some(builtin) = BUILTIN_TABLE.iter().find(|b| b.name == name) else {
            return Err(RuntimeError::UnknownFunction { name: name.to_string(),
                                                       line }.into());
        };
        if !builtin.arity.check(arguments.len()) {
            return Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                             expected: builtin.arity.describe(),
                                                             found: arguments.len(),
                                                             line }.into());
        }
        (builtin.func)(self, arguments, line)
    }

    /// Executes a user-defined function.
    ///
    /// Arguments are evaluated in the caller's scope. The body then runs in a
    /// fresh scope whose parent is the scope that declared the function, so
    /// the caller's locals are not visible. Omitted trailing arguments take
    /// their parameter's default, evaluated in the new scope; an argument
    /// that produces no value leaves its parameter unbound.
    ///
    /// # Errors
    /// - Too many arguments, or too few for the parameters without defaults.
    /// - Calls nested deeper than [`MAX_CALL_DEPTH`].
    /// - A `break` or `continue` that reaches the function boundary.
    ///
    /// # Returns
    /// The value of `return`, or else the value of the body's last
    /// statement.
    fn call_user_defined_function(&mut self,
                                  def: &Rc<FunctionDef>,
                                  owner: usize,
                                  arguments: &[Node],
                                  line: usize)
                                  -> EvalResult<Option<Value>> {
        let required = def.params
                          .iter()
                          .rposition(|param| param.default.is_none())
                          .map_or(0, |index| index + 1);

        if arguments.len() < required || arguments.len() > def.params.len() {
            let expected = if required == def.params.len() {
                required.to_string()
            } else {
                format!("{required} to {}", def.params.len())
            };
            return Err(RuntimeError::ArgumentCountMismatch { name: def.name.clone(),
                                                             expected,
                                                             found: arguments.len(),
                                                             line }.into());
        }

        if self.depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::RecursionLimit { name: def.name.clone(),
                                                      limit: MAX_CALL_DEPTH,
                                                      line }.into());
        }

        let values = arguments.iter()
                              .map(|argument| self.eval(argument))
                              .collect::<EvalResult<Vec<_>>>()?;

        debug!(function = %def.name, arguments = values.len(), depth = self.depth, "call");

        self.scopes.push(format!("func_{}", def.name), owner);
        self.depth += 1;
        let outcome = self.run_function_body(def, values);
        self.depth -= 1;
        self.scopes.pop();

        match outcome {
            Ok(value) | Err(Unwind::Flow(Flow::Return { value, .. })) => Ok(value),
            Err(Unwind::Flow(Flow::Break { line })) => {
                Err(RuntimeError::BreakOutsideLoop { line }.into())
            },
            Err(Unwind::Flow(Flow::Continue { line })) => {
                Err(RuntimeError::ContinueOutsideLoop { line }.into())
            },
            Err(other) => Err(other),
        }
    }

    /// Binds the parameters in the freshly pushed scope and runs the body.
    fn run_function_body(&mut self,
                         def: &FunctionDef,
                         values: Vec<Option<Value>>)
                         -> EvalResult<Option<Value>> {
        let mut values = values.into_iter();

        for param in &def.params {
            let value = match (values.next(), &param.default) {
                (Some(value), _) => value,
                (None, Some(default)) => self.eval(default)?,
                (None, None) => None,
            };
            if let Some(value) = value {
                self.scopes.define(&param.name, value);
            }
        }

        self.eval_statements(&def.body)
    }
}
