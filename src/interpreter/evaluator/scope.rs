use std::{collections::HashMap, rc::Rc};

use tracing::trace;

use crate::{ast::FunctionDef, interpreter::value::core::Value};

/// A single level of the scope chain: named variables and user functions.
///
/// Embedders create the global scope, seed it with [`VariableScope::set`] and
/// hand it to [`crate::execute_with_scope`]; the scope keeps everything the
/// script stored, including functions it declared, for the next run.
///
/// ## Example
/// ```
/// use ember::interpreter::{evaluator::scope::VariableScope, value::core::Value};
///
/// let mut scope = VariableScope::new("demo");
/// scope.set("a", Value::Number(3.0));
///
/// assert_eq!(scope.get("a"), Some(&Value::Number(3.0)));
/// assert_eq!(scope.remove("a"), Some(Value::Number(3.0)));
/// assert!(scope.get("a").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct VariableScope {
    name:                 String,
    vars:                 HashMap<String, Value>,
    functions:            HashMap<String, Rc<FunctionDef>>,
    pub(crate) enclosing: Option<usize>,
}

impl VariableScope {
    /// Creates an empty scope without an enclosing scope.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name:      name.into(),
               vars:      HashMap::new(),
               functions: HashMap::new(),
               enclosing: None, }
    }

    /// The name given at creation, e.g. `GLOBAL` or `func_add`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stores a variable in this scope, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    /// Reads a variable stored directly in this scope.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Removes a variable from this scope and returns its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.vars.remove(name)
    }

    /// Reports whether a user function of that name was declared in this
    /// scope.
    #[must_use]
    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Returns the names of the variables stored in this scope, sorted.
    #[must_use]
    pub fn variables(&self) -> Vec<&str> {
        let mut names = self.vars.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }
}

impl Default for VariableScope {
    fn default() -> Self {
        Self::new("GLOBAL")
    }
}

/// The live scopes of one evaluation.
///
/// Index `0` is the global scope. Every user function call pushes a scope
/// whose `enclosing` index points at the scope that declared the function,
/// so a callee never sees its caller's locals. Scopes are popped in the
/// reverse order they were pushed, which keeps every `enclosing` index valid
/// for as long as the scope referring to it is alive.
#[derive(Debug)]
pub struct ScopeStack(Vec<VariableScope>);

impl ScopeStack {
    /// Creates a stack whose global scope is `global`.
    #[must_use]
    pub fn new(mut global: VariableScope) -> Self {
        global.enclosing = None;
        Self(vec![global])
    }

    /// Index of the innermost scope.
    fn current(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Indices of the scopes visible from the innermost one, innermost first.
    fn chain(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(Some(self.current()),
                              |&index| self.0.get(index).and_then(|scope| scope.enclosing))
    }

    /// Index of the nearest visible scope that stores `name`.
    fn owner(&self, name: &str) -> Option<usize> {
        self.chain()
            .find(|&index| self.0.get(index).is_some_and(|scope| scope.vars.contains_key(name)))
    }

    /// Resolves a variable through the scope chain.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.chain().find_map(|index| self.0.get(index)?.get(name))
    }

    /// Mutable access to a variable in the nearest scope that stores it.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        let owner = self.owner(name)?;
        self.0.get_mut(owner)?.vars.get_mut(name)
    }

    /// Stores `value` in the nearest scope that already holds `name`, or in
    /// the innermost scope when none does.
    pub fn assign(&mut self, name: &str, value: Value) {
        let index = self.owner(name).unwrap_or_else(|| self.current());
        if let Some(scope) = self.0.get_mut(index) {
            scope.set(name, value);
        }
    }

    /// Stores `value` in the innermost scope, shadowing outer bindings.
    pub fn define(&mut self, name: &str, value: Value) {
        let index = self.current();
        if let Some(scope) = self.0.get_mut(index) {
            scope.set(name, value);
        }
    }

    /// Removes `name` from the nearest scope that stores it.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let owner = self.owner(name)?;
        self.0.get_mut(owner)?.remove(name)
    }

    /// Declares a user function in the innermost scope.
    pub fn register_function(&mut self, def: Rc<FunctionDef>) {
        let index = self.current();
        if let Some(scope) = self.0.get_mut(index) {
            scope.functions.insert(def.name.clone(), def);
        }
    }

    /// Finds a user function through the scope chain.
    ///
    /// # Returns
    /// The definition and the index of the scope that declared it.
    #[must_use]
    pub fn find_function(&self, name: &str) -> Option<(Rc<FunctionDef>, usize)> {
        self.chain().find_map(|index| {
                        self.0
                            .get(index)?
                            .functions
                            .get(name)
                            .map(|def| (Rc::clone(def), index))
                    })
    }

    /// Pushes a call scope whose parent is the scope at `enclosing`.
    pub fn push(&mut self, name: String, enclosing: usize) {
        trace!(scope = %name, enclosing, depth = self.0.len(), "push scope");

        let mut scope = VariableScope::new(name);
        scope.enclosing = Some(enclosing);
        self.0.push(scope);
    }

    /// Pops the innermost call scope. The global scope is never popped.
    pub fn pop(&mut self) -> Option<VariableScope> {
        if self.0.len() > 1 { self.0.pop() } else { None }
    }

    /// Number of live scopes, including the global one.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Consumes the stack and returns the global scope.
    #[must_use]
    pub fn into_global(self) -> VariableScope {
        self.0.into_iter().next().unwrap_or_default()
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new(VariableScope::default())
    }
}
