//! Walks a [`Program`] and produces values and `print` output.

use std::collections::HashMap;
use std::rc::Rc;

use rsl_parser::ast::{Block, Expr, Program, Stmt};
use tracing::{debug, trace};

use crate::binary::eval_binary;
use crate::scope::{Binding, Closure, ScopeId, Scopes};
use crate::{InterpreterError, OutputSink, Value};

/// Default limit for nested evaluations.
pub const DEFAULT_MAX_DEPTH: usize = 256;

pub type EvalResult<T> = Result<T, InterpreterError>;

pub struct Evaluator<O> {
    scopes: Scopes,
    output: O,
    /// Current nesting of expression evaluations.
    depth: usize,
    max_depth: usize,
}

impl<O: OutputSink> Evaluator<O> {
    /// Creates an evaluator with an empty root scope writing `print` output to `output`.
    pub fn new(output: O) -> Self {
        Self {
            scopes: Scopes::new(),
            output,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum nesting of evaluations (expressions and block invocations).
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn into_output(self) -> O {
        self.output
    }

    /// Returns the top-level binding of `ident`, if any.
    pub fn global(&self, ident: &str) -> Option<&Binding> {
        self.scopes.resolve(ScopeId::ROOT, ident)
    }

    /// Executes `program` against the root scope.
    ///
    /// Bindings persist across calls. If the last statement is a bare expression its value is
    /// returned. On error, output of the statements before the failing one has already been
    /// written and their bindings are kept.
    pub fn eval_program(&mut self, program: &Program) -> EvalResult<Option<Value>> {
        let mut last = None;
        for stmt in &program.stmts {
            last = self.exec_stmt(stmt, ScopeId::ROOT)?;
        }
        Ok(last)
    }

    /// Executes one statement in `scope`. Returns the value of a bare expression statement.
    fn exec_stmt(&mut self, stmt: &Stmt, scope: ScopeId) -> EvalResult<Option<Value>> {
        match stmt {
            Stmt::Let { ident, block } => {
                let binding = self.eval_let(block, scope)?;
                trace!(%ident, ?binding, "bind");
                self.scopes.define(scope, ident.clone(), binding);
                Ok(None)
            }
            Stmt::Print(expr) => {
                let value = self.eval_expr(expr, scope)?;
                self.output.write(&value.to_string());
                Ok(None)
            }
            Stmt::ExprStmt(expr) => Ok(Some(self.eval_expr(expr, scope)?)),
        }
    }

    /// Computes the binding introduced by a `let`.
    /// A block without parameters is evaluated immediately, otherwise it is kept as a closure.
    fn eval_let(&mut self, block: &Rc<Block>, scope: ScopeId) -> EvalResult<Binding> {
        if !block.params.is_empty() {
            return Ok(Binding::Block(Closure {
                block: Rc::clone(block),
                scope,
            }));
        }
        if block.body.is_empty() {
            return Ok(Binding::Value(self.eval_expr(&block.tail, scope)?));
        }

        let child = self.scopes.push(scope, HashMap::new());
        let result = self.run_block(block, child);
        self.scopes.pop_to(child);
        Ok(Binding::Value(result?))
    }

    fn eval_expr(&mut self, expr: &Expr, scope: ScopeId) -> EvalResult<Value> {
        self.nested(|this| match expr {
            Expr::IntegerLit(val) => Ok(Value::Int(*val)),
            Expr::FloatLit(val) => Ok(Value::Float(*val)),
            Expr::StringLit(val) => Ok(Value::Str(val.clone())),
            Expr::VariableRef { ident, args } => this.eval_variable_ref(ident, args, scope),
            Expr::Binary { .. } => this.eval_binary_chain(expr, scope),
        })
    }

    /// Evaluates a chain of binary operators left to right.
    ///
    /// The parser builds `a + b + c` as a left-leaning tree whose height grows with the
    /// number of operators, so the left spine is walked in a loop. Only the operands
    /// themselves count against the depth limit.
    fn eval_binary_chain(&mut self, expr: &Expr, scope: ScopeId) -> EvalResult<Value> {
        let mut operations = Vec::new();
        let mut leftmost = expr;
        while let Expr::Binary { lhs, op, rhs } = leftmost {
            operations.push((*op, &**rhs));
            leftmost = &**lhs;
        }

        let mut acc = self.eval_expr(leftmost, scope)?;
        for (op, rhs) in operations.into_iter().rev() {
            let rhs = self.eval_expr(rhs, scope)?;
            acc = eval_binary(op, acc, rhs)?;
        }
        Ok(acc)
    }

    /// Evaluates a reference. A reference to a block invokes it with `args`.
    /// Arguments on a reference to a plain value are ignored.
    fn eval_variable_ref(&mut self, ident: &str, args: &[Expr], scope: ScopeId) -> EvalResult<Value> {
        let closure = match self.resolve(ident, scope)? {
            Binding::Value(value) => return Ok(value.clone()),
            Binding::Block(closure) => closure.clone(),
        };
        self.invoke(ident, &closure, args, scope)
    }

    /// Invokes `closure` with argument expressions evaluated in the `caller` scope.
    /// The block body runs in a new scope whose outer scope is the one the block was defined in.
    fn invoke(
        &mut self,
        ident: &str,
        closure: &Closure,
        args: &[Expr],
        caller: ScopeId,
    ) -> EvalResult<Value> {
        if args.len() != closure.arity() {
            return Err(InterpreterError::Arity {
                ident: ident.to_string(),
                expected: closure.arity(),
                got: args.len(),
            });
        }

        let mut bindings = HashMap::with_capacity(args.len());
        for (param, arg) in closure.block.params.iter().zip(args) {
            let binding = self.eval_argument(arg, caller)?;
            bindings.insert(param.clone(), binding);
        }

        debug!(%ident, args = args.len(), "invoking block");
        let child = self.scopes.push(closure.scope, bindings);
        let result = self.run_block(&closure.block, child);
        self.scopes.pop_to(child);
        result
    }

    /// Computes the binding of one parameter.
    ///
    /// A bare reference to a block that still expects parameters is passed through
    /// unevaluated. Everything else is evaluated eagerly.
    fn eval_argument(&mut self, arg: &Expr, caller: ScopeId) -> EvalResult<Binding> {
        if let Some(ident) = arg.as_bare_ref() {
            match self.resolve(ident, caller)? {
                Binding::Block(closure) if closure.arity() > 0 => {
                    return Ok(Binding::Block(closure.clone()))
                }
                Binding::Value(value) => return Ok(Binding::Value(value.clone())),
                Binding::Block(_) => {}
            }
        }
        Ok(Binding::Value(self.eval_expr(arg, caller)?))
    }

    /// Runs the body of `block` in `scope`, then evaluates its tail.
    fn run_block(&mut self, block: &Block, scope: ScopeId) -> EvalResult<Value> {
        for stmt in &block.body {
            self.exec_stmt(stmt, scope)?;
        }
        self.eval_expr(&block.tail, scope)
    }

    fn resolve(&self, ident: &str, scope: ScopeId) -> EvalResult<&Binding> {
        self.scopes
            .resolve(scope, ident)
            .ok_or_else(|| InterpreterError::UnboundVariable {
                ident: ident.to_string(),
            })
    }

    /// Runs `f` one nesting level deeper, failing once the depth limit is reached.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> EvalResult<T>) -> EvalResult<T> {
        if self.depth >= self.max_depth {
            return Err(InterpreterError::RecursionLimit {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}
