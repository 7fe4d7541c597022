//! Tree-walking evaluator and built-in functions.

use std::io::{self, BufRead, Write};
use std::rc::Rc;

use crate::env::{EnvRef, Environment};
use crate::flow::Flow;
use crate::value::Value;
use brisk_syntax::ast::*;
use brisk_syntax::error::{error, Error, Result};

/// Walks the AST against an environment chain. Reads of unknown names
/// are lenient (Null); writes and calls to unknown names are runtime
/// errors, as are `append` argument violations. Nothing else errors.
#[derive(Default)]
pub struct Interpreter;

impl Interpreter {
    pub fn new() -> Self {
        Self
    }

    /// Run a program in a fresh root environment.
    pub fn run(&mut self, program: &Program) -> Result<()> {
        let env = Environment::new_root();
        let _ = self.run_with_env(program, &env)?;
        Ok(())
    }

    /// Run a program against an existing root scope and yield the value
    /// of the last statement, if any (the REPL echoes it). Control-flow
    /// signals reaching this level are reported as errors.
    pub fn run_with_env(&mut self, program: &Program, env: &EnvRef) -> Result<Option<Value>> {
        let mut last = None;
        for stmt in &program.body {
            match self.exec_stmt(env, stmt)? {
                Flow::Normal(v) => last = Some(v),
                Flow::Return(_) => return error("'return' outside of function"),
                Flow::Break => return error("'break' outside of loop"),
                Flow::Continue => return error("'continue' outside of loop"),
            }
        }
        Ok(last)
    }

    /// Run statements in the given scope, stopping at the first signal.
    fn exec_block(&mut self, env: &EnvRef, body: &[Stmt]) -> Result<Flow> {
        let mut last = Value::Null;
        for stmt in body {
            match self.exec_stmt(env, stmt)? {
                Flow::Normal(v) => last = v,
                signal => return Ok(signal),
            }
        }
        Ok(Flow::Normal(last))
    }

    fn exec_stmt(&mut self, env: &EnvRef, stmt: &Stmt) -> Result<Flow> {
        match &stmt.kind {
            StmtKind::Let { name, expr } => {
                let v = self.eval_expr(env, expr)?;
                env.borrow_mut().define(name.clone(), v);
                Ok(Flow::Normal(Value::Null))
            }
            StmtKind::Assign { name, expr } => {
                let v = self.eval_expr(env, expr)?;
                if env.borrow_mut().assign(name, v) {
                    Ok(Flow::Normal(Value::Null))
                } else {
                    Err(Error::on_line(
                        format!("Undefined variable '{}'", name),
                        stmt.line,
                    ))
                }
            }
            StmtKind::Print(args) => {
                for arg in args {
                    let v = self.eval_expr(env, arg)?;
                    print!("{} ", v);
                }
                println!();
                Ok(Flow::Normal(Value::Null))
            }
            StmtKind::If {
                cond,
                then_body,
                else_body,
            } => {
                let branch = if self.eval_expr(env, cond)?.truthy() {
                    then_body
                } else {
                    else_body
                };
                let child = Environment::child(env);
                match self.exec_block(&child, branch)? {
                    Flow::Normal(_) => Ok(Flow::Normal(Value::Null)),
                    signal => Ok(signal),
                }
            }
            StmtKind::While { cond, body } => {
                while self.eval_expr(env, cond)?.truthy() {
                    let child = Environment::child(env);
                    match self.exec_block(&child, body)? {
                        Flow::Normal(_) => {}
                        Flow::Return(v) => return Ok(Flow::Return(v)),
                        Flow::Break => break,
                        Flow::Continue => continue,
                    }
                }
                Ok(Flow::Normal(Value::Null))
            }
            StmtKind::Switch {
                subject,
                cases,
                default,
            } => {
                // cases match on canonical string form, first match wins,
                // no fall-through
                let target = self.eval_expr(env, subject)?.to_string();
                for case in cases {
                    if self.eval_expr(env, &case.value)?.to_string() == target {
                        let child = Environment::child(env);
                        return match self.exec_block(&child, &case.body)? {
                            Flow::Normal(_) | Flow::Break => Ok(Flow::Normal(Value::Null)),
                            signal => Ok(signal),
                        };
                    }
                }
                if let Some(body) = default {
                    let child = Environment::child(env);
                    return match self.exec_block(&child, body)? {
                        Flow::Normal(_) | Flow::Break => Ok(Flow::Normal(Value::Null)),
                        signal => Ok(signal),
                    };
                }
                Ok(Flow::Normal(Value::Null))
            }
            StmtKind::Func(func) => {
                env.borrow_mut()
                    .define_func(func.name.clone(), Rc::clone(func));
                Ok(Flow::Normal(Value::Null))
            }
            StmtKind::Return(expr) => {
                let v = match expr {
                    Some(e) => self.eval_expr(env, e)?,
                    None => Value::Null,
                };
                Ok(Flow::Return(v))
            }
            StmtKind::Break => Ok(Flow::Break),
            StmtKind::Continue => Ok(Flow::Continue),
            StmtKind::Expr(e) => {
                let v = self.eval_expr(env, e)?;
                Ok(Flow::Normal(v))
            }
        }
    }

    fn eval_expr(&mut self, env: &EnvRef, expr: &Expr) -> Result<Value> {
        match &expr.kind {
            ExprKind::Int(n) => Ok(Value::Int(*n)),
            ExprKind::Float(f) => Ok(Value::Float(*f)),
            ExprKind::Str(s) => Ok(Value::Str(s.clone())),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Ident(name) => Ok(env.borrow().get(name)),
            ExprKind::List(items) => {
                let mut vals = Vec::with_capacity(items.len());
                for item in items {
                    vals.push(self.eval_expr(env, item)?);
                }
                Ok(Value::list_from(vals))
            }
            ExprKind::Binary { op, lhs, rhs } => {
                // both operands always evaluate, even for && and ||
                let l = self.eval_expr(env, lhs)?;
                let r = self.eval_expr(env, rhs)?;
                Ok(eval_binop(*op, &l, &r))
            }
            ExprKind::Index { target, index } => {
                let target = self.eval_expr(env, target)?;
                let index = self.eval_expr(env, index)?.as_int();
                Ok(index_value(&target, index))
            }
            ExprKind::Call { name, args } => self.eval_call(env, name, args, expr.line),
            ExprKind::Input(prompt) => self.eval_input(env, prompt.as_deref()),
        }
    }

    /// `input`: print the prompt (if any) without a newline, flush, and
    /// read one line. Closed stdin reads as the empty string.
    fn eval_input(&mut self, env: &EnvRef, prompt: Option<&Expr>) -> Result<Value> {
        if let Some(p) = prompt {
            let v = self.eval_expr(env, p)?;
            print!("{}", v);
        }
        io::stdout()
            .flush()
            .map_err(|e| Error::new(format!("IO error: {}", e)))?;

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => Ok(Value::Str(String::new())),
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Ok(Value::Str(line))
            }
            Err(e) => Err(Error::new(format!("IO error: {}", e))),
        }
    }

    /// Dispatch a call: built-ins first, then user functions through the
    /// environment chain.
    fn eval_call(&mut self, env: &EnvRef, name: &str, args: &[Expr], line: usize) -> Result<Value> {
        match name {
            "int" => {
                let v = self.eval_arg(env, args, 0)?;
                return Ok(Value::Int(v.as_int()));
            }
            "float" => {
                let v = self.eval_arg(env, args, 0)?;
                return Ok(Value::Float(v.as_float()));
            }
            "string" => {
                let v = self.eval_arg(env, args, 0)?;
                return Ok(Value::Str(v.to_string()));
            }
            "typeof" => {
                let v = self.eval_arg(env, args, 0)?;
                return Ok(Value::Str(v.type_name().to_string()));
            }
            "len" => {
                let v = self.eval_arg(env, args, 0)?;
                let n = match &v {
                    Value::Str(s) => s.chars().count() as i64,
                    Value::List(items) => items.borrow().len() as i64,
                    _ => 0,
                };
                return Ok(Value::Int(n));
            }
            "append" => {
                if args.len() < 2 {
                    return Err(Error::on_line("append() requires 2 arguments", line));
                }
                let target = self.eval_expr(env, &args[0])?;
                return match target {
                    Value::List(items) => {
                        let v = self.eval_expr(env, &args[1])?;
                        items.borrow_mut().push(v.deep_copy());
                        Ok(Value::Null)
                    }
                    _ => Err(Error::on_line(
                        "First argument to append() must be a list",
                        line,
                    )),
                };
            }
            _ => {}
        }

        let func = env.borrow().get_func(name);
        let func = match func {
            Some(f) => f,
            None => {
                return Err(Error::on_line(
                    format!("Undefined function '{}'", name),
                    line,
                ))
            }
        };

        // arguments evaluate in the caller's environment, in parameter
        // order; missing arguments bind Null, excess are discarded
        let mut values = Vec::with_capacity(func.params.len());
        for i in 0..func.params.len() {
            values.push(self.eval_arg(env, args, i)?);
        }

        // the callee scope chains to the caller's scope (dynamic scoping)
        let scope = Environment::child(env);
        for (param, v) in func.params.iter().zip(values) {
            scope.borrow_mut().define(param.clone(), v);
        }

        match self.exec_block(&scope, &func.body)? {
            Flow::Normal(_) => Ok(Value::Null),
            Flow::Return(v) => Ok(v),
            Flow::Break => error("'break' outside of loop"),
            Flow::Continue => error("'continue' outside of loop"),
        }
    }

    fn eval_arg(&mut self, env: &EnvRef, args: &[Expr], i: usize) -> Result<Value> {
        match args.get(i) {
            Some(arg) => self.eval_expr(env, arg),
            None => Ok(Value::Null),
        }
    }
}

fn is_numeric(v: &Value) -> bool {
    matches!(v, Value::Int(_) | Value::Float(_))
}

/// Binary operator semantics: strict logical operators, canonical-string
/// equality, double-based arithmetic, string concatenation with `+`, and
/// Null for every other combination.
fn eval_binop(op: BinOp, l: &Value, r: &Value) -> Value {
    match op {
        BinOp::And => Value::Bool(l.truthy() && r.truthy()),
        BinOp::Or => Value::Bool(l.truthy() || r.truthy()),
        BinOp::Eq => Value::Bool(l.to_string() == r.to_string()),
        BinOp::Ne => Value::Bool(l.to_string() != r.to_string()),
        _ => {
            if is_numeric(l) && is_numeric(r) {
                numeric_binop(op, l, r)
            } else if op == BinOp::Add
                && (matches!(l, Value::Str(_)) || matches!(r, Value::Str(_)))
            {
                Value::Str(format!("{}{}", l, r))
            } else {
                Value::Null
            }
        }
    }
}

/// Arithmetic and relational operators over numbers. Both sides widen to
/// doubles; the result stays Float iff either side was Float, otherwise
/// it truncates toward zero back to Int. Division always yields Float,
/// and a zero divisor reads as Float 0 for both `/` and `%`.
fn numeric_binop(op: BinOp, l: &Value, r: &Value) -> Value {
    let dl = l.as_float();
    let dr = r.as_float();
    let is_float = matches!(l, Value::Float(_)) || matches!(r, Value::Float(_));
    let keep = |x: f64| {
        if is_float {
            Value::Float(x)
        } else {
            Value::Int(x as i64)
        }
    };
    match op {
        BinOp::Add => keep(dl + dr),
        BinOp::Sub => keep(dl - dr),
        BinOp::Mul => keep(dl * dr),
        BinOp::Div | BinOp::Mod if dr == 0.0 => Value::Float(0.0),
        BinOp::Div => Value::Float(dl / dr),
        BinOp::Mod => keep(dl % dr),
        BinOp::Lt => Value::Bool(dl < dr),
        BinOp::Le => Value::Bool(dl <= dr),
        BinOp::Gt => Value::Bool(dl > dr),
        BinOp::Ge => Value::Bool(dl >= dr),
        // logical and equality operators never reach here
        BinOp::And | BinOp::Or | BinOp::Eq | BinOp::Ne => Value::Null,
    }
}

/// Bounds-checked index read. In-range list reads yield the element,
/// in-range string reads a one-character string; everything else
/// (out of range, non-indexable target) yields Null.
fn index_value(target: &Value, index: i64) -> Value {
    if index < 0 {
        return Value::Null;
    }
    match target {
        Value::List(items) => items
            .borrow()
            .get(index as usize)
            .cloned()
            .unwrap_or(Value::Null),
        Value::Str(s) => s
            .chars()
            .nth(index as usize)
            .map(|c| Value::Str(c.to_string()))
            .unwrap_or(Value::Null),
        _ => Value::Null,
    }
}
