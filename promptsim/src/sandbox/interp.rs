//! Instruction-list interpreter used by the sandbox.
//!
//! The interpreter walks a `Program`'s instruction list directly; there
//! is no source text, no parsing, and no host-language evaluation.
//! Output goes to an injected sink so callers decide where text lands.

use crate::core::program::{BinOp, Expr, Instr};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// A fault raised while interpreting a program.
///
/// Faults are data, not process failures: the sandbox converts them
/// into a structured outcome and the host keeps running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecFault {
    #[error("division by zero")]
    DivisionByZero,
    #[error("unbound variable `{name}`")]
    UnboundVariable { name: String },
    #[error("type mismatch: cannot apply `{op}` to {lhs} and {rhs}")]
    TypeMismatch {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },
    #[error("condition evaluated to {kind}, expected bool")]
    NonBoolCondition { kind: &'static str },
    #[error("loop bound evaluated to {kind}, expected int")]
    NonIntBound { kind: &'static str },
    #[error("program fault: {message}")]
    Raised { message: String },
    #[error("output sink rejected a write")]
    Sink,
}

impl From<fmt::Error> for ExecFault {
    fn from(_: fmt::Error) -> Self {
        ExecFault::Sink
    }
}

/// Runtime value. Programs are small enough that cloning is fine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Str(String),
    Bool(bool),
}

impl Value {
    fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Str(_) => "str",
            Value::Bool(_) => "bool",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Str(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
        }
    }
}

/// Single-use interpreter over one program run.
///
/// Each run starts from an empty environment, so programs cannot
/// observe state left behind by earlier runs.
pub struct Interpreter<'a, W: fmt::Write> {
    env: HashMap<String, Value>,
    sink: &'a mut W,
}

impl<'a, W: fmt::Write> Interpreter<'a, W> {
    pub fn new(sink: &'a mut W) -> Self {
        Self {
            env: HashMap::new(),
            sink,
        }
    }

    /// Execute instructions in order until the end or the first fault.
    pub fn run(&mut self, code: &[Instr]) -> Result<(), ExecFault> {
        for instr in code {
            self.exec(instr)?;
        }
        Ok(())
    }

    fn exec(&mut self, instr: &Instr) -> Result<(), ExecFault> {
        match instr {
            Instr::Print { parts } => {
                // Build the full line first: a fault in a later part
                // must not leave a half-written line in the sink.
                let mut line = String::new();
                for part in parts {
                    let value = self.eval(part)?;
                    line.push_str(&value.to_string());
                }
                writeln!(self.sink, "{line}")?;
                Ok(())
            }
            Instr::Set { name, value } => {
                let value = self.eval(value)?;
                self.env.insert(name.clone(), value);
                Ok(())
            }
            Instr::If {
                cond,
                then,
                otherwise,
            } => match self.eval(cond)? {
                Value::Bool(true) => self.run(then),
                Value::Bool(false) => self.run(otherwise),
                other => Err(ExecFault::NonBoolCondition { kind: other.kind() }),
            },
            Instr::Repeat {
                var,
                from,
                to,
                body,
            } => {
                let from = self.int_bound(from)?;
                let to = self.int_bound(to)?;
                for i in from..=to {
                    self.env.insert(var.clone(), Value::Int(i));
                    self.run(body)?;
                }
                Ok(())
            }
            Instr::Fail { message } => Err(ExecFault::Raised {
                message: message.clone(),
            }),
        }
    }

    fn int_bound(&mut self, expr: &Expr) -> Result<i64, ExecFault> {
        match self.eval(expr)? {
            Value::Int(v) => Ok(v),
            other => Err(ExecFault::NonIntBound { kind: other.kind() }),
        }
    }

    fn eval(&mut self, expr: &Expr) -> Result<Value, ExecFault> {
        match expr {
            Expr::Int { value } => Ok(Value::Int(*value)),
            Expr::Str { value } => Ok(Value::Str(value.clone())),
            Expr::Bool { value } => Ok(Value::Bool(*value)),
            Expr::Var { name } => {
                self.env
                    .get(name)
                    .cloned()
                    .ok_or_else(|| ExecFault::UnboundVariable { name: name.clone() })
            }
            Expr::Bin { op, lhs, rhs } => {
                let lhs = self.eval(lhs)?;
                let rhs = self.eval(rhs)?;
                apply_bin(*op, lhs, rhs)
            }
        }
    }
}

fn apply_bin(op: BinOp, lhs: Value, rhs: Value) -> Result<Value, ExecFault> {
    match (&lhs, &rhs) {
        (Value::Int(a), Value::Int(b)) => {
            let (a, b) = (*a, *b);
            Ok(match op {
                BinOp::Add => Value::Int(a.wrapping_add(b)),
                BinOp::Sub => Value::Int(a.wrapping_sub(b)),
                BinOp::Mul => Value::Int(a.wrapping_mul(b)),
                BinOp::Div => {
                    if b == 0 {
                        return Err(ExecFault::DivisionByZero);
                    }
                    Value::Int(a / b)
                }
                BinOp::Mod => {
                    if b == 0 {
                        return Err(ExecFault::DivisionByZero);
                    }
                    Value::Int(a % b)
                }
                BinOp::Eq => Value::Bool(a == b),
                BinOp::Ne => Value::Bool(a != b),
                BinOp::Lt => Value::Bool(a < b),
                BinOp::Le => Value::Bool(a <= b),
                BinOp::Gt => Value::Bool(a > b),
                BinOp::Ge => Value::Bool(a >= b),
            })
        }
        (Value::Str(a), Value::Str(b)) => match op {
            BinOp::Add => Ok(Value::Str(format!("{a}{b}"))),
            BinOp::Eq => Ok(Value::Bool(a == b)),
            BinOp::Ne => Ok(Value::Bool(a != b)),
            _ => Err(mismatch(op, &lhs, &rhs)),
        },
        (Value::Bool(a), Value::Bool(b)) => match op {
            BinOp::Eq => Ok(Value::Bool(a == b)),
            BinOp::Ne => Ok(Value::Bool(a != b)),
            _ => Err(mismatch(op, &lhs, &rhs)),
        },
        _ => Err(mismatch(op, &lhs, &rhs)),
    }
}

fn mismatch(op: BinOp, lhs: &Value, rhs: &Value) -> ExecFault {
    ExecFault::TypeMismatch {
        op: op.symbol(),
        lhs: lhs.kind(),
        rhs: rhs.kind(),
    }
}
