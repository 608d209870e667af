//! Generated-program data model.
//!
//! The simulators never evaluate source text. A "generated program" is
//! data: a small instruction list the sandbox interprets directly. The
//! JSON form is tag-discriminated so program files stay hand-editable
//! and schema-checkable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operators over program values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
        }
    }
}

/// Expression tree evaluated by the sandbox interpreter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "expr", rename_all = "snake_case")]
pub enum Expr {
    Int { value: i64 },
    Str { value: String },
    Bool { value: bool },
    Var { name: String },
    Bin { op: BinOp, lhs: Box<Expr>, rhs: Box<Expr> },
}

impl Expr {
    pub fn int(value: i64) -> Self {
        Expr::Int { value }
    }

    pub fn str(value: impl Into<String>) -> Self {
        Expr::Str {
            value: value.into(),
        }
    }

    pub fn bool(value: bool) -> Self {
        Expr::Bool { value }
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var { name: name.into() }
    }

    pub fn bin(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Bin {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn operand(e: &Expr) -> String {
            match e {
                Expr::Bin { .. } => format!("({e})"),
                _ => e.to_string(),
            }
        }
        match self {
            Expr::Int { value } => write!(f, "{value}"),
            Expr::Str { value } => write!(f, "{value:?}"),
            Expr::Bool { value } => write!(f, "{value}"),
            Expr::Var { name } => write!(f, "{name}"),
            Expr::Bin { op, lhs, rhs } => {
                write!(f, "{} {} {}", operand(lhs), op.symbol(), operand(rhs))
            }
        }
    }
}

/// One instruction of a generated program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Instr {
    /// Write the concatenated parts plus a trailing newline.
    Print { parts: Vec<Expr> },
    /// Bind or rebind a variable.
    Set { name: String, value: Expr },
    /// Conditional branch on a boolean expression.
    If {
        cond: Expr,
        then: Vec<Instr>,
        #[serde(default)]
        otherwise: Vec<Instr>,
    },
    /// Inclusive integer range loop; the bound variable shadows any
    /// prior binding of the same name.
    Repeat {
        var: String,
        from: Expr,
        to: Expr,
        body: Vec<Instr>,
    },
    /// Raise an explicit fault.
    Fail { message: String },
}

/// A generated program: an ordered instruction list with metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub code: Vec<Instr>,
}

impl Program {
    pub fn new(id: impl Into<String>, name: impl Into<String>, code: Vec<Instr>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            code,
        }
    }

    /// Render a numbered, indented listing for display.
    pub fn listing(&self) -> String {
        let mut out = String::new();
        let mut line = 0usize;
        push_lines(&self.code, 0, &mut line, &mut out);
        out
    }
}

fn push_lines(code: &[Instr], depth: usize, line: &mut usize, out: &mut String) {
    for instr in code {
        match instr {
            Instr::Print { parts } => {
                let rendered: Vec<String> = parts.iter().map(ToString::to_string).collect();
                push_line(out, line, depth, &format!("PRINT {}", rendered.join(", ")));
            }
            Instr::Set { name, value } => {
                push_line(out, line, depth, &format!("SET {name} = {value}"));
            }
            Instr::If {
                cond,
                then,
                otherwise,
            } => {
                push_line(out, line, depth, &format!("IF {cond}"));
                push_lines(then, depth + 1, line, out);
                if !otherwise.is_empty() {
                    push_line(out, line, depth, "ELSE");
                    push_lines(otherwise, depth + 1, line, out);
                }
            }
            Instr::Repeat {
                var,
                from,
                to,
                body,
            } => {
                push_line(out, line, depth, &format!("REPEAT {var} = {from}..={to}"));
                push_lines(body, depth + 1, line, out);
            }
            Instr::Fail { message } => {
                push_line(out, line, depth, &format!("FAIL {message:?}"));
            }
        }
    }
}

fn push_line(out: &mut String, line: &mut usize, depth: usize, text: &str) {
    out.push_str(&format!("{:3} | {}{text}\n", line, "    ".repeat(depth)));
    *line += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_json_round_trips_with_tagged_representation() {
        let program = Program::new(
            "demo",
            "Demo",
            vec![
                Instr::Set {
                    name: "x".to_string(),
                    value: Expr::int(2),
                },
                Instr::Print {
                    parts: vec![Expr::str("x = "), Expr::var("x")],
                },
            ],
        );

        let json = serde_json::to_string_pretty(&program).expect("serialize");
        assert!(json.contains("\"op\": \"SET\""));
        assert!(json.contains("\"expr\": \"int\""));

        let parsed: Program = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed, program);
    }

    #[test]
    fn listing_numbers_lines_and_indents_nesting() {
        let program = Program::new(
            "loop",
            "Loop",
            vec![
                Instr::Set {
                    name: "total".to_string(),
                    value: Expr::int(0),
                },
                Instr::Repeat {
                    var: "i".to_string(),
                    from: Expr::int(1),
                    to: Expr::int(3),
                    body: vec![Instr::Set {
                        name: "total".to_string(),
                        value: Expr::bin(BinOp::Add, Expr::var("total"), Expr::var("i")),
                    }],
                },
            ],
        );

        let listing = program.listing();
        assert!(listing.contains("  0 | SET total = 0"));
        assert!(listing.contains("  1 | REPEAT i = 1..=3"));
        assert!(listing.contains("  2 |     SET total = total + i"));
    }

    #[test]
    fn expr_display_parenthesizes_nested_operations() {
        let expr = Expr::bin(
            BinOp::Mul,
            Expr::bin(BinOp::Add, Expr::var("a"), Expr::int(1)),
            Expr::int(2),
        );
        assert_eq!(expr.to_string(), "(a + 1) * 2");
    }
}
