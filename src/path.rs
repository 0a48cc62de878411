//! Read-only attribute-path evaluation.
//!
//! A path is a dot-separated list of identifiers (`name`, `address.city`).
//! Each segment reads a named attribute off the current object. Nothing else
//! is accepted: no indexing, calls, operators or literals.

use std::fmt;

use itertools::Itertools;
use serde_json::Value;

use crate::errors::EvalError;
use crate::parser::{ParseError, Parser};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrPath {
    segments: Vec<String>,
}

impl AttrPath {
    pub fn parse(input: &str) -> Result<Self, EvalError> {
        let mut p = Parser::new(input);
        let mut segments = Vec::new();
        loop {
            let seg = p.parse_identifier().map_err(to_eval_err)?;
            segments.push(seg);
            if p.eof() {
                break;
            }
            if !p.consume_char('.') {
                return Err(EvalError::Parse(format!(
                    "unexpected character at offset {} in `{input}`",
                    p.offset()
                )));
            }
        }
        Ok(Self { segments })
    }

    fn prefix(&self, len: usize) -> String {
        if len == 0 {
            "<root>".to_string()
        } else {
            self.segments[..len].iter().join(".")
        }
    }

    /// Walks the path from `root` and returns the value it lands on.
    pub fn lookup<'a>(&self, root: &'a Value) -> Result<&'a Value, EvalError> {
        let mut current = root;
        for (i, attr) in self.segments.iter().enumerate() {
            current = match current {
                Value::Object(map) => map.get(attr).ok_or_else(|| EvalError::MissingAttribute {
                    attr: attr.clone(),
                    at: self.prefix(i),
                })?,
                Value::Null => return Err(EvalError::NullIntermediate(self.prefix(i))),
                _ => {
                    return Err(EvalError::NotAnObject {
                        attr: attr.clone(),
                        at: self.prefix(i),
                    })
                }
            };
        }
        Ok(current)
    }

    pub fn evaluate(&self, root: &Value) -> Result<String, EvalError> {
        let v = self.lookup(root)?;
        render(v).ok_or_else(|| EvalError::NotRenderable(self.to_string()))
    }
}

impl fmt::Display for AttrPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.iter().join("."))
    }
}

fn to_eval_err(e: ParseError) -> EvalError {
    match e {
        ParseError::InvalidSyntax(msg) => EvalError::Parse(msg),
    }
}

/// Text form of a scalar. Null, arrays and objects have none.
pub fn render(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Evaluates `path` against `root` and renders the result as text.
pub fn evaluate(root: &Value, path: &str) -> Result<String, EvalError> {
    AttrPath::parse(path)?.evaluate(root)
}
