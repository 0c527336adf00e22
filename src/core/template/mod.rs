//! Matcher templates.
//!
//! A deliberately small, side-effect-free template language used to derive
//! a parameter name from an environment variable. A template is rendered
//! against the variable's `.Name` and `.Value`; an empty result means the
//! variable is not a reference.
//!
//! ```text
//! {{ if hasPrefix .Value "ssm://" }}{{ trimPrefix .Value "ssm://" }}{{ end }}
//! {{ if eq .Name "DATABASE_URL" }}/prod/db/url{{ end }}
//! {{ if hasSuffix .Name "_SECRET" }}/app/{{ .Name | toLower }}{{ end }}
//! ```
//!
//! Supported: text, `{{ pipeline }}`, `if` / `else if` / `else` / `end`,
//! pipes, parentheses, string and boolean literals, `{{-` / `-}}` trim
//! markers, and the helpers in [`funcs`].

mod funcs;
mod lexer;
mod parser;

use std::fmt;

use parser::{Command, Field, Node, Operand, Pipeline};

use crate::error::TemplateError;

/// Runtime value produced while evaluating a template.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Value {
    Str(String),
    Bool(bool),
}

impl Value {
    fn truthy(&self) -> bool {
        match self {
            Value::Str(s) => !s.is_empty(),
            Value::Bool(b) => *b,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// A parsed matcher template.
#[derive(Debug, Clone)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Parse template text.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Parse` for syntax errors and unknown helpers.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let tokens = lexer::lex(source)?;
        let nodes = parser::parse(tokens)?;
        Ok(Self { nodes })
    }

    /// Render the template for one environment variable.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Eval` when a helper is called with the wrong
    /// number or type of arguments.
    pub fn render(&self, name: &str, value: &str) -> Result<String, TemplateError> {
        let scope = Scope { name, value };
        let mut out = String::new();
        scope.nodes(&self.nodes, &mut out)?;
        Ok(out)
    }
}

struct Scope<'a> {
    name: &'a str,
    value: &'a str,
}

impl Scope<'_> {
    fn nodes(&self, nodes: &[Node], out: &mut String) -> Result<(), TemplateError> {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Action(pipeline) => out.push_str(&self.pipeline(pipeline)?.to_string()),
                Node::If {
                    branches,
                    otherwise,
                } => {
                    let mut chosen = otherwise.as_slice();
                    for (cond, body) in branches {
                        if self.pipeline(cond)?.truthy() {
                            chosen = body;
                            break;
                        }
                    }
                    self.nodes(chosen, out)?;
                }
            }
        }
        Ok(())
    }

    fn pipeline(&self, pipeline: &Pipeline) -> Result<Value, TemplateError> {
        let mut piped = None;
        for command in &pipeline.0 {
            piped = Some(self.command(command, piped.take())?);
        }
        piped.ok_or_else(|| TemplateError::Eval("empty pipeline".to_string()))
    }

    fn command(&self, command: &Command, piped: Option<Value>) -> Result<Value, TemplateError> {
        let Some((head, rest)) = command.0.split_first() else {
            return Err(TemplateError::Eval("empty command".to_string()));
        };

        match head {
            Operand::Func(func) => {
                let mut args = rest
                    .iter()
                    .map(|op| self.operand(op))
                    .collect::<Result<Vec<_>, _>>()?;
                args.extend(piped);
                func.call(args)
            }
            _ if rest.is_empty() && piped.is_none() => self.operand(head),
            _ => Err(TemplateError::Eval(
                "can't give argument to non-function".to_string(),
            )),
        }
    }

    fn operand(&self, operand: &Operand) -> Result<Value, TemplateError> {
        match operand {
            Operand::Field(Field::Name) => Ok(Value::Str(self.name.to_string())),
            Operand::Field(Field::Value) => Ok(Value::Str(self.value.to_string())),
            Operand::Str(s) => Ok(Value::Str(s.clone())),
            Operand::Bool(b) => Ok(Value::Bool(*b)),
            Operand::Func(func) => func.call(Vec::new()),
            Operand::Sub(pipeline) => self.pipeline(pipeline),
        }
    }
}
