//! Helper functions available inside templates.

use super::Value;
use crate::error::TemplateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Builtin {
    Contains,
    HasPrefix,
    HasSuffix,
    TrimPrefix,
    TrimSuffix,
    TrimSpace,
    TrimLeft,
    TrimRight,
    Trim,
    Title,
    ToTitle,
    ToLower,
    ToUpper,
    Eq,
    Ne,
    Not,
    And,
    Or,
}

const FUNCS: &[(&str, Builtin)] = &[
    ("contains", Builtin::Contains),
    ("hasPrefix", Builtin::HasPrefix),
    ("hasSuffix", Builtin::HasSuffix),
    ("trimPrefix", Builtin::TrimPrefix),
    ("trimSuffix", Builtin::TrimSuffix),
    ("trimSpace", Builtin::TrimSpace),
    ("trimLeft", Builtin::TrimLeft),
    ("trimRight", Builtin::TrimRight),
    ("trim", Builtin::Trim),
    ("title", Builtin::Title),
    ("toTitle", Builtin::ToTitle),
    ("toLower", Builtin::ToLower),
    ("toUpper", Builtin::ToUpper),
    ("eq", Builtin::Eq),
    ("ne", Builtin::Ne),
    ("not", Builtin::Not),
    ("and", Builtin::And),
    ("or", Builtin::Or),
];

impl Builtin {
    pub(super) fn lookup(name: &str) -> Option<Self> {
        FUNCS.iter().find(|(n, _)| *n == name).map(|(_, f)| *f)
    }

    fn name(self) -> &'static str {
        FUNCS
            .iter()
            .find(|(_, f)| *f == self)
            .map(|(n, _)| *n)
            .unwrap_or("function")
    }

    /// Call the function. String helpers take the subject first, then the
    /// affix or cutset, like their Go `strings` namesakes.
    pub(super) fn call(self, args: Vec<Value>) -> Result<Value, TemplateError> {
        use Builtin::*;

        let value = match self {
            Contains => {
                let [s, sub] = self.strings(args)?;
                Value::Bool(s.contains(sub.as_str()))
            }
            HasPrefix => {
                let [s, prefix] = self.strings(args)?;
                Value::Bool(s.starts_with(prefix.as_str()))
            }
            HasSuffix => {
                let [s, suffix] = self.strings(args)?;
                Value::Bool(s.ends_with(suffix.as_str()))
            }
            TrimPrefix => {
                let [s, prefix] = self.strings(args)?;
                Value::Str(s.strip_prefix(prefix.as_str()).unwrap_or(&s).to_string())
            }
            TrimSuffix => {
                let [s, suffix] = self.strings(args)?;
                Value::Str(s.strip_suffix(suffix.as_str()).unwrap_or(&s).to_string())
            }
            TrimSpace => {
                let [s] = self.strings(args)?;
                Value::Str(s.trim().to_string())
            }
            TrimLeft => {
                let [s, cutset] = self.strings(args)?;
                Value::Str(s.trim_start_matches(|c: char| cutset.contains(c)).to_string())
            }
            TrimRight => {
                let [s, cutset] = self.strings(args)?;
                Value::Str(s.trim_end_matches(|c: char| cutset.contains(c)).to_string())
            }
            Trim => {
                let [s, cutset] = self.strings(args)?;
                Value::Str(s.trim_matches(|c: char| cutset.contains(c)).to_string())
            }
            Title => {
                let [s] = self.strings(args)?;
                Value::Str(title(&s))
            }
            ToTitle | ToUpper => {
                let [s] = self.strings(args)?;
                Value::Str(s.to_uppercase())
            }
            ToLower => {
                let [s] = self.strings(args)?;
                Value::Str(s.to_lowercase())
            }
            Eq => {
                let Some((first, rest)) = args.split_first().filter(|(_, rest)| !rest.is_empty())
                else {
                    return Err(self.arity("at least 2", args.len()));
                };
                Value::Bool(rest.iter().any(|v| v == first))
            }
            Ne => {
                let [a, b] = self.exactly(args)?;
                Value::Bool(a != b)
            }
            Not => {
                let [a] = self.exactly(args)?;
                Value::Bool(!a.truthy())
            }
            And => self.fold(args, |v| !v.truthy())?,
            Or => self.fold(args, Value::truthy)?,
        };

        Ok(value)
    }

    /// Return the first argument satisfying `stop`, or the last argument.
    fn fold(self, args: Vec<Value>, stop: impl Fn(&Value) -> bool) -> Result<Value, TemplateError> {
        let count = args.len();
        let mut last = None;
        for arg in args {
            if stop(&arg) {
                return Ok(arg);
            }
            last = Some(arg);
        }
        last.ok_or_else(|| self.arity("at least 1", count))
    }

    fn exactly<const N: usize>(self, args: Vec<Value>) -> Result<[Value; N], TemplateError> {
        let count = args.len();
        args.try_into()
            .map_err(|_| self.arity(&N.to_string(), count))
    }

    fn strings<const N: usize>(self, args: Vec<Value>) -> Result<[String; N], TemplateError> {
        let values: [Value; N] = self.exactly(args)?;
        let mut out: [String; N] = std::array::from_fn(|_| String::new());
        for (slot, value) in out.iter_mut().zip(values) {
            *slot = match value {
                Value::Str(s) => s,
                Value::Bool(b) => {
                    return Err(TemplateError::Eval(format!(
                        "{}: expected string argument, got {}",
                        self.name(),
                        b
                    )))
                }
            };
        }
        Ok(out)
    }

    fn arity(self, want: &str, got: usize) -> TemplateError {
        TemplateError::Eval(format!(
            "wrong number of args for {}: want {} got {}",
            self.name(),
            want,
            got
        ))
    }
}

/// Upper-case the first letter of every word.
fn title(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_boundary = true;
    for c in s.chars() {
        if at_boundary {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_boundary = !(c.is_alphanumeric() || c == '_');
    }
    out
}
