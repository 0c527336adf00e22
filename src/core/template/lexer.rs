//! Tokenizer for matcher templates.

use crate::error::TemplateError;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Token {
    Text(String),
    Open,
    Close,
    Ident(String),
    Field(String),
    Str(String),
    LParen,
    RParen,
    Pipe,
}

/// Split template source into text runs and action tokens.
///
/// Trim markers (`{{- ` and ` -}}`) are applied here, so the parser only
/// ever sees already-trimmed text.
pub(super) fn lex(src: &str) -> Result<Vec<Token>, TemplateError> {
    let mut tokens = Vec::new();
    let mut rest = src;
    let mut trim_next = false;

    loop {
        let Some(start) = rest.find(OPEN) else {
            push_text(&mut tokens, rest, trim_next);
            break;
        };
        push_text(&mut tokens, &rest[..start], trim_next);
        rest = &rest[start + OPEN.len()..];

        if let Some(after) = rest.strip_prefix('-') {
            if after.starts_with(char::is_whitespace) {
                trim_last_text(&mut tokens);
                rest = after;
            }
        }

        tokens.push(Token::Open);
        let (remaining, trim) = lex_action(rest, &mut tokens)?;
        rest = remaining;
        trim_next = trim;
    }

    Ok(tokens)
}

fn push_text(tokens: &mut Vec<Token>, text: &str, trim_start: bool) {
    let text = if trim_start { text.trim_start() } else { text };
    if !text.is_empty() {
        tokens.push(Token::Text(text.to_string()));
    }
}

fn trim_last_text(tokens: &mut Vec<Token>) {
    if let Some(Token::Text(text)) = tokens.last_mut() {
        let len = text.trim_end().len();
        text.truncate(len);
        if text.is_empty() {
            tokens.pop();
        }
    }
}

/// Lex one action body. Returns the source after `}}` and whether the
/// action ended with a right trim marker.
fn lex_action<'a>(
    mut rest: &'a str,
    tokens: &mut Vec<Token>,
) -> Result<(&'a str, bool), TemplateError> {
    loop {
        let trimmed = rest.trim_start();
        let spaced = trimmed.len() < rest.len();
        rest = trimmed;

        if let Some(after) = rest.strip_prefix("-}}").filter(|_| spaced) {
            tokens.push(Token::Close);
            return Ok((after, true));
        }
        if let Some(after) = rest.strip_prefix(CLOSE) {
            tokens.push(Token::Close);
            return Ok((after, false));
        }

        let Some(c) = rest.chars().next() else {
            return Err(TemplateError::Parse("unclosed action".to_string()));
        };

        rest = match c {
            '(' => {
                tokens.push(Token::LParen);
                &rest[1..]
            }
            ')' => {
                tokens.push(Token::RParen);
                &rest[1..]
            }
            '|' => {
                tokens.push(Token::Pipe);
                &rest[1..]
            }
            '"' => {
                let (s, after) = quoted(&rest[1..])?;
                tokens.push(Token::Str(s));
                after
            }
            '`' => {
                let body = &rest[1..];
                let end = body.find('`').ok_or_else(|| {
                    TemplateError::Parse("unterminated raw quoted string".to_string())
                })?;
                tokens.push(Token::Str(body[..end].to_string()));
                &body[end + 1..]
            }
            '.' => {
                let (field, after) = word(&rest[1..]);
                if field.is_empty() {
                    return Err(TemplateError::Parse(
                        "unexpected . in action".to_string(),
                    ));
                }
                tokens.push(Token::Field(field.to_string()));
                after
            }
            c if c.is_alphabetic() || c == '_' => {
                let (ident, after) = word(rest);
                tokens.push(Token::Ident(ident.to_string()));
                after
            }
            other => {
                return Err(TemplateError::Parse(format!(
                    "unexpected {:?} in action",
                    other
                )))
            }
        };
    }
}

fn word(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(s.len());
    (&s[..end], &s[end..])
}

/// Read a double-quoted string body (opening quote already consumed).
fn quoted(s: &str) -> Result<(String, &str), TemplateError> {
    let mut out = String::new();
    let mut chars = s.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((out, &s[i + 1..])),
            '\\' => match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 't')) => out.push('\t'),
                Some((_, '\\')) => out.push('\\'),
                Some((_, '"')) => out.push('"'),
                Some((_, other)) => {
                    return Err(TemplateError::Parse(format!(
                        "unknown escape sequence: \\{}",
                        other
                    )))
                }
                None => break,
            },
            '\n' => break,
            c => out.push(c),
        }
    }

    Err(TemplateError::Parse("unterminated quoted string".to_string()))
}
