//! Parser turning template tokens into a node tree.

use std::iter::Peekable;
use std::vec::IntoIter;

use super::funcs::Builtin;
use super::lexer::Token;
use crate::error::TemplateError;

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Node {
    Text(String),
    Action(Pipeline),
    If {
        branches: Vec<(Pipeline, Vec<Node>)>,
        otherwise: Vec<Node>,
    },
}

/// Commands joined by `|`; each result feeds the next as its last argument.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Pipeline(pub Vec<Command>);

#[derive(Debug, Clone, PartialEq)]
pub(super) struct Command(pub Vec<Operand>);

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Operand {
    Field(Field),
    Str(String),
    Bool(bool),
    Func(Builtin),
    Sub(Pipeline),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Field {
    Name,
    Value,
}

/// What ended a node list.
enum Stop {
    Eof,
    Else,
    ElseIf(Pipeline),
    End,
}

pub(super) fn parse(tokens: Vec<Token>) -> Result<Vec<Node>, TemplateError> {
    let mut parser = Parser {
        tokens: tokens.into_iter().peekable(),
    };

    let (nodes, stop) = parser.list()?;
    match stop {
        Stop::Eof => Ok(nodes),
        Stop::End => Err(parse_error("unexpected {{end}}")),
        Stop::Else | Stop::ElseIf(_) => Err(parse_error("unexpected {{else}}")),
    }
}

fn parse_error(msg: impl Into<String>) -> TemplateError {
    TemplateError::Parse(msg.into())
}

fn unexpected(token: &Token) -> TemplateError {
    parse_error(format!("unexpected {:?}", token))
}

struct Parser {
    tokens: Peekable<IntoIter<Token>>,
}

impl Parser {
    fn peek_keyword(&mut self, keyword: &str) -> bool {
        matches!(self.tokens.peek(), Some(Token::Ident(w)) if w == keyword)
    }

    fn list(&mut self) -> Result<(Vec<Node>, Stop), TemplateError> {
        let mut nodes = Vec::new();

        while let Some(token) = self.tokens.next() {
            match token {
                Token::Text(text) => nodes.push(Node::Text(text)),
                Token::Open if self.peek_keyword("if") => {
                    self.tokens.next();
                    nodes.push(self.conditional()?);
                }
                Token::Open if self.peek_keyword("end") => {
                    self.tokens.next();
                    self.expect_close()?;
                    return Ok((nodes, Stop::End));
                }
                Token::Open if self.peek_keyword("else") => {
                    self.tokens.next();
                    if self.peek_keyword("if") {
                        self.tokens.next();
                        let cond = self.pipeline()?;
                        self.expect_close()?;
                        return Ok((nodes, Stop::ElseIf(cond)));
                    }
                    self.expect_close()?;
                    return Ok((nodes, Stop::Else));
                }
                Token::Open => {
                    let pipeline = self.pipeline()?;
                    self.expect_close()?;
                    nodes.push(Node::Action(pipeline));
                }
                other => return Err(unexpected(&other)),
            }
        }

        Ok((nodes, Stop::Eof))
    }

    fn conditional(&mut self) -> Result<Node, TemplateError> {
        let mut cond = self.pipeline()?;
        self.expect_close()?;
        let mut branches = Vec::new();

        loop {
            let (body, stop) = self.list()?;
            branches.push((cond, body));
            match stop {
                Stop::End => {
                    return Ok(Node::If {
                        branches,
                        otherwise: Vec::new(),
                    })
                }
                Stop::ElseIf(next) => cond = next,
                Stop::Else => {
                    let (otherwise, stop) = self.list()?;
                    return match stop {
                        Stop::End => Ok(Node::If {
                            branches,
                            otherwise,
                        }),
                        Stop::Eof => Err(parse_error("unexpected EOF: missing {{end}}")),
                        Stop::Else | Stop::ElseIf(_) => {
                            Err(parse_error("expected {{end}}, found {{else}}"))
                        }
                    };
                }
                Stop::Eof => return Err(parse_error("unexpected EOF: missing {{end}}")),
            }
        }
    }

    fn pipeline(&mut self) -> Result<Pipeline, TemplateError> {
        let mut commands = vec![self.command()?];
        while matches!(self.tokens.peek(), Some(Token::Pipe)) {
            self.tokens.next();
            commands.push(self.command()?);
        }
        Ok(Pipeline(commands))
    }

    fn command(&mut self) -> Result<Command, TemplateError> {
        let mut operands = Vec::new();

        loop {
            match self.tokens.peek() {
                None | Some(Token::Close) | Some(Token::RParen) | Some(Token::Pipe) => break,
                _ => {}
            }
            let Some(token) = self.tokens.next() else {
                break;
            };
            operands.push(self.operand(token)?);
        }

        if operands.is_empty() {
            return Err(parse_error("missing value for command"));
        }
        Ok(Command(operands))
    }

    fn operand(&mut self, token: Token) -> Result<Operand, TemplateError> {
        match token {
            Token::Ident(word) => match word.as_str() {
                "true" => Ok(Operand::Bool(true)),
                "false" => Ok(Operand::Bool(false)),
                name => Builtin::lookup(name)
                    .map(Operand::Func)
                    .ok_or_else(|| parse_error(format!("function {:?} not defined", name))),
            },
            Token::Field(field) => match field.as_str() {
                "Name" => Ok(Operand::Field(Field::Name)),
                "Value" => Ok(Operand::Field(Field::Value)),
                other => Err(parse_error(format!("can't evaluate field {}", other))),
            },
            Token::Str(s) => Ok(Operand::Str(s)),
            Token::LParen => {
                let pipeline = self.pipeline()?;
                match self.tokens.next() {
                    Some(Token::RParen) => Ok(Operand::Sub(pipeline)),
                    _ => Err(parse_error("unclosed left paren")),
                }
            }
            other => Err(unexpected(&other)),
        }
    }

    fn expect_close(&mut self) -> Result<(), TemplateError> {
        match self.tokens.next() {
            Some(Token::Close) => Ok(()),
            Some(other) => Err(unexpected(&other)),
            None => Err(parse_error("unclosed action")),
        }
    }
}
