//! Recursive-descent parser for formula text.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := '-' unary | primary
//! primary := number | operand | side '.' operand | func '(' expr (',' expr)+ ')' | '(' expr ')'
//! ```

use std::str::FromStr;

use super::{BinaryOp, Expr, FormulaError, Operand, Side};
use crate::stats::{Attribute, ResourceKind};

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Dot,
    Comma,
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(value) => value.to_string(),
            Token::Ident(name) => name.clone(),
            Token::Dot => ".".into(),
            Token::Comma => ",".into(),
            Token::Plus => "+".into(),
            Token::Minus => "-".into(),
            Token::Star => "*".into(),
            Token::Slash => "/".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
        }
    }
}

fn tokenize(source: &str) -> Result<Vec<(usize, Token)>, FormulaError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(offset, ch)) = chars.peek() {
        let token = match ch {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '0'..='9' => {
                let mut text = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_ascii_digit() || c == '.' {
                        text.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = text
                    .parse::<f64>()
                    .map_err(|_| FormulaError::InvalidNumber(text.clone()))?;
                tokens.push((offset, Token::Number(value)));
                continue;
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut text = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        text.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push((offset, Token::Ident(text)));
                continue;
            }
            '.' => Token::Dot,
            ',' => Token::Comma,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            found => return Err(FormulaError::UnexpectedChar { offset, found }),
        };
        chars.next();
        tokens.push((offset, token));
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    position: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position).map(|(_, token)| token)
    }

    fn next(&mut self) -> Option<(usize, Token)> {
        let token = self.tokens.get(self.position).cloned();
        self.position += 1;
        token
    }

    fn expect(&mut self, expected: Token) -> Result<(), FormulaError> {
        match self.next() {
            Some((_, token)) if token == expected => Ok(()),
            Some((offset, token)) => Err(FormulaError::UnexpectedToken {
                offset,
                found: token.describe(),
            }),
            None => Err(FormulaError::UnexpectedEnd),
        }
    }

    fn expr(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.position += 1;
            let rhs = self.term()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn term(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                _ => return Ok(lhs),
            };
            self.position += 1;
            let rhs = self.unary()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn unary(&mut self) -> Result<Expr, FormulaError> {
        if self.peek() == Some(&Token::Minus) {
            self.position += 1;
            return Ok(Expr::Neg(Box::new(self.unary()?)));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr, FormulaError> {
        match self.next() {
            Some((_, Token::Number(value))) => Ok(Expr::Constant(value)),
            Some((_, Token::LParen)) => {
                let inner = self.expr()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Some((_, Token::Ident(name))) => match self.peek() {
                Some(Token::LParen) => self.call(name),
                Some(Token::Dot) => {
                    self.position += 1;
                    let side = side(&name)?;
                    match self.next() {
                        Some((_, Token::Ident(operand_name))) => {
                            Ok(Expr::Value(side, operand(&operand_name)?))
                        }
                        Some((offset, token)) => Err(FormulaError::UnexpectedToken {
                            offset,
                            found: token.describe(),
                        }),
                        None => Err(FormulaError::UnexpectedEnd),
                    }
                }
                _ => Ok(Expr::Value(Side::Attacker, operand(&name)?)),
            },
            Some((offset, token)) => Err(FormulaError::UnexpectedToken {
                offset,
                found: token.describe(),
            }),
            None => Err(FormulaError::UnexpectedEnd),
        }
    }

    fn call(&mut self, name: String) -> Result<Expr, FormulaError> {
        self.expect(Token::LParen)?;
        let mut args = vec![self.expr()?];
        while self.peek() == Some(&Token::Comma) {
            self.position += 1;
            args.push(self.expr()?);
        }
        self.expect(Token::RParen)?;

        if args.len() < 2 {
            return Err(FormulaError::Arity(name));
        }
        match name.as_str() {
            "min" => Ok(Expr::Min(args)),
            "max" => Ok(Expr::Max(args)),
            _ => Err(FormulaError::UnknownFunction(name)),
        }
    }
}

fn side(name: &str) -> Result<Side, FormulaError> {
    match name {
        "attacker" | "caster" | "self" => Ok(Side::Attacker),
        "defender" | "target" => Ok(Side::Defender),
        _ => Err(FormulaError::UnknownSide(name.to_owned())),
    }
}

fn operand(name: &str) -> Result<Operand, FormulaError> {
    match name {
        "missing_health" => return Ok(Operand::MissingHealth),
        "realm" => return Ok(Operand::RealmIndex),
        _ => {}
    }
    if let Ok(kind) = ResourceKind::from_str(name) {
        return Ok(Operand::Current(kind));
    }
    Attribute::from_str(name)
        .map(Operand::Attribute)
        .map_err(|_| FormulaError::UnknownOperand(name.to_owned()))
}

/// Parses formula text into an expression tree.
pub fn parse(source: &str) -> Result<Expr, FormulaError> {
    let mut parser = Parser {
        tokens: tokenize(source)?,
        position: 0,
    };
    let expr = parser.expr()?;
    match parser.next() {
        None => Ok(expr),
        Some((offset, token)) => Err(FormulaError::UnexpectedToken {
            offset,
            found: token.describe(),
        }),
    }
}
