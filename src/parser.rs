use crate::{
    error::{Error, Result},
    tokenizer::{Token, TokenKind},
};
use log::debug;
use std::fmt::{self, Display, Formatter};

/// A single binary operation: `left operator right`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Expression {
    pub left: f64,
    pub operator: BinaryOp,
    pub right: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    FloorDivide,
    Modulo,
    Power,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 7] = [
        BinaryOp::Add,
        BinaryOp::Subtract,
        BinaryOp::Multiply,
        BinaryOp::Divide,
        BinaryOp::FloorDivide,
        BinaryOp::Modulo,
        BinaryOp::Power,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::FloorDivide => "//",
            BinaryOp::Modulo => "%",
            BinaryOp::Power => "**",
        }
    }

    /// Operators that reject a zero right operand.
    pub fn divides(self) -> bool {
        matches!(
            self,
            BinaryOp::Divide | BinaryOp::FloorDivide | BinaryOp::Modulo
        )
    }

    fn from_token(kind: &TokenKind) -> Option<BinaryOp> {
        match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Subtract),
            TokenKind::Star => Some(BinaryOp::Multiply),
            TokenKind::Slash => Some(BinaryOp::Divide),
            TokenKind::SlashSlash => Some(BinaryOp::FloorDivide),
            TokenKind::Percent => Some(BinaryOp::Modulo),
            TokenKind::StarStar => Some(BinaryOp::Power),
            TokenKind::Number(_) | TokenKind::EOF => None,
        }
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}

pub fn parse(tokens: &[Token]) -> Result<Expression> {
    assert!(
        tokens.last().is_some_and(|t| t.kind == TokenKind::EOF),
        "Token slice must be terminated by EOF"
    );

    let (left, consumed) = parse_operand(tokens)?;
    let rest = &tokens[consumed..];

    let operator = rest
        .first()
        .and_then(|token| BinaryOp::from_token(&token.kind))
        .ok_or_else(|| parser_error(rest, "expected an operator"))?;
    let rest = &rest[1..];

    let (right, consumed) = parse_operand(rest)?;
    let rest = &rest[consumed..];

    match rest {
        [Token {
            kind: TokenKind::EOF,
            ..
        }] => Ok(Expression {
            left,
            operator,
            right,
        }),
        _ => Err(parser_error(rest, "unexpected trailing input")),
    }
}

/// An operand is a number, optionally preceded by a `-` that touches it.
fn parse_operand(tokens: &[Token]) -> Result<(f64, usize)> {
    match tokens {
        [Token {
            kind: TokenKind::Number(n),
            ..
        }, ..] => Ok((*n, 1)),
        [sign @ Token {
            kind: TokenKind::Minus,
            ..
        }, Token {
            kind: TokenKind::Number(n),
            byte_span,
        }, ..]
            if sign.byte_span.end == byte_span.start =>
        {
            Ok((-n, 2))
        }
        _ => Err(parser_error(tokens, "expected a number")),
    }
}

fn parser_error(rest: &[Token], message: &str) -> Error {
    let at = rest.first().map_or(0, |t| t.byte_span.start);
    debug!("{} at byte {}", message, at);
    Error::MalformedExpression
}
