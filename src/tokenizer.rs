use log::debug;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

use crate::error::{Error, Result};

// `\d` is any Unicode decimal digit (general category Nd)
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)?").expect("number pattern is valid"));
static DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d$").expect("digit pattern is valid"));

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub byte_span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    StarStar,
    SlashSlash,

    Number(f64),

    EOF,
}

/// Unicode whitespace plus the ASCII information separators (0x1C-0x1F).
pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let n = source.len();
    let mut cursor = 0;
    let mut tokens = Vec::with_capacity(4);

    loop {
        match next_token(&source[cursor..]) {
            Ok((skipped, bytes_read, TokenKind::EOF)) => {
                cursor += skipped + bytes_read;
                tokens.push(Token {
                    kind: TokenKind::EOF,
                    byte_span: cursor..cursor,
                });

                assert_eq!(cursor, n);

                return Ok(tokens);
            }
            Ok((skipped, bytes_read, kind)) => {
                let start = cursor + skipped;
                cursor = start + bytes_read;
                tokens.push(Token {
                    kind,
                    byte_span: start..cursor,
                });
            }
            Err(err) => {
                debug!("{} at byte {}", err, cursor);
                return Err(err);
            }
        }
    }
}

/// Returns the whitespace skipped, the length of the token and the token.
fn next_token(source: &str) -> Result<(usize, usize, TokenKind)> {
    let n = source.len();

    let cursor = source
        .char_indices()
        .find(|&(_, c)| !is_separator(c))
        .map_or(n, |(i, _)| i);

    if cursor == n {
        return Ok((cursor, 0, TokenKind::EOF));
    }

    let rest = &source[cursor..];

    // Two-byte operators win over their one-byte prefixes
    let token = match rest.as_bytes() {
        [b'*', b'*', ..] => Some(TokenKind::StarStar),
        [b'/', b'/', ..] => Some(TokenKind::SlashSlash),
        _ => None,
    };

    if let Some(token) = token {
        return Ok((cursor, 2, token));
    }

    let token = match rest.as_bytes()[0] {
        b'+' => Some(TokenKind::Plus),
        b'-' => Some(TokenKind::Minus),
        b'*' => Some(TokenKind::Star),
        b'/' => Some(TokenKind::Slash),
        b'%' => Some(TokenKind::Percent),
        _ => None,
    };

    if let Some(token) = token {
        return Ok((cursor, 1, token));
    }

    // `1.` leaves the `.` behind, which no rule accepts
    if let Some(m) = NUMBER.find(rest) {
        let number = m
            .as_str()
            .chars()
            .map(|c| if c == '.' { Some(c) } else { ascii_digit(c) })
            .collect::<Option<String>>()
            .and_then(|text| text.parse().ok())
            .ok_or(Error::MalformedExpression)?;

        return Ok((cursor, m.end(), TokenKind::Number(number)));
    }

    Err(Error::MalformedExpression)
}

fn is_decimal(c: char) -> bool {
    DIGIT.is_match(c.encode_utf8(&mut [0; 4]))
}

/// Maps any decimal digit to its ASCII form. Decimal digits are always
/// encoded as complete runs of zero through nine, so the value is the
/// offset into the surrounding run.
fn ascii_digit(c: char) -> Option<char> {
    if c.is_ascii_digit() {
        return Some(c);
    }
    if !is_decimal(c) {
        return None;
    }

    let mut zero = c as u32;
    while let Some(prev) = zero.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal(prev) {
            break;
        }
        zero -= 1;
    }

    char::from_digit((c as u32 - zero) % 10, 10)
}
