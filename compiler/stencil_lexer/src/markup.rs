//! Markup lexer.
//!
//! Turns the inner markup of one object or tag fragment into tokens. At each
//! position the candidates are tried in a fixed order:
//!
//! 1. comparison operators (`contains` only when not followed by a word byte)
//! 2. quoted strings (no escape processing)
//! 3. numbers: `-?digits(.digits)?`, the fraction deciding Integer vs Float
//! 4. identifiers: `[A-Za-z_][A-Za-z0-9_-]*`
//! 5. the `..` range operator
//! 6. single-byte punctuation
//!
//! Every token list ends with an [`TokenKind::EndOfString`] sentinel so
//! look-ahead past the last real token is always in bounds.

use crate::{LexError, LexErrorKind, Span, Token, TokenKind};

/// How the lexer treats a character that starts no token.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LexMode {
    /// Report an [`LexErrorKind::UnexpectedCharacter`] error.
    #[default]
    Strict,
    /// Skip the character and log a warning.
    Lax,
}

const COMPARISONS: [&str; 7] = ["==", "!=", "<>", "<=", ">=", "<", ">"];

#[inline]
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Lex `markup` into tokens.
///
/// Surrounding whitespace is trimmed once; whitespace between tokens is
/// skipped. Token spans are relative to `markup` (before trimming).
pub fn lex(markup: &str, mode: LexMode) -> Result<Vec<Token<'_>>, LexError> {
    let lead = markup.len() - markup.trim_start().len();
    let src = markup.trim();
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos].is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        let Some((kind, len)) = match_token(bytes, pos) else {
            let ch = src[pos..].chars().next().unwrap_or('\u{fffd}');
            let span = Span::new(pos, pos + ch.len_utf8()).offset_by(lead);
            let kind = if bytes[pos] == b'\'' || bytes[pos] == b'"' {
                LexErrorKind::UnterminatedString
            } else {
                LexErrorKind::UnexpectedCharacter { ch }
            };
            match mode {
                LexMode::Strict => return Err(LexError::new(kind, span)),
                LexMode::Lax => {
                    tracing::warn!(%ch, %span, markup, "skipping unrecognized character");
                    pos += ch.len_utf8();
                    continue;
                }
            }
        };

        tokens.push(Token::new(
            kind,
            &src[pos..pos + len],
            Span::new(pos, pos + len).offset_by(lead),
        ));
        pos += len;
    }

    let end = lead + src.len();
    tokens.push(Token::new(
        TokenKind::EndOfString,
        "",
        Span::new(end, end),
    ));
    Ok(tokens)
}

/// Match one token at `pos`, returning its kind and byte length.
fn match_token(bytes: &[u8], pos: usize) -> Option<(TokenKind, usize)> {
    let rest = &bytes[pos..];

    // 1. Comparisons.
    for op in COMPARISONS {
        if rest.starts_with(op.as_bytes()) {
            return Some((TokenKind::Comparison, op.len()));
        }
    }
    if rest.starts_with(b"contains") && !rest.get(8).copied().is_some_and(is_word_byte) {
        return Some((TokenKind::Comparison, 8));
    }

    // 2. Strings.
    if let quote @ (b'\'' | b'"') = rest[0] {
        return memchr::memchr(quote, &rest[1..]).map(|close| (TokenKind::String, close + 2));
    }

    // 3. Numbers.
    if let Some(number) = match_number(rest) {
        return Some(number);
    }

    // 4. Identifiers.
    if rest[0].is_ascii_alphabetic() || rest[0] == b'_' {
        let len = 1 + rest[1..].iter().take_while(|b| is_word_byte(**b)).count();
        return Some((TokenKind::Identifier, len));
    }

    // 5. Range.
    if rest.starts_with(b"..") {
        return Some((TokenKind::Range, 2));
    }

    // 6. Punctuation.
    TokenKind::punctuation(rest[0]).map(|kind| (kind, 1))
}

fn match_number(rest: &[u8]) -> Option<(TokenKind, usize)> {
    let sign = usize::from(rest[0] == b'-');
    let digits = rest[sign..].iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let int_len = sign + digits;
    if rest.get(int_len) == Some(&b'.') {
        let fraction = rest[int_len + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if fraction > 0 {
            return Some((TokenKind::Float, int_len + 1 + fraction));
        }
    }
    Some((TokenKind::Integer, int_len))
}
