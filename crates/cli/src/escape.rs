// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Quoted literal decoding.
//!
//! Rule files spell patterns and replacements as C-style double-quoted
//! literals. Decoding is byte-oriented: anything that is not a backslash or
//! the closing quote is copied verbatim, so rule files need not be UTF-8.
//!
//! Escapes are tried in a fixed order after the backslash:
//! 1. `\xHH` - exactly two hex digits.
//! 2. `\OO` or `\OOO` - two octal digits, plus a third only when the first
//!    digit is `0`-`3` (keeps the value within a byte).
//! 3. One of `0 \ a b f n r t v ' "`.
//!
//! Anything else is a [`EscapeError::MalformedEscape`]. Note that a lone
//! `\1`..`\7` is malformed: only `\0` has a single-character form.

/// Error while decoding a quoted literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EscapeError {
    /// A backslash was not followed by a recognized escape.
    #[error("malformed escape at `{}`", String::from_utf8_lossy(.remainder))]
    MalformedEscape {
        /// Unconsumed input starting at the offending backslash.
        remainder: Vec<u8>,
    },

    /// Input ended before the closing quote.
    #[error("unterminated string literal")]
    UnterminatedString,
}

/// Decode a double-quoted literal at the start of `input`.
///
/// Returns the decoded bytes and the number of input bytes consumed,
/// including both quotes. Returns `Ok(None)` if `input` does not start with
/// `"`, since that is not a literal at all.
pub fn decode_literal(input: &[u8]) -> Result<Option<(Vec<u8>, usize)>, EscapeError> {
    let Some((&b'"', _)) = input.split_first() else {
        return Ok(None);
    };

    let mut out = Vec::new();
    let mut pos = 1;

    while let Some(&byte) = input.get(pos) {
        match byte {
            b'"' => return Ok(Some((out, pos + 1))),
            b'\\' => {
                let (value, len) =
                    decode_escape(&input[pos + 1..]).ok_or_else(|| EscapeError::MalformedEscape {
                        remainder: input[pos..].to_vec(),
                    })?;
                out.push(value);
                pos += 1 + len;
            }
            _ => {
                out.push(byte);
                pos += 1;
            }
        }
    }

    Err(EscapeError::UnterminatedString)
}

/// Decode the escape body following a backslash.
///
/// Returns the byte value and the number of body bytes consumed.
fn decode_escape(body: &[u8]) -> Option<(u8, usize)> {
    hex_escape(body)
        .or_else(|| octal_escape(body))
        .or_else(|| reserved_escape(body))
}

fn hex_escape(body: &[u8]) -> Option<(u8, usize)> {
    match body {
        [b'x', hi, lo, ..] => {
            let hi = hex_value(*hi)?;
            let lo = hex_value(*lo)?;
            Some((hi << 4 | lo, 3))
        }
        _ => None,
    }
}

fn octal_escape(body: &[u8]) -> Option<(u8, usize)> {
    let (d0, d1) = match body {
        [d0, d1, ..] => (octal_value(*d0)?, octal_value(*d1)?),
        _ => return None,
    };
    let value = d0 << 3 | d1;

    // d0 <= 3 keeps the three-digit form within a byte.
    if d0 <= 3 {
        if let Some(d2) = body.get(2).copied().and_then(octal_value) {
            return Some((value << 3 | d2, 3));
        }
    }
    Some((value, 2))
}

fn reserved_escape(body: &[u8]) -> Option<(u8, usize)> {
    let value = match body.first()? {
        b'0' => 0x00,
        b'a' => 0x07,
        b'b' => 0x08,
        b'f' => 0x0c,
        b'n' => b'\n',
        b'r' => b'\r',
        b't' => b'\t',
        b'v' => 0x0b,
        c @ (b'\\' | b'\'' | b'"') => *c,
        _ => return None,
    };
    Some((value, 1))
}

fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fn octal_value(c: u8) -> Option<u8> {
    matches!(c, b'0'..=b'7').then(|| c - b'0')
}

#[cfg(test)]
#[path = "escape_tests.rs"]
mod tests;
