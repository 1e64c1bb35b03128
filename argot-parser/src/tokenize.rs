/*!
Splitting of a single shell-like command line into separate arguments.

Only a small subset of shell syntax is understood: spaces separate
arguments, double quotes group text (spaces included) into one argument, and
a backslash copies the character after it literally, inside or outside of
quotes. The quote characters themselves never appear in the output.
 */

use alloc::{string::String, vec::Vec};
use core::{fmt, mem};

use memchr::{memchr2, memchr3};

/// A command line that can't be split into arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizeError {
    /// The input ended while a `"` was still open
    UnterminatedQuote,

    /// The input ended with a `\` that had nothing to escape
    TrailingEscape,
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizeError::UnterminatedQuote => write!(f, "quote is not closed"),
            TokenizeError::TrailingEscape => {
                write!(f, "unexpected occurrence of '\\' at end of string")
            }
        }
    }
}

impl core::error::Error for TokenizeError {}

/// The argument currently being assembled. An argument exists as soon as it
/// gets a character *or* a quote, so that `""` becomes an empty argument
/// while a run of spaces produces nothing.
#[derive(Debug, Default)]
struct Pending {
    text: String,
    started: bool,
}

impl Pending {
    #[inline]
    fn push_str(&mut self, s: &str) {
        self.started = true;
        self.text.push_str(s);
    }

    #[inline]
    fn push(&mut self, c: char) {
        self.started = true;
        self.text.push(c);
    }

    #[inline]
    fn flush_into(&mut self, tokens: &mut Vec<String>) {
        if mem::take(&mut self.started) {
            tokens.push(mem::take(&mut self.text));
        }
    }
}

/**
Split `input` into arguments.

```
use argot_parser::tokenize;

assert_eq!(
    tokenize(r#"host "a b" c"#).unwrap(),
    ["host", "a b", "c"],
);
assert_eq!(tokenize(r"a\ b").unwrap(), ["a b"]);
assert!(tokenize(r#""unterminated"#).is_err());
```
 */
pub fn tokenize(input: &str) -> Result<Vec<String>, TokenizeError> {
    let mut tokens = Vec::new();
    let mut pending = Pending::default();
    let mut in_quote = false;
    let mut rest = input;

    loop {
        let bytes = rest.as_bytes();
        let special = match in_quote {
            true => memchr2(b'"', b'\\', bytes),
            false => memchr3(b'"', b' ', b'\\', bytes),
        };

        let Some(index) = special else {
            if !rest.is_empty() {
                pending.push_str(rest);
            }
            break;
        };

        if index > 0 {
            pending.push_str(&rest[..index]);
        }

        // All the special characters are ASCII, so `index + 1` is always a
        // char boundary.
        let tail = &rest[index + 1..];

        rest = match bytes[index] {
            b'"' => {
                in_quote = !in_quote;
                pending.started = true;
                tail
            }
            b' ' => {
                pending.flush_into(&mut tokens);
                tail
            }
            _ => {
                let mut chars = tail.chars();
                pending.push(chars.next().ok_or(TokenizeError::TrailingEscape)?);
                chars.as_str()
            }
        };
    }

    if in_quote {
        return Err(TokenizeError::UnterminatedQuote);
    }

    pending.flush_into(&mut tokens);
    Ok(tokens)
}
