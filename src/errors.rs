/*!
Error types for every stage of [`argot`][crate]: declaring options, parsing a
command line, and reading values back out afterwards.
 */

use argot_parser::TokenizeError;

use crate::reader::ReadError;

/// An option couldn't be declared. The registry is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("multiple definition: {0}")]
    Duplicate(String),

    #[error("option names can't be empty")]
    EmptyName,
}

/// A problem with the command line. During a parse these are collected,
/// rather than returned, so that every problem can be reported at once.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// There wasn't even a program name
    #[error("argument number must be longer than 0")]
    NoArguments,

    /// The command line string couldn't be split into arguments
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    #[error("undefined option: --{name}")]
    UndefinedOption { name: String },

    #[error("undefined short option: -{short}")]
    UndefinedShortOption { short: char },

    /// More than one option was declared with this short name
    #[error("ambiguous short options: -{short}")]
    AmbiguousShortOption { short: char },

    /// A valued option appeared without a value, either at the end of the
    /// command line or in the middle of a short option cluster
    #[error("option needs value: --{name}")]
    OptionNeedsValue { name: String },

    /// A flag was given a value with `--flag=value`
    #[error("option doesn't take a value: --{name}={value}")]
    UnexpectedValue { name: String, value: String },

    #[error("option value is invalid: --{name}={value} ({reason})")]
    InvalidOptionValue {
        name: String,
        value: String,
        reason: ReadError,
    },

    #[error("need option: --{name}")]
    MissingRequiredOption { name: String },
}

/// An option's value couldn't be retrieved after parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("there is no flag: --{0}")]
    UnknownOption(String),

    #[error("type mismatch flag '{name}': requested {requested}, but it holds {actual}")]
    TypeMismatch {
        name: String,
        requested: &'static str,
        actual: &'static str,
    },
}

/// Returned by [`Parser::parse_checked`][crate::Parser::parse_checked] when
/// the program shouldn't continue. Each variant carries the rendered usage
/// message; it's up to the caller to print it and pick an exit code.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Rejection {
    /// `--help` was given, or the command line was empty and incomplete
    #[error("usage message was requested")]
    Help { usage: String },

    /// The command line had errors
    #[error("{}", .errors.first().map(ToString::to_string).unwrap_or_default())]
    Invalid {
        errors: Vec<ParseError>,
        usage: String,
    },
}

impl Rejection {
    #[must_use]
    pub fn usage(&self) -> &str {
        match self {
            Rejection::Help { usage } | Rejection::Invalid { usage, .. } => usage,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            RegistrationError::Duplicate("host".to_owned()).to_string(),
            "multiple definition: host"
        );
        assert_eq!(
            ParseError::from(TokenizeError::UnterminatedQuote).to_string(),
            "quote is not closed"
        );
        assert_eq!(
            ParseError::InvalidOptionValue {
                name: "port".to_owned(),
                value: "99999".to_owned(),
                reason: ReadError::OutOfRange {
                    value: "99999".to_owned(),
                    begin: "1".to_owned(),
                    end: "65535".to_owned(),
                },
            }
            .to_string(),
            "option value is invalid: --port=99999 (99999 is out of range 1..=65535)"
        );
        assert_eq!(
            LookupError::UnknownOption("nope".to_owned()).to_string(),
            "there is no flag: --nope"
        );
    }

    #[test]
    fn invalid_rejection_shows_first_error() {
        let rejection = Rejection::Invalid {
            errors: vec![
                ParseError::UndefinedShortOption { short: 'x' },
                ParseError::MissingRequiredOption {
                    name: "host".to_owned(),
                },
            ],
            usage: "Usage: prog".to_owned(),
        };

        assert_eq!(rejection.to_string(), "undefined short option: -x");
        assert_eq!(rejection.usage(), "Usage: prog");
    }
}
