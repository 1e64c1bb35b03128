/*!
[`Parser`] ties everything together: it owns the declared options and the
settings, runs parses, and holds the results of the most recent parse.
 */

use core::fmt::Display;

use argot_parser::{ArgumentsParser, tokenize};
use joinery::JoinableIterator;
use tracing::{debug, warn};

use crate::{
    dispatch::{Dispatched, dispatch},
    errors::{LookupError, ParseError, RegistrationError, Rejection},
    option::{OptionSpec, Requirement},
    reader::{DefaultReader, Reader},
    registry::Registry,
    settings::Settings,
    usage::Usage,
    value::OptionValue,
};

/**
A set of declared options, plus the outcome of the most recent parse.

Options are declared up front with [`add_flag`][Parser::add_flag],
[`add_option`][Parser::add_option], and
[`add_option_with`][Parser::add_option_with]. Each call to
[`parse`][Parser::parse] starts from scratch: every option is reset to its
default and the previous errors and positional arguments are discarded.

```
use argot::{Parser, Requirement, range};

let mut parser = Parser::new();
parser
    .add_option::<String>("host", Some('h'), "host name", Requirement::Mandatory, String::new())?
    .add_option_with("port", Some('p'), "port number", Requirement::Optional, 80, range(1, 65535))?
    .add_flag("gzip", None, "gzip when transfer")?;

assert!(parser.parse(["prog", "--host", "example.com", "-p", "8080", "file"]));
assert_eq!(parser.get::<String>("host")?, "example.com");
assert_eq!(parser.get::<i32>("port")?, 8080);
assert_eq!(parser.exists("gzip")?, false);
assert_eq!(parser.rest(), ["file"]);
# Ok::<(), Box<dyn std::error::Error>>(())
```
 */
#[derive(Debug, Default)]
pub struct Parser {
    registry: Registry,
    settings: Settings,
    errors: Vec<ParseError>,
    rest: Vec<String>,

    /// The first argument of the most recent parse
    argv0: Option<String>,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Set the program name shown in the usage message, instead of the first
    /// command line argument.
    pub fn set_program_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.settings.program_name = Some(name.into());
        self
    }

    /// Set the text shown at the end of the usage line
    pub fn set_footer(&mut self, footer: impl Into<String>) -> &mut Self {
        self.settings.footer = footer.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[inline]
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Declare a flag: an option without a value, which is either present or
    /// absent.
    pub fn add_flag(
        &mut self,
        name: impl Into<String>,
        short: Option<char>,
        description: impl Into<String>,
    ) -> Result<&mut Self, RegistrationError> {
        self.registry
            .insert(OptionSpec::flag(name, short, description))?;
        Ok(self)
    }

    /// Declare an option with a value of type `T`, parsed with its
    /// [`FromStr`][core::str::FromStr] implementation.
    pub fn add_option<T>(
        &mut self,
        name: impl Into<String>,
        short: Option<char>,
        description: impl Display,
        requirement: Requirement,
        default: T,
    ) -> Result<&mut Self, RegistrationError>
    where
        T: OptionValue,
        T::Err: Display,
    {
        self.add_option_with(name, short, description, requirement, default, DefaultReader)
    }

    /// Declare an option with a value of type `T`, parsed and validated by
    /// `reader`.
    pub fn add_option_with<T, R>(
        &mut self,
        name: impl Into<String>,
        short: Option<char>,
        description: impl Display,
        requirement: Requirement,
        default: T,
        reader: R,
    ) -> Result<&mut Self, RegistrationError>
    where
        T: OptionValue,
        R: Reader<T> + Send + Sync + 'static,
    {
        self.registry.insert(OptionSpec::valued(
            name,
            short,
            description,
            requirement,
            default,
            reader,
        ))?;
        Ok(self)
    }

    /// Forget everything from the previous parse
    fn clear(&mut self) {
        self.errors.clear();
        self.rest.clear();
        self.registry.reset();
    }

    fn finish(&self) -> bool {
        debug!(
            errors = self.errors.len(),
            rest = self.rest.len(),
            "finished parse"
        );

        self.errors.is_empty()
    }

    /**
    Parse a command line. The first argument is the program name, and the
    rest are options and positional arguments. Returns true if there were no
    errors; otherwise, the errors are available from
    [`errors`][Parser::errors].

    Parsing never stops at the first problem: every argument is examined, so
    that every error can be reported.
     */
    pub fn parse<I>(&mut self, args: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<I::Item> = args.into_iter().collect();

        self.clear();

        let Some((program, args)) = args.split_first() else {
            self.errors.push(ParseError::NoArguments);
            return self.finish();
        };

        self.argv0 = Some(program.as_ref().to_owned());

        let arguments = ArgumentsParser::new(args.iter().map(|arg| arg.as_ref()))
            .with_terminator(self.settings.end_of_options);

        let Dispatched { errors, rest } = dispatch(&mut self.registry, arguments);
        self.errors = errors;
        self.rest = rest;

        self.finish()
    }

    /// Split `line` into arguments, the way a shell would, then parse them.
    /// If `line` can't be split, that's the only error reported.
    pub fn parse_line(&mut self, line: &str) -> bool {
        self.parse_line_counted(line).1
    }

    /// [`parse_line`][Parser::parse_line], also returning the number of
    /// arguments `line` was split into (0 if it couldn't be split).
    fn parse_line_counted(&mut self, line: &str) -> (usize, bool) {
        match tokenize(line) {
            Ok(args) => (args.len(), self.parse(&args)),
            Err(error) => {
                self.clear();
                self.errors.push(error.into());
                (0, self.finish())
            }
        }
    }

    /// Make sure there's a `--help` flag to check for
    fn ensure_help(&mut self) {
        if self.registry.contains("help") {
            return;
        }

        if let Err(error) = self.add_flag("help", Some('?'), "print this message") {
            warn!(%error, "couldn't declare the help flag");
        }
    }

    fn check(&self, arg_count: usize, ok: bool) -> Result<(), Rejection> {
        let help = self.exists("help").unwrap_or(false);

        if help || (arg_count == 1 && !ok) {
            return Err(Rejection::Help {
                usage: self.usage(),
            });
        }

        match ok {
            true => Ok(()),
            false => Err(Rejection::Invalid {
                errors: self.errors.clone(),
                usage: self.usage(),
            }),
        }
    }

    /**
    Parse a command line, with the conventional help handling of a command
    line program. A `help` flag (`--help` / `-?`) is declared, if there isn't
    one already. Then:

    - If help was requested, or if the command line has no arguments beyond
      the program name and parsing failed (usually because of a missing
      required option), returns [`Rejection::Help`].
    - If parsing failed, returns [`Rejection::Invalid`].

    Printing the usage message and exiting are left to the caller.
     */
    pub fn parse_checked<I>(&mut self, args: I) -> Result<(), Rejection>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.ensure_help();

        let args: Vec<I::Item> = args.into_iter().collect();
        let ok = self.parse(&args);
        self.check(args.len(), ok)
    }

    /// Like [`parse_checked`][Parser::parse_checked], for a command line in a
    /// single string.
    pub fn parse_line_checked(&mut self, line: &str) -> Result<(), Rejection> {
        self.ensure_help();

        let (arg_count, ok) = self.parse_line_counted(line);
        self.check(arg_count, ok)
    }

    /// Get the value of an option, as the type it was declared with. This
    /// is the default if the option didn't appear in the most recent parse.
    pub fn get<T: OptionValue>(&self, name: &str) -> Result<T, LookupError> {
        self.option(name)
            .ok_or_else(|| LookupError::UnknownOption(name.to_owned()))?
            .get()
    }

    /// Check if an option appeared in the most recent parse.
    pub fn exists(&self, name: &str) -> Result<bool, LookupError> {
        self.option(name)
            .map(OptionSpec::has_set)
            .ok_or_else(|| LookupError::UnknownOption(name.to_owned()))
    }

    #[inline]
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&OptionSpec> {
        self.registry.get(name)
    }

    /// All declared options, in declaration order
    #[inline]
    pub fn options(&self) -> impl Iterator<Item = &OptionSpec> + Clone + '_ {
        self.registry.iter()
    }

    /// Every error from the most recent parse, in the order they were found
    #[inline]
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// The first error from the most recent parse
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&ParseError> {
        self.errors.first()
    }

    /// Every error from the most recent parse, one per line.
    #[must_use]
    pub fn all_errors(&self) -> String {
        match self.errors.is_empty() {
            true => String::new(),
            false => format!("{}\n", self.errors.iter().join_with('\n')),
        }
    }

    /// The positional arguments from the most recent parse
    #[inline]
    #[must_use]
    pub fn rest(&self) -> &[String] {
        &self.rest
    }

    /// Render the usage message
    #[must_use]
    pub fn usage(&self) -> String {
        let program = self
            .settings
            .program_name
            .as_deref()
            .or(self.argv0.as_deref())
            .unwrap_or_default();

        Usage::new(program, &self.settings.footer, self.registry.iter())
            .wrapped(self.settings.wrap_width)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use argot_parser::TokenizeError;
    use pretty_assertions::assert_eq;

    use super::*;

    fn parser() -> Parser {
        let mut parser = Parser::new();

        parser
            .add_option::<String>(
                "host",
                Some('h'),
                "host name",
                Requirement::Mandatory,
                String::new(),
            )
            .unwrap()
            .add_flag("gzip", Some('z'), "gzip when transfer")
            .unwrap();

        parser
    }

    #[test]
    fn no_arguments() {
        let mut parser = parser();

        assert!(!parser.parse(Vec::<String>::new()));
        assert_eq!(parser.errors(), [ParseError::NoArguments]);
    }

    #[test]
    fn tokenize_error_is_the_only_error() {
        let mut parser = parser();

        assert!(!parser.parse_line("prog --host \"example.com"));
        assert_eq!(
            parser.errors(),
            [ParseError::Tokenize(TokenizeError::UnterminatedQuote)]
        );
    }

    #[test]
    fn all_errors_one_per_line() {
        let mut parser = parser();

        assert!(parser.parse(["prog", "-h", "example.com"]));
        assert_eq!(parser.all_errors(), "");

        assert!(!parser.parse(["prog", "-x", "--gzip=yes"]));
        assert_eq!(
            parser.all_errors(),
            "undefined short option: -x\n\
             option doesn't take a value: --gzip=yes\n\
             need option: --host\n"
        );
        assert_eq!(
            parser.error(),
            Some(&ParseError::UndefinedShortOption { short: 'x' })
        );
    }

    #[test]
    fn program_name_comes_from_first_argument() {
        let mut parser = parser();

        assert!(parser.usage().starts_with("Usage:  --host=String [options] ..."));

        parser.parse(["./client"]);
        assert!(parser.usage().starts_with("Usage: ./client --host=String"));

        parser.set_program_name("client");
        parser.parse(["./other"]);
        assert!(parser.usage().starts_with("Usage: client --host=String"));
    }

    #[test]
    fn terminator_can_be_disabled() {
        let mut parser = Parser::with_settings(Settings {
            end_of_options: false,
            ..Settings::default()
        });
        parser.add_flag("gzip", None, "").unwrap();

        assert!(!parser.parse(["prog", "--", "--gzip"]));
        assert_eq!(
            parser.errors(),
            [ParseError::UndefinedOption {
                name: String::new()
            }]
        );
        assert_eq!(parser.exists("gzip"), Ok(true));
    }

    #[test]
    fn help_is_declared_once() {
        let mut parser = parser();

        assert_eq!(parser.parse_checked(["prog", "-h", "example.com"]), Ok(()));
        assert_eq!(parser.parse_checked(["prog", "-h", "example.com"]), Ok(()));
        assert_eq!(
            parser.options().filter(|option| option.name() == "help").count(),
            1
        );
        assert_eq!(parser.option("help").unwrap().short(), Some('?'));
    }

    #[test]
    fn empty_line_asks_for_help() {
        let mut parser = parser();

        assert!(matches!(
            parser.parse_line_checked("prog"),
            Err(Rejection::Help { .. })
        ));
        assert!(matches!(
            parser.parse_line_checked("prog -z"),
            Err(Rejection::Invalid { .. })
        ));
    }

    #[test]
    fn unsplittable_line_is_invalid() {
        let mut parser = parser();

        assert_eq!(parser.parse_line_counted("prog -h \"a b\" x"), (4, true));
        assert_eq!(parser.parse_line_counted("prog \"x"), (0, false));

        let Err(Rejection::Invalid { errors, .. }) = parser.parse_line_checked("prog \"x") else {
            panic!("unsplittable line wasn't rejected as invalid");
        };
        assert_eq!(
            errors,
            [ParseError::Tokenize(TokenizeError::UnterminatedQuote)]
        );
    }
}
