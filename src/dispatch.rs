/*!
The dispatcher: feeds the classified command line from an
[`ArgumentsParser`] into the options of a [`Registry`], then checks that every
required option was given.
 */

use argot_parser::{ArgAccess, ArgumentsParser, Visitor};
use tracing::trace;

use crate::{
    errors::ParseError,
    option::{OptionSpec, SetError},
    registry::{Registry, ShortError},
};

/// Everything a single dispatch produced, apart from the option values
/// themselves (which are stored in the registry).
#[derive(Debug, Default)]
pub(crate) struct Dispatched {
    pub errors: Vec<ParseError>,
    pub rest: Vec<String>,
}

struct Dispatcher<'a> {
    registry: &'a mut Registry,
    out: Dispatched,
}

/// Attach the option's context to an error from applying it
fn describe_failure(spec: &OptionSpec, error: SetError, value: Option<&str>) -> ParseError {
    let name = spec.name().to_owned();
    let value = value.unwrap_or_default().to_owned();

    match error {
        SetError::NeedsValue => ParseError::OptionNeedsValue { name },
        SetError::UnexpectedValue => ParseError::UnexpectedValue { name, value },
        SetError::Invalid(reason) => ParseError::InvalidOptionValue {
            name,
            value,
            reason,
        },
    }
}

/// Apply an occurrence of `spec`. Flags ignore `argument` entirely, so the
/// next command line argument stays available.
fn apply<'arg>(spec: &mut OptionSpec, argument: impl ArgAccess<'arg>) -> Result<(), ParseError> {
    let value = match spec.takes_value() {
        true => argument.take(),
        false => None,
    };

    let result = match value {
        None => spec.set_present(),
        Some(value) => spec.set_value(value),
    };

    result.map_err(|error| describe_failure(spec, error, value))
}

impl Dispatcher<'_> {
    #[inline]
    fn record(&mut self, result: Result<(), ParseError>) {
        if let Err(error) = result {
            trace!(%error, "recorded error");
            self.out.errors.push(error);
        }
    }
}

impl<'arg> Visitor<'arg> for &mut Dispatcher<'_> {
    type Value = ();

    fn visit_positional(self, argument: &'arg str) {
        trace!(argument, "positional");
        self.out.rest.push(argument.to_owned());
    }

    fn visit_long_option(self, option: &'arg str, argument: &'arg str) {
        trace!(option, argument, "long option with value");

        let result = match self.registry.get_mut(option) {
            None => Err(ParseError::UndefinedOption {
                name: option.to_owned(),
            }),
            Some(spec) => spec
                .set_value(argument)
                .map_err(|error| describe_failure(spec, error, Some(argument))),
        };

        self.record(result)
    }

    fn visit_long(self, option: &'arg str, arg: impl ArgAccess<'arg>) {
        trace!(option, "long option");

        let result = match self.registry.get_mut(option) {
            None => Err(ParseError::UndefinedOption {
                name: option.to_owned(),
            }),
            Some(spec) => apply(spec, arg),
        };

        self.record(result)
    }

    fn visit_short(self, option: char, arg: impl ArgAccess<'arg>) {
        trace!(%option, "short option");

        let result = match self.registry.short_lookup().resolve(option) {
            Err(ShortError::Undefined) => Err(ParseError::UndefinedShortOption { short: option }),
            Err(ShortError::Ambiguous) => Err(ParseError::AmbiguousShortOption { short: option }),
            Ok(index) => match self.registry.get_index_mut(index) {
                Some(spec) => apply(spec, arg),
                None => Err(ParseError::UndefinedShortOption { short: option }),
            },
        };

        self.record(result)
    }
}

/// Run every argument through the registry, then check for missing
/// required options. Errors never stop the scan: every argument is
/// processed, and every problem is reported.
pub(crate) fn dispatch<'arg, I>(
    registry: &mut Registry,
    mut arguments: ArgumentsParser<'arg, I>,
) -> Dispatched
where
    I: Iterator<Item = &'arg str>,
{
    let mut dispatcher = Dispatcher {
        registry,
        out: Dispatched::default(),
    };

    while arguments.next_arg(&mut dispatcher).is_some() {}

    let Dispatcher { registry, mut out } = dispatcher;

    out.errors.extend(
        registry
            .iter()
            .filter(|spec| !spec.is_satisfied())
            .map(|spec| ParseError::MissingRequiredOption {
                name: spec.name().to_owned(),
            }),
    );

    out
}
