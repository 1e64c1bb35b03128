#![no_std]

/*!
Low-level implementation of argument handling. Takes care of splitting a
shell-like command line into arguments and of the distinctions between long
options, short option clusters, and positionals. No type handling happens
here. Usually this is too low level to use directly.
*/

extern crate alloc;

mod cluster;
mod tokenize;

use cluster::Cluster;

pub use tokenize::{TokenizeError, tokenize};

/**
The [`ArgumentsParser`] type operates by passing arguments it finds into a
[`Visitor`], to be handled.
 */
pub trait Visitor<'arg> {
    type Value;

    /// A positional parameter.
    fn visit_positional(self, argument: &'arg str) -> Self::Value;

    /// A long option that definitely has an argument, because it was given
    /// as `--option=argument`
    fn visit_long_option(self, option: &'arg str, argument: &'arg str) -> Self::Value;

    /// A long option or flag, such as `--option`
    fn visit_long(self, option: &'arg str, arg: impl ArgAccess<'arg>) -> Self::Value;

    /// A short option or flag, such as `-o`, or one of the options in a
    /// cluster like `-abc`
    fn visit_short(self, option: char, arg: impl ArgAccess<'arg>) -> Self::Value;
}

/**
[`ArgAccess`] allows a visitor to decide if a given parameter needs an argument,
based on the identity of the flag or option.

Consider `--foo bar`. Is this a pair of parameters (the flag `--foo` and the
positional parameter `bar`) or a single option `--foo bar` that takes an
argument? The [`ArgumentsParser`] can't independently classify a given
argument, so instead, a visitor can request an argument via this trait only for
options that need them.

In a cluster like `-abc`, only `c` can receive an argument (the command line
argument following the cluster); `a` and `b` always get `None`.
*/
pub trait ArgAccess<'arg>: Sized {
    /**
    Get an argument from the parser. This should only be called by options that
    need it; flags should simply ignore it, to ensure that the next command
    line argument can correctly be parsed independently.

    This returns [`None`] if all of the CLI arguments have been exhausted, if
    the option isn't the last one in its cluster, or if the next argument is
    the `--` terminator.
    */
    fn take(self) -> Option<&'arg str>;
}

#[derive(Debug, Clone, Copy)]
enum State<'arg> {
    Ready,
    PositionalOnly,
    ShortInProgress(Cluster<'arg>),
}

/**
An `ArgumentsParser` is the main entry point into `argot_parser`. It parses
arguments in each call to `next_arg`, sending those arguments to the given
[`Visitor`]. It handles distinguishing flags, options, and positionals; logic
related to how options get their argument values, and the `--` terminator.

`argot_parser` operates entirely on borrowed data. The ubiquitous `'arg`
lifetime refers to this borrowed command line data.
*/
#[derive(Debug, Clone)]
pub struct ArgumentsParser<'arg, I> {
    state: State<'arg>,
    terminator: bool,
    args: I,
}

impl<'arg, I> ArgumentsParser<'arg, I>
where
    I: Iterator<Item = &'arg str>,
{
    /**
    Create a new [`ArgumentsParser`] from an iterator of strings, where
    each string is a single argument received from the command line. This
    list should *exclude* the name of the program, which is commonly passed as
    the first argument in the list.
     */
    #[inline]
    #[must_use]
    pub fn new(args: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            state: State::Ready,
            terminator: true,
            args: args.into_iter(),
        }
    }

    /// Enable or disable the `--` terminator. When disabled, `--` is treated
    /// as a long option with an empty name.
    #[inline]
    #[must_use]
    pub fn with_terminator(self, terminator: bool) -> Self {
        Self { terminator, ..self }
    }

    /// Put `self` into a `PositionalOnly` state, then process a positional
    /// argument
    #[inline]
    fn positional_only_arg<V>(&mut self, visitor: V) -> Option<V::Value>
    where
        V: Visitor<'arg>,
    {
        debug_assert!(!matches!(self.state, State::ShortInProgress(_)));

        self.state = State::PositionalOnly;
        self.args.next().map(|arg| visitor.visit_positional(arg))
    }

    /// Put `self` into a `Ready` state, then return a StandardArgAccess
    #[inline]
    fn standard_arg(&mut self) -> StandardArgAccess<'_, 'arg, I> {
        debug_assert!(!matches!(self.state, State::PositionalOnly));

        self.state = State::Ready;
        StandardArgAccess { parent: self }
    }

    /// Handle one option of a short cluster. If there are more options after
    /// it in the cluster, it can't take an argument, and the rest of the
    /// cluster is saved for the next call; otherwise the next command line
    /// argument is its candidate argument.
    #[inline]
    fn handle_short<V>(&mut self, cluster: Cluster<'arg>, visitor: V) -> V::Value
    where
        V: Visitor<'arg>,
    {
        let (option, rest) = cluster.split_first();

        match Cluster::new(rest) {
            None => visitor.visit_short(option, self.standard_arg()),
            Some(rest) => {
                self.state = State::ShortInProgress(rest);
                visitor.visit_short(option, ClusteredArgAccess)
            }
        }
    }

    pub fn next_arg<V>(&mut self, visitor: V) -> Option<V::Value>
    where
        V: Visitor<'arg>,
    {
        match self.state {
            State::Ready => match self.args.next()? {
                "--" if self.terminator => self.positional_only_arg(visitor),
                argument => Some(match argument.strip_prefix("--") {
                    Some(option) => match split_once(option, b'=') {
                        Some((option, argument)) => visitor.visit_long_option(option, argument),
                        None => visitor.visit_long(option, self.standard_arg()),
                    },
                    None => match argument.strip_prefix('-').and_then(Cluster::new) {
                        Some(cluster) => self.handle_short(cluster, visitor),
                        // Includes a lone `-`, conventionally meaning stdin
                        None => visitor.visit_positional(argument),
                    },
                }),
            },
            State::PositionalOnly => self.positional_only_arg(visitor),
            State::ShortInProgress(cluster) => Some(self.handle_short(cluster, visitor)),
        }
    }
}

/// ArgAccess implementation that gets the next argument from the list.
/// Handles logic around `--` PositionalOnly parameters.
struct StandardArgAccess<'a, 'arg, I> {
    parent: &'a mut ArgumentsParser<'arg, I>,
}

impl<'arg, I> ArgAccess<'arg> for StandardArgAccess<'_, 'arg, I>
where
    I: Iterator<Item = &'arg str>,
{
    fn take(self) -> Option<&'arg str> {
        match self.parent.args.next()? {
            "--" if self.parent.terminator => {
                self.parent.state = State::PositionalOnly;
                None
            }
            arg => Some(arg),
        }
    }
}

/// ArgAccess implementation for an option in the middle of a cluster, which
/// never gets an argument.
struct ClusteredArgAccess;

impl<'arg> ArgAccess<'arg> for ClusteredArgAccess {
    #[inline]
    fn take(self) -> Option<&'arg str> {
        None
    }
}

fn split_once(input: &str, delimiter: u8) -> Option<(&str, &str)> {
    // The delimiter is ASCII, so both sides are still valid UTF-8
    memchr::memchr(delimiter, input.as_bytes()).map(|i| (&input[..i], &input[i + 1..]))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::{format, string::String, vec::Vec};

    use super::*;

    /// Records every event as a readable string, and takes an argument for
    /// any option named `value` or `v`.
    struct Recorder<'a>(&'a mut Vec<String>);

    impl<'arg> Visitor<'arg> for Recorder<'_> {
        type Value = ();

        fn visit_positional(self, argument: &'arg str) {
            self.0.push(format!("positional {argument}"));
        }

        fn visit_long_option(self, option: &'arg str, argument: &'arg str) {
            self.0.push(format!("--{option}={argument}"));
        }

        fn visit_long(self, option: &'arg str, arg: impl ArgAccess<'arg>) {
            let event = match option {
                "value" => format!("--{option} {:?}", arg.take()),
                _ => format!("--{option}"),
            };
            self.0.push(event);
        }

        fn visit_short(self, option: char, arg: impl ArgAccess<'arg>) {
            let event = match option {
                'v' => format!("-{option} {:?}", arg.take()),
                _ => format!("-{option}"),
            };
            self.0.push(event);
        }
    }

    fn events(args: &[&str], terminator: bool) -> Vec<String> {
        let mut events = Vec::new();
        let mut parser = ArgumentsParser::new(args.iter().copied()).with_terminator(terminator);

        while parser.next_arg(Recorder(&mut events)).is_some() {}

        events
    }

    #[test]
    fn long_forms() {
        assert_eq!(
            events(&["--flag", "--value", "x", "--name=a=b", "input"], true),
            [
                "--flag",
                "--value Some(\"x\")",
                "--name=a=b",
                "positional input"
            ]
        );
    }

    #[test]
    fn long_option_without_value_at_end() {
        assert_eq!(events(&["--value"], true), ["--value None"]);
    }

    #[test]
    fn cluster_only_last_gets_argument() {
        assert_eq!(
            events(&["-avb", "x", "-bv", "y"], true),
            ["-a", "-v None", "-b", "positional x", "-b", "-v Some(\"y\")"]
        );
    }

    #[test]
    fn lone_dash_is_positional() {
        assert_eq!(events(&["-", "a"], true), ["positional -", "positional a"]);
    }

    #[test]
    fn terminator_forces_positionals() {
        assert_eq!(
            events(&["-a", "--", "--flag", "-b", "--"], true),
            ["-a", "positional --flag", "positional -b", "positional --"]
        );
    }

    #[test]
    fn terminator_is_not_an_argument() {
        assert_eq!(
            events(&["--value", "--", "-a"], true),
            ["--value None", "positional -a"]
        );
    }

    #[test]
    fn disabled_terminator_is_an_empty_long() {
        assert_eq!(
            events(&["--", "--value", "--"], false),
            ["--", "--value Some(\"--\")"]
        );
    }

    #[test]
    fn multibyte_shorts() {
        assert_eq!(events(&["-éa"], true), ["-é", "-a"]);
    }
}
