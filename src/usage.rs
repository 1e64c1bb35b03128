/*!
Rendering of the usage message.

```text
Usage: sample --host=String [options] ... filename ...
Options:
  -h, --host    host name (String)
  -p, --port    port number (Integral [=80])
      --gzip    gzip when transfer
```
 */

use core::fmt::{self, Display};

use indent_write::fmt::IndentWriter;
use lazy_format::lazy_format;
use textwrap::core::display_width;

use crate::option::OptionSpec;

/// Options are indented by this much
const INDENT: &str = "  ";

/// Width of the `-s, ` prefix, which is replaced by spaces for options with
/// no short name
const SHORT_WIDTH: usize = 4;

/// Space between the longest option name and the descriptions
const GUTTER: usize = 4;

/// A renderable usage message. This is a pure function of the declared
/// options; it doesn't depend on anything that was parsed.
#[derive(Debug, Clone)]
pub struct Usage<'a, I> {
    pub program: &'a str,
    pub footer: &'a str,
    pub options: I,

    /// If given, descriptions are wrapped so that lines fit this many columns
    pub wrap_width: Option<usize>,
}

impl<'a, I> Usage<'a, I>
where
    I: Iterator<Item = &'a OptionSpec> + Clone,
{
    pub fn new(program: &'a str, footer: &'a str, options: I) -> Self {
        Self {
            program,
            footer,
            options,
            wrap_width: None,
        }
    }

    #[must_use]
    pub fn wrapped(self, wrap_width: Option<usize>) -> Self {
        Self { wrap_width, ..self }
    }
}

fn write_option(
    out: &mut impl fmt::Write,
    option: &OptionSpec,
    name_width: usize,
    wrap_width: Option<usize>,
) -> fmt::Result {
    let tags = lazy_format!(match (option.short()) {
        Some(short) => "-{short}, ",
        None => "    ",
    });

    let name = option.name();
    let padding = name_width + GUTTER - display_width(name);
    write!(out, "{tags}--{name}{:padding$}", "")?;

    let description = option.description();

    // Column at which descriptions start, counting the indentation added by
    // the enclosing IndentWriter
    let column = INDENT.len() + SHORT_WIDTH + 2 + name_width + GUTTER;

    match wrap_width {
        Some(width) if width > column && display_width(description) > width - column => {
            let lines = textwrap::wrap(description, width - column);
            let mut lines = lines.iter();

            if let Some(first) = lines.next() {
                write!(out, "{first}")?;
            }

            let continuation = column - INDENT.len();
            lines.try_for_each(|line| write!(out, "\n{:continuation$}{line}", ""))?;

            writeln!(out)
        }
        _ => writeln!(out, "{description}"),
    }
}

impl<'a, I> Display for Usage<'a, I>
where
    I: Iterator<Item = &'a OptionSpec> + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let required = self.options.clone().filter(|option| option.is_required());
        let required = lazy_format!(
            "{synopsis} " for synopsis in required.clone().map(|option| option.synopsis())
        );

        write!(f, "Usage: {} {required}[options] ...", self.program)?;

        if !self.footer.is_empty() {
            write!(f, " {}", self.footer)?;
        }

        writeln!(f)?;
        writeln!(f, "Options:")?;

        let name_width = self
            .options
            .clone()
            .map(|option| display_width(option.name()))
            .max()
            .unwrap_or(0);

        let mut out = IndentWriter::new(INDENT, &mut *f);

        self.options
            .clone()
            .try_for_each(|option| write_option(&mut out, option, name_width, self.wrap_width))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        option::Requirement,
        reader::{DefaultReader, one_of, range},
        registry::Registry,
    };

    fn sample() -> Registry {
        let mut registry = Registry::new();

        registry
            .insert(OptionSpec::valued(
                "host",
                Some('h'),
                "host name",
                Requirement::Mandatory,
                String::new(),
                DefaultReader,
            ))
            .unwrap();
        registry
            .insert(OptionSpec::valued(
                "port",
                Some('p'),
                "port number",
                Requirement::Optional,
                80,
                range(1, 65535),
            ))
            .unwrap();
        registry
            .insert(OptionSpec::valued(
                "type",
                Some('t'),
                "protocol type",
                Requirement::Optional,
                "http".to_owned(),
                one_of(["http", "https", "ssh", "ftp"].map(String::from)),
            ))
            .unwrap();
        registry
            .insert(OptionSpec::flag("gzip", None, "gzip when transfer"))
            .unwrap();
        registry
            .insert(OptionSpec::flag("help", Some('?'), "print this message"))
            .unwrap();

        registry
    }

    #[test]
    fn renders_sample() {
        let registry = sample();
        let usage = Usage::new("sample", "filename ...", registry.iter()).to_string();

        assert_eq!(
            usage,
            "\
Usage: sample --host=String [options] ... filename ...
Options:
  -h, --host    host name (String)
  -p, --port    port number (Integral [=80])
  -t, --type    protocol type (String [=\"http\"])
      --gzip    gzip when transfer
  -?, --help    print this message
"
        );
    }

    #[test]
    fn empty_registry() {
        let registry = Registry::new();
        let usage = Usage::new("prog", "", registry.iter()).to_string();

        assert_eq!(usage, "Usage: prog [options] ...\nOptions:\n");
    }

    #[test]
    fn wraps_long_descriptions() {
        let mut registry = Registry::new();
        registry
            .insert(OptionSpec::flag(
                "verbose",
                Some('v'),
                "print a great deal of extra information about what is happening",
            ))
            .unwrap();

        let usage = Usage::new("prog", "", registry.iter())
            .wrapped(Some(44))
            .to_string();

        assert_eq!(
            usage,
            "\
Usage: prog [options] ...
Options:
  -v, --verbose    print a great deal of
                   extra information about
                   what is happening
"
        );
    }

    #[test]
    fn short_descriptions_are_not_wrapped() {
        let registry = sample();
        let plain = Usage::new("sample", "", registry.iter()).to_string();
        let wrapped = Usage::new("sample", "", registry.iter())
            .wrapped(Some(80))
            .to_string();

        assert_eq!(plain, wrapped);
    }
}
