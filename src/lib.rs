/*!
`argot` is a small declarative command line options parser.

Options are declared on a [`Parser`] by name, with an optional short
alias, a description, and (for options that take a value) a type, a
default, and a [`Reader`] that parses and validates the raw argument. The
parser then turns a command line into typed values, a list of leftover
positional arguments, and a list of every problem it found. It can also
render a usage message describing the declared options.

```
use argot::{Parser, Requirement, one_of};

let mut parser = Parser::new();
parser
    .add_option_with(
        "type",
        Some('t'),
        "protocol type",
        Requirement::Optional,
        "http".to_owned(),
        one_of(["http", "https"].map(String::from)),
    )?
    .add_flag("gzip", None, "gzip when transfer")?;

assert!(!parser.parse_line("client -t gopher --gzip"));
assert_eq!(
    parser.all_errors(),
    "option value is invalid: --type=gopher (\"gopher\" is not an allowed value)\n",
);
assert_eq!(parser.get::<String>("type")?, "http");
assert!(parser.exists("gzip")?);
# Ok::<(), Box<dyn std::error::Error>>(())
```
 */

mod dispatch;
pub mod errors;
pub mod option;
pub mod parser;
pub mod reader;
pub mod registry;
pub mod settings;
pub mod usage;
pub mod value;

pub use argot_parser::{TokenizeError, tokenize};

pub use crate::{
    errors::{LookupError, ParseError, RegistrationError, Rejection},
    option::{OptionKind, OptionSpec, Requirement},
    parser::Parser,
    reader::{DefaultReader, OneOfReader, RangeReader, ReadError, Reader, one_of, range},
    settings::Settings,
    value::{Category, OptionValue, Value},
};
