/*!
The declared options themselves. An [`OptionSpec`] is either a flag, which
is simply present or absent, or a valued option, which stores a typed value
(behind a [`Value`]) and the reader used to parse it.
 */

use core::{
    any::{self, TypeId},
    fmt::{self, Display},
};

use lazy_format::lazy_format;

use crate::{
    errors::LookupError,
    reader::{ReadError, Reader},
    value::{Category, OptionValue, Value},
};

/// Whether an option must appear on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Optional,
    Mandatory,
}

type ErasedReader = Box<dyn Fn(&str) -> Result<Value, ReadError> + Send + Sync>;

/// The reasons a single occurrence of an option can fail to apply. The
/// dispatcher attaches the context (option name, raw argument) to these.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SetError {
    /// A valued option appeared without an argument
    NeedsValue,

    /// A flag was given an argument
    UnexpectedValue,

    /// The reader rejected the argument
    Invalid(ReadError),
}

/// The value-carrying half of a valued option.
pub struct ValuedOption {
    default: Value,
    actual: Value,
    requirement: Requirement,
    category: Category,
    type_id: TypeId,
    type_name: &'static str,
    reader: ErasedReader,
}

impl ValuedOption {
    #[inline]
    #[must_use]
    pub fn default_value(&self) -> &Value {
        &self.default
    }

    /// The current value: the default, or the last value successfully read
    /// during the most recent parse.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.actual
    }

    #[inline]
    #[must_use]
    pub fn requirement(&self) -> Requirement {
        self.requirement
    }

    #[inline]
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// The name of the Rust type this option was declared with
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for ValuedOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValuedOption")
            .field("default", &self.default)
            .field("actual", &self.actual)
            .field("requirement", &self.requirement)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub enum OptionKind {
    /// `--verbose`; never takes an argument
    Flag,

    /// `--port 80`; always takes an argument
    Valued(ValuedOption),
}

/// A single declared option.
#[derive(Debug)]
pub struct OptionSpec {
    name: String,
    short: Option<char>,
    description: String,
    kind: OptionKind,
    has_set: bool,
}

impl OptionSpec {
    pub fn flag(name: impl Into<String>, short: Option<char>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short,
            description: description.into(),
            kind: OptionKind::Flag,
            has_set: false,
        }
    }

    /// Create a valued option. The stored description is extended with the
    /// value's category and, for optional options, the default value, like
    /// `port number (Integral [=80])`.
    pub fn valued<T, R>(
        name: impl Into<String>,
        short: Option<char>,
        description: impl Display,
        requirement: Requirement,
        default: T,
        reader: R,
    ) -> Self
    where
        T: OptionValue,
        R: Reader<T> + Send + Sync + 'static,
    {
        let category = T::CATEGORY;

        let default_text = {
            let default = &default;

            lazy_format!(match (category) {
                Category::String => "\"{default}\"",
                _ => "{default}",
            })
        };

        let description = match requirement {
            Requirement::Mandatory => lazy_format!("{description} ({category})").to_string(),
            Requirement::Optional => {
                lazy_format!("{description} ({category} [={default_text}])").to_string()
            }
        };

        let default = default.into_value();

        Self {
            name: name.into(),
            short,
            description,
            kind: OptionKind::Valued(ValuedOption {
                actual: default.clone(),
                default,
                requirement,
                category,
                type_id: TypeId::of::<T>(),
                type_name: any::type_name::<T>(),
                reader: Box::new(move |raw: &str| reader.read(raw).map(T::into_value)),
            }),
            has_set: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn short(&self) -> Option<char> {
        self.short
    }

    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> &OptionKind {
        &self.kind
    }

    /// True if this option appeared (successfully) during the most recent
    /// parse.
    #[inline]
    #[must_use]
    pub fn has_set(&self) -> bool {
        self.has_set
    }

    #[inline]
    #[must_use]
    pub fn takes_value(&self) -> bool {
        matches!(self.kind, OptionKind::Valued(_))
    }

    #[inline]
    #[must_use]
    pub fn is_required(&self) -> bool {
        matches!(
            self.kind,
            OptionKind::Valued(ValuedOption {
                requirement: Requirement::Mandatory,
                ..
            })
        )
    }

    /// False only for a required option that hasn't been set.
    #[inline]
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        !self.is_required() || self.has_set
    }

    /// The form used in the usage line: `--name` or `--name=Category`
    pub fn synopsis(&self) -> impl Display + '_ {
        let name = &self.name;

        lazy_format!(match (self.kind) {
            OptionKind::Flag => "--{name}",
            OptionKind::Valued(ref valued) => ("--{name}={category}", category = valued.category),
        })
    }

    /// This option appeared without an argument.
    pub(crate) fn set_present(&mut self) -> Result<(), SetError> {
        match self.kind {
            OptionKind::Flag => {
                self.has_set = true;
                Ok(())
            }
            OptionKind::Valued(_) => Err(SetError::NeedsValue),
        }
    }

    /// This option appeared with an argument. On failure the current value is
    /// left untouched.
    pub(crate) fn set_value(&mut self, raw: &str) -> Result<(), SetError> {
        match self.kind {
            OptionKind::Flag => Err(SetError::UnexpectedValue),
            OptionKind::Valued(ref mut valued) => {
                valued.actual = (valued.reader)(raw).map_err(SetError::Invalid)?;
                self.has_set = true;
                Ok(())
            }
        }
    }

    /// Forget everything from the previous parse
    pub(crate) fn reset(&mut self) {
        self.has_set = false;

        if let OptionKind::Valued(ref mut valued) = self.kind {
            valued.actual = valued.default.clone();
        }
    }

    pub(crate) fn get<T: OptionValue>(&self) -> Result<T, LookupError> {
        let mismatch = |actual: &'static str| LookupError::TypeMismatch {
            name: self.name.clone(),
            requested: any::type_name::<T>(),
            actual,
        };

        match self.kind {
            OptionKind::Flag => Err(mismatch("flag")),
            OptionKind::Valued(ref valued) if valued.type_id != TypeId::of::<T>() => {
                Err(mismatch(valued.type_name))
            }
            OptionKind::Valued(ref valued) => {
                T::from_value(&valued.actual).ok_or_else(|| mismatch(valued.type_name))
            }
        }
    }
}
