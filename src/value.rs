/*!
The type-erased storage for option values, and the [`OptionValue`] trait
that connects it to the concrete Rust types an option can be declared with.
 */

use core::{
    fmt::{self, Display},
    str::FromStr,
};

/// The broad kind of value an option holds. This is what's shown to users in
/// usage messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Integral,
    FloatingPoint,
    String,
}

impl Category {
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Category::Integral => "Integral",
            Category::FloatingPoint => "FloatingPoint",
            Category::String => "String",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed option value, with the concrete type erased.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
}

impl Value {
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            Value::Int(_) | Value::UInt(_) => Category::Integral,
            Value::Float(_) => Category::FloatingPoint,
            Value::Str(_) => Category::String,
        }
    }
}

/**
Types that can be the value of an option.

This is implemented for the primitive integers, `f32`, `f64`, and [`String`],
and deliberately for nothing else: an option can only be declared with a type
that the usage message knows how to describe. Each type converts losslessly
into and back out of a [`Value`].
*/
pub trait OptionValue: FromStr + Display + Clone + 'static {
    const CATEGORY: Category;

    fn into_value(self) -> Value;

    /// Recover the typed value. Returns `None` if `value` wasn't created from
    /// this type.
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! option_value {
    ($(
        $variant:ident as $storage:ident ($category:ident): $($type:ident)*;
    )*) => {
        $($(
            impl OptionValue for $type {
                const CATEGORY: Category = Category::$category;

                #[inline]
                fn into_value(self) -> Value {
                    Value::$variant(self.into())
                }

                #[inline]
                fn from_value(value: &Value) -> Option<Self> {
                    match *value {
                        Value::$variant(value) => option_value!(@narrow $storage $type value),
                        _ => None,
                    }
                }
            }
        )*)*
    };

    (@narrow f64 $type:ident $value:ident) => { Some($value as $type) };
    (@narrow $storage:ident $type:ident $value:ident) => { $type::try_from($value).ok() };
}

option_value! {
    Int as i64 (Integral): i8 i16 i32 i64;
    UInt as u64 (Integral): u8 u16 u32 u64;
    Float as f64 (FloatingPoint): f32 f64;
}

// `isize` and `usize` have no lossless `From` into the 64 bit storage types
impl OptionValue for isize {
    const CATEGORY: Category = Category::Integral;

    #[inline]
    fn into_value(self) -> Value {
        Value::Int(self as i64)
    }

    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::Int(value) => isize::try_from(value).ok(),
            _ => None,
        }
    }
}

impl OptionValue for usize {
    const CATEGORY: Category = Category::Integral;

    #[inline]
    fn into_value(self) -> Value {
        Value::UInt(self as u64)
    }

    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::UInt(value) => usize::try_from(value).ok(),
            _ => None,
        }
    }
}

impl OptionValue for String {
    const CATEGORY: Category = Category::String;

    #[inline]
    fn into_value(self) -> Value {
        Value::Str(self)
    }

    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(value) => Some(value.clone()),
            _ => None,
        }
    }
}
