//! Filter dispatch and the standard filter set.
//!
//! A filter maps an input value and already evaluated arguments to a new
//! value. Filters are looked up by name in a [`FilterRegistry`] at render
//! time; the registry is configuration, never global state.

use crate::error::{argument_error, wrong_arg_count, wrong_arg_type};
use crate::RenderError;
use rustc_hash::FxHashMap;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use stencil_value::Data;

/// A named value transformation usable as `{{ value | name: args }}`.
pub trait Filter: Send + Sync {
    fn apply(&self, input: &Data, args: &[Data]) -> Result<Data, RenderError>;
}

impl<F> Filter for F
where
    F: Fn(&Data, &[Data]) -> Result<Data, RenderError> + Send + Sync,
{
    fn apply(&self, input: &Data, args: &[Data]) -> Result<Data, RenderError> {
        self(input, args)
    }
}

/// Name to filter mapping.
#[derive(Clone, Default)]
pub struct FilterRegistry {
    filters: FxHashMap<String, Arc<dyn Filter>>,
}

impl FilterRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the standard filters.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("append", append);
        registry.register("prepend", prepend);
        registry.register("upcase", upcase);
        registry.register("downcase", downcase);
        registry.register("capitalize", capitalize);
        registry.register("strip", strip);
        registry.register("size", size);
        registry.register("first", first);
        registry.register("last", last);
        registry.register("join", join);
        registry.register("reverse", reverse);
        registry.register("plus", plus);
        registry.register("minus", minus);
        registry.register("times", times);
        registry.register("default", default);
        registry.register("replace", replace);
        registry
    }

    /// Add or replace the filter called `name`.
    pub fn register(&mut self, name: impl Into<String>, filter: impl Filter + 'static) {
        self.filters.insert(name.into(), Arc::new(filter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Filter> {
        self.filters.get(name).map(|filter| &**filter)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.filters.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("FilterRegistry")
            .field("filters", &names)
            .finish()
    }
}

// Argument helpers

fn arity(filter: &str, args: &[Data], min: usize, max: usize) -> Result<(), RenderError> {
    if (min..=max).contains(&args.len()) {
        return Ok(());
    }
    let expected = if min == max {
        min.to_string()
    } else {
        format!("{min} to {max}")
    };
    Err(wrong_arg_count(filter, &expected, args.len()))
}

fn string_of<'d>(filter: &str, value: &'d Data) -> Result<Cow<'d, str>, RenderError> {
    value
        .coerce_string()
        .ok_or_else(|| wrong_arg_type(filter, "a string", value.type_name()))
}

// String filters

fn append(input: &Data, args: &[Data]) -> Result<Data, RenderError> {
    arity("append", args, 1, 1)?;
    let mut out = string_of("append", input)?.into_owned();
    out.push_str(&string_of("append", &args[0])?);
    Ok(Data::String(out))
}

fn prepend(input: &Data, args: &[Data]) -> Result<Data, RenderError> {
    arity("prepend", args, 1, 1)?;
    let mut out = string_of("prepend", &args[0])?.into_owned();
    out.push_str(&string_of("prepend", input)?);
    Ok(Data::String(out))
}

fn upcase(input: &Data, args: &[Data]) -> Result<Data, RenderError> {
    arity("upcase", args, 0, 0)?;
    Ok(Data::String(string_of("upcase", input)?.to_uppercase()))
}

fn downcase(input: &Data, args: &[Data]) -> Result<Data, RenderError> {
    arity("downcase", args, 0, 0)?;
    Ok(Data::String(string_of("downcase", input)?.to_lowercase()))
}

fn capitalize(input: &Data, args: &[Data]) -> Result<Data, RenderError> {
    arity("capitalize", args, 0, 0)?;
    let text = string_of("capitalize", input)?;
    let mut chars = text.chars();
    let out = match chars.next() {
        Some(head) => head.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    Ok(Data::String(out))
}

fn strip(input: &Data, args: &[Data]) -> Result<Data, RenderError> {
    arity("strip", args, 0, 0)?;
    Ok(Data::from(string_of("strip", input)?.trim()))
}

fn replace(input: &Data, args: &[Data]) -> Result<Data, RenderError> {
    arity("replace", args, 1, 2)?;
    let text = string_of("replace", input)?;
    let from = string_of("replace", &args[0])?;
    let to = match args.get(1) {
        Some(to) => string_of("replace", to)?,
        None => Cow::Borrowed(""),
    };
    if from.is_empty() {
        return Ok(Data::String(text.into_owned()));
    }
    Ok(Data::String(text.replace(from.as_ref(), &to)))
}

// Collection filters

fn size(input: &Data, args: &[Data]) -> Result<Data, RenderError> {
    arity("size", args, 0, 0)?;
    Ok(match input {
        Data::String(_) | Data::Array(_) | Data::Hash(_) => input.member("size").into_owned(),
        _ => Data::Int(0),
    })
}

fn first(input: &Data, args: &[Data]) -> Result<Data, RenderError> {
    arity("first", args, 0, 0)?;
    Ok(input.as_array().and_then(<[Data]>::first).cloned().unwrap_or_default())
}

fn last(input: &Data, args: &[Data]) -> Result<Data, RenderError> {
    arity("last", args, 0, 0)?;
    Ok(input.as_array().and_then(<[Data]>::last).cloned().unwrap_or_default())
}

fn join(input: &Data, args: &[Data]) -> Result<Data, RenderError> {
    arity("join", args, 0, 1)?;
    let separator = match args.first() {
        Some(sep) => string_of("join", sep)?,
        None => Cow::Borrowed(" "),
    };
    let items = input
        .as_array()
        .ok_or_else(|| wrong_arg_type("join", "an array", input.type_name()))?;
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(&separator);
        }
        out.push_str(&item.to_string());
    }
    Ok(Data::String(out))
}

fn reverse(input: &Data, args: &[Data]) -> Result<Data, RenderError> {
    arity("reverse", args, 0, 0)?;
    let items = input
        .as_array()
        .ok_or_else(|| wrong_arg_type("reverse", "an array", input.type_name()))?;
    Ok(Data::Array(items.iter().rev().cloned().collect()))
}

fn default(input: &Data, args: &[Data]) -> Result<Data, RenderError> {
    arity("default", args, 1, 1)?;
    let blank = match input {
        Data::Nil | Data::Bool(false) => true,
        Data::String(s) => s.is_empty(),
        Data::Array(items) => items.is_empty(),
        _ => false,
    };
    Ok(if blank { args[0].clone() } else { input.clone() })
}

// Math filters

#[derive(Copy, Clone)]
enum Number {
    Int(i64),
    Float(f64),
}

fn number(filter: &str, value: &Data) -> Result<Number, RenderError> {
    match value {
        Data::Nil => Ok(Number::Int(0)),
        Data::Int(n) => Ok(Number::Int(*n)),
        Data::Float(x) => Ok(Number::Float(*x)),
        Data::String(s) => {
            let s = s.trim();
            if let Ok(n) = s.parse() {
                Ok(Number::Int(n))
            } else if let Ok(x) = s.parse() {
                Ok(Number::Float(x))
            } else {
                Err(argument_error(filter, format!("`{s}` is not a number")))
            }
        }
        other => Err(wrong_arg_type(filter, "a number", other.type_name())),
    }
}

#[allow(clippy::cast_precision_loss, reason = "numeric promotion")]
fn arithmetic(
    filter: &str,
    input: &Data,
    args: &[Data],
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Data, RenderError> {
    arity(filter, args, 1, 1)?;
    match (number(filter, input)?, number(filter, &args[0])?) {
        (Number::Int(a), Number::Int(b)) => int_op(a, b)
            .map(Data::Int)
            .ok_or_else(|| argument_error(filter, "integer overflow")),
        (Number::Int(a), Number::Float(b)) => Ok(Data::Float(float_op(a as f64, b))),
        (Number::Float(a), Number::Int(b)) => Ok(Data::Float(float_op(a, b as f64))),
        (Number::Float(a), Number::Float(b)) => Ok(Data::Float(float_op(a, b))),
    }
}

fn plus(input: &Data, args: &[Data]) -> Result<Data, RenderError> {
    arithmetic("plus", input, args, i64::checked_add, |a, b| a + b)
}

fn minus(input: &Data, args: &[Data]) -> Result<Data, RenderError> {
    arithmetic("minus", input, args, i64::checked_sub, |a, b| a - b)
}

fn times(input: &Data, args: &[Data]) -> Result<Data, RenderError> {
    arithmetic("times", input, args, i64::checked_mul, |a, b| a * b)
}
