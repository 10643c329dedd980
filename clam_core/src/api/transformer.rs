use std::str::FromStr;
use thiserror::Error;

/// A converted option value, as stored in the [`Manifest`](crate::Manifest).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The raw token, unconverted.
    Text(String),
    /// A signed integer.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// A boolean.
    Boolean(bool),
}

impl Value {
    /// The text, if this is a [`Value::Text`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The integer, if this is a [`Value::Integer`].
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(integer) => Some(*integer),
            _ => None,
        }
    }

    /// The float, if this is a [`Value::Float`].
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(float) => Some(*float),
            _ => None,
        }
    }

    /// The boolean, if this is a [`Value::Boolean`].
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(boolean) => Some(*boolean),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Text(text) => write!(f, "{text}"),
            Value::Integer(integer) => write!(f, "{integer}"),
            Value::Float(float) => write!(f, "{float}"),
            Value::Boolean(boolean) => write!(f, "{boolean}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

/// The reason a [`Transformer`] refused a raw value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransformError {
    /// The token does not parse as the target type.
    #[error("cannot convert '{token}' to {type_name}.")]
    InvalidConversion {
        /// The raw token.
        token: String,
        /// The target type.
        type_name: &'static str,
    },
    /// The token parsed, but the transformer rejected it.
    #[error("cannot accept '{token}': {message}.")]
    Rejected {
        /// The raw token.
        token: String,
        /// Why it was rejected.
        message: String,
    },
}

impl TransformError {
    /// Reject a token with a custom message.
    pub fn rejected(token: impl Into<String>, message: impl Into<String>) -> Self {
        TransformError::Rejected {
            token: token.into(),
            message: message.into(),
        }
    }
}

/// Behaviour to convert the raw value of a parameter option into a [`Value`].
///
/// Invoked once per accumulated value.
/// Implemented for any `Fn(&str) -> Result<Value, TransformError>`, so closures may be used as custom transformers.
///
/// ### Example
/// ```
/// # use clam_core as clam;
/// use clam::{CliOption, TransformError, Value};
///
/// let option = CliOption::parameter("port").transformer(|raw: &str| {
///     match raw.parse::<u16>() {
///         Ok(port) if port >= 1024 => Ok(Value::Integer(port as i64)),
///         _ => Err(TransformError::rejected(raw, "expected an unprivileged port")),
///     }
/// });
/// assert!(option.has_transformer());
/// ```
pub trait Transformer: Send + Sync {
    /// Convert `raw`, or explain why it cannot be converted.
    fn transform(&self, raw: &str) -> Result<Value, TransformError>;
}

impl<F> Transformer for F
where
    F: Fn(&str) -> Result<Value, TransformError> + Send + Sync,
{
    fn transform(&self, raw: &str) -> Result<Value, TransformError> {
        self(raw)
    }
}

/// Keeps the raw value as [`Value::Text`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl Transformer for Identity {
    fn transform(&self, raw: &str) -> Result<Value, TransformError> {
        Ok(Value::Text(raw.to_string()))
    }
}

/// Converts to [`Value::Integer`].
#[derive(Debug, Default, Clone, Copy)]
pub struct IntegerTransformer;

impl Transformer for IntegerTransformer {
    fn transform(&self, raw: &str) -> Result<Value, TransformError> {
        from_str::<i64>(raw).map(Value::Integer)
    }
}

/// Converts to [`Value::Float`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FloatTransformer;

impl Transformer for FloatTransformer {
    fn transform(&self, raw: &str) -> Result<Value, TransformError> {
        from_str::<f64>(raw).map(Value::Float)
    }
}

/// Converts to [`Value::Boolean`] (`true` or `false`).
#[derive(Debug, Default, Clone, Copy)]
pub struct BooleanTransformer;

impl Transformer for BooleanTransformer {
    fn transform(&self, raw: &str) -> Result<Value, TransformError> {
        from_str::<bool>(raw).map(Value::Boolean)
    }
}

fn from_str<T: FromStr>(raw: &str) -> Result<T, TransformError> {
    T::from_str(raw).map_err(|_| TransformError::InvalidConversion {
        token: raw.to_string(),
        type_name: std::any::type_name::<T>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("--abc")]
    #[case(" 1 ")]
    fn identity(#[case] raw: &str) {
        assert_eq!(Identity.transform(raw).unwrap(), Value::Text(raw.to_string()));
    }

    #[rstest]
    #[case("0", 0)]
    #[case("-5", -5)]
    #[case("+12", 12)]
    #[case("9223372036854775807", i64::MAX)]
    fn integer(#[case] raw: &str, #[case] expected: i64) {
        assert_eq!(
            IntegerTransformer.transform(raw).unwrap(),
            Value::Integer(expected)
        );
    }

    #[rstest]
    #[case("")]
    #[case("1.5")]
    #[case("one")]
    #[case("9223372036854775808")]
    fn integer_invalid(#[case] raw: &str) {
        assert_matches!(
            IntegerTransformer.transform(raw).unwrap_err(),
            TransformError::InvalidConversion { token, type_name } => {
                assert_eq!(token, raw);
                assert_eq!(type_name, "i64");
            }
        );
    }

    #[rstest]
    #[case("1.5", 1.5)]
    #[case("-0.25", -0.25)]
    #[case("7", 7.0)]
    fn float(#[case] raw: &str, #[case] expected: f64) {
        assert_eq!(FloatTransformer.transform(raw).unwrap(), Value::Float(expected));
    }

    #[test]
    fn float_invalid() {
        let error = FloatTransformer.transform("x1").unwrap_err();
        assert_eq!(error.to_string(), "cannot convert 'x1' to f64.");
    }

    #[rstest]
    #[case("true", true)]
    #[case("false", false)]
    fn boolean(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(
            BooleanTransformer.transform(raw).unwrap(),
            Value::Boolean(expected)
        );
    }

    #[test]
    fn closure() {
        let upper = |raw: &str| -> Result<Value, TransformError> {
            if raw.is_empty() {
                Err(TransformError::rejected(raw, "empty"))
            } else {
                Ok(Value::Text(raw.to_uppercase()))
            }
        };

        assert_eq!(upper.transform("abc").unwrap(), Value::from("ABC"));
        assert_eq!(
            upper.transform("").unwrap_err().to_string(),
            "cannot accept '': empty."
        );
    }

    #[test]
    fn value_accessors() {
        assert_eq!(Value::from("a").as_str(), Some("a"));
        assert_eq!(Value::from(1i64).as_integer(), Some(1));
        assert_eq!(Value::from(1.0f64).as_float(), Some(1.0));
        assert_eq!(Value::from(true).as_boolean(), Some(true));
        assert_eq!(Value::from(1i64).as_str(), None);
        assert_eq!(Value::from("a").as_integer(), None);
        assert_eq!(Value::from(2.5f64).to_string(), "2.5");
    }
}
