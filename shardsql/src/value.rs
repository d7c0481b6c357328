//! Bound parameter values.

use std::fmt::Display;

use bytes::Bytes;

/// A value bound to a statement parameter, owned by the rewrite engine.
///
/// `Display` produces the value's SQL literal form: strings are quoted
/// with embedded quotes doubled, binary data uses the hex bytea format.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Text(String),
    Bigint(i64),
    Double(f64),
    Boolean(bool),
    Null,
    Bytes(Bytes),
}

impl Display for ParameterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "'{}'", s.replace("'", "''")),
            Self::Bigint(i) => write!(f, "{}", i),
            Self::Double(d) => write!(f, "{}", d),
            Self::Boolean(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Self::Null => write!(f, "NULL"),
            Self::Bytes(bytes) => {
                write!(f, "'\\x")?;
                for byte in bytes.iter() {
                    write!(f, "{:02x}", byte)?;
                }
                write!(f, "'")
            }
        }
    }
}

impl ParameterValue {
    /// Get bigint if it's a bigint.
    pub fn bigint(&self) -> Option<i64> {
        match self {
            Self::Bigint(i) => Some(*i),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        Self::Bigint(value)
    }
}

impl From<i32> for ParameterValue {
    fn from(value: i32) -> Self {
        Self::Bigint(value as i64)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<Bytes> for ParameterValue {
    fn from(value: Bytes) -> Self {
        Self::Bytes(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_forms() {
        assert_eq!(ParameterValue::from("abc").to_string(), "'abc'");
        assert_eq!(ParameterValue::from("o'brien").to_string(), "'o''brien'");
        assert_eq!(ParameterValue::from(42i64).to_string(), "42");
        assert_eq!(ParameterValue::from(1.5).to_string(), "1.5");
        assert_eq!(ParameterValue::from(true).to_string(), "true");
        assert_eq!(ParameterValue::Null.to_string(), "NULL");
    }

    #[test]
    fn test_bytes_hex() {
        let value = ParameterValue::from(Bytes::from_static(&[0xde, 0xad, 0x01]));
        assert_eq!(value.to_string(), "'\\xdead01'");
    }

    #[test]
    fn test_bigint_accessor() {
        assert_eq!(ParameterValue::from(7i32).bigint(), Some(7));
        assert_eq!(ParameterValue::Null.bigint(), None);
        assert!(ParameterValue::Null.is_null());
    }
}
