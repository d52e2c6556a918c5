//! The property-list value model.
//!
//! A [`Value`] is an owned tree: every container exclusively owns its
//! children, so a tree can never contain itself.

use bytes::Bytes;

use crate::{Kind, Mapping, TypeError};

/// A property-list value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Unicode text.
    String(String),

    /// Signed 64-bit integer.
    Integer(i64),

    /// 64-bit floating point.
    Real(f64),

    /// Boolean value.
    Boolean(bool),

    /// UTC instant with second precision.
    #[cfg(feature = "chrono")]
    Date(chrono::DateTime<chrono::Utc>),

    /// Opaque byte payload.
    Binary(Bytes),

    /// Ordered list of values.
    Sequence(Vec<Value>),

    /// Ordered, key-unique association.
    Mapping(Mapping),
}

impl Value {
    pub fn string(text: impl Into<String>) -> Self {
        Value::String(text.into())
    }

    pub fn integer(n: i64) -> Self {
        Value::Integer(n)
    }

    pub fn real(n: f64) -> Self {
        Value::Real(n)
    }

    pub fn boolean(b: bool) -> Self {
        Value::Boolean(b)
    }

    /// Creates a date, truncating to whole seconds.
    #[cfg(feature = "chrono")]
    pub fn date(instant: chrono::DateTime<chrono::Utc>) -> Self {
        use chrono::Timelike;
        Value::Date(instant.with_nanosecond(0).unwrap_or(instant))
    }

    pub fn binary(data: impl Into<Bytes>) -> Self {
        Value::Binary(data.into())
    }

    /// Creates an empty mapping.
    pub fn mapping() -> Self {
        Value::Mapping(Mapping::new())
    }

    pub fn sequence(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::Integer(_) => Kind::Integer,
            Value::Real(_) => Kind::Real,
            Value::Boolean(_) => Kind::Boolean,
            #[cfg(feature = "chrono")]
            Value::Date(_) => Kind::Date,
            Value::Binary(_) => Kind::Binary,
            Value::Sequence(_) => Kind::Sequence,
            Value::Mapping(_) => Kind::Mapping,
        }
    }

    /// Inserts or replaces `key` in a mapping value.
    ///
    /// Returns the value previously stored under `key`. Fails if `self` is
    /// not a mapping.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, TypeError> {
        Ok(self.as_mapping_mut()?.insert(key, value))
    }

    fn mismatch(&self, expected: Kind) -> TypeError {
        TypeError::new(expected, self.kind())
    }

    pub fn as_string(&self) -> Result<&str, TypeError> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.mismatch(Kind::String)),
        }
    }

    pub fn as_integer(&self) -> Result<i64, TypeError> {
        match self {
            Value::Integer(n) => Ok(*n),
            _ => Err(self.mismatch(Kind::Integer)),
        }
    }

    pub fn as_real(&self) -> Result<f64, TypeError> {
        match self {
            Value::Real(n) => Ok(*n),
            _ => Err(self.mismatch(Kind::Real)),
        }
    }

    pub fn as_boolean(&self) -> Result<bool, TypeError> {
        match self {
            Value::Boolean(b) => Ok(*b),
            _ => Err(self.mismatch(Kind::Boolean)),
        }
    }

    #[cfg(feature = "chrono")]
    pub fn as_date(&self) -> Result<chrono::DateTime<chrono::Utc>, TypeError> {
        match self {
            Value::Date(d) => Ok(*d),
            _ => Err(self.mismatch(Kind::Date)),
        }
    }

    pub fn as_binary(&self) -> Result<&Bytes, TypeError> {
        match self {
            Value::Binary(b) => Ok(b),
            _ => Err(self.mismatch(Kind::Binary)),
        }
    }

    pub fn as_sequence(&self) -> Result<&[Value], TypeError> {
        match self {
            Value::Sequence(items) => Ok(items),
            _ => Err(self.mismatch(Kind::Sequence)),
        }
    }

    pub fn as_sequence_mut(&mut self) -> Result<&mut Vec<Value>, TypeError> {
        match self {
            Value::Sequence(items) => Ok(items),
            other => Err(other.mismatch(Kind::Sequence)),
        }
    }

    /// Returns the mapping's entries, iterable in insertion order.
    pub fn as_mapping(&self) -> Result<&Mapping, TypeError> {
        match self {
            Value::Mapping(m) => Ok(m),
            _ => Err(self.mismatch(Kind::Mapping)),
        }
    }

    pub fn as_mapping_mut(&mut self) -> Result<&mut Mapping, TypeError> {
        match self {
            Value::Mapping(m) => Ok(m),
            other => Err(other.mismatch(Kind::Mapping)),
        }
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Integer(i64::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Real(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Binary(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Value::Mapping(m)
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::DateTime<chrono::Utc>> for Value {
    fn from(d: chrono::DateTime<chrono::Utc>) -> Self {
        Value::date(d)
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use crate::{Kind, TypeError, Value};

    #[test]
    fn test_constructors_and_accessors() {
        assert_eq!(Value::string("hi").as_string(), Ok("hi"));
        assert_eq!(Value::integer(-7).as_integer(), Ok(-7));
        assert_eq!(Value::real(1.5).as_real(), Ok(1.5));
        assert_eq!(Value::boolean(true).as_boolean(), Ok(true));
        assert_eq!(
            Value::binary(vec![1u8, 2, 3]).as_binary(),
            Ok(&Bytes::from_static(&[1, 2, 3]))
        );
        assert_eq!(Value::sequence(vec![]).as_sequence(), Ok(&[][..]));
        assert!(Value::mapping().as_mapping().unwrap().is_empty());
    }

    #[test]
    fn test_kind() {
        assert_eq!(Value::string("").kind(), Kind::String);
        assert_eq!(Value::integer(0).kind(), Kind::Integer);
        assert_eq!(Value::binary(Bytes::new()).kind(), Kind::Binary);
        assert_eq!(Value::sequence(vec![]).kind(), Kind::Sequence);
        assert_eq!(Value::mapping().kind(), Kind::Mapping);
    }

    #[test]
    fn test_accessor_type_errors() {
        let v = Value::integer(1965);
        assert_eq!(
            v.as_string(),
            Err(TypeError::new(Kind::String, Kind::Integer))
        );
        assert_eq!(
            v.as_mapping().unwrap_err(),
            TypeError::new(Kind::Mapping, Kind::Integer)
        );
        assert_eq!(
            Value::string("x").as_integer(),
            Err(TypeError::new(Kind::Integer, Kind::String))
        );
        assert_eq!(
            Value::mapping().as_sequence().unwrap_err(),
            TypeError::new(Kind::Sequence, Kind::Mapping)
        );
        assert_eq!(
            Value::sequence(vec![]).as_binary().unwrap_err(),
            TypeError::new(Kind::Binary, Kind::Sequence)
        );
    }

    #[test]
    fn test_set_replaces() {
        let mut m = Value::mapping();
        assert_eq!(m.set("Name", "A"), Ok(None));
        assert_eq!(m.set("Name", "B"), Ok(Some(Value::string("A"))));
        let entries = m.as_mapping().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.get("Name"), Some(&Value::string("B")));
    }

    #[test]
    fn test_set_on_non_mapping() {
        let mut v = Value::sequence(vec![]);
        assert_eq!(
            v.set("k", 1),
            Err(TypeError::new(Kind::Mapping, Kind::Sequence))
        );
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn test_date_truncates_to_seconds() {
        use chrono::{DateTime, Timelike};

        let instant = DateTime::from_timestamp(1_000_000_000, 123_456_789).unwrap();
        let d = Value::date(instant).as_date().unwrap();
        assert_eq!(d.nanosecond(), 0);
        assert_eq!(d.timestamp(), 1_000_000_000);
    }
}
