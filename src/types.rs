use std::fmt;

/// The variant tag of a [`Value`](crate::Value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Integer,
    Real,
    Boolean,
    #[cfg(feature = "chrono")]
    Date,
    Binary,
    Sequence,
    Mapping,
}

impl Kind {
    /// The XML element name used for values of this kind.
    ///
    /// Booleans have two element names; `true` is returned for them.
    pub(crate) fn element(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Real => "real",
            Kind::Boolean => "true",
            #[cfg(feature = "chrono")]
            Kind::Date => "date",
            Kind::Binary => "data",
            Kind::Sequence => "array",
            Kind::Mapping => "dict",
        }
    }

    /// Looks up the kind written under an XML element name.
    pub(crate) fn from_element(name: &[u8]) -> Option<Self> {
        match name {
            b"string" => Some(Kind::String),
            b"integer" => Some(Kind::Integer),
            b"real" => Some(Kind::Real),
            b"true" | b"false" => Some(Kind::Boolean),
            #[cfg(feature = "chrono")]
            b"date" => Some(Kind::Date),
            b"data" => Some(Kind::Binary),
            b"array" => Some(Kind::Sequence),
            b"dict" => Some(Kind::Mapping),
            _ => None,
        }
    }

    /// Whether values of this kind hold other values.
    pub fn is_container(self) -> bool {
        matches!(self, Kind::Sequence | Kind::Mapping)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Real => "real",
            Kind::Boolean => "boolean",
            #[cfg(feature = "chrono")]
            Kind::Date => "date",
            Kind::Binary => "binary",
            Kind::Sequence => "sequence",
            Kind::Mapping => "mapping",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::Kind;

    #[test]
    fn test_element_names() {
        assert_eq!(Kind::String.element(), "string");
        assert_eq!(Kind::Binary.element(), "data");
        assert_eq!(Kind::Sequence.element(), "array");
        assert_eq!(Kind::Mapping.element(), "dict");
    }

    #[test]
    fn test_from_element() {
        assert_eq!(Kind::from_element(b"dict"), Some(Kind::Mapping));
        assert_eq!(Kind::from_element(b"false"), Some(Kind::Boolean));
        assert_eq!(Kind::from_element(b"data"), Some(Kind::Binary));
        assert_eq!(Kind::from_element(b"key"), None);
        assert_eq!(Kind::from_element(b"plist"), None);
    }

    #[test]
    fn test_is_container() {
        assert!(Kind::Sequence.is_container());
        assert!(Kind::Mapping.is_container());
        assert!(!Kind::Binary.is_container());
        assert!(!Kind::String.is_container());
    }
}
