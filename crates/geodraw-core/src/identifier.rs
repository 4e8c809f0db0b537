//! Feature identifier management using string interning
//!
//! This module provides the [`FeatureId`] type with an efficient
//! string-interner based approach. Feature identifiers arrive from GeoJSON,
//! where an `id` may be either a string (terra-draw style UUIDs) or a number;
//! both intern to the same compact symbol so the drawable and style maps can
//! key on a `Copy` value.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> &'static Mutex<DefaultStringInterner> {
    INTERNER.get_or_init(|| Mutex::new(DefaultStringInterner::new()))
}

/// Efficient feature identifier type using string interning
///
/// This type provides efficient storage and comparison of feature identifiers
/// through string interning. Numeric GeoJSON ids are canonicalized to their
/// decimal string form, so `FeatureId::from_number(7)` and
/// `FeatureId::new("7")` compare equal.
///
/// # Examples
///
/// ```
/// use geodraw_core::identifier::FeatureId;
///
/// // Create identifiers from GeoJSON id values
/// let uuid_id = FeatureId::new("f190fbb8-0b6a-42fa-aebe-88d3d1e86e8e");
/// let numeric_id = FeatureId::from_number(42);
///
/// assert_eq!(numeric_id, FeatureId::new("42"));
/// assert_ne!(uuid_id, numeric_id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureId(DefaultSymbol);

impl FeatureId {
    /// Creates a `FeatureId` from &str.
    ///
    /// # Arguments
    ///
    /// * `name` - The string representation of the identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use geodraw_core::identifier::FeatureId;
    ///
    /// let id = FeatureId::new("selected-polygon");
    /// ```
    pub fn new(name: &str) -> Self {
        let mut interner = interner().lock().expect("Failed to acquire interner lock");
        let symbol = interner.get_or_intern(name);
        Self(symbol)
    }

    /// Creates a `FeatureId` from a numeric GeoJSON id.
    ///
    /// # Examples
    ///
    /// ```
    /// use geodraw_core::identifier::FeatureId;
    ///
    /// let id = FeatureId::from_number(42);
    /// assert_eq!(id.to_string(), "42");
    /// ```
    pub fn from_number(id: i64) -> Self {
        let name = id.to_string();
        Self::new(&name)
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner().lock().expect("Failed to acquire interner lock");
        let str_value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{}", str_value)
    }
}

impl From<&str> for FeatureId {
    /// Creates a `FeatureId` from a string slice
    ///
    /// This is a convenience implementation that calls `FeatureId::new`.
    ///
    /// # Examples
    ///
    /// ```
    /// use geodraw_core::identifier::FeatureId;
    ///
    /// let id: FeatureId = "example".into();
    /// assert_eq!(id, "example");
    /// ```
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for FeatureId {
    /// Allows direct comparison with string slices: `id == "string"`
    ///
    /// # Examples
    ///
    /// ```
    /// use geodraw_core::identifier::FeatureId;
    ///
    /// let id = FeatureId::new("p1");
    /// assert!(id == "p1");
    /// ```
    fn eq(&self, other: &str) -> bool {
        let interner = interner().lock().expect("Failed to acquire interner lock");
        let self_str = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        self_str == other
    }
}

impl PartialEq<&str> for FeatureId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for FeatureId {
    /// Serializes numeric-looking identifiers back as JSON numbers so GeoJSON
    /// round trips preserve the original id shape.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let text = self.to_string();
        match text.parse::<i64>() {
            Ok(number) => serializer.serialize_i64(number),
            Err(_) => serializer.serialize_str(&text),
        }
    }
}

impl<'de> Deserialize<'de> for FeatureId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl de::Visitor<'_> for IdVisitor {
            type Value = FeatureId;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a string or integer feature id")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<FeatureId, E> {
                Ok(FeatureId::new(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<FeatureId, E> {
                Ok(FeatureId::from_number(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<FeatureId, E> {
                Ok(FeatureId::new(&value.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let id1 = FeatureId::new("p1");
        let id2 = FeatureId::new("p1");
        let id3 = FeatureId::new("p2");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "p1");
    }

    #[test]
    fn test_from_number() {
        let id1 = FeatureId::from_number(7);
        let id2 = FeatureId::new("7");
        let id3 = FeatureId::from_number(8);

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_display() {
        let id = FeatureId::new("f190fbb8");
        assert_eq!(id.to_string(), "f190fbb8");
    }

    #[test]
    fn test_serde_string_round_trip() {
        let id = FeatureId::new("abc-123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc-123\"");

        let back: FeatureId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_serde_number_round_trip() {
        let id: FeatureId = serde_json::from_str("42").unwrap();
        assert_eq!(id, FeatureId::from_number(42));

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");
    }

    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            /// Interning is stable: equal inputs always produce equal ids,
            /// and an id always resolves back to the text it was built from.
            #[test]
            fn interning_is_stable(name in "[a-zA-Z0-9-]{1,32}") {
                let first = FeatureId::new(&name);
                let second = FeatureId::new(&name);
                prop_assert_eq!(first, second);
                prop_assert_eq!(first.to_string(), name);
            }

            /// Numeric ids canonicalize to their decimal string form.
            #[test]
            fn numeric_ids_canonicalize(number in any::<i64>()) {
                let id = FeatureId::from_number(number);
                prop_assert_eq!(id, FeatureId::new(&number.to_string()));
            }
        }
    }
}
