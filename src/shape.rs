//! Declared shapes that drive coercion
//!
//! A [`Shape`] describes what a value is expected to look like on the wire:
//! a primitive, a named model, an array of some shape, a string-keyed map of
//! some shape, or a union of alternatives. Named models carry a static
//! [`ModelSchema`] listing their fields, each with its own shape and presence
//! rule.

use serde_json::Value;
use std::fmt;

/// Declared target shape for a raw JSON value
#[derive(Debug, Clone)]
pub enum Shape {
    String,
    /// Any JSON number
    Number,
    /// A JSON number without a fractional part that fits in an `i64`
    Integer,
    /// A non-negative integer that fits in a `u64`
    Unsigned,
    Boolean,
    /// RFC 3339 timestamp carried as a string
    Date,
    /// A string restricted to a fixed set of names
    Enum(&'static [&'static str]),
    Model(&'static ModelSchema),
    Array(Box<Shape>),
    /// Object with string keys and values of one shape
    Map(Box<Shape>),
    /// First alternative that fits wins
    OneOf(Vec<Shape>),
    /// Passed through untouched
    Any,
}

impl Shape {
    pub fn array_of(item: Shape) -> Self {
        Shape::Array(Box::new(item))
    }

    pub fn map_of(value: Shape) -> Self {
        Shape::Map(Box::new(value))
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Shape::String, Shape::String)
            | (Shape::Number, Shape::Number)
            | (Shape::Integer, Shape::Integer)
            | (Shape::Unsigned, Shape::Unsigned)
            | (Shape::Boolean, Shape::Boolean)
            | (Shape::Date, Shape::Date)
            | (Shape::Any, Shape::Any) => true,
            (Shape::Enum(a), Shape::Enum(b)) => a == b,
            (Shape::Model(a), Shape::Model(b)) => a.name == b.name,
            (Shape::Array(a), Shape::Array(b)) | (Shape::Map(a), Shape::Map(b)) => a == b,
            (Shape::OneOf(a), Shape::OneOf(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::String => write!(f, "string"),
            Shape::Number => write!(f, "number"),
            Shape::Integer => write!(f, "integer"),
            Shape::Unsigned => write!(f, "unsigned integer"),
            Shape::Boolean => write!(f, "boolean"),
            Shape::Date => write!(f, "date"),
            Shape::Enum(names) => write!(f, "one of [{}]", names.join(", ")),
            Shape::Model(schema) => write!(f, "{}", schema.name),
            Shape::Array(item) => write!(f, "array<{}>", item),
            Shape::Map(value) => write!(f, "map<string, {}>", value),
            Shape::OneOf(alternatives) => {
                for (i, alternative) in alternatives.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", alternative)?;
                }
                Ok(())
            }
            Shape::Any => write!(f, "any"),
        }
    }
}

/// How a model field behaves when the raw object does not carry it
#[derive(Debug, Clone, Copy)]
pub enum Presence {
    /// Absence is an error
    Required,
    /// Absence leaves the field unset
    Optional,
    /// Absence fills in the given default
    Defaulted(fn() -> Value),
}

/// One entry of a model's field table
#[derive(Debug, Clone, Copy)]
pub struct FieldSchema {
    /// Wire name of the field
    pub name: &'static str,
    pub shape: fn() -> Shape,
    pub presence: Presence,
}

impl FieldSchema {
    pub const fn required(name: &'static str, shape: fn() -> Shape) -> Self {
        Self {
            name,
            shape,
            presence: Presence::Required,
        }
    }

    pub const fn optional(name: &'static str, shape: fn() -> Shape) -> Self {
        Self {
            name,
            shape,
            presence: Presence::Optional,
        }
    }

    pub const fn defaulted(name: &'static str, shape: fn() -> Shape, default: fn() -> Value) -> Self {
        Self {
            name,
            shape,
            presence: Presence::Defaulted(default),
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self.presence, Presence::Required)
    }
}

/// Static field table of a named model
#[derive(Debug)]
pub struct ModelSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSchema],
}

impl ModelSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields.iter().filter(|f| f.is_required())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static POINT: ModelSchema = ModelSchema {
        name: "Point",
        fields: &[
            FieldSchema::required("x", || Shape::Integer),
            FieldSchema::optional("label", || Shape::String),
        ],
    };

    #[test]
    fn test_display_nested() {
        let shape = Shape::array_of(Shape::map_of(Shape::map_of(Shape::String)));
        assert_eq!(
            shape.to_string(),
            "array<map<string, map<string, string>>>"
        );
    }

    #[test]
    fn test_display_one_of() {
        let shape = Shape::OneOf(vec![Shape::String, Shape::Integer]);
        assert_eq!(shape.to_string(), "string | integer");
    }

    #[test]
    fn test_display_enum_and_model() {
        assert_eq!(Shape::Enum(&["a", "b"]).to_string(), "one of [a, b]");
        assert_eq!(Shape::Model(&POINT).to_string(), "Point");
    }

    #[test]
    fn test_equality() {
        assert_eq!(Shape::array_of(Shape::String), Shape::array_of(Shape::String));
        assert_ne!(Shape::array_of(Shape::String), Shape::map_of(Shape::String));
        assert_eq!(Shape::Model(&POINT), Shape::Model(&POINT));
    }

    #[test]
    fn test_schema_lookup() {
        assert!(POINT.field("x").is_some_and(|f| f.is_required()));
        assert!(POINT.field("label").is_some_and(|f| !f.is_required()));
        assert!(POINT.field("missing").is_none());
        assert_eq!(POINT.required_fields().count(), 1);
    }
}
