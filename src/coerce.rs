//! Coercion of untyped JSON into declared shapes
//!
//! This is the one piece of logic every model delegates to. Given a raw value
//! and a [`Shape`], [`coerce_with`] walks both in lockstep and returns a new,
//! normalized value, or a [`ShapeMismatch`] pointing at the first field that
//! does not fit. The raw value is only borrowed.
//!
//! # Policy
//!
//! - Required model fields that are absent (or `null`) fail.
//! - Optional model fields that are absent or `null` are left out.
//! - Defaulted model fields that are absent or `null` get their default.
//! - Keys the schema does not declare are dropped.
//! - Arrays and maps are rebuilt element by element; an empty array stays an
//!   empty array.
//!
//! In [`Coercion::Strict`] mode a primitive must already have the declared
//! runtime kind. [`Coercion::Lenient`] also accepts lossless alternative
//! representations, e.g. `"42"` for a number or `1` for `true`.

use crate::error::{CoerceResult, ShapeMismatch, ValueKind};
use crate::path::FieldPath;
use crate::shape::{ModelSchema, Presence, Shape};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};

/// How forgiving primitive coercion is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Coercion {
    /// The raw runtime kind must match the declared primitive
    #[default]
    Strict,
    /// Convert between compatible representations where no information is lost
    Lenient,
}

/// Coerce `raw` into `shape` using [`Coercion::Strict`]
pub fn coerce(raw: &Value, shape: &Shape) -> CoerceResult<Value> {
    coerce_with(raw, shape, Coercion::Strict)
}

/// Coerce `raw` into `shape` using the given mode
pub fn coerce_with(raw: &Value, shape: &Shape, mode: Coercion) -> CoerceResult<Value> {
    Coercer { mode }.coerce(raw, shape, &FieldPath::root())
}

/// Coerce `raw` into `shape` and materialize it as `T`
///
/// Shapes are as narrow as the Rust types they feed, so the serde step only
/// fails when `T` and `shape` disagree. Such a failure is reported at the
/// document root.
pub fn decode<T: DeserializeOwned>(raw: &Value, shape: &Shape, mode: Coercion) -> CoerceResult<T> {
    let normalized = coerce_with(raw, shape, mode)?;
    serde_json::from_value(normalized)
        .map_err(|_| ShapeMismatch::new(FieldPath::root(), shape.to_string(), ValueKind::of(raw)))
}

// Exact f64 bounds; `i64::MAX as f64` rounds up to 2^63
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;
const U64_UPPER: f64 = 18_446_744_073_709_551_616.0;

struct Coercer {
    mode: Coercion,
}

impl Coercer {
    fn lenient(&self) -> bool {
        self.mode == Coercion::Lenient
    }

    fn coerce(&self, raw: &Value, shape: &Shape, path: &FieldPath) -> CoerceResult<Value> {
        let coerced = match shape {
            Shape::Any => Some(raw.clone()),
            Shape::String => self.string(raw),
            Shape::Number => self.number(raw),
            Shape::Integer => self.integer(raw),
            Shape::Unsigned => self.unsigned(raw),
            Shape::Boolean => self.boolean(raw),
            Shape::Date => self.date(raw),
            Shape::Enum(names) => self.enumeration(raw, names),
            Shape::Model(schema) => return self.model(raw, schema, path),
            Shape::Array(item) => return self.array(raw, item, path),
            Shape::Map(value) => return self.map(raw, value, path),
            Shape::OneOf(alternatives) => alternatives
                .iter()
                .find_map(|alternative| self.coerce(raw, alternative, path).ok()),
        };

        coerced.ok_or_else(|| ShapeMismatch::new(path.clone(), shape.to_string(), ValueKind::of(raw)))
    }

    fn model(&self, raw: &Value, schema: &ModelSchema, path: &FieldPath) -> CoerceResult<Value> {
        let object = raw
            .as_object()
            .ok_or_else(|| ShapeMismatch::new(path.clone(), schema.name, ValueKind::of(raw)))?;

        let mut out = Map::new();
        for field in schema.fields {
            let field_path = path.key(field.name);
            let shape = (field.shape)();

            match (object.get(field.name), field.presence) {
                (Some(Value::Null), Presence::Required) => {
                    return Err(ShapeMismatch::new(field_path, shape.to_string(), ValueKind::Null));
                }
                (None, Presence::Required) => {
                    return Err(ShapeMismatch::missing(field_path, shape.to_string()));
                }
                (Some(Value::Null) | None, Presence::Optional) => {}
                (Some(Value::Null) | None, Presence::Defaulted(default)) => {
                    out.insert(field.name.to_string(), default());
                }
                (Some(value), _) => {
                    out.insert(field.name.to_string(), self.coerce(value, &shape, &field_path)?);
                }
            }
        }

        Ok(Value::Object(out))
    }

    fn array(&self, raw: &Value, item: &Shape, path: &FieldPath) -> CoerceResult<Value> {
        let items = raw.as_array().ok_or_else(|| {
            ShapeMismatch::new(path.clone(), Shape::array_of(item.clone()).to_string(), ValueKind::of(raw))
        })?;

        items
            .iter()
            .enumerate()
            .map(|(i, value)| self.coerce(value, item, &path.index(i)))
            .collect::<CoerceResult<Vec<_>>>()
            .map(Value::Array)
    }

    fn map(&self, raw: &Value, value_shape: &Shape, path: &FieldPath) -> CoerceResult<Value> {
        let object = raw.as_object().ok_or_else(|| {
            ShapeMismatch::new(path.clone(), Shape::map_of(value_shape.clone()).to_string(), ValueKind::of(raw))
        })?;

        let mut out = Map::new();
        for (key, value) in object {
            out.insert(key.clone(), self.coerce(value, value_shape, &path.key(key))?);
        }
        Ok(Value::Object(out))
    }

    fn string(&self, raw: &Value) -> Option<Value> {
        match raw {
            Value::String(_) => Some(raw.clone()),
            Value::Number(n) if self.lenient() => Some(Value::String(n.to_string())),
            Value::Bool(b) if self.lenient() => Some(Value::String(b.to_string())),
            _ => None,
        }
    }

    fn number(&self, raw: &Value) -> Option<Value> {
        match raw {
            Value::Number(_) => Some(raw.clone()),
            Value::String(s) if self.lenient() => parse_number(s.trim()),
            _ => None,
        }
    }

    fn integer(&self, raw: &Value) -> Option<Value> {
        match raw {
            Value::Number(n) if n.is_i64() => Some(raw.clone()),
            Value::Number(n) if self.lenient() && n.is_f64() => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= I64_LOWER && *f < I64_UPPER)
                .map(|f| Value::Number(Number::from(f as i64))),
            Value::String(s) if self.lenient() => s.trim().parse::<i64>().ok().map(Value::from),
            _ => None,
        }
    }

    fn unsigned(&self, raw: &Value) -> Option<Value> {
        match raw {
            Value::Number(n) if n.is_u64() => Some(raw.clone()),
            Value::Number(n) if self.lenient() && n.is_f64() => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f < U64_UPPER)
                .map(|f| Value::Number(Number::from(f as u64))),
            Value::String(s) if self.lenient() => s.trim().parse::<u64>().ok().map(Value::from),
            _ => None,
        }
    }

    fn boolean(&self, raw: &Value) -> Option<Value> {
        match raw {
            Value::Bool(_) => Some(raw.clone()),
            Value::String(s) if self.lenient() => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            Value::Number(n) if self.lenient() => match n.as_i64() {
                Some(0) => Some(Value::Bool(false)),
                Some(1) => Some(Value::Bool(true)),
                _ => None,
            },
            _ => None,
        }
    }

    fn date(&self, raw: &Value) -> Option<Value> {
        let parsed = match raw {
            Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    if !self.lenient() {
                        return None;
                    }
                    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                        .ok()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                        .map(|dt| dt.and_utc())
                }),
            Value::Number(n) if self.lenient() => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
            _ => None,
        }?;

        Some(Value::String(parsed.to_rfc3339_opts(SecondsFormat::AutoSi, true)))
    }

    fn enumeration(&self, raw: &Value, names: &[&str]) -> Option<Value> {
        let s = raw.as_str()?;
        names
            .iter()
            .find(|name| **name == s || (self.lenient() && name.eq_ignore_ascii_case(s.trim())))
            .map(|name| Value::String((*name).to_string()))
    }
}

fn parse_number(s: &str) -> Option<Value> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(Value::from(i));
    }
    s.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}
