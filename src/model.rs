//! The trait every API model implements

use crate::coerce::{Coercion, decode};
use crate::error::CoerceResult;
use crate::shape::{ModelSchema, Shape};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A named API model backed by a static field table
///
/// Construction from wire data goes through the shared coercion layer, so
/// every model gets the same presence and shape rules for free. Implementors
/// only supply [`Model::schema`].
pub trait Model: Serialize + DeserializeOwned {
    /// Field table describing the wire form of this model
    fn schema() -> &'static ModelSchema;

    fn shape() -> Shape {
        Shape::Model(Self::schema())
    }

    /// Build an instance from an untyped JSON object using strict coercion
    fn construct_from_object(raw: &Value) -> CoerceResult<Self> {
        Self::construct_from_object_with(raw, Coercion::Strict)
    }

    /// Build an instance from an untyped JSON object
    ///
    /// Only keys the raw object possesses are copied; everything else keeps
    /// its documented default or stays unset. Unknown keys are ignored.
    fn construct_from_object_with(raw: &Value, mode: Coercion) -> CoerceResult<Self> {
        decode(raw, &Self::shape(), mode)
    }

    /// Serialize to the wire form
    fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
