//! Dynamic host value model
//!
//! [`Value`] is the schema-less side of the boundary: shaped numeric
//! arrays tagged with their element class, text, logicals, lists, and
//! struct arrays. It mirrors a tagged array runtime closely enough that a
//! struct field can be missing, mistyped, or oddly shaped, and the layers
//! above are expected to tolerate all three.
//!
//! A [`StructArray`] is a sequence of elements sharing one ordered field
//! set; every field column holds exactly `len` values, padded with empty
//! values for elements that never had the field set.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One dynamically-typed value.
///
/// Numeric variants carry their declared shape in `dims` (column-count
/// last); the canonical empty value is a 0x0 double array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Double { dims: Vec<usize>, data: Vec<f64> },
    Int32 { dims: Vec<usize>, data: Vec<i32> },
    Uint32 { dims: Vec<usize>, data: Vec<u32> },
    Uint8 { dims: Vec<usize>, data: Vec<u8> },
    Text(String),
    Logical(bool),
    List(Vec<Value>),
    Struct(StructArray),
}

impl Value {
    /// The canonical empty value: a 0x0 double array.
    pub fn empty() -> Self {
        Value::Double {
            dims: vec![0, 0],
            data: Vec::new(),
        }
    }

    /// A 1x1 double array.
    pub fn scalar(value: f64) -> Self {
        Value::Double {
            dims: vec![1, 1],
            data: vec![value],
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(value.into())
    }

    pub fn logical(value: bool) -> Self {
        Value::Logical(value)
    }

    /// Total element count, regardless of shape.
    pub fn num_elements(&self) -> usize {
        match self {
            Value::Double { data, .. } => data.len(),
            Value::Int32 { data, .. } => data.len(),
            Value::Uint32 { data, .. } => data.len(),
            Value::Uint8 { data, .. } => data.len(),
            Value::Text(text) => text.chars().count(),
            Value::Logical(_) => 1,
            Value::List(items) => items.len(),
            Value::Struct(array) => array.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.num_elements() == 0
    }

    /// Declared shape of a numeric array, if this is one.
    pub fn dims(&self) -> Option<&[usize]> {
        match self {
            Value::Double { dims, .. }
            | Value::Int32 { dims, .. }
            | Value::Uint32 { dims, .. }
            | Value::Uint8 { dims, .. } => Some(dims),
            _ => None,
        }
    }

    /// First element of a numeric array, widened to f64. Logicals and
    /// non-numeric values yield `None`.
    pub fn scalar_value(&self) -> Option<f64> {
        match self {
            Value::Double { data, .. } => data.first().copied(),
            Value::Int32 { data, .. } => data.first().map(|v| *v as f64),
            Value::Uint32 { data, .. } => data.first().map(|v| *v as f64),
            Value::Uint8 { data, .. } => data.first().map(|v| *v as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_logical(&self) -> Option<bool> {
        match self {
            Value::Logical(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructArray> {
        match self {
            Value::Struct(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

/// An ordered-field struct array.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StructArray {
    len: usize,
    fields: IndexMap<String, Vec<Value>>,
}

impl StructArray {
    /// An array of `len` elements with no fields yet.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            fields: IndexMap::new(),
        }
    }

    /// An array of `len` elements carrying the full `schema` field set,
    /// every slot filled with the empty value. Keeps the declared schema
    /// visible even when `len` is zero.
    pub fn with_schema(len: usize, schema: &[&str]) -> Self {
        let mut fields = IndexMap::new();
        for name in schema {
            fields.insert(name.to_string(), vec![Value::empty(); len]);
        }
        Self { len, fields }
    }

    /// A 1x1 template element over `schema`, every field empty.
    pub fn blank(schema: &[&str]) -> Self {
        Self::with_schema(1, schema)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// The value of `name` for element `index`, if the field exists and
    /// the index is in range.
    pub fn get(&self, index: usize, name: &str) -> Option<&Value> {
        self.fields.get(name).and_then(|column| column.get(index))
    }

    /// Set the value of `name` for element `index`. Creates the field
    /// column on first use, padding other elements with empty values. An
    /// out-of-range index is ignored.
    pub fn set(&mut self, index: usize, name: &str, value: Value) {
        if index >= self.len {
            return;
        }
        let column = self
            .fields
            .entry(name.to_string())
            .or_insert_with(|| vec![Value::empty(); self.len]);
        column[index] = value;
    }
}

/// Read a value from a JSON file.
pub fn read_value_file(path: &Path) -> Result<Value> {
    let file = File::open(path).with_context(|| format!("Failed to open value file: {path:?}"))?;
    let value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse value file: {path:?}"))?;
    Ok(value)
}

/// Write a value to a JSON file.
pub fn write_value_file(path: &Path, value: &Value) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create value file: {path:?}"))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write value file: {path:?}"))?;
    writer.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_value_shape() {
        let value = Value::empty();
        assert!(value.is_empty());
        assert_eq!(value.dims(), Some(&[0, 0][..]));
    }

    #[test]
    fn test_scalar_value_widens_integers() {
        let value = Value::Int32 {
            dims: vec![1, 1],
            data: vec![7],
        };
        assert_eq!(value.scalar_value(), Some(7.0));
        assert_eq!(Value::text("7").scalar_value(), None);
        assert_eq!(Value::logical(true).scalar_value(), None);
    }

    #[test]
    fn test_struct_array_set_pads_other_elements() {
        let mut array = StructArray::new(3);
        array.set(1, "name", Value::text("middle"));

        assert_eq!(array.get(0, "name"), Some(&Value::empty()));
        assert_eq!(array.get(1, "name"), Some(&Value::text("middle")));
        assert_eq!(array.get(2, "name"), Some(&Value::empty()));
        assert_eq!(array.get(0, "missing"), None);
    }

    #[test]
    fn test_struct_array_out_of_range_set_ignored() {
        let mut array = StructArray::new(1);
        array.set(5, "name", Value::text("nope"));
        assert!(!array.has_field("name"));
    }

    #[test]
    fn test_with_schema_keeps_fields_when_empty() {
        let array = StructArray::with_schema(0, &["a", "b"]);
        assert!(array.is_empty());
        let names: Vec<&str> = array.field_names().collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_value_json_round_trip() {
        let mut array = StructArray::new(1);
        array.set(0, "position", Value::Double {
            dims: vec![3, 1],
            data: vec![1.0, 2.0, 3.0],
        });
        array.set(0, "name", Value::text("camera"));
        let value = Value::Struct(array);

        let json = serde_json::to_string(&value).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
