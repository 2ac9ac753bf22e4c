//! Field accessors over struct arrays
//!
//! Every entity converter goes through these methods. The contract is the
//! backbone of the whole layer: a missing field, a field of the wrong
//! declared class, or an out-of-range element yields the caller's default
//! on read, never an error; writes always set the field, even when the
//! value is a shaped empty, so converted structs carry their full schema.

use glam::{Mat4, Vec3, Vec4};
use scene_common::{PropertyData, PropertyKind};

use crate::codec;
use crate::value::{StructArray, Value};

impl StructArray {
    pub fn get_scalar(&self, index: usize, name: &str, default: f64) -> f64 {
        self.get(index, name)
            .and_then(Value::scalar_value)
            .unwrap_or(default)
    }

    pub fn set_scalar(&mut self, index: usize, name: &str, value: f64) {
        self.set(index, name, Value::scalar(value));
    }

    pub fn get_text(&self, index: usize, name: &str, default: &str) -> String {
        self.get(index, name)
            .and_then(codec::decode_text)
            .unwrap_or_else(|| default.to_string())
    }

    pub fn set_text(&mut self, index: usize, name: &str, value: &str) {
        self.set(index, name, codec::encode_text(value));
    }

    pub fn get_logical(&self, index: usize, name: &str, default: bool) -> bool {
        self.get(index, name)
            .and_then(Value::as_logical)
            .unwrap_or(default)
    }

    pub fn set_logical(&mut self, index: usize, name: &str, value: bool) {
        self.set(index, name, Value::logical(value));
    }

    pub fn get_xyz(&self, index: usize, name: &str) -> Vec<Vec3> {
        self.get(index, name).map(codec::decode_xyz).unwrap_or_default()
    }

    pub fn set_xyz(&mut self, index: usize, name: &str, vectors: &[Vec3]) {
        self.set(index, name, codec::encode_xyz(vectors));
    }

    pub fn get_rgb(&self, index: usize, name: &str) -> Vec<Vec3> {
        self.get(index, name).map(codec::decode_rgb).unwrap_or_default()
    }

    pub fn set_rgb(&mut self, index: usize, name: &str, colors: &[Vec3]) {
        self.set(index, name, codec::encode_rgb(colors));
    }

    pub fn get_rgba(&self, index: usize, name: &str) -> Vec<Vec4> {
        self.get(index, name).map(codec::decode_rgba).unwrap_or_default()
    }

    pub fn set_rgba(&mut self, index: usize, name: &str, colors: &[Vec4]) {
        self.set(index, name, codec::encode_rgba(colors));
    }

    pub fn get_mat4(&self, index: usize, name: &str) -> Vec<Mat4> {
        self.get(index, name).map(codec::decode_mat4).unwrap_or_default()
    }

    pub fn set_mat4(&mut self, index: usize, name: &str, matrices: &[Mat4]) {
        self.set(index, name, codec::encode_mat4(matrices));
    }

    pub fn get_floats(&self, index: usize, name: &str) -> Vec<f32> {
        self.get(index, name).map(codec::decode_floats).unwrap_or_default()
    }

    pub fn set_floats(&mut self, index: usize, name: &str, floats: &[f32]) {
        self.set(index, name, codec::encode_floats(floats));
    }

    pub fn get_ints(&self, index: usize, name: &str) -> Vec<i32> {
        self.get(index, name).map(codec::decode_ints).unwrap_or_default()
    }

    pub fn set_ints(&mut self, index: usize, name: &str, ints: &[i32]) {
        self.set(index, name, codec::encode_ints(ints));
    }

    pub fn get_indices(&self, index: usize, name: &str) -> Vec<u32> {
        self.get(index, name).map(codec::decode_indices).unwrap_or_default()
    }

    pub fn set_indices(&mut self, index: usize, name: &str, indices: &[u32]) {
        self.set(index, name, codec::encode_indices(indices));
    }

    pub fn get_bytes(&self, index: usize, name: &str) -> Vec<u8> {
        self.get(index, name).map(codec::decode_bytes).unwrap_or_default()
    }

    pub fn set_bytes(&mut self, index: usize, name: &str, bytes: &[u8]) {
        self.set(index, name, codec::encode_bytes(bytes));
    }

    pub fn get_struct(&self, index: usize, name: &str) -> Option<&StructArray> {
        self.get(index, name).and_then(Value::as_struct)
    }

    pub fn set_struct(&mut self, index: usize, name: &str, array: StructArray) {
        self.set(index, name, Value::Struct(array));
    }

    /// Read a material-property payload, interpreting the field according
    /// to the declared kind. A mismatched field degrades to the kind's
    /// empty payload, keeping the declared kind authoritative.
    pub fn get_property_data(&self, index: usize, name: &str, kind: PropertyKind) -> PropertyData {
        match kind {
            PropertyKind::Float => PropertyData::Floats(self.get_floats(index, name)),
            PropertyKind::String => PropertyData::Text(self.get_text(index, name, "")),
            PropertyKind::Integer => PropertyData::Ints(self.get_ints(index, name)),
            PropertyKind::Buffer => PropertyData::Bytes(self.get_bytes(index, name)),
        }
    }

    /// Write a material-property payload with the encoding matching its
    /// variant.
    pub fn set_property_data(&mut self, index: usize, name: &str, data: &PropertyData) {
        match data {
            PropertyData::Floats(floats) => self.set_floats(index, name, floats),
            PropertyData::Text(text) => self.set_text(index, name, text),
            PropertyData::Ints(ints) => self.set_ints(index, name, ints),
            PropertyData::Bytes(bytes) => self.set_bytes(index, name, bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_yields_default() {
        let array = StructArray::new(1);
        assert_eq!(array.get_scalar(0, "aspectRatio", 1.5), 1.5);
        assert_eq!(array.get_text(0, "name", "camera"), "camera");
        assert!(array.get_xyz(0, "position").is_empty());
        assert!(!array.get_logical(0, "triangle", false));
    }

    #[test]
    fn test_wrong_class_yields_default() {
        let mut array = StructArray::new(1);
        array.set_text(0, "aspectRatio", "wide");
        array.set_scalar(0, "name", 3.0);

        assert_eq!(array.get_scalar(0, "aspectRatio", 1.5), 1.5);
        assert_eq!(array.get_text(0, "name", "camera"), "camera");
    }

    #[test]
    fn test_out_of_range_element_yields_default() {
        let mut array = StructArray::new(1);
        array.set_scalar(0, "aspectRatio", 2.0);
        assert_eq!(array.get_scalar(3, "aspectRatio", 1.5), 1.5);
    }

    #[test]
    fn test_empty_write_still_sets_field() {
        let mut array = StructArray::new(1);
        array.set_xyz(0, "position", &[]);
        assert!(array.has_field("position"));
        assert_eq!(array.get(0, "position").unwrap().dims(), Some(&[3, 0][..]));
    }

    #[test]
    fn test_scalar_round_trip() {
        let mut array = StructArray::new(2);
        array.set_scalar(1, "horizontalFov", 0.75);
        assert_eq!(array.get_scalar(1, "horizontalFov", 0.0), 0.75);
        assert_eq!(array.get_scalar(0, "horizontalFov", 0.25), 0.25);
    }

    #[test]
    fn test_property_data_follows_declared_kind() {
        let mut array = StructArray::new(1);
        array.set_floats(0, "data", &[0.5, 0.25]);

        let data = array.get_property_data(0, "data", PropertyKind::Float);
        assert_eq!(data, PropertyData::Floats(vec![0.5, 0.25]));

        // declared integer, stored floats: kind wins, payload empties
        let data = array.get_property_data(0, "data", PropertyKind::Integer);
        assert_eq!(data, PropertyData::Ints(Vec::new()));
    }

    #[test]
    fn test_property_data_round_trip_each_kind() {
        let samples = [
            PropertyData::Floats(vec![1.0, 2.0]),
            PropertyData::Text("matte".to_string()),
            PropertyData::Ints(vec![3, -4]),
            PropertyData::Bytes(vec![0xde, 0xad]),
        ];
        for sample in samples {
            let mut array = StructArray::new(1);
            array.set_property_data(0, "data", &sample);
            assert_eq!(array.get_property_data(0, "data", sample.kind()), sample);
        }
    }
}
