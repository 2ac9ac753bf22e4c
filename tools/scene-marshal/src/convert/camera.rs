//! Camera conversion

use scene_common::schema::CAMERA_FIELDS;
use scene_common::Camera;

use crate::value::{StructArray, Value};

pub fn cameras_from_value(value: &Value) -> Vec<Camera> {
    let Some(array) = value.as_struct() else {
        return Vec::new();
    };
    let defaults = Camera::default();
    (0..array.len())
        .map(|i| Camera {
            name: array.get_text(i, "name", &defaults.name),
            position: array
                .get_xyz(i, "position")
                .first()
                .copied()
                .unwrap_or(defaults.position),
            look_at: array
                .get_xyz(i, "lookAtDirection")
                .first()
                .copied()
                .unwrap_or(defaults.look_at),
            up: array
                .get_xyz(i, "upDirection")
                .first()
                .copied()
                .unwrap_or(defaults.up),
            aspect_ratio: array.get_scalar(i, "aspectRatio", defaults.aspect_ratio as f64) as f32,
            horizontal_fov: array.get_scalar(i, "horizontalFov", defaults.horizontal_fov as f64)
                as f32,
            clip_far: array.get_scalar(i, "clipPlaneFar", defaults.clip_far as f64) as f32,
            clip_near: array.get_scalar(i, "clipPlaneNear", defaults.clip_near as f64) as f32,
        })
        .collect()
}

pub fn cameras_to_value(cameras: &[Camera]) -> Value {
    let mut array = StructArray::with_schema(cameras.len(), CAMERA_FIELDS);
    for (i, camera) in cameras.iter().enumerate() {
        array.set_text(i, "name", &camera.name);
        array.set_xyz(i, "position", &[camera.position]);
        array.set_xyz(i, "lookAtDirection", &[camera.look_at]);
        array.set_xyz(i, "upDirection", &[camera.up]);
        array.set_scalar(i, "aspectRatio", camera.aspect_ratio as f64);
        array.set_scalar(i, "horizontalFov", camera.horizontal_fov as f64);
        array.set_scalar(i, "clipPlaneFar", camera.clip_far as f64);
        array.set_scalar(i, "clipPlaneNear", camera.clip_near as f64);
    }
    Value::Struct(array)
}
