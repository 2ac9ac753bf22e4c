//! Light conversion

use glam::Vec3;
use scene_common::schema::LIGHT_FIELDS;
use scene_common::{light_kind_from_name, light_kind_name, Light};

use crate::value::{StructArray, Value};

fn first_or(vectors: Vec<Vec3>, default: Vec3) -> Vec3 {
    vectors.first().copied().unwrap_or(default)
}

pub fn lights_from_value(value: &Value) -> Vec<Light> {
    let Some(array) = value.as_struct() else {
        return Vec::new();
    };
    let defaults = Light::default();
    (0..array.len())
        .map(|i| Light {
            name: array.get_text(i, "name", &defaults.name),
            kind: light_kind_from_name(&array.get_text(i, "type", "undefined")),
            position: first_or(array.get_xyz(i, "position"), defaults.position),
            direction: first_or(array.get_xyz(i, "lookAtDirection"), defaults.direction),
            inner_cone_angle: array.get_scalar(i, "innerConeAngle", defaults.inner_cone_angle as f64)
                as f32,
            outer_cone_angle: array.get_scalar(i, "outerConeAngle", defaults.outer_cone_angle as f64)
                as f32,
            constant_attenuation: array.get_scalar(
                i,
                "constantAttenuation",
                defaults.constant_attenuation as f64,
            ) as f32,
            linear_attenuation: array.get_scalar(
                i,
                "linearAttenuation",
                defaults.linear_attenuation as f64,
            ) as f32,
            quadratic_attenuation: array.get_scalar(
                i,
                "quadraticAttenuation",
                defaults.quadratic_attenuation as f64,
            ) as f32,
            ambient_color: first_or(array.get_rgb(i, "ambientColor"), defaults.ambient_color),
            diffuse_color: first_or(array.get_rgb(i, "diffuseColor"), defaults.diffuse_color),
            specular_color: first_or(array.get_rgb(i, "specularColor"), defaults.specular_color),
        })
        .collect()
}

pub fn lights_to_value(lights: &[Light]) -> Value {
    let mut array = StructArray::with_schema(lights.len(), LIGHT_FIELDS);
    for (i, light) in lights.iter().enumerate() {
        array.set_text(i, "name", &light.name);
        array.set_xyz(i, "position", &[light.position]);
        array.set_text(i, "type", light_kind_name(light.kind));
        array.set_xyz(i, "lookAtDirection", &[light.direction]);
        array.set_scalar(i, "innerConeAngle", light.inner_cone_angle as f64);
        array.set_scalar(i, "outerConeAngle", light.outer_cone_angle as f64);
        array.set_scalar(i, "constantAttenuation", light.constant_attenuation as f64);
        array.set_scalar(i, "linearAttenuation", light.linear_attenuation as f64);
        array.set_scalar(i, "quadraticAttenuation", light.quadratic_attenuation as f64);
        array.set_rgb(i, "ambientColor", &[light.ambient_color]);
        array.set_rgb(i, "diffuseColor", &[light.diffuse_color]);
        array.set_rgb(i, "specularColor", &[light.specular_color]);
    }
    Value::Struct(array)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene_common::LightKind;

    #[test]
    fn test_light_round_trip() {
        let lights = vec![Light {
            name: "sun".to_string(),
            kind: LightKind::Directional,
            direction: Vec3::new(0.0, -1.0, 0.0),
            diffuse_color: Vec3::new(1.0, 0.9, 0.8),
            ..Light::default()
        }];
        assert_eq!(lights_from_value(&lights_to_value(&lights)), lights);
    }

    #[test]
    fn test_unknown_type_degrades_to_undefined() {
        let mut array = StructArray::new(1);
        array.set_text(0, "type", "laser");
        let lights = lights_from_value(&Value::Struct(array));
        assert_eq!(lights[0].kind, LightKind::Undefined);
    }
}
