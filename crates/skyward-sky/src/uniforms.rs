//! Named shader inputs, for hosts that bind uniforms by name.

use glam::Vec3;

use crate::assets::TextureHandle;

/// A single named uniform value.
#[derive(Clone, Debug, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec3(Vec3),
    Texture(TextureHandle),
}

impl UniformValue {
    pub fn as_float(&self) -> Option<f32> {
        match self {
            UniformValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            UniformValue::Vec3(v) => Some(*v),
            _ => None,
        }
    }
}

/// Look up a uniform by name in a list produced by a renderer.
pub fn find<'a>(uniforms: &'a [(&'static str, UniformValue)], name: &str) -> Option<&'a UniformValue> {
    uniforms
        .iter()
        .find_map(|(key, value)| (*key == name).then_some(value))
}
