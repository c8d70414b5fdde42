//! Volumetric cloud layer uniforms.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::assets::{AssetBundle, TextureHandle};
use crate::celestial::CelestialState;
use crate::uniforms::UniformValue;

/// Uniform block declaration matching [`CloudUniformsGpu`].
pub const CLOUD_UNIFORMS_WGSL: &str = r#"
struct CloudUniforms {
    sun_position: vec3<f32>,
    time: f32,
    cloud_radius: f32,
    _pad0: f32,
    _pad1: f32,
    _pad2: f32,
};
"#;

/// Per-frame cloud layer inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CloudUniforms {
    /// Sun world position projected onto the cloud shell.
    pub sun_position: Vec3,
    pub time: f32,
    pub cloud_radius: f32,
}

impl CloudUniforms {
    pub fn to_gpu(&self) -> CloudUniformsGpu {
        CloudUniformsGpu {
            sun_position: self.sun_position.to_array(),
            time: self.time,
            cloud_radius: self.cloud_radius,
            _pad: [0.0; 3],
        }
    }
}

/// GPU-side cloud uniforms, 32 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CloudUniformsGpu {
    pub sun_position: [f32; 3],
    pub time: f32,
    pub cloud_radius: f32,
    pub _pad: [f32; 3],
}

/// Cloud layer state: uniforms plus the four layer textures and the shared noise.
#[derive(Clone, Debug)]
pub struct CloudLayer {
    uniforms: CloudUniforms,
    noise2: TextureHandle,
    layers: [TextureHandle; 4],
}

impl CloudLayer {
    pub fn new(cloud_radius: f32, assets: &AssetBundle) -> Self {
        Self {
            uniforms: CloudUniforms {
                sun_position: Vec3::ZERO,
                time: 0.0,
                cloud_radius,
            },
            noise2: assets.noise2.clone(),
            layers: assets.clouds.clone(),
        }
    }

    /// Refresh the uniforms for this frame. The caller refreshes the world
    /// transform afterwards so the shader sees this frame's matrix.
    pub fn update(&mut self, state: &CelestialState, player_position: Vec3, elapsed_seconds: f32) {
        self.uniforms.time = elapsed_seconds;
        self.uniforms.sun_position = state.direction * self.uniforms.cloud_radius + player_position;
    }

    pub fn uniforms(&self) -> &CloudUniforms {
        &self.uniforms
    }

    pub fn radius(&self) -> f32 {
        self.uniforms.cloud_radius
    }

    pub fn layers(&self) -> &[TextureHandle; 4] {
        &self.layers
    }

    /// Uniforms keyed by their shader names.
    pub fn named_uniforms(&self) -> Vec<(&'static str, UniformValue)> {
        let [c1, c2, c3, c4] = &self.layers;
        vec![
            ("uTime", UniformValue::Float(self.uniforms.time)),
            ("sunPosition", UniformValue::Vec3(self.uniforms.sun_position)),
            ("cloudRadius", UniformValue::Float(self.uniforms.cloud_radius)),
            ("noiseTexture2", UniformValue::Texture(self.noise2.clone())),
            ("cloudTexture1", UniformValue::Texture(c1.clone())),
            ("cloudTexture2", UniformValue::Texture(c2.clone())),
            ("cloudTexture3", UniformValue::Texture(c3.clone())),
            ("cloudTexture4", UniformValue::Texture(c4.clone())),
        ]
    }
}
