//! Sky dome: a large sphere around the player whose shader paints stars,
//! galaxy, noise haze, and the sun/moon glow from the uniforms kept here.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::assets::{AssetBundle, TextureHandle};
use crate::celestial::CelestialState;
use crate::uniforms::UniformValue;

/// Uniform block declaration matching [`SkyUniformsGpu`].
pub const SKY_UNIFORMS_WGSL: &str = r#"
struct SkyUniforms {
    sun_position: vec3<f32>,
    time: f32,
    moon_position: vec3<f32>,
    sky_box_radius: f32,
};
"#;

/// Per-frame sky dome inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkyUniforms {
    /// Sun world position on the dome surface.
    pub sun_position: Vec3,
    /// Moon world position on the dome surface.
    pub moon_position: Vec3,
    /// Host time in seconds.
    pub time: f32,
    pub sky_box_radius: f32,
}

impl SkyUniforms {
    pub fn to_gpu(&self) -> SkyUniformsGpu {
        SkyUniformsGpu {
            sun_position: self.sun_position.to_array(),
            time: self.time,
            moon_position: self.moon_position.to_array(),
            sky_box_radius: self.sky_box_radius,
        }
    }
}

/// GPU-side sky uniforms, 32 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SkyUniformsGpu {
    pub sun_position: [f32; 3],
    pub time: f32,
    pub moon_position: [f32; 3],
    pub sky_box_radius: f32,
}

/// Textures sampled by the dome shader.
#[derive(Clone, Debug)]
pub struct SkyTextures {
    pub star: TextureHandle,
    pub noise: TextureHandle,
    pub galaxy: TextureHandle,
    pub noise2: TextureHandle,
}

/// Sky dome state.
#[derive(Clone, Debug)]
pub struct SkyDome {
    uniforms: SkyUniforms,
    textures: SkyTextures,
}

impl SkyDome {
    pub fn new(sky_box_radius: f32, assets: &AssetBundle) -> Self {
        Self {
            uniforms: SkyUniforms {
                sun_position: Vec3::ZERO,
                moon_position: Vec3::ZERO,
                time: 0.0,
                sky_box_radius,
            },
            textures: SkyTextures {
                star: assets.star.clone(),
                noise: assets.noise.clone(),
                galaxy: assets.galaxy.clone(),
                noise2: assets.noise2.clone(),
            },
        }
    }

    /// Refresh the uniforms for this frame.
    ///
    /// Sun and moon sit on opposite sides of a dome of `sky_box_radius`
    /// centred on the player.
    pub fn update(&mut self, state: &CelestialState, player_position: Vec3, elapsed_seconds: f32) {
        let radius = self.uniforms.sky_box_radius;
        self.uniforms.sun_position = state.direction * radius + player_position;
        self.uniforms.moon_position = -state.direction * radius + player_position;
        self.uniforms.time = elapsed_seconds;
    }

    pub fn uniforms(&self) -> &SkyUniforms {
        &self.uniforms
    }

    pub fn textures(&self) -> &SkyTextures {
        &self.textures
    }

    pub fn radius(&self) -> f32 {
        self.uniforms.sky_box_radius
    }

    /// Uniforms keyed by their shader names.
    pub fn named_uniforms(&self) -> Vec<(&'static str, UniformValue)> {
        vec![
            ("sunPosition", UniformValue::Vec3(self.uniforms.sun_position)),
            ("moonPosition", UniformValue::Vec3(self.uniforms.moon_position)),
            ("uTime", UniformValue::Float(self.uniforms.time)),
            ("skyBoxRadius", UniformValue::Float(self.uniforms.sky_box_radius)),
            ("starTexture", UniformValue::Texture(self.textures.star.clone())),
            ("noiseTexture", UniformValue::Texture(self.textures.noise.clone())),
            ("galaxyTexture", UniformValue::Texture(self.textures.galaxy.clone())),
            ("noiseTexture2", UniformValue::Texture(self.textures.noise2.clone())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::celestial::{INCLINATION, advance};
    use crate::uniforms::find;

    #[test]
    fn test_sun_and_moon_oppose_around_player() {
        let mut sky = SkyDome::new(10_000.0, &AssetBundle::placeholders());
        let player = Vec3::new(12.0, 3.0, -40.0);
        let state = advance(31_000.0, 1.0);
        sky.update(&state, player, 31.0);

        let u = sky.uniforms();
        let sun = u.sun_position - player;
        let moon = u.moon_position - player;
        assert!((sun + moon).length() < 1e-3);
        assert!((sun.length() - 10_000.0).abs() < 1e-2);
        assert_eq!(u.time, 31.0);
    }

    #[test]
    fn test_player_motion_shifts_uniforms_exactly() {
        let mut sky = SkyDome::new(10_000.0, &AssetBundle::placeholders());
        let state = CelestialState::from_angles(0.3, INCLINATION);
        let delta = Vec3::new(5.0, 0.0, -2.0);

        sky.update(&state, Vec3::ZERO, 0.0);
        let before = *sky.uniforms();
        sky.update(&state, delta, 0.0);
        let after = *sky.uniforms();

        assert!(((after.sun_position - before.sun_position) - delta).length() < 1e-2);
        assert!(((after.moon_position - before.moon_position) - delta).length() < 1e-2);
    }

    #[test]
    fn test_named_uniforms() {
        let assets = AssetBundle::placeholders();
        let mut sky = SkyDome::new(500.0, &assets);
        sky.update(&CelestialState::from_angles(0.25, INCLINATION), Vec3::ZERO, 2.5);
        let named = sky.named_uniforms();

        assert_eq!(find(&named, "uTime").and_then(UniformValue::as_float), Some(2.5));
        assert_eq!(find(&named, "skyBoxRadius").and_then(UniformValue::as_float), Some(500.0));
        assert_eq!(
            find(&named, "starTexture"),
            Some(&UniformValue::Texture(assets.star.clone()))
        );
        assert!(find(&named, "cloudRadius").is_none());
    }

    #[test]
    fn test_gpu_layout() {
        assert_eq!(std::mem::size_of::<SkyUniformsGpu>(), 32);
        let u = SkyUniforms {
            sun_position: Vec3::new(1.0, 2.0, 3.0),
            moon_position: Vec3::new(-1.0, -2.0, -3.0),
            time: 9.0,
            sky_box_radius: 10.0,
        };
        let gpu = u.to_gpu();
        let bytes: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&gpu));
        assert_eq!(bytes, &[1.0, 2.0, 3.0, 9.0, -1.0, -2.0, -3.0, 10.0]);
    }
}
