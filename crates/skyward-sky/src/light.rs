//! Light controller: picks sun or moon lighting for the host sky light, plus
//! the static ambient and hemisphere lights configured at startup.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::celestial::CelestialState;
use crate::color::Rgb;

/// Default sun color (`0xffffff`).
pub const DEFAULT_SUN_COLOR: u32 = 0xffffff;
/// Default sun intensity.
pub const DEFAULT_SUN_INTENSITY: f32 = 6.0;
/// Default moon color (`0x98caf5`), a cold blue.
pub const DEFAULT_MOON_COLOR: u32 = 0x98caf5;
/// Default moon intensity.
pub const DEFAULT_MOON_INTENSITY: f32 = 2.0;
/// Default ambient intensity.
pub const DEFAULT_AMBIENT_INTENSITY: f32 = 0.5;

/// Sun and moon lighting parameters, fixed after startup.
#[derive(Clone, Debug, PartialEq)]
pub struct LightConfig {
    pub sun_color: Rgb,
    pub sun_intensity: f32,
    pub moon_color: Rgb,
    pub moon_intensity: f32,
    /// Speed multiplier for the celestial clock.
    pub sky_light_speed: f64,
    /// Base position of the sky light, from `skyLight.position`.
    pub sky_light_base_position: Vec3,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            sun_color: Rgb::from_hex(DEFAULT_SUN_COLOR),
            sun_intensity: DEFAULT_SUN_INTENSITY,
            moon_color: Rgb::from_hex(DEFAULT_MOON_COLOR),
            moon_intensity: DEFAULT_MOON_INTENSITY,
            sky_light_speed: 1.0,
            sky_light_base_position: Vec3::ZERO,
        }
    }
}

/// What the host sky light should show this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkyLightOutput {
    pub color: Rgb,
    pub intensity: f32,
    /// Unit direction toward whichever body is lighting the scene.
    pub position: Vec3,
}

impl SkyLightOutput {
    /// Build the GPU-side uniform for this light.
    pub fn to_uniform(&self) -> SkyLightUniform {
        SkyLightUniform {
            position_intensity: [
                self.position.x,
                self.position.y,
                self.position.z,
                self.intensity,
            ],
            color_padding: [self.color.r, self.color.g, self.color.b, 0.0],
        }
    }
}

/// Select sun or moon lighting for a celestial state.
///
/// By day the light sits along `direction` with the sun's color and intensity;
/// by night it flips to `-direction` with the moon's.
pub fn update(state: &CelestialState, config: &LightConfig) -> SkyLightOutput {
    if state.is_day() {
        SkyLightOutput {
            color: config.sun_color,
            intensity: config.sun_intensity,
            position: state.direction,
        }
    } else {
        SkyLightOutput {
            color: config.moon_color,
            intensity: config.moon_intensity,
            position: -state.direction,
        }
    }
}

/// GPU-side sky light, 32 bytes, std140-compatible.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SkyLightUniform {
    /// xyz = direction toward the light, w = intensity.
    pub position_intensity: [f32; 4],
    /// xyz = color, w = padding.
    pub color_padding: [f32; 4],
}

/// Uniform ambient fill light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: Rgb,
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: Rgb::WHITE,
            intensity: DEFAULT_AMBIENT_INTENSITY,
        }
    }
}

/// Sky/ground gradient light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HemisphereLight {
    pub sky_color: Rgb,
    pub ground_color: Rgb,
    pub intensity: f32,
    pub position: Vec3,
}
