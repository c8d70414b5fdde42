//! Moon billboard: a textured quad opposite the sun, always facing the camera.

use glam::{Quat, Vec3};

use crate::assets::{AssetBundle, TextureHandle};
use crate::celestial::CelestialState;

/// Edge length of the moon quad in world units.
pub const MOON_SIZE: f32 = 500.0;

/// Moon mesh state.
///
/// Drawn with additive blending and no depth writes so it glows through the
/// dome haze. Updated every frame regardless of day or night.
#[derive(Clone, Debug)]
pub struct Moon {
    pub texture: TextureHandle,
    pub size: f32,
    pub position: Vec3,
    pub rotation: Quat,
    pub additive_blending: bool,
    pub depth_write: bool,
}

impl Moon {
    pub fn new(assets: &AssetBundle) -> Self {
        Self {
            texture: assets.moon.clone(),
            size: MOON_SIZE,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            additive_blending: true,
            depth_write: false,
        }
    }

    /// Place the moon opposite the sun and turn it to match the camera.
    pub fn update(&mut self, state: &CelestialState, rotation_radius: f32, camera_rotation: Quat) {
        self.position = state.direction * -rotation_radius;
        self.rotation = camera_rotation;
    }

    pub fn visible(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::celestial::INCLINATION;

    #[test]
    fn test_moon_follows_camera_day_and_night() {
        let mut moon = Moon::new(&AssetBundle::placeholders());
        assert!(!moon.depth_write);

        for &azimuth in &[0.1, 0.6] {
            let state = CelestialState::from_angles(azimuth, INCLINATION);
            let camera = Quat::from_rotation_y(azimuth as f32);
            moon.update(&state, 5_000.0, camera);

            assert!((moon.position + state.direction * 5_000.0).length() < 1e-3);
            assert_eq!(moon.rotation, camera);
            assert!(moon.visible());
        }
    }
}
