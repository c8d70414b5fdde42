//! The slice of the host runtime the plugin talks to: the app node it
//! populates, the host-owned sky light, and the per-frame context.

use std::collections::BTreeMap;

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::light::SkyLightOutput;

/// Component key the host reads for render ordering.
pub const RENDER_PRIORITY_KEY: &str = "renderPriority";
/// Highest render priority.
pub const RENDER_PRIORITY_HIGH: &str = "high";

/// Inputs the host delivers with every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameContext {
    /// Wall-clock time in milliseconds since the Unix epoch. Drives the sun.
    pub now_ms: f64,
    /// Milliseconds since the host loop started. Drives shader animation.
    pub elapsed_ms: f64,
    /// Local player world position, sampled once for this frame.
    pub player_position: Vec3,
    /// Camera orientation as XYZ Euler angles in radians.
    pub camera_euler: Vec3,
}

impl FrameContext {
    /// Shader `time` value. Kept small so f32 still resolves frame steps.
    pub fn elapsed_seconds(&self) -> f32 {
        (self.elapsed_ms / 1000.0) as f32
    }

    /// Camera orientation as a quaternion.
    pub fn camera_rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.camera_euler.x,
            self.camera_euler.y,
            self.camera_euler.z,
        )
    }

    /// Angle the main flare sprite turns with: the camera's Euler `y`.
    pub fn camera_roll(&self) -> f32 {
        self.camera_euler.y
    }
}

/// Objects the plugin attaches to its app node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneObject {
    AmbientLight,
    HemisphereLight,
    SkyLight,
    SkyLightTarget,
    SkyDome,
    Moon,
    SunLight,
    CloudLayer,
}

/// The scene node the host gives the plugin to populate.
///
/// It follows the player every frame so the dome never clips.
#[derive(Clone, Debug, PartialEq)]
pub struct AppNode {
    pub position: Vec3,
    world_matrix: Mat4,
    children: Vec<SceneObject>,
    components: BTreeMap<String, String>,
}

impl AppNode {
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            world_matrix: Mat4::IDENTITY,
            children: Vec::new(),
            components: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, object: SceneObject) {
        self.children.push(object);
    }

    pub fn children(&self) -> &[SceneObject] {
        &self.children
    }

    pub fn set_component(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.components.insert(key.into(), value.into());
    }

    pub fn component(&self, key: &str) -> Option<&str> {
        self.components.get(key).map(String::as_str)
    }

    /// Recompute the world matrix from the current position.
    pub fn update_matrix_world(&mut self) {
        self.world_matrix = Mat4::from_translation(self.position);
    }

    pub fn world_matrix(&self) -> Mat4 {
        self.world_matrix
    }
}

impl Default for AppNode {
    fn default() -> Self {
        Self::new()
    }
}

/// Host-owned directional sky light.
pub trait SkyLight {
    /// Set the light color from a `#rrggbb` string.
    fn set_color(&mut self, hex: &str);
    fn set_intensity(&mut self, intensity: f32);
    fn set_position(&mut self, position: Vec3);

    /// Push a light-controller result in one call.
    fn apply(&mut self, output: &SkyLightOutput) {
        self.set_color(&output.color.hex_string());
        self.set_intensity(output.intensity);
        self.set_position(output.position);
    }
}

/// In-memory sky light that records the latest values and how often they changed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingSkyLight {
    pub color: String,
    pub intensity: f32,
    pub position: Vec3,
    pub updates: u64,
}

impl SkyLight for RecordingSkyLight {
    fn set_color(&mut self, hex: &str) {
        self.color.clear();
        self.color.push_str(hex);
    }

    fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity;
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.updates += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn test_world_matrix_tracks_position() {
        let mut app = AppNode::new();
        app.position = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(app.world_matrix(), Mat4::IDENTITY);
        app.update_matrix_world();
        assert_eq!(app.world_matrix().w_axis.truncate(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_components() {
        let mut app = AppNode::new();
        assert!(app.component(RENDER_PRIORITY_KEY).is_none());
        app.set_component(RENDER_PRIORITY_KEY, RENDER_PRIORITY_HIGH);
        assert_eq!(app.component(RENDER_PRIORITY_KEY), Some("high"));
    }

    #[test]
    fn test_sky_light_apply() {
        let mut light = RecordingSkyLight::default();
        light.apply(&SkyLightOutput {
            color: Rgb::from_hex(0x98caf5),
            intensity: 2.0,
            position: Vec3::Y,
        });
        assert_eq!(light.color, "#98caf5");
        assert_eq!(light.intensity, 2.0);
        assert_eq!(light.position, Vec3::Y);
        assert_eq!(light.updates, 1);
    }

    #[test]
    fn test_frame_context_helpers() {
        let ctx = FrameContext {
            now_ms: 1.7e12,
            elapsed_ms: 2_500.0,
            player_position: Vec3::ZERO,
            camera_euler: Vec3::new(0.0, 0.75, 0.0),
        };
        assert_eq!(ctx.elapsed_seconds(), 2.5);
        assert_eq!(ctx.camera_roll(), 0.75);
        let expected = Quat::from_rotation_y(0.75);
        assert!(ctx.camera_rotation().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn test_elapsed_seconds_ignores_wall_clock() {
        let mut ctx = FrameContext {
            now_ms: 1.7e12,
            elapsed_ms: 0.0,
            player_position: Vec3::ZERO,
            camera_euler: Vec3::ZERO,
        };
        let start = ctx.elapsed_seconds();
        ctx.now_ms += 60_000.0;
        ctx.elapsed_ms += 60_000.0;
        assert_eq!(start, 0.0);
        assert_eq!(ctx.elapsed_seconds() - start, 60.0);

        ctx.elapsed_ms += 16.0;
        assert!((ctx.elapsed_seconds() - 60.016).abs() < 1e-4);
    }
}
