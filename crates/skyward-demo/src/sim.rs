//! Stand-in for the host runtime: walks the player and pans the camera.

use std::time::{SystemTime, UNIX_EPOCH};

use glam::{Mat4, Vec3};
use skyward_config::DemoConfig;
use skyward_sky::FrameContext;

/// Camera yaw change per frame, in radians.
const CAMERA_PAN_PER_FRAME: f32 = 0.002;
/// Fixed upward camera tilt so the sun crosses the view.
const CAMERA_PITCH: f32 = 0.6;
const FOV_Y: f32 = 1.0;
const ASPECT: f32 = 16.0 / 9.0;
const NEAR: f32 = 0.1;
const FAR: f32 = 20_000.0;

/// Milliseconds since the Unix epoch, or 0 if the system clock is before it.
pub fn wall_clock_ms() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Produces one [`FrameContext`] per simulated frame.
pub struct SimulatedHost {
    frame: u32,
    start_ms: f64,
    frame_ms: f64,
    walk: Vec3,
}

impl SimulatedHost {
    /// `start_ms` is the wall-clock time of the first frame.
    pub fn new(config: &DemoConfig, start_ms: f64) -> Self {
        Self {
            frame: 0,
            start_ms,
            frame_ms: config.frame_ms,
            walk: Vec3::new(config.walk_speed, 0.0, 0.0),
        }
    }

    pub fn next_frame(&mut self) -> FrameContext {
        let i = self.frame;
        self.frame += 1;
        let elapsed_ms = f64::from(i) * self.frame_ms;
        FrameContext {
            now_ms: self.start_ms + elapsed_ms,
            elapsed_ms,
            player_position: self.walk * i as f32,
            camera_euler: Vec3::new(CAMERA_PITCH, CAMERA_PAN_PER_FRAME * i as f32, 0.0),
        }
    }

    pub fn frames_run(&self) -> u32 {
        self.frame
    }
}

/// View-projection of a camera at the player with the frame's orientation.
pub fn view_projection(ctx: &FrameContext) -> Mat4 {
    let view = Mat4::from_rotation_translation(ctx.camera_rotation(), ctx.player_position).inverse();
    Mat4::perspective_rh(FOV_Y, ASPECT, NEAR, FAR) * view
}
