//! Celestial clock: wall-clock time to sun/moon azimuth and direction.
//!
//! Azimuth is a normalized cyclic value in `[0.0, 1.0)`. The first half of the
//! cycle is day (sun above the horizon), the second half is night. The moon
//! always sits exactly opposite the sun.

use std::f64::consts::PI;

use glam::{DVec3, Vec3};

/// Azimuth at `now_ms == 0`.
pub const AZIMUTH_OFFSET: f64 = 0.05;

/// Wall-clock milliseconds per azimuth step.
pub const MS_PER_STEP: f64 = 5000.0;

/// Azimuth advanced per step at speed 1.
pub const AZIMUTH_PER_STEP: f64 = 0.1;

/// Inclination of the sun/moon path. Flat ecliptic; no configuration path.
pub const INCLINATION: f64 = 0.0;

/// Azimuth at which day turns into night.
pub const DUSK_AZIMUTH: f64 = 0.5;

/// Whether the sun or the moon is lighting the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CelestialPhase {
    Day,
    Night,
}

/// Sun/moon position for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CelestialState {
    /// Normalized position along the daily arc, `[0.0, 1.0)`.
    pub azimuth: f64,
    /// Tilt of the arc relative to the horizon plane.
    pub inclination: f64,
    /// Unit vector toward the sun. The moon is at `-direction`.
    pub direction: Vec3,
}

impl CelestialState {
    /// Build a state from raw angles. `azimuth` is wrapped into `[0.0, 1.0)`.
    pub fn from_angles(azimuth: f64, inclination: f64) -> Self {
        let azimuth = wrap_unit(azimuth);
        Self {
            azimuth,
            inclination,
            direction: direction_from_angles(azimuth, inclination).as_vec3(),
        }
    }

    /// `true` while the sun is up (`azimuth < 0.5`).
    pub fn is_day(&self) -> bool {
        self.azimuth < DUSK_AZIMUTH
    }

    pub fn phase(&self) -> CelestialPhase {
        if self.is_day() {
            CelestialPhase::Day
        } else {
            CelestialPhase::Night
        }
    }

    pub fn sun_direction(&self) -> Vec3 {
        self.direction
    }

    pub fn moon_direction(&self) -> Vec3 {
        -self.direction
    }
}

/// Compute the azimuth for a wall-clock timestamp.
///
/// `azimuth = (0.05 + (now_ms / 5000) * 0.1 * speed) mod 1`
pub fn azimuth_at(now_ms: f64, speed_multiplier: f64) -> f64 {
    wrap_unit(AZIMUTH_OFFSET + (now_ms / MS_PER_STEP) * AZIMUTH_PER_STEP * speed_multiplier)
}

/// Advance the clock to `now_ms` at the given speed and derive the full state.
pub fn advance(now_ms: f64, speed_multiplier: f64) -> CelestialState {
    CelestialState::from_angles(azimuth_at(now_ms, speed_multiplier), INCLINATION)
}

/// Spherical to Cartesian conversion of the sun direction.
///
/// ```text
/// theta = PI * (inclination - 0.5)
/// phi   = 2 * PI * (azimuth - 0.5)
/// dir   = (cos(phi), sin(phi) * sin(theta), sin(phi) * cos(theta))
/// ```
pub fn direction_from_angles(azimuth: f64, inclination: f64) -> DVec3 {
    let theta = PI * (inclination - 0.5);
    let phi = 2.0 * PI * (azimuth - 0.5);
    DVec3::new(
        phi.cos(),
        phi.sin() * theta.sin(),
        phi.sin() * theta.cos(),
    )
}

/// Length of one full day/night cycle in wall-clock milliseconds.
///
/// Returns `None` when the clock is frozen (`speed == 0`).
pub fn period_ms(speed_multiplier: f64) -> Option<f64> {
    if speed_multiplier == 0.0 {
        return None;
    }
    Some(MS_PER_STEP / (AZIMUTH_PER_STEP * speed_multiplier.abs()))
}

/// `rem_euclid` can round up to exactly 1.0 for tiny negative inputs.
fn wrap_unit(value: f64) -> f64 {
    let wrapped = value.rem_euclid(1.0);
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

/// Celestial clock bound to a fixed speed multiplier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CelestialClock {
    /// Multiplier on how fast the azimuth advances. 0 freezes the sky.
    pub speed: f64,
}

impl CelestialClock {
    pub fn new(speed: f64) -> Self {
        Self { speed }
    }

    /// State of the sky at wall-clock `now_ms`.
    pub fn advance(&self, now_ms: f64) -> CelestialState {
        advance(now_ms, self.speed)
    }

    pub fn period_ms(&self) -> Option<f64> {
        period_ms(self.speed)
    }
}

impl Default for CelestialClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_azimuth_stays_in_unit_range() {
        let samples = [
            -1.0e12, -123_456.7, -1.0, 0.0, 1.0, 2_500.0, 49_999.0, 50_000.0, 1.7e12,
        ];
        for &now in &samples {
            for &speed in &[0.0, 0.5, 1.0, 3.0, -2.0] {
                let az = azimuth_at(now, speed);
                assert!(
                    (0.0..1.0).contains(&az),
                    "azimuth {az} out of range for now={now} speed={speed}"
                );
            }
        }
    }

    #[test]
    fn test_azimuth_is_periodic() {
        for &speed in &[1.0, 2.0, 0.25] {
            let period = period_ms(speed).unwrap();
            for &now in &[0.0, 1_234.0, 98_765.0] {
                let a = azimuth_at(now, speed);
                let b = azimuth_at(now + period, speed);
                let diff = (a - b).abs();
                assert!(
                    diff < 1e-9 || (1.0 - diff) < 1e-9,
                    "speed={speed} now={now}: {a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn test_period_at_unit_speed_is_fifty_seconds() {
        assert_eq!(period_ms(1.0), Some(50_000.0));
        assert_eq!(CelestialClock::new(2.0).period_ms(), Some(25_000.0));
        assert_eq!(period_ms(0.0), None);
    }

    #[test]
    fn test_direction_is_unit_length() {
        for i in 0..=200 {
            let azimuth = i as f64 / 200.0;
            for &inclination in &[0.0, 0.1, 0.25, 0.5, 0.9] {
                let len = direction_from_angles(azimuth, inclination).length();
                assert!(
                    (len - 1.0).abs() < 1e-12,
                    "azimuth={azimuth} inclination={inclination}: length {len}"
                );
                let state = CelestialState::from_angles(azimuth, inclination);
                assert!((state.direction.length() - 1.0).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_day_night_boundary() {
        assert!(CelestialState::from_angles(0.0, INCLINATION).is_day());
        assert!(CelestialState::from_angles(0.499_999, INCLINATION).is_day());
        assert!(!CelestialState::from_angles(0.5, INCLINATION).is_day());
        assert_eq!(
            CelestialState::from_angles(0.75, INCLINATION).phase(),
            CelestialPhase::Night
        );
    }

    #[test]
    fn test_zero_speed_freezes_the_sky() {
        let first = advance(0.0, 0.0);
        for &now in &[1.0, 60_000.0, 1.7e12] {
            assert_eq!(advance(now, 0.0), first);
        }
        assert!((first.azimuth - AZIMUTH_OFFSET).abs() < 1e-12);
    }

    #[test]
    fn test_epoch_state() {
        let state = advance(0.0, 1.0);
        assert!((state.azimuth - 0.05).abs() < 1e-12);
        assert!(state.is_day());

        // theta = -PI/2, so y = -sin(phi) and z vanishes.
        let phi = 2.0 * PI * (0.05 - 0.5);
        let expected = Vec3::new(phi.cos() as f32, -phi.sin() as f32, 0.0);
        assert!(
            (state.direction - expected).length() < 1e-6,
            "got {:?}, expected {expected:?}",
            state.direction
        );
    }

    #[test]
    fn test_sun_above_horizon_during_day() {
        for i in 1..100 {
            let state = CelestialState::from_angles(i as f64 / 200.0, INCLINATION);
            assert!(state.is_day());
            assert!(state.direction.y > 0.0, "azimuth {}", state.azimuth);
        }
    }

    #[test]
    fn test_moon_opposes_sun() {
        let state = advance(12_345.0, 1.0);
        assert_eq!(state.moon_direction(), -state.sun_direction());
    }

    #[test]
    fn test_clock_matches_free_function() {
        let clock = CelestialClock::new(1.5);
        assert_eq!(clock.advance(7_000.0), advance(7_000.0, 1.5));
        assert_eq!(CelestialClock::default().speed, 1.0);
    }
}
