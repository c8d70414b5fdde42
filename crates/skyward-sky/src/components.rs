//! Startup component list: `{ key, value }` pairs the host hands the plugin.
//!
//! Recognised keys are `skyLight`, `ambientLight`, `hemisphereLight`,
//! `sunLight`, and `moonLight`. Anything else is ignored. Colors arrive as
//! three 0–255 numbers.

use glam::Vec3;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Rgb;
use crate::light::{AmbientLight, HemisphereLight, LightConfig};

pub const SKY_LIGHT_KEY: &str = "skyLight";
pub const AMBIENT_LIGHT_KEY: &str = "ambientLight";
pub const HEMISPHERE_LIGHT_KEY: &str = "hemisphereLight";
pub const SUN_LIGHT_KEY: &str = "sunLight";
pub const MOON_LIGHT_KEY: &str = "moonLight";

/// One entry of the host's component list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppComponent {
    pub key: String,
    pub value: serde_json::Value,
}

impl AppComponent {
    pub fn new(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Errors raised while reading the component list.
#[derive(Debug, Error)]
pub enum ComponentError {
    /// A recognised component did not have the documented shape.
    #[error("malformed `{key}` component: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The component list itself was not a JSON array of `{ key, value }`.
    #[error("invalid component list: {0}")]
    InvalidList(#[source] serde_json::Error),
}

/// Everything the component list configures.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkySettings {
    pub light: LightConfig,
    pub ambient: AmbientLight,
    /// One entry per `hemisphereLight` component, in list order.
    pub hemispheres: Vec<HemisphereLight>,
}

#[derive(Deserialize)]
struct SkyLightValue {
    position: Option<[f32; 3]>,
    speed: Option<f64>,
}

#[derive(Deserialize)]
struct ColorIntensityValue {
    args: ([f32; 3], f32),
}

#[derive(Deserialize)]
struct HemisphereValue {
    args: ([f32; 3], [f32; 3], f32),
    position: Option<[f32; 3]>,
}

/// Parse a JSON array of `{ "key": ..., "value": ... }` objects.
pub fn parse_component_list(json: &str) -> Result<Vec<AppComponent>, ComponentError> {
    serde_json::from_str(json).map_err(ComponentError::InvalidList)
}

/// Fold the component list into [`SkySettings`], starting from defaults.
///
/// Later components of the same key overwrite earlier ones, except
/// `hemisphereLight`, which adds a light per entry.
pub fn parse_components(components: &[AppComponent]) -> Result<SkySettings, ComponentError> {
    let mut settings = SkySettings::default();

    for component in components {
        match component.key.as_str() {
            SKY_LIGHT_KEY => {
                let value: SkyLightValue = decode(component)?;
                if let Some(position) = value.position {
                    settings.light.sky_light_base_position = Vec3::from_array(position);
                }
                settings.light.sky_light_speed = value.speed.unwrap_or(1.0);
            }
            AMBIENT_LIGHT_KEY => {
                let ColorIntensityValue {
                    args: (color, intensity),
                } = decode(component)?;
                settings.ambient = AmbientLight {
                    color: Rgb::from_channels(color),
                    intensity,
                };
            }
            HEMISPHERE_LIGHT_KEY => {
                let value: HemisphereValue = decode(component)?;
                let (sky, ground, intensity) = value.args;
                settings.hemispheres.push(HemisphereLight {
                    sky_color: Rgb::from_channels(sky),
                    ground_color: Rgb::from_channels(ground),
                    intensity,
                    position: value.position.map(Vec3::from_array).unwrap_or(Vec3::Y),
                });
            }
            SUN_LIGHT_KEY => {
                let ColorIntensityValue {
                    args: (color, intensity),
                } = decode(component)?;
                settings.light.sun_color = Rgb::from_channels(color);
                settings.light.sun_intensity = intensity;
            }
            MOON_LIGHT_KEY => {
                let ColorIntensityValue {
                    args: (color, intensity),
                } = decode(component)?;
                settings.light.moon_color = Rgb::from_channels(color);
                settings.light.moon_intensity = intensity;
            }
            other => {
                log::trace!("Ignoring component `{other}`");
            }
        }
    }

    Ok(settings)
}

fn decode<T: DeserializeOwned>(component: &AppComponent) -> Result<T, ComponentError> {
    T::deserialize(&component.value).map_err(|source| ComponentError::Malformed {
        key: component.key.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_list_yields_defaults() {
        let settings = parse_components(&[]).unwrap();
        assert_eq!(settings.ambient.intensity, 0.5);
        assert_eq!(settings.light.sun_color.to_hex(), 0xffffff);
        assert_eq!(settings.light.moon_color.to_hex(), 0x98caf5);
        assert_eq!(settings.light.sky_light_speed, 1.0);
        assert!(settings.hemispheres.is_empty());
    }

    #[test]
    fn test_full_component_list() {
        let components = vec![
            AppComponent::new(
                "skyLight",
                json!({ "position": [1, 2, 3], "speed": 4 }),
            ),
            AppComponent::new("ambientLight", json!({ "args": [[255, 0, 0], 0.25] })),
            AppComponent::new(
                "hemisphereLight",
                json!({ "args": [[0, 0, 255], [0, 255, 0], 1.5], "position": [0, 10, 0] }),
            ),
            AppComponent::new("sunLight", json!({ "args": [[255, 200, 100], 8] })),
            AppComponent::new("moonLight", json!({ "args": [[10, 20, 30], 0.5] })),
        ];
        let settings = parse_components(&components).unwrap();

        assert_eq!(settings.light.sky_light_base_position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(settings.light.sky_light_speed, 4.0);
        assert_eq!(settings.ambient.color.to_hex(), 0xff0000);
        assert_eq!(settings.ambient.intensity, 0.25);
        assert_eq!(settings.hemispheres.len(), 1);
        assert_eq!(settings.hemispheres[0].sky_color.to_hex(), 0x0000ff);
        assert_eq!(settings.hemispheres[0].ground_color.to_hex(), 0x00ff00);
        assert_eq!(settings.hemispheres[0].position, Vec3::new(0.0, 10.0, 0.0));
        assert_eq!(settings.light.sun_color.to_hex(), 0xffc864);
        assert_eq!(settings.light.sun_intensity, 8.0);
        assert_eq!(settings.light.moon_color.to_hex(), 0x0a141e);
        assert_eq!(settings.light.moon_intensity, 0.5);
    }

    #[test]
    fn test_sky_light_speed_defaults_to_one() {
        let components = [AppComponent::new("skyLight", json!({ "position": [0, 5, 0] }))];
        let settings = parse_components(&components).unwrap();
        assert_eq!(settings.light.sky_light_speed, 1.0);
        assert_eq!(settings.light.sky_light_base_position, Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let components = [AppComponent::new("fog", json!({ "density": 0.1 }))];
        assert_eq!(parse_components(&components).unwrap(), SkySettings::default());
    }

    #[test]
    fn test_missing_args_is_malformed() {
        let components = [AppComponent::new("sunLight", json!({ "color": [1, 2, 3] }))];
        let err = parse_components(&components).unwrap_err();
        match err {
            ComponentError::Malformed { key, .. } => assert_eq!(key, "sunLight"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_hemisphere_without_position_points_up() {
        let components = [AppComponent::new(
            "hemisphereLight",
            json!({ "args": [[255, 255, 255], [0, 0, 0], 1] }),
        )];
        let settings = parse_components(&components).unwrap();
        assert_eq!(settings.hemispheres[0].position, Vec3::Y);
    }

    #[test]
    fn test_parse_component_list_json() {
        let json = r#"[
            { "key": "moonLight", "value": { "args": [[0, 0, 0], 1] } },
            { "key": "renderPriority", "value": "high" }
        ]"#;
        let list = parse_component_list(json).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].key, "moonLight");

        assert!(matches!(
            parse_component_list("{\"key\": 1}"),
            Err(ComponentError::InvalidList(_))
        ));
    }
}
