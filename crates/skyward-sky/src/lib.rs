//! Procedural day/night sky: celestial clock, sun/moon light cycle, sky dome and
//! cloud layer uniforms, and the sun's lens-flare rig.
//!
//! Everything is driven from a single per-frame callback registered on a
//! [`FrameScheduler`]. Each tick computes one [`CelestialState`] and threads it
//! through every renderer so all of them agree on the sun position for that frame.

pub mod assets;
pub mod celestial;
pub mod cloud;
pub mod color;
pub mod components;
pub mod gpu;
pub mod host;
pub mod lens_flare;
pub mod light;
pub mod moon;
pub mod plugin;
pub mod schedule;
pub mod sky;
pub mod uniforms;

pub use assets::{AssetBundle, AssetError, ImageTextureLoader, TextureHandle, TextureLoader, WrapMode};
pub use celestial::{CelestialClock, CelestialPhase, CelestialState, advance};
pub use cloud::{CloudLayer, CloudUniforms};
pub use color::Rgb;
pub use components::{AppComponent, ComponentError, SkySettings, parse_component_list, parse_components};
pub use gpu::{SkyGpuUniforms, request_headless_device};
pub use host::{AppNode, FrameContext, RecordingSkyLight, SceneObject, SkyLight};
pub use lens_flare::{FlareElement, FlareSprite, LensFlareRig, PointLight, SunVisibility};
pub use light::{AmbientLight, HemisphereLight, LightConfig, SkyLightOutput};
pub use moon::Moon;
pub use plugin::{SharedSkyPlugin, SkyPlugin, SkyPluginOptions};
pub use schedule::{FrameScheduler, FrameSubscription};
pub use sky::{SkyDome, SkyUniforms};
pub use uniforms::UniformValue;
