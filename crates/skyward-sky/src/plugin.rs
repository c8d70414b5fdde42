//! The sky plugin: builds the scene once, then updates it every frame.

use std::cell::RefCell;
use std::rc::Rc;

use glam::{Mat4, Vec3};

use crate::assets::AssetBundle;
use crate::celestial::{CelestialClock, CelestialPhase, CelestialState};
use crate::cloud::CloudLayer;
use crate::components::{AppComponent, ComponentError, SkySettings, parse_components};
use crate::gpu::SkyGpuUniforms;
use crate::host::{AppNode, FrameContext, RENDER_PRIORITY_HIGH, RENDER_PRIORITY_KEY, SceneObject, SkyLight};
use crate::lens_flare::{FlareSprite, LensFlareRig, SunVisibility};
use crate::light::{self, AmbientLight, HemisphereLight, LightConfig, SkyLightOutput};
use crate::moon::Moon;
use crate::schedule::{FrameScheduler, FrameSubscription};
use crate::sky::SkyDome;

/// Plugin shared with the frame callback it registers.
pub type SharedSkyPlugin<L> = Rc<RefCell<SkyPlugin<L>>>;

/// Geometry and clock overrides the host supplies alongside the component list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkyPluginOptions {
    pub sky_box_radius: f32,
    pub cloud_radius: f32,
    /// Distance of the sun light and moon from the app node.
    pub sun_moon_rotation_radius: f32,
    /// Beats `skyLight.speed` when set.
    pub speed_override: Option<f64>,
}

impl Default for SkyPluginOptions {
    fn default() -> Self {
        Self {
            sky_box_radius: 10_000.0,
            cloud_radius: 8_000.0,
            sun_moon_rotation_radius: 5_000.0,
            speed_override: None,
        }
    }
}

/// Day/night sky: sky light, dome, clouds, sun flare rig, and moon.
#[derive(Debug)]
pub struct SkyPlugin<L: SkyLight> {
    app: AppNode,
    sky_light: L,
    light_config: LightConfig,
    ambient: AmbientLight,
    hemispheres: Vec<HemisphereLight>,
    clock: CelestialClock,
    sky: SkyDome,
    cloud: CloudLayer,
    sun: LensFlareRig,
    moon: Moon,
    sun_moon_rotation_radius: f32,
    last_state: Option<CelestialState>,
    last_light: Option<SkyLightOutput>,
}

impl<L: SkyLight> SkyPlugin<L> {
    /// Build the plugin from the startup component list.
    ///
    /// Fails only when a recognised component is malformed.
    pub fn new(
        assets: &AssetBundle,
        components: &[AppComponent],
        sky_light: L,
        options: SkyPluginOptions,
    ) -> Result<Self, ComponentError> {
        let settings = parse_components(components)?;
        Ok(Self::with_settings(assets, settings, sky_light, options))
    }

    /// Build the plugin from already-parsed settings.
    pub fn with_settings(
        assets: &AssetBundle,
        settings: SkySettings,
        sky_light: L,
        options: SkyPluginOptions,
    ) -> Self {
        let SkySettings {
            light: light_config,
            ambient,
            hemispheres,
        } = settings;

        let mut app = AppNode::new();
        app.add(SceneObject::AmbientLight);
        for _ in &hemispheres {
            app.add(SceneObject::HemisphereLight);
        }
        app.add(SceneObject::SkyLight);
        app.add(SceneObject::SkyLightTarget);
        app.add(SceneObject::SkyDome);
        app.add(SceneObject::Moon);
        app.add(SceneObject::SunLight);
        app.add(SceneObject::CloudLayer);
        app.set_component(RENDER_PRIORITY_KEY, RENDER_PRIORITY_HIGH);

        let speed = options
            .speed_override
            .unwrap_or(light_config.sky_light_speed);

        log::info!(
            "Sky plugin ready: dome radius {}, cloud radius {}, speed x{speed}, {} hemisphere light(s)",
            options.sky_box_radius,
            options.cloud_radius,
            hemispheres.len()
        );

        Self {
            app,
            sky_light,
            light_config,
            ambient,
            hemispheres,
            clock: CelestialClock::new(speed),
            sky: SkyDome::new(options.sky_box_radius, assets),
            cloud: CloudLayer::new(options.cloud_radius, assets),
            sun: LensFlareRig::sun(assets),
            moon: Moon::new(assets),
            sun_moon_rotation_radius: options.sun_moon_rotation_radius,
            last_state: None,
            last_light: None,
        }
    }

    /// Run one frame.
    ///
    /// The player position is read once from `ctx` and used for both the app
    /// node and every uniform, so they never disagree within a frame.
    pub fn frame(&mut self, ctx: &FrameContext) -> CelestialState {
        let player = ctx.player_position;
        self.app.position = player;

        let state = self.clock.advance(ctx.now_ms);
        self.log_phase_change(&state);

        let output = light::update(&state, &self.light_config);
        self.sky_light.apply(&output);

        self.sun
            .update(&state, self.sun_moon_rotation_radius, ctx.camera_roll());
        self.moon
            .update(&state, self.sun_moon_rotation_radius, ctx.camera_rotation());

        let elapsed = ctx.elapsed_seconds();
        self.sky.update(&state, player, elapsed);
        self.cloud.update(&state, player, elapsed);
        self.app.update_matrix_world();

        self.last_state = Some(state);
        self.last_light = Some(output);
        state
    }

    /// Register [`frame`](Self::frame) on the scheduler.
    ///
    /// The returned handle shares the plugin with the callback; cancel the
    /// subscription to stop updates.
    pub fn install(self, scheduler: &mut FrameScheduler) -> (SharedSkyPlugin<L>, FrameSubscription)
    where
        L: 'static,
    {
        let shared = Rc::new(RefCell::new(self));
        let callback_ref = Rc::clone(&shared);
        let subscription = scheduler.on_frame(move |ctx| {
            callback_ref.borrow_mut().frame(ctx);
        });
        (shared, subscription)
    }

    /// Copy this frame's uniforms to the GPU.
    pub fn write_gpu(&self, gpu: &SkyGpuUniforms, queue: &wgpu::Queue) {
        let Some(light) = self.last_light else {
            return;
        };
        gpu.write(queue, self.sky.uniforms(), self.cloud.uniforms(), &light);
    }

    /// Screen-space flare sprites for a camera, or `None` while the sun is
    /// hidden or off screen.
    pub fn flare_layout(&self, view_proj: Mat4) -> Option<Vec<FlareSprite>> {
        self.sun.layout(self.sun_world_position(), view_proj)
    }

    fn log_phase_change(&self, state: &CelestialState) {
        let previous = self.last_state.map(|s| s.phase());
        if previous == Some(state.phase()) {
            return;
        }
        match state.phase() {
            CelestialPhase::Day => log::debug!("Sunrise at azimuth {:.3}", state.azimuth),
            CelestialPhase::Night => log::debug!("Moonrise at azimuth {:.3}", state.azimuth),
        }
    }

    pub fn app(&self) -> &AppNode {
        &self.app
    }

    pub fn sky_light(&self) -> &L {
        &self.sky_light
    }

    pub fn light_config(&self) -> &LightConfig {
        &self.light_config
    }

    pub fn ambient(&self) -> &AmbientLight {
        &self.ambient
    }

    pub fn hemispheres(&self) -> &[HemisphereLight] {
        &self.hemispheres
    }

    pub fn clock(&self) -> &CelestialClock {
        &self.clock
    }

    pub fn sky(&self) -> &SkyDome {
        &self.sky
    }

    pub fn cloud(&self) -> &CloudLayer {
        &self.cloud
    }

    pub fn sun(&self) -> &LensFlareRig {
        &self.sun
    }

    pub fn moon(&self) -> &Moon {
        &self.moon
    }

    pub fn sun_visibility(&self) -> SunVisibility {
        self.sun.visibility()
    }

    /// State computed by the most recent frame.
    pub fn last_state(&self) -> Option<CelestialState> {
        self.last_state
    }

    pub fn last_light(&self) -> Option<SkyLightOutput> {
        self.last_light
    }

    /// World position of the sun light (app position plus the orbit offset).
    pub fn sun_world_position(&self) -> Vec3 {
        self.app.position + self.sun.light.position
    }
}
