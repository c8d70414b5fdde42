//! Headless Skyward driver.
//!
//! Loads config and the startup component list, builds the sky plugin, and
//! drives it from a simulated host loop, logging every sunrise and moonrise.
//!
//! Run with: `cargo run -p skyward-demo -- --frames 3000 --speed 4`

mod sim;

use clap::Parser;
use skyward_config::{CliArgs, Config, default_config_dir};
use skyward_sky::{
    AppComponent, AssetBundle, CelestialPhase, FrameScheduler, ImageTextureLoader,
    RecordingSkyLight, SkyGpuUniforms, SkyPlugin, SkyPluginOptions, parse_component_list,
    request_headless_device,
};
use tracing::{error, info, warn};

use sim::{SimulatedHost, view_projection, wall_clock_ms};

fn main() {
    let args = CliArgs::parse();
    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);

    let (mut config, load_error) = match Config::load_or_create(&config_dir) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    config.apply_cli_overrides(&args);

    skyward_log::init_logging(
        Some(&config_dir.join("logs")),
        cfg!(debug_assertions),
        Some(&config),
    );

    if let Some(e) = load_error {
        warn!("{e}; using default config");
    }

    let components = match load_components(&config) {
        Ok(components) => components,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let assets = AssetBundle::load(&ImageTextureLoader, &config.assets.base_path);
    let options = SkyPluginOptions {
        sky_box_radius: config.sky.sky_box_radius,
        cloud_radius: config.sky.cloud_radius,
        sun_moon_rotation_radius: config.sun_moon_rotation_radius(),
        speed_override: config.sky.speed_override,
    };

    let plugin = match SkyPlugin::new(&assets, &components, RecordingSkyLight::default(), options) {
        Ok(plugin) => plugin,
        Err(e) => {
            error!("Failed to build sky plugin: {e}");
            std::process::exit(1);
        }
    };

    let mut scheduler = FrameScheduler::new();
    let (plugin, subscription) = plugin.install(&mut scheduler);
    let start_ms = config.demo.start_ms.unwrap_or_else(wall_clock_ms);
    let mut host = SimulatedHost::new(&config.demo, start_ms);

    let gpu = if config.demo.gpu_upload {
        request_headless_device().map(|(device, queue)| {
            let uniforms = SkyGpuUniforms::new(&device);
            (device, queue, uniforms)
        })
    } else {
        None
    };
    if config.demo.gpu_upload && gpu.is_none() {
        warn!("Continuing without GPU uniform upload");
    }

    info!(
        "Simulating {} frames at {}ms per frame from t={start_ms}ms",
        config.demo.frames, config.demo.frame_ms
    );

    let mut phase: Option<CelestialPhase> = None;
    let mut transitions = 0u32;
    let mut flare_frames = 0u32;
    for _ in 0..config.demo.frames {
        let ctx = host.next_frame();
        scheduler.dispatch(&ctx);

        let plugin = plugin.borrow();
        if let Some((_device, queue, uniforms)) = &gpu {
            plugin.write_gpu(uniforms, queue);
            queue.submit(std::iter::empty());
        }
        if plugin.flare_layout(view_projection(&ctx)).is_some() {
            flare_frames += 1;
        }

        let Some(state) = plugin.last_state() else {
            continue;
        };
        if phase != Some(state.phase()) {
            if phase.is_some() {
                transitions += 1;
            }
            phase = Some(state.phase());
            let light = plugin.sky_light();
            info!(
                t_ms = ctx.now_ms,
                azimuth = state.azimuth,
                color = %light.color,
                intensity = light.intensity,
                "{:?} begins",
                state.phase()
            );
        }
    }

    let cancelled = scheduler.cancel(subscription);
    let plugin = plugin.borrow();
    let sky = plugin.sky().uniforms();
    info!(
        frames = host.frames_run(),
        transitions,
        flare_frames,
        gpu_upload = gpu.is_some(),
        cancelled,
        "Done. Player at {:?}, sun uniform at {:?}, moon uniform at {:?}",
        plugin.app().position,
        sky.sun_position,
        sky.moon_position
    );
}

fn load_components(config: &Config) -> Result<Vec<AppComponent>, String> {
    let Some(path) = &config.demo.components_path else {
        return Ok(Vec::new());
    };
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read components {}: {e}", path.display()))?;
    let components = parse_component_list(&json).map_err(|e| e.to_string())?;
    info!("Loaded {} components from {}", components.len(), path.display());
    Ok(components)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_components_parse() {
        let json = include_str!("../components.json");
        let components = parse_component_list(json).unwrap();
        assert_eq!(components.len(), 5);
        let settings = skyward_sky::parse_components(&components).unwrap();
        assert_eq!(settings.light.sky_light_speed, 4.0);
        assert_eq!(settings.hemispheres.len(), 1);
    }

    #[test]
    fn test_no_components_path_means_empty_list() {
        let config = Config::default();
        assert!(load_components(&config).unwrap().is_empty());
    }
}
