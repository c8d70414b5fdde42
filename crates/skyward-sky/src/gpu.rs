//! GPU uniform buffers for the sky dome, cloud layer, and sky light.
//!
//! One bind group with three uniform buffers, rewritten every frame with
//! `queue.write_buffer`. The matching WGSL block declarations live beside
//! the CPU structs ([`SKY_UNIFORMS_WGSL`], [`CLOUD_UNIFORMS_WGSL`], [`SKY_LIGHT_WGSL`]).

use crate::cloud::{CLOUD_UNIFORMS_WGSL, CloudUniforms, CloudUniformsGpu};
use crate::light::{SkyLightOutput, SkyLightUniform};
use crate::sky::{SKY_UNIFORMS_WGSL, SkyUniforms, SkyUniformsGpu};

/// Uniform block declaration matching [`SkyLightUniform`].
pub const SKY_LIGHT_WGSL: &str = r#"
struct SkyLight {
    position_intensity: vec4<f32>,
    color_padding: vec4<f32>,
};
"#;

/// Bindings used by the sky and cloud shaders.
pub const SKY_BINDINGS_WGSL: &str = r#"
@group(0) @binding(0) var<uniform> sky: SkyUniforms;
@group(0) @binding(1) var<uniform> clouds: CloudUniforms;
@group(0) @binding(2) var<uniform> sky_light: SkyLight;
"#;

/// Full WGSL prelude: the three uniform structs plus their bindings.
pub fn wgsl_prelude() -> String {
    [
        SKY_UNIFORMS_WGSL,
        CLOUD_UNIFORMS_WGSL,
        SKY_LIGHT_WGSL,
        SKY_BINDINGS_WGSL,
    ]
    .concat()
}

/// The sky's uniform buffers and their bind group.
pub struct SkyGpuUniforms {
    sky_buffer: wgpu::Buffer,
    cloud_buffer: wgpu::Buffer,
    light_buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl SkyGpuUniforms {
    pub fn new(device: &wgpu::Device) -> Self {
        let sky_buffer = uniform_buffer(device, "sky-uniforms", size_of::<SkyUniformsGpu>());
        let cloud_buffer = uniform_buffer(device, "cloud-uniforms", size_of::<CloudUniformsGpu>());
        let light_buffer = uniform_buffer(device, "sky-light-uniforms", size_of::<SkyLightUniform>());

        let entry = |binding: u32, size: usize| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: std::num::NonZeroU64::new(size as u64),
            },
            count: None,
        };

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sky-uniforms-bgl"),
            entries: &[
                entry(0, size_of::<SkyUniformsGpu>()),
                entry(1, size_of::<CloudUniformsGpu>()),
                entry(2, size_of::<SkyLightUniform>()),
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sky-uniforms-bg"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: sky_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: cloud_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: light_buffer.as_entire_binding(),
                },
            ],
        });

        log::debug!("Sky uniform buffers created");

        Self {
            sky_buffer,
            cloud_buffer,
            light_buffer,
            bind_group_layout,
            bind_group,
        }
    }

    /// Upload this frame's uniforms.
    pub fn write(
        &self,
        queue: &wgpu::Queue,
        sky: &SkyUniforms,
        cloud: &CloudUniforms,
        light: &SkyLightOutput,
    ) {
        queue.write_buffer(&self.sky_buffer, 0, bytemuck::bytes_of(&sky.to_gpu()));
        queue.write_buffer(&self.cloud_buffer, 0, bytemuck::bytes_of(&cloud.to_gpu()));
        queue.write_buffer(&self.light_buffer, 0, bytemuck::bytes_of(&light.to_uniform()));
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// Request a device without a surface, for offscreen uniform upload.
///
/// Returns `None` when no adapter is available (e.g. CI without a GPU).
pub fn request_headless_device() -> Option<(wgpu::Device, wgpu::Queue)> {
    pollster::block_on(async {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::warn!("No GPU adapter for uniform upload: {e}");
                return None;
            }
        };

        let info = adapter.get_info();
        log::info!("Selected GPU: {} ({:?})", info.name, info.backend);

        match adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("skyward-device"),
                ..Default::default()
            })
            .await
        {
            Ok(pair) => Some(pair),
            Err(e) => {
                log::warn!("Failed to create GPU device: {e}");
                None
            }
        }
    })
}

fn uniform_buffer(device: &wgpu::Device, label: &str, size: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: size as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_sizes_are_16_byte_multiples() {
        for size in [
            size_of::<SkyUniformsGpu>(),
            size_of::<CloudUniformsGpu>(),
            size_of::<SkyLightUniform>(),
        ] {
            assert_eq!(size % 16, 0, "uniform size {size} breaks std140 alignment");
        }
    }

    #[test]
    fn test_uniforms_upload_to_headless_device() {
        let Some((device, queue)) = request_headless_device() else {
            return;
        };
        let gpu = SkyGpuUniforms::new(&device);
        let sky = SkyUniforms {
            sun_position: glam::Vec3::Y,
            moon_position: -glam::Vec3::Y,
            time: 1.0,
            sky_box_radius: 10_000.0,
        };
        let cloud = CloudUniforms {
            sun_position: glam::Vec3::Y,
            time: 1.0,
            cloud_radius: 8_000.0,
        };
        let light = SkyLightOutput {
            color: crate::color::Rgb::WHITE,
            intensity: 6.0,
            position: glam::Vec3::Y,
        };
        gpu.write(&queue, &sky, &cloud, &light);
        queue.submit(std::iter::empty());
        let _ = gpu.bind_group();
    }

    #[test]
    fn test_prelude_declares_every_binding() {
        let prelude = wgsl_prelude();
        for needle in [
            "struct SkyUniforms",
            "struct CloudUniforms",
            "struct SkyLight",
            "@binding(0) var<uniform> sky",
            "@binding(1) var<uniform> clouds",
            "@binding(2) var<uniform> sky_light",
        ] {
            assert!(prelude.contains(needle), "missing `{needle}`");
        }
    }
}
