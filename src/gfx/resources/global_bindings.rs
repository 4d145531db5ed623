//! Global uniform bindings for camera and lighting data
//!
//! Manages the uniform buffer and bind group for per-frame state shared by
//! every object in the scene: the camera eye position and the directional
//! light.

use cgmath::Vector3;

use crate::gfx::scene::Lighting;
use crate::wgpu_utils::uniform_buffer::UniformBuffer;

/// Global uniform buffer content structure
///
/// MUST match the Globals struct in the shaders exactly. Every vector is
/// padded to 16 bytes so the WGSL and Rust layouts agree.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    light_dir: [f32; 4],
    light_ambient: [f32; 4],
    light_diffuse: [f32; 4],
    light_specular: [f32; 4],
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Updates the global uniform buffer with this frame's camera eye and light
/// state. Called once per frame before encoding the render pass.
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    eye: Vector3<f32>,
    lighting: &Lighting,
) {
    let [ar, ag, ab] = lighting.ambient;
    let [dr, dg, db] = lighting.diffuse;
    let [sr, sg, sb] = lighting.specular;
    let content = GlobalUBOContent {
        view_position: [eye.x, eye.y, eye.z, 1.0],
        light_dir: [
            lighting.direction.x,
            lighting.direction.y,
            lighting.direction.z,
            0.0,
        ],
        light_ambient: [ar, ag, ab, 0.0],
        light_diffuse: [dr, dg, db, 0.0],
        light_specular: [sr, sg, sb, 0.0],
    };

    ubo.update_content(queue, content);
}

/// Manages the bind group layout and bind group for global uniforms.
/// Bound to slot 0 in both render pipelines.
pub struct GlobalBindings {
    layout: wgpu::BindGroupLayout,
    bind_group: Option<wgpu::BindGroup>,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Globals Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        GlobalBindings {
            layout,
            bind_group: None,
        }
    }

    /// Creates the bind group with the provided uniform buffer. Must run
    /// before the first frame.
    pub fn create_bind_group(&mut self, device: &wgpu::Device, ubo: &GlobalUBO) {
        self.bind_group = Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Globals Bind Group"),
            layout: &self.layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.binding_resource(),
            }],
        }));
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    /// # Panics
    /// Panics if `create_bind_group()` hasn't been called yet
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        self.bind_group
            .as_ref()
            .expect("Bind group has not been created yet!")
    }
}
