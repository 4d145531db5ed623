use cgmath::{Matrix4, SquareMatrix};

use crate::wgpu_utils::uniform_buffer::UniformBuffer;

/// The closed set of shapes the scene draws. The object population is fixed
/// at startup, so a tagged variant replaces open-ended polymorphism.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshKind {
    Ground,
    Hexagon,
    Cube,
}

/// Per-object surface properties fed to the lighting shaders.
#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
}

impl Material {
    /// White material for textured surfaces; the texture supplies the color.
    pub fn textured() -> Self {
        Self {
            ambient: [1.0, 1.0, 1.0],
            diffuse: [1.0, 1.0, 1.0],
            specular: [1.0, 1.0, 1.0],
            shininess: 10.0,
        }
    }

    /// Slate-blue material for the untextured hexagonal prisms.
    pub fn stone() -> Self {
        Self {
            ambient: [0.35, 0.4, 0.5],
            diffuse: [0.45, 0.55, 0.7],
            specular: [1.0, 1.0, 1.0],
            shininess: 10.0,
        }
    }
}

/// Uniform block uploaded per object per frame.
/// MUST match the ObjectUniform struct in the shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub mvp: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub mat_ambient: [f32; 4],
    pub mat_diffuse: [f32; 4],
    /// rgb specular color, w = shininess exponent
    pub mat_specular: [f32; 4],
}

/// GPU-side state for one object: its uniform buffer and bind group.
pub struct ObjectGpuResources {
    pub uniform: UniformBuffer<ObjectUniform>,
    pub bind_group: wgpu::BindGroup,
}

/// One placed shape in the scene.
///
/// `placement` is the static translation chosen at startup; `model` and
/// `mvp` are overwritten every frame by the orchestrator before the uniform
/// is flushed to the GPU.
pub struct SceneObject {
    pub kind: MeshKind,
    pub placement: Matrix4<f32>,
    pub material: Material,
    pub model: Matrix4<f32>,
    pub mvp: Matrix4<f32>,
    pub gpu_resources: Option<ObjectGpuResources>,
}

impl SceneObject {
    pub fn new(kind: MeshKind, placement: Matrix4<f32>, material: Material) -> Self {
        Self {
            kind,
            placement,
            material,
            model: Matrix4::identity(),
            mvp: Matrix4::identity(),
            gpu_resources: None,
        }
    }

    fn uniform_content(&self) -> ObjectUniform {
        let [ar, ag, ab] = self.material.ambient;
        let [dr, dg, db] = self.material.diffuse;
        let [sr, sg, sb] = self.material.specular;
        ObjectUniform {
            mvp: self.mvp.into(),
            model: self.model.into(),
            mat_ambient: [ar, ag, ab, 0.0],
            mat_diffuse: [dr, dg, db, 1.0],
            mat_specular: [sr, sg, sb, self.material.shininess],
        }
    }

    /// Creates the uniform buffer and bind group for this object.
    pub fn init_gpu_resources(&mut self, device: &wgpu::Device, layout: &wgpu::BindGroupLayout) {
        let uniform = UniformBuffer::new_with_data(device, &self.uniform_content());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Object Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform.binding_resource(),
            }],
        });

        self.gpu_resources = Some(ObjectGpuResources {
            uniform,
            bind_group,
        });
    }

    /// Writes the current matrices and material through to the GPU.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        let content = self.uniform_content();
        if let Some(gpu) = self.gpu_resources.as_mut() {
            gpu.uniform.update_content(queue, content);
        }
    }
}
