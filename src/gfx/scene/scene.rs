use std::time::{Duration, Instant};

use cgmath::{Deg, Matrix4, SquareMatrix, Vector3};

use crate::config::ViewerConfig;
use crate::gfx::camera::{Arcball, FloorBounds, WalkCamera};

use super::object::{Material, MeshKind, SceneObject};

/// Directional light state, threaded into the global uniform each frame.
///
/// The direction's X/Z components rotate with the accumulated spin angle, so
/// the light slowly circles the scene.
#[derive(Debug, Clone, Copy)]
pub struct Lighting {
    pub direction: Vector3<f32>,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            direction: Vector3::new(0.0, 1.0, 1.0),
            ambient: [0.1, 0.1, 0.1],
            diffuse: [1.0, 1.0, 1.0],
            specular: [1.0, 1.0, 1.0],
        }
    }
}

/// Main scene: camera, arcball, lighting, and the fixed object placements.
///
/// `update` runs once per frame and is the only mutation point for the
/// per-object matrices; input handlers mutate the camera and arcball between
/// frames on the same event-loop thread.
pub struct Scene {
    pub camera: WalkCamera,
    pub arcball: Arcball,
    pub objects: Vec<SceneObject>,
    pub lighting: Lighting,
    spin_rate: f32,
    light_phase_scale: f32,
    spin_angle: f32,
    last_frame: Option<Instant>,
}

impl Scene {
    /// Builds the fixed scene layout: the ground plane at the origin and,
    /// for each of three rows, a hexagonal prism and an elevated cube on
    /// both sides of the center aisle.
    pub fn new(config: &ViewerConfig) -> Self {
        let camera = WalkCamera::new(
            Deg(config.fovy_degrees),
            config.znear,
            config.zfar,
            FloorBounds {
                half_extent: config.floor_half_extent,
            },
        );

        let mut objects = vec![SceneObject::new(
            MeshKind::Ground,
            Matrix4::identity(),
            Material::textured(),
        )];
        for z in [-5.0f32, -3.0, -1.0] {
            for x in [3.0f32, -3.0] {
                objects.push(SceneObject::new(
                    MeshKind::Hexagon,
                    Matrix4::from_translation(Vector3::new(x, 0.0, z)),
                    Material::stone(),
                ));
                objects.push(SceneObject::new(
                    MeshKind::Cube,
                    Matrix4::from_translation(Vector3::new(x, 1.5, z)),
                    Material::textured(),
                ));
            }
        }

        Self {
            camera,
            arcball: Arcball::new(),
            objects,
            lighting: Lighting::default(),
            spin_rate: config.spin_rate,
            light_phase_scale: config.light_phase_scale,
            spin_angle: 0.0,
            last_frame: None,
        }
    }

    /// Per-frame steady state: advance the animation clock, refresh the
    /// camera matrices, and recompose every object transform.
    pub fn update(&mut self) {
        let now = Instant::now();
        let dt = self.last_frame.map_or(Duration::ZERO, |last| now - last);
        self.last_frame = Some(now);

        self.advance_animation(dt);
        self.compose_frame();
    }

    /// Accumulates the spin angle from elapsed wall-clock time and derives
    /// the light direction from it, so both are frame-rate independent.
    fn advance_animation(&mut self, dt: Duration) {
        self.spin_angle += self.spin_rate * dt.as_secs_f32();
        let phase = self.spin_angle * self.light_phase_scale;
        self.lighting.direction.x = phase.sin();
        self.lighting.direction.z = phase.cos();
    }

    /// Recomputes model and model-view-projection matrices for every object.
    ///
    /// The arcball rotation is the outermost transform: it rotates the whole
    /// scene about the world origin, independent of each placement. Cubes
    /// additionally spin in place (time-driven yaw over a fixed 45 degree
    /// tilt).
    fn compose_frame(&mut self) {
        self.camera.update_view_proj();
        let view_proj = self.camera.view_projection();
        let rotation = self.arcball.rotation();
        let local_spin = Matrix4::from_angle_y(Deg(self.spin_angle)) * Matrix4::from_angle_z(Deg(45.0));

        for object in &mut self.objects {
            object.model = match object.kind {
                MeshKind::Ground => rotation,
                MeshKind::Hexagon => rotation * object.placement,
                MeshKind::Cube => rotation * object.placement * local_spin,
            };
            object.mvp = view_proj * object.model;
        }
    }

    /// The spin angle in degrees accumulated since startup.
    pub fn spin_angle(&self) -> f32 {
        self.spin_angle
    }

    /// Creates GPU resources for every object. Must be called after the
    /// device is available and before rendering.
    pub fn init_gpu_resources(&mut self, device: &wgpu::Device, layout: &wgpu::BindGroupLayout) {
        for object in self.objects.iter_mut() {
            object.init_gpu_resources(device, layout);
        }
    }

    /// Syncs every object uniform to the GPU.
    pub fn flush_gpu(&mut self, queue: &wgpu::Queue) {
        for object in self.objects.iter_mut() {
            object.update_gpu(queue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn scene() -> Scene {
        Scene::new(&ViewerConfig::default())
    }

    fn matrices_close(a: Matrix4<f32>, b: Matrix4<f32>) -> bool {
        (0..4).all(|c| (0..4).all(|r| (a[c][r] - b[c][r]).abs() < EPSILON))
    }

    #[test]
    fn scene_has_the_fixed_layout() {
        let s = scene();
        assert_eq!(s.objects.len(), 13);
        assert_eq!(
            s.objects.iter().filter(|o| o.kind == MeshKind::Ground).count(),
            1
        );
        assert_eq!(
            s.objects.iter().filter(|o| o.kind == MeshKind::Hexagon).count(),
            6
        );
        assert_eq!(
            s.objects.iter().filter(|o| o.kind == MeshKind::Cube).count(),
            6
        );
    }

    #[test]
    fn animation_accumulates_spin_and_rotates_the_light() {
        let mut s = scene();
        s.advance_animation(Duration::from_millis(500));
        assert!((s.spin_angle() - 50.0).abs() < 1e-3);

        let phase = s.spin_angle() * 0.01;
        assert!((s.lighting.direction.x - phase.sin()).abs() < EPSILON);
        assert!((s.lighting.direction.z - phase.cos()).abs() < EPSILON);
        assert!((s.lighting.direction.y - 1.0).abs() < EPSILON);
    }

    #[test]
    fn spin_rate_is_frame_rate_independent() {
        let mut one_step = scene();
        one_step.advance_animation(Duration::from_millis(400));

        let mut many_steps = scene();
        for _ in 0..40 {
            many_steps.advance_animation(Duration::from_millis(10));
        }
        assert!((one_step.spin_angle() - many_steps.spin_angle()).abs() < 1e-3);
    }

    #[test]
    fn ground_model_is_the_arcball_rotation() {
        let mut s = scene();
        s.arcball.resize(800, 600);
        s.arcball.start(400.0, 300.0);
        s.arcball.end(500.0, 260.0);
        s.compose_frame();

        let ground = &s.objects[0];
        assert_eq!(ground.kind, MeshKind::Ground);
        assert_eq!(ground.model, s.arcball.rotation());
    }

    #[test]
    fn hexagon_model_applies_arcball_outside_the_placement() {
        let mut s = scene();
        s.arcball.resize(800, 600);
        s.arcball.start(400.0, 300.0);
        s.arcball.end(470.0, 330.0);
        s.compose_frame();

        let hexagon = &s.objects[1];
        assert_eq!(hexagon.kind, MeshKind::Hexagon);
        let expected = s.arcball.rotation() * hexagon.placement;
        assert!(matrices_close(hexagon.model, expected));
    }

    #[test]
    fn mvp_is_view_projection_times_model() {
        let mut s = scene();
        s.camera.resize_projection(800, 600);
        s.compose_frame();

        for object in &s.objects {
            let expected = s.camera.view_projection() * object.model;
            assert!(matrices_close(object.mvp, expected));
        }
    }

    #[test]
    fn cube_model_embeds_the_local_tilt() {
        let mut s = scene();
        s.compose_frame();

        // identity arcball and zero spin leave translation * 45-degree tilt
        let cube = &s.objects[2];
        assert_eq!(cube.kind, MeshKind::Cube);
        let expected = cube.placement * Matrix4::from_angle_z(Deg(45.0));
        assert!(matrices_close(cube.model, expected));
    }
}
