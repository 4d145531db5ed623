//! Walking camera: eye position plus a forward vector, constrained to a
//! square floor region. The camera yaws about the world up axis and moves
//! along its view direction at constant height; it cannot pitch.

use cgmath::{perspective, Deg, EuclideanSpace, Matrix4, Point3, SquareMatrix, Vector3};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Open-interval bound on the camera's X/Z position, matching the extent of
/// the modeled floor.
#[derive(Debug, Clone, Copy)]
pub struct FloorBounds {
    pub half_extent: f32,
}

impl FloorBounds {
    /// True when both coordinates lie strictly inside the bound.
    pub fn contains(&self, x: f32, z: f32) -> bool {
        x > -self.half_extent
            && x < self.half_extent
            && z > -self.half_extent
            && z < self.half_extent
    }
}

impl Default for FloorBounds {
    fn default() -> Self {
        Self { half_extent: 10.0 }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WalkCamera {
    pub eye: Vector3<f32>,
    pub forward: Vector3<f32>,
    pub bounds: FloorBounds,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
    aspect: f32,
    projection: Matrix4<f32>,
    view_proj: Matrix4<f32>,
}

impl WalkCamera {
    pub fn new(fovy: Deg<f32>, znear: f32, zfar: f32, bounds: FloorBounds) -> Self {
        let mut camera = Self {
            eye: Vector3::new(0.0, 3.0, 3.0),
            forward: Vector3::new(0.0, -0.7071, -0.7071),
            bounds,
            fovy,
            znear,
            zfar,
            aspect: 1.0,
            projection: Matrix4::identity(),
            view_proj: Matrix4::identity(),
        };
        camera.rebuild_projection();
        camera.update_view_proj();
        camera
    }

    /// Yaws the view direction about the world up axis. Y is untouched.
    pub fn rotate(&mut self, angle: f32) {
        let (sin_a, cos_a) = angle.sin_cos();
        let new_z = cos_a * self.forward.z - sin_a * self.forward.x;
        let new_x = sin_a * self.forward.z + cos_a * self.forward.x;
        self.forward.x = new_x;
        self.forward.z = new_z;
    }

    /// Moves the eye along the view direction on the X/Z plane, keeping the
    /// camera at constant height.
    ///
    /// The whole move is committed only if the proposed position stays
    /// strictly inside the floor bound on both axes; otherwise the camera is
    /// left where it was and no error is surfaced.
    pub fn advance(&mut self, distance: f32) {
        let new_x = self.eye.x + distance * self.forward.x;
        let new_z = self.eye.z + distance * self.forward.z;
        if self.bounds.contains(new_x, new_z) {
            self.eye.x = new_x;
            self.eye.z = new_z;
        }
    }

    /// The point the camera looks at, derived from eye and forward.
    pub fn look_at(&self) -> Point3<f32> {
        Point3::from_vec(self.eye + self.forward)
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(Point3::from_vec(self.eye), self.look_at(), Vector3::unit_y())
    }

    /// Recomputes the cached projection for a new viewport. Must run on
    /// every resize event.
    pub fn resize_projection(&mut self, width: u32, height: u32) {
        debug_assert!(width > 0 && height > 0, "projection viewport must be non-empty");
        self.aspect = width as f32 / height as f32;
        self.rebuild_projection();
    }

    fn rebuild_projection(&mut self) {
        self.projection =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
    }

    /// Rebuilds the frame's view-projection matrix from the current eye and
    /// forward vector. Called once per frame before transform composition.
    pub fn update_view_proj(&mut self) {
        self.view_proj = self.projection * self.view_matrix();
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.view_proj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn camera() -> WalkCamera {
        WalkCamera::new(Deg(90.0), 0.001, 1000.0, FloorBounds::default())
    }

    #[test]
    fn advance_moves_along_the_view_direction() {
        let mut cam = camera();
        cam.advance(0.5);
        assert!((cam.eye.x - 0.0).abs() < EPSILON);
        assert!((cam.eye.y - 3.0).abs() < EPSILON);
        assert!((cam.eye.z - (3.0 - 0.5 * 0.7071)).abs() < EPSILON);
    }

    #[test]
    fn advance_stops_at_the_floor_bound() {
        let mut cam = camera();
        for _ in 0..50 {
            cam.advance(0.5);
        }
        let settled = cam.eye;
        assert!(settled.z > -10.0);

        cam.advance(0.5);
        assert_eq!(settled, cam.eye);
    }

    #[test]
    fn advance_rejects_the_whole_move_when_one_axis_escapes() {
        let mut cam = camera();
        cam.eye = Vector3::new(9.8, 3.0, 0.0);
        cam.forward = Vector3::new(1.0, 0.0, -0.05);
        cam.advance(0.5);
        // X would leave the bound, so Z must not move either
        assert_eq!(cam.eye, Vector3::new(9.8, 3.0, 0.0));
    }

    #[test]
    fn rotate_is_undone_by_the_opposite_rotation() {
        let mut cam = camera();
        let before = cam.forward;
        cam.rotate(0.174);
        cam.rotate(-0.174);
        assert!((cam.forward.x - before.x).abs() < EPSILON);
        assert!((cam.forward.y - before.y).abs() < EPSILON);
        assert!((cam.forward.z - before.z).abs() < EPSILON);
    }

    #[test]
    fn rotate_preserves_height_component_and_length() {
        use cgmath::InnerSpace;
        let mut cam = camera();
        let len = cam.forward.magnitude();
        cam.rotate(1.0);
        assert!((cam.forward.y - (-0.7071)).abs() < EPSILON);
        assert!((cam.forward.magnitude() - len).abs() < EPSILON);
    }

    #[test]
    fn view_projection_centers_the_look_at_point() {
        let mut cam = camera();
        cam.resize_projection(800, 600);
        cam.update_view_proj();

        let clip = cam.view_projection() * cam.look_at().to_homogeneous();
        assert!((clip.x / clip.w).abs() < EPSILON);
        assert!((clip.y / clip.w).abs() < EPSILON);
        let depth = clip.z / clip.w;
        assert!((0.0..=1.0).contains(&depth));
    }

    #[test]
    fn resize_changes_only_the_projection() {
        let mut cam = camera();
        cam.resize_projection(800, 600);
        let view_before = cam.view_matrix();
        let proj_before = cam.projection_matrix();

        cam.resize_projection(1920, 1080);
        assert_eq!(view_before, cam.view_matrix());
        // horizontal scale follows the aspect ratio, vertical FOV is fixed
        assert!((cam.projection_matrix()[0][0] - proj_before[0][0]).abs() > EPSILON);
        assert!((cam.projection_matrix()[1][1] - proj_before[1][1]).abs() < EPSILON);
    }
}
