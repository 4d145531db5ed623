//! Arcball rotation controller
//!
//! Maps pointer drags on the viewport to an accumulated 3D rotation by
//! projecting screen points onto a virtual unit hemisphere and composing
//! the incremental rotations as quaternions.

use std::f64::consts::FRAC_PI_2;

use cgmath::{InnerSpace, Matrix4, Quaternion, Rad, Rotation3, SquareMatrix, Vector3, Zero};

/// Accumulates pointer-drag rotations as a unit quaternion and exposes the
/// result as a 4x4 rotation matrix.
///
/// The quaternion is kept in double precision and renormalized after every
/// update so repeated drags cannot drift it away from unit length. The
/// derived matrix is the only externally visible output; consumers re-read
/// it every frame.
pub struct Arcball {
    width: u32,
    height: u32,
    last: Vector3<f64>,
    dragging: bool,
    orientation: Quaternion<f64>,
    rotation: Matrix4<f32>,
}

impl Arcball {
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            last: Vector3::zero(),
            dragging: false,
            orientation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            rotation: Matrix4::identity(),
        }
    }

    /// Stores the viewport dimensions used for coordinate normalization.
    pub fn resize(&mut self, width: u32, height: u32) {
        debug_assert!(width > 0 && height > 0, "arcball viewport must be non-empty");
        self.width = width;
        self.height = height;
    }

    /// Projects a pixel coordinate onto the unit hemisphere.
    ///
    /// Screen X is normalized to [-1, 1], screen Y likewise but flipped so
    /// +Y points up. Points inside the unit circle land on the sphere
    /// surface; points outside fall off smoothly toward Z = 0 instead of
    /// leaving Z undefined.
    fn project(&self, x: f64, y: f64) -> Vector3<f64> {
        debug_assert!(self.width > 0 && self.height > 0, "arcball used before resize");
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        let nx = (2.0 * x - w) / w;
        let ny = (h - 2.0 * y) / h;
        let len = (nx * nx + ny * ny).sqrt();
        let nz = (FRAC_PI_2 * len.min(1.0)).cos();
        Vector3::new(nx, ny, nz).normalize()
    }

    /// Records the drag anchor point.
    pub fn start(&mut self, x: f64, y: f64) {
        self.last = self.project(x, y);
        self.dragging = true;
    }

    /// Folds the movement since the previous anchor into the accumulated
    /// orientation and rebuilds the rotation matrix.
    ///
    /// A drag with zero projected movement (or one whose endpoints admit no
    /// rotation axis) leaves the state untouched.
    pub fn end(&mut self, x: f64, y: f64) {
        debug_assert!(self.dragging, "drag ended without a matching start");
        let current = self.project(x, y);

        let diff = current - self.last;
        if diff == Vector3::zero() {
            return;
        }

        let angle = FRAC_PI_2 * diff.magnitude();
        let axis = current.cross(self.last);
        if axis == Vector3::zero() {
            return;
        }

        let incremental = Quaternion::from_axis_angle(axis.normalize(), Rad(angle));
        self.orientation = (self.orientation * incremental).normalize();
        self.rotation = rotation_matrix(&self.orientation);
        self.last = current;
    }

    /// The accumulated rotation, translation row/column identity.
    pub fn rotation(&self) -> Matrix4<f32> {
        self.rotation
    }
}

impl Default for Arcball {
    fn default() -> Self {
        Self::new()
    }
}

/// Standard quaternion-to-matrix conversion, narrowed to f32 for the GPU.
fn rotation_matrix(q: &Quaternion<f64>) -> Matrix4<f32> {
    let (s, x, y, z) = (q.s, q.v.x, q.v.y, q.v.z);
    #[rustfmt::skip]
    let m = Matrix4::new(
        (1.0 - 2.0 * (y * y + z * z)) as f32,
        (2.0 * (x * y + s * z)) as f32,
        (2.0 * (x * z - s * y)) as f32,
        0.0,
        (2.0 * (x * y - s * z)) as f32,
        (1.0 - 2.0 * (x * x + z * z)) as f32,
        (2.0 * (y * z + s * x)) as f32,
        0.0,
        (2.0 * (x * z + s * y)) as f32,
        (2.0 * (y * z - s * x)) as f32,
        (1.0 - 2.0 * (x * x + y * y)) as f32,
        0.0,
        0.0, 0.0, 0.0, 1.0,
    );
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dragged(points: &[(f64, f64)]) -> Arcball {
        let mut ball = Arcball::new();
        ball.resize(800, 600);
        ball.start(points[0].0, points[0].1);
        for &(x, y) in &points[1..] {
            ball.end(x, y);
        }
        ball
    }

    #[test]
    fn viewport_center_projects_onto_sphere_pole() {
        let mut ball = Arcball::new();
        ball.resize(800, 600);
        let p = ball.project(400.0, 300.0);
        assert!(p.x.abs() < 1e-12);
        assert!(p.y.abs() < 1e-12);
        assert!((p.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn projected_points_are_unit_length() {
        let mut ball = Arcball::new();
        ball.resize(800, 600);
        for &(x, y) in &[(0.0, 0.0), (800.0, 600.0), (123.0, 456.0), (790.0, 10.0)] {
            let p = ball.project(x, y);
            assert!((p.magnitude() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn orientation_stays_unit_length_across_drags() {
        let mut ball = Arcball::new();
        ball.resize(800, 600);
        ball.start(400.0, 300.0);
        for i in 0..200 {
            let x = 400.0 + f64::from(i % 37) * 9.0;
            let y = 300.0 - f64::from(i % 23) * 11.0;
            ball.end(x, y);
            assert!((ball.orientation.magnitude() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_movement_drag_leaves_rotation_untouched() {
        let mut ball = dragged(&[(400.0, 300.0), (500.0, 250.0)]);
        let before = ball.rotation();
        ball.end(500.0, 250.0);
        assert_eq!(before, ball.rotation());
    }

    #[test]
    fn rotation_matrix_rows_are_orthonormal() {
        let ball = dragged(&[(400.0, 300.0), (520.0, 210.0), (610.0, 330.0), (180.0, 90.0)]);
        let m = ball.rotation();
        let rows = [
            Vector3::new(m[0][0], m[1][0], m[2][0]),
            Vector3::new(m[0][1], m[1][1], m[2][1]),
            Vector3::new(m[0][2], m[1][2], m[2][2]),
        ];
        for row in &rows {
            assert!((row.magnitude() - 1.0).abs() < 1e-5);
        }
        for (i, a) in rows.iter().enumerate() {
            for b in &rows[i + 1..] {
                assert!(a.dot(*b).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn single_drag_rotates_by_the_scaled_chord_angle() {
        let mut ball = Arcball::new();
        ball.resize(800, 600);
        ball.start(400.0, 300.0);
        let from = ball.project(400.0, 300.0);
        let to = ball.project(600.0, 300.0);
        let expected = FRAC_PI_2 * (to - from).magnitude();

        ball.end(600.0, 300.0);
        let m = ball.rotation();
        // trace of the 3x3 block is 1 + 2cos(angle)
        let trace = f64::from(m[0][0] + m[1][1] + m[2][2]);
        assert!((trace - (1.0 + 2.0 * expected.cos())).abs() < 1e-5);
    }

    #[test]
    #[should_panic(expected = "without a matching start")]
    fn end_without_start_panics() {
        let mut ball = Arcball::new();
        ball.resize(800, 600);
        ball.end(10.0, 10.0);
    }
}
