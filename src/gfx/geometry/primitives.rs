//! # Primitive Shape Generation
//!
//! Builders for the three shapes the scene draws. All shapes are generated
//! with outward normals and texture coordinates, Y up.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate the ground plane in the XZ plane, centered at the origin.
///
/// Spans `-half_extent..half_extent` on X and Z with the normal pointing up.
/// `uv_tiles` controls how many times the texture repeats across the full
/// width, so the floor texture can tile instead of stretching.
pub fn generate_ground(half_extent: f32, segments: u32, uv_tiles: f32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(1);
    let size = half_extent * 2.0;

    for z in 0..=segs {
        let v = z as f32 / segs as f32;
        let pos_z = (v - 0.5) * size;

        for x in 0..=segs {
            let u = x as f32 / segs as f32;
            let pos_x = (u - 0.5) * size;

            data.vertices.push([pos_x, 0.0, pos_z]);
            data.normals.push([0.0, 1.0, 0.0]);
            data.tex_coords.push([u * uv_tiles, v * uv_tiles]);
        }
    }

    // Counter-clockwise winding when viewed from above (+Y)
    for z in 0..segs {
        for x in 0..segs {
            let i = z * (segs + 1) + x;
            let next_row = i + segs + 1;

            data.indices.push(i);
            data.indices.push(next_row);
            data.indices.push(i + 1);

            data.indices.push(next_row);
            data.indices.push(next_row + 1);
            data.indices.push(i + 1);
        }
    }

    data
}

/// Generate a hexagonal prism standing on the ground plane.
///
/// The base hexagon lies at y = 0, the top at y = `height`. Side faces are
/// flat shaded (one normal per face); the caps fan out from a center vertex.
pub fn generate_hexagonal_prism(radius: f32, height: f32) -> GeometryData {
    let mut data = GeometryData::new();

    let corner = |i: u32, y: f32| -> [f32; 3] {
        let angle = i as f32 * PI / 3.0;
        [radius * angle.cos(), y, radius * angle.sin()]
    };

    // Side faces: one quad per edge with the face normal
    for i in 0..6 {
        let a0 = i as f32 * PI / 3.0;
        let a1 = (i + 1) as f32 * PI / 3.0;
        let mid = (a0 + a1) * 0.5;
        let normal = [mid.cos(), 0.0, mid.sin()];

        let base = data.vertices.len() as u32;
        data.vertices.push(corner(i, 0.0));
        data.vertices.push(corner(i + 1, 0.0));
        data.vertices.push(corner(i + 1, height));
        data.vertices.push(corner(i, height));
        for _ in 0..4 {
            data.normals.push(normal);
        }
        let u0 = i as f32 / 6.0;
        let u1 = (i + 1) as f32 / 6.0;
        data.tex_coords.push([u0, 1.0]);
        data.tex_coords.push([u1, 1.0]);
        data.tex_coords.push([u1, 0.0]);
        data.tex_coords.push([u0, 0.0]);

        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    // Caps: center vertex plus six rim vertices, fanned
    for &(y, ny) in &[(height, 1.0f32), (0.0, -1.0)] {
        let center = data.vertices.len() as u32;
        data.vertices.push([0.0, y, 0.0]);
        data.normals.push([0.0, ny, 0.0]);
        data.tex_coords.push([0.5, 0.5]);

        for i in 0..6 {
            let pos = corner(i, y);
            data.vertices.push(pos);
            data.normals.push([0.0, ny, 0.0]);
            data.tex_coords
                .push([0.5 + 0.5 * (pos[0] / radius), 0.5 + 0.5 * (pos[2] / radius)]);
        }
        for i in 0..6 {
            let current = center + 1 + i;
            let next = center + 1 + (i + 1) % 6;
            if ny > 0.0 {
                data.indices.extend_from_slice(&[center, next, current]);
            } else {
                data.indices.extend_from_slice(&[center, current, next]);
            }
        }
    }

    data
}

/// Generate a unit cube centered at the origin.
///
/// Each face carries its own four vertices so normals stay flat and UVs run
/// 0..1 per face.
pub fn generate_cube() -> GeometryData {
    let mut data = GeometryData::new();

    // (normal, tangent toward +u, tangent toward +v) per face
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];

    for (normal, tan_u, tan_v) in faces {
        let base = data.vertices.len() as u32;
        for (su, sv) in [(-1.0f32, -1.0f32), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let position = [
                0.5 * (normal[0] + su * tan_u[0] + sv * tan_v[0]),
                0.5 * (normal[1] + su * tan_u[1] + sv * tan_v[1]),
                0.5 * (normal[2] + su * tan_u[2] + sv * tan_v[2]),
            ];
            data.vertices.push(position);
            data.normals.push(normal);
            data.tex_coords.push([0.5 * (su + 1.0), 0.5 * (1.0 - sv)]);
        }
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unit_normals(data: &GeometryData) {
        for n in &data.normals {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_cube_generation() {
        let cube = generate_cube();
        assert_eq!(cube.vertices.len(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.triangle_count(), 12);
        assert_unit_normals(&cube);

        // all corners on the unit cube shell
        for v in &cube.vertices {
            assert!((v[0].abs() - 0.5).abs() < 1e-6);
            assert!((v[1].abs() - 0.5).abs() < 1e-6);
            assert!((v[2].abs() - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_ground_generation() {
        let ground = generate_ground(10.0, 4, 8.0);
        assert_eq!(ground.vertices.len(), 25); // 5x5 grid
        assert_eq!(ground.indices.len(), 96); // 16 quads * 2 triangles * 3
        assert_unit_normals(&ground);

        for v in &ground.vertices {
            assert_eq!(v[1], 0.0);
            assert!(v[0] >= -10.0 && v[0] <= 10.0);
            assert!(v[2] >= -10.0 && v[2] <= 10.0);
        }
    }

    #[test]
    fn test_hexagonal_prism_generation() {
        let hexa = generate_hexagonal_prism(1.0, 1.0);
        assert_eq!(hexa.vertices.len(), 38); // 6 quads * 4 + 2 caps * 7
        assert_eq!(hexa.indices.len(), 72); // 6 quads * 6 + 2 caps * 18
        assert_eq!(hexa.vertices.len(), hexa.normals.len());
        assert_eq!(hexa.vertices.len(), hexa.tex_coords.len());
        assert_unit_normals(&hexa);
    }
}
