//! Procedural texture pixel generation
//!
//! The ground and crate patterns are generated as raw RGBA8 pixel data and
//! uploaded directly, so no image decoding is needed.

/// Two-tone checkerboard for the ground plane.
///
/// `cells` is the number of checker squares along each edge.
pub fn checkerboard(size: u32, cells: u32) -> Vec<u8> {
    let cell = (size / cells.max(1)).max(1);
    let light = [104, 125, 84, 255];
    let dark = [62, 79, 52, 255];

    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let parity = (x / cell + y / cell) % 2;
            let texel = if parity == 0 { light } else { dark };
            data.extend_from_slice(&texel);
        }
    }
    data
}

/// Wooden-crate pattern for the cubes: plank field, darker seams, and a
/// heavy border.
pub fn crate_pattern(size: u32) -> Vec<u8> {
    let border = size / 8;
    let plank = (size / 4).max(1);
    let wood = [156, 108, 62, 255];
    let seam = [118, 78, 42, 255];
    let frame = [92, 58, 30, 255];

    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let on_frame = x < border || y < border || x >= size - border || y >= size - border;
            let on_seam = y % plank < 2;
            let texel = if on_frame {
                frame
            } else if on_seam {
                seam
            } else {
                wood
            };
            data.extend_from_slice(&texel);
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_covers_every_texel() {
        let data = checkerboard(64, 8);
        assert_eq!(data.len(), 64 * 64 * 4);
        assert!(data.chunks_exact(4).all(|texel| texel[3] == 255));
    }

    #[test]
    fn checkerboard_alternates() {
        let data = checkerboard(64, 8);
        // first texel and one a full cell away differ
        assert_ne!(data[0..3], data[8 * 4..8 * 4 + 3]);
    }

    #[test]
    fn crate_pattern_has_a_border() {
        let size = 64u32;
        let data = crate_pattern(size);
        assert_eq!(data.len(), (size * size * 4) as usize);
        let corner = &data[0..4];
        let center_index = ((size / 2) * size + size / 2) as usize * 4;
        let center = &data[center_index..center_index + 4];
        assert_ne!(corner, center);
    }
}
