//! # Primitive Shape Generation
//!
//! Box and plane generators with outward normals. Shapes are centered on the
//! origin in a Y-up coordinate system.

use super::GeometryData;

/// Generate an axis-aligned box centered at the origin.
///
/// Each face gets its own four vertices so normals stay flat per face.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let (x, y, z) = (width * 0.5, height * 0.5, depth * 0.5);
    let mut data = GeometryData::default();

    // (normal, four corners counter-clockwise seen from outside)
    #[rustfmt::skip]
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        ([ 0.0,  0.0,  1.0], [[-x, -y,  z], [ x, -y,  z], [ x,  y,  z], [-x,  y,  z]]),
        ([ 0.0,  0.0, -1.0], [[ x, -y, -z], [-x, -y, -z], [-x,  y, -z], [ x,  y, -z]]),
        ([-1.0,  0.0,  0.0], [[-x, -y, -z], [-x, -y,  z], [-x,  y,  z], [-x,  y, -z]]),
        ([ 1.0,  0.0,  0.0], [[ x, -y,  z], [ x, -y, -z], [ x,  y, -z], [ x,  y,  z]]),
        ([ 0.0,  1.0,  0.0], [[-x,  y,  z], [ x,  y,  z], [ x,  y, -z], [-x,  y, -z]]),
        ([ 0.0, -1.0,  0.0], [[-x, -y, -z], [ x, -y, -z], [ x, -y,  z], [-x, -y,  z]]),
    ];

    for (normal, corners) in faces {
        let base = data.vertices.len() as u32;
        for corner in corners {
            data.vertices.push(corner);
            data.normals.push(normal);
        }
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a subdivided plane in the XY plane with its normal along +Z.
///
/// Rotate by -90° about X to lay it flat as a ground plane.
pub fn generate_plane(
    width: f32,
    height: f32,
    width_segments: u32,
    height_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::default();

    let w_segs = width_segments.max(1);
    let h_segs = height_segments.max(1);

    for row in 0..=h_segs {
        let v = row as f32 / h_segs as f32;
        let pos_y = (v - 0.5) * height;

        for col in 0..=w_segs {
            let u = col as f32 / w_segs as f32;
            let pos_x = (u - 0.5) * width;

            data.vertices.push([pos_x, pos_y, 0.0]);
            data.normals.push([0.0, 0.0, 1.0]);
        }
    }

    for row in 0..h_segs {
        for col in 0..w_segs {
            let i = row * (w_segs + 1) + col;
            let next_row = i + w_segs + 1;

            data.indices.extend_from_slice(&[i, i + 1, next_row]);
            data.indices
                .extend_from_slice(&[next_row, i + 1, next_row + 1]);
        }
    }

    data
}
