//! Line-list geometry for scene helpers.
//!
//! Every function returns vertex pairs; consecutive vertices form one
//! segment when drawn with `PrimitiveTopology::LineList`.

use cgmath::{InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4};

use crate::gfx::scene::vertex::LineVertex;

const AXIS_X: [f32; 3] = [1.0, 0.0, 0.0];
const AXIS_Y: [f32; 3] = [0.0, 1.0, 0.0];
const AXIS_Z: [f32; 3] = [0.0, 0.0, 1.0];

const FRUSTUM_COLOR: [f32; 3] = [1.0, 0.67, 0.0];
const CONE_COLOR: [f32; 3] = [1.0, 0.0, 0.0];
const UP_COLOR: [f32; 3] = [0.0, 0.67, 1.0];

/// Three coloured axes from the origin: X red, Y green, Z blue.
pub fn axes_lines(size: f32) -> Vec<LineVertex> {
    vec![
        LineVertex::new([0.0; 3], AXIS_X),
        LineVertex::new([size, 0.0, 0.0], AXIS_X),
        LineVertex::new([0.0; 3], AXIS_Y),
        LineVertex::new([0.0, size, 0.0], AXIS_Y),
        LineVertex::new([0.0; 3], AXIS_Z),
        LineVertex::new([0.0, 0.0, size], AXIS_Z),
    ]
}

/// Square outline at the light facing its target, plus a line to the target.
///
/// `size` is the half-extent of the square.
pub fn directional_light_lines(
    position: Vector3<f32>,
    target: Vector3<f32>,
    size: f32,
    color: [f32; 3],
) -> Vec<LineVertex> {
    let direction = target - position;
    let forward = if direction.magnitude2() > f32::EPSILON {
        direction.normalize()
    } else {
        -Vector3::unit_y()
    };

    let reference = if forward.y.abs() > 0.99 {
        Vector3::unit_z()
    } else {
        Vector3::unit_y()
    };
    let right = forward.cross(reference).normalize() * size;
    let up = right.cross(forward).normalize() * size;

    let corners = [
        position - right + up,
        position + right + up,
        position + right - up,
        position - right - up,
    ];

    let mut lines = Vec::with_capacity(10);
    for i in 0..4 {
        lines.push(LineVertex::new(corners[i].into(), color));
        lines.push(LineVertex::new(corners[(i + 1) % 4].into(), color));
    }
    lines.push(LineVertex::new(position.into(), color));
    lines.push(LineVertex::new(target.into(), color));
    lines
}

/// Wireframe of a view frustum.
///
/// `clip_from_world` is an OpenGL-convention view-projection (clip z in
/// `[-1, 1]`); its inverse maps the NDC cube corners back to world space.
/// Returns no lines when the matrix is singular.
pub fn frustum_lines(clip_from_world: Matrix4<f32>, eye: Vector3<f32>) -> Vec<LineVertex> {
    let Some(world_from_clip) = clip_from_world.invert() else {
        return Vec::new();
    };

    let unproject = |x: f32, y: f32, z: f32| -> Vector3<f32> {
        let p = world_from_clip * Vector4::new(x, y, z, 1.0);
        p.truncate() / p.w
    };

    // near: n0..n3, far: f0..f3 (counter-clockwise from bottom-left)
    let near = [
        unproject(-1.0, -1.0, -1.0),
        unproject(1.0, -1.0, -1.0),
        unproject(1.0, 1.0, -1.0),
        unproject(-1.0, 1.0, -1.0),
    ];
    let far = [
        unproject(-1.0, -1.0, 1.0),
        unproject(1.0, -1.0, 1.0),
        unproject(1.0, 1.0, 1.0),
        unproject(-1.0, 1.0, 1.0),
    ];

    let mut lines = Vec::with_capacity(36);
    let mut segment = |a: Vector3<f32>, b: Vector3<f32>, color: [f32; 3]| {
        lines.push(LineVertex::new(a.into(), color));
        lines.push(LineVertex::new(b.into(), color));
    };

    for i in 0..4 {
        let j = (i + 1) % 4;
        segment(near[i], near[j], FRUSTUM_COLOR);
        segment(far[i], far[j], FRUSTUM_COLOR);
        segment(near[i], far[i], FRUSTUM_COLOR);
        segment(eye, near[i], CONE_COLOR);
    }

    let far_center = unproject(0.0, 0.0, 1.0);
    segment(eye, far_center, CONE_COLOR);
    segment(unproject(0.0, 1.0, -1.0), unproject(0.0, 1.6, -1.0), UP_COLOR);

    lines
}
