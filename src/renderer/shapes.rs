//! Shape generation for 2D primitives
//!
//! Coordinates are playfield pixels: origin top-left, y grows downward.

use glam::Vec2;

use super::FrameSnapshot;
use super::vertex::{Vertex, colors};

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Whole scene, back to front: sky, gates, ground, avatar
pub fn scene(frame: &FrameSnapshot<'_>) -> Vec<Vertex> {
    let pf = frame.playfield;
    let mut vertices = Vec::with_capacity((3 + frame.gates.len() * 2) * 6);

    vertices.extend(rect(Vec2::ZERO, Vec2::new(pf.width, pf.height), colors::SKY));

    for gate in frame.gates {
        let color = if gate.passed {
            colors::GATE_PASSED
        } else {
            colors::GATE
        };
        // Upper barrier hangs from the top edge
        vertices.extend(rect(
            Vec2::new(gate.x, 0.0),
            Vec2::new(gate.right(), gate.top_height),
            color,
        ));
        // Lower barrier stands on the ground
        vertices.extend(rect(
            Vec2::new(gate.x, gate.bottom_y),
            Vec2::new(gate.right(), frame.ground_top),
            color,
        ));
    }

    vertices.extend(rect(
        Vec2::new(0.0, frame.ground_top),
        Vec2::new(pf.width, pf.height),
        colors::GROUND,
    ));

    let avatar = frame.avatar;
    let avatar_color = if frame.phase.is_over() {
        colors::AVATAR_CRASHED
    } else {
        colors::AVATAR
    };
    vertices.extend(rect(avatar.pos, avatar.pos + avatar.size, avatar_color));

    vertices
}
